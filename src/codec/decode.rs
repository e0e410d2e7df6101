use std::{
    fs::File,
    io::{BufRead, BufReader, Cursor, Seek},
    path::Path,
};

use crate::{
    codec::format::RasterFormat,
    foundation::{
        error::{PixmergeError, PixmergeResult},
        paths::expand_home,
    },
    pixel::{decoded::DecodedImage, source::PixelSource},
};

/// Decode `reader` as `format`.
pub fn decode<R: BufRead + Seek>(reader: R, format: RasterFormat) -> PixmergeResult<DecodedImage> {
    tracing::info!(%format, "decoding image");
    let image = image::load(reader, format.image_format())
        .map_err(|e| PixmergeError::decode_failure(format!("{format}: {e}")))?;

    let model = format.decoded_model(image.color());
    let decoded = DecodedImage::with_model(image, model);
    tracing::debug!(
        width = decoded.width(),
        height = decoded.height(),
        model = %decoded.color_model(),
        "decoded image"
    );
    Ok(decoded)
}

/// Decode an in-memory encoded image.
pub fn decode_bytes(bytes: &[u8], format: RasterFormat) -> PixmergeResult<DecodedImage> {
    decode(Cursor::new(bytes), format)
}

/// Open and decode the image at `path`, choosing the decoder from its extension.
///
/// `~` in the path expands to the home directory. The extension is checked before the
/// file is touched.
pub fn open_image(path: &Path) -> PixmergeResult<DecodedImage> {
    let format = RasterFormat::from_path(path)?;
    let path = expand_home(path);
    tracing::info!(path = %path.display(), "reading image");

    let file = File::open(&path).map_err(|e| PixmergeError::source_unavailable(&path, e))?;
    decode(BufReader::new(file), format)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/decode.rs"]
mod tests;
