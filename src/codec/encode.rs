use std::io::{Cursor, Write};

use anyhow::Context as _;
use image::DynamicImage;

use crate::{
    codec::format::RasterFormat,
    foundation::error::{PixmergeError, PixmergeResult},
    pixel::source::PixelSource,
    render::sweep::{SampleDepth, SweepThreading, materialize, materialize_opaque},
};

/// Materialize `source` and serialize it as `format`.
///
/// PNG keeps 16-bit samples when the source's color model is wide; every other format is
/// written at 8 bits. JPEG has no alpha channel, so its pixels are composited over black.
pub fn encode_to_vec(
    source: &dyn PixelSource,
    format: RasterFormat,
    threading: &SweepThreading,
) -> PixmergeResult<Vec<u8>> {
    let image = if !format.supports_alpha() {
        DynamicImage::ImageRgb8(materialize_opaque(source, threading)?)
    } else if format.supports_wide() && source.color_model().is_wide() {
        materialize(source, SampleDepth::Sixteen, threading)?
    } else {
        materialize(source, SampleDepth::Eight, threading)?
    };

    tracing::info!(%format, width = image.width(), height = image.height(), "encoding image");
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), format.image_format())
        .map_err(|e| PixmergeError::encode_failure(format!("{format}: {e}")))?;
    Ok(buf)
}

/// Materialize `source`, serialize it as `format` and write it to `writer`.
pub fn encode<W: Write>(
    mut writer: W,
    source: &dyn PixelSource,
    format: RasterFormat,
    threading: &SweepThreading,
) -> PixmergeResult<usize> {
    let bytes = encode_to_vec(source, format, threading)?;
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .with_context(|| format!("write {} bytes of {format} output", bytes.len()))?;
    Ok(bytes.len())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/encode.rs"]
mod tests;
