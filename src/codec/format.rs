use std::{ffi::OsStr, fmt, path::Path};

use crate::{
    foundation::error::{PixmergeError, PixmergeResult},
    pixel::color::ColorModel,
};

/// Raster formats that can be read and written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RasterFormat {
    /// Windows bitmap.
    Bmp,
    /// GIF (first frame only on decode).
    Gif,
    /// JPEG (lossy, no alpha).
    Jpeg,
    /// PNG.
    Png,
}

impl RasterFormat {
    /// Format used when no output path is given.
    pub const DEFAULT_OUTPUT: Self = Self::Bmp;

    /// Look up a format by file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> PixmergeResult<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Ok(Self::Bmp),
            "gif" => Ok(Self::Gif),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            _ => Err(PixmergeError::unsupported_format(format!(
                "unknown file extension '{ext}' (supported: bmp, gif, jpeg, jpg, png)"
            ))),
        }
    }

    /// Look up a format from the extension of `path`.
    pub fn from_path(path: &Path) -> PixmergeResult<Self> {
        Self::from_extension(extension_of(path)?)
    }

    /// Matching `image` crate format.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Gif => image::ImageFormat::Gif,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Png => image::ImageFormat::Png,
        }
    }

    /// Lowercase name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
        }
    }

    /// Color model of an image decoded from this format into a buffer of `color` layout.
    ///
    /// BMP, GIF and PNG decode RGB data into alpha-carrying images, so transparent overlay
    /// pixels stay transparent when merged onto them. JPEG and grayscale stay opaque.
    pub fn decoded_model(self, color: image::ColorType) -> ColorModel {
        match (self, ColorModel::from_color_type(color)) {
            (Self::Jpeg, model) => model,
            (_, ColorModel::Rgb8) => ColorModel::Nrgba8,
            (_, ColorModel::Rgb16) => ColorModel::Rgba64,
            (_, model) => model,
        }
    }

    /// `true` when the encoder can store 16 bits per channel.
    pub fn supports_wide(self) -> bool {
        matches!(self, Self::Png)
    }

    /// `true` when the encoder can store an alpha channel.
    pub fn supports_alpha(self) -> bool {
        !matches!(self, Self::Jpeg)
    }
}

impl fmt::Display for RasterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The extension of `path`, or [`PixmergeError::MissingExtension`].
pub fn extension_of(path: &Path) -> PixmergeResult<&str> {
    path.extension()
        .and_then(OsStr::to_str)
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| PixmergeError::missing_extension(path))
}

#[cfg(test)]
#[path = "../../tests/unit/codec/format.rs"]
mod tests;
