use std::sync::Arc;

use image::{DynamicImage, GenericImageView};

use crate::{
    foundation::geom::Rect,
    pixel::{
        color::{Color, ColorModel},
        source::PixelSource,
    },
};

/// A decoded raster wrapped as a [`PixelSource`] with its origin at `(0, 0)`.
///
/// Cloning shares the underlying buffer.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    image: Arc<DynamicImage>,
    model: ColorModel,
}

impl DecodedImage {
    /// Wrap a decoded image, deriving the color model from its pixel layout alone.
    pub fn new(image: DynamicImage) -> Self {
        let model = ColorModel::from_color_type(image.color());
        Self::with_model(image, model)
    }

    /// Wrap a decoded image under an explicit color model.
    pub fn with_model(image: DynamicImage, model: ColorModel) -> Self {
        Self {
            image: Arc::new(image),
            model,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The decoded buffer.
    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}

impl From<DynamicImage> for DecodedImage {
    fn from(image: DynamicImage) -> Self {
        Self::new(image)
    }
}

impl From<image::RgbaImage> for DecodedImage {
    fn from(image: image::RgbaImage) -> Self {
        Self::new(DynamicImage::ImageRgba8(image))
    }
}

impl PixelSource for DecodedImage {
    fn color_model(&self) -> ColorModel {
        self.model
    }

    fn bounds(&self) -> Rect {
        Rect::from_size(self.width(), self.height())
    }

    fn at(&self, x: i32, y: i32) -> Color {
        let (Ok(px), Ok(py)) = (u32::try_from(x), u32::try_from(y)) else {
            return Color::TRANSPARENT;
        };
        if px >= self.width() || py >= self.height() {
            return Color::TRANSPARENT;
        }

        match &*self.image {
            DynamicImage::ImageLuma8(img) => {
                let l = img.get_pixel(px, py)[0];
                Color::from_straight8(l, l, l, u8::MAX)
            }
            DynamicImage::ImageLumaA8(img) => {
                let p = img.get_pixel(px, py);
                Color::from_straight8(p[0], p[0], p[0], p[1])
            }
            DynamicImage::ImageRgb8(img) => {
                let p = img.get_pixel(px, py);
                Color::from_straight8(p[0], p[1], p[2], u8::MAX)
            }
            DynamicImage::ImageRgba8(img) => {
                let p = img.get_pixel(px, py);
                Color::from_straight8(p[0], p[1], p[2], p[3])
            }
            DynamicImage::ImageLuma16(img) => {
                let l = img.get_pixel(px, py)[0];
                Color::from_straight16(l, l, l, u16::MAX)
            }
            DynamicImage::ImageLumaA16(img) => {
                let p = img.get_pixel(px, py);
                Color::from_straight16(p[0], p[0], p[0], p[1])
            }
            DynamicImage::ImageRgb16(img) => {
                let p = img.get_pixel(px, py);
                Color::from_straight16(p[0], p[1], p[2], u16::MAX)
            }
            DynamicImage::ImageRgba16(img) => {
                let p = img.get_pixel(px, py);
                Color::from_straight16(p[0], p[1], p[2], p[3])
            }
            DynamicImage::ImageRgb32F(img) => {
                let p = img.get_pixel(px, py);
                Color::from_straight16(
                    unit_to_u16(p[0]),
                    unit_to_u16(p[1]),
                    unit_to_u16(p[2]),
                    u16::MAX,
                )
            }
            DynamicImage::ImageRgba32F(img) => {
                let p = img.get_pixel(px, py);
                Color::from_straight16(
                    unit_to_u16(p[0]),
                    unit_to_u16(p[1]),
                    unit_to_u16(p[2]),
                    unit_to_u16(p[3]),
                )
            }
            other => {
                let p = other.get_pixel(px, py);
                Color::from_straight8(p[0], p[1], p[2], p[3])
            }
        }
    }
}

fn unit_to_u16(v: f32) -> u16 {
    (v.clamp(0.0, 1.0) * 65_535.0).round() as u16
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/decoded.rs"]
mod tests;
