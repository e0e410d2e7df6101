use std::fmt;

/// Premultiplied RGBA color with 16 bits per channel.
///
/// Color channels never exceed alpha. Conversions to and from straight-alpha samples round
/// to nearest, so 8-bit straight-alpha data survives a round trip unchanged wherever alpha
/// is non-zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Color {
    r: u16,
    g: u16,
    b: u16,
    a: u16,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Build from premultiplied channels. Color channels are clamped to `a`.
    pub fn from_premultiplied(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self {
            r: r.min(a),
            g: g.min(a),
            b: b.min(a),
            a,
        }
    }

    /// Build from straight (non-premultiplied) 16-bit channels.
    pub fn from_straight16(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self {
            r: premultiply(r, a),
            g: premultiply(g, a),
            b: premultiply(b, a),
            a,
        }
    }

    /// Build from straight (non-premultiplied) 8-bit channels.
    pub fn from_straight8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::from_straight16(widen(r), widen(g), widen(b), widen(a))
    }

    /// Premultiplied `(r, g, b, a)` channels.
    pub fn rgba(self) -> (u16, u16, u16, u16) {
        (self.r, self.g, self.b, self.a)
    }

    /// Alpha channel.
    pub fn alpha(self) -> u16 {
        self.a
    }

    /// Straight-alpha 16-bit channels. Fully transparent colors map to all zeros.
    pub fn to_straight16(self) -> [u16; 4] {
        [
            unpremultiply(self.r, self.a),
            unpremultiply(self.g, self.a),
            unpremultiply(self.b, self.a),
            self.a,
        ]
    }

    /// Straight-alpha 8-bit channels.
    pub fn to_straight8(self) -> [u8; 4] {
        self.to_straight16().map(narrow)
    }

    /// 8-bit RGB with alpha discarded, i.e. the color composited over black.
    pub fn to_opaque_rgb8(self) -> [u8; 3] {
        [narrow(self.r), narrow(self.g), narrow(self.b)]
    }
}

/// Canonical pixel representation of a [`crate::PixelSource`].
///
/// Converting a color into a model quantizes it exactly the way storing it in a buffer of
/// that layout would. Opaque models drop alpha and keep the premultiplied channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// Lossless: premultiplied 16-bit RGBA.
    Rgba64,
    /// Straight-alpha 8-bit RGBA.
    Nrgba8,
    /// Straight-alpha 16-bit RGBA.
    Nrgba16,
    /// Opaque 8-bit RGB.
    Rgb8,
    /// Opaque 16-bit RGB.
    Rgb16,
    /// Opaque 8-bit luma.
    Gray8,
    /// Opaque 16-bit luma.
    Gray16,
    /// Straight-alpha 8-bit luma.
    GrayAlpha8,
    /// Straight-alpha 16-bit luma.
    GrayAlpha16,
}

impl ColorModel {
    /// Model matching a decoded buffer of the given color type.
    pub fn from_color_type(color: image::ColorType) -> Self {
        use image::ColorType;
        match color {
            ColorType::L8 => Self::Gray8,
            ColorType::La8 => Self::GrayAlpha8,
            ColorType::Rgb8 => Self::Rgb8,
            ColorType::Rgba8 => Self::Nrgba8,
            ColorType::Rgba16 => Self::Nrgba16,
            ColorType::L16 => Self::Gray16,
            ColorType::La16 => Self::GrayAlpha16,
            ColorType::Rgb16 | ColorType::Rgb32F => Self::Rgb16,
            _ => Self::Rgba64,
        }
    }

    /// Map `c` into this model's representation.
    pub fn convert(self, c: Color) -> Color {
        match self {
            Self::Rgba64 => c,
            Self::Nrgba8 => {
                let [r, g, b, a] = c.to_straight8();
                Color::from_straight8(r, g, b, a)
            }
            Self::Nrgba16 => {
                let [r, g, b, a] = c.to_straight16();
                Color::from_straight16(r, g, b, a)
            }
            Self::Rgb8 => {
                let [r, g, b] = c.to_opaque_rgb8();
                Color::from_straight8(r, g, b, u8::MAX)
            }
            Self::Rgb16 => Color::from_premultiplied(c.r, c.g, c.b, u16::MAX),
            Self::Gray8 => {
                let y = narrow(luma16(c.r, c.g, c.b));
                Color::from_straight8(y, y, y, u8::MAX)
            }
            Self::Gray16 => {
                let y = luma16(c.r, c.g, c.b);
                Color::from_premultiplied(y, y, y, u16::MAX)
            }
            Self::GrayAlpha8 => {
                let [r, g, b, a] = c.to_straight16();
                let y = narrow(luma16(r, g, b));
                Color::from_straight8(y, y, y, narrow(a))
            }
            Self::GrayAlpha16 => {
                let [r, g, b, a] = c.to_straight16();
                let y = luma16(r, g, b);
                Color::from_straight16(y, y, y, a)
            }
        }
    }

    /// `true` for models with more than 8 bits per channel.
    pub fn is_wide(self) -> bool {
        matches!(
            self,
            Self::Rgba64 | Self::Nrgba16 | Self::Rgb16 | Self::Gray16 | Self::GrayAlpha16
        )
    }

    /// `true` for models that carry an alpha channel.
    pub fn has_alpha(self) -> bool {
        !matches!(self, Self::Rgb8 | Self::Rgb16 | Self::Gray8 | Self::Gray16)
    }
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rgba64 => "rgba64",
            Self::Nrgba8 => "nrgba8",
            Self::Nrgba16 => "nrgba16",
            Self::Rgb8 => "rgb8",
            Self::Rgb16 => "rgb16",
            Self::Gray8 => "gray8",
            Self::Gray16 => "gray16",
            Self::GrayAlpha8 => "gray-alpha8",
            Self::GrayAlpha16 => "gray-alpha16",
        };
        f.write_str(name)
    }
}

fn widen(v: u8) -> u16 {
    u16::from(v) * 257
}

fn narrow(v: u16) -> u8 {
    ((u32::from(v) + 128) / 257) as u8
}

fn premultiply(v: u16, a: u16) -> u16 {
    ((u32::from(v) * u32::from(a) + 32_767) / 65_535) as u16
}

fn unpremultiply(p: u16, a: u16) -> u16 {
    if a == 0 {
        return 0;
    }
    let a = u32::from(a);
    ((u32::from(p) * 65_535 + a / 2) / a).min(65_535) as u16
}

// BT.601 weights in 16.16 fixed point.
fn luma16(r: u16, g: u16, b: u16) -> u16 {
    ((19_595 * u32::from(r) + 38_470 * u32::from(g) + 7_471 * u32::from(b) + (1 << 15)) >> 16)
        as u16
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/color.rs"]
mod tests;
