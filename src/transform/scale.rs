use crate::{
    foundation::geom::{Point, Rect},
    pixel::{
        color::{Color, ColorModel},
        source::PixelSource,
    },
};

/// Integer downscale by point sampling.
///
/// The view covers `floor(W / factor) x floor(H / factor)` pixels and reads
/// `base.at(x * factor, y * factor)`; neighbors are never averaged. A factor of 1 is the
/// identity.
#[derive(Clone, Debug)]
pub struct ScaleView<S> {
    base: S,
    factor: i32,
}

impl<S: PixelSource> ScaleView<S> {
    /// Wrap `base`, sampling every `factor`-th pixel on both axes.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is zero or exceeds `i32::MAX`. Parsed factors are validated
    /// before they get here.
    pub fn new(base: S, factor: u32) -> Self {
        assert!(factor > 0, "scale factor must be greater than zero");
        let factor = i32::try_from(factor).expect("scale factor must fit in i32");
        Self { base, factor }
    }

    /// The sampling step.
    pub fn factor(&self) -> u32 {
        self.factor.unsigned_abs()
    }

    /// The wrapped source.
    pub fn base(&self) -> &S {
        &self.base
    }
}

impl<S: PixelSource> PixelSource for ScaleView<S> {
    fn color_model(&self) -> ColorModel {
        self.base.color_model()
    }

    fn bounds(&self) -> Rect {
        let b = self.base.bounds();
        Rect::new(
            b.min(),
            Point::new(b.max().x / self.factor, b.max().y / self.factor),
        )
    }

    fn at(&self, x: i32, y: i32) -> Color {
        self.base
            .at(x.saturating_mul(self.factor), y.saturating_mul(self.factor))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/scale.rs"]
mod tests;
