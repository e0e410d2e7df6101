use std::sync::Arc;

use crate::{foundation::geom::Rect, pixel::color::{Color, ColorModel}};

/// A lazily evaluated image: a color model, a coordinate domain and a per-pixel query.
///
/// Implementations are immutable after construction and `at` is a pure function of
/// `(self, x, y)`, so any evaluation order (including parallel sweeps) yields the same image.
pub trait PixelSource: Send + Sync {
    /// Canonical color model of this source.
    fn color_model(&self) -> ColorModel;

    /// Valid coordinate domain. Every point inside yields a defined color from [`Self::at`].
    fn bounds(&self) -> Rect;

    /// Color at `(x, y)`. Callers only ever ask for points inside [`Self::bounds`].
    fn at(&self, x: i32, y: i32) -> Color;
}

impl<S: PixelSource + ?Sized> PixelSource for &S {
    fn color_model(&self) -> ColorModel {
        (**self).color_model()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn at(&self, x: i32, y: i32) -> Color {
        (**self).at(x, y)
    }
}

impl<S: PixelSource + ?Sized> PixelSource for Box<S> {
    fn color_model(&self) -> ColorModel {
        (**self).color_model()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn at(&self, x: i32, y: i32) -> Color {
        (**self).at(x, y)
    }
}

impl<S: PixelSource + ?Sized> PixelSource for Arc<S> {
    fn color_model(&self) -> ColorModel {
        (**self).color_model()
    }

    fn bounds(&self) -> Rect {
        (**self).bounds()
    }

    fn at(&self, x: i32, y: i32) -> Color {
        (**self).at(x, y)
    }
}
