use crate::{
    foundation::geom::{Point, Rect},
    pixel::{
        color::{Color, ColorModel},
        source::PixelSource,
    },
};

/// Overlay merge gated by a visibility window and the overlay's alpha.
///
/// The result always has the base's bounds and color model. A pixel shows the overlay when
/// it lies inside the visibility window and the overlay color, converted into the base's
/// model, has non-zero alpha; otherwise it shows the base. Alpha is a gate, not a blend
/// weight.
///
/// The offsets do not move the overlay. They shrink its window from both edges: on the x axis
/// the window is `overlay.min.x + offset_x ..= overlay.max.x - offset_x` (same for y), and
/// the overlay is sampled at the same absolute coordinate as the base.
#[derive(Clone, Debug)]
pub struct CompositeView<B, O> {
    base: B,
    overlay: O,
    offset_x: i32,
    offset_y: i32,
}

impl<B: PixelSource, O: PixelSource> CompositeView<B, O> {
    /// Merge `overlay` onto `base` with the given window offsets.
    pub fn new(base: B, overlay: O, offset_x: i32, offset_y: i32) -> Self {
        Self {
            base,
            overlay,
            offset_x,
            offset_y,
        }
    }

    /// `(offset_x, offset_y)`.
    pub fn offset(&self) -> (i32, i32) {
        (self.offset_x, self.offset_y)
    }

    /// The region where the overlay may show, clipped to the overlay's own bounds.
    ///
    /// Returns `None` when the offsets leave nothing visible.
    pub fn visibility_window(&self) -> Option<Rect> {
        let ob = self.overlay.bounds();
        let min = Point::new(
            ob.min().x.saturating_add(self.offset_x),
            ob.min().y.saturating_add(self.offset_y),
        );
        // Inclusive upper edge, then clipped to the overlay (exclusive max).
        let max = Point::new(
            ob.max()
                .x
                .saturating_sub(self.offset_x)
                .saturating_add(1)
                .min(ob.max().x),
            ob.max()
                .y
                .saturating_sub(self.offset_y)
                .saturating_add(1)
                .min(ob.max().y),
        );
        let window = Rect::new(
            Point::new(min.x.max(ob.min().x), min.y.max(ob.min().y)),
            max,
        );
        (!window.is_empty()).then_some(window)
    }

    fn in_window(&self, x: i32, y: i32) -> bool {
        let ob = self.overlay.bounds();
        x >= ob.min().x.saturating_add(self.offset_x)
            && x <= ob.max().x.saturating_sub(self.offset_x)
            && y >= ob.min().y.saturating_add(self.offset_y)
            && y <= ob.max().y.saturating_sub(self.offset_y)
    }
}

impl<B: PixelSource, O: PixelSource> PixelSource for CompositeView<B, O> {
    fn color_model(&self) -> ColorModel {
        self.base.color_model()
    }

    fn bounds(&self) -> Rect {
        self.base.bounds()
    }

    fn at(&self, x: i32, y: i32) -> Color {
        let left = self.base.at(x, y);

        // The inclusive window reaches one past the overlay's last pixel; that edge reads as
        // transparent.
        if !self.in_window(x, y) || !self.overlay.bounds().contains(x, y) {
            return left;
        }

        let right = self.base.color_model().convert(self.overlay.at(x, y));
        if right.alpha() > 0 { right } else { left }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/composite.rs"]
mod tests;
