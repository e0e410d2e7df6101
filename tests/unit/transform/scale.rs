use image::{Rgba, RgbaImage};

use super::*;
use crate::pixel::decoded::DecodedImage;

fn gradient(w: u32, h: u32) -> DecodedImage {
    DecodedImage::from(RgbaImage::from_fn(w, h, |x, y| {
        Rgba([(x * 10) as u8, (y * 10) as u8, 7, 255])
    }))
}

struct Offset {
    rect: Rect,
}

impl PixelSource for Offset {
    fn color_model(&self) -> ColorModel {
        ColorModel::Rgba64
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn at(&self, x: i32, y: i32) -> Color {
        Color::from_premultiplied(x as u16, y as u16, 0, u16::MAX)
    }
}

#[test]
fn bounds_are_floor_divided() {
    let base = gradient(10, 7);
    for (factor, w, h) in [(1, 10, 7), (2, 5, 3), (3, 3, 2), (7, 1, 1), (11, 0, 0)] {
        let view = ScaleView::new(&base, factor);
        assert_eq!(view.bounds().width(), w, "factor {factor}");
        assert_eq!(view.bounds().height(), h, "factor {factor}");
    }
}

#[test]
fn at_point_samples_the_base() {
    let base = gradient(9, 9);
    let view = ScaleView::new(&base, 3);
    for p in view.bounds().points() {
        assert_eq!(view.at(p.x, p.y), base.at(p.x * 3, p.y * 3));
    }
    assert_eq!(view.at(2, 1).to_straight8(), [60, 30, 7, 255]);
}

#[test]
fn factor_one_is_identity() {
    let base = gradient(6, 4);
    let view = ScaleView::new(base.clone(), 1);
    assert_eq!(view.bounds(), base.bounds());
    for p in base.bounds().points() {
        assert_eq!(view.at(p.x, p.y), base.at(p.x, p.y));
    }
}

#[test]
fn color_model_delegates_to_base() {
    let base = gradient(2, 2);
    assert_eq!(ScaleView::new(&base, 2).color_model(), ColorModel::Nrgba8);
}

#[test]
fn accessors_expose_construction_inputs() {
    let base = gradient(4, 4);
    let view = ScaleView::new(&base, 3);
    assert_eq!(view.factor(), 3);
    assert!(std::ptr::eq(*view.base(), &base));
}

#[test]
fn min_corner_is_kept_and_max_divided() {
    let src = Offset {
        rect: Rect::new(Point::new(2, 2), Point::new(10, 9)),
    };
    let view = ScaleView::new(&src, 2);
    assert_eq!(view.bounds().min(), Point::new(2, 2));
    assert_eq!(view.bounds().max(), Point::new(5, 4));
    assert_eq!(view.at(3, 2).rgba(), (6, 4, 0, u16::MAX));
}

#[test]
fn views_nest() {
    let base = gradient(16, 16);
    let view = ScaleView::new(ScaleView::new(&base, 2), 2);
    assert_eq!(view.bounds(), Rect::from_size(4, 4));
    assert_eq!(view.at(1, 3), base.at(4, 12));
}

#[test]
#[should_panic(expected = "scale factor must be greater than zero")]
fn zero_factor_panics() {
    let base = gradient(2, 2);
    let _ = ScaleView::new(&base, 0);
}
