use std::path::PathBuf;

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

use super::*;
use crate::{pixel::color::ColorModel, transform::composite::CompositeView};

fn png_bytes(img: DynamicImage) -> Vec<u8> {
    encoded(img, RasterFormat::Png)
}

fn encoded(img: DynamicImage, format: RasterFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), format.image_format())
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_pixels() {
    let mut src = RgbaImage::new(3, 2);
    src.put_pixel(2, 1, Rgba([100, 50, 200, 128]));
    let bytes = png_bytes(DynamicImage::ImageRgba8(src));
    let decoded = decode_bytes(&bytes, RasterFormat::Png).unwrap();

    assert_eq!(decoded.width(), 3);
    assert_eq!(decoded.height(), 2);
    assert_eq!(decoded.color_model(), ColorModel::Nrgba8);
    assert_eq!(decoded.at(2, 1).to_straight8(), [100, 50, 200, 128]);
}

#[test]
fn decode_keeps_grayscale_model() {
    let src = GrayImage::from_pixel(2, 2, Luma([33]));
    let bytes = png_bytes(DynamicImage::ImageLuma8(src));
    let decoded = decode_bytes(&bytes, RasterFormat::Png).unwrap();
    assert_eq!(decoded.color_model(), ColorModel::Gray8);
}

#[test]
fn malformed_bytes_are_a_decode_failure() {
    let err = decode_bytes(b"definitely not a png", RasterFormat::Png).unwrap_err();
    assert!(matches!(err, PixmergeError::DecodeFailure(_)), "{err}");
    assert!(err.to_string().contains("png"));
}

#[test]
fn declared_format_wins_over_content() {
    let bytes = png_bytes(DynamicImage::ImageRgba8(RgbaImage::new(1, 1)));
    let err = decode_bytes(&bytes, RasterFormat::Bmp).unwrap_err();
    assert!(matches!(err, PixmergeError::DecodeFailure(_)));
}

#[test]
fn open_reports_missing_files() {
    let path = PathBuf::from("target").join("pixmerge-unit").join("does-not-exist.png");
    let err = open_image(&path).unwrap_err();
    assert!(matches!(err, PixmergeError::SourceUnavailable(_)), "{err}");
}

#[test]
fn open_checks_extension_before_touching_the_file() {
    let err = open_image(Path::new("does-not-exist.tga")).unwrap_err();
    assert!(matches!(err, PixmergeError::UnsupportedFormat(_)));

    let err = open_image(Path::new("does-not-exist")).unwrap_err();
    assert!(matches!(err, PixmergeError::MissingExtension(_)));
}

#[test]
fn open_reads_from_disk() {
    let dir = PathBuf::from("target").join("pixmerge-unit");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("open_reads_from_disk.PNG");
    RgbaImage::from_pixel(4, 1, Rgba([9, 8, 7, 255]))
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();

    let decoded = open_image(&path).unwrap();
    assert_eq!(decoded.width(), 4);
    assert_eq!(decoded.at(3, 0).to_straight8(), [9, 8, 7, 255]);
}

#[test]
fn rgb_png_and_bmp_bases_ignore_transparent_overlays() {
    let src = RgbImage::from_fn(4, 4, |x, y| Rgb([200, (x * 50) as u8, (y * 60) as u8]));
    let clear = DecodedImage::from(RgbaImage::new(4, 4));

    for format in [RasterFormat::Png, RasterFormat::Bmp] {
        let bytes = encoded(DynamicImage::ImageRgb8(src.clone()), format);
        let base = decode_bytes(&bytes, format).unwrap();
        assert!(base.color_model().has_alpha(), "{format}: {}", base.color_model());

        let view = CompositeView::new(&base, &clear, 0, 0);
        for p in base.bounds().points() {
            assert_eq!(view.at(p.x, p.y), base.at(p.x, p.y), "{format} at {p:?}");
        }
    }
}

#[test]
fn jpeg_bases_stay_opaque() {
    let src = RgbImage::from_pixel(8, 8, Rgb([120, 60, 30]));
    let bytes = encoded(DynamicImage::ImageRgb8(src), RasterFormat::Jpeg);
    let base = decode_bytes(&bytes, RasterFormat::Jpeg).unwrap();
    assert_eq!(base.color_model(), ColorModel::Rgb8);
}
