use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb, RgbImage, Rgba, RgbaImage};

use super::*;
use crate::{
    codec::decode::decode_bytes,
    pixel::decoded::DecodedImage,
    transform::{composite::CompositeView, scale::ScaleView},
};

fn checker(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([250, 20, 20, 255])
        } else {
            Rgba([20, 20, 250, 90])
        }
    })
}

#[test]
fn png_round_trip_is_exact() {
    let src = checker(5, 4);
    let base = DecodedImage::from(src.clone());
    let view = ScaleView::new(&base, 1);

    let bytes = encode_to_vec(&view, RasterFormat::Png, &SweepThreading::default()).unwrap();
    let back = decode_bytes(&bytes, RasterFormat::Png).unwrap();
    assert_eq!(back.as_dynamic().to_rgba8(), src);
}

#[test]
fn bmp_round_trip_is_exact_for_opaque_images() {
    let src = RgbaImage::from_fn(6, 3, |x, y| Rgba([(x * 40) as u8, (y * 80) as u8, 5, 255]));
    let base = DecodedImage::from(src.clone());

    let bytes = encode_to_vec(&base, RasterFormat::Bmp, &SweepThreading::default()).unwrap();
    let back = decode_bytes(&bytes, RasterFormat::Bmp).unwrap();
    assert_eq!(back.as_dynamic().to_rgba8(), src);
}

#[test]
fn transparent_merge_round_trips_under_png() {
    let src = checker(4, 4);
    let base = DecodedImage::from(src.clone());
    let clear = DecodedImage::from(RgbaImage::new(4, 4));
    let view = CompositeView::new(&base, &clear, 0, 0);

    let bytes = encode_to_vec(&view, RasterFormat::Png, &SweepThreading::default()).unwrap();
    let back = decode_bytes(&bytes, RasterFormat::Png).unwrap();
    assert_eq!(back.as_dynamic().to_rgba8(), src);
}

#[test]
fn jpeg_output_is_opaque_with_expected_size() {
    let base = DecodedImage::from(checker(16, 8));
    let view = ScaleView::new(&base, 2);

    let bytes = encode_to_vec(&view, RasterFormat::Jpeg, &SweepThreading::default()).unwrap();
    let back = decode_bytes(&bytes, RasterFormat::Jpeg).unwrap();
    assert_eq!(back.as_dynamic().dimensions(), (8, 4));
    assert!(!back.color_model().has_alpha());
}

#[test]
fn gif_output_decodes() {
    let base = DecodedImage::from(RgbaImage::from_pixel(3, 3, Rgba([0, 200, 0, 255])));
    let bytes = encode_to_vec(&base, RasterFormat::Gif, &SweepThreading::default()).unwrap();
    let back = decode_bytes(&bytes, RasterFormat::Gif).unwrap();
    assert_eq!(back.as_dynamic().dimensions(), (3, 3));
}

#[test]
fn wide_sources_stay_16_bit_in_png() {
    let mut buf: ImageBuffer<Rgba<u16>, Vec<u16>> = ImageBuffer::new(1, 1);
    buf.put_pixel(0, 0, Rgba([0x0102, 0x0304, 0x0506, u16::MAX]));
    let base = DecodedImage::new(DynamicImage::ImageRgba16(buf.clone()));

    let bytes = encode_to_vec(&base, RasterFormat::Png, &SweepThreading::default()).unwrap();
    let back = decode_bytes(&bytes, RasterFormat::Png).unwrap();
    assert_eq!(back.as_dynamic().as_rgba16().unwrap(), &buf);

    let bytes = encode_to_vec(&base, RasterFormat::Bmp, &SweepThreading::default()).unwrap();
    let back = decode_bytes(&bytes, RasterFormat::Bmp).unwrap();
    assert_eq!(back.as_dynamic().to_rgba8().get_pixel(0, 0).0, [1, 3, 5, 255]);
}

#[test]
fn encode_writes_all_bytes() {
    let base = DecodedImage::from(checker(2, 2));
    let mut out = Vec::new();
    let n = encode(&mut out, &base, RasterFormat::Png, &SweepThreading::default()).unwrap();
    assert_eq!(n, out.len());
    assert!(out.starts_with(b"\x89PNG"));
}

#[test]
fn opaque_rgb_files_round_trip_through_transparent_merge() {
    let src = RgbImage::from_fn(5, 3, |x, y| Rgb([(x * 50) as u8, (y * 90) as u8, 17]));
    let clear = DecodedImage::from(RgbaImage::new(5, 3));

    for format in [RasterFormat::Png, RasterFormat::Bmp] {
        let mut file = Vec::new();
        DynamicImage::ImageRgb8(src.clone())
            .write_to(&mut Cursor::new(&mut file), format.image_format())
            .unwrap();
        let base = decode_bytes(&file, format).unwrap();

        let view = CompositeView::new(&base, &clear, 0, 0);
        let bytes = encode_to_vec(&view, format, &SweepThreading::default()).unwrap();
        let back = decode_bytes(&bytes, format).unwrap();
        assert_eq!(back.as_dynamic().to_rgb8(), src, "{format}");

        let identity = ScaleView::new(&base, 1);
        let bytes = encode_to_vec(&identity, format, &SweepThreading::default()).unwrap();
        let back = decode_bytes(&bytes, format).unwrap();
        assert_eq!(back.as_dynamic().to_rgb8(), src, "{format}");
    }
}
