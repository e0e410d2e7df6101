//! pixmerge reads a raster image, applies one lazy transformation and writes the result.
//!
//! Two transformations are available:
//!
//! - **scale**: integer downscaling by point sampling ([`ScaleView`]).
//! - **merge**: alpha-gated overlay of a second image ([`CompositeView`]).
//!
//! # Pipeline overview
//!
//! 1. **Decode**: file bytes → [`DecodedImage`] (delegated to the `image` crate)
//! 2. **Transform**: [`Command`] + base → a lazy [`PixelSource`] ([`apply_command`])
//! 3. **Materialize**: sweep every coordinate of the result's bounds ([`materialize`])
//! 4. **Encode**: pixels → BMP, GIF, JPEG or PNG bytes ([`encode`])
//!
//! Views never copy pixel data and compute nothing until `at` is called. Every view is
//! immutable, so the sweep may run serially or across rows on a rayon pool with identical
//! results.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod foundation;
mod pipeline;
mod pixel;
mod render;
mod transform;

pub use codec::decode::{decode, decode_bytes, open_image};
pub use codec::encode::{encode, encode_to_vec};
pub use codec::format::{RasterFormat, extension_of};
pub use foundation::error::{PixmergeError, PixmergeResult};
pub use foundation::geom::{Point, Rect};
pub use foundation::paths::expand_home;
pub use pipeline::{Job, OutputTarget, Rendered, render_job, run_job};
pub use pixel::color::{Color, ColorModel};
pub use pixel::decoded::DecodedImage;
pub use pixel::source::PixelSource;
pub use render::sweep::{SampleDepth, SweepThreading, materialize, materialize_opaque};
pub use transform::composite::CompositeView;
pub use transform::dispatch::{Command, FsLoader, ImageLoader, apply_command, parse_scale_factor};
pub use transform::scale::ScaleView;
