use image::{DynamicImage, ImageBuffer, Rgba, RgbImage, RgbaImage};
use rayon::prelude::*;

use crate::{
    foundation::error::{PixmergeError, PixmergeResult},
    pixel::{color::Color, source::PixelSource},
};

/// How the materializing sweep is scheduled.
///
/// Serial and parallel sweeps produce identical buffers; `at` has no side effects.
#[derive(Clone, Debug, Default)]
pub struct SweepThreading {
    /// Evaluate rows on a rayon pool.
    pub parallel: bool,
    /// Override rayon worker threads (parallel mode only).
    pub threads: Option<usize>,
}

/// Sample depth of a materialized buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleDepth {
    /// 8 bits per channel.
    Eight,
    /// 16 bits per channel.
    Sixteen,
}

/// Evaluate every pixel of `source` into a straight-alpha RGBA buffer.
///
/// Pixel `(0, 0)` of the buffer is `source.bounds().min()`.
pub fn materialize(
    source: &dyn PixelSource,
    depth: SampleDepth,
    threading: &SweepThreading,
) -> PixmergeResult<DynamicImage> {
    let bounds = source.bounds();
    let (width, height) = (bounds.width(), bounds.height());
    tracing::debug!(width, height, ?depth, parallel = threading.parallel, "materializing");

    match depth {
        SampleDepth::Eight => {
            let data = sweep(source, threading, Color::to_straight8)?;
            RgbaImage::from_raw(width, height, data)
                .map(DynamicImage::ImageRgba8)
                .ok_or_else(|| buffer_mismatch(width, height))
        }
        SampleDepth::Sixteen => {
            let data = sweep(source, threading, Color::to_straight16)?;
            ImageBuffer::<Rgba<u16>, Vec<u16>>::from_raw(width, height, data)
                .map(DynamicImage::ImageRgba16)
                .ok_or_else(|| buffer_mismatch(width, height))
        }
    }
}

/// Evaluate every pixel of `source` into an opaque RGB buffer, composited over black.
pub fn materialize_opaque(
    source: &dyn PixelSource,
    threading: &SweepThreading,
) -> PixmergeResult<RgbImage> {
    let bounds = source.bounds();
    let (width, height) = (bounds.width(), bounds.height());
    let data = sweep(source, threading, Color::to_opaque_rgb8)?;
    RgbImage::from_raw(width, height, data).ok_or_else(|| buffer_mismatch(width, height))
}

fn sweep<T, const N: usize>(
    source: &dyn PixelSource,
    threading: &SweepThreading,
    pixel: impl Fn(Color) -> [T; N] + Sync,
) -> PixmergeResult<Vec<T>>
where
    T: Copy + Default + Send,
{
    let bounds = source.bounds();
    let row_len = bounds.width() as usize * N;
    let mut buf = vec![T::default(); row_len * bounds.height() as usize];
    if row_len == 0 {
        return Ok(buf);
    }

    let min = bounds.min();
    let fill_row = |(row, out): (usize, &mut [T])| {
        let y = min.y + row as i32;
        for (col, px) in out.chunks_exact_mut(N).enumerate() {
            px.copy_from_slice(&pixel(source.at(min.x + col as i32, y)));
        }
    };

    if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| buf.par_chunks_mut(row_len).enumerate().for_each(fill_row));
    } else {
        buf.chunks_mut(row_len).enumerate().for_each(fill_row);
    }
    Ok(buf)
}

fn build_thread_pool(threads: Option<usize>) -> PixmergeResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PixmergeError::Other(anyhow::anyhow!(
            "sweep threading 'threads' must be >= 1 when set"
        )));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        PixmergeError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}"))
    })
}

fn buffer_mismatch(width: u32, height: u32) -> PixmergeError {
    PixmergeError::encode_failure(format!(
        "materialized buffer does not match {width}x{height}"
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/sweep.rs"]
mod tests;
