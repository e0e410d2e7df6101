use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::{
    codec::{encode::encode_to_vec, format::RasterFormat},
    foundation::{error::PixmergeResult, paths::expand_home},
    pixel::source::PixelSource,
    render::sweep::SweepThreading,
    transform::dispatch::{Command, ImageLoader, apply_command},
};

/// Where the encoded result goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    /// Standard output, always in [`RasterFormat::DEFAULT_OUTPUT`].
    Stdout,
    /// A file whose extension selects the format.
    File(PathBuf),
}

impl OutputTarget {
    /// Format the result will be encoded in.
    pub fn format(&self) -> PixmergeResult<RasterFormat> {
        match self {
            Self::Stdout => Ok(RasterFormat::DEFAULT_OUTPUT),
            Self::File(path) => RasterFormat::from_path(path),
        }
    }
}

/// One transform run: read `input`, apply `command`, write to `output`.
#[derive(Clone, Debug)]
pub struct Job {
    /// Base image path.
    pub input: PathBuf,
    /// Transformation to apply.
    pub command: Command,
    /// Destination of the encoded result.
    pub output: OutputTarget,
    /// Scheduling of the materializing sweep.
    pub threading: SweepThreading,
}

/// An encoded transform result.
#[derive(Clone, Debug)]
pub struct Rendered {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Encoding of `bytes`.
    pub format: RasterFormat,
    /// The encoded image.
    pub bytes: Vec<u8>,
}

/// Decode, transform and encode `job` without writing anything.
///
/// The output format is resolved first so a bad output extension fails before any
/// decoding work.
#[tracing::instrument(skip(job, loader), fields(input = %job.input.display(), command = %job.command))]
pub fn render_job<L: ImageLoader + ?Sized>(job: &Job, loader: &L) -> PixmergeResult<Rendered> {
    let format = job.output.format()?;
    let base = loader.load(&job.input)?;
    tracing::debug!(model = %base.color_model(), "base image");

    let result = apply_command(&job.command, base, loader)?;
    let bounds = result.bounds();
    let bytes = encode_to_vec(&*result, format, &job.threading)?;

    Ok(Rendered {
        width: bounds.width(),
        height: bounds.height(),
        format,
        bytes,
    })
}

/// Run `job` end to end, writing the result to its output target.
pub fn run_job<L: ImageLoader + ?Sized>(job: &Job, loader: &L) -> PixmergeResult<Rendered> {
    let rendered = render_job(job, loader)?;

    match &job.output {
        OutputTarget::Stdout => {
            let mut out = std::io::stdout().lock();
            out.write_all(&rendered.bytes)
                .and_then(|()| out.flush())
                .context("write result to stdout")?;
        }
        OutputTarget::File(path) => write_output_file(path, &rendered.bytes)?,
    }

    match job.command {
        Command::Scale { .. } => tracing::info!("successfully scaled image"),
        Command::Merge { .. } => tracing::info!("successfully merged two images"),
    }
    Ok(rendered)
}

fn write_output_file(path: &Path, bytes: &[u8]) -> PixmergeResult<()> {
    let path = expand_home(path);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    tracing::info!(path = %path.display(), "writing image");
    std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/pipeline/job.rs"]
mod tests;
