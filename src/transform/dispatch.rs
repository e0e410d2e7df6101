use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    codec::decode::open_image,
    foundation::error::{PixmergeError, PixmergeResult},
    pixel::{decoded::DecodedImage, source::PixelSource},
    transform::{composite::CompositeView, scale::ScaleView},
};

/// A parsed transformation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Downscale by an integer factor (always >= 1).
    Scale {
        /// Sampling step.
        factor: u32,
    },
    /// Merge an overlay image onto the base.
    Merge {
        /// Overlay file, decoded through an [`ImageLoader`].
        overlay: PathBuf,
        /// Horizontal window inset.
        offset_x: i32,
        /// Vertical window inset.
        offset_y: i32,
    },
}

impl Command {
    /// Parse a single command token: `scale:<factor>` or
    /// `merge:<overlay path>[:<offset_x>][:<offset_y>]`.
    ///
    /// Mode names are case-insensitive. Up to two trailing all-digit segments of a merge
    /// token are read as offsets; everything before them is the overlay path.
    pub fn parse(token: &str) -> PixmergeResult<Self> {
        if let Some(rest) = strip_prefix_ci(token, "scale:") {
            return Ok(Self::Scale {
                factor: parse_scale_factor(rest)?,
            });
        }
        if let Some(rest) = strip_prefix_ci(token, "merge:") {
            return parse_merge_token(rest);
        }
        Err(PixmergeError::invalid_command(format!(
            "unrecognized command '{token}' (expected 'scale:<factor>' or 'merge:<path>[:<x>][:<y>]')"
        )))
    }

    /// Parse the two-token form: `scale <factor>` or `merge[:<offset_x>[:<offset_y>]] <path>`.
    pub fn parse_legacy(mode: &str, arg: &str) -> PixmergeResult<Self> {
        if mode.eq_ignore_ascii_case("scale") {
            return Ok(Self::Scale {
                factor: parse_scale_factor(arg)?,
            });
        }
        if !is_legacy_merge(mode) {
            return Err(PixmergeError::invalid_command(format!(
                "unrecognized command '{mode}' (expected 'scale' or 'merge[:<x>:<y>]')"
            )));
        }
        if arg.is_empty() {
            return Err(PixmergeError::invalid_command(
                "merge requires an overlay path",
            ));
        }

        let mut offsets = mode[MERGE.len()..].split(':').skip(1);
        let offset_x = parse_offset(offsets.next().unwrap_or(""))?;
        let offset_y = parse_offset(offsets.next().unwrap_or(""))?;
        Ok(Self::Merge {
            overlay: PathBuf::from(arg),
            offset_x,
            offset_y,
        })
    }

    /// `true` when `token` is a mode of the two-token form and needs a separate argument.
    pub fn is_legacy_mode(token: &str) -> bool {
        token.eq_ignore_ascii_case("scale") || is_legacy_merge(token)
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scale { .. } => "scale",
            Self::Merge { .. } => "merge",
        }
    }
}

impl FromStr for Command {
    type Err = PixmergeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scale { factor } => write!(f, "scale:{factor}"),
            Self::Merge {
                overlay,
                offset_x,
                offset_y,
            } => write!(f, "merge:{}:{offset_x}:{offset_y}", overlay.display()),
        }
    }
}

/// Source of decoded images for the dispatcher.
pub trait ImageLoader {
    /// Decode the image at `path`.
    fn load(&self, path: &Path) -> PixmergeResult<DecodedImage>;
}

/// Loads images from the filesystem, picking the decoder from the file extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsLoader;

impl ImageLoader for FsLoader {
    fn load(&self, path: &Path) -> PixmergeResult<DecodedImage> {
        open_image(path)
    }
}

/// Build the lazy result of `command` applied to `base`.
///
/// `Merge` loads its overlay through `loader`; nothing is sampled until the returned source
/// is swept.
#[tracing::instrument(skip(base, loader), fields(command = command.name()))]
pub fn apply_command<L: ImageLoader + ?Sized>(
    command: &Command,
    base: DecodedImage,
    loader: &L,
) -> PixmergeResult<Box<dyn PixelSource>> {
    match command {
        Command::Scale { factor } => {
            if *factor == 0 {
                return Err(PixmergeError::invalid_scale_factor(
                    "scale factor must be at least 1",
                ));
            }
            tracing::info!(factor, "scaling image");
            Ok(Box::new(ScaleView::new(base, *factor)))
        }
        Command::Merge {
            overlay,
            offset_x,
            offset_y,
        } => {
            tracing::info!(path = %overlay.display(), "merging image");
            let top = loader.load(overlay)?;
            let view = CompositeView::new(base, top, *offset_x, *offset_y);
            tracing::debug!(window = ?view.visibility_window(), "overlay visibility");
            Ok(Box::new(view))
        }
    }
}

const MERGE: &str = "merge";

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &s[prefix.len()..])
}

fn is_legacy_merge(token: &str) -> bool {
    let Some(rest) = strip_prefix_ci(token, MERGE) else {
        return false;
    };
    if rest.is_empty() {
        return true;
    }
    rest.strip_prefix(':').is_some_and(|segments| {
        segments.split(':').count() <= 2 && segments.split(':').all(is_offset_segment)
    })
}

fn is_offset_segment(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_merge_token(rest: &str) -> PixmergeResult<Command> {
    let mut parts: Vec<&str> = rest.split(':').collect();
    let mut offsets = Vec::with_capacity(2);
    while offsets.len() < 2
        && parts.len() > 1
        && parts.last().is_some_and(|s| is_offset_segment(s))
    {
        offsets.extend(parts.pop());
    }
    offsets.reverse();

    let overlay = parts.join(":");
    if overlay.is_empty() {
        return Err(PixmergeError::invalid_command(
            "merge requires an overlay path",
        ));
    }

    let offset_x = parse_offset(offsets.first().copied().unwrap_or(""))?;
    let offset_y = parse_offset(offsets.get(1).copied().unwrap_or(""))?;
    Ok(Command::Merge {
        overlay: PathBuf::from(overlay),
        offset_x,
        offset_y,
    })
}

/// Parse a scale factor: a positive decimal integer.
pub fn parse_scale_factor(s: &str) -> PixmergeResult<u32> {
    let factor: u32 = s.parse().map_err(|e| {
        PixmergeError::invalid_scale_factor(format!("'{s}' is not a positive integer: {e}"))
    })?;
    if factor == 0 || i32::try_from(factor).is_err() {
        return Err(PixmergeError::invalid_scale_factor(format!(
            "'{s}' is out of range (expected 1..={})",
            i32::MAX
        )));
    }
    Ok(factor)
}

// Empty segments mean 0.
fn parse_offset(s: &str) -> PixmergeResult<i32> {
    if s.is_empty() {
        return Ok(0);
    }
    if !is_offset_segment(s) {
        return Err(PixmergeError::invalid_command(format!(
            "merge offset '{s}' is not a non-negative integer"
        )));
    }
    s.parse().map_err(|e| {
        PixmergeError::invalid_command(format!("merge offset '{s}' is out of range: {e}"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/transform/dispatch.rs"]
mod tests;
