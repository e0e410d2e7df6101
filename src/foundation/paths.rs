use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// Replace every `~` in `path` with the current user's home directory.
///
/// The home directory comes from `HOME`, falling back to `USERPROFILE`. Paths that are not
/// valid UTF-8, or that contain no `~`, are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
    expand_home_with(path, home.as_deref())
}

pub(crate) fn expand_home_with(path: &Path, home: Option<&OsStr>) -> PathBuf {
    let (Some(raw), Some(home)) = (path.to_str(), home.and_then(OsStr::to_str)) else {
        return path.to_path_buf();
    };
    if !raw.contains('~') {
        return path.to_path_buf();
    }
    PathBuf::from(raw.replace('~', home))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/paths.rs"]
mod tests;
