//! Non-overwriting output names: `stem.ext`, then `stem_1.ext`, `stem_2.ext`, ...

use std::path::{Path, PathBuf};

/// First path under `dir` for `stem` that does not exist yet.
pub fn next_available_path(dir: impl AsRef<Path>, stem: &str, extension: &str) -> PathBuf {
    let dir = dir.as_ref();
    let candidate = dir.join(format!("{stem}.{extension}"));
    if !candidate.exists() {
        return candidate;
    }

    let mut n: u32 = 1;
    loop {
        let candidate = dir.join(format!("{stem}_{n}.{extension}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}
