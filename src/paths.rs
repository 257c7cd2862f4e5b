// src/paths.rs

use anyhow::{Context, Result};
use std::{
    env,
    path::{Path, PathBuf},
};

/// Directory every relative output path hangs off: the working directory.
pub fn project_root() -> Result<PathBuf> {
    env::current_dir().context("reading current directory")
}

/// Resolve `path` against [`project_root`]. Absolute paths pass through.
pub fn resolve(path: impl AsRef<Path>) -> Result<PathBuf> {
    Ok(project_root()?.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_land_under_cwd() {
        let resolved = resolve("csv_data").unwrap();
        assert!(resolved.is_absolute());
        assert_eq!(resolved, env::current_dir().unwrap().join("csv_data"));
    }

    #[test]
    fn absolute_paths_are_kept() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(resolve(tmp.path()).unwrap(), tmp.path());
    }
}
