//! # Temp Directory Resolution
//!
//! Picks the directory temp files are written to. The candidates are checked
//! in order and the first one that exists and is a directory wins:
//!
//! 1. `TMPDIR`
//! 2. `TEMP`
//! 3. `TMP`
//! 4. `/tmp/` (fixed fallback, not checked)
//!
//! Nothing is cached: each call reads the environment again.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// Environment variables consulted, in priority order.
pub const TEMP_DIR_VARIABLES: [&str; 3] = ["TMPDIR", "TEMP", "TMP"];

/// Directory used when no variable names a usable directory.
pub const FALLBACK_TEMP_DIR: &str = "/tmp/";

/// Resolve the temp directory from the process environment.
#[must_use]
pub fn temp_directory() -> PathBuf
{
    resolve_temp_directory(|name| env::var_os(name))
}

/// Resolve the temp directory, reading variables through `lookup`.
///
/// ```rust
/// use hostkit_core::temp::{resolve_temp_directory, FALLBACK_TEMP_DIR};
/// use std::path::PathBuf;
///
/// let dir = resolve_temp_directory(|_| None);
/// assert_eq!(dir, PathBuf::from(FALLBACK_TEMP_DIR));
/// ```
pub fn resolve_temp_directory<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<OsString>,
{
    TEMP_DIR_VARIABLES
        .iter()
        .filter_map(|name| lookup(*name))
        .map(PathBuf::from)
        .find(|candidate| is_directory(candidate))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_TEMP_DIR))
}

fn is_directory(path: &Path) -> bool
{
    fs::metadata(path).map(|meta| meta.is_dir()).unwrap_or(false)
}

/// Render `dir` as a string that ends with the path separator.
pub(crate) fn with_trailing_separator(dir: &Path) -> String
{
    let mut rendered = dir.display().to_string();
    if !rendered.ends_with(MAIN_SEPARATOR) && !rendered.ends_with('/') {
        rendered.push(MAIN_SEPARATOR);
    }
    rendered
}

/// Where the factory and registry look for temp files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TempDirectory
{
    /// Resolve from `TMPDIR`/`TEMP`/`TMP` on every use
    #[default]
    FromEnvironment,
    /// Always use this directory
    Fixed(PathBuf),
}

impl TempDirectory
{
    /// The directory to use right now.
    #[must_use]
    pub fn resolve(&self) -> PathBuf
    {
        match self {
            TempDirectory::FromEnvironment => temp_directory(),
            TempDirectory::Fixed(dir) => dir.clone(),
        }
    }
}
