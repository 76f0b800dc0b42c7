//! # Temp File Factory
//!
//! Creates uniquely named temp files. A name is built from a template
//!
//! ```text
//! <dir>/<kind prefix>XXXXXX<kind suffix>
//! ```
//!
//! where `XXXXXX` becomes six random alphanumeric characters. The file is
//! created with `O_EXCL` semantics (via `tempfile::Builder`), so the name is
//! guaranteed not to have existed and two callers, in this process or another,
//! never get the same path.
//!
//! The returned [`TempFileHandle`] owns the descriptor only. Dropping it closes
//! the file but leaves it on disk; use the registry to delete it.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::directory::{with_trailing_separator, TempDirectory};
use super::kind::TempFileKind;
use crate::config::HostConfig;
use crate::error::{HostError, HostResult};

/// Number of random characters replacing the `XXXXXX` placeholder.
pub const RANDOM_CHARS: usize = 6;

/// Owned, writable stream bound to a temp file on disk.
#[derive(Debug)]
pub struct TempFileHandle
{
    file: File,
    path: PathBuf,
    kind: TempFileKind,
}

impl TempFileHandle
{
    /// Path of the file this handle writes to.
    #[must_use]
    pub fn path(&self) -> &Path
    {
        &self.path
    }

    /// Kind the file was created as.
    #[must_use]
    pub fn kind(&self) -> TempFileKind
    {
        self.kind
    }

    /// Flush and sync the file contents to disk.
    ///
    /// ## Errors
    ///
    /// Returns the underlying I/O error if flushing or syncing fails.
    pub fn sync(&mut self) -> io::Result<()>
    {
        self.file.flush()?;
        self.file.sync_all()
    }

    /// Give up the handle, keeping the open file.
    #[must_use]
    pub fn into_file(self) -> File
    {
        self.file
    }
}

impl Write for TempFileHandle
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize>
    {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()>
    {
        self.file.flush()
    }
}

/// Creates temp files of any [`TempFileKind`].
///
/// The factory holds no lock and no state besides where to create files;
/// uniqueness comes from exclusive creation alone, so one factory can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct TempFileFactory
{
    directory: TempDirectory,
}

impl TempFileFactory
{
    /// Factory resolving the directory from the environment on every call.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Factory creating files in `directory`.
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self
    {
        Self {
            directory: TempDirectory::Fixed(directory.into()),
        }
    }

    /// Factory honouring `temp_dir_override` from `config`.
    #[must_use]
    pub fn from_config(config: &HostConfig) -> Self
    {
        match &config.temp_dir_override {
            Some(dir) => Self::in_directory(dir.clone()),
            None => Self::new(),
        }
    }

    /// Directory the next file will be created in.
    #[must_use]
    pub fn directory(&self) -> PathBuf
    {
        self.directory.resolve()
    }

    /// File name template for `kind`, e.g. `/tmp/hostkit-tmp-cache-XXXXXX.bin`.
    #[must_use]
    pub fn template(&self, kind: TempFileKind) -> String
    {
        format!(
            "{}{}{}{}",
            with_trailing_separator(&self.directory()),
            kind.prefix(),
            "X".repeat(RANDOM_CHARS),
            kind.suffix()
        )
    }

    /// Create a new temp file of `kind`, open for writing.
    ///
    /// ## Returns
    ///
    /// The owned handle and the final path. The file is not removed when the
    /// handle is dropped.
    ///
    /// ## Errors
    ///
    /// - `TempFileCreation`: the directory is unwritable, the disk is full, or
    ///   every random name collided
    pub fn create(&self, kind: TempFileKind) -> HostResult<(TempFileHandle, PathBuf)>
    {
        let directory = self.directory();
        let creation_error = |source: io::Error| {
            warn!("Could not create {kind} temp file in {}: {source}", directory.display());
            HostError::TempFileCreation {
                directory: directory.clone(),
                source,
            }
        };

        let named = tempfile::Builder::new()
            .prefix(kind.prefix())
            .suffix(kind.suffix())
            .rand_bytes(RANDOM_CHARS)
            .tempfile_in(&directory)
            .map_err(creation_error)?;

        let (file, path) = named.keep().map_err(|err| creation_error(err.error))?;
        debug!(kind = %kind, path = %path.display(), "Created temp file");

        Ok((
            TempFileHandle {
                file,
                path: path.clone(),
                kind,
            },
            path,
        ))
    }
}
