//! # Temporary Files
//!
//! Creation, naming, enumeration and cleanup of temp files.
//!
//! - [`directory`]: where temp files live (`TMPDIR`, `TEMP`, `TMP`, `/tmp/`)
//! - [`kind`]: the closed set of temp file kinds and their name parts
//! - [`factory`]: exclusive creation of uniquely named files
//! - [`registry`]: finding and deleting them again
//!
//! A file's lifetime on disk is independent of its handle: the factory hands
//! out a handle that only closes the descriptor when dropped, and files stay
//! until the registry deletes them.

pub mod directory;
pub mod factory;
pub mod kind;
pub mod registry;

pub use directory::{resolve_temp_directory, temp_directory, TempDirectory, FALLBACK_TEMP_DIR, TEMP_DIR_VARIABLES};
pub use factory::{TempFileFactory, TempFileHandle};
pub use kind::{TempFileKind, TEMP_PREFIX_ALL};
pub use registry::{PurgeReport, TempFileRegistry};
