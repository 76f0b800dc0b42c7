//! # Error Types
//!
//! General error handling for the platform layer.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::text::growth::ConversionError;

/// Which half of the canonicalization pipeline failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionStage
{
    /// UTF-8 to UTF-16 decoding
    Decode,
    /// Compatibility-composed (NFKC) normalization
    Normalize,
}

impl std::fmt::Display for ConversionStage
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result
    {
        match self {
            ConversionStage::Decode => f.write_str("decode"),
            ConversionStage::Normalize => f.write_str("normalize"),
        }
    }
}

/// Main error type for platform-layer operations
///
/// Every variant except `EngineInitialization` is recoverable: the caller
/// may retry, skip, or abort just the affected operation.
///
/// ## Error Categories
///
/// 1. **Text errors**: TextConversion, EngineInitialization
/// 2. **Temp file errors**: TempFileCreation, Deletion
/// 3. **I/O errors**: Io
#[derive(Error, Debug)]
pub enum HostError
{
    /// Decoding or canonicalizing a string failed
    ///
    /// Raised by `TextNormalizer::canonicalize`. The input is left untouched and
    /// no partial output is produced.
    #[error("String conversion error during {stage}: {source}")]
    TextConversion
    {
        /// Pipeline stage that failed
        stage: ConversionStage,
        /// Underlying transform error
        source: ConversionError,
    },

    /// A conversion engine could not be constructed
    ///
    /// This means the text subsystem itself is broken. `canonicalize` escalates
    /// it to [`crate::fatal::die`]; only `try_canonicalize` ever returns it.
    #[error("Failed to initialize {engine}: {reason}")]
    EngineInitialization
    {
        /// Engine name ("decoder" or "normalizer")
        engine: &'static str,
        /// Why construction failed
        reason: String,
    },

    /// Exclusive creation of a temp file failed
    ///
    /// This happens when:
    /// - The temp directory is missing or not writable
    /// - Every randomized name collided with an existing file
    /// - The disk is full
    #[error("Failed to create temp file in {}: {source}", directory.display())]
    TempFileCreation
    {
        /// Directory the file was to be created in
        directory: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// Removing a temp file failed
    ///
    /// Typically logged and ignored by callers; the file may already be gone.
    #[error("Failed to delete {}: {source}", path.display())]
    Deletion
    {
        /// Path that could not be removed
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// I/O error (for file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl HostError
{
    /// Whether this error must terminate the process.
    ///
    /// Only the loss of the conversion engines is fatal.
    #[must_use]
    pub fn is_fatal(&self) -> bool
    {
        matches!(self, HostError::EngineInitialization { .. })
    }
}

/// Convenience type alias for `Result<T, HostError>`
///
/// ```rust
/// use hostkit_core::error::HostResult;
/// fn foo() -> HostResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type HostResult<T> = std::result::Result<T, HostError>;
