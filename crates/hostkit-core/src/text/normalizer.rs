//! # Text Normalizer
//!
//! Turns user-supplied text into the canonical form used for path components:
//! decode UTF-8 to UTF-16, normalize (NFKC by default), then widen to the
//! platform's wide-character units.
//!
//! ## Example
//!
//! ```rust
//! use hostkit_core::text::TextNormalizer;
//!
//! let normalizer = TextNormalizer::new();
//! let canonical = normalizer.canonicalize("\u{FB01}le")?;
//! assert_eq!(canonical.as_str(), "file");
//! # Ok::<(), hostkit_core::error::HostError>(())
//! ```

use std::fmt;

use once_cell::sync::OnceCell;

use super::engines::{CanonicalForm, NormalizationEngine, Utf8Decoder};
use super::growth::{convert_with_growth, DEFAULT_MAX_ATTEMPTS};
use crate::config::HostConfig;
use crate::error::{ConversionStage, HostError, HostResult};
use crate::fatal;

/// Native wide-character unit (`wchar_t` width).
#[cfg(windows)]
pub type WideChar = u16;

/// Native wide-character unit (`wchar_t` width).
#[cfg(not(windows))]
pub type WideChar = u32;

/// Text after decode and canonicalization. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPathText
{
    text: String,
    wide: Box<[WideChar]>,
}

impl CanonicalPathText
{
    fn from_utf16(units: &[u16]) -> HostResult<Self>
    {
        let text = String::from_utf16(units).map_err(|err| HostError::TextConversion {
            stage: ConversionStage::Normalize,
            source: super::growth::ConversionError::Transform(err.to_string()),
        })?;

        #[cfg(windows)]
        let wide: Box<[WideChar]> = units.into();
        #[cfg(not(windows))]
        let wide: Box<[WideChar]> = text.chars().map(u32::from).collect();

        Ok(Self { text, wide })
    }

    /// The canonical text as UTF-8.
    #[must_use]
    pub fn as_str(&self) -> &str
    {
        &self.text
    }

    /// The canonical text in native wide-character units.
    #[must_use]
    pub fn as_wide(&self) -> &[WideChar]
    {
        &self.wide
    }

    /// Number of wide-character units.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.wide.len()
    }

    /// Whether the canonical text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.wide.is_empty()
    }

    /// Consume into the UTF-8 string.
    #[must_use]
    pub fn into_string(self) -> String
    {
        self.text
    }
}

impl fmt::Display for CanonicalPathText
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CanonicalPathText
{
    fn as_ref(&self) -> &str
    {
        &self.text
    }
}

/// Both engines, opened together on first use.
#[derive(Debug)]
pub(crate) struct Engines
{
    decoder: Utf8Decoder,
    normalizer: NormalizationEngine,
}

impl Engines
{
    fn open(form: CanonicalForm) -> HostResult<Self>
    {
        Ok(Self {
            decoder: Utf8Decoder::open()?,
            normalizer: NormalizationEngine::open(form)?,
        })
    }
}

type EngineOpener = fn(CanonicalForm) -> HostResult<Engines>;

/// Canonicalizes text for use as a filesystem path component.
///
/// The conversion engines are opened lazily on the first call and kept for the
/// lifetime of the normalizer. Initialization goes through a `OnceCell`, so
/// concurrent first calls open the engines exactly once; afterwards the
/// engines are only read. Dropping the normalizer releases them.
#[derive(Debug)]
pub struct TextNormalizer
{
    form: CanonicalForm,
    max_attempts: u32,
    open_engines: EngineOpener,
    engines: OnceCell<Engines>,
}

impl Default for TextNormalizer
{
    fn default() -> Self
    {
        Self::new()
    }
}

impl TextNormalizer
{
    /// Create an NFKC normalizer with the default retry cap.
    #[must_use]
    pub fn new() -> Self
    {
        Self::with_form(CanonicalForm::Nfkc)
    }

    /// Create a normalizer producing `form`.
    #[must_use]
    pub fn with_form(form: CanonicalForm) -> Self
    {
        Self::with_opener(form, DEFAULT_MAX_ATTEMPTS, Engines::open)
    }

    /// Create a normalizer from the configured form and retry cap.
    #[must_use]
    pub fn from_config(config: &HostConfig) -> Self
    {
        Self::with_opener(config.canonical_form, config.max_conversion_attempts, Engines::open)
    }

    pub(crate) fn with_opener(form: CanonicalForm, max_attempts: u32, open_engines: EngineOpener) -> Self
    {
        Self {
            form,
            max_attempts,
            open_engines,
            engines: OnceCell::new(),
        }
    }

    /// The canonical form this normalizer produces.
    #[must_use]
    pub fn form(&self) -> CanonicalForm
    {
        self.form
    }

    /// Whether the engines have been opened yet.
    #[must_use]
    pub fn is_initialized(&self) -> bool
    {
        self.engines.get().is_some()
    }

    /// Canonicalize `text`.
    ///
    /// If the conversion engines cannot be opened the process is terminated
    /// through [`fatal::die`]: no text operation can succeed without them.
    ///
    /// ## Errors
    ///
    /// - `TextConversion`: decoding or normalization failed
    pub fn canonicalize(&self, text: &str) -> HostResult<CanonicalPathText>
    {
        self.canonicalize_bytes(text.as_bytes())
    }

    /// Canonicalize raw bytes expected to hold UTF-8.
    ///
    /// ## Errors
    ///
    /// - `TextConversion`: the bytes are not UTF-8, or normalization failed
    pub fn canonicalize_bytes(&self, bytes: &[u8]) -> HostResult<CanonicalPathText>
    {
        match self.try_canonicalize_bytes(bytes) {
            Err(err) if err.is_fatal() => fatal::die(&err.to_string()),
            other => other,
        }
    }

    /// Canonicalize `text`, returning engine failures instead of exiting.
    ///
    /// ## Errors
    ///
    /// - `EngineInitialization`: an engine could not be opened
    /// - `TextConversion`: decoding or normalization failed
    pub fn try_canonicalize(&self, text: &str) -> HostResult<CanonicalPathText>
    {
        self.try_canonicalize_bytes(text.as_bytes())
    }

    fn try_canonicalize_bytes(&self, bytes: &[u8]) -> HostResult<CanonicalPathText>
    {
        let engines = self.engines.get_or_try_init(|| (self.open_engines)(self.form))?;

        let mut decoder = &engines.decoder;
        let utf16: Vec<u16> = convert_with_growth(&mut decoder, bytes, bytes.len(), self.max_attempts)
            .map_err(|source| HostError::TextConversion {
                stage: ConversionStage::Decode,
                source,
            })?;

        let mut normalizer = &engines.normalizer;
        let canonical: Vec<u16> = convert_with_growth(&mut normalizer, &utf16, utf16.len(), self.max_attempts)
            .map_err(|source| HostError::TextConversion {
                stage: ConversionStage::Normalize,
                source,
            })?;

        CanonicalPathText::from_utf16(&canonical)
    }
}

#[cfg(test)]
mod tests
{
    use std::env;
    use std::process::Command;

    use super::*;
    use crate::fatal::FATAL_EXIT_STATUS;

    const FATAL_CHILD_VAR: &str = "HOSTKIT_NORMALIZER_FATAL_CHILD";

    fn broken_engines(_: CanonicalForm) -> HostResult<Engines>
    {
        Err(HostError::EngineInitialization {
            engine: "normalizer",
            reason: "tables missing".to_string(),
        })
    }

    #[test]
    fn test_engine_failure_is_returned_and_fatal()
    {
        let normalizer = TextNormalizer::with_opener(CanonicalForm::Nfkc, DEFAULT_MAX_ATTEMPTS, broken_engines);
        let err = normalizer.try_canonicalize("a").unwrap_err();
        assert!(matches!(err, HostError::EngineInitialization { engine: "normalizer", .. }));
        assert!(err.is_fatal());
        assert!(!normalizer.is_initialized());
    }

    #[test]
    fn test_failed_open_is_retried_on_next_call()
    {
        fn fail_once(form: CanonicalForm) -> HostResult<Engines>
        {
            use std::sync::atomic::{AtomicBool, Ordering};
            static FAILED: AtomicBool = AtomicBool::new(false);
            if FAILED.swap(true, Ordering::SeqCst) {
                Engines::open(form)
            } else {
                broken_engines(form)
            }
        }

        let normalizer = TextNormalizer::with_opener(CanonicalForm::Nfkc, DEFAULT_MAX_ATTEMPTS, fail_once);
        assert!(normalizer.try_canonicalize("\u{FB01}").is_err());
        assert!(!normalizer.is_initialized());
        assert_eq!(normalizer.try_canonicalize("\u{FB01}").unwrap().as_str(), "fi");
        assert!(normalizer.is_initialized());
    }

    #[test]
    fn test_engine_failure_exits_with_fatal_status()
    {
        if env::var_os(FATAL_CHILD_VAR).is_some() {
            let normalizer = TextNormalizer::with_opener(CanonicalForm::Nfkc, DEFAULT_MAX_ATTEMPTS, broken_engines);
            let _ = normalizer.canonicalize("a");
            unreachable!("canonicalize must not return after an engine failure");
        }

        let output = Command::new(env::current_exe().unwrap())
            .args(["--exact", "text::normalizer::tests::test_engine_failure_exits_with_fatal_status"])
            .env(FATAL_CHILD_VAR, "1")
            .output()
            .unwrap();
        assert_eq!(output.status.code(), Some(FATAL_EXIT_STATUS));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Unexpected error: Failed to initialize normalizer"));
    }

    #[test]
    fn test_engines_open_lazily()
    {
        let normalizer = TextNormalizer::new();
        assert!(!normalizer.is_initialized());
        normalizer.canonicalize("a").unwrap();
        assert!(normalizer.is_initialized());
    }

    #[test]
    fn test_compatibility_characters_fold()
    {
        let normalizer = TextNormalizer::new();
        // Fullwidth letters, superscript two, and a ligature
        let canonical = normalizer.canonicalize("ＡＢＣ x\u{B2} \u{FB01}").unwrap();
        assert_eq!(canonical.as_str(), "ABC x2 fi");
    }

    #[test]
    fn test_decomposed_accent_composes()
    {
        let normalizer = TextNormalizer::new();
        let canonical = normalizer.canonicalize("Cafe\u{301}").unwrap();
        assert_eq!(canonical.as_str(), "Caf\u{E9}");
        assert_eq!(canonical.len(), 4);
    }

    #[test]
    fn test_wide_units_match_text()
    {
        let normalizer = TextNormalizer::new();
        let canonical = normalizer.canonicalize("é😀").unwrap();

        #[cfg(not(windows))]
        assert_eq!(canonical.as_wide(), &[0xE9, 0x1F600]);
        #[cfg(windows)]
        assert_eq!(canonical.as_wide(), &[0xE9, 0xD83D, 0xDE00]);
    }

    #[test]
    fn test_empty_input()
    {
        let normalizer = TextNormalizer::new();
        let canonical = normalizer.canonicalize("").unwrap();
        assert!(canonical.is_empty());
        assert_eq!(canonical.to_string(), "");
    }

    #[test]
    fn test_invalid_utf8_is_recoverable()
    {
        let normalizer = TextNormalizer::new();
        let err = normalizer.canonicalize_bytes(&[0x66, 0x80]).unwrap_err();
        assert!(matches!(
            err,
            HostError::TextConversion {
                stage: ConversionStage::Decode,
                ..
            }
        ));
        assert!(!err.is_fatal());
        // The normalizer remains usable
        assert_eq!(normalizer.canonicalize("ok").unwrap().as_str(), "ok");
    }

    #[test]
    fn test_passthrough_form_skips_normalization()
    {
        let normalizer = TextNormalizer::with_form(CanonicalForm::Passthrough);
        let canonical = normalizer.canonicalize("\u{FB01}").unwrap();
        assert_eq!(canonical.as_str(), "\u{FB01}");
    }
}
