//! # Conversion Engines
//!
//! The two transforms behind canonicalization:
//!
//! - [`Utf8Decoder`]: UTF-8 bytes to UTF-16 code units
//! - [`NormalizationEngine`]: UTF-16 to its compatibility-composed (NFKC) form,
//!   backed by the `unicode-normalization` tables
//!
//! Both are opened once by the `TextNormalizer` and then used read-only, which
//! is why [`Transform`] is implemented for shared references.
//!
//! Opening an engine runs a small self-check against known input. A failed
//! self-check means the text tables are unusable and is reported as
//! `EngineInitialization`.

use std::char::decode_utf16;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use super::growth::{Transform, TransformStatus};
use crate::error::{HostError, HostResult};

/// Canonical form applied after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanonicalForm
{
    /// Compatibility decomposition followed by canonical composition
    #[default]
    Nfkc,
    /// Decode only, leave the code points as they are
    Passthrough,
}

impl std::str::FromStr for CanonicalForm
{
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.to_lowercase().as_str() {
            "nfkc" => Ok(CanonicalForm::Nfkc),
            "none" | "passthrough" => Ok(CanonicalForm::Passthrough),
            _ => Err(format!("Unknown canonical form: {s}. Use 'nfkc' or 'passthrough'")),
        }
    }
}

/// Decodes UTF-8 bytes into UTF-16 code units.
#[derive(Debug)]
pub struct Utf8Decoder
{
    _private: (),
}

impl Utf8Decoder
{
    /// Open the decoder and verify it round-trips a multi-byte sample.
    ///
    /// ## Errors
    ///
    /// - `EngineInitialization`: the self-check produced unexpected output
    pub fn open() -> HostResult<Self>
    {
        let decoder = Self { _private: () };
        let sample = "Ωé😀";
        let expected: Vec<u16> = sample.encode_utf16().collect();
        let mut units = vec![0u16; expected.len()];

        match (&decoder).apply(sample.as_bytes(), &mut units) {
            TransformStatus::Written(n) if units[..n] == expected[..] => {
                debug!("Opened UTF-8 decoder");
                Ok(decoder)
            }
            other => Err(HostError::EngineInitialization {
                engine: "decoder",
                reason: format!("self-check failed: {other:?}"),
            }),
        }
    }
}

impl Transform<u8, u16> for &Utf8Decoder
{
    fn apply(&mut self, input: &[u8], output: &mut [u16]) -> TransformStatus
    {
        let text = match std::str::from_utf8(input) {
            Ok(text) => text,
            Err(err) => {
                return TransformStatus::Failed(format!("invalid UTF-8 sequence at byte {}", err.valid_up_to()));
            }
        };

        let required = text.encode_utf16().count();
        if required > output.len() {
            return TransformStatus::Overflow { required };
        }

        for (slot, unit) in output.iter_mut().zip(text.encode_utf16()) {
            *slot = unit;
        }
        TransformStatus::Written(required)
    }
}

/// Rewrites UTF-16 text into its canonical form.
#[derive(Debug)]
pub struct NormalizationEngine
{
    form: CanonicalForm,
}

impl NormalizationEngine
{
    /// Open an engine for `form`.
    ///
    /// For NFKC the engine checks that a compatibility ligature (U+FB01) and a
    /// decomposed accent both normalize as expected.
    ///
    /// ## Errors
    ///
    /// - `EngineInitialization`: the normalization tables gave unexpected output
    pub fn open(form: CanonicalForm) -> HostResult<Self>
    {
        let engine = Self { form };
        if form == CanonicalForm::Nfkc {
            let sample: Vec<u16> = "\u{FB01}e\u{301}".encode_utf16().collect();
            let expected: Vec<u16> = "fi\u{E9}".encode_utf16().collect();
            let mut units = vec![0u16; sample.len()];

            match (&engine).apply(&sample, &mut units) {
                TransformStatus::Written(n) if units[..n] == expected[..] => {}
                other => {
                    return Err(HostError::EngineInitialization {
                        engine: "normalizer",
                        reason: format!("NFKC self-check failed: {other:?}"),
                    });
                }
            }
        }
        debug!(form = ?form, "Opened normalization engine");
        Ok(engine)
    }

    /// The canonical form this engine produces.
    #[must_use]
    pub fn form(&self) -> CanonicalForm
    {
        self.form
    }
}

impl Transform<u16, u16> for &NormalizationEngine
{
    fn apply(&mut self, input: &[u16], output: &mut [u16]) -> TransformStatus
    {
        let mut decoded = String::with_capacity(input.len());
        for unit in decode_utf16(input.iter().copied()) {
            match unit {
                Ok(ch) => decoded.push(ch),
                Err(err) => {
                    return TransformStatus::Failed(format!(
                        "unpaired surrogate 0x{:04x}",
                        err.unpaired_surrogate()
                    ));
                }
            }
        }

        let normalized: String = match self.form {
            CanonicalForm::Nfkc => decoded.nfkc().collect(),
            CanonicalForm::Passthrough => decoded,
        };

        let required = normalized.encode_utf16().count();
        if required > output.len() {
            return TransformStatus::Overflow { required };
        }

        for (slot, unit) in output.iter_mut().zip(normalized.encode_utf16()) {
            *slot = unit;
        }
        TransformStatus::Written(required)
    }
}
