//! # Text Canonicalization
//!
//! Normalization of user-supplied text into a canonical form suitable for a
//! filesystem path component.
//!
//! - [`growth`]: the buffer-growth retry loop shared by every conversion
//! - [`engines`]: the UTF-8 decoder and the normalization engine
//! - [`normalizer`]: the `TextNormalizer` that chains them

pub mod engines;
pub mod growth;
pub mod normalizer;

pub use engines::CanonicalForm;
pub use growth::{convert_with_growth, ConversionError, Transform, TransformStatus};
pub use normalizer::{CanonicalPathText, TextNormalizer, WideChar};
