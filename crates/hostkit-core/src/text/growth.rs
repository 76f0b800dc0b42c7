//! # Buffer-Growth Conversion
//!
//! Runs a [`Transform`] that writes into a caller-sized buffer. When the
//! buffer is too small the transform reports how much it needs; the buffer is
//! grown to that size plus one unit of slack and the transform is run again.
//!
//! The caller only ever sees a fully written, exactly sized buffer or an error.
//!
//! ## Example
//!
//! ```rust
//! use hostkit_core::text::growth::{convert_with_growth, Transform, TransformStatus};
//!
//! struct Upper;
//!
//! impl Transform<u8, u8> for Upper
//! {
//!     fn apply(&mut self, input: &[u8], output: &mut [u8]) -> TransformStatus
//!     {
//!         if output.len() < input.len() {
//!             return TransformStatus::Overflow { required: input.len() };
//!         }
//!         for (dst, src) in output.iter_mut().zip(input) {
//!             *dst = src.to_ascii_uppercase();
//!         }
//!         TransformStatus::Written(input.len())
//!     }
//! }
//!
//! let out = convert_with_growth(&mut Upper, b"abc", 0, 4)?;
//! assert_eq!(out, b"ABC");
//! # Ok::<(), hostkit_core::text::growth::ConversionError>(())
//! ```

use thiserror::Error;

/// Default cap on how many times a transform is invoked for one conversion.
///
/// Well-behaved transforms finish in two attempts (guess, then exact size).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

/// Outcome of a single transform invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformStatus
{
    /// Output fits; this many units were written at the front of the buffer.
    Written(usize),
    /// Output does not fit; the transform needs `required` units.
    Overflow
    {
        /// Exact number of output units the transform needs
        required: usize,
    },
    /// The transform failed for a reason unrelated to buffer size.
    Failed(String),
}

/// An external conversion routine writing into a caller-provided buffer.
pub trait Transform<In, Out>
{
    /// Convert `input` into `output`.
    ///
    /// Must not report `Written(n)` with `n > output.len()`.
    fn apply(&mut self, input: &[In], output: &mut [Out]) -> TransformStatus;
}

impl<In, Out, F> Transform<In, Out> for F
where
    F: FnMut(&[In], &mut [Out]) -> TransformStatus,
{
    fn apply(&mut self, input: &[In], output: &mut [Out]) -> TransformStatus
    {
        self(input, output)
    }
}

/// Buffer-growth conversion failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError
{
    /// The transform reported a failure other than insufficient space.
    #[error("transform failed: {0}")]
    Transform(String),

    /// The transform kept asking for more space and never converged.
    #[error("transform did not converge after {attempts} attempts")]
    RetryLimit
    {
        /// Number of invocations made before giving up
        attempts: u32,
    },

    /// The transform claimed to write more units than the buffer holds, or
    /// requested a buffer too large to allocate.
    #[error("transform reported {reported} units written into a buffer of {capacity}")]
    Misreported
    {
        /// Units the transform claimed to write
        reported: usize,
        /// Actual buffer length
        capacity: usize,
    },
}

/// Run `transform` over `input`, growing the output buffer until it fits.
///
/// ## Parameters
///
/// - `initial_len`: first buffer size to try (usually the input length)
/// - `max_attempts`: hard cap on transform invocations; `0` is treated as `1`
///
/// ## Errors
///
/// - `Transform`: the transform reported a non-overflow failure
/// - `RetryLimit`: `max_attempts` invocations all overflowed
/// - `Misreported`: the transform claimed more output than the buffer holds, or
///   asked for a buffer that cannot be allocated
pub fn convert_with_growth<In, Out, T>(
    transform: &mut T,
    input: &[In],
    initial_len: usize,
    max_attempts: u32,
) -> Result<Vec<Out>, ConversionError>
where
    Out: Copy + Default,
    T: Transform<In, Out> + ?Sized,
{
    let max_attempts = max_attempts.max(1);
    let mut buffer = vec![Out::default(); initial_len];

    for _ in 0..max_attempts {
        match transform.apply(input, &mut buffer) {
            TransformStatus::Written(len) => {
                if len > buffer.len() {
                    return Err(ConversionError::Misreported {
                        reported: len,
                        capacity: buffer.len(),
                    });
                }
                buffer.truncate(len);
                return Ok(buffer);
            }
            TransformStatus::Overflow { required } => {
                let capacity = buffer.len();
                let wanted = required.saturating_add(1);
                buffer.clear();
                buffer.try_reserve_exact(wanted).map_err(|_| ConversionError::Misreported {
                    reported: required,
                    capacity,
                })?;
                buffer.resize(wanted, Out::default());
            }
            TransformStatus::Failed(diagnostic) => return Err(ConversionError::Transform(diagnostic)),
        }
    }

    Err(ConversionError::RetryLimit { attempts: max_attempts })
}

#[cfg(test)]
mod tests
{
    use super::*;

    /// Copies input, overflowing until the buffer has `input.len()` slots.
    struct CountingCopy
    {
        calls: u32,
    }

    impl Transform<u16, u16> for CountingCopy
    {
        fn apply(&mut self, input: &[u16], output: &mut [u16]) -> TransformStatus
        {
            self.calls += 1;
            if output.len() < input.len() {
                return TransformStatus::Overflow { required: input.len() };
            }
            output[..input.len()].copy_from_slice(input);
            TransformStatus::Written(input.len())
        }
    }

    #[test]
    fn test_fits_first_time()
    {
        let mut copy = CountingCopy { calls: 0 };
        let out = convert_with_growth(&mut copy, &[1u16, 2, 3], 3, DEFAULT_MAX_ATTEMPTS).unwrap();
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(copy.calls, 1);
    }

    #[test]
    fn test_overflow_then_success_takes_two_attempts()
    {
        let mut calls = 0u32;
        let mut transform = |_: &[u8], output: &mut [u8]| {
            calls += 1;
            if calls == 1 {
                return TransformStatus::Overflow { required: 5 };
            }
            assert_eq!(output.len(), 6, "buffer should be required + 1");
            output[..5].copy_from_slice(b"hello");
            TransformStatus::Written(5)
        };

        let out = convert_with_growth(&mut transform, b"x", 1, DEFAULT_MAX_ATTEMPTS).unwrap();
        assert_eq!(out, b"hello");
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_output_is_truncated_to_reported_length()
    {
        let mut transform = |_: &[u8], output: &mut [u8]| {
            output.fill(b'z');
            TransformStatus::Written(2)
        };
        let out = convert_with_growth(&mut transform, b"abcdef", 6, DEFAULT_MAX_ATTEMPTS).unwrap();
        assert_eq!(out, b"zz");
    }

    #[test]
    fn test_iterative_size_reporting_is_tolerated()
    {
        // Asks for one more unit each time until it has eight
        let mut transform = |_: &[u8], output: &mut [u8]| {
            if output.len() < 8 {
                TransformStatus::Overflow { required: output.len() + 1 }
            } else {
                TransformStatus::Written(8)
            }
        };
        let out = convert_with_growth(&mut transform, b"", 0, DEFAULT_MAX_ATTEMPTS).unwrap();
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_failure_carries_diagnostic()
    {
        let mut transform = |_: &[u8], _: &mut [u8]| TransformStatus::Failed("U_INVALID_CHAR_FOUND".to_string());
        let err = convert_with_growth(&mut transform, b"abc", 3, DEFAULT_MAX_ATTEMPTS).unwrap_err();
        assert_eq!(err, ConversionError::Transform("U_INVALID_CHAR_FOUND".to_string()));
    }

    #[test]
    fn test_never_converging_transform_hits_retry_limit()
    {
        let mut transform = |_: &[u8], output: &mut [u8]| TransformStatus::Overflow {
            required: output.len() + 10,
        };
        let err = convert_with_growth(&mut transform, b"abc", 3, 4).unwrap_err();
        assert_eq!(err, ConversionError::RetryLimit { attempts: 4 });
    }

    #[test]
    fn test_misreported_length_is_rejected()
    {
        let mut transform = |_: &[u8], output: &mut [u8]| TransformStatus::Written(output.len() + 1);
        let err = convert_with_growth(&mut transform, b"abc", 3, DEFAULT_MAX_ATTEMPTS).unwrap_err();
        assert!(matches!(err, ConversionError::Misreported { reported: 4, capacity: 3 }));
    }

    #[test]
    fn test_unallocatable_request_is_an_error()
    {
        let mut transform = |_: &[u8], _: &mut [u8]| TransformStatus::Overflow { required: usize::MAX };
        let err = convert_with_growth(&mut transform, b"abc", 3, DEFAULT_MAX_ATTEMPTS).unwrap_err();
        assert_eq!(
            err,
            ConversionError::Misreported {
                reported: usize::MAX,
                capacity: 3
            }
        );
    }

    #[test]
    fn test_zero_attempts_still_runs_once()
    {
        let mut copy = CountingCopy { calls: 0 };
        let out = convert_with_growth(&mut copy, &[7u16], 1, 0).unwrap();
        assert_eq!(out, vec![7]);
        assert_eq!(copy.calls, 1);
    }
}
