//! Protocol-level errors for wire envelope processing
//!
//! One deliberately coarse error enum covers both codecs. Every variant is a
//! local, recoverable condition returned to the immediate caller; nothing
//! here is fatal to the process, and the codec never clamps or repairs a bad
//! value: it rejects and lets the transport/application layer decide
//! whether to drop the frame or the connection.

use thiserror::Error;

/// Codec errors with diagnostic context.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    /// A logical field value exceeds its bit-width domain at encode time.
    #[error("field `{field}` out of range: {value} exceeds maximum {max}")]
    FieldOutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },

    /// Input buffer is shorter than the minimum the operation requires.
    #[error("message too small: need {need} bytes, got {got} (context: {context})")]
    MessageTooSmall {
        need: usize,
        got: usize,
        context: &'static str,
    },

    /// Declared header lengths disagree with the supplied byte counts.
    #[error("length mismatch for {region}: declared {declared} bytes, got {actual}")]
    LengthMismatch {
        region: &'static str,
        declared: usize,
        actual: usize,
    },

    /// Request frame body exceeds the 16-bit length-prefix capacity.
    #[error("request body too large: {size} bytes exceeds maximum {max}")]
    BodyTooLarge { size: usize, max: usize },
}

impl CodecError {
    pub fn field_out_of_range(field: &'static str, value: u64, max: u64) -> Self {
        Self::FieldOutOfRange { field, value, max }
    }

    pub fn message_too_small(need: usize, got: usize, context: &'static str) -> Self {
        Self::MessageTooSmall { need, got, context }
    }

    pub fn length_mismatch(region: &'static str, declared: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            region,
            declared,
            actual,
        }
    }

    pub fn body_too_large(size: usize, max: usize) -> Self {
        Self::BodyTooLarge { size, max }
    }
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_carries_context() {
        let err = CodecError::field_out_of_range("payload_length", 16384, 16383);
        let text = err.to_string();
        assert!(text.contains("payload_length"));
        assert!(text.contains("16384"));
        assert!(text.contains("16383"));

        let err = CodecError::message_too_small(32, 7, "header decode");
        assert!(err.to_string().contains("header decode"));
    }
}
