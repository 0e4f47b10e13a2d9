//! Error types for icc-codec

use thiserror::Error;

use crate::icc::Signature;

/// Result type for icc-codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or writing a profile
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Fewer bytes are available than the format requires at `offset`
    #[error("Truncated input at offset {offset}: need {needed} bytes, {available} available")]
    TruncatedInput {
        offset: u64,
        needed: u64,
        available: u64,
    },

    /// A textual field does not match its expected pattern
    #[error("Invalid {field}: {value:?}")]
    InvalidFormat { field: &'static str, value: String },

    /// A fixed-width text field exceeds its byte budget
    #[error("{field} is {actual} bytes long, at most {max} allowed")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// A numeric value cannot be represented in its on-disk width
    #[error("{field} out of range: {value}")]
    ValueOutOfRange { field: &'static str, value: String },

    /// Encoded payload is larger than the tag's slot
    #[error("Tag '{tag}' payload of {encoded} bytes overflows its {slot}-byte slot")]
    SlotOverflow {
        tag: Signature,
        slot: u32,
        encoded: usize,
    },

    /// Encoded payload size differs from the slot size under `SlotPolicy::Exact`
    #[error("Tag '{tag}' payload is {encoded} bytes, slot is exactly {slot}")]
    SlotSizeMismatch {
        tag: Signature,
        slot: u32,
        encoded: usize,
    },

    /// I/O error from the backing store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn truncated(offset: u64, needed: u64, available: u64) -> Self {
        Self::TruncatedInput {
            offset,
            needed,
            available,
        }
    }

    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            value: value.into(),
        }
    }

    pub(crate) fn out_of_range(field: &'static str, value: impl ToString) -> Self {
        Self::ValueOutOfRange {
            field,
            value: value.to_string(),
        }
    }

    /// True for `TruncatedInput`
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. })
    }
}
