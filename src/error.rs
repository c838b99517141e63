//! Error types for zipzap

use std::fmt;

use thiserror::Error;

/// Where in a compressed stream a failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPosition {
    /// Index into the encoded bit stream.
    Bit(usize),
    /// Offset into the `.zz` byte buffer.
    Byte(usize),
    /// Index into a symbol-frequency table.
    Entry(usize),
}

impl fmt::Display for StreamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamPosition::Bit(index) => write!(f, "bit {index}"),
            StreamPosition::Byte(offset) => write!(f, "byte offset {offset}"),
            StreamPosition::Entry(index) => write!(f, "table entry {index}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CompressError {
    #[error("invalid bit value {value}: must be 0 or 1")]
    InvalidBit { value: u8 },

    #[error("bit index {index} out of range for stream of {len} bits")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("symbol {symbol:?} at position {position} has no code in the codebook")]
    CodebookMiss { symbol: char, position: usize },

    #[error("corrupt stream at {at}: {reason}")]
    CorruptStream { at: StreamPosition, reason: String },

    #[error("stream of {bit_length} bits ends with {pending} bits that do not complete a code")]
    TrailingBits { bit_length: usize, pending: usize },

    #[error("{field} value {value} exceeds the format limit of {max}")]
    FieldOverflow {
        field: &'static str,
        value: u64,
        max: u64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

impl CompressError {
    pub(crate) fn corrupt_at_byte(offset: usize, reason: impl Into<String>) -> Self {
        CompressError::CorruptStream {
            at: StreamPosition::Byte(offset),
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt_at_entry(index: usize, reason: impl Into<String>) -> Self {
        CompressError::CorruptStream {
            at: StreamPosition::Entry(index),
            reason: reason.into(),
        }
    }

    pub(crate) fn corrupt_at_bit(index: usize, reason: impl Into<String>) -> Self {
        CompressError::CorruptStream {
            at: StreamPosition::Bit(index),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompressError>;
