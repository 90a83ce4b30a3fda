//! Error types for SLC3 encoding and decoding

use std::io;
use thiserror::Error;

use crate::action::ActionKind;

/// Result alias used throughout the crate.
pub type Result<T = ()> = std::result::Result<T, SlcError>;

/// Errors that can occur while encoding or decoding an SLC3 container
#[derive(Debug, Error)]
pub enum SlcError {
    /// Magic bytes at the start of the stream do not spell `SLC3RPLY`
    #[error("invalid container header (expected \"SLC3RPLY\" magic)")]
    InvalidHeader,

    /// Metadata block length does not match this version's fixed layout
    #[error("invalid metadata size: {0} (expected 64)")]
    InvalidMetadataSize(u16),

    /// Trailing byte is not the 0xCC footer
    #[error("invalid footer byte: 0x{0:02X} (expected 0xCC)")]
    InvalidFooter(u8),

    /// Stream ended inside a structure, or a declared length exceeds the
    /// remaining bytes
    #[error("stream truncated mid-structure")]
    Truncated,

    /// Section header carried the reserved identifier bits `11`
    #[error("unknown section identifier: {0:#04b}")]
    InvalidSection(u8),

    /// Special section carried an unrecognized type code
    #[error("unknown special type code: {0}")]
    InvalidSpecialType(u8),

    /// An append helper was called with an action kind outside its range
    #[error("action kind {0:?} is not valid for this append helper")]
    InvalidActionKind(ActionKind),

    /// An appended frame precedes the previous action's frame
    #[error("non-monotonic frame {frame} (previous action at {previous})")]
    NonMonotonicFrame { frame: u64, previous: u64 },

    /// TPS changes must be positive
    #[error("invalid tps value: {0} (must be positive)")]
    InvalidTps(f64),

    /// Marker label did not decode as UTF-8
    #[error("marker label is not valid UTF-8")]
    InvalidMarkerLabel,

    /// Marker labels are length-prefixed with a u16 on the wire
    #[error("marker label exceeds 65535 bytes")]
    MarkerLabelTooLong,

    /// Position query, seek, or raw I/O on the underlying stream failed
    #[error("stream I/O error: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for SlcError {
    fn from(err: io::Error) -> Self {
        // A short read is the format-level truncation case, not a
        // transport failure.
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::Truncated
        } else {
            Self::Io(err)
        }
    }
}
