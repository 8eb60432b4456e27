//! Error types for the wire codec.
//!
//! All errors are structured and carry the diagnostic payload a caller
//! needs to act on them. Recursive decodes stop at the first error and
//! propagate it upward unchanged; no partial value is exposed after a
//! failure.

use thiserror::Error;

/// Errors produced while decoding or encoding terms.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Underlying stream failure, propagated verbatim.
    ///
    /// A premature end-of-stream surfaces here with
    /// [`std::io::ErrorKind::UnexpectedEof`].
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unrecognized tag byte in term position during decode
    #[error("unknown term tag {tag:#04x}")]
    UnknownTerm {
        /// The offending byte
        tag: u8,
    },

    /// Legacy FLOAT payload failed the decimal parse
    #[error("legacy float payload failed decimal parse")]
    FloatScan,

    /// A structural child decoded to the wrong kind of term
    #[error("expected {expected}, got {found}")]
    Mismatch {
        /// What the enclosing term's layout requires
        expected: &'static str,
        /// Kind of the term actually decoded
        found: &'static str,
    },

    /// Atom or string payload is not valid UTF-8
    #[error("{what} payload is not valid utf-8")]
    NonUtf8 {
        /// Which payload kind carried the bytes
        what: &'static str,
    },

    /// ATOM_CACHE_REF pointed at an unoccupied cache slot
    #[error("atom cache slot {index} is empty")]
    UncachedAtom {
        /// Cache-view index from the wire
        index: u8,
    },

    /// Atom exceeds the 65535-byte cap on encode
    #[error("atom is too big ({size} bytes)")]
    AtomTooBig {
        /// Actual length in bytes
        size: usize,
    },

    /// String exceeds the 65535-byte cap on encode
    #[error("string is too big ({size} bytes)")]
    StringTooBig {
        /// Actual length in bytes
        size: usize,
    },

    /// Binary exceeds the 32-bit length field on encode
    #[error("binary is too big ({size} bytes)")]
    BinaryTooBig {
        /// Actual length in bytes
        size: usize,
    },

    /// Big-integer magnitude exceeds the 32-bit length field on encode
    #[error("big integer is too big ({size} magnitude bytes)")]
    BigIntTooBig {
        /// Magnitude length in bytes
        size: usize,
    },

    /// Asked to encode a term kind with no wire mapping from this API
    #[error("cannot encode {kind} from the dynamic api")]
    UnsupportedTerm {
        /// Kind name of the rejected term
        kind: &'static str,
    },
}

/// Convenient Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;
