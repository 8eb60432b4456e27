//! Error types for the host-type bridge.
//!
//! This layer's errors describe the mapping between decoded terms and
//! host types: version mismatches, wrong-shaped terms, arity conflicts,
//! and values that don't fit their target. Wire-level failures from the
//! proto layer pass through wrapped, so callers can match on either
//! layer.

use termwire_proto::CodecError;
use thiserror::Error;

/// Errors that can occur while binding terms to host types.
#[derive(Error, Debug)]
pub enum BindError {
    /// Input did not start with the format-version byte (131)
    #[error("version error: version {found} is not supported")]
    Version {
        /// The byte found in version position
        found: u8,
    },

    /// The bytes are not a valid term in the required position
    #[error("syntax error: {message}")]
    Syntax {
        /// What was required and what was found
        message: String,
    },

    /// Tuple arity disagrees with the target's field count
    #[error("structural error: {message}")]
    Structural {
        /// Arity diagnostic
        message: String,
    },

    /// A decoded value cannot be represented by the target type
    #[error("overflow error: cannot represent {value} by type {target}")]
    Overflow {
        /// The decoded value, rendered for diagnostics
        value: String,
        /// Name of the target type
        target: &'static str,
    },

    /// The target type is outside the bridge's dispatch set
    #[error("type error: cannot represent type {target}")]
    UnsupportedTarget {
        /// Name of the rejected target type
        target: &'static str,
    },

    /// Wire-level decode or encode failure underneath the bridge
    #[error(transparent)]
    Codec(#[from] CodecError),
}

impl BindError {
    /// Overflow with the offending value rendered for diagnostics.
    pub(crate) fn overflow(value: impl ToString, target: &'static str) -> Self {
        BindError::Overflow { value: value.to_string(), target }
    }

    /// Syntax error in the shape "not a(n) X, got Y".
    pub(crate) fn not_a(expected: &'static str, found: &'static str) -> Self {
        BindError::Syntax { message: format!("not a {expected} (got {found})") }
    }
}

/// Convenient Result type alias for bridge operations
pub type Result<T> = std::result::Result<T, BindError>;
