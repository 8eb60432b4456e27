//! Big-integer wire conversion.
//!
//! The external term format stores big integers as sign-magnitude with the
//! magnitude bytes in *little-endian* order, the one place the format
//! deviates from its otherwise big-endian layout. Both codec directions go
//! through this module so the inversion lives in exactly one place.
//!
//! Decoding also applies the narrowing policy: a value that round-trips
//! through `i64` exactly is presented as [`Term::Int`]; only values
//! outside that range surface as [`Term::BigInt`].

use num_bigint::{BigInt, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::term::Term;

/// Wire sign byte for negative values (0 = non-negative, 1 = negative).
pub(crate) const SIGN_NEGATIVE: u8 = 1;

/// Split a big integer into its wire form: sign byte and little-endian
/// magnitude.
///
/// Zero is emitted with an empty magnitude and sign 0.
pub(crate) fn to_wire(value: &BigInt) -> (u8, Vec<u8>) {
    if value.is_zero() {
        return (0, Vec::new());
    }

    let (sign, magnitude) = value.to_bytes_le();
    let sign_byte = if sign == Sign::Minus { SIGN_NEGATIVE } else { 0 };
    (sign_byte, magnitude)
}

/// Rebuild a term from the wire form, narrowing where exact.
///
/// Any nonzero sign byte means negative. Empty magnitudes and magnitudes
/// with zero top bytes are tolerated (the encoder never produces them, but
/// peers may).
pub(crate) fn from_wire(sign: u8, magnitude_le: &[u8]) -> Term {
    let magnitude = BigInt::from_bytes_le(Sign::Plus, magnitude_le);
    let value = if sign != 0 { -magnitude } else { magnitude };

    match value.to_i64() {
        Some(narrow) => Term::Int(narrow),
        None => Term::BigInt(value),
    }
}
