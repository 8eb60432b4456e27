//! Typed decoding: terms into host values.
//!
//! [`FromTerm`] is the seam between the dynamic term tree and statically
//! typed targets. [`decode`] and [`decode_into`] drive it from raw framed
//! bytes: they check the leading version byte, decode exactly one term,
//! convert, and report how many bytes were consumed so callers can frame
//! terms back to back.
//!
//! Dispatch is on the *target's* kind, mirroring the wire format's
//! conversion rules:
//!
//! - integer targets of any width are range-checked; a value the target
//!   cannot represent fails with [`BindError::Overflow`] carrying the
//!   value and the target's name
//! - `Vec<u8>`, [`bytes::Bytes`] and `[u8; N]` targets take BINARY terms;
//!   the fixed-size form requires an exact length match
//! - [`Atom`] targets take any atom, including the boolean-folded
//!   `true`/`false`
//! - tuple targets require matching arity and convert element-wise
//! - everything else is rejected with a syntax error naming the mismatch

use bytes::Bytes;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use termwire_proto::{Atom, Context, Term, VERSION};

use crate::error::{BindError, Result};

/// Conversion from a decoded [`Term`] into a host value.
///
/// Implementations exist for booleans, integers of every native width,
/// floats, byte containers, strings, atoms, big integers, tuples, and
/// (via [`term_record!`](crate::term_record)) caller-defined records.
pub trait FromTerm: Sized {
    /// Diagnostic name of the target type, used in error payloads.
    const TARGET: &'static str;

    /// Convert a decoded term into the target.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::Overflow`] when the value cannot be
    /// represented, [`BindError::Syntax`] when the term has the wrong
    /// shape, and [`BindError::Structural`] on arity conflicts.
    fn from_term(term: Term) -> Result<Self>;
}

/// Decode one framed term from `bytes` into a typed value.
///
/// The first byte must be the format-version byte (131). Returns the
/// value and the total number of bytes consumed, version byte included,
/// so several framed terms can be decoded back to back from one buffer.
///
/// # Errors
///
/// [`BindError::Version`] when the version byte is wrong; otherwise as
/// [`FromTerm::from_term`] plus wire-level errors via
/// [`BindError::Codec`].
pub fn decode<T: FromTerm>(bytes: &[u8]) -> Result<(T, usize)> {
    match bytes.first() {
        Some(&VERSION) => {}
        Some(&found) => {
            tracing::debug!(found, "input does not start with the format-version byte");
            return Err(BindError::Version { found });
        }
        None => return Err(BindError::Syntax { message: "empty input".to_string() }),
    }

    let ctx = Context::new();
    let mut remaining = &bytes[1..];
    let term = ctx.decoder(&mut remaining).decode().map_err(BindError::from)?;
    let consumed = bytes.len() - remaining.len();

    Ok((T::from_term(term)?, consumed))
}

/// Decode one framed term from `bytes` into an existing typed slot.
///
/// Same contract as [`decode`]; the target is only written on success.
///
/// # Errors
///
/// See [`decode`].
pub fn decode_into<T: FromTerm>(bytes: &[u8], target: &mut T) -> Result<usize> {
    let (value, consumed) = decode(bytes)?;
    *target = value;
    Ok(consumed)
}

impl FromTerm for Term {
    const TARGET: &'static str = "Term";

    fn from_term(term: Term) -> Result<Self> {
        Ok(term)
    }
}

impl FromTerm for bool {
    const TARGET: &'static str = "bool";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::Bool(value) => Ok(value),
            other => Err(BindError::not_a("boolean", other.kind())),
        }
    }
}

macro_rules! signed_target {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromTerm for $ty {
            const TARGET: &'static str = stringify!($ty);

            fn from_term(term: Term) -> Result<Self> {
                match term {
                    Term::Int(value) => <$ty>::try_from(value)
                        .map_err(|_| BindError::overflow(value, Self::TARGET)),
                    // A value that did not narrow to i64 cannot fit any
                    // signed native width.
                    Term::BigInt(value) => Err(BindError::overflow(value, Self::TARGET)),
                    other => Err(BindError::not_a("integer", other.kind())),
                }
            }
        }
    )+};
}

signed_target!(i8, i16, i32, i64, isize);

macro_rules! unsigned_target {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromTerm for $ty {
            const TARGET: &'static str = stringify!($ty);

            fn from_term(term: Term) -> Result<Self> {
                match term {
                    Term::Int(value) => <$ty>::try_from(value)
                        .map_err(|_| BindError::overflow(value, Self::TARGET)),
                    // Values in i64::MAX..=u64::MAX arrive through the
                    // big-integer lane.
                    Term::BigInt(value) => value
                        .to_u64()
                        .and_then(|wide| <$ty>::try_from(wide).ok())
                        .ok_or_else(|| BindError::overflow(value, Self::TARGET)),
                    other => Err(BindError::not_a("integer", other.kind())),
                }
            }
        }
    )+};
}

unsigned_target!(u8, u16, u32, u64, usize);

impl FromTerm for f64 {
    const TARGET: &'static str = "f64";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::Float(value) => Ok(value),
            other => Err(BindError::not_a("float", other.kind())),
        }
    }
}

impl FromTerm for f32 {
    const TARGET: &'static str = "f32";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::Float(value) => {
                let narrow = value as f32;
                if narrow.is_infinite() && value.is_finite() {
                    Err(BindError::overflow(value, Self::TARGET))
                } else {
                    Ok(narrow)
                }
            }
            other => Err(BindError::not_a("float", other.kind())),
        }
    }
}

impl FromTerm for Vec<u8> {
    const TARGET: &'static str = "Vec<u8>";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::Binary(bytes) => Ok(bytes.to_vec()),
            other => Err(BindError::not_a("binary", other.kind())),
        }
    }
}

impl FromTerm for Bytes {
    const TARGET: &'static str = "Bytes";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::Binary(bytes) => Ok(bytes),
            other => Err(BindError::not_a("binary", other.kind())),
        }
    }
}

impl<const N: usize> FromTerm for [u8; N] {
    const TARGET: &'static str = "fixed-size byte array";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::Binary(bytes) => <[u8; N]>::try_from(bytes.as_ref()).map_err(|_| {
                BindError::overflow(format!("binary of {} bytes", bytes.len()), Self::TARGET)
            }),
            other => Err(BindError::not_a("binary", other.kind())),
        }
    }
}

impl FromTerm for String {
    const TARGET: &'static str = "String";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::String(text) => Ok(text),
            other => Err(BindError::not_a("string", other.kind())),
        }
    }
}

impl FromTerm for Atom {
    const TARGET: &'static str = "Atom";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::Atom(atom) => Ok(atom),
            // The dynamic reader folds these atoms into booleans; an
            // atom-typed target sees them spelled out again.
            Term::Bool(true) => Ok(Atom::from("true")),
            Term::Bool(false) => Ok(Atom::from("false")),
            other => Err(BindError::not_a("atom", other.kind())),
        }
    }
}

impl FromTerm for BigInt {
    const TARGET: &'static str = "BigInt";

    fn from_term(term: Term) -> Result<Self> {
        match term {
            Term::BigInt(value) => Ok(value),
            // Narrowed wire values still satisfy a big-integer target.
            Term::Int(value) => Ok(BigInt::from(value)),
            other => Err(BindError::not_a("integer", other.kind())),
        }
    }
}

macro_rules! list_target {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromTerm for Vec<$ty> {
            const TARGET: &'static str = concat!("Vec<", stringify!($ty), ">");

            fn from_term(term: Term) -> Result<Self> {
                match term {
                    Term::List(elements) => {
                        elements.into_iter().map(<$ty>::from_term).collect()
                    }
                    Term::Nil => Ok(Vec::new()),
                    other => Err(BindError::not_a("list", other.kind())),
                }
            }
        }
    )+};
}

list_target!(bool, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64, String, Atom, Term);

macro_rules! count_idents {
    () => (0usize);
    ($head:ident $($tail:ident)*) => (1usize + count_idents!($($tail)*));
}

macro_rules! tuple_target {
    ($(($($name:ident),+)),+ $(,)?) => {$(
        impl<$($name: FromTerm),+> FromTerm for ($($name,)+) {
            const TARGET: &'static str = "tuple";

            fn from_term(term: Term) -> Result<Self> {
                const ARITY: usize = count_idents!($($name)+);
                match term {
                    Term::Tuple(elements) => {
                        if elements.len() != ARITY {
                            return Err(BindError::Structural {
                                message: format!(
                                    "different number of fields ({}, should be {})",
                                    ARITY,
                                    elements.len()
                                ),
                            });
                        }
                        let mut elements = elements.into_iter();
                        Ok(($($name::from_term(
                            elements.next().expect("arity checked")
                        )?,)+))
                    }
                    other => Err(BindError::not_a("tuple", other.kind())),
                }
            }
        }
    )+};
}

tuple_target!(
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
);
