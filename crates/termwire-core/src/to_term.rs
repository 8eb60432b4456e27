//! Typed encoding: host values into terms.
//!
//! [`ToTerm`] is the inverse seam of [`FromTerm`](crate::FromTerm): a
//! statically typed value produces the term the writer will serialize.
//! Tag selection stays in the proto writer; this layer only decides the
//! term shape (native integer lane vs. big lane, BINARY vs. LIST, tuple
//! of record fields).
//!
//! Reference-like indirection is transparent: `&T` and `Box<T>` delegate
//! to the pointee, one level per wrapper, matching the writer contract of
//! following an indirection before dispatch rather than recursing blindly
//! through arbitrary representations.

use std::io::Write;

use bytes::Bytes;
use num_bigint::BigInt;
use termwire_proto::{Atom, Context, Export, Pid, Port, Ref, Term};

use crate::error::Result;

/// Conversion from a host value into a [`Term`] for encoding.
///
/// Support is compile-time: a type without an implementation simply does
/// not satisfy the bound, so there is no runtime "unknown type" path for
/// typed values. The only runtime rejection left is the writer's own
/// unsupported-term error (function closures).
pub trait ToTerm {
    /// Build the term this value encodes as. Borrows the value; encoding
    /// never consumes its input.
    fn to_term(&self) -> Term;
}

/// Encode a typed value as a complete framed term (version byte
/// included) into `writer`.
///
/// # Errors
///
/// Wire-level failures (size caps, sink I/O) surface via
/// [`BindError::Codec`](crate::BindError::Codec).
pub fn encode_value<T, W>(ctx: &Context, value: &T, writer: W) -> Result<()>
where
    T: ToTerm + ?Sized,
    W: Write,
{
    ctx.encoder(writer).encode(&value.to_term())?;
    Ok(())
}

/// Encode a typed value as a complete framed term into a fresh buffer.
///
/// # Errors
///
/// See [`encode_value`].
pub fn encode_to_vec<T: ToTerm + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let ctx = Context::new();
    let mut buf = Vec::new();
    encode_value(&ctx, value, &mut buf)?;
    Ok(buf)
}

impl ToTerm for Term {
    fn to_term(&self) -> Term {
        self.clone()
    }
}

impl ToTerm for bool {
    fn to_term(&self) -> Term {
        Term::Bool(*self)
    }
}

macro_rules! signed_source {
    ($($ty:ty),+ $(,)?) => {$(
        impl ToTerm for $ty {
            fn to_term(&self) -> Term {
                Term::Int(*self as i64)
            }
        }
    )+};
}

signed_source!(i8, i16, i32, i64, isize);

macro_rules! unsigned_source {
    ($($ty:ty),+ $(,)?) => {$(
        impl ToTerm for $ty {
            fn to_term(&self) -> Term {
                Term::Int(i64::from(*self))
            }
        }
    )+};
}

unsigned_source!(u8, u16, u32);

impl ToTerm for u64 {
    fn to_term(&self) -> Term {
        match i64::try_from(*self) {
            Ok(narrow) => Term::Int(narrow),
            Err(_) => Term::BigInt(BigInt::from(*self)),
        }
    }
}

impl ToTerm for usize {
    fn to_term(&self) -> Term {
        (*self as u64).to_term()
    }
}

impl ToTerm for f64 {
    fn to_term(&self) -> Term {
        Term::Float(*self)
    }
}

impl ToTerm for f32 {
    fn to_term(&self) -> Term {
        Term::Float(f64::from(*self))
    }
}

impl ToTerm for str {
    fn to_term(&self) -> Term {
        Term::String(self.to_owned())
    }
}

impl ToTerm for String {
    fn to_term(&self) -> Term {
        Term::String(self.clone())
    }
}

impl ToTerm for Atom {
    fn to_term(&self) -> Term {
        Term::Atom(self.clone())
    }
}

impl ToTerm for BigInt {
    fn to_term(&self) -> Term {
        Term::BigInt(self.clone())
    }
}

impl ToTerm for Bytes {
    fn to_term(&self) -> Term {
        Term::Binary(self.clone())
    }
}

impl ToTerm for Vec<u8> {
    fn to_term(&self) -> Term {
        Term::Binary(Bytes::copy_from_slice(self))
    }
}

impl ToTerm for [u8] {
    fn to_term(&self) -> Term {
        Term::Binary(Bytes::copy_from_slice(self))
    }
}

impl ToTerm for Pid {
    fn to_term(&self) -> Term {
        Term::Pid(self.clone())
    }
}

impl ToTerm for Port {
    fn to_term(&self) -> Term {
        Term::Port(self.clone())
    }
}

impl ToTerm for Ref {
    fn to_term(&self) -> Term {
        Term::Ref(self.clone())
    }
}

impl ToTerm for Export {
    fn to_term(&self) -> Term {
        Term::Export(self.clone())
    }
}

// One level of indirection per wrapper, dispatching on the pointee.
impl<T: ToTerm + ?Sized> ToTerm for &T {
    fn to_term(&self) -> Term {
        (**self).to_term()
    }
}

impl<T: ToTerm + ?Sized> ToTerm for Box<T> {
    fn to_term(&self) -> Term {
        (**self).to_term()
    }
}

macro_rules! list_source {
    ($($ty:ty),+ $(,)?) => {$(
        impl ToTerm for Vec<$ty> {
            fn to_term(&self) -> Term {
                Term::List(self.iter().map(ToTerm::to_term).collect())
            }
        }

        impl ToTerm for [$ty] {
            fn to_term(&self) -> Term {
                Term::List(self.iter().map(ToTerm::to_term).collect())
            }
        }
    )+};
}

list_source!(bool, i16, i32, i64, isize, u16, u32, u64, usize, f32, f64, String, Atom, Term);

macro_rules! tuple_source {
    ($(($($name:ident : $index:tt),+)),+ $(,)?) => {$(
        impl<$($name: ToTerm),+> ToTerm for ($($name,)+) {
            fn to_term(&self) -> Term {
                Term::Tuple(vec![$(self.$index.to_term()),+])
            }
        }
    )+};
}

tuple_source!(
    (A: 0),
    (A: 0, B: 1),
    (A: 0, B: 1, C: 2),
    (A: 0, B: 1, C: 2, D: 3),
    (A: 0, B: 1, C: 2, D: 3, E: 4),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6),
    (A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7),
);
