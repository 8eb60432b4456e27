//! Record-to-tuple mapping.
//!
//! Erlang records travel as bare tuples: the fields in declaration order,
//! no names. Rust has no runtime reflection to discover fields, so the
//! mapping is driven by an explicit field enumeration the caller writes
//! once per type with [`term_record!`](crate::term_record). The semantic
//! contract is the same either way: fields in declaration order, arity
//! checked on decode, names never serialized.

/// Implement [`FromTerm`](crate::FromTerm) and [`ToTerm`](crate::ToTerm)
/// for a struct by enumerating its fields in declaration order.
///
/// The struct encodes as a tuple of its fields (no names on the wire) and
/// decodes from a tuple whose arity must equal the field count; a
/// mismatch fails with [`BindError::Structural`](crate::BindError).
///
/// ```
/// use termwire_core::{decode, encode_to_vec, term_record};
///
/// #[derive(Debug, PartialEq)]
/// struct Event {
///     name: termwire_proto::Atom,
///     sequence: u32,
///     payload: Vec<u8>,
/// }
///
/// term_record!(Event { name, sequence, payload });
///
/// let event = Event {
///     name: "tick".into(),
///     sequence: 7,
///     payload: vec![1, 2, 3],
/// };
/// let bytes = encode_to_vec(&event).unwrap();
/// let (back, _) = decode::<Event>(&bytes).unwrap();
/// assert_eq!(back, event);
/// ```
#[macro_export]
macro_rules! term_record {
    ($name:ident { $($field:ident),+ $(,)? }) => {
        impl $crate::FromTerm for $name {
            const TARGET: &'static str = stringify!($name);

            fn from_term(term: $crate::Term) -> $crate::Result<Self> {
                match term {
                    $crate::Term::Tuple(fields) => {
                        let arity = [$(stringify!($field)),+].len();
                        if fields.len() != arity {
                            return Err($crate::BindError::Structural {
                                message: format!(
                                    "different number of fields ({}, should be {})",
                                    arity,
                                    fields.len()
                                ),
                            });
                        }
                        let mut fields = fields.into_iter();
                        Ok(Self {
                            $($field: $crate::FromTerm::from_term(
                                fields.next().expect("arity checked")
                            )?),+
                        })
                    }
                    other => Err($crate::BindError::Syntax {
                        message: format!("not a tuple (got {})", other.kind()),
                    }),
                }
            }
        }

        impl $crate::ToTerm for $name {
            fn to_term(&self) -> $crate::Term {
                $crate::Term::Tuple(vec![$($crate::ToTerm::to_term(&self.$field)),+])
            }
        }
    };
}
