//! The decoded term tree and its composite entities.
//!
//! [`Term`] is the dynamic representation shared by the reader and writer:
//! every decode materializes a freshly owned tree, every encode borrows
//! one. The variant set mirrors the wire format's tag alphabet, except
//! that several wire tags collapse into one variant (all four atom tags
//! produce [`Term::Atom`] or a boolean; both big-integer tags produce
//! [`Term::Int`] or [`Term::BigInt`] depending on narrowing).
//!
//! # Invariants
//!
//! - **Boolean folding**: the atoms `true` and `false` never appear as
//!   [`Term::Atom`] after a dynamic decode; they are folded into
//!   [`Term::Bool`].
//! - **Integer narrowing**: a decoded big integer that fits `i64` exactly
//!   is presented as [`Term::Int`]; [`Term::BigInt`] only carries values
//!   outside that range.
//! - **List tails**: [`Term::List`] is always proper (the wire tail was
//!   NIL). Any other tail is preserved in [`Term::ImproperList`].

use std::fmt;

use bytes::Bytes;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

/// An Erlang atom: a symbolic identifier carrying its text.
///
/// Interning is an Erlang-runtime concern; on this side of the wire an
/// atom is just its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Atom(pub String);

impl Atom {
    /// The atom's text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Atom {
    fn from(s: &str) -> Self {
        Atom(s.to_string())
    }
}

impl From<String> for Atom {
    fn from(s: String) -> Self {
        Atom(s)
    }
}

impl AsRef<str> for Atom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Process identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pid {
    /// Node the process lives on
    pub node: Atom,
    /// Process number
    pub id: u32,
    /// Serial disambiguating reused ids
    pub serial: u32,
    /// Node incarnation
    pub creation: u8,
}

/// Port identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    /// Node the port lives on
    pub node: Atom,
    /// Port number
    pub id: u32,
    /// Node incarnation
    pub creation: u8,
}

/// Unique reference.
///
/// # Invariants
///
/// - `ids` holds between 1 and 65535 words; the wire carries the count as
///   a 16-bit field. The legacy single-word REFERENCE tag decodes into a
///   one-element vector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ref {
    /// Node the reference was created on
    pub node: Atom,
    /// Node incarnation
    pub creation: u8,
    /// Id words (1..=65535 entries)
    pub ids: Vec<u32>,
}

/// Exported function `module:function/arity`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Export {
    /// Defining module
    pub module: Atom,
    /// Function name
    pub function: Atom,
    /// Number of arguments
    pub arity: u8,
}

/// Function closure.
///
/// Decodable from both the NEW_FUN and legacy FUN layouts; not encodable
/// from the dynamic API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    /// Number of arguments
    pub arity: u8,
    /// MD5 of the defining module's significant parts
    pub unique: [u8; 16],
    /// Index into the module's fun table
    pub index: u32,
    /// Number of free variables
    pub free: u32,
    /// Defining module
    pub module: Atom,
    /// Old-style fun-table index
    pub old_index: u32,
    /// Old-style uniqueness hash
    pub old_unique: u32,
    /// Process that created the closure
    pub pid: Pid,
    /// Captured free variables (`free` entries)
    pub free_vars: Vec<Term>,
}

/// A decoded term.
///
/// The dynamic sum over everything the wire can carry. Each decode
/// produces an independently owned tree; encoding borrows its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// The atoms `true` / `false`
    Bool(bool),
    /// Signed integer small enough for the native 64-bit lane
    Int(i64),
    /// Arbitrary-precision integer outside the `i64` range
    BigInt(BigInt),
    /// 64-bit IEEE 754 float
    Float(f64),
    /// Any atom other than `true` / `false`
    Atom(Atom),
    /// Byte string (STRING_EXT, at most 65535 bytes on encode)
    String(String),
    /// Octet sequence (BINARY_EXT; also the decoded form of BIT_BINARY)
    Binary(Bytes),
    /// Fixed-arity ordered sequence
    Tuple(Vec<Term>),
    /// Proper list (wire tail was NIL)
    List(Vec<Term>),
    /// List whose wire tail was any non-NIL term, tail preserved
    ImproperList {
        /// Leading elements
        elements: Vec<Term>,
        /// The explicit tail term
        tail: Box<Term>,
    },
    /// The empty list
    Nil,
    /// Process identifier
    Pid(Pid),
    /// Port identifier
    Port(Port),
    /// Unique reference
    Ref(Ref),
    /// Exported function name
    Export(Export),
    /// Function closure (decode-only)
    Function(Box<Function>),
}

impl Term {
    /// Diagnostic name of the variant's kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Term::Bool(_) => "boolean",
            Term::Int(_) => "integer",
            Term::BigInt(_) => "big integer",
            Term::Float(_) => "float",
            Term::Atom(_) => "atom",
            Term::String(_) => "string",
            Term::Binary(_) => "binary",
            Term::Tuple(_) => "tuple",
            Term::List(_) => "list",
            Term::ImproperList { .. } => "improper list",
            Term::Nil => "nil",
            Term::Pid(_) => "pid",
            Term::Port(_) => "port",
            Term::Ref(_) => "reference",
            Term::Export(_) => "export",
            Term::Function(_) => "function",
        }
    }

    /// The atom's text, if this term is an atom.
    #[must_use]
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Term::Atom(atom) => Some(atom),
            _ => None,
        }
    }

    /// The integer value, if this term is in the native integer lane.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<Atom> for Term {
    fn from(atom: Atom) -> Self {
        Term::Atom(atom)
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Int(value)
    }
}

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names() {
        assert_eq!(Term::Bool(true).kind(), "boolean");
        assert_eq!(Term::Nil.kind(), "nil");
        assert_eq!(Term::Tuple(vec![]).kind(), "tuple");
        assert_eq!(
            Term::ImproperList { elements: vec![], tail: Box::new(Term::Nil) }.kind(),
            "improper list"
        );
    }

    #[test]
    fn atom_display_and_conversions() {
        let atom = Atom::from("ok");
        assert_eq!(atom.to_string(), "ok");
        assert_eq!(atom.as_str(), "ok");
        assert_eq!(Term::from(atom.clone()).as_atom(), Some(&atom));
    }

    #[test]
    fn accessors() {
        assert_eq!(Term::Int(42).as_int(), Some(42));
        assert_eq!(Term::Bool(true).as_int(), None);
        assert_eq!(Term::Int(42).as_atom(), None);
    }
}
