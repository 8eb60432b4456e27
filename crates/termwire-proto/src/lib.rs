//! # Termwire Protocol: Wire Format
//!
//! This crate implements the Erlang external term format (ETF): the
//! length-prefixed, tag-dispatched binary encoding the Erlang/OTP runtime
//! uses to serialize terms for inter-node messaging and persistence.
//!
//! ## Protocol Design
//!
//! One tag alphabet and one data model serve both directions:
//!
//! - **[`Decoder`]**: consumes bytes from any [`std::io::Read`] source,
//!   dispatches on a one-byte tag, and recursively materializes an owned
//!   [`Term`] tree.
//! - **[`Encoder`]**: borrows a [`Term`] tree and emits the narrowest tag
//!   that can represent each value, preserving the format's on-wire shape
//!   byte for byte.
//! - **[`Context`]**: process-wide collaborator holding the atom cache
//!   table used by the distribution protocol's cache-reference tag.
//!
//! ## Implementation Notes
//!
//! - **Big-Endian Fields**: every multibyte integer field on the wire is
//!   big-endian, with one deliberate exception: big-integer magnitudes
//!   are little-endian. That inversion is centralized in one module used
//!   by both directions.
//!
//! - **Narrowing**: decoded big integers that fit `i64` exactly are
//!   presented in the native integer lane; consumers only see
//!   [`Term::BigInt`] for values that genuinely need it.
//!
//! - **Bounded Allocation**: all length-prefixed reads are driven by the
//!   bytes actually present in the stream, so a hostile length prefix
//!   cannot force a large allocation up front.
//!
//! ## Framing
//!
//! A complete framed term is the version byte (131) followed by one term.
//! There is no whole-message length prefix; transport framing is the
//! caller's concern, as is buffering of the underlying byte source.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bigint;

pub mod context;
pub mod errors;
pub mod reader;
pub mod tags;
pub mod term;
pub mod writer;

pub use context::{AtomCache, Context, CACHE_SLOTS, CACHE_VIEW};
pub use errors::{CodecError, Result};
pub use reader::Decoder;
pub use tags::{Tag, VERSION};
pub use term::{Atom, Export, Function, Pid, Port, Ref, Term};
pub use writer::{Encoder, MAX_ATOM, MAX_SMALL_ATOM, MAX_STRING};
