//! Termwire host-type bridge
//!
//! This crate maps between the dynamic term trees of
//! [`termwire-proto`](termwire_proto) and statically typed host values.
//! The wire layer stays ignorant of host types; this layer stays ignorant
//! of byte layouts. Everything it does goes through [`Term`].
//!
//! # Architecture
//!
//! ```text
//!  ┌─────────────────────────────┐
//!  │ termwire-core               │
//!  │ - FromTerm / ToTerm seams   │
//!  │ - range-checked conversion  │
//!  │ - record ⇄ tuple mapping    │
//!  └─────────────────────────────┘
//!               ↓
//!  ┌─────────────────────────────┐
//!  │ termwire-proto              │
//!  │ - tag dispatch              │
//!  │ - byte-level encode/decode  │
//!  └─────────────────────────────┘
//! ```
//!
//! # Key Principles
//!
//! - Dispatch on the target: decoding into an `i8` and into a `BigInt`
//!   read the same bytes but apply different range policies; the target
//!   type decides.
//! - Overflow is loud: a decoded value that doesn't fit its target fails
//!   with the value and the target's name, never a silent truncation.
//! - Records are explicit: field enumeration via [`term_record!`] stands
//!   in for the runtime reflection Rust doesn't have.
//!
//! # Modules
//!
//! - [`from_term`]: typed decoding (`decode`, `decode_into`, [`FromTerm`])
//! - [`to_term`]: typed encoding (`encode_value`, `encode_to_vec`,
//!   [`ToTerm`])
//! - [`record`]: the [`term_record!`] field-enumeration macro
//! - [`error`]: bridge error types

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod error;
pub mod from_term;
pub mod record;
pub mod to_term;

pub use error::{BindError, Result};
pub use from_term::{decode, decode_into, FromTerm};
pub use to_term::{encode_to_vec, encode_value, ToTerm};

// Re-exported for `term_record!` expansions and caller convenience.
pub use termwire_proto::Term;
