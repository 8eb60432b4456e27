//! Term decoder: tag dispatch and recursive descent.
//!
//! The decoder reads exactly one term per [`Decoder::decode`] call,
//! advancing the stream past its bytes and no further. Structural tags
//! (tuples, lists, pids, closures) re-enter the decoder for each child.
//!
//! # Flow
//!
//! 1. Read one tag byte; a format-version byte (131) is consumed
//!    transparently by re-entering the decoder.
//! 2. Dispatch on the tag and read its payload shape. All multibyte
//!    integer fields are big-endian except big-integer magnitudes, which
//!    are little-endian and handled by [`crate::bigint`].
//! 3. Children that must be a specific kind (a pid's node slot, a
//!    closure's module slot) are validated and rejected with
//!    [`CodecError::Mismatch`] when the wire disagrees.
//!
//! # Security
//!
//! - **Bounded Allocation**: length- and arity-prefixed payloads are read
//!   through [`Read::take`] or element-by-element, so a hostile length
//!   prefix cannot force a large allocation before the stream proves it
//!   actually carries that many bytes.
//!
//! - **Fail Fast**: the first error aborts the whole decode; no partial
//!   term is ever returned.

use std::io::{self, Read};

use crate::{
    bigint,
    context::Context,
    errors::{CodecError, Result},
    tags::{Tag, VERSION},
    term::{Atom, Export, Function, Pid, Port, Ref, Term},
};

/// Streaming term decoder.
///
/// Created via [`Context::decoder`]. Single-threaded; reads are
/// synchronous and blocking with respect to the underlying stream.
/// Dropping the decoder between terms is the only cancellation point.
#[derive(Debug)]
pub struct Decoder<'c, R> {
    ctx: &'c Context,
    reader: R,
}

impl<'c, R: Read> Decoder<'c, R> {
    pub(crate) fn new(ctx: &'c Context, reader: R) -> Self {
        Self { ctx, reader }
    }

    /// Decode the next term from the stream.
    ///
    /// # Errors
    ///
    /// - [`CodecError::Io`] with [`io::ErrorKind::UnexpectedEof`] on a
    ///   premature end of stream; other stream errors pass through
    ///   verbatim.
    /// - [`CodecError::UnknownTerm`] on an unrecognized tag byte.
    /// - [`CodecError::FloatScan`] on a malformed legacy float payload.
    /// - [`CodecError::Mismatch`] when a structural child decodes to the
    ///   wrong kind of term.
    /// - [`CodecError::UncachedAtom`] when a cache reference hits an
    ///   empty slot.
    pub fn decode(&mut self) -> Result<Term> {
        let mut tag = self.read_u8()?;
        while tag == VERSION {
            tag = self.read_u8()?;
        }
        self.decode_tagged(tag)
    }

    fn decode_tagged(&mut self, tag: u8) -> Result<Term> {
        let Some(tag) = Tag::from_u8(tag) else {
            tracing::debug!(tag, "unknown term tag");
            return Err(CodecError::UnknownTerm { tag });
        };

        match tag {
            Tag::SmallInteger => Ok(Term::Int(i64::from(self.read_u8()?))),

            Tag::Integer => {
                let value = i32::from_be_bytes(self.read_array::<4>()?);
                Ok(Term::Int(i64::from(value)))
            }

            Tag::NewFloat => {
                let bits = u64::from_be_bytes(self.read_array::<8>()?);
                Ok(Term::Float(f64::from_bits(bits)))
            }

            Tag::Float => self.decode_legacy_float(),

            Tag::SmallAtom | Tag::SmallAtomUtf8 => {
                let len = self.read_u8()? as usize;
                let bytes = self.read_bytes(len)?;
                atom_or_bool(bytes)
            }

            Tag::Atom | Tag::AtomUtf8 => {
                let len = self.read_u16()? as usize;
                let bytes = self.read_bytes(len)?;
                atom_or_bool(bytes)
            }

            Tag::Binary => {
                let len = self.read_u32()? as usize;
                let bytes = self.read_bytes(len)?;
                Ok(Term::Binary(bytes.into()))
            }

            Tag::BitBinary => {
                let len = self.read_u32()? as usize;
                let bits = self.read_u8()?;
                let mut bytes = self.read_bytes(len)?;
                if let Some(last) = bytes.last_mut() {
                    let shift = u32::from(8u8.saturating_sub(bits));
                    *last = last.checked_shr(shift).unwrap_or(0);
                }
                Ok(Term::Binary(bytes.into()))
            }

            Tag::String => {
                let len = self.read_u16()? as usize;
                let bytes = self.read_bytes(len)?;
                let text = String::from_utf8(bytes)
                    .map_err(|_| CodecError::NonUtf8 { what: "string" })?;
                Ok(Term::String(text))
            }

            Tag::SmallBig => {
                let len = self.read_u8()? as usize;
                let sign = self.read_u8()?;
                let magnitude = self.read_bytes(len)?;
                Ok(bigint::from_wire(sign, &magnitude))
            }

            Tag::LargeBig => {
                let len = self.read_u32()? as usize;
                let sign = self.read_u8()?;
                let magnitude = self.read_bytes(len)?;
                Ok(bigint::from_wire(sign, &magnitude))
            }

            Tag::Nil => Ok(Term::Nil),

            Tag::SmallTuple => {
                let arity = self.read_u8()? as usize;
                let mut elements = Vec::with_capacity(arity);
                for _ in 0..arity {
                    elements.push(self.decode()?);
                }
                Ok(Term::Tuple(elements))
            }

            Tag::LargeTuple => {
                let arity = self.read_u32()?;
                // Arity is attacker-controlled; grow as elements arrive.
                let mut elements = Vec::new();
                for _ in 0..arity {
                    elements.push(self.decode()?);
                }
                Ok(Term::Tuple(elements))
            }

            Tag::List => {
                let len = self.read_u32()?;
                let mut elements = Vec::new();
                for _ in 0..len {
                    elements.push(self.decode()?);
                }
                // The wire carries one extra term: the tail. A NIL tail
                // makes the list proper; anything else is preserved.
                match self.decode()? {
                    Term::Nil => Ok(Term::List(elements)),
                    tail => Ok(Term::ImproperList { elements, tail: Box::new(tail) }),
                }
            }

            Tag::Pid => {
                let node = self.expect_atom("node atom")?;
                let id = self.read_u32()?;
                let serial = self.read_u32()?;
                let creation = self.read_u8()?;
                Ok(Term::Pid(Pid { node, id, serial, creation }))
            }

            Tag::Port => {
                let node = self.expect_atom("node atom")?;
                let id = self.read_u32()?;
                let creation = self.read_u8()?;
                Ok(Term::Port(Port { node, id, creation }))
            }

            Tag::Reference => {
                let node = self.expect_atom("node atom")?;
                let id = self.read_u32()?;
                let creation = self.read_u8()?;
                Ok(Term::Ref(Ref { node, creation, ids: vec![id] }))
            }

            Tag::NewReference => {
                let count = self.read_u16()?;
                let node = self.expect_atom("node atom")?;
                let creation = self.read_u8()?;
                let mut ids = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    ids.push(self.read_u32()?);
                }
                Ok(Term::Ref(Ref { node, creation, ids }))
            }

            Tag::Export => {
                let module = self.expect_atom("module atom")?;
                let function = self.expect_atom("function atom")?;
                let arity = self.read_u8()?;
                Ok(Term::Export(Export { module, function, arity }))
            }

            Tag::NewFun => {
                // Total byte size is redundant with the stream contents.
                let _size = self.read_u32()?;
                let arity = self.read_u8()?;
                let unique = self.read_array::<16>()?;
                let index = self.read_u32()?;
                let free = self.read_u32()?;
                let module = self.expect_atom("module atom")?;
                let old_index = self.expect_u32("old-index integer")?;
                let old_unique = self.expect_u32("old-unique integer")?;
                let pid = self.expect_pid()?;
                let mut free_vars = Vec::new();
                for _ in 0..free {
                    free_vars.push(self.decode()?);
                }
                Ok(Term::Function(Box::new(Function {
                    arity,
                    unique,
                    index,
                    free,
                    module,
                    old_index,
                    old_unique,
                    pid,
                    free_vars,
                })))
            }

            Tag::Fun => {
                // Legacy layout carries no arity, unique hash, or index.
                let free = self.read_u32()?;
                let pid = self.expect_pid()?;
                let module = self.expect_atom("module atom")?;
                let old_index = self.expect_u32("old-index integer")?;
                let old_unique = self.expect_u32("old-unique integer")?;
                let mut free_vars = Vec::new();
                for _ in 0..free {
                    free_vars.push(self.decode()?);
                }
                Ok(Term::Function(Box::new(Function {
                    arity: 0,
                    unique: [0; 16],
                    index: 0,
                    free,
                    module,
                    old_index,
                    old_unique,
                    pid,
                    free_vars,
                })))
            }

            Tag::AtomCacheRef => {
                let index = self.read_u8()?;
                match self.ctx.cache().current(index) {
                    Some(atom) => Ok(Term::Atom(atom.clone())),
                    None => {
                        tracing::debug!(index, "atom cache reference into empty slot");
                        Err(CodecError::UncachedAtom { index })
                    }
                }
            }

            Tag::NewCache => {
                // Cache installation belongs to the distribution layer;
                // in term position the tag has no payload handling here.
                tracing::debug!(tag = Tag::NewCache.name(), "cache tag in term position");
                Err(CodecError::UnknownTerm { tag: Tag::NewCache.to_u8() })
            }
        }
    }

    /// Legacy FLOAT: 31 bytes of NUL-padded ASCII decimal.
    fn decode_legacy_float(&mut self) -> Result<Term> {
        let raw = self.read_array::<31>()?;
        let text = std::str::from_utf8(&raw).map_err(|_| CodecError::FloatScan)?;
        let value: f64 =
            text.trim_end_matches('\0').parse().map_err(|_| CodecError::FloatScan)?;
        // "inf" / "nan" spellings parse in Rust but are not valid wire
        // payloads for this tag.
        if !value.is_finite() {
            return Err(CodecError::FloatScan);
        }
        Ok(Term::Float(value))
    }

    fn expect_atom(&mut self, expected: &'static str) -> Result<Atom> {
        match self.decode()? {
            Term::Atom(atom) => Ok(atom),
            other => Err(CodecError::Mismatch { expected, found: other.kind() }),
        }
    }

    fn expect_pid(&mut self) -> Result<Pid> {
        match self.decode()? {
            Term::Pid(pid) => Ok(pid),
            other => Err(CodecError::Mismatch { expected: "pid", found: other.kind() }),
        }
    }

    fn expect_u32(&mut self, expected: &'static str) -> Result<u32> {
        match self.decode()? {
            Term::Int(value) => Ok(value as u32),
            other => Err(CodecError::Mismatch { expected, found: other.kind() }),
        }
    }

    fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    fn read_u16(&mut self) -> Result<u16> {
        Ok(u16::from_be_bytes(self.read_array::<2>()?))
    }

    fn read_u32(&mut self) -> Result<u32> {
        Ok(u32::from_be_bytes(self.read_array::<4>()?))
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Read exactly `len` bytes without trusting `len` for allocation.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if read != len {
            return Err(CodecError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream ended inside a length-prefixed payload",
            )));
        }
        Ok(buf)
    }
}

/// The atoms `true` and `false` fold into the boolean variant.
fn atom_or_bool(bytes: Vec<u8>) -> Result<Term> {
    match bytes.as_slice() {
        b"true" => Ok(Term::Bool(true)),
        b"false" => Ok(Term::Bool(false)),
        _ => {
            let text =
                String::from_utf8(bytes).map_err(|_| CodecError::NonUtf8 { what: "atom" })?;
            Ok(Term::Atom(Atom(text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_bytes(bytes: &[u8]) -> Result<Term> {
        let ctx = Context::new();
        let mut decoder = ctx.decoder(bytes);
        decoder.decode()
    }

    #[test]
    fn small_integer() {
        assert_eq!(decode_bytes(&[0x61, 42]).unwrap(), Term::Int(42));
        assert_eq!(decode_bytes(&[0x61, 255]).unwrap(), Term::Int(255));
    }

    #[test]
    fn integer() {
        assert_eq!(decode_bytes(&[0x62, 0x00, 0x00, 0x01, 0x2C]).unwrap(), Term::Int(300));
        assert_eq!(decode_bytes(&[0x62, 0xFF, 0xFF, 0xFF, 0xD6]).unwrap(), Term::Int(-42));
        assert_eq!(
            decode_bytes(&[0x62, 0x80, 0x00, 0x00, 0x00]).unwrap(),
            Term::Int(i64::from(i32::MIN))
        );
    }

    #[test]
    fn version_byte_is_transparent() {
        assert_eq!(decode_bytes(&[0x83, 0x61, 42]).unwrap(), Term::Int(42));
    }

    #[test]
    fn new_float() {
        let bytes = [0x46, 0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(decode_bytes(&bytes).unwrap(), Term::Float(1.0));
    }

    #[test]
    fn legacy_float() {
        let mut bytes = vec![0x63];
        let mut text = b"1.50000000000000000000e+00".to_vec();
        text.resize(31, 0);
        bytes.extend_from_slice(&text);
        assert_eq!(decode_bytes(&bytes).unwrap(), Term::Float(1.5));
    }

    #[test]
    fn legacy_float_rejects_non_finite_spellings() {
        for payload in ["inf", "-inf", "nan", "garbage"] {
            let mut bytes = vec![0x63];
            let mut text = payload.as_bytes().to_vec();
            text.resize(31, 0);
            bytes.extend_from_slice(&text);
            assert!(matches!(decode_bytes(&bytes), Err(CodecError::FloatScan)));
        }
    }

    #[test]
    fn atoms_and_booleans() {
        assert_eq!(decode_bytes(&[0x73, 2, b'o', b'k']).unwrap(), Term::Atom(Atom::from("ok")));
        assert_eq!(decode_bytes(&[0x77, 2, b'o', b'k']).unwrap(), Term::Atom(Atom::from("ok")));
        assert_eq!(
            decode_bytes(&[0x64, 0, 2, b'o', b'k']).unwrap(),
            Term::Atom(Atom::from("ok"))
        );
        assert_eq!(
            decode_bytes(&[0x76, 0, 2, b'o', b'k']).unwrap(),
            Term::Atom(Atom::from("ok"))
        );

        assert_eq!(
            decode_bytes(&[0x73, 4, b't', b'r', b'u', b'e']).unwrap(),
            Term::Bool(true)
        );
        assert_eq!(
            decode_bytes(&[0x64, 0, 5, b'f', b'a', b'l', b's', b'e']).unwrap(),
            Term::Bool(false)
        );
    }

    #[test]
    fn atom_rejects_invalid_utf8() {
        let result = decode_bytes(&[0x73, 2, 0xFF, 0xFE]);
        assert!(matches!(result, Err(CodecError::NonUtf8 { what: "atom" })));
    }

    #[test]
    fn binary() {
        assert_eq!(
            decode_bytes(&[0x6D, 0, 0, 0, 4, 1, 2, 3, 4]).unwrap(),
            Term::Binary(vec![1, 2, 3, 4].into())
        );
        assert_eq!(decode_bytes(&[0x6D, 0, 0, 0, 0]).unwrap(), Term::Binary(vec![].into()));
    }

    #[test]
    fn bit_binary_truncates_last_byte() {
        // 2 bytes, 3 trailing bits: last byte shifted right by 5.
        let bytes = [0x4D, 0, 0, 0, 2, 3, 0xAB, 0xE0];
        assert_eq!(decode_bytes(&bytes).unwrap(), Term::Binary(vec![0xAB, 0x07].into()));
    }

    #[test]
    fn bit_binary_zero_bits_does_not_panic() {
        let bytes = [0x4D, 0, 0, 0, 1, 0, 0xFF];
        assert_eq!(decode_bytes(&bytes).unwrap(), Term::Binary(vec![0].into()));
    }

    #[test]
    fn string() {
        assert_eq!(
            decode_bytes(&[0x6B, 0, 2, b'h', b'i']).unwrap(),
            Term::String("hi".to_string())
        );
    }

    #[test]
    fn big_integers() {
        // 1234605616436508552 = 0x1122334455667788, little-endian payload.
        let bytes = [0x6E, 8, 0, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11];
        assert_eq!(decode_bytes(&bytes).unwrap(), Term::Int(0x1122334455667788));

        let bytes = [0x6E, 1, 1, 5];
        assert_eq!(decode_bytes(&bytes).unwrap(), Term::Int(-5));

        // LARGE_BIG with the same payload shape.
        let bytes = [0x6F, 0, 0, 0, 1, 0, 7];
        assert_eq!(decode_bytes(&bytes).unwrap(), Term::Int(7));
    }

    #[test]
    fn tuples() {
        let bytes = [0x68, 2, 0x61, 1, 0x61, 2];
        assert_eq!(
            decode_bytes(&bytes).unwrap(),
            Term::Tuple(vec![Term::Int(1), Term::Int(2)])
        );

        let bytes = [0x69, 0, 0, 0, 1, 0x6A];
        assert_eq!(decode_bytes(&bytes).unwrap(), Term::Tuple(vec![Term::Nil]));

        assert_eq!(decode_bytes(&[0x68, 0]).unwrap(), Term::Tuple(vec![]));
    }

    #[test]
    fn proper_list() {
        let bytes = [0x6C, 0, 0, 0, 2, 0x61, 1, 0x61, 2, 0x6A];
        assert_eq!(
            decode_bytes(&bytes).unwrap(),
            Term::List(vec![Term::Int(1), Term::Int(2)])
        );
    }

    #[test]
    fn improper_list_preserves_tail() {
        let bytes = [0x6C, 0, 0, 0, 1, 0x61, 1, 0x61, 2];
        assert_eq!(
            decode_bytes(&bytes).unwrap(),
            Term::ImproperList {
                elements: vec![Term::Int(1)],
                tail: Box::new(Term::Int(2)),
            }
        );
    }

    #[test]
    fn nil_and_empty_list() {
        assert_eq!(decode_bytes(&[0x6A]).unwrap(), Term::Nil);
        // LIST of zero elements with a NIL tail is a proper empty list.
        assert_eq!(decode_bytes(&[0x6C, 0, 0, 0, 0, 0x6A]).unwrap(), Term::List(vec![]));
    }

    #[test]
    fn pid() {
        let mut bytes = vec![0x67, 0x73, 1, b'n'];
        bytes.extend_from_slice(&[0, 0, 0, 3]); // id
        bytes.extend_from_slice(&[0, 0, 0, 9]); // serial
        bytes.push(2); // creation
        assert_eq!(
            decode_bytes(&bytes).unwrap(),
            Term::Pid(Pid { node: Atom::from("n"), id: 3, serial: 9, creation: 2 })
        );
    }

    #[test]
    fn pid_node_must_be_atom() {
        let bytes = [0x67, 0x61, 1, 0, 0, 0, 3, 0, 0, 0, 9, 2];
        assert!(matches!(
            decode_bytes(&bytes),
            Err(CodecError::Mismatch { expected: "node atom", found: "integer" })
        ));
    }

    #[test]
    fn port() {
        let mut bytes = vec![0x66, 0x73, 1, b'n'];
        bytes.extend_from_slice(&[0, 0, 0, 5]);
        bytes.push(1);
        assert_eq!(
            decode_bytes(&bytes).unwrap(),
            Term::Port(Port { node: Atom::from("n"), id: 5, creation: 1 })
        );
    }

    #[test]
    fn legacy_reference_reads_one_creation_byte() {
        let mut bytes = vec![0x65, 0x73, 1, b'n'];
        bytes.extend_from_slice(&[0, 0, 0, 42]); // single id word
        bytes.push(3); // creation
        bytes.push(0x61); // trailing data that must not be consumed
        bytes.push(7);

        let ctx = Context::new();
        let mut decoder = ctx.decoder(bytes.as_slice());
        assert_eq!(
            decoder.decode().unwrap(),
            Term::Ref(Ref { node: Atom::from("n"), creation: 3, ids: vec![42] })
        );
        // The stream advanced exactly past the reference.
        assert_eq!(decoder.decode().unwrap(), Term::Int(7));
    }

    #[test]
    fn new_reference() {
        let mut bytes = vec![0x72, 0, 2, 0x73, 1, b'n', 4];
        bytes.extend_from_slice(&[0, 0, 0, 1]);
        bytes.extend_from_slice(&[0, 0, 0, 2]);
        assert_eq!(
            decode_bytes(&bytes).unwrap(),
            Term::Ref(Ref { node: Atom::from("n"), creation: 4, ids: vec![1, 2] })
        );
    }

    #[test]
    fn export() {
        let bytes = [0x71, 0x73, 1, b'm', 0x73, 1, b'f', 2];
        assert_eq!(
            decode_bytes(&bytes).unwrap(),
            Term::Export(Export {
                module: Atom::from("m"),
                function: Atom::from("f"),
                arity: 2
            })
        );
    }

    #[test]
    fn new_fun() {
        let mut bytes = vec![0x70];
        bytes.extend_from_slice(&[0, 0, 0, 0]); // size (redundant)
        bytes.push(2); // arity
        bytes.extend_from_slice(&[0xAA; 16]); // unique
        bytes.extend_from_slice(&[0, 0, 0, 7]); // index
        bytes.extend_from_slice(&[0, 0, 0, 1]); // free count
        bytes.extend_from_slice(&[0x73, 1, b'm']); // module
        bytes.extend_from_slice(&[0x61, 4]); // old index
        bytes.extend_from_slice(&[0x61, 9]); // old unique
        bytes.extend_from_slice(&[0x67, 0x73, 1, b'n', 0, 0, 0, 1, 0, 0, 0, 2, 0]); // pid
        bytes.extend_from_slice(&[0x61, 11]); // free var

        let term = decode_bytes(&bytes).unwrap();
        let Term::Function(fun) = term else {
            panic!("expected a function, got {term:?}");
        };
        assert_eq!(fun.arity, 2);
        assert_eq!(fun.unique, [0xAA; 16]);
        assert_eq!(fun.index, 7);
        assert_eq!(fun.free, 1);
        assert_eq!(fun.module, Atom::from("m"));
        assert_eq!(fun.old_index, 4);
        assert_eq!(fun.old_unique, 9);
        assert_eq!(fun.pid.node, Atom::from("n"));
        assert_eq!(fun.free_vars, vec![Term::Int(11)]);
    }

    #[test]
    fn legacy_fun() {
        let mut bytes = vec![0x75];
        bytes.extend_from_slice(&[0, 0, 0, 1]); // free count
        bytes.extend_from_slice(&[0x67, 0x73, 1, b'n', 0, 0, 0, 1, 0, 0, 0, 2, 0]); // pid
        bytes.extend_from_slice(&[0x73, 1, b'm']); // module
        bytes.extend_from_slice(&[0x61, 4]); // old index
        bytes.extend_from_slice(&[0x61, 9]); // old unique
        bytes.extend_from_slice(&[0x6A]); // free var: nil

        let term = decode_bytes(&bytes).unwrap();
        let Term::Function(fun) = term else {
            panic!("expected a function, got {term:?}");
        };
        assert_eq!(fun.arity, 0);
        assert_eq!(fun.unique, [0; 16]);
        assert_eq!(fun.free, 1);
        assert_eq!(fun.free_vars, vec![Term::Nil]);
    }

    #[test]
    fn cache_reference() {
        let mut ctx = Context::new();
        ctx.cache_mut().install(12, Atom::from("cached"));
        ctx.cache_mut().set_current(5, 12);

        let mut decoder = ctx.decoder(&[0x52, 5][..]);
        assert_eq!(decoder.decode().unwrap(), Term::Atom(Atom::from("cached")));

        let mut decoder = ctx.decoder(&[0x52, 6][..]);
        assert!(matches!(decoder.decode(), Err(CodecError::UncachedAtom { index: 6 })));
    }

    #[test]
    fn unknown_tags() {
        for tag in [0x00, 0x10, 0x74, 0xFF] {
            assert!(matches!(
                decode_bytes(&[tag]),
                Err(CodecError::UnknownTerm { tag: t }) if t == tag
            ));
        }
        // NEW_CACHE is catalogued but has no term-position payload here.
        assert!(matches!(decode_bytes(&[0x4E]), Err(CodecError::UnknownTerm { tag: 0x4E })));
    }

    #[test]
    fn truncated_inputs_fail_with_eof() {
        let cases: &[&[u8]] = &[
            &[],
            &[0x61],
            &[0x62, 0, 0],
            &[0x6D, 0, 0, 0, 10, 1, 2],
            &[0x68, 2, 0x61, 1],
            &[0x6B, 0, 4, b'h'],
        ];
        for bytes in cases {
            match decode_bytes(bytes) {
                Err(CodecError::Io(err)) => {
                    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof, "input {bytes:?}");
                }
                other => panic!("expected eof for {bytes:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn hostile_length_prefix_fails_without_huge_allocation() {
        // Claims a 4 GiB binary but carries 2 bytes.
        let result = decode_bytes(&[0x6D, 0xFF, 0xFF, 0xFF, 0xFF, 1, 2]);
        assert!(matches!(result, Err(CodecError::Io(_))));
    }

    #[test]
    fn stream_decodes_back_to_back_terms() {
        let bytes = [0x61, 42, 0x6A, 0x61, 100];
        let ctx = Context::new();
        let mut decoder = ctx.decoder(&bytes[..]);
        assert_eq!(decoder.decode().unwrap(), Term::Int(42));
        assert_eq!(decoder.decode().unwrap(), Term::Nil);
        assert_eq!(decoder.decode().unwrap(), Term::Int(100));
    }
}
