//! Term encoder: tag selection and emission.
//!
//! The encoder always picks the narrowest tag that can represent a value:
//! an integer in `0..=255` becomes SMALL_INTEGER, one in the signed
//! 32-bit range becomes INTEGER, and anything wider goes through the
//! big-integer lane. The same policy applies to atoms (SMALL_ATOM before
//! ATOM) and big-integer magnitudes (SMALL_BIG before LARGE_BIG).
//!
//! Hard size caps are enforced at the encode boundary: atoms and strings
//! over 65535 bytes and binaries or magnitudes over the 32-bit length
//! field are rejected with their distinct error kinds before any partial
//! payload reaches the sink.

use std::io::Write;

use num_bigint::BigInt;

use crate::{
    bigint,
    context::Context,
    errors::{CodecError, Result},
    tags::{Tag, VERSION},
    term::{Export, Pid, Port, Ref, Term},
};

/// Maximum atom length in bytes (16-bit length field).
pub const MAX_ATOM: usize = u16::MAX as usize;

/// Maximum atom length encodable with the one-byte SMALL_ATOM header.
pub const MAX_SMALL_ATOM: usize = u8::MAX as usize;

/// Maximum string length in bytes (16-bit length field).
pub const MAX_STRING: usize = u16::MAX as usize;

/// Streaming term encoder.
///
/// Created via [`Context::encoder`]. Encoding borrows the input term;
/// nothing is retained between calls.
#[derive(Debug)]
pub struct Encoder<'c, W> {
    #[allow(dead_code)] // parity with the decoder; the cache is read-side only
    ctx: &'c Context,
    writer: W,
}

impl<'c, W: Write> Encoder<'c, W> {
    pub(crate) fn new(ctx: &'c Context, writer: W) -> Self {
        Self { ctx, writer }
    }

    /// Write a complete framed term: the format-version byte followed by
    /// the term's encoding.
    ///
    /// # Errors
    ///
    /// See [`Encoder::encode_term`]; sink I/O errors pass through
    /// verbatim.
    pub fn encode(&mut self, term: &Term) -> Result<()> {
        self.writer.write_all(&[VERSION])?;
        self.encode_term(term)
    }

    /// Write one term without the version byte (for nested children or
    /// caller-managed framing).
    ///
    /// # Errors
    ///
    /// - [`CodecError::AtomTooBig`] / [`CodecError::StringTooBig`] /
    ///   [`CodecError::BinaryTooBig`] / [`CodecError::BigIntTooBig`] when
    ///   a value exceeds its wire size cap.
    /// - [`CodecError::UnsupportedTerm`] for terms with no wire mapping
    ///   from this API (function closures).
    pub fn encode_term(&mut self, term: &Term) -> Result<()> {
        match term {
            Term::Bool(value) => self.write_bool(*value),
            Term::Int(value) => self.write_int(*value),
            Term::BigInt(value) => self.write_big(value),
            Term::Float(value) => self.write_float(*value),
            Term::Atom(atom) => self.write_atom(atom.as_str()),
            Term::String(text) => self.write_string(text),
            Term::Binary(bytes) => self.write_binary(bytes),
            Term::Tuple(elements) => {
                self.write_tuple_header(elements.len())?;
                for element in elements {
                    self.encode_term(element)?;
                }
                Ok(())
            }
            Term::List(elements) => {
                self.write_list_header(elements.len())?;
                for element in elements {
                    self.encode_term(element)?;
                }
                self.writer.write_all(&[Tag::Nil.to_u8()])?;
                Ok(())
            }
            Term::ImproperList { elements, tail } => {
                self.write_list_header(elements.len())?;
                for element in elements {
                    self.encode_term(element)?;
                }
                self.encode_term(tail)
            }
            Term::Nil => {
                self.writer.write_all(&[Tag::Nil.to_u8()])?;
                Ok(())
            }
            Term::Pid(pid) => self.write_pid(pid),
            Term::Port(port) => self.write_port(port),
            Term::Ref(reference) => self.write_ref(reference),
            Term::Export(export) => self.write_export(export),
            Term::Function(_) => Err(CodecError::UnsupportedTerm { kind: "function" }),
        }
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        if value {
            self.writer.write_all(&[Tag::SmallAtom.to_u8(), 4, b't', b'r', b'u', b'e'])?;
        } else {
            self.writer.write_all(&[Tag::SmallAtom.to_u8(), 5, b'f', b'a', b'l', b's', b'e'])?;
        }
        Ok(())
    }

    fn write_int(&mut self, value: i64) -> Result<()> {
        if (0..=255).contains(&value) {
            self.writer.write_all(&[Tag::SmallInteger.to_u8(), value as u8])?;
            Ok(())
        } else if let Ok(narrow) = i32::try_from(value) {
            let mut buf = [0u8; 5];
            buf[0] = Tag::Integer.to_u8();
            buf[1..].copy_from_slice(&narrow.to_be_bytes());
            self.writer.write_all(&buf)?;
            Ok(())
        } else {
            self.write_big(&BigInt::from(value))
        }
    }

    fn write_big(&mut self, value: &BigInt) -> Result<()> {
        let (sign, magnitude) = bigint::to_wire(value);

        let len = magnitude.len();
        if len <= MAX_SMALL_ATOM {
            self.writer.write_all(&[Tag::SmallBig.to_u8(), len as u8, sign])?;
        } else if let Ok(wide) = u32::try_from(len) {
            let mut header = [0u8; 6];
            header[0] = Tag::LargeBig.to_u8();
            header[1..5].copy_from_slice(&wide.to_be_bytes());
            header[5] = sign;
            self.writer.write_all(&header)?;
        } else {
            return Err(CodecError::BigIntTooBig { size: len });
        }

        self.writer.write_all(&magnitude)?;
        Ok(())
    }

    fn write_float(&mut self, value: f64) -> Result<()> {
        let mut buf = [0u8; 9];
        buf[0] = Tag::NewFloat.to_u8();
        buf[1..].copy_from_slice(&value.to_bits().to_be_bytes());
        self.writer.write_all(&buf)?;
        Ok(())
    }

    fn write_atom(&mut self, name: &str) -> Result<()> {
        let size = name.len();
        if size <= MAX_SMALL_ATOM {
            self.writer.write_all(&[Tag::SmallAtom.to_u8(), size as u8])?;
        } else if size <= MAX_ATOM {
            let mut header = [0u8; 3];
            header[0] = Tag::Atom.to_u8();
            header[1..].copy_from_slice(&(size as u16).to_be_bytes());
            self.writer.write_all(&header)?;
        } else {
            return Err(CodecError::AtomTooBig { size });
        }

        self.writer.write_all(name.as_bytes())?;
        Ok(())
    }

    fn write_string(&mut self, text: &str) -> Result<()> {
        let size = text.len();
        if size > MAX_STRING {
            return Err(CodecError::StringTooBig { size });
        }

        let mut header = [0u8; 3];
        header[0] = Tag::String.to_u8();
        header[1..].copy_from_slice(&(size as u16).to_be_bytes());
        self.writer.write_all(&header)?;
        self.writer.write_all(text.as_bytes())?;
        Ok(())
    }

    fn write_binary(&mut self, bytes: &[u8]) -> Result<()> {
        let Ok(size) = u32::try_from(bytes.len()) else {
            return Err(CodecError::BinaryTooBig { size: bytes.len() });
        };

        let mut header = [0u8; 5];
        header[0] = Tag::Binary.to_u8();
        header[1..].copy_from_slice(&size.to_be_bytes());
        self.writer.write_all(&header)?;
        self.writer.write_all(bytes)?;
        Ok(())
    }

    fn write_tuple_header(&mut self, arity: usize) -> Result<()> {
        if arity <= u8::MAX as usize {
            self.writer.write_all(&[Tag::SmallTuple.to_u8(), arity as u8])?;
        } else {
            let mut header = [0u8; 5];
            header[0] = Tag::LargeTuple.to_u8();
            header[1..].copy_from_slice(&(arity as u32).to_be_bytes());
            self.writer.write_all(&header)?;
        }
        Ok(())
    }

    fn write_list_header(&mut self, len: usize) -> Result<()> {
        let mut header = [0u8; 5];
        header[0] = Tag::List.to_u8();
        header[1..].copy_from_slice(&(len as u32).to_be_bytes());
        self.writer.write_all(&header)?;
        Ok(())
    }

    fn write_pid(&mut self, pid: &Pid) -> Result<()> {
        self.writer.write_all(&[Tag::Pid.to_u8()])?;
        self.write_atom(pid.node.as_str())?;

        // Old peers expect 15-bit process ids; the high half of the id
        // field is always written as zero.
        let mut buf = [0u8; 9];
        buf[2] = (pid.id >> 8) as u8;
        buf[3] = pid.id as u8;
        buf[4..8].copy_from_slice(&pid.serial.to_be_bytes());
        buf[8] = pid.creation;
        self.writer.write_all(&buf)?;
        Ok(())
    }

    fn write_port(&mut self, port: &Port) -> Result<()> {
        self.writer.write_all(&[Tag::Port.to_u8()])?;
        self.write_atom(port.node.as_str())?;
        self.writer.write_all(&port.id.to_be_bytes())?;
        self.writer.write_all(&[port.creation])?;
        Ok(())
    }

    fn write_ref(&mut self, reference: &Ref) -> Result<()> {
        let Ok(count) = u16::try_from(reference.ids.len()) else {
            return Err(CodecError::UnsupportedTerm {
                kind: "reference with more than 65535 id words",
            });
        };

        self.writer.write_all(&[Tag::NewReference.to_u8()])?;
        self.writer.write_all(&count.to_be_bytes())?;
        self.write_atom(reference.node.as_str())?;
        self.writer.write_all(&[reference.creation])?;
        for id in &reference.ids {
            self.writer.write_all(&id.to_be_bytes())?;
        }
        Ok(())
    }

    fn write_export(&mut self, export: &Export) -> Result<()> {
        self.writer.write_all(&[Tag::Export.to_u8()])?;
        self.write_atom(export.module.as_str())?;
        self.write_atom(export.function.as_str())?;
        self.writer.write_all(&[export.arity])?;
        Ok(())
    }
}
