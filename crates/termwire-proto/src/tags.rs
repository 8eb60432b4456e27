//! Tag catalog for the Erlang external term format.
//!
//! Every term on the wire starts with a single tag byte that selects its
//! payload shape. The set of tags is closed: anything outside this
//! enumeration is rejected during decode with
//! [`CodecError::UnknownTerm`](crate::CodecError::UnknownTerm).
//!
//! # Representation
//!
//! Tags are serialized as single bytes. The `#[repr(u8)]` ensures stable
//! numeric values for wire compatibility; the values themselves are fixed
//! by the Erlang/OTP external term format and can never change.

use serde_repr::{Deserialize_repr, Serialize_repr};

/// Format-version byte that prefixes a complete framed term (131, `0x83`).
///
/// The decoder consumes it transparently when it appears in tag position;
/// the encoder emits it once at the start of
/// [`Encoder::encode`](crate::Encoder::encode).
pub const VERSION: u8 = 131;

/// Term tags of the external term format.
///
/// Each tag identifies one on-wire payload shape. The decoder dispatches on
/// the tag byte; the encoder selects the narrowest tag that can represent a
/// value (e.g. an integer in `0..=255` becomes [`Tag::SmallInteger`], not
/// [`Tag::Integer`]).
///
/// # Security
///
/// - **Unknown Tags**: [`Tag::from_u8`] returns `None` for unknown values
///   rather than panicking. Terms with unknown tags are rejected with
///   [`CodecError::UnknownTerm`](crate::CodecError::UnknownTerm).
///
/// - **No Implicit Behavior**: every tag must be explicitly handled in the
///   decoder. There is no "default" payload shape for unrecognized bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Tag {
    /// 8-byte IEEE 754 float, big-endian bits (`F`)
    NewFloat = 0x46,
    /// Binary with a trailing partial byte (`M`)
    BitBinary = 0x4D,
    /// Atom-cache installation, distribution layer only (`N`)
    NewCache = 0x4E,
    /// Reference into the atom cache table (`R`)
    AtomCacheRef = 0x52,
    /// Unsigned 8-bit integer (`a`)
    SmallInteger = 0x61,
    /// Signed 32-bit integer, big-endian (`b`)
    Integer = 0x62,
    /// Legacy 31-byte ASCII decimal float (`c`)
    Float = 0x63,
    /// Latin-1 atom, 16-bit length (`d`)
    Atom = 0x64,
    /// Legacy single-id reference (`e`)
    Reference = 0x65,
    /// Port identifier (`f`)
    Port = 0x66,
    /// Process identifier (`g`)
    Pid = 0x67,
    /// Tuple with 8-bit arity (`h`)
    SmallTuple = 0x68,
    /// Tuple with 32-bit arity (`i`)
    LargeTuple = 0x69,
    /// The empty list (`j`)
    Nil = 0x6A,
    /// Byte string, 16-bit length (`k`)
    String = 0x6B,
    /// List with explicit tail term (`l`)
    List = 0x6C,
    /// Byte sequence, 32-bit length (`m`)
    Binary = 0x6D,
    /// Big integer, 8-bit magnitude length (`n`)
    SmallBig = 0x6E,
    /// Big integer, 32-bit magnitude length (`o`)
    LargeBig = 0x6F,
    /// Function closure, current layout (`p`)
    NewFun = 0x70,
    /// Exported function `module:function/arity` (`q`)
    Export = 0x71,
    /// Reference with multi-word id (`r`)
    NewReference = 0x72,
    /// Latin-1 atom, 8-bit length (`s`)
    SmallAtom = 0x73,
    /// Function closure, legacy layout (`u`)
    Fun = 0x75,
    /// UTF-8 atom, 16-bit length (`v`)
    AtomUtf8 = 0x76,
    /// UTF-8 atom, 8-bit length (`w`)
    SmallAtomUtf8 = 0x77,
}

impl Tag {
    /// Convert to the raw tag byte.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Convert from a raw tag byte.
    ///
    /// Returns `None` if the byte doesn't correspond to a known tag. This
    /// function is total and infallible; callers decide how to reject
    /// unknown bytes.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x46 => Some(Self::NewFloat),
            0x4D => Some(Self::BitBinary),
            0x4E => Some(Self::NewCache),
            0x52 => Some(Self::AtomCacheRef),
            0x61 => Some(Self::SmallInteger),
            0x62 => Some(Self::Integer),
            0x63 => Some(Self::Float),
            0x64 => Some(Self::Atom),
            0x65 => Some(Self::Reference),
            0x66 => Some(Self::Port),
            0x67 => Some(Self::Pid),
            0x68 => Some(Self::SmallTuple),
            0x69 => Some(Self::LargeTuple),
            0x6A => Some(Self::Nil),
            0x6B => Some(Self::String),
            0x6C => Some(Self::List),
            0x6D => Some(Self::Binary),
            0x6E => Some(Self::SmallBig),
            0x6F => Some(Self::LargeBig),
            0x70 => Some(Self::NewFun),
            0x71 => Some(Self::Export),
            0x72 => Some(Self::NewReference),
            0x73 => Some(Self::SmallAtom),
            0x75 => Some(Self::Fun),
            0x76 => Some(Self::AtomUtf8),
            0x77 => Some(Self::SmallAtomUtf8),
            _ => None,
        }
    }

    /// Human-readable wire name for diagnostics (`SMALL_INTEGER_EXT` etc.).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NewFloat => "NEW_FLOAT_EXT",
            Self::BitBinary => "BIT_BINARY_EXT",
            Self::NewCache => "NEW_CACHE_EXT",
            Self::AtomCacheRef => "ATOM_CACHE_REF",
            Self::SmallInteger => "SMALL_INTEGER_EXT",
            Self::Integer => "INTEGER_EXT",
            Self::Float => "FLOAT_EXT",
            Self::Atom => "ATOM_EXT",
            Self::Reference => "REFERENCE_EXT",
            Self::Port => "PORT_EXT",
            Self::Pid => "PID_EXT",
            Self::SmallTuple => "SMALL_TUPLE_EXT",
            Self::LargeTuple => "LARGE_TUPLE_EXT",
            Self::Nil => "NIL_EXT",
            Self::String => "STRING_EXT",
            Self::List => "LIST_EXT",
            Self::Binary => "BINARY_EXT",
            Self::SmallBig => "SMALL_BIG_EXT",
            Self::LargeBig => "LARGE_BIG_EXT",
            Self::NewFun => "NEW_FUN_EXT",
            Self::Export => "EXPORT_EXT",
            Self::NewReference => "NEW_REFERENCE_EXT",
            Self::SmallAtom => "SMALL_ATOM_EXT",
            Self::Fun => "FUN_EXT",
            Self::AtomUtf8 => "ATOM_UTF8_EXT",
            Self::SmallAtomUtf8 => "SMALL_ATOM_UTF8_EXT",
        }
    }
}
