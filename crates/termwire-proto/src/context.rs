//! Shared codec context and the atom cache table.
//!
//! A [`Context`] is the process-wide collaborator every decoder and
//! encoder references. It owns the atom cache used by the distribution
//! protocol's ATOM_CACHE_REF tag: a fixed table of cache slots plus a
//! byte-indexed "current cache" view into them.
//!
//! The codec only ever *reads* the cache ([`AtomCache::current`]).
//! Installing atoms and rotating the current view is the job of an outer
//! distribution-protocol layer, which also owns the concurrency policy:
//! no lock is provided here, so a context may be shared across codec
//! instances only if that layer serializes cache mutation against reads.

use std::io::{Read, Write};

use crate::{reader::Decoder, term::Atom, writer::Encoder};

/// Number of slots in the atom cache table.
pub const CACHE_SLOTS: usize = 2048;

/// Number of entries in the current-cache view (one per `u8` index).
pub const CACHE_VIEW: usize = 256;

/// Atom cache table with a `u8`-indexed current view.
///
/// # Invariants
///
/// - The slot table has exactly [`CACHE_SLOTS`] entries; the view has
///   exactly [`CACHE_VIEW`] entries.
/// - A view entry either is unoccupied or points at an occupied slot;
///   [`AtomCache::current`] returns `None` for both unoccupied cases.
#[derive(Debug)]
pub struct AtomCache {
    slots: Box<[Option<Atom>]>,
    current: Box<[Option<u16>]>,
}

impl Default for AtomCache {
    fn default() -> Self {
        Self {
            slots: vec![None; CACHE_SLOTS].into_boxed_slice(),
            current: vec![None; CACHE_VIEW].into_boxed_slice(),
        }
    }
}

impl AtomCache {
    /// Install an atom into a cache slot.
    ///
    /// Returns `false` (and installs nothing) if `slot` is outside the
    /// table. This is the write-side hook for the distribution layer; the
    /// codec itself never calls it.
    pub fn install(&mut self, slot: u16, atom: Atom) -> bool {
        match self.slots.get_mut(slot as usize) {
            Some(entry) => {
                *entry = Some(atom);
                true
            }
            None => false,
        }
    }

    /// Point a current-cache view entry at a slot.
    ///
    /// Returns `false` if `slot` is outside the table.
    pub fn set_current(&mut self, index: u8, slot: u16) -> bool {
        if (slot as usize) < CACHE_SLOTS {
            self.current[index as usize] = Some(slot);
            true
        } else {
            false
        }
    }

    /// Resolve a wire cache reference through the current view.
    ///
    /// Returns `None` when the view entry or the slot it points at is
    /// unoccupied; the decoder turns that into
    /// [`CodecError::UncachedAtom`](crate::CodecError::UncachedAtom).
    #[must_use]
    pub fn current(&self, index: u8) -> Option<&Atom> {
        let slot = self.current[index as usize]?;
        self.slots[slot as usize].as_ref()
    }
}

/// Process-wide codec context.
///
/// Holds state that carries between reads and writes, currently the atom
/// cache. Decoders and encoders borrow the context for their lifetime, so
/// the read-only discipline is enforced by the type system: codec paths
/// hold `&Context` and can never mutate the cache.
#[derive(Debug, Default)]
pub struct Context {
    cache: AtomCache,
}

impl Context {
    /// Create a context with an empty atom cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the atom cache.
    #[must_use]
    pub fn cache(&self) -> &AtomCache {
        &self.cache
    }

    /// Mutable cache access for the distribution layer's install hooks.
    pub fn cache_mut(&mut self) -> &mut AtomCache {
        &mut self.cache
    }

    /// Create a decoder reading terms from `reader`.
    ///
    /// The stream is consumed exactly term-by-term; buffering is the
    /// caller's concern (wrap in [`std::io::BufReader`] for byte sources
    /// with expensive reads).
    pub fn decoder<R: Read>(&self, reader: R) -> Decoder<'_, R> {
        Decoder::new(self, reader)
    }

    /// Create an encoder writing terms to `writer`.
    pub fn encoder<W: Write>(&self, writer: W) -> Encoder<'_, W> {
        Encoder::new(self, writer)
    }
}
