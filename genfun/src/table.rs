//! Per-generic method storage.
//!
//! A method table maps signatures to entries. Insertion overwrites on exact
//! signature equality (last write wins, never an error), and iteration is in
//! insertion order so the inexact dispatch scan is deterministic. No
//! distance computation happens at registration time.

use indexmap::IndexMap;

use crate::signature::Signature;

/// A registered method: its signature plus the opaque implementation payload.
///
/// The engine never invokes the payload; it only selects and returns it, so
/// the table is generic over what an implementation is (a closure, a
/// function id, a string label in tests).
#[derive(Debug, Clone)]
pub struct MethodEntry<T> {
    pub signature: Signature,
    pub payload: T,
}

/// The signature-keyed method store of one generic function.
#[derive(Debug)]
pub struct MethodTable<T> {
    entries: IndexMap<Signature, MethodEntry<T>>,
}

impl<T> MethodTable<T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register a method. An identical signature replaces the prior entry.
    pub fn insert(&mut self, signature: Signature, payload: T) {
        self.entries.insert(
            signature.clone(),
            MethodEntry { signature, payload },
        );
    }

    /// Direct equality lookup; the dispatch fast path.
    pub fn exact(&self, key: &Signature) -> Option<&MethodEntry<T>> {
        self.entries.get(key)
    }

    /// All entries in insertion order, for the full-table dispatch scan.
    pub fn entries(&self) -> impl Iterator<Item = &MethodEntry<T>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for MethodTable<T> {
    fn default() -> Self {
        Self::new()
    }
}
