//! The process-wide catalog of classes and generic functions.
//!
//! A [`Registry`] owns the class graph and every generic's method table. It
//! starts empty and is populated only by explicit registration calls; there
//! is no deletion. Writes take `&mut self`, so the single-writer discipline
//! required during registration is enforced by the borrow checker rather
//! than by a lock. Reads ([`Registry::resolve`], [`Registry::distance`],
//! introspection) take `&self`, touch no interior mutability, and are safe
//! to run concurrently once registration has quiesced; embedders that need
//! concurrent writers can wrap the registry in `std::sync::RwLock`.

use indexmap::IndexMap;

use crate::dispatch::{self, Resolution};
use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::graph::{ClassGraph, ClassId};
use crate::signature::{Arg, CallArg, CallSignature, Param, SigClass, Signature};
use crate::table::{MethodEntry, MethodTable};

/// A generic function: a unique name, a fixed dispatch arity, and the
/// methods registered under it.
#[derive(Debug)]
pub struct Generic<T> {
    name: String,
    arity: usize,
    table: MethodTable<T>,
}

impl<T> Generic<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn method_count(&self) -> usize {
        self.table.len()
    }
}

/// The registry: class graph plus generic catalog.
///
/// Generic over the opaque implementation payload `T`; the engine selects
/// payloads but never invokes them.
#[derive(Debug)]
pub struct Registry<T> {
    graph: ClassGraph,
    generics: IndexMap<String, Generic<T>>,
}

impl<T> Registry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            graph: ClassGraph::new(),
            generics: IndexMap::new(),
        }
    }

    /// The underlying class graph, for distance queries and introspection.
    pub fn graph(&self) -> &ClassGraph {
        &self.graph
    }

    /// Register (or redefine) a class. See [`ClassGraph::register`].
    pub fn register_class(&mut self, name: &str, parents: &[&str]) -> Result<ClassId> {
        self.graph.register(name, parents)
    }

    /// Define a generic function with the given dispatch arity.
    ///
    /// Redefining with the identical arity is idempotent; a different arity
    /// is `DuplicateGeneric`.
    pub fn define_generic(&mut self, name: &str, arity: usize) -> Result<()> {
        if let Some(existing) = self.generics.get(name) {
            if existing.arity == arity {
                return Ok(());
            }
            return Err(Error::DuplicateGeneric {
                name: name.to_string(),
                existing_arity: existing.arity,
                arity,
            });
        }
        self.generics.insert(
            name.to_string(),
            Generic {
                name: name.to_string(),
                arity,
                table: MethodTable::new(),
            },
        );
        Ok(())
    }

    /// Register a method on a generic. An identical signature replaces the
    /// prior entry (last write wins). The signature length must equal the
    /// generic's arity, and every named class must be registered.
    pub fn define_method(&mut self, generic: &str, params: &[Param<'_>], payload: T) -> Result<()> {
        let arity = match self.generics.get(generic) {
            Some(g) => g.arity,
            None => {
                return Err(Error::UnknownGeneric {
                    name: generic.to_string(),
                })
            }
        };
        if params.len() != arity {
            return Err(Error::ArityMismatch {
                generic: generic.to_string(),
                expected: arity,
                found: params.len(),
            });
        }
        let signature = self.resolve_params(params)?;

        // All validation done; the insert cannot fail.
        let table = &mut self
            .generics
            .get_mut(generic)
            .expect("generic existence checked above")
            .table;
        table.insert(signature, payload);
        Ok(())
    }

    /// Resolve a call to exactly one method entry.
    ///
    /// Pure read: emits a warning diagnostic on ambiguous dispatch but
    /// mutates nothing, so identical inputs always produce identical
    /// results.
    pub fn resolve(&self, generic: &str, args: &[Arg<'_>]) -> Result<Resolution<'_, T>> {
        let (g, call) = self.resolve_call_input(generic, args)?;
        dispatch::resolve_call(&self.graph, &g.name, &g.table, &call)
    }

    /// Every method applicable to a call, with its total distance, most
    /// specific first. Empty when nothing applies.
    pub fn applicable_methods(
        &self,
        generic: &str,
        args: &[Arg<'_>],
    ) -> Result<Vec<(u64, &MethodEntry<T>)>> {
        let (g, call) = self.resolve_call_input(generic, args)?;
        Ok(dispatch::applicable_methods(&self.graph, &g.table, &call))
    }

    /// Shortest directed ancestor distance between two classes, by name.
    pub fn distance(&self, from: &str, to: &str) -> Result<Distance> {
        let from = self.class_id_or_err(from)?;
        let to = self.class_id_or_err(to)?;
        Ok(self.graph.distance(from, to))
    }

    /// All defined generics, in definition order.
    pub fn generics(&self) -> impl Iterator<Item = &Generic<T>> {
        self.generics.values()
    }

    /// The methods registered on a generic, in registration order.
    pub fn methods_of(&self, generic: &str) -> Result<impl Iterator<Item = &MethodEntry<T>>> {
        match self.generics.get(generic) {
            Some(g) => Ok(g.table.entries()),
            None => Err(Error::UnknownGeneric {
                name: generic.to_string(),
            }),
        }
    }

    fn class_id_or_err(&self, name: &str) -> Result<ClassId> {
        self.graph.class_id(name).ok_or_else(|| Error::UnknownClass {
            name: name.to_string(),
        })
    }

    fn resolve_params(&self, params: &[Param<'_>]) -> Result<Signature> {
        let mut positions = Vec::with_capacity(params.len());
        for param in params {
            positions.push(match param {
                Param::Class(name) => SigClass::Class(self.class_id_or_err(name)?),
                Param::Any => SigClass::Any,
                Param::Missing => SigClass::Missing,
            });
        }
        Ok(Signature(positions))
    }

    fn resolve_call_input(
        &self,
        generic: &str,
        args: &[Arg<'_>],
    ) -> Result<(&Generic<T>, CallSignature)> {
        let g = self
            .generics
            .get(generic)
            .ok_or_else(|| Error::UnknownGeneric {
                name: generic.to_string(),
            })?;
        if args.len() != g.arity {
            return Err(Error::ArityMismatch {
                generic: generic.to_string(),
                expected: g.arity,
                found: args.len(),
            });
        }
        let mut call = Vec::with_capacity(args.len());
        for arg in args {
            call.push(match arg {
                Arg::Class(name) => CallArg::Class(self.class_id_or_err(name)?),
                Arg::Absent => CallArg::Absent,
            });
        }
        Ok((g, CallSignature(call)))
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}
