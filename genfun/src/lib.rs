//! Multiple-dispatch method resolution over a class inheritance graph.
//!
//! `genfun` implements the resolution half of a CLOS-style generic function
//! system: a class hierarchy with multiple inheritance, generics with
//! methods keyed by argument-type signatures, and a dispatcher that picks
//! the implementation whose signature is closest to the call's concrete
//! classes, measured by shortest-path distance in the inheritance graph.
//!
//! The engine never invokes implementations. Method payloads are opaque to
//! it (the [`Registry`] is generic over them), so it composes with whatever
//! object representation and call convention the embedder uses.
//!
//! # Example
//!
//! ```
//! use genfun::{Arg, Param, Registry};
//!
//! let mut reg = Registry::new();
//! reg.register_class("C", &[])?;
//! reg.register_class("B", &["C"])?;
//! reg.register_class("A", &["B"])?;
//!
//! reg.define_generic("describe", 2)?;
//! reg.define_method("describe", &[Param::Class("C"), Param::Class("C")], "c-c")?;
//! reg.define_method("describe", &[Param::Class("A"), Param::Class("B")], "a-b")?;
//!
//! // Exact match.
//! let hit = reg.resolve("describe", &[Arg::Class("A"), Arg::Class("B")])?;
//! assert_eq!(hit.entry.payload, "a-b");
//!
//! // Nearest-ancestor match: (B, C) is one edge from (C, C).
//! let hit = reg.resolve("describe", &[Arg::Class("B"), Arg::Class("C")])?;
//! assert_eq!(hit.entry.payload, "c-c");
//! # Ok::<(), genfun::Error>(())
//! ```
//!
//! # Dispatch rule
//!
//! An exact signature match wins outright. Otherwise every registered
//! signature is scored per position: graph distance for a class position
//! (the signature class must be the argument's class or an ancestor of it),
//! a worse-than-any-class sentinel for `ANY`, and 0 for `MISSING` against
//! an absent argument. The minimum summed distance wins; ties are resolved
//! deterministically (lexicographically first signature rendering) and
//! reported through a `tracing` warning plus the returned
//! [`Resolution::ambiguity`] field.
//!
//! # Concurrency
//!
//! Registration takes `&mut Registry`; resolution and all other reads take
//! `&Registry` and perform no interior mutation, so a populated registry
//! can be shared freely across threads.

mod dispatch;
mod distance;
mod error;
mod graph;
mod registry;
mod signature;
mod table;

pub use dispatch::{Ambiguity, Resolution};
pub use distance::Distance;
pub use error::{Error, Result};
pub use graph::{ClassGraph, ClassId, ClassNode};
pub use registry::{Generic, Registry};
pub use signature::{Arg, CallArg, CallSignature, Param, SigClass, Signature};
pub use table::{MethodEntry, MethodTable};
