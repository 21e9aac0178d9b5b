//! Method signatures and call signatures.
//!
//! The public API speaks in class *names* ([`Param`] and [`Arg`]); the
//! registry resolves those to [`ClassId`]s once, at definition or call time,
//! and everything past that point works on the id-based [`Signature`] and
//! [`CallSignature`] forms.
//!
//! A signature position is a class, the wildcard `ANY` (matches any present
//! argument, always worse than any class match), or `MISSING` (matches only
//! an absent argument). A call position is a concrete class or absent.

use crate::graph::{ClassGraph, ClassId};

/// A signature position as written by the caller, by class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param<'a> {
    /// A specific class; matches that class or any of its descendants.
    Class(&'a str),
    /// Matches any present argument, at a distance worse than every class
    /// match.
    Any,
    /// Matches only an absent argument.
    Missing,
}

/// A call position as supplied by the caller, by class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arg<'a> {
    /// The concrete runtime class of the argument.
    Class(&'a str),
    /// The argument was not supplied.
    Absent,
}

/// A resolved signature position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SigClass {
    Class(ClassId),
    Any,
    Missing,
}

/// An ordered, id-resolved method signature: the key of a method table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(pub Vec<SigClass>);

impl Signature {
    /// Number of dispatched positions.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// Stable string rendering, e.g. `(A, B)`, `(C, ANY)`, `(MISSING)`.
    ///
    /// This rendering is what ambiguity diagnostics print and what the
    /// deterministic lexicographic tie-break compares.
    pub fn render(&self, graph: &ClassGraph) -> String {
        let parts: Vec<&str> = self
            .0
            .iter()
            .map(|pos| match pos {
                SigClass::Class(id) => graph.class_name(*id).unwrap_or("?"),
                SigClass::Any => "ANY",
                SigClass::Missing => "MISSING",
            })
            .collect();
        format!("({})", parts.join(", "))
    }
}

/// A resolved call position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallArg {
    Class(ClassId),
    Absent,
}

/// The ordered, id-resolved runtime input to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSignature(pub Vec<CallArg>);

impl CallSignature {
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    /// The signature a call matches exactly: each present class verbatim,
    /// each absent position as `MISSING`. A call can never exactly match a
    /// signature containing `ANY`.
    pub fn exact_key(&self) -> Signature {
        Signature(
            self.0
                .iter()
                .map(|arg| match arg {
                    CallArg::Class(id) => SigClass::Class(*id),
                    CallArg::Absent => SigClass::Missing,
                })
                .collect(),
        )
    }

    /// String rendering for diagnostics, mirroring [`Signature::render`].
    pub fn render(&self, graph: &ClassGraph) -> String {
        let parts: Vec<&str> = self
            .0
            .iter()
            .map(|arg| match arg {
                CallArg::Class(id) => graph.class_name(*id).unwrap_or("?"),
                CallArg::Absent => "MISSING",
            })
            .collect();
        format!("({})", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn graph() -> ClassGraph {
        let mut graph = ClassGraph::new();
        graph.register("A", &[]).unwrap();
        graph.register("B", &[]).unwrap();
        graph
    }

    #[test]
    fn render_names_classes_and_markers() {
        let graph = graph();
        let a = graph.class_id("A").unwrap();
        let sig = Signature(vec![SigClass::Class(a), SigClass::Any, SigClass::Missing]);
        assert_eq!(sig.render(&graph), "(A, ANY, MISSING)");
    }

    #[test]
    fn exact_key_maps_absent_to_missing() {
        let graph = graph();
        let a = graph.class_id("A").unwrap();
        let call = CallSignature(vec![CallArg::Class(a), CallArg::Absent]);
        assert_eq!(
            call.exact_key(),
            Signature(vec![SigClass::Class(a), SigClass::Missing])
        );
    }

    #[test]
    fn renderings_order_lexicographically() {
        let graph = graph();
        let a = graph.class_id("A").unwrap();
        let b = graph.class_id("B").unwrap();
        let ab = Signature(vec![SigClass::Class(a), SigClass::Class(b)]).render(&graph);
        let ba = Signature(vec![SigClass::Class(b), SigClass::Class(a)]).render(&graph);
        assert!(ab < ba);
    }
}
