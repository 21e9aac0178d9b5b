//! Errors raised by class registration, generic definition, and dispatch.
//!
//! Registration errors are fatal only to the offending call: a failed
//! `register_class` or `define_method` leaves the registry exactly as it was
//! (every operation validates fully before mutating anything). Dispatch
//! failure (`NoApplicableMethod`) is recoverable by the caller. Ambiguous
//! dispatch is deliberately *not* represented here; it resolves
//! deterministically and is reported as a warning-level diagnostic instead.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during registration or dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Redefining a class with the proposed parents would make the
    /// inheritance graph cyclic.
    #[error("redefining class `{class}` would create an inheritance cycle through `{via}`")]
    Cycle { class: String, via: String },

    /// A class declared a parent that has not been registered.
    #[error("class `{class}` names unknown parent `{parent}`")]
    UnknownParent { class: String, parent: String },

    /// A signature or call referenced a class name that was never registered.
    #[error("unknown class `{name}`")]
    UnknownClass { name: String },

    /// A generic was redefined with a different dispatch arity.
    #[error("generic `{name}` is already defined with arity {existing_arity}, cannot redefine with arity {arity}")]
    DuplicateGeneric {
        name: String,
        existing_arity: usize,
        arity: usize,
    },

    /// A method was defined on, or a call was dispatched to, a generic that
    /// was never defined.
    #[error("unknown generic `{name}`")]
    UnknownGeneric { name: String },

    /// A method signature or call signature disagreed with the generic's
    /// dispatch arity.
    #[error("generic `{generic}` dispatches on {expected} positions, got {found}")]
    ArityMismatch {
        generic: String,
        expected: usize,
        found: usize,
    },

    /// No registered method survived per-position matching for the call.
    #[error("no applicable method for generic `{generic}` with call signature {call}")]
    NoApplicableMethod { generic: String, call: String },
}
