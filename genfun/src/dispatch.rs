//! The dispatch resolution algorithm.
//!
//! Given a call's concrete argument classes, selects the best-matching
//! registered method of a generic:
//!
//! 1. **Exact match**: the call signature verbatim (absent positions match
//!    only `MISSING`). Bypasses all distance computation.
//! 2. **Scan**: every registered signature gets a per-position distance —
//!    class-graph distance for a class position, a sentinel worse than any
//!    finite distance for `ANY`, 0 for `MISSING` against an absent argument.
//!    Any position that cannot match disqualifies the whole candidate.
//! 3. **Select**: minimum total (summed) distance wins. A tie is ambiguous
//!    dispatch: a warning diagnostic is emitted and the lexicographically
//!    first signature rendering wins, so resolution stays deterministic and
//!    independent of registration order.
//!
//! Resolution is a pure read: identical inputs produce identical outputs,
//! and nothing in the registry is mutated.

use tracing::{debug, warn};

use crate::distance::Distance;
use crate::error::{Error, Result};
use crate::graph::ClassGraph;
use crate::signature::{CallArg, CallSignature, SigClass, Signature};
use crate::table::{MethodEntry, MethodTable};

/// Details of an ambiguous dispatch: the signatures tied at minimum total
/// distance, rendered and sorted. The first element is the winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    pub tied: Vec<String>,
}

/// A successful resolution: the selected entry, its total distance from the
/// call, and the tie details if the selection was ambiguous.
#[derive(Debug)]
pub struct Resolution<'a, T> {
    pub entry: &'a MethodEntry<T>,
    pub total_distance: u64,
    pub ambiguity: Option<Ambiguity>,
}

/// Total distance between a candidate signature and a call, or `None` if any
/// position disqualifies the candidate.
///
/// `any_penalty` is the per-position cost of an `ANY` match; the caller
/// passes a value strictly greater than any finite class-graph distance.
pub(crate) fn signature_distance(
    graph: &ClassGraph,
    signature: &Signature,
    call: &CallSignature,
    any_penalty: u64,
) -> Option<u64> {
    debug_assert_eq!(signature.arity(), call.arity());

    let mut total = 0u64;
    for (pos, arg) in signature.0.iter().zip(&call.0) {
        let step = match (pos, arg) {
            // MISSING and absent are exclusive to each other.
            (SigClass::Missing, CallArg::Absent) => 0,
            (SigClass::Missing, CallArg::Class(_)) => return None,
            (_, CallArg::Absent) => return None,
            (SigClass::Any, CallArg::Class(_)) => any_penalty,
            (SigClass::Class(sig_class), CallArg::Class(arg_class)) => {
                match graph.distance(*arg_class, *sig_class) {
                    Distance::Reachable(d) => u64::from(d),
                    Distance::Unreachable => return None,
                }
            }
        };
        total += step;
    }
    Some(total)
}

/// The `ANY` per-position cost for the current graph. The longest possible
/// ancestor path has `class_count - 1` edges, so the class count itself is
/// strictly greater than every finite distance.
fn any_penalty(graph: &ClassGraph) -> u64 {
    graph.class_count() as u64
}

/// Resolve one call against one generic's method table.
pub(crate) fn resolve_call<'a, T>(
    graph: &ClassGraph,
    generic: &str,
    table: &'a MethodTable<T>,
    call: &CallSignature,
) -> Result<Resolution<'a, T>> {
    // Fast path: verbatim signature equality, no distance computation.
    if let Some(entry) = table.exact(&call.exact_key()) {
        return Ok(Resolution {
            entry,
            total_distance: 0,
            ambiguity: None,
        });
    }

    debug!(generic, "no exact method, scanning candidates");
    let penalty = any_penalty(graph);

    let mut min = u64::MAX;
    let mut tied: Vec<&MethodEntry<T>> = Vec::new();
    for entry in table.entries() {
        let Some(total) = signature_distance(graph, &entry.signature, call, penalty) else {
            continue;
        };
        if total < min {
            min = total;
            tied.clear();
            tied.push(entry);
        } else if total == min {
            tied.push(entry);
        }
    }

    match tied.len() {
        0 => Err(Error::NoApplicableMethod {
            generic: generic.to_string(),
            call: call.render(graph),
        }),
        1 => Ok(Resolution {
            entry: tied[0],
            total_distance: min,
            ambiguity: None,
        }),
        _ => {
            let mut ranked: Vec<(String, &MethodEntry<T>)> = tied
                .into_iter()
                .map(|entry| (entry.signature.render(graph), entry))
                .collect();
            ranked.sort_by(|a, b| a.0.cmp(&b.0));
            let renderings: Vec<String> = ranked.iter().map(|(r, _)| r.clone()).collect();
            warn!(
                generic,
                tied = %renderings.join(", "),
                "ambiguous dispatch, selecting lexicographically first signature"
            );
            Ok(Resolution {
                entry: ranked[0].1,
                total_distance: min,
                ambiguity: Some(Ambiguity { tied: renderings }),
            })
        }
    }
}

/// Every candidate applicable to the call, with its total distance, sorted
/// by ascending distance then signature rendering. Introspection companion
/// to [`resolve_call`]; shares the same per-position matching.
pub(crate) fn applicable_methods<'a, T>(
    graph: &ClassGraph,
    table: &'a MethodTable<T>,
    call: &CallSignature,
) -> Vec<(u64, &'a MethodEntry<T>)> {
    let penalty = any_penalty(graph);
    let mut found: Vec<(u64, &MethodEntry<T>)> = table
        .entries()
        .filter_map(|entry| {
            signature_distance(graph, &entry.signature, call, penalty).map(|d| (d, entry))
        })
        .collect();
    found.sort_by(|a, b| {
        a.0.cmp(&b.0)
            .then_with(|| a.1.signature.render(graph).cmp(&b.1.signature.render(graph)))
    });
    found
}
