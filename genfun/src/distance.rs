//! Shortest ancestor-path distance between classes.
//!
//! Distance is directional: it is the minimum number of parent edges on a
//! path from a class to one of its ancestors. A class is at distance 0 from
//! itself; a class that is not an ancestor (a descendant, a sibling, or an
//! unrelated class) is [`Unreachable`](Distance::Unreachable).
//!
//! Under multiple inheritance the same ancestor can be reached along several
//! paths of different lengths, so the computation is a breadth-first search:
//! the first depth at which BFS reaches a node is the minimum, independent of
//! the order in which parent edges were declared.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::graph::{ClassId, ClassNode};

/// Result of a distance query between two classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Distance {
    /// The target is an ancestor of (or equal to) the source, this many
    /// parent edges away.
    Reachable(u32),
    /// The target is not an ancestor of the source.
    Unreachable,
}

impl Distance {
    /// The edge count, if the target is reachable.
    pub fn edges(self) -> Option<u32> {
        match self {
            Distance::Reachable(d) => Some(d),
            Distance::Unreachable => None,
        }
    }

    /// Whether the target is an ancestor of (or equal to) the source.
    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Reachable(_))
    }
}

/// Compute the minimum edge count from `origin` to every class reachable by
/// following parent edges, `origin` itself included at distance 0.
///
/// The graph is acyclic, so the search terminates; BFS order guarantees that
/// the first recorded depth for a node is the minimum.
pub(crate) fn ancestor_distances(nodes: &[ClassNode], origin: ClassId) -> FxHashMap<ClassId, u32> {
    let mut dists = FxHashMap::default();
    dists.insert(origin, 0u32);

    let mut queue = VecDeque::new();
    queue.push_back(origin);

    while let Some(class) = queue.pop_front() {
        let depth = dists[&class];
        for &parent in &nodes[class.index()].parents {
            if !dists.contains_key(&parent) {
                dists.insert(parent, depth + 1);
                queue.push_back(parent);
            }
        }
    }

    dists
}
