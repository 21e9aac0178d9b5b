//! The class inheritance graph.
//!
//! Classes live in an arena `Vec` and are addressed by [`ClassId`]; parent
//! edges are stored as ids in flat tables, never as owned references, so
//! multiple inheritance cannot introduce reference cycles at the ownership
//! level. The graph is append-only during normal operation; redefining an
//! existing class is a distinct, explicitly supported operation.
//!
//! Every node carries its ancestor-distance map, computed by BFS when the
//! node is registered (and recomputed for affected nodes on redefinition).
//! Distance queries and dispatch are therefore pure `&self` lookups with no
//! interior mutability, which is what makes concurrent reads safe.

use rustc_hash::FxHashMap;

use crate::distance::{ancestor_distances, Distance};
use crate::error::{Error, Result};

/// A unique identifier for a class, indexing into the graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single class: its name, direct parents, and cached ancestor distances.
#[derive(Debug, Clone)]
pub struct ClassNode {
    /// The class name, unique within the graph.
    pub name: String,
    /// Direct parents, in declaration order. Empty for a root class.
    pub parents: Vec<ClassId>,
    /// Minimum edge count to every ancestor, self included at distance 0.
    pub(crate) ancestor_dists: FxHashMap<ClassId, u32>,
}

impl ClassNode {
    pub(crate) fn new(name: String, parents: Vec<ClassId>) -> Self {
        Self {
            name,
            parents,
            ancestor_dists: FxHashMap::default(),
        }
    }
}

/// A directed acyclic graph of classes and their inheritance edges.
///
/// Nodes are stored in registration order and identified by [`ClassId`];
/// name-based lookup goes through an internal hash map.
#[derive(Debug, Default)]
pub struct ClassGraph {
    nodes: Vec<ClassNode>,
    ids: FxHashMap<String, ClassId>,
}

impl ClassGraph {
    /// Create an empty class graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered classes.
    pub fn class_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether a class with this name has been registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    /// Look up a class id by name.
    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.ids.get(name).copied()
    }

    /// Look up a class name by id.
    pub fn class_name(&self, id: ClassId) -> Option<&str> {
        self.nodes.get(id.index()).map(|n| n.name.as_str())
    }

    /// The direct parents of a class, in declaration order.
    pub fn parents_of(&self, id: ClassId) -> &[ClassId] {
        &self.nodes[id.index()].parents
    }

    /// Register a class, or redefine it if the name already exists.
    ///
    /// Parents must already be registered (`UnknownParent` otherwise; there
    /// are no forward references). Re-registering a class with an identical
    /// parent list is a no-op that returns the existing id. Re-registering
    /// with a *different* parent list is redefinition: the parent edges are
    /// replaced and cached distances of the class and all its descendants are
    /// recomputed; `Cycle` is returned if the class would become its own
    /// ancestor. Validation completes before any mutation, so a failed call
    /// leaves the graph untouched.
    pub fn register(&mut self, name: &str, parents: &[&str]) -> Result<ClassId> {
        let mut parent_ids = Vec::with_capacity(parents.len());
        for parent in parents {
            match self.ids.get(*parent) {
                Some(&pid) => parent_ids.push(pid),
                None => {
                    return Err(Error::UnknownParent {
                        class: name.to_string(),
                        parent: (*parent).to_string(),
                    });
                }
            }
        }

        if let Some(&id) = self.ids.get(name) {
            if self.nodes[id.index()].parents == parent_ids {
                return Ok(id);
            }
            // Redefinition: the class must not appear among its own proposed
            // ancestors.
            for &pid in &parent_ids {
                if pid == id || self.nodes[pid.index()].ancestor_dists.contains_key(&id) {
                    return Err(Error::Cycle {
                        class: name.to_string(),
                        via: self.nodes[pid.index()].name.clone(),
                    });
                }
            }
            self.nodes[id.index()].parents = parent_ids;
            self.recompute_affected(id);
            return Ok(id);
        }

        let id = ClassId(self.nodes.len() as u32);
        self.nodes
            .push(ClassNode::new(name.to_string(), parent_ids));
        self.ids.insert(name.to_string(), id);
        let dists = ancestor_distances(&self.nodes, id);
        self.nodes[id.index()].ancestor_dists = dists;
        Ok(id)
    }

    /// Shortest directed distance from `from` to its ancestor `to`.
    ///
    /// `distance(x, x)` is `Reachable(0)`. The relation is directional:
    /// ancestor-to-descendant and sibling-to-sibling queries are
    /// `Unreachable`.
    pub fn distance(&self, from: ClassId, to: ClassId) -> Distance {
        match self.nodes[from.index()].ancestor_dists.get(&to) {
            Some(&d) => Distance::Reachable(d),
            None => Distance::Unreachable,
        }
    }

    /// Every proper ancestor of a class (the class itself is excluded).
    ///
    /// Order is unspecified; callers needing a stable order should sort.
    pub fn all_ancestors(&self, id: ClassId) -> impl Iterator<Item = ClassId> + '_ {
        self.nodes[id.index()]
            .ancestor_dists
            .keys()
            .copied()
            .filter(move |&anc| anc != id)
    }

    /// Whether `ancestor` is a proper or improper ancestor of `descendant`.
    pub fn is_ancestor(&self, ancestor: ClassId, descendant: ClassId) -> bool {
        self.distance(descendant, ancestor).is_reachable()
    }

    /// Recompute cached distances for `origin` and every class that has it
    /// as an ancestor. Changing a node's parent edges cannot change which
    /// nodes lie below it, so the old caches identify the affected set.
    fn recompute_affected(&mut self, origin: ClassId) {
        let affected: Vec<ClassId> = (0..self.nodes.len() as u32)
            .map(ClassId)
            .filter(|&id| id == origin || self.nodes[id.index()].ancestor_dists.contains_key(&origin))
            .collect();
        for id in affected {
            let dists = ancestor_distances(&self.nodes, id);
            self.nodes[id.index()].ancestor_dists = dists;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chain() -> ClassGraph {
        let mut graph = ClassGraph::new();
        graph.register("C", &[]).unwrap();
        graph.register("B", &["C"]).unwrap();
        graph.register("A", &["B"]).unwrap();
        graph
    }

    #[test]
    fn register_and_look_up() {
        let graph = chain();
        assert!(graph.is_registered("A"));
        assert!(!graph.is_registered("Z"));
        let a = graph.class_id("A").unwrap();
        let b = graph.class_id("B").unwrap();
        assert_eq!(graph.class_name(a), Some("A"));
        assert_eq!(graph.parents_of(a), &[b]);
        assert_eq!(graph.class_count(), 3);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let mut graph = ClassGraph::new();
        let err = graph.register("A", &["Ghost"]).unwrap_err();
        assert_eq!(
            err,
            Error::UnknownParent {
                class: "A".to_string(),
                parent: "Ghost".to_string(),
            }
        );
        assert_eq!(graph.class_count(), 0);
    }

    #[test]
    fn self_parent_at_first_registration_is_unknown() {
        // The class being registered is not registered yet, so naming it as
        // its own parent is an unknown-parent failure, not a cycle.
        let mut graph = ClassGraph::new();
        let err = graph.register("A", &["A"]).unwrap_err();
        assert!(matches!(err, Error::UnknownParent { .. }));
    }

    #[test]
    fn distance_is_directional() {
        let graph = chain();
        let a = graph.class_id("A").unwrap();
        let c = graph.class_id("C").unwrap();
        assert_eq!(graph.distance(a, c), Distance::Reachable(2));
        assert_eq!(graph.distance(c, a), Distance::Unreachable);
        assert_eq!(graph.distance(a, a), Distance::Reachable(0));
    }

    #[test]
    fn siblings_are_unreachable() {
        let mut graph = ClassGraph::new();
        graph.register("Top", &[]).unwrap();
        graph.register("Left", &["Top"]).unwrap();
        graph.register("Right", &["Top"]).unwrap();
        let l = graph.class_id("Left").unwrap();
        let r = graph.class_id("Right").unwrap();
        assert_eq!(graph.distance(l, r), Distance::Unreachable);
        assert_eq!(graph.distance(r, l), Distance::Unreachable);
    }

    #[test]
    fn idempotent_reregistration_is_a_noop() {
        let mut graph = chain();
        let a = graph.class_id("A").unwrap();
        let again = graph.register("A", &["B"]).unwrap();
        assert_eq!(a, again);
        assert_eq!(graph.class_count(), 3);
    }

    #[test]
    fn redefinition_replaces_parents_and_distances() {
        let mut graph = chain();
        graph.register("D", &[]).unwrap();
        // A: B -> A: D
        let a = graph.register("A", &["D"]).unwrap();
        let c = graph.class_id("C").unwrap();
        let d = graph.class_id("D").unwrap();
        assert_eq!(graph.distance(a, d), Distance::Reachable(1));
        assert_eq!(graph.distance(a, c), Distance::Unreachable);
    }

    #[test]
    fn redefinition_updates_descendants() {
        let mut graph = chain();
        graph.register("D", &[]).unwrap();
        // Rewire B (the middle of the chain); A's cached distances must
        // follow.
        graph.register("B", &["D"]).unwrap();
        let a = graph.class_id("A").unwrap();
        let c = graph.class_id("C").unwrap();
        let d = graph.class_id("D").unwrap();
        assert_eq!(graph.distance(a, d), Distance::Reachable(2));
        assert_eq!(graph.distance(a, c), Distance::Unreachable);
    }

    #[test]
    fn cyclic_redefinition_is_rejected_atomically() {
        let mut graph = chain();
        let err = graph.register("C", &["A"]).unwrap_err();
        assert!(matches!(err, Error::Cycle { .. }));
        // Graph unchanged.
        let a = graph.class_id("A").unwrap();
        let c = graph.class_id("C").unwrap();
        assert_eq!(graph.distance(a, c), Distance::Reachable(2));
        assert_eq!(graph.parents_of(c), &[]);
    }

    #[test]
    fn all_ancestors_excludes_self() {
        let graph = chain();
        let a = graph.class_id("A").unwrap();
        let mut ancestors: Vec<_> = graph.all_ancestors(a).collect();
        ancestors.sort();
        assert_eq!(
            ancestors,
            vec![graph.class_id("C").unwrap(), graph.class_id("B").unwrap()]
        );
    }

    #[test]
    fn diamond_uses_shortest_path() {
        let mut graph = ClassGraph::new();
        graph.register("Top", &[]).unwrap();
        graph.register("Mid", &["Top"]).unwrap();
        graph.register("Leaf", &["Mid", "Top"]).unwrap();
        let leaf = graph.class_id("Leaf").unwrap();
        let top = graph.class_id("Top").unwrap();
        assert_eq!(graph.distance(leaf, top), Distance::Reachable(1));
    }
}
