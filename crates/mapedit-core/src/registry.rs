//! Owning collection of live teleport nodes.
//!
//! Nodes are keyed by object id; everything else holds ids, never
//! references. Index rebuilds run here so a node's bindings are always
//! derived from the registry's current live set.

use std::collections::{BTreeMap, HashMap};

use mapedit_logic::ids::next_free_id;

use crate::node::TeleportNode;

/// Seconds between a topology change and the resulting index rebuild.
/// Bursts of changes inside the window coalesce into one visible rebuild.
pub const REBUILD_DELAY: f64 = 0.1;

/// All live teleport nodes, keyed by object id.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeMap<u32, TeleportNode>,
    /// Most recently added node, while it is still live.
    last_added: Option<u32>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// First object id not currently in use. Freed ids are recycled.
    pub fn assign_object_id(&self) -> u32 {
        next_free_id(self.nodes.keys().copied())
    }

    pub fn insert(&mut self, node: TeleportNode) {
        self.last_added = Some(node.object_id());
        self.nodes.insert(node.object_id(), node);
    }

    pub fn remove(&mut self, object_id: u32) -> Option<TeleportNode> {
        if self.last_added == Some(object_id) {
            self.last_added = None;
        }
        self.nodes.remove(&object_id)
    }

    pub fn get(&self, object_id: u32) -> Option<&TeleportNode> {
        self.nodes.get(&object_id)
    }

    pub fn get_mut(&mut self, object_id: u32) -> Option<&mut TeleportNode> {
        self.nodes.get_mut(&object_id)
    }

    pub fn contains(&self, object_id: u32) -> bool {
        self.nodes.contains_key(&object_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Live nodes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &TeleportNode> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.nodes.keys().copied()
    }

    /// Most recently added node, if it still lives.
    pub fn last_added(&self) -> Option<u32> {
        self.last_added
    }

    /// Nodes whose index currently binds `object_id`.
    pub fn nodes_bound_to(&self, object_id: u32) -> Vec<u32> {
        self.nodes
            .values()
            .filter(|node| node.target_index.values().any(|&bound| bound == object_id))
            .map(|node| node.object_id())
            .collect()
    }

    /// Nodes whose configured targets reference `object_id`.
    pub fn nodes_targeting(&self, object_id: u32) -> Vec<u32> {
        self.nodes
            .values()
            .filter(|node| node.object_id() != object_id)
            .filter(|node| node.config.targets.iter().any(|t| t.id == object_id))
            .map(|node| node.object_id())
            .collect()
    }

    /// Rebuild one node's target index against the current live set.
    ///
    /// The fresh index is built completely, then swapped in — a lookup miss
    /// leaves that entry absent rather than aborting the pass. Returns false
    /// when the node itself is no longer live.
    pub fn rebuild_index(&mut self, object_id: u32) -> bool {
        let fresh = match self.nodes.get(&object_id) {
            Some(node) => {
                let mut fresh = HashMap::new();
                for target in &node.config.targets {
                    // A node never binds itself.
                    if target.id == object_id {
                        continue;
                    }
                    if self.nodes.contains_key(&target.id) {
                        fresh.entry(target.id).or_insert(target.id);
                    }
                }
                fresh
            }
            None => return false,
        };

        match self.nodes.get_mut(&object_id) {
            Some(node) => {
                node.target_index = fresh;
                true
            }
            None => false,
        }
    }
}
