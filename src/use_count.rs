// SPDX-License-Identifier: Apache-2.0

//! Fanout accounting: how many reader slots reference each node, and which
//! `(reader, slot)` pairs they are. A register's D input counts as one
//! successor (slot 0); taps are observation points, not successors.

use std::collections::BTreeMap;

use crate::netlist::{Design, NodeId};

/// An input slot of a reader node, identifying one fanout edge.
pub type SuccessorSlot = (NodeId, usize);

#[derive(Debug, Default)]
pub struct FanoutIndex {
    /// Reader slot count per node id. Nodes with no readers are absent.
    pub fanout: BTreeMap<NodeId, usize>,
    /// Ordered `(reader, slot)` successor lists per node id.
    pub successors: BTreeMap<NodeId, Vec<SuccessorSlot>>,
}

impl FanoutIndex {
    pub fn fanout_of(&self, id: NodeId) -> usize {
        self.fanout.get(&id).copied().unwrap_or(0)
    }

    /// Histogram `fanout -> node count` over all referenced nodes.
    pub fn histogram(&self) -> BTreeMap<usize, usize> {
        let mut hist = BTreeMap::new();
        for count in self.fanout.values() {
            *hist.entry(*count).or_insert(0) += 1;
        }
        hist
    }
}

/// Walks every rewrite slot of every node (register D included) and records
/// the reverse edges. Successor lists come out ordered by reader id, then
/// slot, which keeps downstream splitting deterministic.
pub fn compute_fanout(design: &Design) -> FanoutIndex {
    let mut index = FanoutIndex::default();
    for (reader, node) in design.iter() {
        for (slot, src) in node.rewrite_slots().into_iter().enumerate() {
            *index.fanout.entry(src).or_insert(0) += 1;
            index.successors.entry(src).or_default().push((reader, slot));
        }
    }
    index
}
