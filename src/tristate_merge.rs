// SPDX-License-Identifier: Apache-2.0

//! Tristate merge: within each tristate, drivers sharing the same input are
//! collapsed into one `(input, enable)` pair whose enable is a balanced OR
//! tree over the original enables.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::dce::opt_dead_node_elimination;
use crate::netlist::{Design, Node, NodeId};

pub fn opt_tristate_merge(design: &mut Design) -> Result<()> {
    let tristates: Vec<NodeId> = design
        .iter()
        .filter(|(_, n)| matches!(n, Node::Tristate { .. }))
        .map(|(id, _)| id)
        .collect();

    for id in tristates {
        let src = match design.node(id) {
            Node::Tristate { src } => src.clone(),
            _ => unreachable!(),
        };
        // Group enables by driven input, ascending input id.
        let mut groups: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        for pair in src.chunks_exact(2) {
            groups.entry(pair[0]).or_default().push(pair[1]);
        }
        if groups.values().all(|enables| enables.len() == 1) {
            continue;
        }
        let mut new_src = Vec::with_capacity(2 * groups.len());
        for (input, enables) in groups {
            let enable = design.or_tree(&enables);
            new_src.push(input);
            new_src.push(enable);
        }
        design.replace(id, Node::Tristate { src: new_src });
    }

    opt_dead_node_elimination(design)
}
