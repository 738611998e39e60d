// SPDX-License-Identifier: Apache-2.0

//! Dead-node elimination: worklist reachability from the root set, then a
//! stable compaction that renumbers the survivors to a contiguous range.

use std::collections::HashSet;

use anyhow::{bail, Result};

use crate::netlist::{Design, NodeId};

/// Marks every node reachable from the root set (over source edges plus
/// register D edges).
pub(crate) fn live_set(design: &Design) -> Result<HashSet<NodeId>> {
    let mut live = HashSet::new();
    let mut worklist = design.collect_roots();
    while let Some(id) = worklist.pop() {
        if !live.insert(id) {
            continue;
        }
        if id.0 >= design.len() {
            bail!("source id out of range: {} reached during liveness marking", id);
        }
        for src in design.node(id).rewrite_slots() {
            worklist.push(src);
        }
    }
    Ok(live)
}

/// Removes every node not reachable from the root set and renumbers the
/// survivors contiguously from 0, in ascending order of old id.
pub fn opt_dead_node_elimination(design: &mut Design) -> Result<()> {
    let live = live_set(design)?;

    let mut perm: Vec<Option<usize>> = vec![None; design.len()];
    let mut next = 0;
    for old in 0..design.len() {
        if live.contains(&NodeId(old)) {
            perm[old] = Some(next);
            next += 1;
        }
    }
    design.permute(&perm)?;
    design.check_invariants()?;

    debug_assert_eq!(design.len(), live.len());
    Ok(())
}
