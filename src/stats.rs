// SPDX-License-Identifier: Apache-2.0

//! Summary statistics over a design: live-node counts and a per-kind census.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use crate::dce::live_set;
use crate::netlist::Design;

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct SummaryStats {
    /// Nodes reachable from the root set (equals the store size after DCE).
    pub live_nodes: usize,
    /// Live node count per kind name.
    pub kind_census: BTreeMap<&'static str, usize>,
}

pub fn get_summary_stats(design: &Design) -> Result<SummaryStats> {
    let live = live_set(design)?;
    let mut kind_census: BTreeMap<&'static str, usize> = BTreeMap::new();
    for (id, node) in design.iter() {
        if live.contains(&id) {
            *kind_census.entry(node.kind_name()).or_insert(0) += 1;
        }
    }
    Ok(SummaryStats {
        live_nodes: live.len(),
        kind_census,
    })
}
