// SPDX-License-Identifier: Apache-2.0

//! Structural deduplication (common sub-expression elimination): hash-cons
//! inverters by their input and NAND gates by their unordered input pair,
//! redirecting later duplicates to the earliest occurrence. Registers,
//! memories and tristates carry driver identity and are never deduplicated.

use std::collections::HashMap;

use anyhow::Result;

use crate::dce::opt_dead_node_elimination;
use crate::netlist::{Design, Node, NodeId, Substitutions};

fn nand_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn opt_dedup(design: &mut Design) -> Result<()> {
    loop {
        let mut invs: HashMap<NodeId, NodeId> = HashMap::new();
        let mut nands: HashMap<(NodeId, NodeId), NodeId> = HashMap::new();
        let mut subs = Substitutions::new();

        for (id, node) in design.iter() {
            match node {
                Node::Inv { src } => match invs.get(src).copied() {
                    Some(earliest) => subs.insert(id, earliest),
                    None => {
                        invs.insert(*src, id);
                    }
                },
                Node::Nand { a, b } => {
                    let key = nand_key(*a, *b);
                    match nands.get(&key).copied() {
                        Some(earliest) => subs.insert(id, earliest),
                        None => {
                            nands.insert(key, id);
                        }
                    }
                }
                _ => {}
            }
        }

        if subs.is_empty() {
            break;
        }
        design.apply_substitutions(&subs);
        opt_dead_node_elimination(design)?;
    }
    Ok(())
}
