// SPDX-License-Identifier: Apache-2.0

//! Fanout limiting: no net may drive more than `max` reader slots. Clonable
//! nodes are duplicated and half of their readers move to the clone;
//! everything else gets a two-inverter buffer and half of its readers move
//! behind it. Opt-in; `optimize()` never runs this pass.

use anyhow::{bail, ensure, Result};

use crate::dce::opt_dead_node_elimination;
use crate::netlist::{Design, Node, NodeId};
use crate::use_count::{compute_fanout, FanoutIndex, SuccessorSlot};

/// Per-iteration bound; exceeding it means a clone/buffer policy failed to
/// reduce fanout for some kind.
const MAX_ITERATIONS: usize = 1000;

/// Registers are buffered rather than cloned: trading one high-fanout
/// register for several raises clock load instead.
const BUFFERS_FOR_REGS: bool = true;

fn is_clonable(node: &Node) -> bool {
    match node {
        Node::Nand { .. } | Node::Inv { .. } | Node::Lit { .. } => true,
        Node::Reg { .. } => !BUFFERS_FOR_REGS,
        _ => false,
    }
}

fn log_histogram(label: &str, index: &FanoutIndex) {
    log::info!("fanout histogram {}:", label);
    for (fanout, count) in index.histogram() {
        log::info!("  fanout {}: {}", fanout, count);
    }
}

pub fn opt_limit_fanout(design: &mut Design, max: usize) -> Result<()> {
    ensure!(max >= 2, "fanout limit must be at least 2, got {}", max);

    log_histogram("before", &compute_fanout(design));

    let mut iterations = 0;
    loop {
        let index = compute_fanout(design);
        let offenders: Vec<NodeId> = index
            .fanout
            .iter()
            .filter(|(_, &count)| count > max)
            .map(|(&id, _)| id)
            .collect();
        if offenders.is_empty() {
            break;
        }
        iterations += 1;
        if iterations > MAX_ITERATIONS {
            let id = offenders[0];
            bail!(
                "fanout limiter failed to converge after {} iterations ({} node {} still drives {})",
                MAX_ITERATIONS,
                design.node(id).kind_name(),
                id,
                index.fanout_of(id)
            );
        }

        // Successor snapshots are taken for the whole round: splitting one
        // offender only rewrites slots that point at that offender, so the
        // other offenders' snapshots stay accurate.
        for id in offenders {
            let successors: &[SuccessorSlot] = &index.successors[&id];
            let half = successors.len() / 2;
            let path = design.path(id).to_string();

            if is_clonable(design.node(id)) {
                let clone = design.append_with_path(design.node(id).clone(), path);
                for &(reader, slot) in &successors[..half] {
                    design.change_net(reader, slot, clone);
                }
            } else {
                let intermediate = design.append_with_path(Node::Inv { src: id }, path.clone());
                let repl = design.append_with_path(Node::Inv { src: intermediate }, path);
                for &(reader, slot) in &successors[half..] {
                    design.change_net(reader, slot, repl);
                }
            }
        }

        opt_dead_node_elimination(design)?;
    }

    log_histogram("after", &compute_fanout(design));
    Ok(())
}
