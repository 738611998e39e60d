// SPDX-License-Identifier: Apache-2.0

//! Local contraction: peephole algebraic simplification of inverters, NAND
//! gates and tristates, iterated to fixed point.
//!
//! Each scan walks ids in ascending order and applies the first matching
//! rule. Literal foldings replace the node implementation in place (keeping
//! id and hierarchy path); rules that forward a node to an existing one are
//! batched as substitutions and applied at the end of the scan, followed by
//! dead-node elimination.

use anyhow::Result;

use crate::dce::opt_dead_node_elimination;
use crate::netlist::{Design, Node, NodeId, Substitutions};

fn lit_value(design: &Design, id: NodeId) -> Option<bool> {
    match design.node(id) {
        Node::Lit { value } => Some(*value),
        _ => None,
    }
}

pub fn opt_contract(design: &mut Design) -> Result<()> {
    loop {
        let mut changes = 0usize;
        let mut subs = Substitutions::new();
        for i in 0..design.len() {
            let id = NodeId(i);
            if subs.contains(id) {
                // Redirected earlier in this scan; it is dead weight until
                // the sweep below.
                continue;
            }
            match design.node(id).clone() {
                Node::Inv { src } => {
                    if let Some(value) = lit_value(design, src) {
                        design.replace(id, Node::Lit { value: !value });
                        changes += 1;
                    } else if let Node::Inv { src: inner } = design.node(src) {
                        let inner = *inner;
                        subs.insert(id, inner);
                        changes += 1;
                    }
                }
                Node::Nand { a, b } => {
                    match (lit_value(design, a), lit_value(design, b)) {
                        (Some(va), Some(vb)) => {
                            design.replace(id, Node::Lit { value: !(va && vb) });
                            changes += 1;
                        }
                        (Some(false), _) | (_, Some(false)) => {
                            design.replace(id, Node::Lit { value: true });
                            changes += 1;
                        }
                        (Some(true), _) => {
                            design.replace(id, Node::Inv { src: b });
                            changes += 1;
                        }
                        (_, Some(true)) => {
                            design.replace(id, Node::Inv { src: a });
                            changes += 1;
                        }
                        _ if a == b => {
                            design.replace(id, Node::Inv { src: a });
                            changes += 1;
                        }
                        _ => {}
                    }
                }
                Node::Tristate { src } => {
                    let mut kept: Vec<NodeId> = Vec::with_capacity(src.len());
                    let mut redirected = false;
                    let mut dropped = false;
                    for pair in src.chunks_exact(2) {
                        let (input, enable) = (pair[0], pair[1]);
                        match lit_value(design, enable) {
                            Some(true) => {
                                // Always-enabled driver: the whole tristate
                                // collapses to this input and the remaining
                                // pairs are discarded with it.
                                subs.insert(id, input);
                                changes += 1;
                                redirected = true;
                                break;
                            }
                            Some(false) => {
                                // Never-enabled pair: drop it and keep
                                // scanning this tristate's remaining pairs.
                                dropped = true;
                                changes += 1;
                            }
                            None => {
                                kept.push(input);
                                kept.push(enable);
                            }
                        }
                    }
                    if !redirected && dropped {
                        design.replace(id, Node::Tristate { src: kept });
                    }
                }
                _ => {}
            }
        }
        design.apply_substitutions(&subs);
        opt_dead_node_elimination(design)?;
        if changes == 0 {
            break;
        }
    }
    Ok(())
}
