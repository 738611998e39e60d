// SPDX-License-Identifier: Apache-2.0

//! Pass orchestration. `optimize()` runs the standard sequence to a state
//! every pass leaves fixed; the fanout limiter is a separate, synthesis-time
//! opt-in (`opt_limit_fanout`).

use anyhow::Result;

use crate::combine_literals::opt_combine_literals;
use crate::contract::opt_contract;
use crate::dce::opt_dead_node_elimination;
use crate::dedup::opt_dedup;
use crate::netlist::Design;
use crate::tristate_merge::opt_tristate_merge;

pub fn optimize(design: &mut Design) -> Result<()> {
    log::info!("before optimization: {} nodes", design.len());
    opt_dead_node_elimination(design)?;
    log::info!("after dead node elimination: {} nodes", design.len());
    opt_contract(design)?;
    log::info!("after contraction: {} nodes", design.len());
    opt_combine_literals(design)?;
    log::info!("after combining literals: {} nodes", design.len());
    opt_dedup(design)?;
    log::info!("after redundant expression elimination: {} nodes", design.len());

    opt_tristate_merge(design)?;
    opt_contract(design)?;
    opt_dedup(design)?;
    opt_tristate_merge(design)?;
    log::info!("after tri-state merge: {} nodes", design.len());
    Ok(())
}
