// SPDX-License-Identifier: Apache-2.0

//! `nandlist` is an embedded hardware-description layer: a host program
//! grows a netlist of primitive logic nodes (NAND, inverter, literal,
//! register, memory, tristate) through the builder API on [`netlist::Design`],
//! then optimizes it and hands the result to the simulator or the emitters.
//!
//! The optimization passes rewrite the graph in place while preserving the
//! bit-for-bit behavior of every registered tap:
//!
//! - [`dce::opt_dead_node_elimination`]: mark-sweep from the root set.
//! - [`contract::opt_contract`]: peephole simplification to fixed point.
//! - [`combine_literals::opt_combine_literals`]: one shared constant pair.
//! - [`dedup::opt_dedup`]: hash-cons of structurally equal gates.
//! - [`tristate_merge::opt_tristate_merge`]: one driver pair per input.
//! - [`limit_fanout::opt_limit_fanout`]: synthesis-time fanout bounding.
//!
//! [`optimize::optimize`] runs the standard sequence.

pub mod builder;
pub mod check_equivalence;
pub mod combine_literals;
pub mod contract;
pub mod dce;
pub mod dedup;
pub mod emit_dot;
pub mod emit_netlist;
pub mod fuzz_utils;
pub mod gates;
pub mod limit_fanout;
pub mod netlist;
pub mod optimize;
pub mod sim;
pub mod stats;
pub mod tristate_merge;
pub mod use_count;
