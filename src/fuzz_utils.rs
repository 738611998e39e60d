// SPDX-License-Identifier: Apache-2.0

//! Random design generation for equivalence fuzzing. Generated designs are
//! structurally legal by construction: combinational logic is append-only
//! (hence acyclic), feedback goes through registers, and tristate drivers
//! are shaped so that enabled drivers can never disagree.

use rand::Rng;

use crate::netlist::{ClockDomain, Design, Node, NodeId};
use crate::sim::Stimulus;

#[derive(Debug, Clone, Copy)]
pub struct ArbitraryDesignOptions {
    pub inputs: usize,
    pub gates: usize,
    pub regs: usize,
    pub tristates: usize,
    pub taps: usize,
}

impl ArbitraryDesignOptions {
    pub fn small() -> Self {
        Self {
            inputs: 3,
            gates: 12,
            regs: 2,
            tristates: 1,
            taps: 4,
        }
    }

    pub fn medium() -> Self {
        Self {
            inputs: 6,
            gates: 60,
            regs: 6,
            tristates: 3,
            taps: 10,
        }
    }
}

fn pick(rng: &mut impl Rng, pool: &[NodeId]) -> NodeId {
    pool[rng.gen_range(0..pool.len())]
}

pub fn arbitrary_design(rng: &mut impl Rng, opts: &ArbitraryDesignOptions) -> Design {
    let mut d = Design::new();
    let mut pool: Vec<NodeId> = Vec::new();

    for i in 0..opts.inputs.max(1) {
        pool.push(d.input(&format!("in{}", i)));
    }
    // Several duplicate literals so canonicalization has work to do.
    for _ in 0..3 {
        pool.push(d.lit(rng.gen_bool(0.5)));
    }

    // Registers are created up front with placeholder D inputs and closed
    // into feedback loops once the combinational pool is built.
    let mut regs = Vec::new();
    for _ in 0..opts.regs {
        let seed = pick(rng, &pool);
        let r = d.reg(seed, ClockDomain(rng.gen_range(0..2)));
        regs.push(r);
        pool.push(r);
    }

    for _ in 0..opts.gates {
        let a = pick(rng, &pool);
        let b = pick(rng, &pool);
        let node = match rng.gen_range(0..6) {
            0 => d.inv(a),
            1 | 2 => d.nand(a, b),
            3 => d.and(a, b),
            4 => d.or(a, b),
            _ => d.xor(a, b),
        };
        pool.push(node);
    }

    for _ in 0..opts.tristates {
        let t = d.tristate();
        if rng.gen_bool(0.5) {
            // One input, several enables: merge fodder, conflict-free.
            let input = pick(rng, &pool);
            for _ in 0..rng.gen_range(1..4) {
                let enable = pick(rng, &pool);
                d.tristate_connect(t, input, enable);
            }
        } else {
            // Two inputs with complementary enables: at most one driver on.
            let x = pick(rng, &pool);
            let y = pick(rng, &pool);
            let e = pick(rng, &pool);
            let ne = d.inv(e);
            d.tristate_connect(t, x, e);
            d.tristate_connect(t, y, ne);
        }
        pool.push(t);
    }

    // Close register feedback through the finished pool.
    for &r in &regs {
        d.set_reg_d(r, pick(rng, &pool));
    }

    // Tap the last node (so the deepest logic is observed) plus a random
    // sample of the pool.
    d.register_tap("t0", *pool.last().unwrap());
    for i in 1..opts.taps.max(1) {
        d.register_tap(&format!("t{}", i), pick(rng, &pool));
    }
    d
}

/// Random per-cycle values for every input port of `design`.
pub fn arbitrary_stimulus(
    rng: &mut impl Rng,
    design: &Design,
    cycles: usize,
) -> Vec<Stimulus> {
    let names: Vec<String> = design
        .ports()
        .iter()
        .map(|&p| match design.node(p) {
            Node::Input { name } => name.clone(),
            other => panic!("port registry points at {} node", other.kind_name()),
        })
        .collect();
    (0..cycles)
        .map(|_| {
            names
                .iter()
                .map(|n| (n.clone(), rng.gen_bool(0.5)))
                .collect()
        })
        .collect()
}
