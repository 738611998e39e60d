// SPDX-License-Identifier: Apache-2.0

//! Cycle-accurate simulation of a design's taps. This exists to observe
//! optimizations, not to be fast: every cycle evaluates the combinational
//! cone of the taps, register D inputs and memory ports, then ticks state.
//!
//! Registers start at 0. Memories start from their init file (hex words, one
//! per line) or zeroed. A floating tristate reads 0; two enabled drivers
//! that disagree are a simulation error.

use std::collections::{HashMap, HashSet};
use std::io;

use anyhow::{bail, Context, Result};

use crate::netlist::{Design, MemId, Node, NodeId};

/// One cycle of input-port values, keyed by port name.
pub type Stimulus = HashMap<String, bool>;

/// Per-tap bit streams, in tap registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waves {
    pub cycles: usize,
    taps: Vec<(String, Vec<bool>)>,
}

impl Waves {
    pub fn tap(&self, name: &str) -> Option<&[bool]> {
        self.taps
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, bits)| bits.as_slice())
    }

    pub fn taps(&self) -> &[(String, Vec<bool>)] {
        &self.taps
    }
}

pub struct Simulator<'a> {
    design: &'a Design,
    reg_state: HashMap<NodeId, bool>,
    /// bank -> word -> bit
    mem_state: Vec<Vec<Vec<bool>>>,
}

fn load_mem_words(depth: usize, width: usize, init_file: Option<&str>) -> Result<Vec<Vec<bool>>> {
    let mut words = vec![vec![false; width]; depth];
    let Some(path) = init_file else {
        return Ok(words);
    };
    if width > 64 {
        bail!("memory init files support at most 64-bit words, got {}", width);
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading memory init file '{}'", path))?;
    let mut addr = 0;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if addr >= depth {
            bail!("memory init file '{}' has more than {} words", path, depth);
        }
        let value = u64::from_str_radix(line, 16)
            .with_context(|| format!("parsing '{}' in memory init file '{}'", line, path))?;
        for bit in 0..width {
            words[addr][bit] = (value >> bit) & 1 == 1;
        }
        addr += 1;
    }
    Ok(words)
}

enum Frame {
    Enter(NodeId),
    Exit(NodeId),
}

impl<'a> Simulator<'a> {
    pub fn new(design: &'a Design) -> Result<Self> {
        design.check_invariants()?;
        let mut mem_state = Vec::with_capacity(design.mem_banks().len());
        for bank in design.mem_banks() {
            mem_state.push(load_mem_words(
                bank.depth,
                bank.width,
                bank.init_file.as_deref(),
            )?);
        }
        Ok(Self {
            design,
            reg_state: HashMap::new(),
            mem_state,
        })
    }

    fn comb_deps(&self, node: &Node) -> Vec<NodeId> {
        match node {
            Node::Lit { .. } | Node::Input { .. } | Node::Reg { .. } => vec![],
            Node::Inv { src } => vec![*src],
            Node::Nand { a, b } => vec![*a, *b],
            Node::Mem { abits, src, .. } => src[..*abits].to_vec(),
            Node::Tristate { src } => src.clone(),
        }
    }

    fn word_index(values: &HashMap<NodeId, bool>, bits: &[NodeId]) -> usize {
        let mut index = 0;
        for (i, bit) in bits.iter().enumerate() {
            if values[bit] {
                index |= 1 << i;
            }
        }
        index
    }

    fn eval(
        &self,
        targets: &[NodeId],
        inputs: &Stimulus,
        values: &mut HashMap<NodeId, bool>,
    ) -> Result<()> {
        let mut stack: Vec<Frame> = targets.iter().map(|&t| Frame::Enter(t)).collect();
        let mut on_path: HashSet<NodeId> = HashSet::new();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(id) => {
                    if values.contains_key(&id) {
                        continue;
                    }
                    if !on_path.insert(id) {
                        bail!("combinational cycle detected at {}", id);
                    }
                    stack.push(Frame::Exit(id));
                    for dep in self.comb_deps(self.design.node(id)) {
                        stack.push(Frame::Enter(dep));
                    }
                }
                Frame::Exit(id) => {
                    on_path.remove(&id);
                    let value = match self.design.node(id) {
                        Node::Lit { value } => *value,
                        Node::Input { name } => match inputs.get(name) {
                            Some(v) => *v,
                            None => bail!("no stimulus for input port '{}'", name),
                        },
                        Node::Inv { src } => !values[src],
                        Node::Nand { a, b } => !(values[a] && values[b]),
                        Node::Reg { .. } => self.reg_state.get(&id).copied().unwrap_or(false),
                        Node::Mem {
                            mem, bit, abits, ..
                        } => {
                            let (_, _, addr, _, _, _) = self.design.mem_ports(id);
                            debug_assert_eq!(addr.len(), *abits);
                            let index = Self::word_index(values, addr);
                            self.mem_state[mem.0][index][*bit]
                        }
                        Node::Tristate { src } => {
                            let mut driven: Option<bool> = None;
                            for pair in src.chunks_exact(2) {
                                let (input, enable) = (pair[0], pair[1]);
                                if values[&enable] {
                                    let v = values[&input];
                                    match driven {
                                        None => driven = Some(v),
                                        Some(prev) if prev == v => {}
                                        Some(_) => bail!(
                                            "tristate conflict at {}: multiple enabled drivers disagree",
                                            id
                                        ),
                                    }
                                }
                            }
                            driven.unwrap_or(false)
                        }
                    };
                    values.insert(id, value);
                }
            }
        }
        Ok(())
    }

    /// Evaluates one cycle and advances register and memory state. Returns
    /// the tap values for the cycle, in tap registration order.
    pub fn step(&mut self, inputs: &Stimulus) -> Result<Vec<bool>> {
        let mut targets: Vec<NodeId> = self.design.tap_roots().collect();
        let mut mem_nodes: Vec<NodeId> = Vec::new();
        for (id, node) in self.design.iter() {
            match node {
                Node::Reg { d, .. } => targets.push(*d),
                Node::Mem { src, .. } => {
                    targets.extend_from_slice(src);
                    mem_nodes.push(id);
                }
                _ => {}
            }
        }

        let mut values = HashMap::new();
        self.eval(&targets, inputs, &mut values)?;

        let tap_values: Vec<bool> = self
            .design
            .taps()
            .iter()
            .map(|tap| values[&tap.node])
            .collect();

        // Register tick: all D values were evaluated above.
        let mut next_regs: Vec<(NodeId, bool)> = Vec::new();
        for (id, node) in self.design.iter() {
            if let Node::Reg { d, .. } = node {
                next_regs.push((id, values[d]));
            }
        }

        // Memory tick: writes happen at the clock edge, after reads.
        let mut writes: HashMap<MemId, (usize, Vec<(usize, bool)>)> = HashMap::new();
        for &id in &mem_nodes {
            let (mem, bit, _, d, wr_addr, wr_en) = self.design.mem_ports(id);
            if !values[&wr_en] {
                continue;
            }
            let index = Self::word_index(&values, wr_addr);
            writes
                .entry(mem)
                .or_insert_with(|| (index, Vec::new()))
                .1
                .push((bit, values[&d]));
        }
        for (mem, (index, bits)) in writes {
            for (bit, v) in bits {
                self.mem_state[mem.0][index][bit] = v;
            }
        }
        for (id, v) in next_regs {
            self.reg_state.insert(id, v);
        }

        Ok(tap_values)
    }
}

/// Runs `stimulus.len()` cycles and collects every tap's bit stream.
pub fn run(design: &Design, stimulus: &[Stimulus]) -> Result<Waves> {
    let mut sim = Simulator::new(design)?;
    let mut streams: Vec<Vec<bool>> = vec![Vec::with_capacity(stimulus.len()); design.taps().len()];
    for inputs in stimulus {
        let cycle_values = sim.step(inputs)?;
        for (stream, value) in streams.iter_mut().zip(cycle_values) {
            stream.push(value);
        }
    }
    Ok(Waves {
        cycles: stimulus.len(),
        taps: design
            .taps()
            .iter()
            .map(|t| t.name.clone())
            .zip(streams)
            .collect(),
    })
}

/// Like [`run`], additionally dumping a VCD waveform with one scalar signal
/// per tap.
pub fn run_vcd<W: io::Write>(design: &Design, stimulus: &[Stimulus], out: W) -> Result<Waves> {
    let waves = run(design, stimulus)?;
    let mut writer = vcd::Writer::new(out);
    writer.timescale(1, vcd::TimescaleUnit::NS)?;
    writer.add_module("design")?;
    let mut codes = Vec::with_capacity(waves.taps().len());
    for (name, _) in waves.taps() {
        codes.push(writer.add_wire(1, name)?);
    }
    writer.upscope()?;
    writer.enddefinitions()?;
    for cycle in 0..waves.cycles {
        writer.timestamp(cycle as u64)?;
        for (code, (_, bits)) in codes.iter().zip(waves.taps()) {
            let value = if bits[cycle] {
                vcd::Value::V1
            } else {
                vcd::Value::V0
            };
            writer.change_scalar(*code, value)?;
        }
    }
    Ok(waves)
}
