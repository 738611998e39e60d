// SPDX-License-Identifier: Apache-2.0

//! Textual NAND netlist emission: one line per node declaring id, kind and
//! inputs, preceded by the tap declarations. The output is deterministic for
//! a given design (taps in registration order, nodes ascending by id).

use std::io::{self, Write};

use crate::netlist::{Design, Node};

pub fn write_netlist<W: Write>(design: &Design, out: &mut W) -> io::Result<()> {
    writeln!(out, "taps")?;
    for tap in design.taps() {
        writeln!(out, "  {} {}", tap.name, tap.node)?;
    }
    writeln!(out, "nodes")?;
    for (id, node) in design.iter() {
        match node {
            Node::Lit { value } => {
                writeln!(out, "  {} = lit({})", id, u8::from(*value))?;
            }
            Node::Input { name } => {
                writeln!(out, "  {} = input({})", id, name)?;
            }
            Node::Inv { src } => {
                writeln!(out, "  {} = inv({})", id, src)?;
            }
            Node::Nand { a, b } => {
                writeln!(out, "  {} = nand({}, {})", id, a, b)?;
            }
            Node::Reg { d, cd } => {
                writeln!(out, "  {} = reg({}, cd{})", id, d, cd.0)?;
            }
            Node::Mem { mem, bit, src, .. } => {
                let args = src
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "  {} = mem(m{}.{}, {})", id, mem.0, bit, args)?;
            }
            Node::Tristate { src } => {
                let pairs = src
                    .chunks_exact(2)
                    .map(|p| format!("{}:{}", p[0], p[1]))
                    .collect::<Vec<_>>()
                    .join(", ");
                writeln!(out, "  {} = tristate({})", id, pairs)?;
            }
        }
    }
    Ok(())
}

pub fn netlist_to_string(design: &Design) -> String {
    let mut buf = Vec::new();
    write_netlist(design, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}
