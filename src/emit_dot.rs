// SPDX-License-Identifier: Apache-2.0

//! Graphviz dot emission: one vertex per node, one edge per source
//! relationship (register D edges included). Taps render as labeled
//! double-circle observation vertices.

use std::io::{self, Write};

use crate::netlist::{Design, Node};

fn node_label(node: &Node) -> String {
    match node {
        Node::Lit { value } => format!("lit {}", u8::from(*value)),
        Node::Input { name } => format!("input {}", name),
        Node::Reg { cd, .. } => format!("reg cd{}", cd.0),
        Node::Mem { mem, bit, .. } => format!("mem m{}.{}", mem.0, bit),
        _ => node.kind_name().to_string(),
    }
}

pub fn write_dot<W: Write>(design: &Design, out: &mut W) -> io::Result<()> {
    writeln!(out, "digraph netlist {{")?;
    for (id, node) in design.iter() {
        writeln!(out, "  n{} [label=\"{}\"];", id.0, node_label(node))?;
    }
    for (id, node) in design.iter() {
        for src in node.rewrite_slots() {
            writeln!(out, "  n{} -> n{};", src.0, id.0)?;
        }
    }
    for (i, tap) in design.taps().iter().enumerate() {
        writeln!(out, "  t{} [label=\"{}\" shape=doublecircle];", i, tap.name)?;
        writeln!(out, "  n{} -> t{};", tap.node.0, i)?;
    }
    writeln!(out, "}}")?;
    Ok(())
}
