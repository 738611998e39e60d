// SPDX-License-Identifier: Apache-2.0

//! Literal canonicalization: collapse every constant node onto a shared
//! `Lit(0)` / `Lit(1)` pair so later passes can compare constants by id.

use anyhow::Result;

use crate::dce::opt_dead_node_elimination;
use crate::netlist::{Design, Node, NodeId, Substitutions};

pub fn opt_combine_literals(design: &mut Design) -> Result<()> {
    let n = design.len();
    let lit0 = design.append(Node::Lit { value: false });
    let lit1 = design.append(Node::Lit { value: true });

    let mut subs = Substitutions::new();
    for i in 0..n {
        let id = NodeId(i);
        if let Node::Lit { value } = design.node(id) {
            subs.insert(id, if *value { lit1 } else { lit0 });
        }
    }
    design.apply_substitutions(&subs);
    opt_dead_node_elimination(design)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn literal_census(d: &Design) -> (usize, usize) {
        let mut zeros = 0;
        let mut ones = 0;
        for (_, node) in d.iter() {
            if let Node::Lit { value } = node {
                if *value {
                    ones += 1;
                } else {
                    zeros += 1;
                }
            }
        }
        (zeros, ones)
    }

    #[test]
    fn test_duplicate_literals_collapse() {
        let mut d = Design::new();
        let z1 = d.lit(false);
        let z2 = d.lit(false);
        let o1 = d.lit(true);
        let o2 = d.lit(true);
        let n1 = d.nand(z1, o1);
        let n2 = d.nand(z2, o2);
        d.register_tap("a", n1);
        d.register_tap("b", n2);
        opt_combine_literals(&mut d).unwrap();
        assert_eq!(literal_census(&d), (1, 1));
        // Both NANDs now read the same canonical pair.
        let (a, b) = match (d.node(d.taps()[0].node), d.node(d.taps()[1].node)) {
            (Node::Nand { a, b }, Node::Nand { a: a2, b: b2 }) => {
                assert_eq!((a, b), (a2, b2));
                (*a, *b)
            }
            other => panic!("expected two NANDs, got {:?}", other),
        };
        assert_eq!(d.node(a), &Node::Lit { value: false });
        assert_eq!(d.node(b), &Node::Lit { value: true });
    }

    #[test]
    fn test_no_literals_leaves_design_unchanged() {
        let mut d = Design::new();
        let x = d.input("x");
        let inv = d.inv(x);
        d.register_tap("t", inv);
        opt_combine_literals(&mut d).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(literal_census(&d), (0, 0));
    }

    #[test]
    fn test_tapped_literal_moves_to_canonical_node() {
        let mut d = Design::new();
        let z = d.lit(false);
        let _z2 = d.lit(false);
        d.register_tap("t", z);
        opt_combine_literals(&mut d).unwrap();
        assert_eq!(d.len(), 1);
        assert_eq!(d.node(d.taps()[0].node), &Node::Lit { value: false });
    }
}
