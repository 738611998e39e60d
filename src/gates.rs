// SPDX-License-Identifier: Apache-2.0

//! Derived gate combinators, all expressed over the NAND/inverter
//! primitives. The optimizer only ever sees primitive nodes.

use crate::netlist::{Design, NodeId};

impl Design {
    pub fn and(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let n = self.nand(a, b);
        self.inv(n)
    }

    pub fn or(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let na = self.inv(a);
        let nb = self.inv(b);
        self.nand(na, nb)
    }

    pub fn xor(&mut self, a: NodeId, b: NodeId) -> NodeId {
        let ab = self.nand(a, b);
        let an = self.nand(a, ab);
        let bn = self.nand(b, ab);
        self.nand(an, bn)
    }

    /// Two-input multiplexer: `sel ? on_true : on_false`.
    pub fn mux(&mut self, sel: NodeId, on_true: NodeId, on_false: NodeId) -> NodeId {
        let nsel = self.inv(sel);
        let t = self.nand(sel, on_true);
        let f = self.nand(nsel, on_false);
        self.nand(t, f)
    }

    /// Two-inverter buffer; logically the identity.
    pub fn buffer(&mut self, a: NodeId) -> NodeId {
        let n = self.inv(a);
        self.inv(n)
    }

    /// Balanced OR reduction: the argument list is split in halves
    /// recursively, minimizing logical depth. A single element reduces to
    /// itself without creating nodes.
    pub fn or_tree(&mut self, args: &[NodeId]) -> NodeId {
        assert!(!args.is_empty(), "or_tree over an empty list");
        if args.len() == 1 {
            return args[0];
        }
        let (lhs, rhs) = args.split_at(args.len() / 2);
        let l = self.or_tree(lhs);
        let r = self.or_tree(rhs);
        self.or(l, r)
    }
}
