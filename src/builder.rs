// SPDX-License-Identifier: Apache-2.0

//! Construction API for growing a [`Design`]. Primitive constructors are
//! append-only; feedback loops (a register whose D depends on its own Q) are
//! closed afterwards with [`Design::set_reg_d`].

use crate::netlist::{ClockDomain, Design, MemBank, MemId, Node, NodeId};

impl Design {
    pub fn lit(&mut self, value: bool) -> NodeId {
        self.append(Node::Lit { value })
    }

    /// Creates a module input port. Ports are externally driven and are
    /// liveness roots.
    pub fn input(&mut self, name: &str) -> NodeId {
        let id = self.append(Node::Input {
            name: name.to_string(),
        });
        self.register_port(id);
        id
    }

    pub fn inv(&mut self, a: NodeId) -> NodeId {
        self.validate_ref(a);
        self.append(Node::Inv { src: a })
    }

    pub fn nand(&mut self, a: NodeId, b: NodeId) -> NodeId {
        self.validate_ref(a);
        self.validate_ref(b);
        self.append(Node::Nand { a, b })
    }

    /// Edge-triggered flip-flop with initial value 0. The D input is a
    /// liveness root and may be retargeted later to close feedback loops.
    pub fn reg(&mut self, d: NodeId, cd: ClockDomain) -> NodeId {
        self.validate_ref(d);
        self.append(Node::Reg { d, cd })
    }

    /// Retargets a register's D input (slot 0).
    pub fn set_reg_d(&mut self, reg: NodeId, d: NodeId) {
        assert!(
            matches!(self.node(reg), Node::Reg { .. }),
            "set_reg_d on non-register {}",
            reg
        );
        self.change_net(reg, 0, d);
    }

    /// Creates an empty tristate bus node; drivers are attached with
    /// [`Design::tristate_connect`].
    pub fn tristate(&mut self) -> NodeId {
        self.append(Node::Tristate { src: vec![] })
    }

    /// Attaches an `(input, enable)` driver pair to a tristate node.
    pub fn tristate_connect(&mut self, t: NodeId, input: NodeId, enable: NodeId) {
        self.validate_ref(input);
        self.validate_ref(enable);
        let mut src = match self.node(t) {
            Node::Tristate { src } => src.clone(),
            other => panic!("tristate_connect on {} node {}", other.kind_name(), t),
        };
        src.push(input);
        src.push(enable);
        self.replace(t, Node::Tristate { src });
    }

    /// Creates a synchronous memory of `1 << abits` words by `width` bits
    /// with one write port and one read port, returning the read-data nodes
    /// (LSB first). All address and data inputs become liveness roots.
    pub fn memory(
        &mut self,
        abits: usize,
        init_file: Option<&str>,
        addr: &[NodeId],
        d: &[NodeId],
        wr_addr: &[NodeId],
        wr_en: NodeId,
    ) -> Vec<NodeId> {
        assert_eq!(addr.len(), abits, "read address must be {} bits", abits);
        assert_eq!(wr_addr.len(), abits, "write address must be {} bits", abits);
        for &id in addr.iter().chain(d.iter()).chain(wr_addr.iter()) {
            self.validate_ref(id);
        }
        self.validate_ref(wr_en);

        let width = d.len();
        let mem = self.add_mem_bank(MemBank {
            depth: 1 << abits,
            width,
            init_file: init_file.map(|s| s.to_string()),
        });
        let mut q = Vec::with_capacity(width);
        for bit in 0..width {
            let mut src = Vec::with_capacity(2 * abits + 2);
            src.extend_from_slice(addr);
            src.push(d[bit]);
            src.extend_from_slice(wr_addr);
            src.push(wr_en);
            q.push(self.append(Node::Mem {
                mem,
                bit,
                abits,
                src,
            }));
        }
        q
    }

    /// Splits a memory node's source list into its port fields.
    pub(crate) fn mem_ports(&self, id: NodeId) -> (MemId, usize, &[NodeId], NodeId, &[NodeId], NodeId) {
        match self.node(id) {
            Node::Mem {
                mem,
                bit,
                abits,
                src,
            } => {
                let addr = &src[..*abits];
                let d = src[*abits];
                let wr_addr = &src[*abits + 1..2 * *abits + 1];
                let wr_en = src[2 * *abits + 1];
                (*mem, *bit, addr, d, wr_addr, wr_en)
            }
            other => panic!("mem_ports on {} node {}", other.kind_name(), id),
        }
    }
}
