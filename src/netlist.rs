use std::ops::Index;

use smallvec::SmallVec;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum NetKind {
    Wire,
    Reg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NetId(usize);

#[derive(Debug, Clone)]
pub struct Net {
    pub sym: String,
    pub width: u32,
    pub kind: NetKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Net(NetId),
    /// Literal sized to the width of the node output.
    Const(u128),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BinOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Sub,
}

#[derive(Debug, Clone)]
pub enum Node {
    /// Register clocked on the rising edge of `clk` with an optional
    /// synchronous active-high reset to `rst_val`.
    Dff {
        clk: NetId,
        rst: Option<NetId>,
        rst_val: u128,
        data: NetId,
        output: NetId,
    },
    BinOp {
        op: BinOp,
        lhs: Operand,
        rhs: Operand,
        output: NetId,
    },
    Pass {
        input: NetId,
        output: NetId,
    },
}

impl Node {
    pub fn output(&self) -> NetId {
        match self {
            Self::Dff { output, .. } | Self::BinOp { output, .. } | Self::Pass { output, .. } => {
                *output
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Module {
    name: String,
    nets: Vec<Net>,
    inputs: SmallVec<[NetId; 4]>,
    outputs: SmallVec<[NetId; 4]>,
    nodes: Vec<Node>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nets: Vec::new(),
            inputs: SmallVec::new(),
            outputs: SmallVec::new(),
            nodes: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_net(&mut self, sym: impl Into<String>, width: u32, kind: NetKind) -> NetId {
        let id = NetId(self.nets.len());
        self.nets.push(Net {
            sym: sym.into(),
            width,
            kind,
        });
        id
    }

    pub fn add_input(&mut self, sym: impl Into<String>, width: u32) -> NetId {
        let id = self.add_net(sym, width, NetKind::Wire);
        self.inputs.push(id);
        id
    }

    pub fn add_output(&mut self, sym: impl Into<String>, width: u32) -> NetId {
        let id = self.add_net(sym, width, NetKind::Wire);
        self.outputs.push(id);
        id
    }

    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn inputs(&self) -> impl Iterator<Item = NetId> + '_ {
        self.inputs.iter().copied()
    }

    pub fn outputs(&self) -> impl Iterator<Item = NetId> + '_ {
        self.outputs.iter().copied()
    }

    pub fn is_port(&self, id: NetId) -> bool {
        self.inputs.contains(&id) || self.outputs.contains(&id)
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

impl Index<NetId> for Module {
    type Output = Net;

    fn index(&self, id: NetId) -> &Self::Output {
        &self.nets[id.0]
    }
}
