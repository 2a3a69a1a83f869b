//! Registered incrementer: an 8-bit value is read from `in_`, registered,
//! incremented by one and driven onto `out`.

use std::io;

use crate::{
    domain::{Clock, ClockDomain},
    netlist::{BinOp, Module, NetKind, Node, Operand},
    signal::{reg, Signal},
    simulator::Synchronous,
    trace::{TraceVars, Tracer},
    unsigned::U,
};

/// Module name used when translating to Verilog.
pub const MODULE_NAME: &str = "RegIncrRTL";

pub const WIDTH: usize = 8;

pub type Word = U<WIDTH>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegIncrState {
    pub reg_out: Word,
}

/// Clocked update: the register captures `in_`, or zero while `reset` is
/// asserted.
#[inline]
pub fn tick(_state: RegIncrState, in_: Word, reset: bool) -> RegIncrState {
    RegIncrState {
        reg_out: if reset { Word::zero() } else { in_ },
    }
}

/// Combinational path: register value plus one, wrapping at 256.
#[inline]
pub fn comb(state: RegIncrState) -> Word {
    state.reg_out + 1
}

/// `input (register) output`, each as zero-padded hex.
pub fn line_trace(in_: Word, state: RegIncrState, out: Word) -> String {
    let w = Word::hex_digits();
    format!("{in_:0w$x} ({:0w$x}) {out:0w$x}", state.reg_out)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RegIncr;

impl Synchronous for RegIncr {
    type Input = Word;
    type Output = Word;
    type State = RegIncrState;

    const NAME: &'static str = MODULE_NAME;

    fn tick(state: Self::State, input: Self::Input, reset: bool) -> Self::State {
        tick(state, input, reset)
    }

    fn comb(state: Self::State) -> Self::Output {
        comb(state)
    }

    fn line_trace(input: Self::Input, state: Self::State, output: Self::Output) -> String {
        line_trace(input, state, output)
    }

    fn trace_vars(vars: TraceVars) -> TraceVars {
        vars.var::<Word>("in_")
            .var::<Word>("reg_out")
            .var::<Word>("out")
    }

    fn trace(
        tracer: &mut Tracer,
        input: Self::Input,
        state: Self::State,
        output: Self::Output,
    ) -> io::Result<()> {
        tracer.change("in_", &input)?;
        tracer.change("reg_out", &state.reg_out)?;
        tracer.change("out", &output)
    }
}

/// Structural form of the same component built from clocked signals.
/// Returns `(register, out)`.
///
/// The register latches on a rising step what it sampled on the step before,
/// so sampled once per period it shows the state [`tick`] starts from.
pub fn reg_incr_signal<D: ClockDomain>(
    clk: &Clock<D>,
    rst: &Signal<D, bool>,
    in_: &Signal<D, Word>,
) -> Signal<D, (Word, Word)> {
    reg(clk, rst, Word::zero(), in_).map(|reg_out| (reg_out, comb(RegIncrState { reg_out })))
}

/// Netlist for Verilog translation: `clk`, `reset`, `in_` in, `out` out, one
/// register with synchronous active-high reset and one adder.
pub fn netlist(name: impl Into<String>) -> Module {
    let width = WIDTH as u32;
    let mut module = Module::new(name);

    let clk = module.add_input("clk", 1);
    let reset = module.add_input("reset", 1);
    let in_ = module.add_input("in_", width);
    let out = module.add_output("out", width);

    let reg_out = module.add_net("reg_out", width, NetKind::Reg);
    module.add_node(Node::Dff {
        clk,
        rst: Some(reset),
        rst_val: 0,
        data: in_,
        output: reg_out,
    });

    let temp_wire = module.add_net("temp_wire", width, NetKind::Wire);
    module.add_node(Node::BinOp {
        op: BinOp::Add,
        lhs: Operand::Net(reg_out),
        rhs: Operand::Const(1),
        output: temp_wire,
    });

    module.add_node(Node::Pass {
        input: temp_wire,
        output: out,
    });

    module
}
