pub mod backend;
mod buffer;
pub mod cast;
pub mod domain;
pub mod error;
pub mod eval;
pub mod harness;
pub mod netlist;
pub mod reg_incr;
pub mod signal;
pub mod simulator;
pub mod trace;
pub mod unsigned;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::{
        backend::Verilog,
        cast::{Cast, CastFrom},
        domain::{Clock, ClockDomain},
        error::{Error, Result},
        harness::TestVectors,
        reg_incr::{RegIncr, RegIncrState, Word, MODULE_NAME},
        signal::{reg, Signal, SignalValue, Source},
        simulator::{Simulator, Synchronous},
        unsigned::{Unsigned, U},
    };
}
