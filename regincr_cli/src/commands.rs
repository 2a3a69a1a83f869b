use clap::Subcommand;

use self::{check::CheckArgs, gen::GenArgs, sim::SimArgs};

mod check;
mod gen;
mod sim;

#[derive(Subcommand)]
pub enum Commands {
    /// Simulate the registered incrementer over a list of input values
    Sim(SimArgs),
    /// Check the model against a test-vector file
    Check(CheckArgs),
    /// Generate a verilog file
    Gen(GenArgs),
}

pub trait Run {
    fn run(&self) -> anyhow::Result<()>;
}

impl Commands {
    pub fn run(&self) -> anyhow::Result<()> {
        match self {
            Self::Sim(args) => args.run(),
            Self::Check(args) => args.run(),
            Self::Gen(args) => args.run(),
        }
    }
}
