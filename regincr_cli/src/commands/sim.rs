use std::path::PathBuf;

use clap::Args;
use regincr::prelude::*;

use super::Run;

#[derive(Debug, Args)]
pub struct SimArgs {
    /// Input values, one per cycle (decimal, 0x hex or 0b binary)
    values: Vec<Word>,
    /// Hold reset asserted on every cycle
    #[arg(long)]
    reset: bool,
    /// Skip the initial two-cycle reset sequence
    #[arg(long)]
    no_sim_reset: bool,
    /// Print a line trace per cycle instead of bare output values
    #[arg(long)]
    trace: bool,
    /// Dump waveforms to a VCD file
    #[arg(long, value_name = "PATH")]
    vcd: Option<PathBuf>,
}

impl SimArgs {
    /// Runs the simulation and returns the lines to print.
    fn simulate(&self) -> anyhow::Result<Vec<String>> {
        let mut sim = Simulator::<RegIncr>::new().with_line_trace(self.trace);
        if let Some(path) = &self.vcd {
            sim = sim.open_vcd(path)?;
        }

        if !self.no_sim_reset {
            sim.sim_reset()?;
        }

        sim.set_reset(self.reset);
        let outputs = sim.run(self.values.iter().copied())?;
        sim.finish()?;

        Ok(if self.trace {
            sim.lines().to_vec()
        } else {
            outputs.iter().map(ToString::to_string).collect()
        })
    }
}

impl Run for SimArgs {
    fn run(&self) -> anyhow::Result<()> {
        for line in self.simulate()? {
            println!("{line}");
        }

        Ok(())
    }
}
