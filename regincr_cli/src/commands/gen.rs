use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Args;
use regincr::{prelude::*, reg_incr};
use tracing::info;

use super::Run;

#[derive(Debug, Args)]
pub struct GenArgs {
    /// Name of the generated verilog module
    #[arg(long, default_value = MODULE_NAME)]
    module_name: String,
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

impl Run for GenArgs {
    fn run(&self) -> anyhow::Result<()> {
        let module = reg_incr::netlist(self.module_name.as_str());
        let verilog = Verilog::new(&module).generate();

        match &self.output {
            Some(path) => {
                fs::write(path, verilog)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!("module {} written to {}", module.name(), path.display());
            }
            None => print!("{verilog}"),
        }

        Ok(())
    }
}
