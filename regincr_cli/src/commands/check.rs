use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::Args;
use regincr::prelude::*;

use super::Run;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Test-vector file: `<in> <out>` per line, `?` for don't-care
    file: PathBuf,
    /// Print a line trace per cycle
    #[arg(long)]
    trace: bool,
}

impl CheckArgs {
    /// Plays the vectors in `text`, writing line traces to `out` when
    /// enabled. Returns the number of vectors checked.
    fn check(&self, text: &str, out: &mut impl Write) -> anyhow::Result<usize> {
        let vectors: TestVectors<RegIncr> = text.parse()?;

        let mut sim = Simulator::new().with_line_trace(self.trace);
        let res = vectors.run(&mut sim);

        for line in sim.lines() {
            writeln!(out, "{line}")?;
        }
        res?;

        Ok(vectors.len())
    }
}

impl Run for CheckArgs {
    fn run(&self) -> anyhow::Result<()> {
        let text = fs::read_to_string(&self.file)
            .with_context(|| format!("failed to read {}", self.file.display()))?;

        let passed = self.check(&text, &mut io::stdout().lock())?;
        println!("{passed} test vectors passed");

        Ok(())
    }
}
