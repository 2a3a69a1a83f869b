use std::io::{self, IsTerminal};

use clap::{Parser, ValueEnum};
use commands::Commands;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

mod commands;

const LOG_ENV_VAR: &str = "REGINCR_LOG";

#[derive(Parser)]
#[command(name = "regincr")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Use colors in log output
    #[arg(long, value_enum, default_value_t = Color::Auto, global = true)]
    color: Color,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Color {
    Never,
    Auto,
    Always,
}

impl Color {
    pub fn use_colors(&self) -> bool {
        match self {
            Self::Never => false,
            Self::Auto => io::stderr().is_terminal(),
            Self::Always => true,
        }
    }
}

fn init_logger(color: Color) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = Registry::default().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(color.use_colors())
            .with_target(true),
    );

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.color)?;

    cli.command.run()
}
