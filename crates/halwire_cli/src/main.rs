//! halwire CLI — compiles wiring files into loadable HAL programs.
//!
//! Provides `halwire build` to compile a wiring file and write the primary
//! and postgui streams, and `halwire check` to compile without writing
//! output, reporting diagnostics only.

#![warn(missing_docs)]

mod build;
mod check;
mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// halwire — a wiring-expression compiler for LinuxCNC HAL.
#[derive(Parser, Debug)]
#[command(name = "halwire", version, about = "HAL wiring-expression compiler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a wiring file and write the HAL and postgui streams.
    Build(BuildArgs),
    /// Compile a wiring file and report diagnostics without writing output.
    Check(CheckArgs),
}

/// Arguments for `halwire build`.
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Path to the wiring file (TOML).
    pub file: PathBuf,

    /// Output directory (defaults to the wiring file's directory).
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for `halwire check`.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Path to the wiring file (TOML).
    pub file: PathBuf,
}

fn main() {
    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Build(args) => build::run(args, cli.quiet),
        Command::Check(args) => check::run(args, cli.quiet),
    };
    match result {
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(1);
        }
    }
}
