mod commands;
mod config;
mod recorder;
mod watcher;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{init, replay, scan, watch, InitArgs, ReplayArgs, ScanArgs, WatchArgs};
use tracing_subscriber::EnvFilter;

/// svgsync - keep SVG markup and its rendering pointed at the same elements
#[derive(Parser, Debug)]
#[command(name = "svgsync")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log engine decisions (debug level) unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default svgsync.config.json
    Init(InitArgs),

    /// List the elements of a document with their source ranges
    Scan(ScanArgs),

    /// Run a JSON script of sync events against a document
    Replay(ReplayArgs),

    /// Re-scan a document whenever it is saved
    Watch(WatchArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Scan(args) => scan(args, &cwd),
            Command::Replay(args) => replay(args, &cwd),
            Command::Watch(args) => watch(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
