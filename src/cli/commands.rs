use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tb", about = concat!("[x] taskboard v", env!("CARGO_PKG_VERSION"), " - tasks, subtasks and notes in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Read config from this file instead of the default location
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (overrides [log].file)
    #[arg(long = "log-file", global = true)]
    pub log_file: Option<PathBuf>,

    /// Start with a task of this name (repeatable)
    #[arg(short = 't', long = "task", global = true, action = clap::ArgAction::Append)]
    pub tasks: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the starting board without opening the terminal UI
    Show,
}
