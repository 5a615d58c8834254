// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! scale - operator CLI for database updates and node conditions

mod color;
mod commands;
mod env;
mod exit_error;
mod logging;
mod output;
mod shutdown;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{db, node};
use exit_error::ExitError;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "scale", version = env::VERSION, about = "Scale maintenance tools", styles = color::styles())]
struct Cli {
    /// State directory (default: $SCALE_STATE_DIR or the platform state dir)
    #[arg(long, global = true, value_name = "DIR")]
    state_dir: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Database update and state management
    Db(db::DbArgs),
    /// Node condition tracking
    Node(node::NodeArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let guard = match logging::init(cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    };

    let result = run(cli).await;
    // Flush buffered log lines before exiting
    drop(guard);

    if let Err(e) = result {
        let code = match e.downcast_ref::<ExitError>() {
            Some(exit) => exit.code,
            None => 1,
        };
        eprintln!("error: {e:#}");
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Db(args) => {
            let state_dir = match cli.state_dir {
                Some(dir) => dir,
                None => env::state_dir()?,
            };
            db::handle(args.command, &state_dir, cli.format).await
        }
        Command::Node(args) => node::handle(args.command, cli.format),
    }
}
