//! Recency Shell - interactive driver for the LRU cache engine

mod command;
mod handler;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::command::Command;
use crate::handler::CommandHandler;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of entries)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let mut handler = CommandHandler::new(args.capacity)
        .with_context(|| format!("cannot start a session with capacity {}", args.capacity))?;

    info!("Starting Recency Shell v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    println!("recency shell (capacity {})", args.capacity);
    println!("type HELP for the command list, QUIT to leave");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            // EOF, same as QUIT
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match command::parse(trimmed) {
            Ok(cmd) => {
                let quitting = matches!(cmd, Command::Quit);
                println!("{}", handler.handle(cmd));
                if quitting {
                    break;
                }
            }
            Err(msg) => {
                warn!("Rejected input: {}", trimmed);
                println!("error: {}", msg);
            }
        }
    }

    info!("Session closed");
    Ok(())
}
