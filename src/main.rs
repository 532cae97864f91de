//! Bankist Ledger CLI
//!
//! Seeds the four demo accounts, replays a CSV command log against them,
//! and writes the final account states to stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- commands.csv > accounts.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use bankist_ledger::{AppError, Ledger, Replay, Result};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(AppError::MissingArgument);
    }

    let input_path = &args[1];
    let file = File::open(input_path)?;
    let reader = BufReader::new(file);

    let mut replay = Replay::new(Ledger::demo());
    replay.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    replay.write_output(handle)?;

    Ok(())
}
