//! `encryptor-keygen` — generate an `APP_KEY` for the encryption service.
//!
//! Startup sequence:
//! 1. Parse command-line arguments.
//! 2. Load and validate [`Config`](config::Config) from environment variables.
//! 3. Initialise structured JSON logging on stderr.
//! 4. Generate the key and print `APP_KEY="<value>"` on stdout.

mod cli;
mod config;
mod generate;
mod telemetry;

use anyhow::Result;
use clap::Parser;
use tracing::info;

fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Arguments
    // -----------------------------------------------------------------------
    let args = cli::Cli::parse();

    // -----------------------------------------------------------------------
    // 2. Configuration
    // -----------------------------------------------------------------------
    let cfg = config::Config::from_env().map_err(|e| {
        eprintln!("ERROR: encryptor-keygen configuration invalid: {e}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 3. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 4. Key
    // -----------------------------------------------------------------------
    let key = generate::generate_key(args.length, args.format)?;
    info!(length = args.length, format = %args.format, "generated key");
    println!("{}", generate::render_env_line(&key));
    Ok(())
}
