mod commands;
mod menu;

use anyhow::{Context, Result};
use bank_engine::Store;
use clap::Parser;
use commands::Args;
use menu::Session;
use std::io::Write;

fn main() -> Result<()> {
    // Parse the CLI arguments
    let args = Args::parse();

    init_logging(&args)?;

    // The outermost catch-all: engine errors are handled inside the
    // session, so anything surfacing here is unexpected. Log it and tell
    // the user rather than crashing silently.
    if let Err(e) = run(&args) {
        log::error!("{e:?}");
        println!(
            "Sorry! Something unexpected happened. If this problem persists please contact our support team for assistance."
        );
    }

    Ok(())
}

fn run(args: &Args) -> Result<()> {
    // 1. Load the bank from the store (or start empty)
    let store = Store::new(&args.store);
    let bank = store
        .load_or_default()
        .with_context(|| format!("Failed to load bank from {}", args.store.display()))?;

    // 2. Run the interactive menu until the user quits
    let stdin = std::io::stdin().lock();
    let stdout = std::io::stdout();
    let mut session = Session::new(stdin, stdout, bank, store);
    session.run().context("Menu session failed")?;

    Ok(())
}

/// Append `timestamp|level|message` lines to the log file.
/// `RUST_LOG` overrides the default debug level.
fn init_logging(args: &Args) -> Result<()> {
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)
        .with_context(|| format!("Failed to open log file: {}", args.log_file.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{}|{}|{}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    Ok(())
}
