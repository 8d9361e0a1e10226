//! Interactive product catalog.
//!
//! Reads commands from stdin until `exit` or end of input. With `--file`, the
//! data file is loaded at startup (when present) and becomes the default
//! target of `save` and `load`.

use anyhow::{Context, Result};
use clap::Parser;
use shopcat::logging::init_logger;
use shopcat::{Config, Ledger, Shell};
use std::io;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::parse();
    init_logger(config.verbose);

    let ledger = Ledger::new(config.load_policy).context("initializing record validator")?;
    if config.print_schema {
        let schema = serde_json::to_string_pretty(ledger.validator().schema_document())?;
        println!("{schema}");
        return Ok(());
    }

    tracing::debug!(?config, "starting shopcat");
    let stdin = io::stdin();
    let mut shell = Shell::new(ledger, stdin.lock(), io::stdout(), io::stderr())
        .with_data_file(config.data_file.clone());

    shell
        .load_data_file()
        .context("loading startup data file")?;
    shell.run().context("interactive session failed")?;
    Ok(())
}
