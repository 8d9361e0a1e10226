//! Command-line configuration.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// What a load does when some candidates fail validation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LoadPolicy {
    /// Admit the valid records, report and drop the rest.
    #[default]
    SkipInvalid,
    /// Any invalid record voids the whole load; the catalog stays as it was.
    RejectBatch,
}

/// Interactive product catalog with schema-checked loads.
#[derive(Parser, Debug, Clone)]
#[command(name = "shopcat", version)]
#[command(about = "Keep a list of products, the shops that sell them and what they cost")]
pub struct Config {
    /// Default data file: loaded at startup when present, used by bare `save`/`load`
    #[arg(short = 'f', long = "file")]
    pub data_file: Option<PathBuf>,

    /// How loads treat records that fail validation
    #[arg(long, value_enum, default_value_t = LoadPolicy::SkipInvalid)]
    pub load_policy: LoadPolicy,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the record JSON Schema and exit
    #[arg(long)]
    pub print_schema: bool,
}
