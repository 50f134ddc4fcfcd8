use clap::Parser;
use std::path::PathBuf;

use crate::adapters::outbound::formatters::{JsonFormatter, TextFormatter};
use crate::adapters::outbound::memory::RecordIdentifier;
use crate::ports::outbound::RelationshipFormatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'text' or 'json'",
                s
            )),
        }
    }
}

impl OutputFormat {
    /// Creates a formatter instance for the specified output format
    ///
    /// `colored` only affects text output.
    pub fn create_formatter(&self, colored: bool) -> Box<dyn RelationshipFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(colored)),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
        }
    }
}

/// Read a record relationship from a fixture and follow its load
#[derive(Parser, Debug)]
#[command(name = "fetch-data")]
#[command(version)]
#[command(about = "Read a record relationship from a fixture and follow its load", long_about = None)]
pub struct Args {
    /// Fixture file, or a directory containing fetch-data.config.yml
    #[arg(long, value_name = "PATH", default_value = ".")]
    pub fixture: PathBuf,

    /// Record to read from, as <type>:<id>
    #[arg(short, long, value_name = "TYPE:ID")]
    pub record: RecordIdentifier,

    /// Relationship name on the record
    #[arg(short = 'n', long, value_name = "NAME")]
    pub relationship: String,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Wrap the value as a { data } document
    #[arg(long)]
    pub document: bool,

    /// Give up if a load is still outstanding after this many milliseconds
    #[arg(long, value_name = "MS", default_value_t = 5_000)]
    pub wait_ms: u64,

    /// Log view internals to stderr (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}
