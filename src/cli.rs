use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Synchronize employee roster exports into SQL UPSERT batches", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate an idempotent SQL UPSERT batch from a roster CSV export
    Generate(GenerateArgs),
    /// Insert new empty roster columns after an anchor column, idempotently
    Augment(AugmentArgs),
    /// Validate the structure of a roster CSV before it enters the pipeline
    Check(CheckArgs),
    /// Print the target table schema, optionally exporting it as JSON
    Schema(SchemaArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Roster CSV export to read
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination SQL batch file
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct AugmentArgs {
    /// Roster CSV file to evolve
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// Destination CSV file with the new columns
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,
    /// Columns to insert, as `new_column:anchor_column` pairs; each new
    /// column lands immediately after its anchor with an empty default
    #[arg(
        long = "add",
        action = clap::ArgAction::Append,
        default_values_t = ["glovo:flota".to_string(), "uber_eats:glovo".to_string()]
    )]
    pub add: Vec<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Roster CSV file to validate
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input file (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Also write the schema as JSON to this path
    #[arg(short, long)]
    pub meta: Option<PathBuf>,
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
