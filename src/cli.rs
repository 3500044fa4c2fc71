use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about = "Clean and query EV charging-station CSV data", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate station sources and emit the cleaned table
    Clean(CleanArgs),
    /// List the distinct provinces present in the data
    Provinces(ProvincesArgs),
    /// List the districts of one province
    Districts(DistrictsArgs),
    /// Select the stations of one region
    Filter(FilterArgs),
    /// Aggregate charger rows into one summary row per station
    Summarize(SummarizeArgs),
    /// Look up which vehicles a charger type supports
    Vehicles(VehiclesArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
#[value(rename_all = "kebab-case")]
pub enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Csv
    }
}

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// One or more station CSV sources (file path, URL, or `-` for stdin)
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<String>,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input sources (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,
    /// Limit number of rows emitted
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ProvincesArgs {
    /// One or more station CSV sources (file path, URL, or `-` for stdin)
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input sources (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,
    /// Include station counts next to each province
    #[arg(long)]
    pub counts: bool,
}

#[derive(Debug, Args)]
pub struct DistrictsArgs {
    /// One or more station CSV sources (file path, URL, or `-` for stdin)
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<String>,
    /// Province whose districts to list
    #[arg(short, long)]
    pub province: String,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input sources (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,
    /// Include station counts next to each district
    #[arg(long)]
    pub counts: bool,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// One or more station CSV sources (file path, URL, or `-` for stdin)
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<String>,
    /// Province to select
    #[arg(short, long)]
    pub province: String,
    /// District within the province (all districts if omitted)
    #[arg(short, long)]
    pub district: Option<String>,
    /// Output CSV file (stdout if omitted)
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input sources (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,
    /// Limit number of rows emitted
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// One or more station CSV sources (file path, URL, or `-` for stdin)
    #[arg(short = 'i', long = "input", required = true, action = clap::ArgAction::Append)]
    pub inputs: Vec<String>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter)]
    pub delimiter: Option<u8>,
    /// Character encoding of the input sources (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
    /// Output format
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct VehiclesArgs {
    /// Charger type string as it appears in the source data
    pub charger_type: String,
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
