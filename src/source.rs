//! Source handles and I/O plumbing for charging-station data.
//!
//! A [`Source`] names one raw table: a local CSV/TSV file, standard input
//! (the `-` path convention), or an HTTP(S) URL such as the GitHub raw
//! exports the public charger dataset is usually served from. All reader
//! and writer construction flows through this module:
//!
//! - **Delimiter resolution**: extension-based auto-detection (`.csv` →
//!   comma, `.tsv` → tab) with manual override support, applied to file
//!   paths and URL paths alike.
//! - **Encoding**: input decoding via `encoding_rs`, defaulting to UTF-8.
//!   Korean public-data portals still publish EUC-KR/CP949 exports, so the
//!   encoding label is caller-selectable.
//! - **Fetching**: URL sources are retrieved with a blocking `reqwest`
//!   client; a non-success status fails the source, with no retry.
//! - **Quoting**: CSV output uses `QuoteStyle::Always` for round-trip
//!   safety.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use csv::QuoteStyle;
use encoding_rs::{Encoding, UTF_8};

use crate::error::LoadError;

pub const DEFAULT_CSV_DELIMITER: u8 = b',';
pub const DEFAULT_TSV_DELIMITER: u8 = b'\t';

/// One raw tabular source, identified by how it is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Standard input, named by the `-` convention.
    Stdin,
    /// A file on disk.
    Path(PathBuf),
    /// An HTTP or HTTPS URL.
    Url(String),
}

impl Source {
    /// Classifies a raw `--input` value. Anything that is not `-` and does
    /// not start with an HTTP(S) scheme is treated as a file path.
    pub fn parse(raw: &str) -> Source {
        if raw == "-" {
            Source::Stdin
        } else if raw.starts_with("http://") || raw.starts_with("https://") {
            Source::Url(raw.to_string())
        } else {
            Source::Path(PathBuf::from(raw))
        }
    }

    /// Stable identity string. Tables are memoized keyed on these, so two
    /// spellings of the same file count as distinct sources.
    pub fn id(&self) -> String {
        match self {
            Source::Stdin => "-".to_string(),
            Source::Path(path) => path.display().to_string(),
            Source::Url(url) => url.clone(),
        }
    }

    /// Extension of the file or URL path, if any, for delimiter detection.
    fn extension(&self) -> Option<&str> {
        match self {
            Source::Stdin => None,
            Source::Path(path) => path.extension().and_then(|ext| ext.to_str()),
            Source::Url(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                let segment = path.rsplit('/').next().unwrap_or(path);
                segment.rsplit_once('.').map(|(_, ext)| ext)
            }
        }
    }

    /// Opens the raw byte stream for this source. `http` is created lazily
    /// by the first URL source and reused for the rest of the load.
    pub fn open(
        &self,
        http: &mut Option<reqwest::blocking::Client>,
    ) -> Result<Box<dyn Read>, LoadError> {
        match self {
            Source::Stdin => Ok(Box::new(std::io::stdin().lock())),
            Source::Path(path) => {
                let file = File::open(path).map_err(|err| LoadError::SourceUnreadable {
                    source: self.id(),
                    cause: err.to_string(),
                })?;
                Ok(Box::new(BufReader::new(file)))
            }
            Source::Url(url) => {
                let client = http.get_or_insert_with(reqwest::blocking::Client::new);
                let response = client
                    .get(url)
                    .send()
                    .and_then(|response| response.error_for_status())
                    .map_err(|err| LoadError::SourceUnreadable {
                        source: self.id(),
                        cause: err.to_string(),
                    })?;
                Ok(Box::new(response))
            }
        }
    }
}

pub fn resolve_encoding(label: Option<&str>) -> Result<&'static Encoding> {
    if let Some(value) = label {
        Encoding::for_label(value.trim().as_bytes())
            .ok_or_else(|| anyhow!("Unknown encoding '{value}'"))
    } else {
        Ok(UTF_8)
    }
}

pub fn resolve_input_delimiter(source: &Source, provided: Option<u8>) -> u8 {
    provided.unwrap_or_else(|| match source.extension() {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => DEFAULT_TSV_DELIMITER,
        _ => DEFAULT_CSV_DELIMITER,
    })
}

pub fn printable_delimiter(delimiter: u8) -> String {
    match delimiter {
        b',' => ",".to_string(),
        b'\t' => "\\t".to_string(),
        b'\n' => "\\n".to_string(),
        other => (other as char).to_string(),
    }
}

pub fn open_csv_reader(reader: Box<dyn Read>, delimiter: u8) -> csv::Reader<Box<dyn Read>> {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .delimiter(delimiter)
        .double_quote(true)
        .flexible(false);
    builder.from_reader(reader)
}

pub fn open_csv_writer(path: Option<&Path>, delimiter: u8) -> Result<csv::Writer<Box<dyn Write>>> {
    let target: Box<dyn Write> = match path {
        Some(p) if p != Path::new("-") => Box::new(BufWriter::new(
            File::create(p).with_context(|| format!("Creating output file {p:?}"))?,
        )),
        _ => Box::new(std::io::stdout()),
    };
    let mut builder = csv::WriterBuilder::new();
    builder
        .delimiter(delimiter)
        .quote_style(QuoteStyle::Always)
        .double_quote(true);
    Ok(builder.from_writer(target))
}

pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding) -> Result<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        Err(anyhow!(
            "Failed to decode text with encoding {}",
            encoding.name()
        ))
    } else {
        Ok(text.into_owned())
    }
}

pub fn decode_record(record: &csv::ByteRecord, encoding: &'static Encoding) -> Result<Vec<String>> {
    record
        .iter()
        .map(|field| decode_bytes(field, encoding))
        .collect()
}

pub fn reader_headers(
    reader: &mut csv::Reader<Box<dyn Read>>,
    encoding: &'static Encoding,
) -> Result<Vec<String>> {
    let headers = reader.byte_headers()?.clone();
    decode_record(&headers, encoding)
}
