//! Multi-source load pipeline.
//!
//! [`load`] concatenates every source in argument order, source by source,
//! rows within a source in file order. Source-level failures (unreachable
//! input, missing required column, header drift between sources, undecodable
//! bytes, ragged rows) abort the whole load; row-level coordinate failures
//! are dropped by policy, counted in a [`LoadReport`], and logged without
//! ever failing the call.
//!
//! [`TableCache`] owns the memoized results: one computed table per distinct
//! ordered source-identity list, shared read-only for the life of the
//! process.

use std::collections::BTreeMap;

use encoding_rs::{Encoding, UTF_8};
use log::{debug, info};

use crate::{
    error::LoadError,
    schema::{self, ColumnLayout},
    source::{self, Source},
    station::{DropReason, StationRecord},
    table::StationTable,
};

/// Read options shared by every source of one load.
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Delimiter override; resolved per source from the extension when unset.
    pub delimiter: Option<u8>,
    /// Text encoding of all inputs.
    pub encoding: &'static Encoding,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: None,
            encoding: UTF_8,
        }
    }
}

/// Accounting of the silent row-drop policy. Dropping stays policy rather
/// than error; the report only makes it observable.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_shape: usize,
    pub dropped_number: usize,
    pub dropped_bounds: usize,
}

impl LoadReport {
    pub fn rows_dropped(&self) -> usize {
        self.dropped_shape + self.dropped_number + self.dropped_bounds
    }

    pub fn count_for(&self, reason: DropReason) -> usize {
        match reason {
            DropReason::CoordinateShape => self.dropped_shape,
            DropReason::CoordinateNumber => self.dropped_number,
            DropReason::OutOfBounds => self.dropped_bounds,
        }
    }

    fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::CoordinateShape => self.dropped_shape += 1,
            DropReason::CoordinateNumber => self.dropped_number += 1,
            DropReason::OutOfBounds => self.dropped_bounds += 1,
        }
    }

    fn merge(&mut self, other: LoadReport) {
        self.rows_read += other.rows_read;
        self.rows_kept += other.rows_kept;
        self.dropped_shape += other.dropped_shape;
        self.dropped_number += other.dropped_number;
        self.dropped_bounds += other.dropped_bounds;
    }
}

/// Builds the validated station table from one or more sources.
pub fn load(sources: &[Source], options: &LoadOptions) -> Result<StationTable, LoadError> {
    let (table, _) = load_with_report(sources, options)?;
    Ok(table)
}

/// [`load`], plus the drop accounting for callers that surface diagnostics.
pub fn load_with_report(
    sources: &[Source],
    options: &LoadOptions,
) -> Result<(StationTable, LoadReport), LoadError> {
    let mut http: Option<reqwest::blocking::Client> = None;
    let mut baseline: Option<(String, Vec<String>)> = None;
    let mut records: Vec<StationRecord> = Vec::new();
    let mut report = LoadReport::default();

    for raw_source in sources {
        let source_report = ingest_source(
            raw_source,
            options,
            &mut http,
            &mut baseline,
            &mut records,
        )?;
        report.merge(source_report);
    }

    info!(
        "Loaded {} station row(s) from {} source(s), {} dropped",
        records.len(),
        sources.len(),
        report.rows_dropped()
    );
    Ok((StationTable::new(records), report))
}

fn ingest_source(
    source: &Source,
    options: &LoadOptions,
    http: &mut Option<reqwest::blocking::Client>,
    baseline: &mut Option<(String, Vec<String>)>,
    records: &mut Vec<StationRecord>,
) -> Result<LoadReport, LoadError> {
    let id = source.id();
    let delimiter = source::resolve_input_delimiter(source, options.delimiter);
    debug!(
        "Reading '{}' with delimiter '{}'",
        id,
        source::printable_delimiter(delimiter)
    );

    let raw = source.open(http)?;
    let mut reader = source::open_csv_reader(raw, delimiter);

    let headers =
        source::reader_headers(&mut reader, options.encoding).map_err(|err| {
            LoadError::MalformedData {
                source: id.clone(),
                cause: format!("{err:#}"),
            }
        })?;
    let normalized = schema::normalize_headers(&headers);

    // All sources of one load must share an identical header row; the first
    // source sets the baseline.
    match baseline {
        Some((baseline_id, baseline_headers)) => {
            if *baseline_headers != normalized {
                return Err(LoadError::HeaderMismatch {
                    source: id,
                    baseline: baseline_id.clone(),
                });
            }
        }
        None => *baseline = Some((id.clone(), normalized)),
    }

    let layout = ColumnLayout::resolve(&headers, &id)?;
    let mut report = LoadReport::default();

    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.map_err(|err| LoadError::MalformedData {
            source: id.clone(),
            cause: format!("row {}: {err}", row_idx + 2),
        })?;
        let decoded =
            source::decode_record(&record, options.encoding).map_err(|err| {
                LoadError::MalformedData {
                    source: id.clone(),
                    cause: format!("row {}: {err:#}", row_idx + 2),
                }
            })?;
        report.rows_read += 1;

        let pick = |idx: usize| decoded.get(idx).map(String::as_str).unwrap_or("");
        match StationRecord::build(
            pick(layout.station_name),
            pick(layout.address),
            pick(layout.lat_lon),
            pick(layout.charger_type),
            pick(layout.facility_major),
            pick(layout.facility_minor),
        ) {
            Ok(station) => {
                report.rows_kept += 1;
                records.push(station);
            }
            Err(reason) => report.record_drop(reason),
        }
    }

    info!(
        "✓ '{}': kept {} of {} row(s)",
        id, report.rows_kept, report.rows_read
    );
    for reason in DropReason::ALL {
        let count = report.count_for(reason);
        if count > 0 {
            debug!("'{}': {} row(s) dropped ({})", id, count, reason.label());
        }
    }
    Ok(report)
}

/// Explicit memoization of computed tables, keyed by the ordered
/// source-identity list. Sources are treated as immutable once named: a
/// cache hit never re-reads them. Read options are fixed per instance, so
/// one cache never mixes encodings or delimiters for the same key.
pub struct TableCache {
    options: LoadOptions,
    entries: BTreeMap<Vec<String>, StationTable>,
}

impl TableCache {
    pub fn new(options: LoadOptions) -> TableCache {
        TableCache {
            options,
            entries: BTreeMap::new(),
        }
    }

    /// Single load entry point: check, compute on miss, store, hand out the
    /// shared read-only table.
    pub fn table(&mut self, sources: &[Source]) -> Result<&StationTable, LoadError> {
        let key: Vec<String> = sources.iter().map(Source::id).collect();
        if !self.entries.contains_key(&key) {
            debug!("Table cache miss for {key:?}");
            let table = load(sources, &self.options)?;
            self.entries.insert(key.clone(), table);
        }
        Ok(self
            .entries
            .get(&key)
            .expect("Entry inserted by the miss branch above"))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
