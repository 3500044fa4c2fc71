//! Command handlers behind the CLI subcommands. Each handler loads through
//! the shared pipeline, shapes rows for the requested format, and writes to
//! the chosen destination.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::{
    cli::{
        CleanArgs, DistrictsArgs, FilterArgs, OutputFormat, ProvincesArgs, SummarizeArgs,
        VehiclesArgs,
    },
    loader::{self, LoadOptions, TableCache},
    render,
    source::{self, Source},
    station::StationRecord,
    summary::{self, StationSummary},
    vehicles,
};

const RECORD_HEADERS: [&str; 9] = [
    "station_name",
    "address",
    "latitude",
    "longitude",
    "charger_type",
    "facility_major",
    "facility_minor",
    "province",
    "district",
];

const SUMMARY_HEADERS: [&str; 8] = [
    "station_name",
    "address",
    "latitude",
    "longitude",
    "charger_type",
    "facility_major",
    "facility_minor",
    "charger_count",
];

pub fn clean(args: &CleanArgs) -> Result<()> {
    let sources = parse_sources(&args.inputs);
    let options = load_options(args.delimiter, args.input_encoding.as_deref())?;
    let (table, report) = loader::load_with_report(&sources, &options)?;

    let limit = args.limit.unwrap_or(usize::MAX);
    let records: Vec<&StationRecord> = table.iter().take(limit).collect();
    match args.format {
        OutputFormat::Csv => {
            let rows = records.iter().map(|r| record_row(r)).collect::<Vec<_>>();
            write_csv(args.output.as_deref(), &RECORD_HEADERS, &rows)?;
        }
        OutputFormat::Table => {
            let rows = records.iter().map(|r| record_row(r)).collect::<Vec<_>>();
            write_table(args.output.as_deref(), &RECORD_HEADERS, &rows)?;
        }
        OutputFormat::Json => write_json(args.output.as_deref(), &records)?,
    }
    info!(
        "Emitted {} cleaned row(s), {} dropped during validation",
        records.len(),
        report.rows_dropped()
    );
    Ok(())
}

pub fn provinces(args: &ProvincesArgs) -> Result<()> {
    let sources = parse_sources(&args.inputs);
    let options = load_options(args.delimiter, args.input_encoding.as_deref())?;
    let mut cache = TableCache::new(options);
    let table = cache.table(&sources)?;

    if args.counts {
        let counts = table.province_counts();
        match args.format {
            OutputFormat::Json => {
                let items = counts
                    .iter()
                    .map(|(province, stations)| {
                        serde_json::json!({ "province": province, "stations": stations })
                    })
                    .collect::<Vec<_>>();
                write_json(None, &items)?;
            }
            format => {
                let rows = counts
                    .into_iter()
                    .map(|(province, stations)| vec![province, stations.to_string()])
                    .collect::<Vec<_>>();
                emit_listing(format, &["province", "stations"], &rows)?;
            }
        }
    } else {
        let names = table.provinces();
        match args.format {
            OutputFormat::Json => write_json(None, &names)?,
            format => {
                let rows = names.into_iter().map(|name| vec![name]).collect::<Vec<_>>();
                emit_listing(format, &["province"], &rows)?;
            }
        }
    }
    Ok(())
}

pub fn districts(args: &DistrictsArgs) -> Result<()> {
    let sources = parse_sources(&args.inputs);
    let options = load_options(args.delimiter, args.input_encoding.as_deref())?;
    let mut cache = TableCache::new(options);
    let table = cache.table(&sources)?;

    if args.counts {
        let counts = table.district_counts_in(&args.province);
        match args.format {
            OutputFormat::Json => {
                let items = counts
                    .iter()
                    .map(|(district, stations)| {
                        serde_json::json!({ "district": district, "stations": stations })
                    })
                    .collect::<Vec<_>>();
                write_json(None, &items)?;
            }
            format => {
                let rows = counts
                    .into_iter()
                    .map(|(district, stations)| vec![district, stations.to_string()])
                    .collect::<Vec<_>>();
                emit_listing(format, &["district", "stations"], &rows)?;
            }
        }
    } else {
        let names = table.districts_in(&args.province);
        match args.format {
            OutputFormat::Json => write_json(None, &names)?,
            format => {
                let rows = names.into_iter().map(|name| vec![name]).collect::<Vec<_>>();
                emit_listing(format, &["district"], &rows)?;
            }
        }
    }
    Ok(())
}

pub fn filter(args: &FilterArgs) -> Result<()> {
    let sources = parse_sources(&args.inputs);
    let options = load_options(args.delimiter, args.input_encoding.as_deref())?;
    let mut cache = TableCache::new(options);
    let table = cache.table(&sources)?;
    let selected = table.filter_region(&args.province, args.district.as_deref());

    let limit = args.limit.unwrap_or(usize::MAX);
    let records: Vec<&StationRecord> = selected.iter().take(limit).collect();
    match args.format {
        OutputFormat::Csv => {
            let rows = records.iter().map(|r| record_row(r)).collect::<Vec<_>>();
            write_csv(args.output.as_deref(), &RECORD_HEADERS, &rows)?;
        }
        OutputFormat::Table => {
            let rows = records.iter().map(|r| record_row(r)).collect::<Vec<_>>();
            write_table(args.output.as_deref(), &RECORD_HEADERS, &rows)?;
        }
        OutputFormat::Json => write_json(args.output.as_deref(), &records)?,
    }
    info!(
        "Selected {} station row(s) in '{}'",
        records.len(),
        args.province
    );
    Ok(())
}

pub fn summarize(args: &SummarizeArgs) -> Result<()> {
    let sources = parse_sources(&args.inputs);
    let options = load_options(args.delimiter, args.input_encoding.as_deref())?;
    let mut cache = TableCache::new(options);
    let table = cache.table(&sources)?;
    let summaries = summary::summarize_by_station(table);

    match args.format {
        OutputFormat::Json => write_json(None, &summaries)?,
        format => {
            let rows = summaries.iter().map(summary_row).collect::<Vec<_>>();
            emit_listing(format, &SUMMARY_HEADERS, &rows)?;
        }
    }
    info!(
        "Summarized {} charger row(s) into {} station(s)",
        table.len(),
        summaries.len()
    );
    Ok(())
}

pub fn vehicles(args: &VehiclesArgs) -> Result<()> {
    println!("{}", vehicles::vehicles_for(Some(&args.charger_type)));
    Ok(())
}

fn parse_sources(raw: &[String]) -> Vec<Source> {
    raw.iter().map(|value| Source::parse(value)).collect()
}

fn load_options(delimiter: Option<u8>, encoding: Option<&str>) -> Result<LoadOptions> {
    Ok(LoadOptions {
        delimiter,
        encoding: source::resolve_encoding(encoding)?,
    })
}

fn record_row(record: &StationRecord) -> Vec<String> {
    vec![
        record.station_name.clone(),
        record.address.clone(),
        record.latitude.to_string(),
        record.longitude.to_string(),
        record.charger_type.clone(),
        record.facility_major.clone(),
        record.facility_minor.clone(),
        record.province.clone().unwrap_or_default(),
        record.district.clone().unwrap_or_default(),
    ]
}

fn summary_row(summary: &StationSummary) -> Vec<String> {
    vec![
        summary.station_name.clone(),
        summary.address.clone(),
        summary.latitude.to_string(),
        summary.longitude.to_string(),
        summary.charger_type.clone(),
        summary.facility_major.clone(),
        summary.facility_minor.clone(),
        summary.charger_count.to_string(),
    ]
}

// CSV/table emission for listing commands; JSON is shaped per command
// before reaching here.
fn emit_listing(format: OutputFormat, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    if format == OutputFormat::Table {
        write_table(None, headers, rows)
    } else {
        write_csv(None, headers, rows)
    }
}

fn write_csv(output: Option<&Path>, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = source::open_csv_writer(output, b',')?;
    writer
        .write_record(headers)
        .context("Writing CSV header")?;
    for row in rows {
        writer.write_record(row).context("Writing CSV row")?;
    }
    writer.flush().context("Flushing CSV output")?;
    Ok(())
}

fn write_table(output: Option<&Path>, headers: &[&str], rows: &[Vec<String>]) -> Result<()> {
    let headers = headers
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();
    match output {
        Some(path) => {
            let rendered = render::render_table(&headers, rows);
            fs::write(path, rendered).with_context(|| format!("Writing table to {path:?}"))?;
        }
        None => render::print_table(&headers, rows),
    }
    Ok(())
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Serializing JSON output")?;
    match output {
        Some(path) => {
            fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Writing JSON to {path:?}"))?;
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
