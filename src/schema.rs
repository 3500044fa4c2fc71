//! Required-column registry and header resolution.
//!
//! Charging-station exports carry the Korean headers of the public dataset
//! (`충전소명`, `주소`, `위도경도`, ...); re-published copies often rename
//! them to snake_case English. Both spellings resolve to the same columns
//! here. Headers are matched exactly after normalization (leading BOM
//! stripped, surrounding whitespace trimmed); there is no fuzzy matching.
//!
//! The optional charger-id column (`충전기ID`/`charger_id`) is accepted in
//! the input but never resolved: charger counts are per-row, so the id adds
//! nothing.

use crate::error::LoadError;

/// Canonical (Korean) and alias (English) spellings of the six required
/// columns, in dataset order.
const REQUIRED_COLUMNS: &[(&str, &str)] = &[
    ("충전소명", "station_name"),
    ("주소", "address"),
    ("위도경도", "lat_lon"),
    ("충전기타입", "charger_type"),
    ("시설구분(대)", "facility_major"),
    ("시설구분(소)", "facility_minor"),
];

/// Positions of the required fields within one source's header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub station_name: usize,
    pub address: usize,
    pub lat_lon: usize,
    pub charger_type: usize,
    pub facility_major: usize,
    pub facility_minor: usize,
}

impl ColumnLayout {
    /// Resolves every required column against a decoded header row.
    /// The first missing column fails the source with a schema error.
    pub fn resolve(headers: &[String], source: &str) -> Result<ColumnLayout, LoadError> {
        let normalized = normalize_headers(headers);
        let mut positions = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, (canonical, alias)) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = normalized
                .iter()
                .position(|header| header == canonical || header == alias)
                .ok_or_else(|| LoadError::MissingColumn {
                    source: source.to_string(),
                    column: format!("'{canonical}' (alias '{alias}')"),
                })?;
        }
        let [station_name, address, lat_lon, charger_type, facility_major, facility_minor] =
            positions;
        Ok(ColumnLayout {
            station_name,
            address,
            lat_lon,
            charger_type,
            facility_major,
            facility_minor,
        })
    }
}

/// Strips a leading UTF-8 BOM (common on Windows-authored exports) and
/// surrounding whitespace, including the ideographic space U+3000.
pub fn normalize_header(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_string()
}

pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    headers.iter().map(|h| normalize_header(h)).collect()
}
