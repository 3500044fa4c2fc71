use serde::Serialize;

/// South Korea bounding box, strict on both ends. Coordinates outside it
/// are treated as typos, swapped fields, or placeholder junk and dropped.
pub const LAT_MIN: f64 = 33.0;
pub const LAT_MAX: f64 = 39.0;
pub const LON_MIN: f64 = 124.0;
pub const LON_MAX: f64 = 132.0;

/// One validated charger row. `province`/`district` are the first two
/// whitespace tokens of the free-text address; they are filter keys, not
/// authoritative region codes. Addresses with fewer than two tokens keep
/// their record but stay out of region enumeration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationRecord {
    pub station_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub charger_type: String,
    pub facility_major: String,
    pub facility_minor: String,
    pub province: Option<String>,
    pub district: Option<String>,
}

impl StationRecord {
    /// Builds a record from decoded required fields, applying the coordinate
    /// validation policy. A failed build is a per-row drop, never an error.
    pub fn build(
        station_name: &str,
        address: &str,
        lat_lon: &str,
        charger_type: &str,
        facility_major: &str,
        facility_minor: &str,
    ) -> Result<StationRecord, DropReason> {
        let (latitude, longitude) = parse_lat_lon(lat_lon)?;
        if !in_bounds(latitude, longitude) {
            return Err(DropReason::OutOfBounds);
        }
        let (province, district) = region_tokens(address);
        Ok(StationRecord {
            station_name: station_name.to_string(),
            address: address.to_string(),
            latitude,
            longitude,
            charger_type: charger_type.to_string(),
            facility_major: facility_major.to_string(),
            facility_minor: facility_minor.to_string(),
            province,
            district,
        })
    }
}

/// Why a row was excluded from the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The combined coordinate field does not contain exactly one comma.
    CoordinateShape,
    /// A coordinate piece does not convert to a float.
    CoordinateNumber,
    /// Coordinates convert but fall outside the country bounding box.
    OutOfBounds,
}

impl DropReason {
    pub const ALL: [DropReason; 3] = [
        DropReason::CoordinateShape,
        DropReason::CoordinateNumber,
        DropReason::OutOfBounds,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DropReason::CoordinateShape => "malformed coordinate field",
            DropReason::CoordinateNumber => "non-numeric coordinate",
            DropReason::OutOfBounds => "coordinates outside bounding box",
        }
    }
}

/// Splits the combined `"위도,경도"` field. Exactly one comma is supported;
/// anything else is unsupported input and fails the row. Pieces are trimmed
/// before conversion so `"37.50, 127.03"` parses.
pub fn parse_lat_lon(combined: &str) -> Result<(f64, f64), DropReason> {
    let mut pieces = combined.split(',');
    let (Some(lat_raw), Some(lon_raw), None) = (pieces.next(), pieces.next(), pieces.next())
    else {
        return Err(DropReason::CoordinateShape);
    };
    let latitude = lat_raw
        .trim()
        .parse::<f64>()
        .map_err(|_| DropReason::CoordinateNumber)?;
    let longitude = lon_raw
        .trim()
        .parse::<f64>()
        .map_err(|_| DropReason::CoordinateNumber)?;
    Ok((latitude, longitude))
}

/// Strict bounding-box test. NaN fails every comparison and is rejected
/// with everything else outside the box.
pub fn in_bounds(latitude: f64, longitude: f64) -> bool {
    latitude > LAT_MIN && latitude < LAT_MAX && longitude > LON_MIN && longitude < LON_MAX
}

/// First and second whitespace-delimited tokens of an address.
pub fn region_tokens(address: &str) -> (Option<String>, Option<String>) {
    let mut tokens = address.split_whitespace();
    let province = tokens.next().map(str::to_string);
    let district = tokens.next().map(str::to_string);
    (province, district)
}
