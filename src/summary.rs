use std::collections::HashMap;

use itertools::Itertools;
use serde::Serialize;

use crate::{station::StationRecord, table::StationTable};

/// One aggregated station: every charger row sharing an identical
/// (latitude, longitude, station name, address) key, in first-appearance
/// order of the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationSummary {
    pub station_name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub charger_type: String,
    pub facility_major: String,
    pub facility_minor: String,
    pub charger_count: usize,
}

/// Grouping is exact-match on all four key fields. Coordinate equality is
/// deliberately exact rather than tolerance-based, so the same station
/// printed with different float formatting across sources forms separate
/// groups. In-bounds coordinates exclude NaN and ±0, so bit equality here
/// coincides with float equality.
#[derive(PartialEq, Eq, Hash)]
struct GroupKey {
    lat_bits: u64,
    lon_bits: u64,
    station_name: String,
    address: String,
}

impl GroupKey {
    fn of(record: &StationRecord) -> GroupKey {
        GroupKey {
            lat_bits: record.latitude.to_bits(),
            lon_bits: record.longitude.to_bits(),
            station_name: record.station_name.clone(),
            address: record.address.clone(),
        }
    }
}

struct Group {
    first: StationRecord,
    charger_types: Vec<String>,
    count: usize,
}

/// Collapses charger rows into one summary row per station. The merged
/// charger-type string is the sorted deduplicated comma-join of the group's
/// values; the facility pair is the first one seen; `charger_count` is the
/// number of grouped rows.
pub fn summarize_by_station(table: &StationTable) -> Vec<StationSummary> {
    let mut slots: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<Group> = Vec::new();

    for record in table.iter() {
        let key = GroupKey::of(record);
        match slots.get(&key) {
            Some(&slot) => {
                let group = &mut groups[slot];
                group.count += 1;
                group.charger_types.push(record.charger_type.clone());
            }
            None => {
                slots.insert(key, groups.len());
                groups.push(Group {
                    first: record.clone(),
                    charger_types: vec![record.charger_type.clone()],
                    count: 1,
                });
            }
        }
    }

    groups
        .into_iter()
        .map(|group| StationSummary {
            station_name: group.first.station_name,
            address: group.first.address,
            latitude: group.first.latitude,
            longitude: group.first.longitude,
            charger_type: group.charger_types.iter().unique().sorted().join(","),
            facility_major: group.first.facility_major,
            facility_minor: group.first.facility_minor,
            charger_count: group.count,
        })
        .collect()
}
