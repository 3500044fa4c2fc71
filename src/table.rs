use std::collections::BTreeMap;

use itertools::Itertools;

use crate::station::StationRecord;

/// Immutable, ordered collection of validated station records.
///
/// A table is built once per distinct source set and shared read-only by
/// every consumer; region filtering produces a new table and leaves the
/// original untouched. Record order is the post-filter concatenation order
/// of the load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationTable {
    records: Vec<StationRecord>,
}

impl StationTable {
    pub(crate) fn new(records: Vec<StationRecord>) -> StationTable {
        StationTable { records }
    }

    pub fn records(&self) -> &[StationRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StationRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct provinces, sorted. Rows with no derivable province stay in
    /// the table but are unselectable, so they never appear here.
    pub fn provinces(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|record| record.province.as_deref())
            .unique()
            .sorted()
            .map(str::to_string)
            .collect()
    }

    /// Distinct districts among the rows of one province, sorted.
    pub fn districts_in(&self, province: &str) -> Vec<String> {
        self.records
            .iter()
            .filter(|record| record.province.as_deref() == Some(province))
            .filter_map(|record| record.district.as_deref())
            .unique()
            .sorted()
            .map(str::to_string)
            .collect()
    }

    /// New table holding the rows of one region, in original order. With no
    /// district every row of the province is kept, including rows whose
    /// district could not be derived.
    pub fn filter_region(&self, province: &str, district: Option<&str>) -> StationTable {
        let records = self
            .records
            .iter()
            .filter(|record| record.province.as_deref() == Some(province))
            .filter(|record| district.is_none() || record.district.as_deref() == district)
            .cloned()
            .collect();
        StationTable { records }
    }

    /// Provinces paired with their charger-row counts, sorted by province.
    pub fn province_counts(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in &self.records {
            if let Some(province) = &record.province {
                *counts.entry(province.clone()).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }

    /// Districts of one province paired with charger-row counts.
    pub fn district_counts_in(&self, province: &str) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in &self.records {
            if record.province.as_deref() != Some(province) {
                continue;
            }
            if let Some(district) = &record.district {
                *counts.entry(district.clone()).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }
}
