use std::collections::BTreeSet;
use std::fmt;

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// Outcome – the `class` column
// ---------------------------------------------------------------------------

/// Launch outcome. Ordered so that failure (0) sorts before success (1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value as stored in the source table.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        self == Outcome::Success
    }
}

impl TryFrom<i64> for Outcome {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(format!("class must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub booster_version_category: String,
    pub outcome: Outcome,
}

impl LaunchRecord {
    pub fn new(site: &str, payload_mass_kg: f64, booster: &str, outcome: Outcome) -> Self {
        Self {
            site: site.to_string(),
            payload_mass_kg,
            booster_version_category: booster.to_string(),
            outcome,
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable launch table with its derived scalars.
///
/// A `LaunchDataset` is never empty, so `min_payload <= max_payload` always
/// holds.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchDataset {
    records: Vec<LaunchRecord>,
    min_payload: f64,
    max_payload: f64,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Sorted distinct booster version categories.
    booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    /// Validate the records and compute the derived columns.
    pub fn from_records(records: Vec<LaunchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();

        for (row, rec) in records.iter().enumerate() {
            let payload = rec.payload_mass_kg;
            if !payload.is_finite() || payload < 0.0 {
                return Err(DatasetError::InvalidPayload { row, value: payload });
            }
            min_payload = min_payload.min(payload);
            max_payload = max_payload.max(payload);

            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());
        }

        Ok(LaunchDataset {
            records,
            min_payload,
            max_payload,
            sites,
            booster_categories,
        })
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn min_payload(&self) -> f64 {
        self.min_payload
    }

    pub fn max_payload(&self) -> f64 {
        self.max_payload
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<LaunchRecord> {
        vec![
            LaunchRecord::new("VAFB SLC-4E", 9600.0, "FT", Outcome::Success),
            LaunchRecord::new("CCAFS LC-40", 0.0, "v1.0", Outcome::Failure),
            LaunchRecord::new("VAFB SLC-4E", 500.0, "v1.1", Outcome::Failure),
            LaunchRecord::new("KSC LC-39A", 3100.0, "FT", Outcome::Success),
        ]
    }

    #[test]
    fn computes_payload_bounds() {
        let ds = LaunchDataset::from_records(sample()).unwrap();
        assert_eq!(ds.min_payload(), 0.0);
        assert_eq!(ds.max_payload(), 9600.0);
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn sites_keep_first_appearance_order() {
        let ds = LaunchDataset::from_records(sample()).unwrap();
        assert_eq!(ds.sites(), ["VAFB SLC-4E", "CCAFS LC-40", "KSC LC-39A"]);
        assert!(ds.has_site("KSC LC-39A"));
        assert!(!ds.has_site("ALL"));
    }

    #[test]
    fn booster_categories_are_sorted_and_distinct() {
        let ds = LaunchDataset::from_records(sample()).unwrap();
        let cats: Vec<&str> = ds.booster_categories().iter().map(String::as_str).collect();
        assert_eq!(cats, ["FT", "v1.0", "v1.1"]);
    }

    #[test]
    fn empty_dataset_is_rejected() {
        assert_eq!(LaunchDataset::from_records(Vec::new()), Err(DatasetError::Empty));
    }

    #[test]
    fn negative_or_nan_payload_is_rejected() {
        let mut records = sample();
        records[2].payload_mass_kg = -1.0;
        assert_eq!(
            LaunchDataset::from_records(records),
            Err(DatasetError::InvalidPayload { row: 2, value: -1.0 })
        );

        let mut records = sample();
        records[0].payload_mass_kg = f64::NAN;
        assert!(matches!(
            LaunchDataset::from_records(records),
            Err(DatasetError::InvalidPayload { row: 0, .. })
        ));
    }

    #[test]
    fn outcome_orders_failure_first() {
        assert!(Outcome::Failure < Outcome::Success);
        assert_eq!(Outcome::try_from(1_i64), Ok(Outcome::Success));
        assert!(Outcome::try_from(2_i64).is_err());
        assert_eq!(Outcome::Failure.to_string(), "0");
    }
}
