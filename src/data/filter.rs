use std::fmt;

use serde::Serialize;

use super::model::{LaunchDataset, LaunchRecord};
use crate::error::ControlError;

/// Selector value standing for "every site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Site selector
// ---------------------------------------------------------------------------

/// Dropdown value: every site, or one site observed in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelector {
    #[default]
    All,
    Site(String),
}

impl SiteSelector {
    /// Interpret a raw control value; `"ALL"` is the sentinel.
    pub fn parse(value: &str) -> Self {
        if value == ALL_SITES {
            SiteSelector::All
        } else {
            SiteSelector::Site(value.to_string())
        }
    }

    /// Reject sites that are not part of the dataset. `All` never fails.
    pub fn validate(&self, dataset: &LaunchDataset) -> Result<(), ControlError> {
        match self {
            SiteSelector::All => Ok(()),
            SiteSelector::Site(site) if dataset.has_site(site) => Ok(()),
            SiteSelector::Site(site) => Err(ControlError::InvalidSelection(site.clone())),
        }
    }

    /// Whether a record belongs to the selection.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        self.matches_site(&record.site)
    }

    pub fn matches_site(&self, site: &str) -> bool {
        match self {
            SiteSelector::All => true,
            SiteSelector::Site(selected) => selected == site,
        }
    }

    /// Dropdown label.
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::All => "All Sites",
            SiteSelector::Site(site) => site,
        }
    }

    /// Every valid selector for a dataset: `All` first, then each site.
    pub fn options(dataset: &LaunchDataset) -> Vec<SiteSelector> {
        std::iter::once(SiteSelector::All)
            .chain(dataset.sites().iter().cloned().map(SiteSelector::Site))
            .collect()
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelector::All => write!(f, "{ALL_SITES}"),
            SiteSelector::Site(site) => write!(f, "{site}"),
        }
    }
}

impl Serialize for SiteSelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

/// Inclusive payload mass bounds in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// `(min_payload, max_payload)` of the dataset: keeps every record.
    pub fn full(dataset: &LaunchDataset) -> Self {
        Self::new(dataset.min_payload(), dataset.max_payload())
    }

    /// Require `0 <= low <= high <= max_payload`.
    pub fn validate(&self, dataset: &LaunchDataset) -> Result<(), ControlError> {
        let max = dataset.max_payload();
        let ok = self.low >= 0.0 && self.low <= self.high && self.high <= max;
        if ok {
            Ok(())
        } else {
            Err(ControlError::InvalidRange {
                low: self.low,
                high: self.high,
                max,
            })
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, payload: f64) -> bool {
        self.low <= payload && payload <= self.high
    }
}
