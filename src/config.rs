use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::{Parser, ValueHint};

use crate::data::filter::{PayloadRange, SiteSelector};

#[derive(Parser, Debug)]
#[command(author, version, about = "SpaceX launch records dashboard", long_about = None)]
pub struct Config {
    /// Launch table to open at startup (.csv, .json or .parquet)
    #[arg(
        short,
        long,
        env = "LAUNCH_DASHBOARD_DATA",
        default_value = "spacex_launch_dash.csv",
        value_hint = ValueHint::FilePath
    )]
    pub data: PathBuf,

    /// Payload slider step in kg
    #[arg(long, default_value_t = 1000.0)]
    pub payload_step: f64,

    /// Write the charts as JSON to this path and exit instead of opening a window
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub export: Option<PathBuf>,

    /// Launch site for --export ("ALL" for every site)
    #[arg(long, default_value = "ALL", requires = "export")]
    pub site: String,

    /// Payload range for --export; defaults to the dataset's full range
    #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], requires = "export")]
    pub payload_range: Option<Vec<f64>>,
}

impl Config {
    /// Reject settings the dashboard cannot use.
    pub fn validate(&self) -> Result<()> {
        if !(self.payload_step.is_finite() && self.payload_step > 0.0) {
            bail!("--payload-step must be a positive number, got {}", self.payload_step);
        }
        Ok(())
    }

    pub fn site_selector(&self) -> SiteSelector {
        SiteSelector::parse(&self.site)
    }

    pub fn payload_range(&self) -> Option<PayloadRange> {
        match self.payload_range.as_deref() {
            Some(&[low, high]) => Some(PayloadRange::new(low, high)),
            _ => None,
        }
    }
}
