use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::chart::{ProportionChart, ScatterChart};
use crate::data::filter::{PayloadRange, SiteSelector};
use crate::state::Dashboard;

/// Control values and the charts they produce, as written to disk.
#[derive(Debug, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub site: &'a SiteSelector,
    pub payload_range: PayloadRange,
    pub proportion: &'a ProportionChart,
    pub scatter: &'a ScatterChart,
}

impl<'a> DashboardSnapshot<'a> {
    pub fn of(dashboard: &'a Dashboard) -> Self {
        Self {
            site: dashboard.site(),
            payload_range: dashboard.payload_range(),
            proportion: dashboard.proportion_chart(),
            scatter: dashboard.scatter_chart(),
        }
    }
}

/// Write the current charts as pretty-printed JSON.
pub fn write_json(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating export file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &DashboardSnapshot::of(dashboard))
        .context("writing chart JSON")?;
    writer.flush().context("flushing chart JSON")?;
    log::info!("Exported charts to {}", path.display());
    Ok(())
}
