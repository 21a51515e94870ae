use crate::color::ColorMap;
use crate::data::chart::{ProportionChart, ScatterChart, transform_proportion, transform_scatter};
use crate::data::filter::{PayloadRange, SiteSelector};
use crate::data::model::LaunchDataset;
use crate::error::ControlError;

// ---------------------------------------------------------------------------
// Control coupling: inputs → dependent charts
// ---------------------------------------------------------------------------

/// Dashboard outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartId {
    Proportion,
    Scatter,
}

/// A new value for one of the two inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlChange {
    Site(SiteSelector),
    PayloadRange(PayloadRange),
}

impl ControlChange {
    /// Charts that must be recomputed when this input changes.
    pub fn dependents(&self) -> &'static [ChartId] {
        match self {
            ControlChange::Site(_) => &[ChartId::Proportion, ChartId::Scatter],
            ControlChange::PayloadRange(_) => &[ChartId::Scatter],
        }
    }
}

/// The dataset, the current control values and the charts derived from them.
///
/// The charts are always the result of the transformers applied to the
/// current inputs; no other state is kept.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: LaunchDataset,
    site: SiteSelector,
    payload_range: PayloadRange,
    proportion: ProportionChart,
    scatter: ScatterChart,
}

impl Dashboard {
    /// Initial state: all sites, full payload range.
    pub fn new(dataset: LaunchDataset) -> Self {
        let site = SiteSelector::All;
        let payload_range = PayloadRange::full(&dataset);
        let proportion = transform_proportion(&dataset, &site);
        let scatter = transform_scatter(&dataset, &site, payload_range);
        Self {
            dataset,
            site,
            payload_range,
            proportion,
            scatter,
        }
    }

    /// Validate and apply an input change, then recompute its dependents.
    /// A rejected change leaves the dashboard untouched.
    pub fn apply(&mut self, change: ControlChange) -> Result<&'static [ChartId], ControlError> {
        match &change {
            ControlChange::Site(site) => site.validate(&self.dataset)?,
            ControlChange::PayloadRange(range) => range.validate(&self.dataset)?,
        }
        let dependents = change.dependents();

        match change {
            ControlChange::Site(site) => self.site = site,
            ControlChange::PayloadRange(range) => self.payload_range = range,
        }

        for chart in dependents {
            match chart {
                ChartId::Proportion => {
                    self.proportion = transform_proportion(&self.dataset, &self.site);
                }
                ChartId::Scatter => {
                    self.scatter = transform_scatter(&self.dataset, &self.site, self.payload_range);
                }
            }
        }
        log::debug!(
            "site={} payload=[{}, {}] recomputed {dependents:?}",
            self.site,
            self.payload_range.low,
            self.payload_range.high
        );
        Ok(dependents)
    }

    pub fn select_site(&mut self, site: SiteSelector) -> Result<&'static [ChartId], ControlError> {
        self.apply(ControlChange::Site(site))
    }

    pub fn set_payload_range(
        &mut self,
        range: PayloadRange,
    ) -> Result<&'static [ChartId], ControlError> {
        self.apply(ControlChange::PayloadRange(range))
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn site(&self) -> &SiteSelector {
        &self.site
    }

    pub fn payload_range(&self) -> PayloadRange {
        self.payload_range
    }

    pub fn proportion_chart(&self) -> &ProportionChart {
        &self.proportion
    }

    pub fn scatter_chart(&self) -> &ScatterChart {
        &self.scatter
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dashboard (None until a dataset loads).
    pub dashboard: Option<Dashboard>,

    /// Booster version category colours for the scatter chart.
    pub booster_colors: Option<ColorMap>,

    /// Slider step for the payload range, in kg.
    pub payload_step: f64,

    /// Whether the filtered-launch table is shown.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(payload_step: f64) -> Self {
        Self {
            dashboard: None,
            booster_colors: None,
            payload_step,
            show_table: false,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset; controls reset to their initial values.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.booster_colors = Some(ColorMap::new(dataset.booster_categories()));
        self.dashboard = Some(Dashboard::new(dataset));
        self.status_message = None;
    }

    /// Forward a control change to the dashboard, surfacing rejections.
    pub fn change(&mut self, change: ControlChange) {
        let Some(dashboard) = &mut self.dashboard else {
            return;
        };
        match dashboard.apply(change) {
            Ok(_) => self.status_message = None,
            Err(e) => {
                log::warn!("Rejected control change: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
