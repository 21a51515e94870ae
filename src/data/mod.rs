/// Data layer: launch records, loading, control values and chart transforms.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, payload bounds, sites
///   └───────────────┘
///        │        ▲ SiteSelector, PayloadRange (filter)
///        ▼
///   ┌──────────┐
///   │  chart    │  filter + group → ProportionChart / ScatterChart
///   └──────────┘
/// ```

pub mod chart;
pub mod filter;
pub mod loader;
pub mod model;
