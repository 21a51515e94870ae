use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::{PayloadRange, SiteSelector};
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// Chart specifications handed to the renderer
// ---------------------------------------------------------------------------

/// One pie slice: category label and the number of launches in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: usize,
}

/// Pie chart: ordered slices under a title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProportionChart {
    pub title: String,
    pub slices: Vec<Slice>,
}

impl ProportionChart {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// One launch on the scatter chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    /// Payload mass (kg).
    pub x: f64,
    /// Class: 0 = failure, 1 = success.
    pub y: u8,
    /// Booster version category, used as the colour key.
    pub category: String,
    pub site: String,
}

/// Scatter chart of payload against outcome, in dataset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Transformers
// ---------------------------------------------------------------------------

/// Pie chart for the current site selection.
///
/// * `All`: successful launches counted per site, ordered by site name.
/// * `Site(s)`: launches at `s` counted per outcome, failure (0) first.
///
/// Groups with no launches are omitted, so an empty selection yields a chart
/// without slices.
pub fn transform_proportion(dataset: &LaunchDataset, site: &SiteSelector) -> ProportionChart {
    match site {
        SiteSelector::All => {
            let mut per_site: BTreeMap<&str, usize> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| r.outcome.is_success()) {
                *per_site.entry(rec.site.as_str()).or_default() += 1;
            }
            ProportionChart {
                title: "Total Success Launches Per Site".to_string(),
                slices: per_site
                    .into_iter()
                    .map(|(site, value)| Slice {
                        label: site.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
        SiteSelector::Site(name) => {
            let mut per_outcome: BTreeMap<Outcome, usize> = BTreeMap::new();
            for rec in dataset.records().iter().filter(|r| site.matches(r)) {
                *per_outcome.entry(rec.outcome).or_default() += 1;
            }
            ProportionChart {
                title: format!("Launches for site {name}"),
                slices: per_outcome
                    .into_iter()
                    .map(|(outcome, value)| Slice {
                        label: outcome.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
    }
}

/// Scatter chart of payload vs. class for the selected site(s), limited to
/// launches whose payload lies within `range` (inclusive).
pub fn transform_scatter(
    dataset: &LaunchDataset,
    site: &SiteSelector,
    range: PayloadRange,
) -> ScatterChart {
    debug_assert!(range.low <= range.high, "unvalidated payload range {range:?}");

    let points = dataset
        .records()
        .iter()
        .filter(|r| site.matches(r) && range.contains(r.payload_mass_kg))
        .map(|r| ScatterPoint {
            x: r.payload_mass_kg,
            y: r.outcome.class(),
            category: r.booster_version_category.clone(),
            site: r.site.clone(),
        })
        .collect();

    let scope = match site {
        SiteSelector::All => "All Sites".to_string(),
        SiteSelector::Site(name) => format!("Site {name}"),
    };

    ScatterChart {
        title: format!(
            "Correlation Between Payload and Success for {scope} (Booster Version in color)"
        ),
        x_label: "Payload Mass (kg)".to_string(),
        y_label: "class".to_string(),
        color_label: "Booster Version Category".to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::data::model::LaunchRecord;

    fn slices(pairs: &[(&str, usize)]) -> Vec<Slice> {
        pairs
            .iter()
            .map(|&(label, value)| Slice {
                label: label.to_string(),
                value,
            })
            .collect()
    }

    fn three_launches() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("A", 500.0, "v1", Outcome::Success),
            LaunchRecord::new("A", 600.0, "v1", Outcome::Failure),
            LaunchRecord::new("B", 700.0, "v2", Outcome::Success),
        ])
        .unwrap()
    }

    fn mixed_launches() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            LaunchRecord::new("VAFB SLC-4E", 9600.0, "FT", Outcome::Success),
            LaunchRecord::new("CCAFS LC-40", 0.0, "v1.0", Outcome::Failure),
            LaunchRecord::new("CCAFS LC-40", 2500.0, "v1.1", Outcome::Success),
            LaunchRecord::new("KSC LC-39A", 3100.0, "FT", Outcome::Success),
            LaunchRecord::new("CCAFS SLC-40", 4000.0, "B4", Outcome::Failure),
            LaunchRecord::new("KSC LC-39A", 5300.0, "B5", Outcome::Failure),
            LaunchRecord::new("CCAFS LC-40", 677.0, "v1.0", Outcome::Failure),
        ])
        .unwrap()
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let chart = transform_proportion(&three_launches(), &SiteSelector::All);
        assert_eq!(chart.title, "Total Success Launches Per Site");
        assert_eq!(chart.slices, slices(&[("A", 1), ("B", 1)]));
    }

    #[test]
    fn single_site_counts_outcomes_failure_first() {
        let chart = transform_proportion(&three_launches(), &SiteSelector::parse("A"));
        assert_eq!(chart.title, "Launches for site A");
        assert_eq!(chart.slices, slices(&[("0", 1), ("1", 1)]));
    }

    #[test]
    fn all_sites_slices_are_sorted_by_name() {
        let chart = transform_proportion(&mixed_launches(), &SiteSelector::All);
        assert_eq!(
            chart.slices,
            slices(&[("CCAFS LC-40", 1), ("KSC LC-39A", 1), ("VAFB SLC-4E", 1)])
        );
    }

    #[test]
    fn site_without_successes_has_no_success_slice() {
        let ds = mixed_launches();
        let all = transform_proportion(&ds, &SiteSelector::All);
        assert!(all.slices.iter().all(|s| s.label != "CCAFS SLC-40"));

        let site = transform_proportion(&ds, &SiteSelector::parse("CCAFS SLC-40"));
        assert_eq!(site.slices, slices(&[("0", 1)]));
    }

    #[test]
    fn proportion_of_dataset_without_successes_is_empty() {
        let ds = LaunchDataset::from_records(vec![LaunchRecord::new(
            "A",
            100.0,
            "v1",
            Outcome::Failure,
        )])
        .unwrap();
        let chart = transform_proportion(&ds, &SiteSelector::All);
        assert!(chart.slices.is_empty());
        assert_eq!(chart.total(), 0);
    }

    #[test]
    fn slice_totals_match_filtered_counts() {
        let ds = mixed_launches();
        let successes = ds.records().iter().filter(|r| r.outcome.is_success()).count();
        assert_eq!(transform_proportion(&ds, &SiteSelector::All).total(), successes);

        for selector in SiteSelector::options(&ds).into_iter().skip(1) {
            let expected = ds.records().iter().filter(|r| selector.matches(r)).count();
            assert_eq!(transform_proportion(&ds, &selector).total(), expected, "{selector}");
        }
    }

    #[test]
    fn scatter_all_sites_keeps_every_record_in_wide_range() {
        let chart = transform_scatter(
            &three_launches(),
            &SiteSelector::All,
            PayloadRange::new(0.0, 10000.0),
        );
        assert_eq!(
            chart.title,
            "Correlation Between Payload and Success for All Sites (Booster Version in color)"
        );
        let got: Vec<(f64, u8, &str)> = chart
            .points
            .iter()
            .map(|p| (p.x, p.y, p.category.as_str()))
            .collect();
        assert_eq!(got, vec![(500.0, 1, "v1"), (600.0, 0, "v1"), (700.0, 1, "v2")]);
    }

    #[test]
    fn scatter_site_outside_range_is_empty() {
        let chart = transform_scatter(
            &three_launches(),
            &SiteSelector::parse("B"),
            PayloadRange::new(0.0, 650.0),
        );
        assert_eq!(
            chart.title,
            "Correlation Between Payload and Success for Site B (Booster Version in color)"
        );
        assert!(chart.points.is_empty());
    }

    #[test]
    fn scatter_points_stay_within_range() {
        let ds = mixed_launches();
        for (low, high) in [(0.0, 0.0), (500.0, 3100.0), (2500.0, 9600.0), (4000.0, 4000.0)] {
            let range = PayloadRange::new(low, high);
            for selector in SiteSelector::options(&ds) {
                let chart = transform_scatter(&ds, &selector, range);
                assert!(chart.points.iter().all(|p| low <= p.x && p.x <= high));
                assert!(chart.points.iter().all(|p| selector.matches_site(&p.site)));
            }
        }
    }

    #[test]
    fn full_range_includes_boundary_records() {
        let ds = mixed_launches();
        let chart = transform_scatter(&ds, &SiteSelector::All, PayloadRange::full(&ds));
        assert_eq!(chart.points.len(), ds.len());
    }

    #[test]
    fn transformers_are_repeatable() {
        let ds = mixed_launches();
        let before = ds.clone();
        let selector = SiteSelector::parse("KSC LC-39A");
        let range = PayloadRange::new(3000.0, 6000.0);

        assert_eq!(
            transform_proportion(&ds, &selector),
            transform_proportion(&ds, &selector)
        );
        assert_eq!(
            transform_scatter(&ds, &selector, range),
            transform_scatter(&ds, &selector, range)
        );
        assert_eq!(ds, before);
    }
}
