use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Corner, Legend, MarkerShape, Plot, PlotPoints, Points, Polygon};

use crate::color::ColorMap;
use crate::data::chart::{ProportionChart, ScatterChart};

/// Arc resolution of a full turn.
const PIE_SEGMENTS: usize = 128;

// ---------------------------------------------------------------------------
// Proportion (pie) chart
// ---------------------------------------------------------------------------

/// Render the pie chart. Slices start at twelve o'clock and run clockwise.
pub fn proportion_plot(ui: &mut Ui, chart: &ProportionChart, height: f32) {
    ui.heading(&chart.title);

    let total = chart.total();
    if total == 0 {
        ui.label("No launches match the current selection.");
        return;
    }

    let colors = ColorMap::from_labels(chart.slices.iter().map(|s| s.label.as_str()));

    Plot::new("proportion_chart")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default().position(Corner::RightTop))
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for slice in &chart.slices {
                let fraction = slice.value as f64 / total as f64;
                let name = format!("{}: {} ({:.1}%)", slice.label, slice.value, fraction * 100.0);
                let color = colors.color_for(&slice.label);

                // Every wedge piece shares the slice name so the legend
                // shows one entry per slice.
                for piece in wedge(start, start + fraction) {
                    let polygon = Polygon::new(piece.into_iter().collect::<PlotPoints>())
                        .name(&name)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE));
                    plot_ui.polygon(polygon);
                }
                start += fraction;
            }
        });
}

/// Outline of the unit-circle wedge between two fractions of a turn, split
/// into convex pieces of at most a quarter turn each.
fn wedge(from: f64, to: f64) -> Vec<Vec<[f64; 2]>> {
    let mut pieces = Vec::new();
    let mut lo = from;
    while lo < to {
        let hi = (lo + 0.25).min(to);
        let steps = (((hi - lo) * PIE_SEGMENTS as f64).ceil() as usize).max(1);
        let mut outline = Vec::with_capacity(steps + 2);
        outline.push([0.0, 0.0]);
        for i in 0..=steps {
            let t = lo + (hi - lo) * i as f64 / steps as f64;
            let angle = FRAC_PI_2 - t * TAU;
            outline.push([angle.cos(), angle.sin()]);
        }
        pieces.push(outline);
        lo = hi;
    }
    pieces
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload vs. class, one series per booster version category.
pub fn scatter_plot(ui: &mut Ui, chart: &ScatterChart, colors: Option<&ColorMap>, height: f32) {
    ui.heading(&chart.title);

    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for p in &chart.points {
        series
            .entry(p.category.as_str())
            .or_default()
            .push([p.x, f64::from(p.y)]);
    }

    Plot::new("scatter_chart")
        .height(height)
        .legend(Legend::default().position(Corner::RightBottom))
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in series {
                let color = colors
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::LIGHT_BLUE);
                let markers = Points::new(points.into_iter().collect::<PlotPoints>())
                    .name(category)
                    .color(color)
                    .shape(MarkerShape::Circle)
                    .radius(4.0);
                plot_ui.points(markers);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_unit_circle(p: [f64; 2]) -> bool {
        ((p[0] * p[0] + p[1] * p[1]) - 1.0).abs() < 1e-9
    }

    #[test]
    fn full_circle_splits_into_quarters() {
        let pieces = wedge(0.0, 1.0);
        assert_eq!(pieces.len(), 4);
        for piece in &pieces {
            assert_eq!(piece[0], [0.0, 0.0]);
            assert!(piece[1..].iter().all(|&p| on_unit_circle(p)));
        }
    }

    #[test]
    fn wedge_starts_at_twelve_and_runs_clockwise() {
        let pieces = wedge(0.0, 0.25);
        assert_eq!(pieces.len(), 1);
        let first = pieces[0][1];
        let last = *pieces[0].last().unwrap();
        assert!((first[0]).abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn empty_wedge_has_no_pieces() {
        assert!(wedge(0.5, 0.5).is_empty());
    }
}
