use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ColorMap;
use crate::data::chart::ScatterChart;

// ---------------------------------------------------------------------------
// Filtered launch table
// ---------------------------------------------------------------------------

/// List the launches behind the scatter chart.
pub fn launch_table(ui: &mut Ui, chart: &ScatterChart, colors: Option<&ColorMap>) {
    if chart.points.is_empty() {
        ui.label("No launches in the selected payload range.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(110.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::remainder())
        .max_scroll_height(240.0)
        .header(20.0, |mut header| {
            for title in ["Launch Site", chart.x_label.as_str(), chart.color_label.as_str(), "class"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, chart.points.len(), |mut row| {
                let p = &chart.points[row.index()];
                row.col(|ui| {
                    ui.label(&p.site);
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", p.x));
                });
                row.col(|ui| {
                    let mut text = RichText::new(&p.category);
                    if let Some(cm) = colors {
                        text = text.color(cm.color_for(&p.category));
                    }
                    ui.label(text);
                });
                row.col(|ui| {
                    ui.label(p.y.to_string());
                });
            });
        });
}
