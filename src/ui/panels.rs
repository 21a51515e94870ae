use std::path::Path;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::{PayloadRange, SiteSelector};
use crate::state::{AppState, ControlChange};

// ---------------------------------------------------------------------------
// Left side panel – dashboard controls
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload range controls.
pub fn control_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    let Some(dashboard) = &state.dashboard else {
        ui.label("No dataset loaded.");
        return;
    };

    let dataset = dashboard.dataset();
    let options = SiteSelector::options(dataset);
    let (min, max) = (dataset.min_payload(), dataset.max_payload());
    let current_site = dashboard.site().clone();
    let current_range = dashboard.payload_range();

    // ---- Site dropdown ----
    ui.strong("Launch site");
    let mut site = current_site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(site.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options {
                ui.selectable_value(&mut site, option.clone(), option.label());
            }
        });
    ui.separator();

    // ---- Payload range ----
    ui.strong("Payload range (Kg):");
    let mut range = current_range;
    let low_changed = ui
        .add(
            egui::Slider::new(&mut range.low, min..=max)
                .step_by(state.payload_step)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut range.high, min..=max)
                .step_by(state.payload_step)
                .text("max"),
        )
        .changed();

    let mut range = reconcile_range(range, low_changed, high_changed, min, max);

    if ui.button("Reset range").clicked() {
        range = PayloadRange::new(min, max);
    }
    ui.separator();

    ui.checkbox(&mut state.show_table, "Show filtered launches");

    if site != current_site {
        state.change(ControlChange::Site(site));
    }
    if range != current_range {
        state.change(ControlChange::PayloadRange(range));
    }
}

/// Bring raw slider output back to a range the dashboard accepts.
///
/// Step snapping can overshoot `max` when the span is not a multiple of the
/// step, so both ends are clamped to `[min, max]` first. The sliders are
/// independent; when one crosses the other, the untouched end is dragged
/// along.
pub fn reconcile_range(
    range: PayloadRange,
    low_changed: bool,
    high_changed: bool,
    min: f64,
    max: f64,
) -> PayloadRange {
    let mut range = PayloadRange::new(range.low.clamp(min, max), range.high.clamp(min, max));
    if low_changed && range.low > range.high {
        range.high = range.low;
    }
    if high_changed && range.high < range.low {
        range.low = range.high;
    }
    range
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.dashboard.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Export charts…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(dashboard) = &state.dashboard {
            ui.label(format!(
                "{} launches loaded, {} in scatter",
                dashboard.dataset().len(),
                dashboard.scatter_chart().points.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        load_into(state, &path);
    }
}

/// Load a dataset into the state, reporting failures in the status line.
pub fn load_into(state: &mut AppState, path: &Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            log::info!(
                "Loaded {} launches from {} across sites {:?}",
                dataset.len(),
                path.display(),
                dataset.sites()
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

fn export_file_dialog(state: &mut AppState) {
    let Some(dashboard) = &state.dashboard else {
        return;
    };
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .add_filter("JSON", &["json"])
        .set_file_name("charts.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = crate::export::write_json(dashboard, &path) {
            log::error!("Failed to export charts: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
