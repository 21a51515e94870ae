use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

const CHART_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::control_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui: &mut Ui| {
                ui.heading(egui::RichText::new("SpaceX Launch Records Dashboard").size(28.0));
            });
            ui.separator();

            let Some(dashboard) = &self.state.dashboard else {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a launch table to begin  (File → Open…)");
                });
                return;
            };
            let colors = self.state.booster_colors.as_ref();

            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    plot::proportion_plot(ui, dashboard.proportion_chart(), CHART_HEIGHT);
                    ui.add_space(12.0);
                    plot::scatter_plot(ui, dashboard.scatter_chart(), colors, CHART_HEIGHT);

                    if self.state.show_table {
                        ui.add_space(12.0);
                        table::launch_table(ui, dashboard.scatter_chart(), colors);
                    }
                });
        });
    }
}
