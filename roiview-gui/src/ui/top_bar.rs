//! Top bar rendering.

use eframe::egui;
use roiview_core::LoadStatus;

use super::theme::{accent, palette};
use crate::app::RoiViewerApp;

impl RoiViewerApp {
    /// Render the top panel with the title, load status and Refresh.
    pub(crate) fn render_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::none()
                    .fill(palette::BG_PANEL)
                    .inner_margin(egui::Margin::symmetric(16.0, 10.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Multi-Channel ROI Viewer")
                            .size(20.0)
                            .strong()
                            .color(palette::TEXT_PRIMARY),
                    );
                    ui.add_space(16.0);
                    self.render_status(ui);

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let refresh = ui.add_enabled(
                            !self.session.is_loading(),
                            egui::Button::new("Refresh"),
                        );
                        if refresh.clicked() {
                            self.load_data();
                        }
                        let label = if self.ui_state.show_side_panel {
                            "Hide minimap"
                        } else {
                            "Show minimap"
                        };
                        if ui.button(label).clicked() {
                            self.ui_state.show_side_panel = !self.ui_state.show_side_panel;
                        }
                    });
                });
            });
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        let (text, color) = match self.session.status() {
            LoadStatus::Idle => (String::new(), palette::TEXT_DIM),
            LoadStatus::Loading => ("Loading...".to_string(), palette::TEXT_MUTED),
            LoadStatus::Ready => {
                let mut text = format!("{} ROIs", self.session.len());
                if let Some(dur) = self.last_load {
                    text.push_str(&format!(" loaded in {:.2}s", dur.as_secs_f64()));
                }
                let failed = self.session.failed_cell_count();
                if failed > 0 {
                    text.push_str(&format!(" | {failed} image(s) unavailable"));
                }
                (text, palette::TEXT_MUTED)
            }
            // Full-page error is shown by the central panel when nothing is loaded.
            LoadStatus::Failed(e) => (format!("Reload failed: {e}"), accent::RED),
        };
        ui.label(egui::RichText::new(text).size(11.0).color(color));
    }
}
