//! Statistics strip rendering.

use eframe::egui;
use roiview_core::Stats;

use super::theme::{accent, card_frame, hint, stat_label, stat_value};
use crate::app::RoiViewerApp;
use crate::util::format_number;

impl RoiViewerApp {
    /// Render the backend stats as four columns.
    ///
    /// Nothing is drawn when stats are unavailable.
    pub(crate) fn render_statistics(&self, ui: &mut egui::Ui) {
        let Some(stats) = self.session.stats() else {
            return;
        };
        let crop = self.session.crop_size();

        card_frame().show(ui, |ui| {
            ui.columns(4, |cols| {
                Self::stat_column(
                    &mut cols[0],
                    &format_number(stats.filtered_rois),
                    accent::BLUE,
                    "Filtered ROIs",
                    Some(&stats.filter_criteria),
                );
                Self::stat_column(
                    &mut cols[1],
                    &format_number(stats.total_rois_in_csv),
                    accent::GREEN,
                    "Total in CSV",
                    None,
                );
                Self::stat_column(
                    &mut cols[2],
                    &crop.to_string(),
                    accent::PURPLE,
                    "ROI Size (pixels)",
                    None,
                );
                let (mark, color) = images_loaded_mark(stats);
                Self::stat_column(&mut cols[3], mark, color, "Images Loaded", None);
            });
        });
        ui.add_space(12.0);
    }

    fn stat_column(
        ui: &mut egui::Ui,
        value: &str,
        color: egui::Color32,
        label: &str,
        detail: Option<&str>,
    ) {
        ui.vertical_centered(|ui| {
            ui.label(stat_value(value, color));
            ui.label(stat_label(label));
            if let Some(detail) = detail {
                ui.label(hint(detail));
            }
        });
    }
}

fn images_loaded_mark(stats: &Stats) -> (&'static str, egui::Color32) {
    if stats.images_loaded() {
        ("✔", accent::GREEN)
    } else {
        ("✖", accent::RED)
    }
}
