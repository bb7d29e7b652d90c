//! Main view (central panel) rendering.

use eframe::egui;
use roiview_core::LoadStatus;

use super::theme::{accent, card_frame, hint, palette, primary_button, section_header};
use crate::app::RoiViewerApp;
use crate::util::format_position;

const INSTRUCTIONS: [&str; 5] = [
    "Backend loads 2 large images (5 channels each) and filters the CSV for cy0==255 and cy1==255",
    "Each ROI is cropped on the fly from the large images, centered at (x, y)",
    "Navigate through filtered ROIs with Previous/Next or the arrow keys",
    "Adjust the crop size: Zoom In (smaller, +), Zoom Out (larger, -) in steps of 2 pixels",
    "Each row shows 5 channel crops plus its output value (cy0 for row 1, cy1 for row 2)",
];

impl RoiViewerApp {
    /// Render the central panel.
    pub(crate) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(palette::BG_DARK)
                    .inner_margin(egui::Margin::same(20.0)),
            )
            .show(ctx, |ui| {
                // Loading and error take the whole page until the first data arrives.
                if self.session.is_empty() {
                    match self.session.status() {
                        LoadStatus::Idle | LoadStatus::Loading => {
                            Self::render_loading(ui);
                            return;
                        }
                        LoadStatus::Failed(e) => {
                            let e = e.clone();
                            self.render_load_error(ui, &e);
                            return;
                        }
                        LoadStatus::Ready => {}
                    }
                }

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.render_statistics(ui);
                        if self.session.is_empty() {
                            Self::render_no_data(ui);
                        } else {
                            self.render_navigation(ui);
                            self.render_image_grid(ui);
                        }
                        ui.add_space(16.0);
                        self.render_instructions(ui);
                    });
            });
    }

    fn render_loading(ui: &mut egui::Ui) {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 2.0 - 40.0);
                ui.add(egui::Spinner::new().size(48.0));
                ui.add_space(12.0);
                ui.label(egui::RichText::new("Loading ROI data...").size(18.0));
            });
        });
    }

    fn render_load_error(&mut self, ui: &mut egui::Ui, error: &str) {
        let api_url = self.client.config().base_url().to_string();
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() / 2.0 - 100.0);
            egui::Frame::none()
                .fill(accent::ERROR_BG)
                .rounding(egui::Rounding::same(8.0))
                .inner_margin(egui::Margin::same(28.0))
                .show(ui, |ui| {
                    ui.set_max_width(440.0);
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("Error Loading Data")
                                .size(18.0)
                                .strong()
                                .color(palette::TEXT_PRIMARY),
                        );
                        ui.add_space(6.0);
                        ui.label(egui::RichText::new(error).size(12.0));
                        ui.add_space(12.0);
                        if ui
                            .add(primary_button("Retry", accent::RED_STRONG))
                            .clicked()
                        {
                            self.load_data();
                        }
                        ui.add_space(12.0);
                        ui.label(hint(&format!(
                            "Make sure the backend is running at {api_url}"
                        )));
                    });
                });
        });
    }

    fn render_no_data(ui: &mut egui::Ui) {
        card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.add_space(24.0);
                ui.label(
                    egui::RichText::new("No ROI data available")
                        .size(18.0)
                        .color(palette::TEXT_MUTED),
                );
                ui.label(
                    egui::RichText::new("No ROIs found where cy0==255 and cy1==255")
                        .color(palette::TEXT_MUTED),
                );
                ui.label(hint("Check your CSV data and filter criteria"));
                ui.add_space(24.0);
            });
        });
    }

    /// Previous / position / zoom / Next bar.
    fn render_navigation(&mut self, ui: &mut egui::Ui) {
        let Some(current) = self.session.current_index() else {
            return;
        };
        let total = self.session.len();
        let position = self
            .session
            .current_roi()
            .map(|roi| format_position(roi.x, roi.y));

        card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.session.can_previous(), egui::Button::new("◀ Previous"))
                    .clicked()
                {
                    self.session.previous();
                }

                ui.add_space(24.0);
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(format!("ROI {} / {}", current + 1, total))
                            .size(20.0)
                            .strong(),
                    );
                    if let Some(position) = &position {
                        ui.label(
                            egui::RichText::new(format!("Position: {position}"))
                                .color(palette::TEXT_MUTED),
                        );
                    }
                });
                ui.add_space(24.0);

                if ui
                    .add_enabled(
                        self.session.can_zoom_in(),
                        primary_button("Zoom In", accent::PURPLE_STRONG),
                    )
                    .on_hover_text("Zoom In (-2 pixels)")
                    .clicked()
                {
                    self.session.zoom_in();
                }
                egui::Frame::none()
                    .fill(palette::BG_INPUT)
                    .rounding(egui::Rounding::same(4.0))
                    .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                    .show(ui, |ui| {
                        ui.monospace(self.session.crop_size().to_string());
                    });
                if ui
                    .add_enabled(
                        self.session.can_zoom_out(),
                        primary_button("Zoom Out", accent::PURPLE_STRONG),
                    )
                    .on_hover_text("Zoom Out (+2 pixels)")
                    .clicked()
                {
                    self.session.zoom_out();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .add_enabled(self.session.can_next(), egui::Button::new("Next ▶"))
                        .clicked()
                    {
                        self.session.next();
                    }
                });
            });
        });
        ui.add_space(12.0);
    }

    fn render_instructions(&mut self, ui: &mut egui::Ui) {
        card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(section_header("How it works"));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let label = if self.ui_state.show_instructions {
                        "Hide"
                    } else {
                        "Show"
                    };
                    if ui.small_button(label).clicked() {
                        self.ui_state.show_instructions = !self.ui_state.show_instructions;
                    }
                });
            });
            if !self.ui_state.show_instructions {
                return;
            }
            ui.add_space(4.0);
            for line in INSTRUCTIONS {
                ui.label(egui::RichText::new(format!("• {line}")).color(palette::TEXT_MUTED));
            }
            ui.add_space(4.0);
            ui.checkbox(
                &mut self.ui_state.keyboard_shortcuts,
                "Keyboard shortcuts (←/→, +/-, R)",
            );
        });
    }
}
