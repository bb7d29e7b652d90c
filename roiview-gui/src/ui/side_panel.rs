//! Side panel: minimap, quick navigation and legend.

use eframe::egui::{self, CursorIcon, Sense, Stroke, Vec2};
use log::debug;
use roiview_core::minimap::{HIGHLIGHT, HIGHLIGHT_OUTLINE, POINT};

use super::theme::{accent, card_frame, hint, palette, primary_button, section_header};
use crate::app::RoiViewerApp;
use crate::util::f64_to_f32;
use crate::viewer::{paint_scene, to_canvas_point, to_color};

impl RoiViewerApp {
    /// Render the right-hand side panel.
    pub(crate) fn render_side_panel(&mut self, ctx: &egui::Context) {
        let width = f64_to_f32(self.geometry.width) + 36.0;
        egui::SidePanel::right("minimap_panel")
            .resizable(false)
            .exact_width(width)
            .frame(
                egui::Frame::none()
                    .fill(palette::BG_DARK)
                    .inner_margin(egui::Margin::same(8.0)),
            )
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing.y = 12.0;
                self.render_minimap(ui);
                self.render_quick_navigation(ui);
                Self::render_legend(ui);
            });
    }

    fn render_minimap(&mut self, ui: &mut egui::Ui) {
        card_frame().show(ui, |ui| {
            ui.label(section_header("Minimap"));
            let size = Vec2::new(
                f64_to_f32(self.geometry.width),
                f64_to_f32(self.geometry.height),
            );
            let (rect, response) = ui.allocate_exact_size(size, Sense::click());
            let response = response.on_hover_cursor(CursorIcon::Crosshair);

            let scene = self.session.minimap_scene(self.geometry);
            paint_scene(&ui.painter_at(rect), rect, &scene);

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let click = to_canvas_point(rect, pos);
                    if let Some(idx) = self.session.select_at_canvas(click, &self.geometry) {
                        debug!("minimap click ({:.1}, {:.1}) -> ROI {idx}", click.x, click.y);
                    }
                }
            }

            ui.vertical_centered(|ui| {
                ui.label(hint("Click to jump to nearest ROI"));
            });
        });
    }

    fn render_quick_navigation(&mut self, ui: &mut egui::Ui) {
        card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(section_header("Quick Navigation"));
            let button = primary_button("Random Sample", accent::BLUE_STRONG)
                .min_size(Vec2::new(ui.available_width(), 36.0));
            if ui.add_enabled(!self.session.is_empty(), button).clicked() {
                self.session.random_sample(&mut rand::thread_rng());
            }
            ui.vertical_centered(|ui| {
                ui.label(hint("Jump to a random ROI"));
            });
        });
    }

    fn render_legend(ui: &mut egui::Ui) {
        card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(section_header("Legend"));
            legend_row(ui, to_color(POINT), None, "ROI Location");
            legend_row(
                ui,
                to_color(HIGHLIGHT),
                Some(to_color(HIGHLIGHT_OUTLINE)),
                "Current ROI",
            );
        });
    }
}

fn legend_row(ui: &mut egui::Ui, fill: egui::Color32, outline: Option<egui::Color32>, text: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(16.0), Sense::hover());
        let painter = ui.painter();
        painter.circle_filled(rect.center(), 7.0, fill);
        if let Some(outline) = outline {
            painter.circle_stroke(rect.center(), 7.0, Stroke::new(2.0, outline));
        }
        ui.label(egui::RichText::new(text).color(palette::TEXT_MUTED));
    });
}
