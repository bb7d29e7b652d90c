//! Image grid rendering.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};
use roiview_core::{GridCell, OutputCell, CHANNELS, ROWS};

use super::theme::palette;
use crate::app::RoiViewerApp;
use crate::util::usize_to_f32;

const CELL_GAP: f32 = 8.0;
const ROW_GAP: f32 = 16.0;

impl RoiViewerApp {
    /// Render two rows of channel crops, each followed by its output cell.
    pub(crate) fn render_image_grid(&mut self, ui: &mut egui::Ui) {
        let Some(grid) = self.session.image_grid() else {
            return;
        };
        let columns = usize::from(CHANNELS) + 1;
        let gaps = CELL_GAP * usize_to_f32(columns - 1);
        let side = ((ui.available_width() - gaps) / usize_to_f32(columns)).max(48.0);

        let mut retry = None;
        for (row_idx, row) in (0..ROWS).zip(&grid.rows) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = CELL_GAP;
                for cell in row {
                    if self.render_cell(ui, cell, side) {
                        retry = Some(cell.key);
                    }
                }
                let output = OutputCell::for_row(self.session.current_roi(), row_idx);
                Self::render_output_cell(ui, &output, side);
            });
            ui.add_space(ROW_GAP);
        }

        if let Some(key) = retry {
            self.retry_cell(&key);
        }
    }

    /// Draws one image cell. Returns `true` if its Retry button was clicked.
    fn render_cell(&self, ui: &mut egui::Ui, cell: &GridCell, side: f32) -> bool {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect(
            rect,
            Rounding::same(4.0),
            palette::BG_PANEL,
            Stroke::new(2.0, palette::BORDER),
        );

        let mut retry = false;
        if self.session.is_image_failed(&cell.key) {
            painter.text(
                rect.center() - Vec2::new(0.0, 12.0),
                Align2::CENTER_CENTER,
                "No image",
                FontId::monospace(11.0),
                palette::TEXT_DIM,
            );
            let button = Rect::from_center_size(
                rect.center() + Vec2::new(0.0, 14.0),
                Vec2::new(64.0, 22.0),
            );
            retry = ui
                .put(button, egui::Button::new("Retry").small())
                .on_hover_text(format!("Fetch {} again", cell.key))
                .clicked();
        } else if let Some(texture) = self.images.texture(&cell.key) {
            let image_rect = fit_centered(rect.shrink(2.0), texture.size_vec2());
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        } else if self.images.is_pending(&cell.key) {
            let spinner = Rect::from_center_size(rect.center(), Vec2::splat(20.0));
            ui.put(spinner, egui::Spinner::new());
        }

        overlay_label(
            &painter,
            rect.left_top() + Vec2::new(4.0, 4.0),
            Align2::LEFT_TOP,
            &cell.channel_label(),
        );
        overlay_label(
            &painter,
            rect.left_bottom() + Vec2::new(4.0, -4.0),
            Align2::LEFT_BOTTOM,
            &cell.size_label(),
        );
        retry
    }

    fn render_output_cell(ui: &mut egui::Ui, output: &OutputCell, side: f32) {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(side), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect(
            rect,
            Rounding::same(4.0),
            palette::BG_PANEL,
            Stroke::new(2.0, palette::BORDER),
        );

        let center = rect.center();
        painter.text(
            center - Vec2::new(0.0, 28.0),
            Align2::CENTER_CENTER,
            "Output",
            FontId::monospace(10.0),
            palette::TEXT_MUTED,
        );
        painter.text(
            center,
            Align2::CENTER_CENTER,
            &output.value,
            FontId::monospace(22.0),
            palette::TEXT_PRIMARY,
        );
        let mut y = center.y + 24.0;
        for line in &output.position {
            painter.text(
                Pos2::new(center.x, y),
                Align2::CENTER_CENTER,
                line,
                FontId::monospace(10.0),
                palette::TEXT_MUTED,
            );
            y += 14.0;
        }
    }
}

/// Largest rect with the image's aspect ratio that fits in `bounds`.
fn fit_centered(bounds: Rect, image: Vec2) -> Rect {
    if image.x <= 0.0 || image.y <= 0.0 {
        return bounds;
    }
    let scale = (bounds.width() / image.x).min(bounds.height() / image.y);
    Rect::from_center_size(bounds.center(), image * scale)
}

fn overlay_label(painter: &egui::Painter, pos: Pos2, anchor: Align2, text: &str) {
    let galley =
        painter.layout_no_wrap(text.to_string(), FontId::monospace(10.0), Color32::WHITE);
    let rect = anchor.anchor_size(pos, galley.size()).expand2(Vec2::new(4.0, 2.0));
    painter.rect_filled(rect, Rounding::same(3.0), palette::OVERLAY);
    painter.galley(rect.min + Vec2::new(4.0, 2.0), galley, Color32::WHITE);
}
