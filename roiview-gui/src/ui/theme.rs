//! Application theme and color definitions.
//!
//! A single dark theme with monospace fonts, matching the minimap palette.

use eframe::egui::{self, Color32, FontFamily, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Color palette for the application.
pub mod palette {
    use eframe::egui::Color32;

    // Base colors
    pub const BG_DARK: Color32 = Color32::from_rgb(0x11, 0x18, 0x27);
    pub const BG_PANEL: Color32 = Color32::from_rgb(0x1f, 0x29, 0x37);
    pub const BG_INPUT: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);

    // Border colors
    pub const BORDER: Color32 = Color32::from_rgb(0x37, 0x41, 0x51);
    pub const BORDER_LIGHT: Color32 = Color32::from_rgb(0x4b, 0x55, 0x63);

    // Text colors
    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xf3, 0xf4, 0xf6);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x9c, 0xa3, 0xaf);
    pub const TEXT_DIM: Color32 = Color32::from_rgb(0x6b, 0x72, 0x80);

    pub const BUTTON_HOVER: Color32 = Color32::from_rgb(0x4b, 0x55, 0x63);

    /// Translucent backing for labels drawn over images.
    pub const OVERLAY: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 180);
}

/// Accent colors.
pub mod accent {
    use eframe::egui::Color32;

    pub const BLUE: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);
    pub const BLUE_STRONG: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
    pub const GREEN: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);
    pub const PURPLE: Color32 = Color32::from_rgb(0xc0, 0x84, 0xfc);
    pub const PURPLE_STRONG: Color32 = Color32::from_rgb(0x93, 0x33, 0xea);
    pub const RED: Color32 = Color32::from_rgb(0xf8, 0x71, 0x71);
    pub const RED_STRONG: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);
    pub const ERROR_BG: Color32 = Color32::from_rgb(0x45, 0x0a, 0x0a);
}

/// Configure egui style for the viewer.
pub fn configure_style(ctx: &egui::Context) {
    ctx.set_visuals(build_visuals());
    configure_fonts_and_spacing(ctx);
}

fn build_visuals() -> Visuals {
    use palette::{BG_DARK, BG_INPUT, BG_PANEL, BORDER, BORDER_LIGHT, TEXT_MUTED, TEXT_PRIMARY};

    let mut visuals = Visuals::dark();

    visuals.window_fill = BG_PANEL;
    visuals.panel_fill = BG_DARK;
    visuals.faint_bg_color = BG_PANEL;
    visuals.extreme_bg_color = BG_DARK;

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_MUTED);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = BG_INPUT;
    visuals.widgets.inactive.weak_bg_fill = BG_INPUT;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_LIGHT);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = palette::BUTTON_HOVER;
    visuals.widgets.hovered.weak_bg_fill = palette::BUTTON_HOVER;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, accent::BLUE);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = accent::BLUE_STRONG;
    visuals.widgets.active.weak_bg_fill = accent::BLUE_STRONG;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent::BLUE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = accent::BLUE.gamma_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent::BLUE);

    visuals
}

/// Configure fonts and spacing.
fn configure_fonts_and_spacing(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    style.text_styles = [
        (TextStyle::Small, FontId::new(10.0, FontFamily::Monospace)),
        (TextStyle::Body, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(12.0, FontFamily::Monospace)),
        (TextStyle::Heading, FontId::new(16.0, FontFamily::Monospace)),
        (
            TextStyle::Monospace,
            FontId::new(12.0, FontFamily::Monospace),
        ),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);

    ctx.set_style(style);
}

/// Frame used for the rounded content cards.
pub fn card_frame() -> egui::Frame {
    egui::Frame::none()
        .fill(palette::BG_PANEL)
        .rounding(Rounding::same(8.0))
        .inner_margin(egui::Margin::same(14.0))
}

/// Style a button as the primary action button.
pub fn primary_button(text: &str, fill: Color32) -> egui::Button<'_> {
    egui::Button::new(egui::RichText::new(text).color(Color32::WHITE))
        .fill(fill)
        .rounding(Rounding::same(4.0))
}

/// Create a section header label.
pub fn section_header(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(13.0).strong().color(palette::TEXT_PRIMARY)
}

/// Large number shown in the stats strip.
pub fn stat_value(text: &str, color: Color32) -> egui::RichText {
    egui::RichText::new(text).size(22.0).strong().color(color)
}

/// Caption under a stat value.
pub fn stat_label(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(11.0).color(palette::TEXT_MUTED)
}

/// Small dim help text.
pub fn hint(text: &str) -> egui::RichText {
    egui::RichText::new(text).size(10.0).color(palette::TEXT_DIM)
}
