//! Centralized theme and styling system for the GUI
//!
//! Provides the AppTheme struct with colors, spacing, and styled widget factories.

use eframe::egui;

/// Centralized theme and styling system
#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub panel_fill: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub success: egui::Color32,
    pub error: egui::Color32,

    // Accent colors for the three statistics
    pub accent_usdt: egui::Color32,
    pub accent_eth: egui::Color32,
    pub accent_price: egui::Color32,

    // Spacing constants
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
    pub spacing_lg: f32,

    // Button sizes
    pub button_small: egui::Vec2,
    pub button_medium: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // Dark slate background with a pink swap accent
            background: egui::Color32::from_rgb(13, 17, 28),
            surface: egui::Color32::from_rgb(22, 27, 41),
            surface_hover: egui::Color32::from_rgb(31, 37, 55),
            surface_active: egui::Color32::from_rgb(41, 48, 70),
            panel_fill: egui::Color32::from_rgb(17, 21, 34),
            text_primary: egui::Color32::from_rgb(232, 236, 245),
            text_secondary: egui::Color32::from_rgb(140, 150, 172),

            primary: egui::Color32::from_rgb(252, 114, 255), // #fc72ff
            secondary: egui::Color32::from_rgb(70, 78, 102),
            success: egui::Color32::from_rgb(64, 182, 107),
            error: egui::Color32::from_rgb(255, 95, 82),

            accent_usdt: egui::Color32::from_rgb(38, 161, 123), // Tether green
            accent_eth: egui::Color32::from_rgb(98, 126, 234),  // Ether blue
            accent_price: egui::Color32::from_rgb(252, 114, 255),

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,
            spacing_lg: 24.0,

            button_small: egui::vec2(72.0, 24.0),
            button_medium: egui::vec2(110.0, 32.0),
        }
    }
}

impl AppTheme {
    /// Filled button for the main action of a panel
    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(
            egui::RichText::new(text)
                .color(self.background)
                .strong(),
        )
        .fill(self.primary)
        .rounding(8.0)
        .min_size(self.button_medium)
    }

    /// Outlined button for secondary actions
    pub fn button_secondary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.surface)
            .stroke(egui::Stroke::new(1.5, self.secondary))
            .rounding(8.0)
            .min_size(self.button_medium)
    }

    /// Compact button used inside table rows and pagers
    pub fn button_small(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.surface_hover)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
            .min_size(self.button_small)
    }

    /// Card frame used by every dashboard panel
    pub fn frame_panel(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .rounding(12.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
    }

    /// Inner frame for a single statistic
    pub fn frame_stat(&self, accent: egui::Color32) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .rounding(10.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, accent))
    }

    /// Panel title
    pub fn panel_title(&self, title: &str) -> egui::RichText {
        egui::RichText::new(title)
            .size(18.0)
            .strong()
            .color(self.text_primary)
    }

    /// Inline validation message
    pub fn error_text(&self, message: &str) -> egui::RichText {
        egui::RichText::new(message).small().color(self.error)
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.background;
    visuals.override_text_color = Some(theme.text_primary);
    visuals.hyperlink_color = theme.primary;
    visuals.faint_bg_color = theme.surface;
    visuals.extreme_bg_color = theme.surface;

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;
    visuals.widgets.open.bg_fill = theme.surface_active;

    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.secondary);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.primary);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);
    visuals.selection.stroke = egui::Stroke::new(1.0, theme.primary);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.menu_margin = egui::Margin::same(8.0);

    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(22.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::new(13.0, egui::FontFamily::Monospace),
    );

    ctx.set_style(style);
}
