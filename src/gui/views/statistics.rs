//! Statistics panel

use crate::format::StatsSummary;
use crate::gui::app::DashboardApp;
use crate::query::{QueryResult, QueryStatus};
use crate::types::Stats;
use eframe::egui::{self, RichText};

impl DashboardApp {
    pub(crate) fn view_statistics(&self, ui: &mut egui::Ui, result: &QueryResult<Stats>) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(self.theme.panel_title("Statistics"));
                if result.is_fetching {
                    ui.spinner();
                }
            });
            ui.add_space(self.theme.spacing_sm);

            match result.status() {
                QueryStatus::Loading => {
                    self.placeholder(ui, "Loading statistics...", self.theme.text_secondary);
                }
                QueryStatus::Error(detail) => {
                    self.placeholder(ui, "Error loading statistics", self.theme.error)
                        .on_hover_text(detail);
                }
                QueryStatus::Success(stats) => {
                    let summary = StatsSummary::from(stats);
                    ui.columns(3, |cols| {
                        self.render_stat(&mut cols[0], "Total Fees (USDT)", &summary.total_fee_usdt, self.theme.accent_usdt);
                        self.render_stat(&mut cols[1], "Total Fees (ETH)", &summary.total_fee_eth, self.theme.accent_eth);
                        self.render_stat(
                            &mut cols[2],
                            "Current ETH/USDT Price",
                            &summary.current_eth_usdt_price,
                            self.theme.accent_price,
                        );
                    });
                }
            }
        });
    }

    fn render_stat(&self, ui: &mut egui::Ui, label: &str, value: &str, accent: egui::Color32) {
        self.theme.frame_stat(accent).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(label).color(self.theme.text_secondary));
            ui.add_space(self.theme.spacing_xs);
            ui.label(RichText::new(value).size(24.0).strong().color(accent));
        });
    }
}
