//! Transaction detail window

use crate::format::{
    format_fee_eth, format_fee_usdt, format_grouped_decimal, format_grouped_int, format_gwei,
    format_local_timestamp,
};
use crate::gui::app::DashboardApp;
use eframe::egui::{self, RichText};

impl DashboardApp {
    pub(crate) fn view_transaction_detail(&mut self, ctx: &egui::Context) {
        let Some(detail) = &self.detail else {
            return;
        };

        let mut open = true;
        let mut open_link: Option<String> = None;
        egui::Window::new("Transaction Details")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(560.0)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(&detail.hash)
                        .monospace()
                        .small()
                        .color(self.theme.text_secondary),
                );
                ui.add_space(self.theme.spacing_sm);

                match &detail.result {
                    None => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading transaction...");
                        });
                    }
                    Some(Err(e)) => {
                        ui.label(RichText::new(e).color(self.theme.error));
                    }
                    Some(Ok(tx)) => {
                        egui::Grid::new("transaction_detail_grid")
                            .num_columns(2)
                            .spacing([self.theme.spacing_md, self.theme.spacing_xs])
                            .show(ui, |ui| {
                                let rows = [
                                    ("Block:", format!("#{}", tx.block_number)),
                                    ("Time:", format_local_timestamp(&tx.timestamp)),
                                    ("Gas used:", format_grouped_int(tx.gas_used)),
                                    ("Gas price:", format!("{} gwei", format_gwei(tx.gas_price))),
                                    (
                                        "ETH/USDT price:",
                                        format!("${}", format_grouped_decimal(tx.eth_usdt_price, 2)),
                                    ),
                                    ("Fee (ETH):", format_fee_eth(tx.fee_in_eth)),
                                    ("Fee (USDT):", format_fee_usdt(tx.fee_in_usdt)),
                                ];
                                for (label, value) in rows {
                                    ui.label(RichText::new(label).color(self.theme.text_secondary));
                                    ui.label(RichText::new(value).strong());
                                    ui.end_row();
                                }
                            });

                        ui.add_space(self.theme.spacing_sm);
                        ui.horizontal(|ui| {
                            if ui
                                .add(self.theme.button_small("Copy hash"))
                                .on_hover_text("Copy transaction hash")
                                .clicked()
                            {
                                ui.output_mut(|o| o.copied_text = tx.hash.clone());
                            }
                            if ui
                                .add(self.theme.button_small("Explorer"))
                                .on_hover_text("View on block explorer")
                                .clicked()
                            {
                                open_link = Some(self.config.tx_explorer_url(&tx.hash));
                            }
                        });
                    }
                }
            });

        if !open {
            // Drops any in-flight request with it
            self.detail = None;
        }
        if let Some(url) = open_link {
            self.open_explorer(&url);
        }
    }
}
