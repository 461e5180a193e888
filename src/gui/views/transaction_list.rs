//! Transaction list panel
//!
//! One grid row per transaction on the current page, Previous/Next paging and CSV export
//! of the displayed page.

use crate::export;
use crate::gui::app::DashboardApp;
use crate::listing;
use crate::query::{QueryResult, QueryStatus};
use crate::types::Transaction;
use eframe::egui::{self, RichText};

const COLUMNS: [&str; 6] = ["Transaction Hash", "Time", "Gas Used", "Fee (ETH)", "Fee (USDT)", ""];

impl DashboardApp {
    pub(crate) fn view_transaction_list(&mut self, ui: &mut egui::Ui, result: &QueryResult<Vec<Transaction>>) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(self.theme.panel_title("Transactions"));
                if self.list_state.filter().has_filter() {
                    ui.label(
                        RichText::new("(filtered)")
                            .small()
                            .color(self.theme.text_secondary),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let page = result.data.as_ref().filter(|rows| !rows.is_empty());
                    if ui
                        .add_enabled(page.is_some(), self.theme.button_small("Export CSV"))
                        .on_hover_text("Save the rows of this page as CSV")
                        .clicked()
                    {
                        if let Some(rows) = page {
                            self.export_page(rows);
                        }
                    }
                    if result.is_fetching {
                        ui.spinner();
                    }
                });
            });
            ui.add_space(self.theme.spacing_sm);

            match result.status() {
                QueryStatus::Loading => {
                    self.placeholder(ui, "Loading transactions...", self.theme.text_secondary);
                }
                QueryStatus::Error(detail) => {
                    self.placeholder(ui, "Error loading transactions", self.theme.error)
                        .on_hover_text(detail);
                }
                QueryStatus::Success(rows) if rows.is_empty() => {
                    self.placeholder(ui, "No transactions found", self.theme.text_secondary);
                }
                QueryStatus::Success(rows) => self.render_transaction_grid(ui, rows),
            }

            ui.add_space(self.theme.spacing_sm);
            self.render_pager(ui);
        });
    }

    fn render_transaction_grid(&mut self, ui: &mut egui::Ui, transactions: &[Transaction]) {
        let rows = listing::rows(transactions, &self.config);
        let mut open_link: Option<String> = None;
        let mut open_detail: Option<String> = None;

        egui::Grid::new("transactions_grid")
            .num_columns(COLUMNS.len())
            .striped(true)
            .spacing([self.theme.spacing_md, self.theme.spacing_xs])
            .show(ui, |ui| {
                for header in COLUMNS {
                    ui.label(RichText::new(header).strong().color(self.theme.text_secondary));
                }
                ui.end_row();

                for row in &rows {
                    if ui
                        .link(RichText::new(&row.short_hash).monospace())
                        .on_hover_text(row.hash.as_str())
                        .clicked()
                    {
                        open_link = Some(row.explorer_url.clone());
                    }
                    ui.label(row.timestamp.as_str());
                    ui.label(row.gas_used.as_str());
                    ui.label(RichText::new(&row.fee_eth).color(self.theme.accent_eth));
                    ui.label(RichText::new(&row.fee_usdt).color(self.theme.accent_usdt));
                    if ui.add(self.theme.button_small("Details")).clicked() {
                        open_detail = Some(row.hash.clone());
                    }
                    ui.end_row();
                }
            });

        if let Some(url) = open_link {
            self.open_explorer(&url);
        }
        if let Some(hash) = open_detail {
            self.open_detail(&hash);
        }
    }

    fn render_pager(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.list_state.can_go_previous(), self.theme.button_small("Previous"))
                .clicked()
            {
                self.list_state.previous_page();
            }
            ui.label(format!("Page {}", self.list_state.page()));
            if ui
                .add_enabled(self.list_state.can_go_next(), self.theme.button_small("Next"))
                .clicked()
            {
                self.list_state.next_page();
            }
            ui.label(
                RichText::new(format!("{} per page", self.list_state.page_size()))
                    .small()
                    .color(self.theme.text_secondary),
            );
        });
    }

    fn export_page(&mut self, transactions: &[Transaction]) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name(export::default_file_name(self.list_state.page()))
            .save_file()
        {
            match export::export_csv(&path, transactions) {
                Ok(()) => self.notifications.info(format!(
                    "Exported {} transactions to {}",
                    transactions.len(),
                    path.display()
                )),
                Err(e) => self.notifications.error(format!("CSV export failed: {:#}", e)),
            }
        }
    }
}
