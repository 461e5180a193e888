//! Search form panel
//!
//! Hash and date range inputs with inline validation messages. Submitting replaces the
//! transaction list filter; Reset clears it.

use crate::gui::app::DashboardApp;
use crate::search::FormField;
use eframe::egui;

const DATE_HINT: &str = "YYYY-MM-DD or YYYY-MM-DDTHH:MM";

impl DashboardApp {
    pub(crate) fn view_search_form(&mut self, ui: &mut egui::Ui, is_loading: bool) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(self.theme.panel_title("Search Transactions"));
            ui.add_space(self.theme.spacing_sm);

            let mut submit_on_enter = false;
            egui::Grid::new("search_form_grid")
                .num_columns(2)
                .spacing([self.theme.spacing_md, self.theme.spacing_sm])
                .show(ui, |ui| {
                    ui.label("Transaction hash:");
                    ui.vertical(|ui| {
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.search_form.hash)
                                .hint_text("0x...")
                                .font(egui::TextStyle::Monospace)
                                .desired_width(580.0),
                        );
                        if response.changed() {
                            self.search_form.field_changed(FormField::Hash);
                        }
                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            submit_on_enter = true;
                        }
                        if let Some(err) = &self.search_form.errors().hash {
                            ui.label(self.theme.error_text(err));
                        }
                    });
                    ui.end_row();

                    ui.label("From date:");
                    ui.vertical(|ui| {
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.search_form.from_timestamp)
                                .hint_text(DATE_HINT)
                                .desired_width(240.0),
                        );
                        if response.changed() {
                            self.search_form.field_changed(FormField::FromTimestamp);
                        }
                        if let Some(err) = &self.search_form.errors().from_timestamp {
                            ui.label(self.theme.error_text(err));
                        }
                    });
                    ui.end_row();

                    ui.label("To date:");
                    ui.vertical(|ui| {
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut self.search_form.to_timestamp)
                                .hint_text(DATE_HINT)
                                .desired_width(240.0),
                        );
                        if response.changed() {
                            self.search_form.field_changed(FormField::ToTimestamp);
                        }
                        if let Some(err) = &self.search_form.errors().to_timestamp {
                            ui.label(self.theme.error_text(err));
                        }
                    });
                    ui.end_row();
                });

            if let Some(err) = &self.search_form.errors().date_range {
                ui.label(self.theme.error_text(err));
            }
            ui.add_space(self.theme.spacing_sm);

            let can_submit = self.search_form.can_submit(is_loading);
            let can_reset = self.search_form.can_reset(is_loading);
            ui.horizontal(|ui| {
                if ui.add_enabled(can_submit, self.theme.button_primary("Search")).clicked()
                    || (submit_on_enter && can_submit)
                {
                    self.submit_search();
                }
                if ui.add_enabled(can_reset, self.theme.button_secondary("Reset")).clicked() {
                    self.reset_search();
                }
                if is_loading {
                    ui.spinner();
                }
            });
        });
    }
}
