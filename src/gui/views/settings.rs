//! Settings view implementation
//!
//! Backend URL override and page size, persisted to the user settings file.

use crate::config::MAX_PAGE_SIZE;
use crate::gui::app::DashboardApp;
use crate::user_settings::UserSettings;
use eframe::egui::{self, RichText};

impl DashboardApp {
    /// Render the settings panel
    pub(crate) fn view_settings(&mut self, ui: &mut egui::Ui) {
        self.theme.frame_panel().show(ui, |ui| {
            ui.set_width(ui.available_width());
            egui::CollapsingHeader::new(self.theme.panel_title("Settings"))
                .id_source("settings_panel")
                .default_open(false)
                .show(ui, |ui| {
                    egui::Grid::new("settings_grid")
                        .num_columns(2)
                        .spacing([self.theme.spacing_md, self.theme.spacing_sm])
                        .show(ui, |ui| {
                            ui.label("API URL:");
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut self.settings_form.api_url)
                                    .hint_text(self.env_config.api_url.as_str())
                                    .desired_width(360.0),
                            );
                            if response.changed() {
                                self.settings_form.error = None;
                            }
                            ui.end_row();

                            ui.label("Page size:");
                            ui.add(
                                egui::DragValue::new(&mut self.settings_form.page_size)
                                    .clamp_range(1..=MAX_PAGE_SIZE)
                                    .speed(1.0),
                            );
                            ui.end_row();

                            ui.label("Explorer:");
                            ui.label(
                                RichText::new(self.config.explorer_url.as_str())
                                    .color(self.theme.text_secondary),
                            );
                            ui.end_row();

                            ui.label("Settings file:");
                            let settings_path = UserSettings::settings_path_display();
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(&settings_path)
                                        .small()
                                        .color(self.theme.text_secondary),
                                );
                                if ui.add(egui::Button::new("Copy").small()).on_hover_text("Copy path").clicked() {
                                    ui.output_mut(|o| o.copied_text = settings_path.clone());
                                }
                            });
                            ui.end_row();
                        });

                    ui.label(
                        RichText::new("Leave the API URL empty to use API_URL from the environment.")
                            .small()
                            .italics()
                            .color(self.theme.text_secondary),
                    );

                    if let Some(err) = &self.settings_form.error {
                        ui.label(self.theme.error_text(err));
                    }

                    ui.add_space(self.theme.spacing_sm);
                    ui.horizontal(|ui| {
                        if ui.add(self.theme.button_primary("Save")).clicked() {
                            self.save_settings();
                        }
                        if ui.add(self.theme.button_secondary("Revert")).clicked() {
                            self.revert_settings_form();
                        }
                    });
                });
        });
    }
}
