//! Main GUI application module
//!
//! Contains the DashboardApp struct, per-frame query polling and the window layout.

use crate::{
    api::ApiClient,
    async_job::AsyncJob,
    config::{parse_http_url, Config},
    error::ApiError,
    listing::TransactionListState,
    query::{Query, QueryClient, QueryResult},
    search::SearchForm,
    types::{SearchParams, Stats, Transaction},
    user_settings::UserSettings,
};
use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::sync::Arc;
use std::time::Duration;

use super::notifications::{NotificationLevel, Notifications};
use super::theme::{configure_style, AppTheme};

/// Repaint cadence while a request is in flight
const BUSY_REPAINT: Duration = Duration::from_millis(100);

/// State of the transaction detail window
pub(crate) struct DetailState {
    pub(crate) hash: String,
    pub(crate) job: Option<AsyncJob<Transaction>>,
    pub(crate) result: Option<Result<Transaction, String>>,
}

/// Pending edits in the settings panel
pub(crate) struct SettingsFormState {
    pub(crate) api_url: String,
    pub(crate) page_size: u32,
    pub(crate) error: Option<String>,
}

impl SettingsFormState {
    fn from_settings(settings: &UserSettings, config: &Config) -> Self {
        Self {
            api_url: settings.api_url.clone().unwrap_or_default(),
            page_size: config.page_size,
            error: None,
        }
    }
}

pub struct DashboardApp {
    /// Config as read from the environment, before user settings
    pub(crate) env_config: Config,
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) theme: AppTheme,
    pub(crate) api: Arc<ApiClient>,
    pub(crate) queries: QueryClient,
    pub(crate) stats_query: Query<(), Stats>,
    pub(crate) transactions_query: Query<SearchParams, Vec<Transaction>>,
    pub(crate) search_form: SearchForm,
    pub(crate) list_state: TransactionListState,
    pub(crate) detail: Option<DetailState>,
    pub(crate) settings_form: SettingsFormState,
    pub(crate) notifications: Notifications,
}

impl DashboardApp {
    pub fn new(env_config: Config, user_settings: UserSettings) -> Result<Self> {
        let mut config = env_config.clone();
        user_settings.apply_to(&mut config);

        let api = Arc::new(ApiClient::from_config(&config)?);
        let queries = QueryClient::new()?;
        tracing::info!(
            page_size = config.page_size,
            "Tracking transactions from {}",
            api.base_url()
        );

        Ok(Self {
            stats_query: Query::new("stats", config.stats_refresh),
            transactions_query: Query::new("transactions", config.transactions_refresh),
            search_form: SearchForm::new(&SearchParams::default()),
            list_state: TransactionListState::new(config.page_size),
            detail: None,
            settings_form: SettingsFormState::from_settings(&user_settings, &config),
            notifications: Notifications::default(),
            theme: AppTheme::default(),
            env_config,
            config,
            user_settings,
            api,
            queries,
        })
    }

    /// Poll both dashboard queries for this frame
    fn poll_queries(&mut self) -> (QueryResult<Stats>, QueryResult<Vec<Transaction>>) {
        let api = Arc::clone(&self.api);
        let stats = self.stats_query.poll(&self.queries, &(), move |_| async move {
            api.get_stats().await.map_err(anyhow::Error::from)
        });

        let api = Arc::clone(&self.api);
        let key = self.list_state.query_key();
        let transactions = self.transactions_query.poll(&self.queries, &key, move |params| async move {
            api.get_transactions(&params).await.map_err(anyhow::Error::from)
        });
        if let Some(rows) = &transactions.data {
            self.list_state.record_response(rows.len());
        }

        (stats, transactions)
    }

    /// Fetch statistics and the current page now instead of waiting for the interval
    fn refresh_all(&mut self) {
        tracing::debug!("Manual refresh");
        self.stats_query.refetch();
        self.transactions_query.refetch();
    }

    pub(crate) fn submit_search(&mut self) {
        if let Some(params) = self.search_form.submit() {
            tracing::info!(filter = ?params, "Applying transaction search");
            self.list_state.apply_filter(&params);
        }
    }

    pub(crate) fn reset_search(&mut self) {
        let params = self.search_form.reset();
        self.list_state.apply_filter(&params);
    }

    /// Open the detail window and start fetching the transaction
    pub(crate) fn open_detail(&mut self, hash: &str) {
        let api = Arc::clone(&self.api);
        let requested = hash.to_string();
        let job = self.queries.spawn(async move {
            api.get_transaction(&requested).await.map_err(anyhow::Error::from)
        });
        self.detail = Some(DetailState {
            hash: hash.to_string(),
            job: Some(job),
            result: None,
        });
    }

    fn poll_detail(&mut self) {
        let Some(detail) = &mut self.detail else {
            return;
        };
        let Some(res) = detail.job.as_mut().and_then(|job| job.poll()) else {
            return;
        };
        detail.job = None;
        detail.result = Some(res.map_err(|e| {
            if e.downcast_ref::<ApiError>().is_some_and(ApiError::is_not_found) {
                "Transaction not found".to_string()
            } else {
                tracing::warn!("Failed to load transaction {}: {:#}", detail.hash, e);
                format!("{:#}", e)
            }
        }));
    }

    pub(crate) fn open_explorer(&mut self, url: &str) {
        if let Err(e) = open::that(url) {
            tracing::warn!("Failed to open explorer URL: {}", e);
            self.notifications
                .error(format!("Failed to open {}: {}", url, e));
        }
    }

    pub(crate) fn save_settings(&mut self) {
        match self.apply_settings_form() {
            Ok(()) => {
                self.settings_form.error = None;
                self.notifications.info("Settings saved");
            }
            Err(e) => {
                tracing::warn!("Failed to save settings: {:#}", e);
                self.settings_form.error = Some(format!("{:#}", e));
                self.notifications
                    .error(format!("Failed to save settings: {:#}", e));
            }
        }
    }

    pub(crate) fn revert_settings_form(&mut self) {
        self.settings_form = SettingsFormState::from_settings(&self.user_settings, &self.config);
    }

    /// Validate and persist the settings form, then switch to the new backend and page size
    fn apply_settings_form(&mut self) -> Result<()> {
        let mut settings = self.user_settings.clone();
        settings.set_api_url(&self.settings_form.api_url);
        if let Some(url) = &settings.api_url {
            parse_http_url(url)?;
        }
        settings.set_page_size(self.settings_form.page_size, self.env_config.page_size);

        let mut config = self.env_config.clone();
        settings.apply_to(&mut config);
        let api = ApiClient::from_config(&config)?;
        settings.save()?;

        if api.base_url() != self.api.base_url() {
            tracing::info!("Switching backend to {}", api.base_url());
            self.queries.clear();
            self.stats_query.reset();
            self.transactions_query.reset();
            self.detail = None;
        }
        self.list_state.set_page_size(config.page_size);
        self.settings_form.page_size = config.page_size;

        self.api = Arc::new(api);
        self.config = config;
        self.user_settings = settings;
        Ok(())
    }

    /// Centered placeholder text used for loading, error and empty states
    pub(crate) fn placeholder(&self, ui: &mut egui::Ui, text: &str, color: egui::Color32) -> egui::Response {
        ui.vertical_centered(|ui| {
            ui.add_space(self.theme.spacing_lg);
            let response = ui.label(RichText::new(text).size(15.0).color(color));
            ui.add_space(self.theme.spacing_lg);
            response
        })
        .inner
    }

    fn view_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            match self.notifications.latest() {
                Some(entry) => {
                    let color = match entry.level {
                        NotificationLevel::Info => self.theme.success,
                        NotificationLevel::Error => self.theme.error,
                    };
                    ui.label(RichText::new(&entry.message).small().color(color));
                    ui.label(
                        RichText::new(entry.time_ago())
                            .small()
                            .color(self.theme.text_secondary),
                    );
                }
                None => {
                    ui.label(RichText::new("Ready").small().color(self.theme.text_secondary));
                }
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!(
                        "refresh: transactions {}s · stats {}s",
                        self.transactions_query.interval().as_secs(),
                        self.stats_query.interval().as_secs()
                    ))
                    .small()
                    .color(self.theme.text_secondary),
                );
            });
        });
    }

    /// Wake up for the next scheduled refetch, or soon if something is in flight
    fn schedule_repaint(&self, ctx: &egui::Context) {
        let busy = self.stats_query.is_fetching()
            || self.transactions_query.is_fetching()
            || self
                .detail
                .as_ref()
                .and_then(|d| d.job.as_ref())
                .is_some_and(AsyncJob::is_running);
        let wait = if busy {
            BUSY_REPAINT
        } else {
            self.stats_query
                .next_refetch_in()
                .min(self.transactions_query.next_refetch_in())
        };
        ctx.request_repaint_after(wait);
    }
}

impl App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let (stats, transactions) = self.poll_queries();
        self.poll_detail();

        let mut refresh = false;
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(self.theme.spacing_sm);
            ui.horizontal(|ui| {
                ui.heading(
                    RichText::new("Uniswap WETH-USDC Transaction Tracker")
                        .strong()
                        .color(self.theme.text_primary),
                );
                ui.label(
                    RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                        .size(12.0)
                        .color(self.theme.text_secondary),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    refresh = ui
                        .add(self.theme.button_small("Refresh"))
                        .on_hover_text("Fetch statistics and transactions now")
                        .clicked();
                    ui.label(
                        RichText::new(self.api.base_url().as_str())
                            .small()
                            .color(self.theme.text_secondary),
                    );
                });
            });
            ui.add_space(self.theme.spacing_sm);
        });

        if refresh {
            self.refresh_all();
        }

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.view_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    self.view_statistics(ui, &stats);
                    ui.add_space(self.theme.spacing_lg);

                    let is_loading = transactions.is_fetching && transactions.data.is_none();
                    self.view_search_form(ui, is_loading);
                    ui.add_space(self.theme.spacing_lg);

                    self.view_transaction_list(ui, &transactions);
                    ui.add_space(self.theme.spacing_lg);

                    self.view_settings(ui);
                });
        });

        self.view_transaction_detail(ctx);
        self.schedule_repaint(ctx);
    }
}

pub fn launch(config: Config) -> Result<()> {
    // User settings override the environment
    let user_settings = UserSettings::load();
    let app = DashboardApp::new(config, user_settings)?;

    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        configure_style(&cc.egui_ctx, &app.theme);
        Box::new(app) as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 820.0])
        .with_min_inner_size([760.0, 480.0]);

    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native("Swapfees - Uniswap WETH-USDC Transaction Tracker", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}
