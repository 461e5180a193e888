//! GUI module for the Swapfees dashboard
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - DashboardApp, per-frame query polling and window layout
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `notifications` - Status bar notification history
//! - `views` - Panel rendering (statistics, search form, transaction list, detail, settings)
//!
//! ## Usage
//!
//! ```no_run
//! use swapfees::config::Config;
//! use swapfees::gui;
//!
//! let config = Config::from_env();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod notifications;
pub mod theme;
pub mod views;

pub use app::{launch, DashboardApp};
pub use notifications::{NotificationEntry, NotificationLevel, Notifications};
pub use theme::{configure_style, AppTheme};
