//! View modules for the GUI
//!
//! Each submodule adds the rendering methods for one dashboard panel to `DashboardApp`.
//! They are called top to bottom from `App::update` in `app.rs`.
//!
//! - `statistics` - Aggregate fee and price figures
//! - `search_form` - Hash and date range filter
//! - `transaction_list` - Paged transaction table with CSV export
//! - `transaction_detail` - Single transaction window
//! - `settings` - Backend URL and page size

pub mod search_form;
pub mod settings;
pub mod statistics;
pub mod transaction_detail;
pub mod transaction_list;
