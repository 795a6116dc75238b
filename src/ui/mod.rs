//! GUI screens and application state.

pub mod activity_panel;
pub mod app;
pub mod bingo_panel;
pub mod components;
pub mod dashboard;
pub mod login_panel;
pub mod ludo_panel;
pub mod schedule_panel;
pub mod upgrade_panel;

pub use app::App;
