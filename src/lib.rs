pub mod auth;
pub mod config;
pub mod credentials;
pub mod db;
pub mod entities;
pub mod error;
pub mod games;
pub mod logging;
pub mod models;
pub mod modes;
pub mod ui;

pub use error::{AppError, Result};
