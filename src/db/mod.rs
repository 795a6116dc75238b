//! Database connection and table accessors.

pub mod activity;
pub mod connection;
pub mod game_input;
pub mod user;

pub use connection::{TableCounts, connect, get_table_counts, init_schema, test_connection};
