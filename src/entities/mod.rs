//! SeaORM entity definitions, one module per table.

pub mod prelude;

pub mod bingo_input;
pub mod delete_log;
pub mod fly_ludo_input;
pub mod insert_log;
pub mod schedule_input;
pub mod upgrade_input;
pub mod user_info;
pub mod user_log;
