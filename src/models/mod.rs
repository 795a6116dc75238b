//! Data models for account forms and saved game input.

pub mod account;
pub mod game_input;

pub use account::{RegisterForm, ResetForm};
pub use game_input::GameInput;
