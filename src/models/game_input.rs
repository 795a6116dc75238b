//! Saved input of one mode for one user.

use serde::{Deserialize, Serialize};

/// Row of any per-game input table.
///
/// `amount` maps to the table's numeric column (`count`, `size` or `capacity`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInput {
    pub user_id: i32,
    pub data: String,
    pub amount: i32,
}
