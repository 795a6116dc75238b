//! Mode service: open, save and clear a mode's input with the matching log rows.

use sea_orm::DatabaseConnection;

use crate::db::{activity, game_input};
use crate::error::Result;
use crate::models::GameInput;
use crate::modes::GameMode;

/// Record that `user_id` opened `mode`.
pub async fn open_mode(db: &DatabaseConnection, user_id: i32, mode: GameMode) -> Result<()> {
    activity::log_behavior(db, user_id, &mode.open_behavior()).await?;
    Ok(())
}

/// Save the input of `mode`. The first save per user writes an insert log row.
///
/// Returns `true` when a new row was created.
pub async fn save_input(db: &DatabaseConnection, mode: GameMode, input: &GameInput) -> Result<bool> {
    let created = game_input::save(db, mode, input).await?;
    if created {
        activity::log_insert(db, input.user_id, &format!("create {} input", mode.title())).await?;
        tracing::info!("Created {} input for user {}", mode.title(), input.user_id);
    }
    Ok(created)
}

/// Delete the saved input of `mode`, logging the deletion when a row existed.
pub async fn clear_input(db: &DatabaseConnection, mode: GameMode, user_id: i32) -> Result<bool> {
    let removed = game_input::clear(db, mode, user_id).await?;
    if removed {
        activity::log_delete(db, user_id, &format!("clear {} input", mode.title())).await?;
        tracing::info!("Cleared {} input for user {}", mode.title(), user_id);
    }
    Ok(removed)
}
