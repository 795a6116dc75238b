//! Per-game saved input repository.
//!
//! Each mode owns one table keyed by `user_id`; the numeric column differs
//! per table and is exposed uniformly as [`GameInput::amount`].

use sea_orm::*;

use crate::entities::{bingo_input, fly_ludo_input, prelude::*, schedule_input, upgrade_input};
use crate::models::GameInput;
use crate::modes::GameMode;

/// Load the saved input of `mode` for a user.
pub async fn load(db: &DatabaseConnection, mode: GameMode, user_id: i32) -> Result<Option<GameInput>, DbErr> {
    let input = match mode {
        GameMode::FlyLudo => FlyLudoInput::find_by_id(user_id).one(db).await?.map(|m| GameInput {
            user_id: m.user_id,
            data: m.data,
            amount: m.count,
        }),
        GameMode::Bingo => BingoInput::find_by_id(user_id).one(db).await?.map(|m| GameInput {
            user_id: m.user_id,
            data: m.data,
            amount: m.size,
        }),
        GameMode::Schedule => ScheduleInput::find_by_id(user_id).one(db).await?.map(|m| GameInput {
            user_id: m.user_id,
            data: m.data,
            amount: m.capacity,
        }),
        GameMode::Upgrade => UpgradeInput::find_by_id(user_id).one(db).await?.map(|m| GameInput {
            user_id: m.user_id,
            data: m.data,
            amount: m.count,
        }),
    };
    Ok(input)
}

/// Insert or overwrite the saved input of `mode`.
///
/// Returns `true` when a new row was created.
pub async fn save(db: &DatabaseConnection, mode: GameMode, input: &GameInput) -> Result<bool, DbErr> {
    let exists = load(db, mode, input.user_id).await?.is_some();

    match mode {
        GameMode::FlyLudo => {
            let model = fly_ludo_input::ActiveModel {
                user_id: Set(input.user_id),
                data: Set(input.data.clone()),
                count: Set(input.amount),
            };
            if exists {
                model.update(db).await?;
            } else {
                model.insert(db).await?;
            }
        }
        GameMode::Bingo => {
            let model = bingo_input::ActiveModel {
                user_id: Set(input.user_id),
                data: Set(input.data.clone()),
                size: Set(input.amount),
            };
            if exists {
                model.update(db).await?;
            } else {
                model.insert(db).await?;
            }
        }
        GameMode::Schedule => {
            let model = schedule_input::ActiveModel {
                user_id: Set(input.user_id),
                data: Set(input.data.clone()),
                capacity: Set(input.amount),
            };
            if exists {
                model.update(db).await?;
            } else {
                model.insert(db).await?;
            }
        }
        GameMode::Upgrade => {
            let model = upgrade_input::ActiveModel {
                user_id: Set(input.user_id),
                data: Set(input.data.clone()),
                count: Set(input.amount),
            };
            if exists {
                model.update(db).await?;
            } else {
                model.insert(db).await?;
            }
        }
    }

    Ok(!exists)
}

/// Delete the saved input of `mode`. Returns whether a row was removed.
pub async fn clear(db: &DatabaseConnection, mode: GameMode, user_id: i32) -> Result<bool, DbErr> {
    let result = match mode {
        GameMode::FlyLudo => FlyLudoInput::delete_by_id(user_id).exec(db).await?,
        GameMode::Bingo => BingoInput::delete_by_id(user_id).exec(db).await?,
        GameMode::Schedule => ScheduleInput::delete_by_id(user_id).exec(db).await?,
        GameMode::Upgrade => UpgradeInput::delete_by_id(user_id).exec(db).await?,
    };
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_db;

    #[tokio::test]
    async fn test_save_is_upsert() {
        let db = memory_db().await;
        let mut input = GameInput {
            user_id: 7,
            data: "a\nb\nc".to_string(),
            amount: 3,
        };

        assert!(save(&db, GameMode::Bingo, &input).await.unwrap());

        input.data = "x\ny".to_string();
        input.amount = 5;
        assert!(!save(&db, GameMode::Bingo, &input).await.unwrap());

        let loaded = load(&db, GameMode::Bingo, 7).await.unwrap().unwrap();
        assert_eq!(loaded, input);
    }

    #[tokio::test]
    async fn test_modes_use_separate_tables() {
        let db = memory_db().await;
        let input = GameInput {
            user_id: 1,
            data: "Ann\nBen".to_string(),
            amount: 2,
        };
        save(&db, GameMode::FlyLudo, &input).await.unwrap();

        assert!(load(&db, GameMode::FlyLudo, 1).await.unwrap().is_some());
        assert!(load(&db, GameMode::Schedule, 1).await.unwrap().is_none());
        assert!(load(&db, GameMode::Upgrade, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear() {
        let db = memory_db().await;
        let input = GameInput {
            user_id: 2,
            data: "write,3".to_string(),
            amount: 2,
        };
        save(&db, GameMode::Schedule, &input).await.unwrap();

        assert!(clear(&db, GameMode::Schedule, 2).await.unwrap());
        assert!(!clear(&db, GameMode::Schedule, 2).await.unwrap());
        assert!(load(&db, GameMode::Schedule, 2).await.unwrap().is_none());
    }
}
