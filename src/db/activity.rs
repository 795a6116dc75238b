//! Behavior, insert and delete logs.

use sea_orm::*;

use super::user::now;
use crate::entities::{delete_log, insert_log, prelude::*, user_log};

/// Append a behavior log row.
pub async fn log_behavior(db: &DatabaseConnection, user_id: i32, behavior: &str) -> Result<user_log::Model, DbErr> {
    let model = user_log::ActiveModel {
        timestamp: Set(now()),
        behavior: Set(behavior.to_string()),
        user_id: Set(user_id),
        ..Default::default()
    };
    model.insert(db).await
}

/// Append an insert log row.
pub async fn log_insert(db: &DatabaseConnection, user_id: i32, value: &str) -> Result<insert_log::Model, DbErr> {
    let model = insert_log::ActiveModel {
        timestamp: Set(now()),
        value: Set(value.to_string()),
        user_id: Set(user_id),
        ..Default::default()
    };
    model.insert(db).await
}

/// Append a delete log row.
pub async fn log_delete(db: &DatabaseConnection, user_id: i32, value: &str) -> Result<delete_log::Model, DbErr> {
    let model = delete_log::ActiveModel {
        timestamp: Set(now()),
        value: Set(value.to_string()),
        user_id: Set(user_id),
        ..Default::default()
    };
    model.insert(db).await
}

/// Latest behavior rows of a user, newest first.
pub async fn recent_behavior(
    db: &DatabaseConnection,
    user_id: i32,
    limit: u64,
) -> Result<Vec<user_log::Model>, DbErr> {
    UserLog::find()
        .filter(user_log::Column::UserId.eq(user_id))
        .order_by_desc(user_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

/// Latest insert rows of a user, newest first.
pub async fn recent_inserts(
    db: &DatabaseConnection,
    user_id: i32,
    limit: u64,
) -> Result<Vec<insert_log::Model>, DbErr> {
    InsertLog::find()
        .filter(insert_log::Column::UserId.eq(user_id))
        .order_by_desc(insert_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

/// Latest delete rows of a user, newest first.
pub async fn recent_deletes(
    db: &DatabaseConnection,
    user_id: i32,
    limit: u64,
) -> Result<Vec<delete_log::Model>, DbErr> {
    DeleteLog::find()
        .filter(delete_log::Column::UserId.eq(user_id))
        .order_by_desc(delete_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_db;

    #[tokio::test]
    async fn test_recent_behavior_newest_first() {
        let db = memory_db().await;

        log_behavior(&db, 1, "login").await.unwrap();
        log_behavior(&db, 1, "open Bingo").await.unwrap();
        log_behavior(&db, 2, "login").await.unwrap();

        let rows = recent_behavior(&db, 1, 10).await.unwrap();
        let behaviors: Vec<_> = rows.iter().map(|r| r.behavior.as_str()).collect();
        assert_eq!(behaviors, vec!["open Bingo", "login"]);

        let limited = recent_behavior(&db, 1, 1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_insert_and_delete_logs_are_per_user() {
        let db = memory_db().await;

        log_insert(&db, 1, "register account alice").await.unwrap();
        log_delete(&db, 1, "clear Bingo input").await.unwrap();
        log_delete(&db, 3, "clear Scheduler input").await.unwrap();

        assert_eq!(recent_inserts(&db, 1, 10).await.unwrap().len(), 1);
        assert_eq!(recent_deletes(&db, 1, 10).await.unwrap().len(), 1);
        assert!(recent_inserts(&db, 3, 10).await.unwrap().is_empty());
    }
}
