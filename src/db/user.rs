//! User account repository.

use chrono::{Local, NaiveDateTime};
use sea_orm::*;

use crate::entities::{prelude::*, user_info};

/// Get user by ID.
pub async fn get_by_id(db: &DatabaseConnection, user_id: i32) -> Result<Option<user_info::Model>, DbErr> {
    UserInfo::find_by_id(user_id).one(db).await
}

/// Find the first user registered with `account`.
pub async fn find_by_account(db: &DatabaseConnection, account: &str) -> Result<Option<user_info::Model>, DbErr> {
    UserInfo::find()
        .filter(user_info::Column::Account.eq(account))
        .order_by_asc(user_info::Column::UserId)
        .one(db)
        .await
}

/// Check if an account is already registered.
pub async fn account_exists(db: &DatabaseConnection, account: &str) -> Result<bool, DbErr> {
    let count = UserInfo::find()
        .filter(user_info::Column::Account.eq(account))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Insert a new user.
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    account: &str,
    password: &str,
) -> Result<user_info::Model, DbErr> {
    let model = user_info::ActiveModel {
        open_time: Set(now()),
        name: Set(name.to_string()),
        password: Set(password.to_string()),
        account: Set(account.to_string()),
        run_time: Set(None),
        ..Default::default()
    };
    model.insert(db).await
}

/// Replace the stored password.
pub async fn update_password(
    db: &DatabaseConnection,
    user_id: i32,
    password: &str,
) -> Result<Option<user_info::Model>, DbErr> {
    let Some(existing) = UserInfo::find_by_id(user_id).one(db).await? else {
        return Ok(None);
    };

    let mut active: user_info::ActiveModel = existing.into();
    active.password = Set(password.to_string());
    Ok(Some(active.update(db).await?))
}

/// Record a login by stamping `run_time`.
pub async fn touch_run_time(db: &DatabaseConnection, user_id: i32) -> Result<Option<user_info::Model>, DbErr> {
    let Some(existing) = UserInfo::find_by_id(user_id).one(db).await? else {
        return Ok(None);
    };

    let mut active: user_info::ActiveModel = existing.into();
    active.run_time = Set(Some(now()));
    Ok(Some(active.update(db).await?))
}

/// Number of registered users.
pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
    UserInfo::find().count(db).await
}

pub(crate) fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_db;

    #[tokio::test]
    async fn test_create_and_find() {
        let db = memory_db().await;

        let user = create(&db, "Alice", "alice", "secret").await.unwrap();
        assert_eq!(user.account, "alice");
        assert!(user.run_time.is_none());

        let found = find_by_account(&db, "alice").await.unwrap().unwrap();
        assert_eq!(found.user_id, user.user_id);
        assert!(account_exists(&db, "alice").await.unwrap());
        assert!(!account_exists(&db, "bob").await.unwrap());
        assert_eq!(count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_password_and_touch() {
        let db = memory_db().await;
        let user = create(&db, "Alice", "alice", "old").await.unwrap();

        let updated = update_password(&db, user.user_id, "new").await.unwrap().unwrap();
        assert_eq!(updated.password, "new");

        let touched = touch_run_time(&db, user.user_id).await.unwrap().unwrap();
        assert!(touched.run_time.is_some());

        assert!(update_password(&db, 999, "x").await.unwrap().is_none());
        assert!(get_by_id(&db, 999).await.unwrap().is_none());
    }
}
