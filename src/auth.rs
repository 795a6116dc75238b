//! Account service: registration, login and password reset.

use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

use crate::db::{activity, user};
use crate::entities::user_info;
use crate::error::{AppError, Result};
use crate::models::{RegisterForm, ResetForm};

/// Register a new account.
///
/// A blank display name falls back to the account.
pub async fn register(db: &DatabaseConnection, form: RegisterForm) -> Result<user_info::Model> {
    let account = form.account.trim();
    if account.is_empty() || form.password.is_empty() {
        return Err(AppError::EmptyCredentials);
    }
    if form.password != form.confirm {
        return Err(AppError::PasswordMismatch);
    }
    if user::account_exists(db, account).await? {
        return Err(AppError::AccountExists(account.to_string()));
    }

    let name = match form.name.trim() {
        "" => account,
        name => name,
    };

    let created = user::create(db, name, account, &form.password).await?;
    activity::log_insert(db, created.user_id, &format!("register account {account}")).await?;
    tracing::info!("Registered account '{}' (user {})", account, created.user_id);

    Ok(created)
}

/// A successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The user row with `run_time` set to this login.
    pub user: user_info::Model,
    /// `run_time` as it was before this login.
    pub previous_login: Option<NaiveDateTime>,
}

/// Check credentials and record the login.
pub async fn login(db: &DatabaseConnection, account: &str, password: &str) -> Result<LoginOutcome> {
    let account = account.trim();
    if account.is_empty() || password.is_empty() {
        return Err(AppError::EmptyCredentials);
    }

    let found = user::find_by_account(db, account)
        .await?
        .ok_or_else(|| AppError::AccountNotFound(account.to_string()))?;

    if found.password != password {
        tracing::warn!("Wrong password for account '{}'", account);
        return Err(AppError::WrongPassword);
    }

    let previous_login = found.run_time;
    let refreshed = user::touch_run_time(db, found.user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("user {}", found.user_id)))?;
    activity::log_behavior(db, refreshed.user_id, "login").await?;
    tracing::info!("Account '{}' logged in", account);

    Ok(LoginOutcome {
        user: refreshed,
        previous_login,
    })
}

/// Replace the password of an existing account.
pub async fn reset_password(db: &DatabaseConnection, form: ResetForm) -> Result<user_info::Model> {
    let account = form.account.trim();
    if account.is_empty() || form.password.is_empty() {
        return Err(AppError::EmptyCredentials);
    }
    if form.password != form.confirm {
        return Err(AppError::PasswordMismatch);
    }

    let found = user::find_by_account(db, account)
        .await?
        .ok_or_else(|| AppError::AccountNotFound(account.to_string()))?;

    let updated = user::update_password(db, found.user_id, &form.password)
        .await?
        .ok_or_else(|| AppError::not_found(format!("user {}", found.user_id)))?;
    activity::log_behavior(db, updated.user_id, "reset password").await?;
    tracing::info!("Password reset for account '{}'", account);

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::memory_db;

    fn register_form(account: &str, password: &str) -> RegisterForm {
        RegisterForm {
            name: String::new(),
            account: account.to_string(),
            password: password.to_string(),
            confirm: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let db = memory_db().await;

        let created = register(&db, register_form("alice", "pw1")).await.unwrap();
        assert_eq!(created.name, "alice");

        let logged_in = login(&db, "alice", "pw1").await.unwrap();
        assert_eq!(logged_in.user.user_id, created.user_id);
        assert!(logged_in.user.run_time.is_some());

        let inserts = activity::recent_inserts(&db, created.user_id, 10).await.unwrap();
        assert_eq!(inserts[0].value, "register account alice");
        let behavior = activity::recent_behavior(&db, created.user_id, 10).await.unwrap();
        assert_eq!(behavior[0].behavior, "login");
    }

    #[tokio::test]
    async fn test_login_reports_previous_login() {
        let db = memory_db().await;
        register(&db, register_form("alice", "pw1")).await.unwrap();

        let first = login(&db, "alice", "pw1").await.unwrap();
        assert!(first.previous_login.is_none());

        let second = login(&db, "alice", "pw1").await.unwrap();
        assert_eq!(second.previous_login, first.user.run_time);
        assert!(second.user.run_time >= first.user.run_time);
    }

    #[tokio::test]
    async fn test_duplicate_account() {
        let db = memory_db().await;
        register(&db, register_form("alice", "pw1")).await.unwrap();

        let err = register(&db, register_form("alice", "other")).await.unwrap_err();
        assert!(matches!(err, AppError::AccountExists(ref a) if a == "alice"));
        assert_eq!(user::count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_validation() {
        let db = memory_db().await;

        let err = register(&db, register_form("  ", "pw")).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyCredentials));

        let mut form = register_form("bob", "pw");
        form.confirm = "wp".to_string();
        let err = register(&db, form).await.unwrap_err();
        assert!(matches!(err, AppError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_login_failures() {
        let db = memory_db().await;
        register(&db, register_form("alice", "pw1")).await.unwrap();

        assert!(matches!(login(&db, "", "pw1").await, Err(AppError::EmptyCredentials)));
        assert!(matches!(login(&db, "alice", "").await, Err(AppError::EmptyCredentials)));
        assert!(matches!(login(&db, "bob", "pw1").await, Err(AppError::AccountNotFound(_))));
        assert!(matches!(login(&db, "alice", "PW1").await, Err(AppError::WrongPassword)));
    }

    #[tokio::test]
    async fn test_reset_password_changes_login() {
        let db = memory_db().await;
        register(&db, register_form("alice", "old")).await.unwrap();

        let form = ResetForm {
            account: "alice".to_string(),
            password: "new".to_string(),
            confirm: "new".to_string(),
        };
        reset_password(&db, form).await.unwrap();

        assert!(matches!(login(&db, "alice", "old").await, Err(AppError::WrongPassword)));
        assert!(login(&db, "alice", "new").await.is_ok());
    }

    #[tokio::test]
    async fn test_reset_unknown_account() {
        let db = memory_db().await;
        let form = ResetForm {
            account: "ghost".to_string(),
            password: "a".to_string(),
            confirm: "a".to_string(),
        };
        assert!(matches!(
            reset_password(&db, form).await,
            Err(AppError::AccountNotFound(_))
        ));
    }
}
