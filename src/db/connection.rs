//! Database connection and schema bootstrap.

use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Schema,
};
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::entities::prelude::*;

/// Open the SQLite database.
///
/// A single pooled connection keeps `sqlite::memory:` databases alive and
/// serializes writes to the file.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(database_url);
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    Database::connect(opt).await
}

/// Test database connection by executing a simple query.
pub async fn test_connection(db: &DatabaseConnection) -> Result<(), DbErr> {
    db.execute_unprepared("SELECT 1").await?;
    Ok(())
}

async fn create_table<E: EntityTrait>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Create every table that does not exist yet.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    create_table(db, UserInfo).await?;
    create_table(db, UserLog).await?;
    create_table(db, InsertLog).await?;
    create_table(db, DeleteLog).await?;
    create_table(db, FlyLudoInput).await?;
    create_table(db, BingoInput).await?;
    create_table(db, ScheduleInput).await?;
    create_table(db, UpgradeInput).await?;
    Ok(())
}

/// Get record counts for the account and log tables.
pub async fn get_table_counts(db: &DatabaseConnection) -> Result<TableCounts, DbErr> {
    let users = UserInfo::find().count(db).await?;
    let user_logs = UserLog::find().count(db).await?;
    let insert_logs = InsertLog::find().count(db).await?;
    let delete_logs = DeleteLog::find().count(db).await?;

    Ok(TableCounts {
        users,
        user_logs,
        insert_logs,
        delete_logs,
    })
}

/// Table record counts.
#[derive(Debug, Clone)]
pub struct TableCounts {
    pub users: u64,
    pub user_logs: u64,
    pub insert_logs: u64,
    pub delete_logs: u64,
}

/// In-memory database with the schema applied, for tests.
#[cfg(test)]
pub async fn memory_db() -> DatabaseConnection {
    let db = connect("sqlite::memory:").await.unwrap();
    init_schema(&db).await.unwrap();
    db
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let db = memory_db().await;
        init_schema(&db).await.unwrap();
        test_connection(&db).await.unwrap();

        let counts = get_table_counts(&db).await.unwrap();
        assert_eq!(counts.users, 0);
        assert_eq!(counts.user_logs, 0);
        assert_eq!(counts.insert_logs, 0);
        assert_eq!(counts.delete_logs, 0);
    }
}
