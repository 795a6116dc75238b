//! Registered accounts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_info")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub user_id: i32,
    /// Registration time.
    pub open_time: DateTime,
    pub name: String,
    /// Stored as typed; there is no hashing.
    pub password: String,
    pub account: String,
    /// Last successful login.
    pub run_time: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
