//! Admin entity - A back-office administrator account.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    /// Unique identifier for the admin
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Login username (unique)
    pub username: String,
    /// Login password
    pub password: String,
    /// When the admin account was created
    pub created_at: DateTimeUtc,
}

/// Admin has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
