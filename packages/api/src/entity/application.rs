//! `SeaORM` Entity for Application
//!
//! API credentials issued to consuming services. Only the digest of
//! the secret half is stored; the plaintext secret leaves the system
//! exactly once, in the generation response.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "application")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Name of the service this credential was issued to
    #[sea_orm(column_type = "Text")]
    pub app_name: String,
    /// Public half of the credential
    #[sea_orm(column_type = "Text", unique)]
    pub key_id: String,
    /// Lowercase hex blake3 digest of the secret half
    #[sea_orm(column_type = "Text")]
    pub hashed_key: String,
    pub created_at: DateTime,
    /// Touched best-effort on every successful validation
    pub last_used_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
