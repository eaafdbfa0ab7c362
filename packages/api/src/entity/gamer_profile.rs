//! `SeaORM` Entity for GamerProfile
//!
//! Membership profiles, read-only from this service's perspective.
//! Check-in consults `membership_expiry_date` before inserting a
//! session.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gamer_profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub student_number: String,
    #[sea_orm(column_type = "Text")]
    pub first_name: String,
    #[sea_orm(column_type = "Text")]
    pub last_name: String,
    /// Tier 1 carries unlimited access privileges
    pub membership_tier: i32,
    /// Date at UTC midnight; the last valid day rendered in the
    /// lounge timezone
    pub membership_expiry_date: DateTime,
    pub banned: Option<bool>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: Option<DateTime>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::gamer_activity::Entity")]
    GamerActivity,
}

impl Related<super::gamer_activity::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamerActivity.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
