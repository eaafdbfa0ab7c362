//! `SeaORM` Entity for GamerActivity
//!
//! One row per session: a student occupying one PC running one game.
//! A session is active while `ended_at` is null; check-out writes
//! `ended_at` and `exec_name` together.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "gamer_activity")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub student_number: String,
    pub pc_number: i32,
    #[sea_orm(column_type = "Text")]
    pub game: String,
    /// Server-side wall clock in the configured timezone, never
    /// client-supplied
    pub started_at: DateTime,
    pub ended_at: Option<DateTime>,
    /// Staff member who closed the session
    #[sea_orm(column_type = "Text", nullable)]
    pub exec_name: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gamer_profile::Entity",
        from = "Column::StudentNumber",
        to = "super::gamer_profile::Column::StudentNumber"
    )]
    GamerProfile,
}

impl Related<super::gamer_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GamerProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
