use axum::{Json, extract::State};
use chrono::NaiveDateTime;
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QuerySelect, RelationTrait,
};
use serde::Serialize;

use crate::{
    entity::{gamer_activity, gamer_profile, prelude::GamerActivity},
    error::ApiError,
    state::AppState,
};

#[derive(Debug, FromQueryResult, Serialize)]
pub struct ActivePc {
    pub id: uuid::Uuid,
    pub student_number: String,
    pub pc_number: i32,
    pub game: String,
    pub started_at: NaiveDateTime,
    pub first_name: String,
    pub last_name: String,
    pub membership_tier: i32,
    pub banned: Option<bool>,
    pub notes: Option<String>,
    pub created_at: Option<NaiveDateTime>,
}

/// All PCs with an open session, joined with the gamer's profile so
/// the front desk can see who is on which machine.
#[tracing::instrument(name = "GET /activity/get-active-pcs", skip(state))]
pub async fn get_active_pcs(
    State(state): State<AppState>,
) -> Result<Json<Vec<ActivePc>>, ApiError> {
    let rows = GamerActivity::find()
        .join(
            JoinType::InnerJoin,
            gamer_activity::Relation::GamerProfile.def(),
        )
        .select_only()
        .columns([
            gamer_activity::Column::Id,
            gamer_activity::Column::StudentNumber,
            gamer_activity::Column::PcNumber,
            gamer_activity::Column::Game,
            gamer_activity::Column::StartedAt,
        ])
        .columns([
            gamer_profile::Column::FirstName,
            gamer_profile::Column::LastName,
            gamer_profile::Column::MembershipTier,
            gamer_profile::Column::Banned,
            gamer_profile::Column::Notes,
            gamer_profile::Column::CreatedAt,
        ])
        .filter(gamer_activity::Column::EndedAt.is_null())
        .into_model::<ActivePc>()
        .all(state.db.as_ref())
        .await?;

    Ok(Json(rows))
}
