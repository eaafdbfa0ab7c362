use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveTime;
use sea_orm::{ColumnTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait};

use crate::{
    entity::{gamer_activity, gamer_profile, prelude::GamerActivity},
    error::ApiError,
    state::AppState,
};

/// Today's sessions for a tier-one member, "today" being the current
/// date in the lounge timezone.
#[tracing::instrument(name = "GET /activity/today/{student_number}", skip(state))]
pub async fn get_today(
    State(state): State<AppState>,
    Path(student_number): Path<String>,
) -> Result<Json<Vec<gamer_activity::Model>>, ApiError> {
    let day_start = state.now().date_naive().and_time(NaiveTime::MIN);
    let day_end = day_start + chrono::Duration::days(1);

    let sessions = GamerActivity::find()
        .join(
            JoinType::InnerJoin,
            gamer_activity::Relation::GamerProfile.def(),
        )
        .filter(gamer_activity::Column::StudentNumber.eq(&student_number))
        .filter(gamer_profile::Column::MembershipTier.eq(1))
        .filter(gamer_activity::Column::StartedAt.gte(day_start))
        .filter(gamer_activity::Column::StartedAt.lt(day_end))
        .all(state.db.as_ref())
        .await?;

    Ok(Json(sessions))
}
