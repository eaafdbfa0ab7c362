use axum::{
    Json,
    extract::{Path, State},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use crate::{
    entity::{gamer_activity, prelude::GamerActivity},
    error::ApiError,
    not_found,
    state::AppState,
};

#[tracing::instrument(name = "GET /activity/{student_number}", skip(state))]
pub async fn get_by_student(
    State(state): State<AppState>,
    Path(student_number): Path<String>,
) -> Result<Json<Vec<gamer_activity::Model>>, ApiError> {
    let sessions = GamerActivity::find()
        .filter(gamer_activity::Column::StudentNumber.eq(&student_number))
        .all(state.db.as_ref())
        .await?;

    if sessions.is_empty() {
        return Err(not_found!("Student not found"));
    }

    Ok(Json(sessions))
}
