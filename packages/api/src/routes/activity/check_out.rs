use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};
use serde::Deserialize;

use crate::{
    entity::{gamer_activity, prelude::GamerActivity},
    error::ApiError,
    not_found,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CheckOutInput {
    pub pc_number: i32,
    pub exec_name: String,
}

#[tracing::instrument(name = "POST /activity/update/{student_number}", skip(state, input))]
pub async fn check_out(
    State(state): State<AppState>,
    Path(student_number): Path<String>,
    Json(input): Json<CheckOutInput>,
) -> Result<(StatusCode, Json<gamer_activity::Model>), ApiError> {
    let now = state.now().naive_local();

    // ended_at and exec_name are written together, in one statement
    // over every open session for this student+PC pair; duplicates can
    // exist because check-in does not guard against them.
    let closed = GamerActivity::update_many()
        .col_expr(gamer_activity::Column::EndedAt, Expr::value(now))
        .col_expr(
            gamer_activity::Column::ExecName,
            Expr::value(input.exec_name),
        )
        .filter(gamer_activity::Column::StudentNumber.eq(&student_number))
        .filter(gamer_activity::Column::PcNumber.eq(input.pc_number))
        .filter(gamer_activity::Column::EndedAt.is_null())
        .exec_with_returning(state.db.as_ref())
        .await?;

    // When duplicates were closed, the most recently started one is
    // the session reported back.
    let session = closed
        .into_iter()
        .max_by_key(|session| session.started_at)
        .ok_or_else(|| not_found!("Student not active"))?;

    Ok((StatusCode::CREATED, Json(session)))
}
