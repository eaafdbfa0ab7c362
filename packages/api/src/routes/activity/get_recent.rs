use axum::{
    Json,
    extract::{Query, State},
};
use chrono::NaiveDateTime;
use sea_orm::{
    Condition, EntityTrait, FromQueryResult, JoinType, Order, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
    sea_query::{Expr, NullOrdering, extension::postgres::PgExpr},
};
use serde::Serialize;

use crate::{
    entity::{gamer_activity, gamer_profile, prelude::GamerActivity},
    error::ApiError,
    routes::PageParams,
    state::AppState,
};

const DEFAULT_LIMIT: u64 = 10;

#[derive(Debug, FromQueryResult, Serialize)]
pub struct RecentActivity {
    pub student_number: String,
    pub pc_number: i32,
    pub game: String,
    pub started_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
    pub exec_name: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

/// Recent sessions joined with profile names, newest first, with
/// optional case-insensitive substring search.
#[tracing::instrument(name = "GET /activity/all/recent", skip(state))]
pub async fn get_recent(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Vec<RecentActivity>>, ApiError> {
    let page = params.page.unwrap_or(1);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let offset = page_offset(page, limit);

    let mut query = GamerActivity::find()
        .join(
            JoinType::InnerJoin,
            gamer_activity::Relation::GamerProfile.def(),
        )
        .select_only()
        .columns([
            gamer_activity::Column::StudentNumber,
            gamer_activity::Column::PcNumber,
            gamer_activity::Column::Game,
            gamer_activity::Column::StartedAt,
            gamer_activity::Column::EndedAt,
            gamer_activity::Column::ExecName,
        ])
        .columns([
            gamer_profile::Column::FirstName,
            gamer_profile::Column::LastName,
        ]);

    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        query = query.filter(search_condition(search));
    }

    let rows = query
        .order_by_with_nulls(
            gamer_activity::Column::StartedAt,
            Order::Desc,
            NullOrdering::Last,
        )
        .limit(limit)
        .offset(offset)
        .into_model::<RecentActivity>()
        .all(state.db.as_ref())
        .await?;

    Ok(Json(rows))
}

/// Saturating on both ends: page and limit come straight off the
/// query string and may be anything up to `u64::MAX`.
fn page_offset(page: u64, limit: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(limit)
}

/// Substring match across student number, names, game, exec name, and
/// the session's start date rendered as YYYY-MM-DD.
fn search_condition(search: &str) -> Condition {
    let pattern = format!("%{search}%");
    Condition::any()
        .add(
            Expr::col((gamer_activity::Entity, gamer_activity::Column::StudentNumber))
                .ilike(pattern.as_str()),
        )
        .add(
            Expr::col((gamer_profile::Entity, gamer_profile::Column::FirstName))
                .ilike(pattern.as_str()),
        )
        .add(
            Expr::col((gamer_profile::Entity, gamer_profile::Column::LastName))
                .ilike(pattern.as_str()),
        )
        .add(
            Expr::col((gamer_activity::Entity, gamer_activity::Column::Game))
                .ilike(pattern.as_str()),
        )
        .add(
            Expr::col((gamer_activity::Entity, gamer_activity::Column::ExecName))
                .ilike(pattern.as_str()),
        )
        .add(Expr::cust_with_values(
            "TO_CHAR(gamer_activity.started_at, 'YYYY-MM-DD') ILIKE $1",
            [pattern],
        ))
}
