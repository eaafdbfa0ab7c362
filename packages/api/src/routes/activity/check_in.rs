use axum::{Json, extract::State, http::StatusCode};
use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entity::{gamer_activity, prelude::GamerProfile},
    error::ApiError,
    forbidden, not_found,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CheckInInput {
    pub student_number: String,
    pub pc_number: i32,
    pub game: String,
}

#[tracing::instrument(name = "POST /activity", skip(state, input))]
pub async fn check_in(
    State(state): State<AppState>,
    Json(input): Json<CheckInInput>,
) -> Result<(StatusCode, Json<gamer_activity::Model>), ApiError> {
    let profile = GamerProfile::find_by_id(input.student_number.clone())
        .one(state.db.as_ref())
        .await?
        .ok_or_else(|| not_found!("foreign key {} not found", input.student_number))?;

    let now = state.now();
    if let Some(expired_on) =
        expired_membership(profile.membership_expiry_date, now.date_naive(), state.timezone)
    {
        return Err(forbidden!(
            "membership expired on {}, please renew it at the front desk before checking in",
            expired_on
        ));
    }

    // started_at is always the server's wall clock; the client never
    // supplies it. No guard against an already-open session for the
    // same student+PC pair.
    let session = gamer_activity::ActiveModel {
        id: Set(Uuid::new_v4()),
        student_number: Set(input.student_number),
        pc_number: Set(input.pc_number),
        game: Set(input.game),
        started_at: Set(now.naive_local()),
        ended_at: Set(None),
        exec_name: Set(None),
    };

    let session = session.insert(state.db.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Day-truncated expiry gate. The stored expiry is a date at UTC
/// midnight; rendered in the lounge timezone it names the last day
/// the membership is valid. Returns that day when it has passed.
fn expired_membership(expiry: NaiveDateTime, today: NaiveDate, tz: Tz) -> Option<NaiveDate> {
    let expiry_local = expiry.and_utc().with_timezone(&tz).date_naive();
    (today > expiry_local).then_some(expiry_local)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::entity::gamer_profile;
    use crate::state::State as LoungeState;

    const TZ: Tz = chrono_tz::America::Vancouver;

    fn naive(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn profile(expiry: NaiveDateTime) -> gamer_profile::Model {
        gamer_profile::Model {
            student_number: "11223344".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            membership_tier: 1,
            membership_expiry_date: expiry,
            banned: None,
            notes: None,
            created_at: None,
        }
    }

    fn input() -> CheckInInput {
        CheckInInput {
            student_number: "11223344".to_string(),
            pc_number: 1,
            game: "Valorant".to_string(),
        }
    }

    #[test]
    fn expiry_renders_as_previous_local_day() {
        // 2020-09-18 at UTC midnight is still 2020-09-17 in Vancouver.
        let expiry = naive(2020, 9, 18);

        let last_valid = NaiveDate::from_ymd_opt(2020, 9, 17).unwrap();
        assert_eq!(expired_membership(expiry, last_valid, TZ), None);

        let next_day = NaiveDate::from_ymd_opt(2020, 9, 18).unwrap();
        assert_eq!(expired_membership(expiry, next_day, TZ), Some(last_valid));
    }

    #[test]
    fn unexpired_membership_passes_gate() {
        let expiry = naive(2099, 1, 1);
        let today = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        assert_eq!(expired_membership(expiry, today, TZ), None);
    }

    #[tokio::test]
    async fn missing_profile_is_a_foreign_key_miss() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<gamer_profile::Model>::new()])
            .into_connection();
        let state = Arc::new(LoungeState::with_connection(db, TZ));

        let err = check_in(State(state), Json(input())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), Some("foreign key 11223344 not found"));
    }

    #[tokio::test]
    async fn expired_membership_is_forbidden_and_names_the_date() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile(naive(2020, 9, 18))]])
            .into_connection();
        let state = Arc::new(LoungeState::with_connection(db, TZ));

        let err = check_in(State(state), Json(input())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        let message = err.public_message().unwrap();
        assert!(message.contains("2020-09-17"), "got: {message}");
        assert!(message.contains("renew"), "got: {message}");
    }

    #[tokio::test]
    async fn valid_member_gets_an_open_session() {
        let state_tz = TZ;
        let started_at = chrono::Utc::now().with_timezone(&state_tz).naive_local();
        let inserted = gamer_activity::Model {
            id: Uuid::new_v4(),
            student_number: "11223344".to_string(),
            pc_number: 1,
            game: "Valorant".to_string(),
            started_at,
            ended_at: None,
            exec_name: None,
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![profile(naive(2099, 1, 1))]])
            .append_query_results([vec![inserted.clone()]])
            .into_connection();
        let state = Arc::new(LoungeState::with_connection(db, TZ));

        let (status, Json(session)) = check_in(State(state), Json(input())).await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(session.ended_at, None);
        assert_eq!(session.exec_name, None);
        assert_eq!(session.game, "Valorant");
    }
}
