use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

pub mod check_in;
pub mod check_out;
pub mod get_active_pcs;
pub mod get_by_student;
pub mod get_recent;
pub mod get_today;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(check_in::check_in))
        .route("/{student_number}", get(get_by_student::get_by_student))
        .route("/today/{student_number}", get(get_today::get_today))
        .route("/all/recent", get(get_recent::get_recent))
        .route(
            "/update/{student_number}",
            post(check_out::check_out).patch(check_out::check_out),
        )
        .route("/get-active-pcs", get(get_active_pcs::get_active_pcs))
}
