use serde::Deserialize;

pub mod activity;
pub mod admin;
pub mod health;

/// Query parameters shared by paginated listings.
#[derive(Clone, Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}
