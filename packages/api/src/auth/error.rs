use thiserror::Error;

/// Auth domain errors. `MalformedKey` and `Unauthorized` are kept
/// apart internally but collapse into one HTTP body at the boundary
/// so a caller cannot tell which check failed.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidAppName(String),
    #[error("API key is malformed")]
    MalformedKey,
    #[error("API key was rejected")]
    Unauthorized,
    #[error("key_id already exists")]
    Conflict,
    #[error("entropy source failure: {0}")]
    Entropy(String),
    #[error("credential store failure: {0}")]
    Db(#[from] sea_orm::DbErr),
}
