use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Serialize;

use super::{
    error::AuthError,
    keys,
    repository::{AuthRepository, NewCredential},
};

const MAX_APP_NAME_LEN: usize = 100;

static VALID_APP_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("app name pattern is valid"));

/// Freshly issued credential. Carries the plaintext key exactly once;
/// it is not recoverable afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedKey {
    pub key_id: String,
    pub api_key: String,
    pub app_name: String,
}

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>) -> Self {
        Self { repo }
    }

    pub async fn generate_api_key(&self, app_name: &str) -> Result<IssuedKey, AuthError> {
        validate_app_name(app_name)?;

        let (key_id, secret) = keys::generate_credentials()?;
        let hashed_key = keys::hash_secret(&secret);

        self.repo
            .store(NewCredential {
                app_name: app_name.to_string(),
                key_id: key_id.clone(),
                hashed_key,
            })
            .await?;

        Ok(IssuedKey {
            api_key: keys::format_api_key(&key_id, &secret),
            key_id,
            app_name: app_name.to_string(),
        })
    }

    /// Resolves a raw bearer credential to the app name it was issued
    /// to. Malformed keys, unknown key ids and digest mismatches all
    /// map to the same 401 at the HTTP boundary.
    pub async fn validate_api_key(&self, raw_key: &str) -> Result<String, AuthError> {
        let (key_id, secret) = keys::parse_api_key(raw_key)?;

        let credential = self
            .repo
            .find_by_key_id(key_id)
            .await?
            .ok_or(AuthError::Unauthorized)?;

        if !keys::verify_secret(secret, &credential.hashed_key) {
            return Err(AuthError::Unauthorized);
        }

        // Usage tracking is best effort and must never delay or fail
        // the request being authenticated.
        let repo = self.repo.clone();
        let key_id = key_id.to_string();
        tokio::spawn(async move {
            if let Err(err) = repo.update_last_used(&key_id).await {
                tracing::warn!("Failed to touch last_used_at for key {}: {}", key_id, err);
            }
        });

        Ok(credential.app_name)
    }
}

fn validate_app_name(app_name: &str) -> Result<(), AuthError> {
    if app_name.is_empty() {
        return Err(AuthError::InvalidAppName(
            "app_name is required".to_string(),
        ));
    }
    if app_name.len() > MAX_APP_NAME_LEN {
        return Err(AuthError::InvalidAppName(format!(
            "app_name must be {MAX_APP_NAME_LEN} characters or less"
        )));
    }
    if !VALID_APP_NAME.is_match(app_name) {
        return Err(AuthError::InvalidAppName(
            "app_name can only contain letters, numbers, hyphens, and underscores".to_string(),
        ));
    }
    Ok(())
}
