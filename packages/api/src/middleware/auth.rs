use axum::{
    body::Body,
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{error::ApiError, state::AppState};

/// Identity resolved by the auth layer, attached as a request
/// extension for downstream handlers.
#[derive(Debug, Clone)]
pub struct AppIdentity {
    pub app_name: String,
}

/// Single policy enforcement point: every route mounted behind this
/// layer requires `Authorization: Bearer api_<key_id>.<secret>`.
/// Missing header, malformed key, unknown key id and digest mismatch
/// all short-circuit with the same 401 body.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response<Body>, ApiError> {
    let bearer = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::unauthorized("Unauthorized: Invalid API Key"))?;

    let app_name = state.auth.validate_api_key(bearer.trim()).await?;

    request.extensions_mut().insert(AppIdentity { app_name });
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        Extension, Router,
        body::to_bytes,
        http::{Request as HttpRequest, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
    };
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::auth::{
        error::AuthError,
        repository::{AuthRepository, NewCredential},
        service::AuthService,
    };
    use crate::entity::application;
    use crate::state::State as LoungeState;

    #[derive(Default)]
    struct MemoryRepo {
        rows: Mutex<HashMap<String, application::Model>>,
    }

    #[async_trait]
    impl AuthRepository for MemoryRepo {
        async fn store(&self, credential: NewCredential) -> Result<(), AuthError> {
            self.rows.lock().unwrap().insert(
                credential.key_id.clone(),
                application::Model {
                    id: Uuid::new_v4(),
                    app_name: credential.app_name,
                    key_id: credential.key_id,
                    hashed_key: credential.hashed_key,
                    created_at: Utc::now().naive_utc(),
                    last_used_at: None,
                },
            );
            Ok(())
        }

        async fn find_by_key_id(
            &self,
            key_id: &str,
        ) -> Result<Option<application::Model>, AuthError> {
            Ok(self.rows.lock().unwrap().get(key_id).cloned())
        }

        async fn update_last_used(&self, _key_id: &str) -> Result<(), AuthError> {
            Ok(())
        }
    }

    fn test_router() -> (Router, AuthService) {
        let auth = AuthService::new(Arc::new(MemoryRepo::default()));
        let state = Arc::new(LoungeState {
            db: Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection()),
            timezone: chrono_tz::America::Vancouver,
            auth: auth.clone(),
        });

        let router = Router::new()
            .route(
                "/whoami",
                get(|Extension(identity): Extension<AppIdentity>| async move {
                    identity.app_name
                }),
            )
            .layer(from_fn_with_state(state, auth_middleware));

        (router, auth)
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn request(auth_header: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/whoami");
        if let Some(value) = auth_header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_key_reaches_handler_with_identity() {
        let (router, auth) = test_router();
        let issued = auth.generate_api_key("test-app").await.unwrap();

        let response = router
            .oneshot(request(Some(&format!("Bearer {}", issued.api_key))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "test-app");
    }

    #[tokio::test]
    async fn all_rejection_paths_share_one_body() {
        let (router, auth) = test_router();
        let issued = auth.generate_api_key("test-app").await.unwrap();

        // Wrong secret under a real key id.
        let (key_id, _) = crate::auth::keys::parse_api_key(&issued.api_key).unwrap();
        let wrong_secret = format!("Bearer api_{key_id}.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA");

        let cases = [
            None,
            Some("Basic xyz"),
            Some("Bearer wrong"),
            Some("Bearer api_unknown.secret"),
            Some(wrong_secret.as_str()),
        ];

        let mut bodies = Vec::new();
        for case in cases {
            let response = router.clone().oneshot(request(case)).await.unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
            bodies.push(body_string(response).await);
        }

        // Indistinguishable: the caller cannot learn which check failed.
        assert!(bodies.iter().all(|body| body == &bodies[0]));
        let parsed: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
        assert_eq!(
            parsed["error"]["message"],
            "Unauthorized: Invalid API Key"
        );
    }
}
