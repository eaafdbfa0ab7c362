use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, SqlErr, sea_query::Expr,
};
use uuid::Uuid;

use super::error::AuthError;
use crate::entity::{application, prelude::Application};

/// A credential record about to be persisted. The plaintext secret is
/// never part of it.
#[derive(Debug, Clone)]
pub struct NewCredential {
    pub app_name: String,
    pub key_id: String,
    pub hashed_key: String,
}

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Inserts a new credential row. A `key_id` collision surfaces as
    /// `Conflict` so the caller may regenerate.
    async fn store(&self, credential: NewCredential) -> Result<(), AuthError>;

    async fn find_by_key_id(&self, key_id: &str)
    -> Result<Option<application::Model>, AuthError>;

    /// Best-effort timestamp touch; failures here must never fail the
    /// request that triggered it.
    async fn update_last_used(&self, key_id: &str) -> Result<(), AuthError>;
}

#[derive(Debug, Clone)]
pub struct SeaOrmAuthRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAuthRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn store(&self, credential: NewCredential) -> Result<(), AuthError> {
        let record = application::ActiveModel {
            id: Set(Uuid::new_v4()),
            app_name: Set(credential.app_name),
            key_id: Set(credential.key_id),
            hashed_key: Set(credential.hashed_key),
            created_at: Set(Utc::now().naive_utc()),
            last_used_at: Set(None),
        };

        match record.insert(self.db.as_ref()).await {
            Ok(_) => Ok(()),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(AuthError::Conflict),
                _ => Err(AuthError::Db(err)),
            },
        }
    }

    async fn find_by_key_id(
        &self,
        key_id: &str,
    ) -> Result<Option<application::Model>, AuthError> {
        let found = Application::find()
            .filter(application::Column::KeyId.eq(key_id))
            .one(self.db.as_ref())
            .await?;
        Ok(found)
    }

    async fn update_last_used(&self, key_id: &str) -> Result<(), AuthError> {
        Application::update_many()
            .col_expr(
                application::Column::LastUsedAt,
                Expr::value(Utc::now().naive_utc()),
            )
            .filter(application::Column::KeyId.eq(key_id))
            .exec(self.db.as_ref())
            .await?;
        Ok(())
    }
}
