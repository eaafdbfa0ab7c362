use std::{sync::Arc, time::Duration};

use chrono::DateTime;
use chrono_tz::Tz;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

use crate::auth::{repository::SeaOrmAuthRepository, service::AuthService};

pub type AppState = Arc<State>;

/// Process-wide dependencies, constructed once at startup and shared
/// by every request task. The connection handle lives behind an `Arc`
/// so the auth repository shares it without requiring `Clone` on the
/// connection itself.
pub struct State {
    pub db: Arc<DatabaseConnection>,
    pub timezone: Tz,
    pub auth: AuthService,
}

impl State {
    pub async fn new(database_url: &str, timezone: Tz) -> Result<Self, DbErr> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(10)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8));

        let db = Database::connect(opt).await?;
        Ok(Self::with_connection(db, timezone))
    }

    pub fn with_connection(db: DatabaseConnection, timezone: Tz) -> Self {
        let db = Arc::new(db);
        let auth = AuthService::new(Arc::new(SeaOrmAuthRepository::new(db.clone())));
        Self { db, timezone, auth }
    }

    /// Wall clock in the lounge's timezone; session timestamps are
    /// stored as this local time.
    pub fn now(&self) -> DateTime<Tz> {
        chrono::Utc::now().with_timezone(&self.timezone)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    #[test]
    fn with_connection_shares_the_handle_without_cloning_it() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let state = State::with_connection(db, chrono_tz::America::Vancouver);

        // One owner here, one inside the auth repository.
        assert_eq!(Arc::strong_count(&state.db), 2);
    }
}
