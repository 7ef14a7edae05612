use std::{ops::Deref, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

/// A handle to the Postgres pool backing the application. Repositories are
/// implemented directly on this type.
#[derive(Clone)]
pub struct PostgresConnection(PgPool);

impl PostgresConnection {
    /// Open a connection pool with the provided settings.
    pub async fn connect(
        url: &str,
        pool_size: u32,
        acquire_timeout: Duration,
    ) -> sqlx::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self(pool))
    }
}

impl Deref for PostgresConnection {
    type Target = PgPool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
