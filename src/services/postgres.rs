use crate::models::{pair_key, MatchPair, MatchRecord};
use crate::services::store::{MatchStore, StoreError};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// PostgreSQL client for persisted match records
///
/// Each stable pair is stored as two directional rows (one per participant)
/// plus a canonical `pair_key` column so existence checks for an unordered
/// pair are a single indexed lookup. The matching service treats this store
/// as a sink: it never reads records back to build preference lists.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL with URL: {}", url);

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Check whether any direction of the unordered pair is already recorded.
    pub async fn exists_pair(&self, a_id: &str, b_id: &str) -> Result<bool, PostgresError> {
        let key = pair_key(a_id, b_id);
        let query = r#"
            SELECT EXISTS(SELECT 1 FROM match_records WHERE pair_key = $1) AS present
        "#;

        let row = sqlx::query(query).bind(&key).fetch_one(&self.pool).await?;
        Ok(row.get("present"))
    }

    /// Persist one stable pair as two directional rows in a single
    /// transaction, so a pair is recorded either fully or not at all.
    /// Conflicting rows are left untouched.
    pub async fn record_pair(&self, pair: &MatchPair) -> Result<(), PostgresError> {
        let key = pair_key(&pair.a_id, &pair.b_id);
        let insert = r#"
            INSERT INTO match_records
                (from_user_id, to_user_id, pair_key, compatibility_score, is_match, matched_at)
            VALUES ($1, $2, $3, $4, TRUE, NOW())
            ON CONFLICT (from_user_id, to_user_id) DO NOTHING
        "#;

        let mut tx = self.pool.begin().await?;
        sqlx::query(insert)
            .bind(&pair.a_id)
            .bind(&pair.b_id)
            .bind(&key)
            .bind(i16::from(pair.compatibility_score))
            .execute(&mut *tx)
            .await?;
        sqlx::query(insert)
            .bind(&pair.b_id)
            .bind(&pair.a_id)
            .bind(&key)
            .bind(i16::from(pair.compatibility_score))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::debug!(
            "Recorded match pair: {} <-> {} (score {})",
            pair.a_id,
            pair.b_id,
            pair.compatibility_score
        );

        Ok(())
    }

    /// Fetch the directional match records for a user, best score first.
    pub async fn get_user_matches(&self, user_id: &str) -> Result<Vec<MatchRecord>, PostgresError> {
        let query = r#"
            SELECT to_user_id, compatibility_score, matched_at
            FROM match_records
            WHERE from_user_id = $1 AND is_match = TRUE
            ORDER BY compatibility_score DESC, to_user_id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| MatchRecord {
                user_id: user_id.to_string(),
                partner_id: row.get("to_user_id"),
                compatibility_score: u8::try_from(row.get::<i16, _>("compatibility_score"))
                    .unwrap_or(0),
                matched_at: row.get("matched_at"),
            })
            .collect();

        Ok(records)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

impl MatchStore for PostgresClient {
    async fn pair_exists(&self, a_id: &str, b_id: &str) -> Result<bool, StoreError> {
        Ok(self.exists_pair(a_id, b_id).await?)
    }

    async fn insert_pair(&self, pair: &MatchPair) -> Result<(), StoreError> {
        Ok(self.record_pair(pair).await?)
    }

    async fn matches_for(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.get_user_matches(user_id).await?)
    }
}
