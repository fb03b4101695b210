//! Database connection and schema management.

use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

/// PostgreSQL client owning the connection pool.
pub struct DatabaseClient {
    pool: PgPool,
}

impl DatabaseClient {
    /// Creates a new database client connected to the specified `PostgreSQL`
    /// database.
    ///
    /// # Errors
    /// Returns an error if the database connection cannot be established.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Returns a clone of the underlying pool for repositories.
    #[must_use]
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    /// Creates the schema if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if any DDL statement fails.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS analyzed_posts (
                id BIGSERIAL PRIMARY KEY,
                post_id TEXT NOT NULL UNIQUE,
                source_channel TEXT NOT NULL,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                engagement_score BIGINT NOT NULL,
                comment_count BIGINT NOT NULL,
                sentiment TEXT NOT NULL,
                sentiment_score DOUBLE PRECISION NOT NULL,
                confidence DOUBLE PRECISION NOT NULL,
                mentioned_assets TEXT[] NOT NULL,
                themes TEXT[] NOT NULL,
                posted_at TIMESTAMPTZ NOT NULL,
                analyzed_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS signals (
                id BIGSERIAL PRIMARY KEY,
                generated_at TIMESTAMPTZ NOT NULL,
                asset TEXT NOT NULL,
                signal_type TEXT NOT NULL,
                confidence_score DOUBLE PRECISION NOT NULL,
                sentiment_score DOUBLE PRECISION NOT NULL,
                post_count BIGINT NOT NULL,
                bullish_pct DOUBLE PRECISION NOT NULL,
                bearish_pct DOUBLE PRECISION NOT NULL,
                reasoning TEXT NOT NULL,
                dedup_key TEXT UNIQUE
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS paper_trades (
                id BIGSERIAL PRIMARY KEY,
                signal_id BIGINT NOT NULL,
                asset TEXT NOT NULL,
                trade_type TEXT NOT NULL,
                entry_price NUMERIC NOT NULL,
                exit_price NUMERIC,
                position_size NUMERIC NOT NULL,
                pnl NUMERIC,
                status TEXT NOT NULL DEFAULT 'open',
                opened_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                closed_at TIMESTAMPTZ
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("database schema initialized");
        Ok(())
    }
}
