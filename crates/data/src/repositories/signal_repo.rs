//! Trading signal repository.
//!
//! Signals carry an optional idempotency key; when present, re-inserting a
//! signal for the same asset and time bucket is a no-op. The dedup policy
//! lives here, at the persistence boundary, not in the classifier.

use anyhow::Result;
use sqlx::PgPool;

use senti_bot_core::Signal;

use crate::models::SignalRow;

/// Repository for trading signals.
#[derive(Debug, Clone)]
pub struct SignalRepository {
    pool: PgPool,
}

impl SignalRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a signal and returns its generated id, or `None` when the
    /// dedup key already exists.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, signal: &Signal) -> Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as(
            r"
            INSERT INTO signals
                (generated_at, asset, signal_type, confidence_score, sentiment_score,
                 post_count, bullish_pct, bearish_pct, reasoning, dedup_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (dedup_key) DO NOTHING
            RETURNING id
            ",
        )
        .bind(signal.generated_at)
        .bind(&signal.asset)
        .bind(signal.signal_type.as_str())
        .bind(signal.confidence_score)
        .bind(signal.sentiment_score)
        .bind(signal.post_count as i64)
        .bind(signal.bullish_pct)
        .bind(signal.bearish_pct)
        .bind(&signal.reasoning)
        .bind(&signal.dedup_key)
        .fetch_optional(&self.pool)
        .await?;

        if row.is_none() {
            tracing::debug!(asset = %signal.asset, key = ?signal.dedup_key, "duplicate signal skipped");
        }
        Ok(row.map(|(id,)| id))
    }

    /// Returns the most recent signals, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<SignalRow>> {
        let rows = sqlx::query_as::<_, SignalRow>(
            r"
            SELECT id, generated_at, asset, signal_type, confidence_score, sentiment_score,
                   post_count, bullish_pct, bearish_pct, reasoning, dedup_key
            FROM signals
            ORDER BY generated_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Gets a signal by id.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<SignalRow>> {
        let row = sqlx::query_as::<_, SignalRow>(
            r"
            SELECT id, generated_at, asset, signal_type, confidence_score, sentiment_score,
                   post_count, bullish_pct, bearish_pct, reasoning, dedup_key
            FROM signals
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Counts all stored signals.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM signals")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }
}
