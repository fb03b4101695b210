//! Analyzed post repository.
//!
//! Posts are deduplicated by source post id: inserting an already-stored
//! post is a no-op, so repeated scans over overlapping windows do not
//! double-count.

use anyhow::Result;
use sqlx::PgPool;

use senti_bot_core::SentimentRecord;

use crate::models::AnalyzedPostRow;

/// Repository for classified posts.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a classified post if its id is not already stored.
    ///
    /// Returns `true` when a row was inserted.
    ///
    /// # Errors
    /// Returns an error if the database operation fails.
    pub async fn insert(&self, record: &SentimentRecord) -> Result<bool> {
        let mentioned: Vec<String> = record.mentioned_assets.iter().cloned().collect();
        let themes: Vec<String> = record.themes.iter().cloned().collect();

        let result = sqlx::query(
            r"
            INSERT INTO analyzed_posts
                (post_id, source_channel, title, body, engagement_score, comment_count,
                 sentiment, sentiment_score, confidence, mentioned_assets, themes, posted_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (post_id) DO NOTHING
            ",
        )
        .bind(&record.id)
        .bind(&record.source_channel)
        .bind(&record.title)
        .bind(&record.body)
        .bind(record.engagement_score)
        .bind(record.comment_count)
        .bind(record.sentiment_label.as_str())
        .bind(record.sentiment_score)
        .bind(record.confidence)
        .bind(&mentioned)
        .bind(&themes)
        .bind(record.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Inserts a batch of classified posts, returning how many were new.
    ///
    /// # Errors
    /// Returns an error if any insertion fails.
    pub async fn insert_batch(&self, records: &[SentimentRecord]) -> Result<u64> {
        let mut inserted = 0u64;
        for record in records {
            if self.insert(record).await? {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    /// Returns the most recently analyzed posts, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<AnalyzedPostRow>> {
        let rows = sqlx::query_as::<_, AnalyzedPostRow>(
            r"
            SELECT id, post_id, source_channel, title, body, engagement_score, comment_count,
                   sentiment, sentiment_score, confidence, mentioned_assets, themes,
                   posted_at, analyzed_at
            FROM analyzed_posts
            ORDER BY analyzed_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Counts posts analyzed within the past 24 hours.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn analyzed_last_24h(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r"
            SELECT COUNT(*) FROM analyzed_posts
            WHERE analyzed_at > now() - INTERVAL '24 hours'
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }
}
