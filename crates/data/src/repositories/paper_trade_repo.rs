//! Paper trade repository.
//!
//! The open -> closed transition is enforced in SQL: the close update is
//! guarded by `status = 'open'`, so two racing closes on the same id cannot
//! both book PnL.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;

use senti_bot_core::{CoreError, PerformanceStats, SignalType};

use crate::models::PaperTradeRow;

/// Repository for paper trades.
#[derive(Debug, Clone)]
pub struct PaperTradeRepository {
    pool: PgPool,
}

impl PaperTradeRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a paper trade against a stored signal and returns its id.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` for non-positive price or size, or an
    /// error if the database operation fails.
    pub async fn open(
        &self,
        signal_id: i64,
        asset: &str,
        trade_type: SignalType,
        entry_price: Decimal,
        position_size: Decimal,
    ) -> Result<i64> {
        if entry_price <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "entry price must be positive, got {entry_price}"
            ))
            .into());
        }
        if position_size <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "position size must be positive, got {position_size}"
            ))
            .into());
        }

        let row: (i64,) = sqlx::query_as(
            r"
            INSERT INTO paper_trades (signal_id, asset, trade_type, entry_price, position_size, status)
            VALUES ($1, $2, $3, $4, $5, 'open')
            RETURNING id
            ",
        )
        .bind(signal_id)
        .bind(asset)
        .bind(trade_type.as_str())
        .bind(entry_price)
        .bind(position_size)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Closes an open paper trade and realizes its PnL.
    ///
    /// # Errors
    /// Returns `CoreError::PositionNotFound` for an unknown id,
    /// `CoreError::PositionAlreadyClosed` if the trade is not open, and
    /// `CoreError::Validation` for a non-positive exit price.
    pub async fn close(&self, id: i64, exit_price: Decimal) -> Result<PaperTradeRow> {
        if exit_price <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "exit price must be positive, got {exit_price}"
            ))
            .into());
        }

        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, PaperTradeRow>(
            r"
            SELECT id, signal_id, asset, trade_type, entry_price, exit_price, position_size,
                   pnl, status, opened_at, closed_at
            FROM paper_trades
            WHERE id = $1
            FOR UPDATE
            ",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::PositionNotFound(id))?;

        if current.status != "open" {
            return Err(CoreError::PositionAlreadyClosed(id).into());
        }

        let trade_type = SignalType::parse(&current.trade_type).ok_or_else(|| {
            CoreError::Validation(format!("unknown trade type {:?}", current.trade_type))
        })?;
        let pnl = match trade_type {
            SignalType::Buy => {
                (exit_price - current.entry_price) / current.entry_price * current.position_size
            }
            SignalType::Sell => {
                (current.entry_price - exit_price) / current.entry_price * current.position_size
            }
        };

        let closed = sqlx::query_as::<_, PaperTradeRow>(
            r"
            UPDATE paper_trades
            SET exit_price = $2, pnl = $3, status = 'closed', closed_at = $4
            WHERE id = $1 AND status = 'open'
            RETURNING id, signal_id, asset, trade_type, entry_price, exit_price, position_size,
                      pnl, status, opened_at, closed_at
            ",
        )
        .bind(id)
        .bind(exit_price)
        .bind(pnl)
        .bind(Utc::now())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(CoreError::PositionAlreadyClosed(id))?;

        tx.commit().await?;

        tracing::info!(id, exit = %exit_price, pnl = %pnl, "closed paper trade");
        Ok(closed)
    }

    /// Gets a paper trade by id.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<PaperTradeRow>> {
        let row = sqlx::query_as::<_, PaperTradeRow>(
            r"
            SELECT id, signal_id, asset, trade_type, entry_price, exit_price, position_size,
                   pnl, status, opened_at, closed_at
            FROM paper_trades
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Returns the most recent paper trades, newest first.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<PaperTradeRow>> {
        let rows = sqlx::query_as::<_, PaperTradeRow>(
            r"
            SELECT id, signal_id, asset, trade_type, entry_price, exit_price, position_size,
                   pnl, status, opened_at, closed_at
            FROM paper_trades
            ORDER BY opened_at DESC
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Computes aggregate paper trading performance.
    ///
    /// Zero-safe: with no closed trades, averages and win rate are zero.
    ///
    /// # Errors
    /// Returns an error if the database query fails.
    pub async fn performance_stats(&self) -> Result<PerformanceStats> {
        let signals: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM signals")
            .fetch_one(&self.pool)
            .await?;

        let trades: (i64, i64, i64) = sqlx::query_as(
            r"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE status = 'open'),
                   COUNT(*) FILTER (WHERE status = 'closed')
            FROM paper_trades
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        let closed: (Option<Decimal>, Option<Decimal>, i64) = sqlx::query_as(
            r"
            SELECT SUM(pnl), AVG(pnl), COUNT(*) FILTER (WHERE pnl > 0)
            FROM paper_trades
            WHERE status = 'closed'
            ",
        )
        .fetch_one(&self.pool)
        .await?;

        let (total_trades, open_trades, closed_trades) = trades;
        let (total_pnl, avg_pnl, winning_trades) = closed;
        let win_rate = if closed_trades > 0 {
            winning_trades as f64 / closed_trades as f64 * 100.0
        } else {
            0.0
        };

        Ok(PerformanceStats {
            total_signals: signals.0,
            total_trades,
            open_trades,
            closed_trades,
            total_pnl: total_pnl.unwrap_or_default(),
            avg_pnl: avg_pnl.unwrap_or_default(),
            winning_trades,
            win_rate,
        })
    }
}
