//! In-memory paper position tracker.
//!
//! Tracks simulated positions opened from signals and realizes PnL on close.
//! All mutation happens under a single lock, so a raced double close is
//! rejected and `stats()` always observes a consistent snapshot.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use rust_decimal::Decimal;

use senti_bot_core::{
    CoreError, PaperPosition, PerformanceStats, PositionStatus, Signal, SignalType,
};

#[derive(Debug, Default)]
struct TrackerState {
    positions: HashMap<i64, PaperPosition>,
    next_position_id: i64,
    next_signal_id: i64,
    total_signals: i64,
}

/// Paper trading tracker with an open -> closed position state machine.
///
/// Closing is terminal: a second close attempt fails with
/// `CoreError::PositionAlreadyClosed` before any field is touched, so PnL
/// can never be double-booked into the aggregate stats.
#[derive(Debug, Default)]
pub struct PaperPositionTracker {
    state: Mutex<TrackerState>,
}

impl PaperPositionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a generated signal and returns its tracker-assigned id.
    ///
    /// Signals are counted for `stats()` whether or not they spawn a trade.
    pub fn register_signal(&self, signal: &Signal) -> i64 {
        let mut state = self.lock();
        state.next_signal_id += 1;
        state.total_signals += 1;
        tracing::debug!(asset = %signal.asset, signal_type = signal.signal_type.as_str(), "registered signal");
        state.next_signal_id
    }

    /// Opens a paper position against a signal.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` if the ticker is empty or price/size
    /// are not strictly positive.
    pub fn open(
        &self,
        signal_id: i64,
        asset: &str,
        trade_type: SignalType,
        entry_price: Decimal,
        position_size: Decimal,
    ) -> Result<PaperPosition, CoreError> {
        if asset.trim().is_empty() {
            return Err(CoreError::Validation("asset ticker must not be empty".into()));
        }
        if entry_price <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "entry price must be positive, got {entry_price}"
            )));
        }
        if position_size <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "position size must be positive, got {position_size}"
            )));
        }

        let mut state = self.lock();
        state.next_position_id += 1;
        let position = PaperPosition {
            id: state.next_position_id,
            signal_id,
            asset: asset.to_uppercase(),
            trade_type,
            entry_price,
            exit_price: None,
            position_size,
            pnl: None,
            status: PositionStatus::Open,
            opened_at: Utc::now(),
            closed_at: None,
        };
        state.positions.insert(position.id, position.clone());

        tracing::info!(
            id = position.id,
            asset = %position.asset,
            trade_type = position.trade_type.as_str(),
            entry = %entry_price,
            size = %position_size,
            "opened paper position"
        );
        Ok(position)
    }

    /// Closes an open position and realizes its PnL.
    ///
    /// # Errors
    /// Returns `CoreError::Validation` if the exit price is not positive,
    /// `CoreError::PositionNotFound` for an unknown id, and
    /// `CoreError::PositionAlreadyClosed` if the position was closed before.
    pub fn close(&self, position_id: i64, exit_price: Decimal) -> Result<PaperPosition, CoreError> {
        if exit_price <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "exit price must be positive, got {exit_price}"
            )));
        }

        let mut state = self.lock();
        let position = state
            .positions
            .get_mut(&position_id)
            .ok_or(CoreError::PositionNotFound(position_id))?;

        if position.status == PositionStatus::Closed {
            return Err(CoreError::PositionAlreadyClosed(position_id));
        }

        let pnl = position.realized_pnl(exit_price);
        position.exit_price = Some(exit_price);
        position.pnl = Some(pnl);
        position.status = PositionStatus::Closed;
        position.closed_at = Some(Utc::now());

        tracing::info!(id = position_id, exit = %exit_price, pnl = %pnl, "closed paper position");
        Ok(position.clone())
    }

    /// Looks up a position by id.
    #[must_use]
    pub fn position(&self, position_id: i64) -> Option<PaperPosition> {
        self.lock().positions.get(&position_id).cloned()
    }

    /// Returns all positions sorted by id.
    #[must_use]
    pub fn positions(&self) -> Vec<PaperPosition> {
        let state = self.lock();
        let mut positions: Vec<_> = state.positions.values().cloned().collect();
        positions.sort_by_key(|p| p.id);
        positions
    }

    /// Computes aggregate performance from the full position set.
    #[must_use]
    pub fn stats(&self) -> PerformanceStats {
        let state = self.lock();

        let total_trades = state.positions.len() as i64;
        let mut open_trades = 0i64;
        let mut closed_trades = 0i64;
        let mut winning_trades = 0i64;
        let mut total_pnl = Decimal::ZERO;

        for position in state.positions.values() {
            match position.status {
                PositionStatus::Open => open_trades += 1,
                PositionStatus::Closed => {
                    closed_trades += 1;
                    if let Some(pnl) = position.pnl {
                        total_pnl += pnl;
                        if pnl > Decimal::ZERO {
                            winning_trades += 1;
                        }
                    }
                }
            }
        }

        let avg_pnl = if closed_trades > 0 {
            total_pnl / Decimal::from(closed_trades)
        } else {
            Decimal::ZERO
        };
        let win_rate = if closed_trades > 0 {
            winning_trades as f64 / closed_trades as f64 * 100.0
        } else {
            0.0
        };

        PerformanceStats {
            total_signals: state.total_signals,
            total_trades,
            open_trades,
            closed_trades,
            total_pnl,
            avg_pnl,
            winning_trades,
            win_rate,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TrackerState> {
        // State stays consistent across a poisoned lock; updates are applied
        // after all checks pass.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn signal(asset: &str, signal_type: SignalType) -> Signal {
        Signal {
            asset: asset.to_string(),
            signal_type,
            confidence_score: 0.9,
            sentiment_score: 0.8,
            post_count: 10,
            reasoning: String::new(),
            bullish_pct: 100.0,
            bearish_pct: 0.0,
            generated_at: Utc::now(),
            dedup_key: None,
        }
    }

    #[test]
    fn buy_close_realizes_positive_pnl_on_rise() {
        let tracker = PaperPositionTracker::new();
        let sid = tracker.register_signal(&signal("BTC", SignalType::Buy));
        let pos = tracker
            .open(sid, "BTC", SignalType::Buy, dec!(100), dec!(1000))
            .unwrap();

        let closed = tracker.close(pos.id, dec!(110)).unwrap();
        assert_eq!(closed.pnl, Some(dec!(100)));
        assert_eq!(closed.status, PositionStatus::Closed);
        assert!(closed.closed_at.is_some());
    }

    #[test]
    fn sell_close_realizes_negative_pnl_on_rise() {
        let tracker = PaperPositionTracker::new();
        let sid = tracker.register_signal(&signal("BTC", SignalType::Sell));
        let pos = tracker
            .open(sid, "BTC", SignalType::Sell, dec!(100), dec!(1000))
            .unwrap();

        let closed = tracker.close(pos.id, dec!(110)).unwrap();
        assert_eq!(closed.pnl, Some(dec!(-100)));
    }

    #[test]
    fn double_close_fails_without_mutating() {
        let tracker = PaperPositionTracker::new();
        let pos = tracker
            .open(1, "ETH", SignalType::Buy, dec!(2500), dec!(500))
            .unwrap();

        let first = tracker.close(pos.id, dec!(2600)).unwrap();
        let err = tracker.close(pos.id, dec!(9999)).unwrap_err();
        assert!(matches!(err, CoreError::PositionAlreadyClosed(_)));

        let after = tracker.position(pos.id).unwrap();
        assert_eq!(after.pnl, first.pnl);
        assert_eq!(after.closed_at, first.closed_at);
        assert_eq!(after.exit_price, Some(dec!(2600)));
    }

    #[test]
    fn close_unknown_position_fails() {
        let tracker = PaperPositionTracker::new();
        let err = tracker.close(42, dec!(100)).unwrap_err();
        assert!(matches!(err, CoreError::PositionNotFound(42)));
    }

    #[test]
    fn open_rejects_non_positive_inputs() {
        let tracker = PaperPositionTracker::new();
        assert!(tracker
            .open(1, "BTC", SignalType::Buy, dec!(0), dec!(1000))
            .is_err());
        assert!(tracker
            .open(1, "BTC", SignalType::Buy, dec!(100), dec!(-5))
            .is_err());
        assert!(tracker
            .open(1, "", SignalType::Buy, dec!(100), dec!(1000))
            .is_err());
    }

    #[test]
    fn stats_with_no_closed_trades_has_zero_win_rate() {
        let tracker = PaperPositionTracker::new();
        tracker
            .open(1, "BTC", SignalType::Buy, dec!(100), dec!(1000))
            .unwrap();

        let stats = tracker.stats();
        assert_eq!(stats.total_trades, 1);
        assert_eq!(stats.open_trades, 1);
        assert_eq!(stats.closed_trades, 0);
        assert_eq!(stats.win_rate, 0.0);
        assert_eq!(stats.avg_pnl, Decimal::ZERO);
    }

    #[test]
    fn stats_counts_wins_strictly() {
        let tracker = PaperPositionTracker::new();
        let win = tracker
            .open(1, "BTC", SignalType::Buy, dec!(100), dec!(1000))
            .unwrap();
        let flat = tracker
            .open(1, "ETH", SignalType::Buy, dec!(200), dec!(1000))
            .unwrap();
        let loss = tracker
            .open(1, "SOL", SignalType::Buy, dec!(50), dec!(1000))
            .unwrap();

        tracker.close(win.id, dec!(110)).unwrap();
        tracker.close(flat.id, dec!(200)).unwrap();
        tracker.close(loss.id, dec!(45)).unwrap();

        let stats = tracker.stats();
        assert_eq!(stats.closed_trades, 3);
        // Break-even trade is not a win.
        assert_eq!(stats.winning_trades, 1);
        assert!((stats.win_rate - 100.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.total_pnl, dec!(0));
    }

    #[test]
    fn signals_are_counted_independently_of_trades() {
        let tracker = PaperPositionTracker::new();
        tracker.register_signal(&signal("BTC", SignalType::Buy));
        tracker.register_signal(&signal("ETH", SignalType::Sell));

        let stats = tracker.stats();
        assert_eq!(stats.total_signals, 2);
        assert_eq!(stats.total_trades, 0);
    }
}
