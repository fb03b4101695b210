//! Paper position and performance types.
//!
//! A paper position is a simulated trade opened from a signal. The lifecycle
//! is a single terminal transition, open -> closed; PnL is realized exactly
//! once at close.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::signal::SignalType;

/// Lifecycle state of a paper position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    /// Position is open; no realized PnL yet.
    Open,
    /// Position is closed. Terminal state.
    Closed,
}

impl PositionStatus {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Parses from string representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "open" => Some(Self::Open),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }
}

/// A simulated trade tied to a signal.
///
/// `trade_type == Sell` is a short position: PnL is positive when the price
/// falls between entry and exit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperPosition {
    /// Tracker- or database-assigned position id.
    pub id: i64,
    /// Id of the signal that spawned the position. Weak reference: the
    /// signal may have been purged.
    pub signal_id: i64,
    /// Asset ticker (uppercase).
    pub asset: String,
    /// BUY (long) or SELL (short).
    pub trade_type: SignalType,
    /// Entry price, strictly positive.
    pub entry_price: Decimal,
    /// Exit price, set on close.
    pub exit_price: Option<Decimal>,
    /// Dollar notional, strictly positive.
    pub position_size: Decimal,
    /// Realized profit/loss, set exactly once on close.
    pub pnl: Option<Decimal>,
    /// Lifecycle state.
    pub status: PositionStatus,
    /// When the position was opened.
    pub opened_at: DateTime<Utc>,
    /// When the position was closed.
    pub closed_at: Option<DateTime<Utc>>,
}

impl PaperPosition {
    /// Realized PnL for this position's side at the given exit price.
    ///
    /// BUY: `(exit - entry) / entry * size`. SELL (short-sale semantics):
    /// `(entry - exit) / entry * size`. Precondition: `entry_price != 0`,
    /// guaranteed by open-time validation.
    #[must_use]
    pub fn realized_pnl(&self, exit_price: Decimal) -> Decimal {
        match self.trade_type {
            SignalType::Buy => {
                (exit_price - self.entry_price) / self.entry_price * self.position_size
            }
            SignalType::Sell => {
                (self.entry_price - exit_price) / self.entry_price * self.position_size
            }
        }
    }
}

/// Aggregate paper trading performance, computable from the position set
/// alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Signals generated.
    pub total_signals: i64,
    /// Positions ever opened.
    pub total_trades: i64,
    /// Currently open positions.
    pub open_trades: i64,
    /// Closed positions.
    pub closed_trades: i64,
    /// Sum of realized PnL across closed positions.
    pub total_pnl: Decimal,
    /// Mean realized PnL per closed position (zero when none closed).
    pub avg_pnl: Decimal,
    /// Closed positions with strictly positive PnL.
    pub winning_trades: i64,
    /// `winning_trades / closed_trades * 100`, zero when none closed.
    pub win_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn position(trade_type: SignalType) -> PaperPosition {
        PaperPosition {
            id: 1,
            signal_id: 1,
            asset: "BTC".to_string(),
            trade_type,
            entry_price: dec!(100),
            exit_price: None,
            position_size: dec!(1000),
            pnl: None,
            status: PositionStatus::Open,
            opened_at: Utc::now(),
            closed_at: None,
        }
    }

    #[test]
    fn buy_pnl_profits_when_price_rises() {
        let pos = position(SignalType::Buy);
        assert_eq!(pos.realized_pnl(dec!(110)), dec!(100));
    }

    #[test]
    fn sell_pnl_loses_when_price_rises() {
        let pos = position(SignalType::Sell);
        assert_eq!(pos.realized_pnl(dec!(110)), dec!(-100));
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!(PositionStatus::parse("OPEN"), Some(PositionStatus::Open));
        assert_eq!(PositionStatus::parse("closed"), Some(PositionStatus::Closed));
        assert_eq!(PositionStatus::parse("settled"), None);
    }
}
