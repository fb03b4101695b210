//! Confidence-scaled position sizing.
//!
//! Maps a signal's confidence into a recommended dollar allocation. The
//! confidence baseline is explicit configuration rather than a literal, so
//! it can track the classifier's minimum-confidence setting; scaling is
//! clamped either way, so a diverging baseline can never produce a negative
//! allocation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Position sizing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizingConfig {
    /// Total account balance in dollars.
    pub account_balance: Decimal,
    /// Maximum fraction of the account per position, in (0, 1].
    pub max_position_pct: f64,
    /// Confidence at which scaling bottoms out. Confidence at or below this
    /// gets 50% of the base allocation; confidence of 1.0 gets 100%.
    pub confidence_baseline: f64,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            account_balance: Decimal::from(10_000),
            max_position_pct: 0.1,
            confidence_baseline: 0.6,
        }
    }
}

/// Calculates the dollar allocation for a signal with the given confidence.
///
/// `base = account_balance * max_position_pct`; confidence is normalized
/// against the baseline, clamped to [0, 1], and the result is
/// `base * (0.5 + 0.5 * scaled)` rounded to cents.
///
/// # Errors
/// Returns `CoreError::Validation` if the account balance is not positive,
/// `max_position_pct` is outside (0, 1], or the baseline is outside [0, 1).
pub fn size_position(confidence: f64, config: &SizingConfig) -> Result<Decimal, CoreError> {
    if config.account_balance <= Decimal::ZERO {
        return Err(CoreError::Validation(format!(
            "account balance must be positive, got {}",
            config.account_balance
        )));
    }
    if config.max_position_pct <= 0.0 || config.max_position_pct > 1.0 {
        return Err(CoreError::Validation(format!(
            "max position pct must be in (0, 1], got {}",
            config.max_position_pct
        )));
    }
    if !(0.0..1.0).contains(&config.confidence_baseline) {
        return Err(CoreError::Validation(format!(
            "confidence baseline must be in [0, 1), got {}",
            config.confidence_baseline
        )));
    }

    let scaled =
        ((confidence - config.confidence_baseline) / (1.0 - config.confidence_baseline))
            .clamp(0.0, 1.0);
    let multiplier = 0.5 + 0.5 * scaled;

    let max_pct = Decimal::try_from(config.max_position_pct)
        .map_err(|e| CoreError::Validation(format!("max position pct not representable: {e}")))?;
    let multiplier = Decimal::try_from(multiplier)
        .map_err(|e| CoreError::Validation(format!("multiplier not representable: {e}")))?;

    let base = config.account_balance * max_pct;
    Ok((base * multiplier).round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config() -> SizingConfig {
        SizingConfig {
            account_balance: dec!(10000),
            max_position_pct: 0.1,
            confidence_baseline: 0.6,
        }
    }

    #[test]
    fn full_confidence_gets_full_base() {
        assert_eq!(size_position(1.0, &config()).unwrap(), dec!(1000.00));
    }

    #[test]
    fn baseline_confidence_gets_half_base() {
        assert_eq!(size_position(0.6, &config()).unwrap(), dec!(500.00));
    }

    #[test]
    fn midpoint_confidence_scales_linearly() {
        // (0.8 - 0.6) / 0.4 = 0.5 -> base * 0.75
        assert_eq!(size_position(0.8, &config()).unwrap(), dec!(750.00));
    }

    #[test]
    fn confidence_below_baseline_clamps_to_half_base() {
        assert_eq!(size_position(0.3, &config()).unwrap(), dec!(500.00));
    }

    #[test]
    fn diverged_baseline_never_goes_negative() {
        let cfg = SizingConfig {
            confidence_baseline: 0.8,
            ..config()
        };
        // Confidence below the raised baseline still floors at half base.
        assert_eq!(size_position(0.65, &cfg).unwrap(), dec!(500.00));
    }

    #[test]
    fn rejects_non_positive_balance() {
        let cfg = SizingConfig {
            account_balance: Decimal::ZERO,
            ..config()
        };
        assert!(size_position(0.9, &cfg).is_err());
    }

    #[test]
    fn rejects_out_of_range_position_pct() {
        let cfg = SizingConfig {
            max_position_pct: 1.5,
            ..config()
        };
        assert!(size_position(0.9, &cfg).is_err());
    }
}
