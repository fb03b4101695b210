//! Paper trade commands.

use anyhow::{anyhow, Result};
use rust_decimal::Decimal;

use senti_bot_core::{size_position, AppConfig, SignalType};

use super::build_context;

/// Opens a paper trade against a stored signal, sized by its confidence.
pub async fn open(config: &AppConfig, signal_id: i64, entry_price: Decimal) -> Result<()> {
    let ctx = build_context(config, true).await?;

    let signal = ctx
        .signals
        .get_by_id(signal_id)
        .await?
        .ok_or_else(|| anyhow!("signal {signal_id} not found"))?;
    let trade_type = SignalType::parse(&signal.signal_type)
        .ok_or_else(|| anyhow!("signal {signal_id} has unknown type {:?}", signal.signal_type))?;

    let position_size = size_position(signal.confidence_score, &config.sizing)?;
    let trade_id = ctx
        .trades
        .open(signal.id, &signal.asset, trade_type, entry_price, position_size)
        .await?;

    println!(
        "Opened trade #{trade_id}: {} {} at {} for {}",
        trade_type.as_str(),
        signal.asset,
        entry_price,
        position_size
    );
    Ok(())
}

/// Closes an open paper trade and prints the realized PnL.
pub async fn close(config: &AppConfig, trade_id: i64, exit_price: Decimal) -> Result<()> {
    let ctx = build_context(config, true).await?;

    let trade = ctx.trades.close(trade_id, exit_price).await?;
    let pnl = trade.pnl.unwrap_or_default();

    println!(
        "Closed trade #{}: {} {} at {}  pnl {:.2}",
        trade.id, trade.trade_type, trade.asset, exit_price, pnl
    );
    Ok(())
}
