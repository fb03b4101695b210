//! Listing and stats commands.

use anyhow::Result;

use senti_bot_core::AppConfig;

use super::build_context;

/// Prints recent signals.
pub async fn signals(config: &AppConfig, limit: i64) -> Result<()> {
    let ctx = build_context(config, true).await?;
    let signals = ctx.signals.recent(limit).await?;

    if signals.is_empty() {
        println!("No signals stored yet. Run 'senti-bot scan' first.");
        return Ok(());
    }

    for signal in signals {
        println!(
            "#{:<5} {}  {:<4} {}  confidence {:.1}%  sentiment {:.2}  ({} posts)",
            signal.id,
            signal.generated_at.format("%Y-%m-%d %H:%M"),
            signal.signal_type,
            signal.asset,
            signal.confidence_score * 100.0,
            signal.sentiment_score,
            signal.post_count
        );
    }
    Ok(())
}

/// Prints recent paper trades.
pub async fn trades(config: &AppConfig, limit: i64) -> Result<()> {
    let ctx = build_context(config, true).await?;
    let trades = ctx.trades.recent(limit).await?;

    if trades.is_empty() {
        println!("No paper trades yet. Run 'senti-bot open-trade' against a signal.");
        return Ok(());
    }

    for trade in trades {
        let pnl = trade
            .pnl
            .map_or_else(|| "-".to_string(), |p| format!("{p:.2}"));
        println!(
            "#{:<5} {:<4} {}  entry {}  size {}  status {:<6}  pnl {}",
            trade.id,
            trade.trade_type,
            trade.asset,
            trade.entry_price,
            trade.position_size,
            trade.status,
            pnl
        );
    }
    Ok(())
}

/// Prints recently analyzed posts.
pub async fn posts(config: &AppConfig, limit: i64) -> Result<()> {
    let ctx = build_context(config, true).await?;
    let posts = ctx.posts.recent(limit).await?;

    if posts.is_empty() {
        println!("No analyzed posts yet. Run 'senti-bot scan' first.");
        return Ok(());
    }

    for post in posts {
        println!(
            "[{}] r/{} {:<8} {:.2}  {}",
            post.analyzed_at.format("%Y-%m-%d %H:%M"),
            post.source_channel,
            post.sentiment,
            post.sentiment_score,
            post.title
        );
        if !post.mentioned_assets.is_empty() {
            println!("    assets: {}", post.mentioned_assets.join(", "));
        }
    }
    Ok(())
}

/// Prints aggregate performance statistics.
pub async fn stats(config: &AppConfig) -> Result<()> {
    let ctx = build_context(config, true).await?;
    let stats = ctx.trades.performance_stats().await?;
    let posts_24h = ctx.posts.analyzed_last_24h().await?;

    println!("Performance");
    println!("  Total signals:   {}", stats.total_signals);
    println!("  Total trades:    {}", stats.total_trades);
    println!("  Open trades:     {}", stats.open_trades);
    println!("  Closed trades:   {}", stats.closed_trades);
    println!("  Total PnL:       {:.2}", stats.total_pnl);
    println!("  Avg PnL:         {:.2}", stats.avg_pnl);
    println!("  Winning trades:  {}", stats.winning_trades);
    println!("  Win rate:        {:.1}%", stats.win_rate);
    println!("  Posts (24h):     {posts_24h}");
    Ok(())
}
