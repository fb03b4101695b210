//! Scan command: fetch, classify, and generate signals.

use anyhow::Result;
use std::time::Duration;

use senti_bot_core::AppConfig;

use super::build_context;

/// Runs a scan once, or in a loop with the given interval in seconds.
pub async fn run(config: &AppConfig, interval: Option<u64>, demo: bool) -> Result<()> {
    let ctx = build_context(config, demo).await?;

    match interval {
        None => {
            report(&ctx.pipeline.run_scan().await?);
        }
        Some(secs) => {
            let mut ticker = tokio::time::interval(Duration::from_secs(secs));
            loop {
                ticker.tick().await;
                match ctx.pipeline.run_scan().await {
                    Ok(scan) => report(&scan),
                    Err(e) => tracing::error!(error = %e, "scan failed, will retry"),
                }
            }
        }
    }

    Ok(())
}

fn report(scan: &senti_bot_signals::ScanReport) {
    println!(
        "Scanned {} posts ({} classified, {} new), generated {} signals ({} stored)",
        scan.posts_fetched,
        scan.posts_classified,
        scan.posts_stored,
        scan.signals_generated,
        scan.signals_stored
    );
    for signal in &scan.signals {
        println!(
            "  {} {}  confidence {:.1}%  sentiment {:.2}  ({} posts)",
            signal.asset,
            signal.signal_type.as_str(),
            signal.confidence_score * 100.0,
            signal.sentiment_score,
            signal.post_count
        );
        println!("    {}", signal.reasoning);
    }
}
