use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "senti-bot")]
#[command(about = "Reddit sentiment signal generator with paper trading", long_about = None)]
struct Cli {
    /// Config file profile (e.g. "dev" loads config/Config.dev.toml)
    #[arg(long, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan channels, classify posts, and generate signals
    Scan {
        /// Repeat the scan every N seconds instead of running once
        #[arg(long)]
        interval: Option<u64>,
        /// Use canned posts and the keyword analyzer (no network, no API key)
        #[arg(long)]
        demo: bool,
    },
    /// Start the web API server
    Serve {
        /// Server address, overrides config
        #[arg(short, long)]
        addr: Option<String>,
    },
    /// List recent trading signals
    Signals {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// List recent paper trades
    Trades {
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// List recently analyzed posts
    Posts {
        #[arg(long, default_value_t = 50)]
        limit: i64,
    },
    /// Show aggregate paper trading performance
    Stats,
    /// Open a paper trade from a stored signal
    OpenTrade {
        /// Signal id to trade against
        #[arg(long)]
        signal_id: i64,
        /// Entry price for the asset
        #[arg(long)]
        entry_price: Decimal,
    },
    /// Close an open paper trade
    CloseTrade {
        /// Trade id to close
        #[arg(long)]
        trade_id: i64,
        /// Exit price for the asset
        #[arg(long)]
        exit_price: Decimal,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = commands::load_config(cli.profile.as_deref())?;

    match cli.command {
        Commands::Scan { interval, demo } => {
            commands::scan::run(&config, interval, demo).await?;
        }
        Commands::Serve { addr } => {
            commands::serve::run(&config, addr).await?;
        }
        Commands::Signals { limit } => {
            commands::report::signals(&config, limit).await?;
        }
        Commands::Trades { limit } => {
            commands::report::trades(&config, limit).await?;
        }
        Commands::Posts { limit } => {
            commands::report::posts(&config, limit).await?;
        }
        Commands::Stats => {
            commands::report::stats(&config).await?;
        }
        Commands::OpenTrade {
            signal_id,
            entry_price,
        } => {
            commands::trade::open(&config, signal_id, entry_price).await?;
        }
        Commands::CloseTrade {
            trade_id,
            exit_price,
        } => {
            commands::trade::close(&config, trade_id, exit_price).await?;
        }
    }

    Ok(())
}
