use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tucano::{error::TucanoError, logging, Config};
use tucano_broker::{Reconciler, ReconcilerConfig, Supervisor};
use tucano_broker::client::bitflyer::BitflyerClient;
use tucano_integration::collection::ClearableLifoQueue;
use tucano_model::{Exchange, WarmUpItem};
use tucano_streams::source::realtime::RealtimeSource;
use tucano_streams::WarmUpQueue;
use tucano_strategy::{PositionSynthesizer, RandomStrategy, Strategy};

#[derive(Parser, Debug)]
#[command(name = "tucano", about = "bitFlyer declarative trading pipeline")]
struct Cli {
    /// Path to a TOML config file (see `tucano::Config`).
    #[arg(long, default_value = "tucano.toml")]
    config: PathBuf,

    /// Emit structured JSON logs instead of human-readable ones.
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<(), TucanoError> {
    let cli = Cli::parse();
    if cli.json_logs {
        logging::init_json_tracing();
    } else {
        logging::init_tracing();
    }

    let config = Config::load(&cli.config)?;
    tracing::info!(product_code = %config.product_code, "starting tucano");

    run(config).await
}

/// Wires the realtime feed through the warm-up queue (C5) into a strategy (C6), publishes its
/// verdicts as desired positions via a [`PositionSynthesizer`] (C7) onto the candidate queue
/// (C8), and hands that queue to the broker [`Supervisor`] (C9). Runs until `ctrl_c`.
async fn run(config: Config) -> Result<(), TucanoError> {
    let client = BitflyerClient::new(
        config.base_url.clone(),
        config.credentials.key.clone(),
        config.credentials.secret.clone(),
        config.product_code.product_code(),
        config.request_timeout(),
        config.retry(),
    )?;

    let reconciler = Reconciler::new(
        client,
        ReconcilerConfig {
            symbol: config.product_code,
            size_tick: config.size_tick,
            minute_to_expire: config.minute_to_expire,
            time_in_force: config.time_in_force.as_str(),
            settlement_delay: config.settlement_delay(),
            retry: config.retry(),
        },
    );

    let candidates = ClearableLifoQueue::new();
    let supervisor = Supervisor::spawn(reconciler, Arc::clone(&candidates));

    let mut source = RealtimeSource::connect(&config.websocket_url, config.product_code).await?;
    source.subscribe(&config.websocket_channel).await?;

    let warmup = Arc::new(WarmUpQueue::new(chrono::TimeDelta::seconds(config.warm_up_window_secs)));
    warmup.spawn("tucano").await;

    let feed_warmup = Arc::clone(&warmup);
    let feed = tokio::spawn(async move {
        loop {
            match source.next().await {
                Some(WarmUpItem::Execution(execution)) => feed_warmup.put(execution).await,
                Some(WarmUpItem::SwitchedToRealtime(_)) => {}
                None => break,
            }
        }
    });

    let mut strategy = RandomStrategy::new(config.product_code, chrono::TimeDelta::minutes(1));
    let mut synthesizer = PositionSynthesizer::new(config.product_code, config.order_size, Arc::clone(&candidates));

    tracing::info!(exchange = %Exchange::BitFlyer, "pipeline running, awaiting ctrl-c");

    loop {
        tokio::select! {
            item = warmup.get("tucano", chrono::Utc::now()) => {
                match item? {
                    WarmUpItem::Execution(execution) => {
                        let signal = strategy.on_execution(&execution);
                        synthesizer.synthesize(&signal).await?;
                    }
                    WarmUpItem::SwitchedToRealtime(marker) => {
                        tracing::info!(symbol = %marker.symbol, "switched to realtime feed");
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                break;
            }
        }
    }

    feed.abort();
    warmup.dispose("tucano").await;
    supervisor.shutdown().await;
    Ok(())
}
