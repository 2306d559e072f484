use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use tg_hwbot::config::Config;
use tg_hwbot::practicum::PracticumClient;
use tg_hwbot::telegram::{self, TelegramNotifier};
use tg_hwbot::watcher::{self, PollState, RETRY_PERIOD};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the append-mode log file
    #[arg(long, default_value = "program.log")]
    log_file: PathBuf,

    /// Seconds to sleep between poll cycles
    #[arg(long, default_value_t = RETRY_PERIOD.as_secs())]
    interval_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&args.log_file)?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Arc::new(log_file)),
        )
        .init();

    // Fail fast, before any network activity.
    let cfg = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    let api = PracticumClient::new(cfg.practicum_token.clone());
    let notifier = TelegramNotifier::new(&cfg.telegram_token, cfg.chat_id);

    let started_at = chrono::Local::now().format("%d.%m.%Y %H:%M");
    telegram::send_best_effort(&notifier, &format!("Бот запущен! {started_at}")).await;

    // Cursor is computed once; every poll re-requests the same window.
    let from_date = chrono::Utc::now().timestamp();
    let mut state = PollState::default();

    info!(interval_secs = args.interval_secs, "starting homework status watcher");
    watcher::run(
        &api,
        &notifier,
        &mut state,
        from_date,
        Duration::from_secs(args.interval_secs),
    )
    .await;

    Ok(())
}
