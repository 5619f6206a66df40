//! Fill the calendar with random events for local testing.
//!
//! Events go through [`EventService::create`], so overlapping or invalid
//! candidates are rejected exactly as over HTTP and simply skipped.

use anyhow::Context;
use chrono::{Days, NaiveDate, NaiveTime, TimeDelta};
use clap::Parser;
use rand::seq::IndexedRandom;
use rand::Rng;

use calendar_api::config::{AppMode, DatabaseConfig};
use calendar_api::error::AppError;
use calendar_api::service::EventService;
use calendar_api::telemetry::init_tracing;
use calendar_core::error::CoreError;
use calendar_core::event::EventInput;

const WORDS: &[&str] = &[
    "annual", "board", "budget", "client", "coffee", "design", "dinner", "early", "field",
    "final", "garden", "global", "hiring", "kickoff", "launch", "lunch", "market", "night",
    "office", "planning", "product", "quarterly", "review", "river", "sales", "sprint",
    "strategy", "summit", "team", "training", "weekly", "workshop",
];

#[derive(Parser)]
#[command(name = "seed-events")]
#[command(about = "Insert random non-overlapping events into the calendar database")]
struct Cli {
    /// Number of candidate events to generate
    #[arg(long, short, default_value = "1000")]
    count: u32,

    /// Earliest event date (inclusive)
    #[arg(long, default_value = "2010-01-01")]
    from: NaiveDate,

    /// Latest event date (inclusive)
    #[arg(long, default_value = "2040-12-31")]
    to: NaiveDate,

    /// Log level profile
    #[arg(long, env = "APP_MODE", default_value = "debug", value_parser = ["debug", "release"])]
    mode: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    anyhow::ensure!(cli.from <= cli.to, "--from must not be after --to");

    init_tracing(cli.mode.parse().unwrap_or(AppMode::Debug));

    let db_config = DatabaseConfig::from_env().context("Invalid database configuration")?;
    let pool = calendar_db::create_pool(db_config.connect_options, db_config.max_connections)
        .await
        .context("Failed to connect to database")?;
    calendar_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let service = EventService::new(pool.clone());
    let (mut created, mut skipped) = (0u32, 0u32);

    for _ in 0..cli.count {
        let input = random_event(&mut rand::rng(), cli.from, cli.to);
        match service.create(input).await {
            Ok(_) => created += 1,
            Err(AppError::Core(CoreError::Event(reason))) => {
                tracing::debug!(%reason, "Skipped candidate event");
                skipped += 1;
            }
            Err(err) => return Err(err).context("Failed to store event"),
        }
    }

    tracing::info!(created, skipped, "Seeding finished");
    pool.close().await;
    Ok(())
}

/// A candidate event: 2-4 random words plus a number, starting between 01:00
/// and 20:55 and lasting 40-300 minutes, cut off at the end of the day.
fn random_event(rng: &mut impl Rng, from: NaiveDate, to: NaiveDate) -> EventInput {
    let mut title = Vec::new();
    for _ in 0..rng.random_range(2..=4) {
        if let Some(word) = WORDS.choose(rng) {
            title.push(word.to_string());
        }
    }
    title.push(rng.random_range(1..=999).to_string());

    let span = (to - from).num_days().unsigned_abs();
    let event_date = from + Days::new(rng.random_range(0..=span));

    let start = NaiveTime::from_hms_opt(rng.random_range(1..=20), rng.random_range(0..=55), 0)
        .unwrap_or(NaiveTime::MIN);
    let (end, wrapped) =
        start.overflowing_add_signed(TimeDelta::minutes(rng.random_range(40..=300)));
    let end = if wrapped != 0 {
        NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(end)
    } else {
        end
    };

    EventInput {
        title: Some(title.join(" ")),
        event_date: Some(event_date.format("%Y-%m-%d").to_string()),
        start_time: Some(start.format("%H:%M:%S+00").to_string()),
        end_time: Some(end.format("%H:%M:%S+00").to_string()),
    }
}
