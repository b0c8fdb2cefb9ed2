//! Headless solar movie viewer
//!
//! Loads the configured source catalog, optionally imports a rendered movie,
//! then animates the scene over the resulting time window.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use helios_core::events::events::MovieImportFailed;
use helios_core::{AnimationClock, EventBus, TimeSubscriber};
use helios_movie::{ImportServices, ImportSinks, MovieImporter};

mod config;
mod sinks;

use config::AppConfig;
use sinks::{DateRangeLog, SceneLog, SourceLog};

#[derive(Parser, Debug)]
#[command(name = "helios")]
#[command(about = "Animate a solar imagery scene, optionally matching a rendered movie")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(long, default_value = "helios.json")]
    config: PathBuf,

    /// Id of a movie to import
    #[arg(long)]
    movie: Option<String>,

    /// Page query string or URL; a `movie=<id>` parameter imports that movie
    #[arg(long)]
    query: Option<String>,

    /// Number of frames to play before exiting (0 = run until Ctrl-C)
    #[arg(long, default_value = "0")]
    ticks: u64,

    /// Override the configured delay between frames
    #[arg(long)]
    frame_delay_ms: Option<u64>,
}

/// Wakes the main task once a number of frames have been shown
struct FrameCounter {
    remaining: AtomicU64,
    done: Notify,
}

impl FrameCounter {
    fn new(frames: u64) -> Self {
        Self {
            remaining: AtomicU64::new(frames),
            done: Notify::new(),
        }
    }
}

impl TimeSubscriber for FrameCounter {
    fn on_time_changed(&self, _time: DateTime<Utc>) {
        let previous = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if previous == Ok(1) {
            self.done.notify_one();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "helios=info,helios_core=info,helios_movie=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config).context("loading configuration")?;

    let mut clock_settings = config.clock.clone();
    if let Some(delay) = cli.frame_delay_ms {
        clock_settings.frame_delay_ms = delay;
    }

    let clock = Arc::new(AnimationClock::with_settings(Handle::current(), &clock_settings));
    let scene = Arc::new(SceneLog);
    clock.add_subscriber(scene.clone());

    let event_bus = Arc::new(EventBus::new());
    let failures = Arc::new(AtomicU64::new(0));
    {
        let failures = failures.clone();
        event_bus.on(move |_: &MovieImportFailed| {
            failures.fetch_add(1, Ordering::SeqCst);
        });
    }

    let services = ImportServices {
        metadata: Arc::new(config.movie.metadata_service()),
        catalog: Arc::new(config.movie.catalog()),
        vocabulary: Arc::new(config.movie.vocabulary()),
        resolution: Arc::new(config.movie.resolution_selector()),
    };
    let sinks = ImportSinks {
        activation: Arc::new(SourceLog),
        date_range: Arc::new(DateRangeLog),
        animation: clock.clone(),
    };
    let importer = MovieImporter::new(services, sinks, clock.clone()).with_event_bus(event_bus);

    if let Some(query) = &cli.query {
        importer.submit_from_query(query).await;
    }
    if let Some(movie_id) = &cli.movie {
        importer.submit(movie_id).await;
    }
    if failures.load(Ordering::SeqCst) > 0 {
        warn!("continuing with the previous scene configuration");
    }

    let window = clock.time_window();
    info!(start = %window.start, end = %window.end, cadence_secs = clock.cadence(), "starting animation");

    let counter = Arc::new(FrameCounter::new(cli.ticks));
    clock.add_subscriber(counter.clone());
    clock.play();

    if cli.ticks == 0 {
        tokio::signal::ctrl_c().await.context("waiting for Ctrl-C")?;
    } else {
        tokio::select! {
            _ = counter.done.notified() => {}
            result = tokio::signal::ctrl_c() => result.context("waiting for Ctrl-C")?,
        }
    }

    clock.pause();
    info!(time = %clock.current_time(), "animation stopped");

    Ok(())
}
