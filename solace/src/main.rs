use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use solace::api::{create_router, AppState, COMPANION_SUPPORT_PATH};
use solace::breathing::{self, BreathingSession, BreathingTimer};
use solace::config::Config;
use solace::mood::{BlobSimulation, MoodKey, Vec2};

#[derive(Parser)]
#[command(name = "solace")]
#[command(about = "Companion support gateway and local wellness tools")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP gateway (default)
    Serve,
    /// Run a guided breathing exercise in the terminal
    Breathe {
        /// Pattern key: box, relaxing, calm or energizing
        #[arg(long, default_value = "relaxing")]
        pattern: String,
        /// Stop after this many full cycles (runs until Ctrl+C otherwise)
        #[arg(long)]
        cycles: Option<u64>,
    },
    /// Simulate the mood blob and write one frame as SVG
    Blob {
        #[arg(long, default_value = "neutral")]
        mood: MoodKey,
        /// Number of simulation steps
        #[arg(long, default_value_t = 120)]
        frames: u32,
        /// Press the pointer at `x,y` for the first half of the run
        #[arg(long)]
        poke: Option<Vec2>,
        #[arg(long)]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env();

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Breathe { pattern, cycles } => breathe(&config, &pattern, cycles).await,
        Command::Blob {
            mood,
            frames,
            poke,
            out,
        } => blob(&config, mood, frames, poke, out),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "solace=info,tower_http=debug".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Initializing LLM gateway: {}...", config.llm.model);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config)?;
    if !state.llm.is_configured() {
        tracing::warn!(
            "LLM_API_KEY is not set - support requests will fail until it is configured"
        );
    }
    let app = create_router(state);

    tracing::info!("Solace starting on http://{}", addr);
    tracing::info!("  Support:      http://{}{}", addr, COMPANION_SUPPORT_PATH);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn breathe(config: &Config, key: &str, cycles: Option<u64>) -> anyhow::Result<()> {
    let pattern = breathing::preset(key).ok_or_else(|| {
        let known: Vec<_> = breathing::presets().into_iter().map(|p| p.key).collect();
        anyhow::anyhow!("Unknown pattern '{}'. Known: {}", key, known.join(", "))
    })?;
    tracing::info!(
        pattern = %pattern.key,
        durations = ?pattern.durations(),
        "Starting {}",
        pattern.name
    );

    let timer = BreathingTimer::new(pattern).with_hold_scale(config.breathing.hold_scale);
    let mut session =
        BreathingSession::spawn(timer, Duration::from_millis(config.breathing.tick_millis));
    let mut cues = session.take_cues();
    let mut snapshots = session.subscribe();
    session.start()?;

    let stop = shutdown_signal();
    tokio::pin!(stop);

    loop {
        tokio::select! {
            _ = &mut stop => break,
            changed = snapshots.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = snapshots.borrow_and_update().clone();
                tracing::info!(
                    cycle = snapshot.cycles_completed + 1,
                    scale = %format_args!("{:.2}", snapshot.scale),
                    "{} {}",
                    snapshot.label,
                    snapshot.countdown
                );
                if cycles.is_some_and(|limit| snapshot.cycles_completed >= limit) {
                    tracing::info!(cycles = snapshot.cycles_completed, "Exercise complete");
                    break;
                }
            }
            Some(cue) = next_cue(&mut cues) => {
                tracing::debug!(frequency_hz = cue.frequency_hz, samples = cue.samples.len(), "Cue");
            }
        }
    }

    session.shutdown().await;
    Ok(())
}

async fn next_cue(
    cues: &mut Option<tokio::sync::mpsc::Receiver<solace::cues::Cue>>,
) -> Option<solace::cues::Cue> {
    match cues {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

fn blob(
    config: &Config,
    mood: MoodKey,
    frames: u32,
    poke: Option<Vec2>,
    out: PathBuf,
) -> anyhow::Result<()> {
    let mut simulation = BlobSimulation::new(mood);
    let frame_ms = config.mood.frame_millis as f64;

    if let Some(at) = poke {
        simulation.pointer_down(at);
    }
    for frame in 0..frames {
        if poke.is_some() && frame == frames / 2 {
            simulation.pointer_up();
        }
        simulation.step(f64::from(frame) * frame_ms);
    }

    simulation.frame().save_svg(&out)?;
    tracing::info!(
        mood = %mood,
        frames,
        max_speed = simulation.max_speed(),
        "Wrote {}",
        out.display()
    );
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
