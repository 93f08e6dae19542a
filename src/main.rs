use std::net::TcpStream;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use parking_lot::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use feeder_dashboard::data::History;
use feeder_dashboard::{
    subscribe, App, CommandSink, CommandToken, DataSource, FeederError, FileExportSink,
    FileSource, Organizer, RawSnapshot, Settings, StreamSource, WriterCommandSink,
};

/// Status file polled when no source is given.
const DEFAULT_STATUS_FILE: &str = "feeder_status.json";

/// How long one-shot modes wait for the first snapshot.
const FIRST_SNAPSHOT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Parser, Debug)]
#[command(name = "feeder-dashboard")]
#[command(about = "Headless dashboard for fish feeder telemetry")]
struct Args {
    /// Path to a JSON status file
    #[arg(short, long, conflicts_with = "connect")]
    file: Option<PathBuf>,

    /// Connect to a TCP endpoint streaming newline-delimited JSON (host:port)
    #[arg(short, long, conflicts_with = "file")]
    connect: Option<String>,

    /// Settings file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Poll interval (e.g., "500ms", "2s")
    #[arg(short, long)]
    refresh: Option<String>,

    /// Age after which a snapshot is stale (e.g., "60s", "5m")
    #[arg(long)]
    freshness: Option<String>,

    /// Print the organized views of the first snapshot as JSON and exit
    #[arg(long)]
    once: bool,

    /// Export the organized views of the first snapshot to a JSON file and exit
    #[arg(short, long, conflicts_with = "once")]
    export: Option<PathBuf>,

    /// Send a command token (e.g., "G:1", "B:SPD:127") and exit
    #[arg(long)]
    send: Option<String>,

    /// Send an actuator speed (0-255) and exit
    #[arg(long)]
    speed: Option<u8>,

    /// Command endpoint (host:port); defaults to the configured one
    #[arg(long)]
    command: Option<String>,

    /// Log filter used when RUST_LOG is unset (e.g., "info", "debug")
    #[arg(long)]
    log: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref())?;
    apply_overrides(&mut settings, &args);
    init_tracing(&settings.logging.level);

    if args.send.is_some() || args.speed.is_some() {
        return send_commands(&settings, &args);
    }

    let organizer = Organizer::new(settings.organizer_config()?);
    let refresh = settings.refresh_interval()?;
    let mut source = open_source(&settings).await?;

    if args.once || args.export.is_some() {
        let snapshot = first_snapshot(source.as_mut(), refresh).await?;
        let mut app = App::new(organizer);
        app.apply_snapshot(&snapshot);

        if let Some(path) = &args.export {
            let mut sink = FileExportSink::new(path);
            app.export_state(&mut sink)?;
            println!("Exported feeder state to: {}", sink.path().display());
        } else {
            let views = serde_json::json!({
                "sensors": app.sensors,
                "controls": app.controls,
            });
            println!("{}", serde_json::to_string_pretty(&views)?);
        }
        return Ok(());
    }

    watch(source, organizer, &settings, refresh).await
}

fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(file) = &args.file {
        settings.source.file = Some(file.display().to_string());
        settings.source.connect = None;
    }
    if let Some(addr) = &args.connect {
        settings.source.connect = Some(addr.clone());
        settings.source.file = None;
    }
    if let Some(addr) = &args.command {
        settings.source.command = Some(addr.clone());
    }
    if let Some(refresh) = &args.refresh {
        settings.source.refresh = refresh.clone();
    }
    if let Some(freshness) = &args.freshness {
        settings.organizer.freshness_window = freshness.clone();
    }
    if let Some(level) = &args.log {
        settings.logging.level = level.clone();
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn open_source(settings: &Settings) -> Result<Box<dyn DataSource>> {
    if let Some(addr) = &settings.source.connect {
        info!(addr = %addr, "connecting to telemetry stream");
        let stream = tokio::net::TcpStream::connect(addr)
            .await
            .map_err(|e| FeederError::Source(format!("{}: {}", addr, e)))?;
        return Ok(Box::new(StreamSource::spawn(stream, addr)));
    }

    let path = settings.source.file.as_deref().unwrap_or(DEFAULT_STATUS_FILE);
    Ok(Box::new(FileSource::new(path)))
}

async fn first_snapshot(source: &mut dyn DataSource, refresh: Duration) -> Result<RawSnapshot> {
    let poll = async {
        loop {
            if let Some(snapshot) = source.poll() {
                return snapshot;
            }
            tokio::time::sleep(refresh).await;
        }
    };
    let outcome = tokio::time::timeout(FIRST_SNAPSHOT_TIMEOUT, poll).await;
    match outcome {
        Ok(snapshot) => Ok(snapshot),
        Err(_) => match source.error() {
            Some(err) => bail!("No snapshot from {}: {}", source.description(), err),
            None => bail!(
                "No snapshot from {} within {:?}",
                source.description(),
                FIRST_SNAPSHOT_TIMEOUT
            ),
        },
    }
}

async fn watch(
    source: Box<dyn DataSource>,
    organizer: Organizer,
    settings: &Settings,
    refresh: Duration,
) -> Result<()> {
    let history = History::with_capacity(settings.display.history_size);
    let mut app = App::with_history(organizer, history);
    app.precision = settings.display.precision;
    let app = Arc::new(Mutex::new(app));

    let printer = app.clone();
    let mut subscription = subscribe(source, refresh, move |event| {
        let mut app = printer.lock();
        app.handle(event);
        println!("{}", app.summary_line());
    });

    tokio::signal::ctrl_c().await?;
    subscription.unsubscribe();

    let app = app.lock();
    info!(snapshots = app.snapshots_received, "stopped watching");
    Ok(())
}

fn send_commands(settings: &Settings, args: &Args) -> Result<()> {
    let endpoint = settings.source.command.as_ref().or(settings.source.connect.as_ref());
    let Some(addr) = endpoint else {
        bail!("No command endpoint: pass --command host:port or set source.command");
    };

    let stream = TcpStream::connect(addr.as_str())
        .with_context(|| format!("Failed to connect to {}", addr))?;
    let mut sink = WriterCommandSink::new(stream);

    if let Some(token) = &args.send {
        sink.send(&CommandToken::new(token.as_str()))?;
        println!("Sent {} to {}", token, addr);
    }
    if let Some(duty) = args.speed {
        sink.set_actuator_speed(duty)?;
        println!("Sent speed {} to {}", duty, addr);
    }
    if args.once || args.export.is_some() {
        warn!("--once/--export ignored when sending commands");
    }
    Ok(())
}

