use crate::{
    backend::{Backend, HttpBackend},
    config::Config,
    render,
    session::{Session, SessionState},
    util::ensure_dir,
};
use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{error, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[derive(Parser, Debug)]
#[command(name = "qr-check")]
#[command(about = "QR payload verdict client (payload prediction + image scan)")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./qr-check.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit results as JSON instead of result cards.
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Probe the scoring service's health endpoint.
    Doctor {},
    /// Score a decoded QR payload string.
    Predict {
        #[arg(long)]
        payload: String,
    },
    /// Upload a QR image and score every code found in it.
    Scan {
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

pub async fn dispatch(args: Args) -> Result<()> {
    let cfg_path = resolve_config_path(args.config.as_deref())?;
    let mut cfg = Config::load(&cfg_path)?;
    if args.json {
        cfg.output.format = "json".into();
    }
    let _guard = init_logging(&args, &cfg)?;

    match &args.cmd {
        Command::Doctor {} => doctor(&cfg).await,
        Command::Predict { payload } => predict(&cfg, payload).await,
        Command::Scan { image } => scan(&cfg, image.as_deref()).await,
    }
}

/// Surface a top-level failure exactly once: through tracing when a
/// subscriber is installed, else straight to stderr (dispatch can fail
/// before logging is initialized, e.g. on an unreadable config path).
pub fn report_failure(err: &anyhow::Error) {
    if tracing::dispatcher::has_been_set() {
        error!("{:#}", err);
    } else {
        eprintln!("error: {err:#}");
    }
}

fn resolve_config_path(user: Option<&Path>) -> Result<PathBuf> {
    if let Some(p) = user {
        return Ok(p.to_path_buf());
    }
    let default = PathBuf::from("qr-check.toml");
    if default.exists() {
        Ok(default)
    } else {
        Ok(PathBuf::from("qr-check.example.toml"))
    }
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = resolve_log_path(cfg) {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(&path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }
    if cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from("qr-check.log"));
    }
    Some(PathBuf::from(&cfg.logging.file_path))
}

async fn doctor(cfg: &Config) -> Result<()> {
    let backend = HttpBackend::new(cfg)?;
    let diag = backend.health().await?;
    println!("{}", serde_json::to_string_pretty(&diag)?);
    Ok(())
}

async fn predict(cfg: &Config, payload: &str) -> Result<()> {
    let backend = HttpBackend::new(cfg)?;
    let mut session = Session::new(cfg, backend);
    session.submit_payload(payload).await;
    finish(cfg, &session)
}

async fn scan(cfg: &Config, image: Option<&Path>) -> Result<()> {
    if let Some(path) = image {
        check_image_extension(path);
    }
    let backend = HttpBackend::new(cfg)?;
    let mut session = Session::new(cfg, backend);
    session.submit_image(image).await;
    finish(cfg, &session)
}

/// A failed session surfaces exactly one error message, at the main boundary.
fn finish<B: Backend>(cfg: &Config, session: &Session<B>) -> Result<()> {
    match session.state() {
        SessionState::Failed(message) => Err(anyhow!("{message}")),
        state => render::emit(cfg, state),
    }
}

fn check_image_extension(path: &Path) {
    match path.extension().and_then(|s| s.to_str()) {
        Some(ext) if IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()) => {}
        Some(ext) => warn!("unrecognized image extension .{ext}: {}", path.display()),
        None => warn!("image has no extension: {}", path.display()),
    }
}
