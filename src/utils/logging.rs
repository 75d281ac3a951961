use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::config::LoggingConfig;
use crate::utils::app_paths::AppPaths;

const FALLBACK_LEVEL: &str = "warn";

/// Targets raised to debug by `-v`, whatever the base filter says
const VERBOSE_TARGETS: [&str; 2] = ["airport_api", "airport_lookup"];

/// Filter used when RUST_LOG is not set. `-v` wins over the configured level.
pub fn default_directive(configured: &str, verbose: bool) -> String {
    if verbose {
        return "debug".to_string();
    }
    let configured = configured.trim();
    if configured.is_empty() || EnvFilter::try_new(configured).is_err() {
        FALLBACK_LEVEL.to_string()
    } else {
        configured.to_string()
    }
}

/// `env_directives` is the RUST_LOG value, which replaces the configured
/// level when it parses. `-v` is applied on top of either.
pub fn build_filter(env_directives: Option<&str>, configured: &str, verbose: bool) -> EnvFilter {
    let mut filter = env_directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(configured, verbose)));

    if verbose {
        for target in VERBOSE_TARGETS {
            if let Ok(directive) = format!("{}=debug", target).parse() {
                filter = filter.add_directive(directive);
            }
        }
    }
    filter
}

pub fn log_file_name(now: DateTime<Local>) -> String {
    format!("airport-lookup_{}.log", now.format("%Y%m%d_%H%M%S"))
}

/// Create a timestamped log file in `dir` and point `latest.log` at it.
pub fn open_log_file(dir: &Path) -> Result<(File, PathBuf)> {
    std::fs::create_dir_all(dir)?;
    let log_path = dir.join(log_file_name(Local::now()));

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let latest_path = dir.join("latest.log");

    #[cfg(unix)]
    {
        let _ = std::fs::remove_file(&latest_path);
        let _ = std::os::unix::fs::symlink(&log_path, &latest_path);
    }

    #[cfg(windows)]
    {
        // No symlink without elevated rights, leave a pointer instead
        let _ = std::fs::write(
            &latest_path,
            format!("Current log file: {}\n", log_path.display()),
        );
    }

    Ok((file, log_path))
}

/// Install the global subscriber: compact output on stderr, and a plain copy
/// in a log file when the config asks for one. Returns the file's path.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> Result<Option<PathBuf>> {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(env_directives.as_deref(), &config.level, verbose);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    let (file_layer, log_path) = if config.log_to_file {
        let (file, path) = open_log_file(&AppPaths::log_dir()?)?;
        let layer = fmt::layer()
            .with_writer(Mutex::new(file))
            .with_target(true)
            .with_ansi(false)
            .compact();
        (Some(layer), Some(path))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(target: "airport_lookup", "Logging initialized");
    Ok(log_path)
}
