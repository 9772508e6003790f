use crate::config::LoggingConfig;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with stdout output and optional rolling file output
///
/// The returned guard flushes the file writer on drop; keep it alive for
/// the lifetime of the process.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    // Default to info level for all modules; can be overridden via RUST_LOG env var
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer());

    if !config.enabled {
        subscriber.init();
        return None;
    }

    use tracing_appender::rolling;

    if let Err(e) = fs::create_dir_all(&config.directory) {
        eprintln!("Failed to create log directory {}: {}", config.directory, e);
    }

    prune_log_files(config);

    let file_appender = match config.rotation.as_str() {
        "hourly" => rolling::hourly(&config.directory, &config.file_prefix),
        "never" => rolling::never(&config.directory, &config.file_prefix),
        _ => rolling::daily(&config.directory, &config.file_prefix), // default to daily
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    subscriber
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        ) // Disable ANSI colors in file output
        .init();

    Some(guard)
}

/// Whether `name` is a file written by the rolling appender for `prefix`
///
/// Rotated files are named `{prefix}.{date}`; with rotation "never" the file
/// is the bare prefix.
fn is_dispatch_log(name: &str, prefix: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Apply the retention policy to the log directory, returning how many files were removed
///
/// Runs before the subscriber is installed, so progress goes to stderr.
pub fn prune_log_files(config: &LoggingConfig) -> usize {
    if config.max_files == 0 && config.max_age_days == 0 {
        return 0;
    }

    let entries = match fs::read_dir(&config.directory) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return 0,
        Err(e) => {
            eprintln!("Failed to read log directory {}: {}", config.directory, e);
            return 0;
        }
    };

    let mut logs: Vec<(PathBuf, SystemTime)> = entries
        .filter_map(Result::ok)
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| is_dispatch_log(name, &config.file_prefix))
        })
        .filter_map(|entry| {
            let metadata = entry.metadata().ok().filter(|m| m.is_file())?;
            Some((entry.path(), metadata.modified().ok()?))
        })
        .collect();

    // newest first, so the index is the file's rank under max_files
    logs.sort_by(|a, b| b.1.cmp(&a.1));

    let max_age = Duration::from_secs(u64::from(config.max_age_days) * 24 * 60 * 60);
    let now = SystemTime::now();

    let mut removed = 0;
    for (rank, (path, modified)) in logs.iter().enumerate() {
        let over_count = config.max_files > 0 && rank >= config.max_files as usize;
        let over_age = config.max_age_days > 0
            && now.duration_since(*modified).is_ok_and(|age| age > max_age);
        if !(over_count || over_age) {
            continue;
        }

        match fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) => eprintln!("Failed to delete log file {}: {}", path.display(), e),
        }
    }

    if removed > 0 {
        eprintln!("Removed {} expired log file(s) from {}", removed, config.directory);
    }
    removed
}
