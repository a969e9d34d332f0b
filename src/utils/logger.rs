use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable that turns on the debug log file
pub const DEBUG_ENV: &str = "MKVBULK_DEBUG";

/// Directory holding the debug log
pub fn log_dir() -> std::path::PathBuf {
    dirs::data_dir()
        .or_else(|| std::env::var_os("HOME").map(|h| std::path::PathBuf::from(h).join(".local/share")))
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("mkvbulk")
}

/// Initialize logging based on MKVBULK_DEBUG environment variable.
///
/// With the variable set, everything down to DEBUG goes to a daily log file
/// and the returned guard must be kept alive until exit. Otherwise warnings
/// go to stderr, adjustable with `RUST_LOG`.
pub fn init_logging() -> Option<WorkerGuard> {
    if std::env::var(DEBUG_ENV).is_ok() {
        let log_dir = log_dir();
        let _ = std::fs::create_dir_all(&log_dir);

        let file_appender = tracing_appender::rolling::daily(&log_dir, "mkvbulk.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        tracing_subscriber::fmt()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .init();

        tracing::info!("mkvbulk logging initialized");
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .init();
        None
    }
}
