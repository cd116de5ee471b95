//! Logging Infrastructure
//!
//! Structured logging for the console, with optional daily-rolling file
//! output. Libraries only emit; this is the single init point.

/// Initialize the logger
///
/// When `log_dir` is set, output goes to a daily-rolling file in that
/// directory instead of stdout.
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level.parse().unwrap_or(tracing::Level::INFO))
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir).ok();
        let file_appender = tracing_appender::rolling::daily(dir, "heron-console");
        subscriber.with_ansi(false).with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}
