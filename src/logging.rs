/// Logging module for diagnostics on stderr
use tracing::level_filters::LevelFilter;

/// `-v` count to the most detailed level shown.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

pub fn init(verbosity: u8) {
    let installed = tracing_subscriber::fmt()
        .with_max_level(level_for(verbosity))
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .try_init();
    if installed.is_err() {
        eprintln!("Warning: logging was already initialised");
    }
}
