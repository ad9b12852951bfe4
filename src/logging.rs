use tracing_subscriber::EnvFilter;

/// Install the global stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` (from `[log] level`)
/// is used, falling back to `warn` if it does not parse. Calling this more than
/// once is harmless: later calls leave the first subscriber in place.
pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Whether the TUI should log at all. Writing to stderr underneath the
/// alternate screen garbles the display, so the TUI only logs on request.
pub fn tui_logging_requested() -> bool {
    std::env::var_os("RUST_LOG").is_some()
}
