use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber. `verbose` selects `debug` and lets `RUST_LOG`
/// override the level; otherwise the level is pinned to `info`.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::new("info")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
