//! Diagnostic logging to stderr.
//!
//! Level priority: `RUST_LOG`, then `-q`/`-v` on the command line, then
//! `[logging] level` in the config file, then `warn`.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Pick the filter directive for the given CLI flags and config level
pub fn level_directive(verbose: u8, quiet: bool, config_level: Option<&str>) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => config_level.unwrap_or(DEFAULT_LOG_LEVEL).to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber; later calls are ignored.
pub fn init(verbose: u8, quiet: bool, config_level: Option<&str>) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level_directive(verbose, quiet, config_level))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .try_init();

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Logging initialised");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_priority() {
        assert_eq!(level_directive(0, false, None), "warn");
        assert_eq!(level_directive(0, false, Some("info")), "info");
        assert_eq!(level_directive(1, false, Some("info")), "debug");
        assert_eq!(level_directive(3, false, None), "trace");
        assert_eq!(level_directive(2, true, None), "error");
    }
}
