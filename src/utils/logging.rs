// src/utils/logging.rs
use tracing_subscriber::{fmt, EnvFilter};

// Our own events at info, dependencies (html5ever, reqwest, hyper) only when they warn
const DEFAULT_DIRECTIVES: &str = "record_harvest=info,warn";

/// Filter from `RUST_LOG`, or `DEFAULT_DIRECTIVES` when it is unset or unparsable.
pub fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global subscriber. Safe to call more than once; later calls
/// leave the first subscriber in place.
pub fn setup_logging() {
    let installed = fmt()
        .with_env_filter(default_filter())
        .with_target(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logging setup complete.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_twice_does_not_panic() {
        setup_logging();
        setup_logging();
    }

    #[test]
    fn test_default_filter_builds() {
        let filter = default_filter();
        assert!(!filter.to_string().is_empty());
    }
}
