//! Logging initialization.
//!
//! Logs go to stderr so command output on stdout stays machine readable.

use tracing_subscriber::EnvFilter;

/// Filter used with `--verbose`.
const VERBOSE_FILTER: &str = "mesops=debug,mesops_client=debug";

/// Filter used when neither `--verbose` nor `RUST_LOG` is set.
const DEFAULT_FILTER: &str = "mesops=info";

/// Builds the filter directive string for the given verbosity.
///
/// `--verbose` wins over `RUST_LOG`.
pub fn filter_directives(verbose: bool, rust_log: Option<String>) -> String {
    if verbose {
        return VERBOSE_FILTER.to_string();
    }
    rust_log
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Initialize logging based on verbosity.
pub fn init_logging(verbose: bool) {
    let directives = filter_directives(verbose, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Warning: Invalid log filter {directives:?}: {e}");
        EnvFilter::new(DEFAULT_FILTER)
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_rust_log() {
        assert_eq!(
            filter_directives(true, Some("warn".to_string())),
            "mesops=debug,mesops_client=debug"
        );
    }

    #[test]
    fn test_rust_log_used_when_set() {
        assert_eq!(
            filter_directives(false, Some("mesops_client=trace".to_string())),
            "mesops_client=trace"
        );
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(filter_directives(false, None), "mesops=info");
        assert_eq!(filter_directives(false, Some("  ".to_string())), "mesops=info");
    }
}
