// file: src/logging/logger.rs
// version: 1.0.0
// guid: f939dd57-6e22-4c14-ab9b-3dd3a2acaa3c

//! Logger initialization and configuration

use crate::error::{Result, ToolError};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Pick the filter for the given verbosity flags.
///
/// Without flags `RUST_LOG` wins, falling back to `info`.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialize the logging system.
///
/// Logs go to stderr; stdout is reserved for command results.
pub fn init_logger(verbose: bool, quiet: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| ToolError::config(format!("Failed to initialize logger: {}", e)))?;

    Ok(())
}

/// Structured JSON logs on stderr, for running under a supervisor.
///
/// Honors the same verbosity flags as [`init_logger`].
pub fn init_json_logger(verbose: bool, quiet: bool) -> Result<()> {
    tracing_subscriber::registry()
        .with(filter_for(verbose, quiet))
        .with(fmt::layer().json().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| ToolError::config(format!("Failed to initialize JSON logger: {}", e)))?;

    Ok(())
}

/// Run `f` inside a span tagging every log line with the subcommand
pub fn with_command_span<F, R>(command: &str, f: F) -> R
where
    F: FnOnce() -> R,
{
    let span = tracing::info_span!("command", subcommand = command);
    let _enter = span.enter();
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(filter_for(true, true).to_string(), "error");
    }

    #[test]
    fn test_verbose_filter() {
        assert_eq!(filter_for(true, false).to_string(), "debug");
    }

    #[test]
    fn test_second_init_fails_cleanly() {
        // Only one global subscriber may be set per process.
        let _ = init_logger(false, false);
        assert!(init_logger(false, false).is_err());
    }

    #[test]
    fn test_with_command_span_returns_result() {
        let calls = std::cell::Cell::new(0);

        let result: Result<&str> = with_command_span("address", || {
            calls.set(calls.get() + 1);
            Ok("addr_test1")
        });

        assert_eq!(calls.get(), 1);
        assert_eq!(result.unwrap(), "addr_test1");
    }

    #[test]
    fn test_with_command_span_passes_errors_through() {
        let result: Result<()> =
            with_command_span("submit", || Err(ToolError::cli("cardano-cli", "Command failed\n")));
        assert_eq!(result.unwrap_err().message(), "Command failed\n");
    }
}
