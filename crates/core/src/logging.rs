//! Logging and observability
//!
//! Structured logging via tracing-subscriber with either text or JSON
//! formatting, selected at runtime through the `--log-format` flag or the
//! `TURNKEY_LOG_FORMAT` environment variable. All output goes to stderr so
//! stdout stays reserved for command output.

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the logging system with an optional format specification
///
/// `format` accepts `"json"` for structured output or anything else
/// (including `None`) for human-readable text. The filter level comes from
/// `TURNKEY_LOG`, falling back to `RUST_LOG` and finally `info`. Subsequent
/// calls are no-ops.
pub fn init(format: Option<&str>) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter();

        let env_format = std::env::var("TURNKEY_LOG_FORMAT").ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");

        let span_events = span_events_for_format(effective_format);

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(true)
                            .with_span_events(span_events)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(
                        fmt::layer()
                            .with_target(true)
                            .with_span_events(span_events)
                            .with_writer(io::stderr),
                    )
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

/// Create an EnvFilter based on environment variables
fn create_env_filter() -> EnvFilter {
    if let Ok(turnkey_log) = std::env::var("TURNKEY_LOG") {
        EnvFilter::try_new(&turnkey_log).unwrap_or_else(|_| {
            tracing::warn!(
                "Invalid TURNKEY_LOG specification '{}', using default 'info'",
                turnkey_log
            );
            EnvFilter::new("info")
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Span lifecycle event verbosity; JSON keeps NEW/CLOSE for tooling,
/// text stays quiet
fn span_events_for_format(format: &str) -> fmt::format::FmtSpan {
    use fmt::format::FmtSpan;

    match format {
        "json" => FmtSpan::NEW | FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}

/// Check if logging has been initialized
///
/// Primarily useful for testing scenarios.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}
