//! Stderr tracing for the extractor binary.
//!
//! Tracing is a debugging aid only. The report file, the JSON record, and
//! `meta.json` are the product output and never depend on `RUST_LOG`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber: `RUST_LOG` filter, compact lines on stderr.
///
/// Goal-fallback warnings show by default; parse counts and search
/// statistics need `RUST_LOG=extractor=debug`.
pub fn init() {
    tracing_subscriber::registry()
        .with(filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .compact(),
        )
        .init();
}

/// Parse `directives`, falling back to [`DEFAULT_DIRECTIVE`].
fn filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_uses_default() {
        assert_eq!(filter(None).to_string(), DEFAULT_DIRECTIVE);
    }

    #[test]
    fn explicit_directive_is_kept() {
        assert_eq!(filter(Some("extractor=debug")).to_string(), "extractor=debug");
    }
}
