//! Optional `tracing` setup for hosts that do not configure logging themselves.
//!
//! Annotation events are emitted under the `chart_annotations` target. Hosts
//! that already run a subscriber only need a directive for that target.

/// Directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_TRACING_DIRECTIVE: &str = "chart_annotations=info";

/// Installs a compact global subscriber filtered by `RUST_LOG`.
///
/// Falls back to [`DEFAULT_TRACING_DIRECTIVE`]. Returns `false` without the
/// `telemetry` feature or when a global subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACING_DIRECTIVE));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
