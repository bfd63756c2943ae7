//! Telemetry helpers for applications embedding `telechart`.
//!
//! Tracing setup stays explicit and opt-in. Hosts either call one of the
//! helpers below or wire their own `tracing` subscriber.

/// Initializes a compact `tracing` subscriber filtered by `RUST_LOG`
/// (default `info`) when the `telemetry` feature is enabled.
///
/// Returns `false` when the feature is disabled or a global subscriber was
/// already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter("info")
}

/// Same as [`init_default_tracing`] with an explicit fallback filter used when
/// `RUST_LOG` is unset, e.g. `"telechart=debug"`.
#[must_use]
pub fn init_tracing_with_filter(fallback: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
