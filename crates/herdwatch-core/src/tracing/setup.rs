//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the filter directives.
pub const LOG_ENV_VAR: &str = "HERDWATCH_LOG";

/// Filter used when `HERDWATCH_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "herdwatch_core=info,herdwatch_engine=info";

/// Initialize the Herdwatch tracing/logging system.
///
/// Reads `HERDWATCH_LOG` for per-module log levels, e.g.
/// `HERDWATCH_LOG=herdwatch_engine::routing=debug,herdwatch_engine::triage=warn`.
///
/// Idempotent: only the first call installs the subscriber. If another
/// global subscriber is already installed the call is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
