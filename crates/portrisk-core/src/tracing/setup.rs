//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "PORTRISK_LOG";

/// Default filter used when `PORTRISK_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "portrisk=info";

/// Initialize the tracing/logging system.
///
/// Reads `PORTRISK_LOG` for per-module log levels.
/// Format: `PORTRISK_LOG=portrisk_analysis::matching=debug,portrisk_analysis=info`
///
/// Falls back to `portrisk=info` if `PORTRISK_LOG` is not set or is invalid.
/// Idempotent: calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // The host may already own the global subscriber; keep it and do not panic.
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
