//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default filter when `PERT_LOG` is unset or unparseable.
pub const DEFAULT_FILTER: &str =
    "pert_core=info,pert_engine=info,pert_storage=info,pert_calibration=info";

/// Initialize the tracing/logging system.
///
/// Reads `PERT_LOG` for per-crate log levels,
/// e.g. `PERT_LOG=pert_engine=debug,pert_storage=warn`.
///
/// Idempotent. If another global subscriber is already installed it is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env("PERT_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

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
