//! Tests for the tracing/observability setup.

use std::sync::Mutex;

use portrisk_core::tracing::setup::{init_tracing, LOG_ENV_VAR};

/// Global mutex to serialize tracing tests (env var manipulation).
static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_debug_filter_accepted() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "debug");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}

#[test]
fn test_per_module_filtering() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(
        LOG_ENV_VAR,
        "portrisk_analysis::matching=debug,portrisk_analysis::dispersion=warn",
    );
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_filter_falls_back() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var(LOG_ENV_VAR, "this_is_garbage=not_a_level[");
    init_tracing();
    std::env::remove_var(LOG_ENV_VAR);
}
