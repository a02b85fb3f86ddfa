//! Tests for the fbow tracing setup.

use std::sync::Mutex;

use fbow_core::tracing::init_tracing;

static TRACING_MUTEX: Mutex<()> = Mutex::new(());

#[test]
fn test_fbow_log_debug() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("FBOW_LOG", "debug");
    init_tracing();
    std::env::remove_var("FBOW_LOG");
}

#[test]
fn test_init_tracing_idempotent() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    init_tracing();
    init_tracing();
    init_tracing();
}

#[test]
fn test_invalid_fbow_log_fallback() {
    let _lock = TRACING_MUTEX.lock().unwrap();
    std::env::set_var("FBOW_LOG", "this_is=not=a=valid=filter");
    init_tracing();
    std::env::remove_var("FBOW_LOG");
}
