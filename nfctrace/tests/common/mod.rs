// Shared helpers for the integration test crates in `tests/`.
#![allow(dead_code)]

pub mod fixtures;

/// Route `log` output through env_logger when RUST_LOG is set.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
