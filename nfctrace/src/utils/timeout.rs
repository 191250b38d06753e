//! Timeout helpers.
//!
//! Trace timestamps are `f64` seconds while configuration is expressed as
//! `Duration`; these helpers convert between the two.

use std::time::Duration;

use crate::constants::DEFAULT_PAIRING_TIMEOUT_MS;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Default poll/listen pairing window as Duration.
pub fn default_pairing_timeout() -> Duration {
    ms(DEFAULT_PAIRING_TIMEOUT_MS)
}

/// Express a Duration in trace time units (seconds).
pub fn as_trace_seconds(d: Duration) -> f64 {
    d.as_secs_f64()
}
