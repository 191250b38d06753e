// nfctrace/nfctrace/src/session/pairing.rs

//! Poll/listen pairing.
//!
//! At most one poll is outstanding. A listen frame completes it when it
//! arrives within the timeout; otherwise the poll is flushed on its own.

use std::time::Duration;

use crate::frame::Frame;
use crate::types::Direction;
use crate::utils::{as_trace_seconds, default_pairing_timeout, ms};

/// A poll frame and the listen frame that answered it, if any.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Transaction {
    request: Frame,
    response: Option<Frame>,
}

impl Transaction {
    pub fn complete(request: Frame, response: Frame) -> Self {
        Self {
            request,
            response: Some(response),
        }
    }

    pub fn incomplete(request: Frame) -> Self {
        Self {
            request,
            response: None,
        }
    }

    pub fn request(&self) -> &Frame {
        &self.request
    }

    pub fn response(&self) -> Option<&Frame> {
        self.response.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.response.is_some()
    }

    /// Seconds between request and response start.
    pub fn duration(&self) -> Option<f64> {
        self.response
            .as_ref()
            .map(|response| response.timestamp() - self.request.timestamp())
    }

    pub fn into_parts(self) -> (Frame, Option<Frame>) {
        (self.request, self.response)
    }
}

/// Pairing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingConfig {
    /// Longest accepted gap between a poll and its listen frame (inclusive)
    pub timeout: Duration,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            timeout: default_pairing_timeout(),
        }
    }
}

impl PairingConfig {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn with_timeout_ms(timeout_ms: u64) -> Self {
        Self::with_timeout(ms(timeout_ms))
    }

    fn timeout_secs(&self) -> f64 {
        as_trace_seconds(self.timeout)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
enum PairingState {
    #[default]
    Idle,
    AwaitingResponse(Frame),
}

/// Groups an ordered frame stream into transactions.
///
/// Frames must be pushed in non-decreasing timestamp order. Call
/// [`TransactionPairer::finish`] at end of stream, a pending poll is lost
/// otherwise.
#[derive(Debug, Clone, Default)]
pub struct TransactionPairer {
    config: PairingConfig,
    state: PairingState,
}

impl TransactionPairer {
    pub fn new(config: PairingConfig) -> Self {
        Self {
            config,
            state: PairingState::Idle,
        }
    }

    pub fn config(&self) -> &PairingConfig {
        &self.config
    }

    /// The poll waiting for an answer.
    pub fn pending(&self) -> Option<&Frame> {
        match &self.state {
            PairingState::Idle => None,
            PairingState::AwaitingResponse(request) => Some(request),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, PairingState::Idle)
    }

    /// Feed one frame. Returns the transaction this frame resolved, if any.
    pub fn push(&mut self, frame: Frame) -> Option<Transaction> {
        match frame.direction() {
            Direction::CarrierOn | Direction::CarrierOff => None,
            Direction::Poll => match std::mem::replace(
                &mut self.state,
                PairingState::AwaitingResponse(frame),
            ) {
                PairingState::Idle => None,
                PairingState::AwaitingResponse(previous) => {
                    log::debug!(
                        "poll at {:.6} superseded by a new poll, flushed unanswered",
                        previous.timestamp()
                    );
                    Some(Transaction::incomplete(previous))
                }
            },
            Direction::Listen => match std::mem::take(&mut self.state) {
                PairingState::Idle => {
                    log::trace!("listen at {:.6} without pending poll", frame.timestamp());
                    None
                }
                PairingState::AwaitingResponse(request) => {
                    let elapsed = frame.timestamp() - request.timestamp();
                    if elapsed <= self.config.timeout_secs() {
                        Some(Transaction::complete(request, frame))
                    } else {
                        log::debug!(
                            "listen at {:.6} arrived {:.6}s after poll, past the {:?} window; both left unpaired",
                            frame.timestamp(),
                            elapsed,
                            self.config.timeout
                        );
                        Some(Transaction::incomplete(request))
                    }
                }
            },
        }
    }

    /// Flush the pending poll, if any, as an incomplete transaction.
    pub fn finish(&mut self) -> Option<Transaction> {
        match std::mem::take(&mut self.state) {
            PairingState::Idle => None,
            PairingState::AwaitingResponse(request) => Some(Transaction::incomplete(request)),
        }
    }
}

/// Pair a whole frame sequence, including the final flush.
pub fn pair_all<I>(frames: I, config: PairingConfig) -> Vec<Transaction>
where
    I: IntoIterator<Item = Frame>,
{
    let mut pairer = TransactionPairer::new(config);
    let mut out: Vec<Transaction> = frames
        .into_iter()
        .filter_map(|frame| pairer.push(frame))
        .collect();
    out.extend(pairer.finish());
    out
}
