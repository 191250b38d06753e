// nfctrace/nfctrace/src/session/stream.rs

//! Frame-by-frame pipeline: detect, annotate, pair, notify.

use std::time::Duration;

use crate::frame::Frame;
use crate::protocol::CommandDetector;
use crate::session::pairing::{PairingConfig, Transaction, TransactionPairer};

/// Receives pipeline events. All methods default to no-ops.
pub trait FrameObserver {
    /// Called for every frame after annotation.
    fn on_frame(&mut self, _frame: &Frame) {}

    /// Called for every transaction the pairer emits.
    fn on_transaction(&mut self, _transaction: &Transaction) {}

    /// Called once from [`StreamProcessor::finish`].
    fn on_finish(&mut self) {}
}

impl<T: FrameObserver + ?Sized> FrameObserver for &mut T {
    fn on_frame(&mut self, frame: &Frame) {
        (**self).on_frame(frame)
    }

    fn on_transaction(&mut self, transaction: &Transaction) {
        (**self).on_transaction(transaction)
    }

    fn on_finish(&mut self) {
        (**self).on_finish()
    }
}

/// Collects every transaction for later inspection.
#[derive(Debug, Default)]
pub struct TransactionCollector {
    transactions: Vec<Transaction>,
    frames: usize,
    finished: bool,
}

impl TransactionCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn into_transactions(self) -> Vec<Transaction> {
        self.transactions
    }

    /// Number of frames seen.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameObserver for TransactionCollector {
    fn on_frame(&mut self, _frame: &Frame) {
        self.frames += 1;
    }

    fn on_transaction(&mut self, transaction: &Transaction) {
        self.transactions.push(transaction.clone());
    }

    fn on_finish(&mut self) {
        self.finished = true;
    }
}

/// Writes one `log::info!` line per transaction.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl FrameObserver for LogObserver {
    fn on_transaction(&mut self, transaction: &Transaction) {
        let request = transaction.request();
        match transaction.response() {
            Some(response) => log::info!(
                "{} {} -> {} ({:.1} us)",
                request.technology(),
                request.decoded_command().unwrap_or("?"),
                response.decoded_command().unwrap_or("?"),
                (response.timestamp() - request.timestamp()) * 1e6
            ),
            None => log::info!(
                "{} {} -> no response",
                request.technology(),
                request.decoded_command().unwrap_or("?")
            ),
        }
    }
}

/// Builder for [`StreamProcessor`].
pub struct ProcessorBuilder<'a> {
    config: PairingConfig,
    detector: CommandDetector,
    observers: Vec<Box<dyn FrameObserver + 'a>>,
}

impl<'a> Default for ProcessorBuilder<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ProcessorBuilder<'a> {
    pub fn new() -> Self {
        Self {
            config: PairingConfig::default(),
            detector: CommandDetector::default(),
            observers: Vec::new(),
        }
    }

    /// Pairing window (default 100 ms).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_config(mut self, config: PairingConfig) -> Self {
        self.config = config;
        self
    }

    /// Toggle the ISO-DEP fallback for NFC-A/B frames (default on).
    pub fn with_iso_dep(mut self, enabled: bool) -> Self {
        self.detector = self.detector.with_iso_dep(enabled);
        self
    }

    /// Register an observer. Pass `&mut observer` to keep ownership.
    pub fn with_observer<O: FrameObserver + 'a>(mut self, observer: O) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn build(self) -> StreamProcessor<'a> {
        StreamProcessor {
            detector: self.detector,
            pairer: TransactionPairer::new(self.config),
            observers: self.observers,
        }
    }
}

/// Runs frames through the command detector and the pairer and reports to
/// the registered observers.
pub struct StreamProcessor<'a> {
    detector: CommandDetector,
    pairer: TransactionPairer,
    observers: Vec<Box<dyn FrameObserver + 'a>>,
}

impl<'a> Default for StreamProcessor<'a> {
    fn default() -> Self {
        ProcessorBuilder::new().build()
    }
}

impl<'a> StreamProcessor<'a> {
    pub fn builder() -> ProcessorBuilder<'a> {
        ProcessorBuilder::new()
    }

    pub fn detector(&self) -> &CommandDetector {
        &self.detector
    }

    /// The poll waiting for an answer.
    pub fn pending(&self) -> Option<&Frame> {
        self.pairer.pending()
    }

    pub fn add_observer<O: FrameObserver + 'a>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Command byte of the pending poll, offered as context to a listen
    /// frame on the same technology.
    fn context_for(&self, frame: &Frame) -> Option<u8> {
        if !frame.is_listen() {
            return None;
        }
        self.pairer
            .pending()
            .filter(|request| request.technology() == frame.technology())
            .and_then(Frame::command_byte)
    }

    /// Process one frame and return the transaction it resolved, if any.
    pub fn process(&mut self, mut frame: Frame) -> Option<Transaction> {
        let context = self.context_for(&frame);
        self.detector.annotate(&mut frame, context);

        for observer in self.observers.iter_mut() {
            observer.on_frame(&frame);
        }

        let transaction = self.pairer.push(frame)?;
        for observer in self.observers.iter_mut() {
            observer.on_transaction(&transaction);
        }
        Some(transaction)
    }

    /// Process a whole sequence. Does not call [`StreamProcessor::finish`].
    pub fn process_all<I>(&mut self, frames: I) -> Vec<Transaction>
    where
        I: IntoIterator<Item = Frame>,
    {
        frames
            .into_iter()
            .filter_map(|frame| self.process(frame))
            .collect()
    }

    /// Flush the pending poll and notify observers that the stream ended.
    pub fn finish(&mut self) -> Option<Transaction> {
        let transaction = self.pairer.finish();
        if let Some(transaction) = &transaction {
            for observer in self.observers.iter_mut() {
                observer.on_transaction(transaction);
            }
        }
        for observer in self.observers.iter_mut() {
            observer.on_finish();
        }
        transaction
    }
}
