//! Background worker for the simulated analysis delay.
//!
//! The worker sleeps on a cancel channel instead of `thread::sleep`, so the
//! pending analysis can be abandoned at any time: either explicitly through
//! [`AnalysisHandle::cancel`] or implicitly by dropping the handle when the
//! view goes away. A cancelled worker never produces a result.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::domain::{ClinicalInputs, PredictionResult};
use crate::ports::Predictor;

/// Outcome of polling a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerPoll {
    /// Still waiting for the delay to elapse.
    Pending,
    /// The analysis finished.
    Ready(PredictionResult),
    /// The worker exited without a result.
    Lost,
}

/// Handle to a running analysis.
pub struct AnalysisHandle {
    result_rx: Receiver<PredictionResult>,
    /// Dropping the sender wakes the worker and cancels it.
    cancel_tx: Sender<()>,
    _handle: JoinHandle<()>,
}

impl AnalysisHandle {
    /// Check for a result without blocking.
    #[must_use]
    pub fn try_recv(&self) -> WorkerPoll {
        match self.result_rx.try_recv() {
            Ok(result) => WorkerPoll::Ready(result),
            Err(TryRecvError::Empty) => WorkerPoll::Pending,
            Err(TryRecvError::Disconnected) => WorkerPoll::Lost,
        }
    }

    /// Cancel the pending analysis. No result will be delivered.
    pub fn cancel(self) {
        let _ = self.cancel_tx.send(());
    }
}

/// Spawns delayed analyses.
pub struct AnalysisWorker;

impl AnalysisWorker {
    /// Start an analysis that completes after `delay`.
    ///
    /// `inputs` is a snapshot: later form edits do not reach the worker.
    pub fn spawn<P>(predictor: Arc<P>, inputs: ClinicalInputs, delay: Duration) -> AnalysisHandle
    where
        P: Predictor + ?Sized + 'static,
    {
        let (result_tx, result_rx) = mpsc::channel();
        let (cancel_tx, cancel_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            Self::run_after_delay(predictor.as_ref(), inputs, delay, &cancel_rx, &result_tx);
        });

        AnalysisHandle {
            result_rx,
            cancel_tx,
            _handle: handle,
        }
    }

    fn run_after_delay<P>(
        predictor: &P,
        mut inputs: ClinicalInputs,
        delay: Duration,
        cancel_rx: &Receiver<()>,
        result_tx: &Sender<PredictionResult>,
    ) where
        P: Predictor + ?Sized,
    {
        match cancel_rx.recv_timeout(delay) {
            Err(RecvTimeoutError::Timeout) => {
                let result = predictor.predict(&inputs);
                // The receiver may already be gone; nothing to report then.
                let _ = result_tx.send(result);
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                tracing::debug!("Analysis cancelled before completion");
            }
        }
        inputs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RiskLevel;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Instant;

    struct CountingPredictor {
        calls: AtomicUsize,
    }

    impl Predictor for CountingPredictor {
        fn predict(&self, _inputs: &ClinicalInputs) -> PredictionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            PredictionResult::new(RiskLevel::Moderate, 90)
        }
    }

    fn counting() -> Arc<CountingPredictor> {
        Arc::new(CountingPredictor {
            calls: AtomicUsize::new(0),
        })
    }

    fn wait_for(handle: &AnalysisHandle, timeout: Duration) -> WorkerPoll {
        let deadline = Instant::now() + timeout;
        loop {
            match handle.try_recv() {
                WorkerPoll::Pending if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(5));
                }
                other => return other,
            }
        }
    }

    #[test]
    fn test_result_arrives_after_delay() {
        let predictor = counting();
        let started = Instant::now();
        let handle = AnalysisWorker::spawn(
            predictor.clone(),
            ClinicalInputs::sample(),
            Duration::from_millis(100),
        );

        assert_eq!(handle.try_recv(), WorkerPoll::Pending);
        let outcome = wait_for(&handle, Duration::from_secs(5));

        assert_eq!(
            outcome,
            WorkerPoll::Ready(PredictionResult::new(RiskLevel::Moderate, 90))
        );
        assert!(started.elapsed() >= Duration::from_millis(100));
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_prevents_result() {
        let predictor = counting();
        let handle = AnalysisWorker::spawn(
            predictor.clone(),
            ClinicalInputs::sample(),
            Duration::from_millis(50),
        );
        handle.cancel();

        thread::sleep(Duration::from_millis(150));
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dropping_handle_cancels() {
        let predictor = counting();
        drop(AnalysisWorker::spawn(
            predictor.clone(),
            ClinicalInputs::sample(),
            Duration::from_millis(50),
        ));

        thread::sleep(Duration::from_millis(150));
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }
}
