//! Risk assessment form controller.
//!
//! Owns the form inputs, the analysis state and the transient notice. The
//! presentation layer reads snapshots through the accessors and mutates
//! only through `update_field`, `submit`, `cancel` and `reset`.
//!
//! ```text
//! Idle      --submit(), valid-->   Running --delay elapses--> Completed
//! Idle      --submit(), invalid--> Idle (error notice)
//! Running   --submit()-->          Running (ignored)
//! Completed --submit(), valid-->   Running (previous result discarded)
//! Running   --cancel()-->          Idle
//! ```

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::{AnalysisState, ClinicalInputs, Field, UnknownField, ValidationError};
use crate::ports::Predictor;

use super::worker::{AnalysisHandle, AnalysisWorker, WorkerPoll};

/// Default simulated analysis time.
pub const DEFAULT_ANALYSIS_DELAY: Duration = Duration::from_secs(3);

const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";
const COMPLETE_MESSAGE: &str = "Analysis complete! Results are ready.";
const LOST_MESSAGE: &str = "Analysis failed, please try again";

/// What a call to [`AssessmentController::submit`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A new analysis was scheduled.
    Started,
    /// An analysis is already running; nothing changed.
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient, dismissible message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    pub raised_at: Instant,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            raised_at: Instant::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.raised_at.elapsed() >= ttl
    }
}

/// Form state machine for one assessment view.
pub struct AssessmentController {
    inputs: ClinicalInputs,
    state: AnalysisState,
    predictor: Arc<dyn Predictor>,
    delay: Duration,
    pending: Option<AnalysisHandle>,
    notice: Option<Notice>,
}

impl AssessmentController {
    /// Create a controller with empty inputs in the `Idle` state.
    pub fn new(predictor: Arc<dyn Predictor>, delay: Duration) -> Self {
        Self {
            inputs: ClinicalInputs::new(),
            state: AnalysisState::Idle,
            predictor,
            delay,
            pending: None,
            notice: None,
        }
    }

    #[must_use]
    pub fn inputs(&self) -> &ClinicalInputs {
        &self.inputs
    }

    #[must_use]
    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Whether the submit trigger should be enabled.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.state.is_running()
    }

    /// Overwrite one field. Allowed in every state; a running analysis
    /// keeps the snapshot it was started with.
    pub fn update_field(&mut self, field: Field, value: impl Into<String>) {
        self.inputs.set(field, value);
    }

    /// Overwrite a field addressed by its wire name.
    ///
    /// # Errors
    /// Unknown names are rejected and the inputs are left untouched.
    pub fn update_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field: Field = name.parse()?;
        self.update_field(field, value);
        Ok(())
    }

    /// Validate the form and start a simulated analysis.
    ///
    /// # Errors
    /// Returns [`ValidationError`] when a required field is empty. The state
    /// is left unchanged and an error notice is raised.
    pub fn submit(&mut self) -> Result<SubmitOutcome, ValidationError> {
        if self.state.is_running() {
            tracing::debug!("Submit ignored: analysis already running");
            return Ok(SubmitOutcome::Busy);
        }

        if let Err(err) = self.inputs.validate() {
            tracing::warn!(missing = ?err.missing, "Submission rejected");
            self.notice = Some(Notice::new(NoticeKind::Error, MISSING_FIELDS_MESSAGE));
            return Err(err);
        }

        self.state = AnalysisState::Running {
            started_at: Instant::now(),
        };
        self.notice = None;
        self.pending = Some(AnalysisWorker::spawn(
            Arc::clone(&self.predictor),
            self.inputs.clone(),
            self.delay,
        ));

        tracing::info!(delay_ms = self.delay.as_millis() as u64, "Analysis started");
        Ok(SubmitOutcome::Started)
    }

    /// Apply a finished analysis, if any. Returns `true` when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(handle) = self.pending.as_ref() else {
            return false;
        };

        match handle.try_recv() {
            WorkerPoll::Pending => false,
            WorkerPoll::Ready(result) => {
                tracing::info!(
                    risk = %result.risk(),
                    confidence = result.confidence(),
                    "Analysis complete"
                );
                self.pending = None;
                self.state = AnalysisState::Completed(result);
                self.notice = Some(Notice::new(NoticeKind::Success, COMPLETE_MESSAGE));
                true
            }
            WorkerPoll::Lost => {
                tracing::error!("Analysis worker exited without a result");
                self.pending = None;
                self.state = AnalysisState::Idle;
                self.notice = Some(Notice::new(NoticeKind::Error, LOST_MESSAGE));
                true
            }
        }
    }

    /// Abandon a running analysis and return to `Idle`.
    ///
    /// A completed result is kept; only in-flight work is dropped.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
            tracing::debug!("Pending analysis cancelled");
        }
        if self.state.is_running() {
            self.state = AnalysisState::Idle;
        }
    }

    /// Start over: cancel, wipe inputs, drop result and notice.
    pub fn reset(&mut self) {
        self.cancel();
        self.inputs.clear();
        self.state = AnalysisState::Idle;
        self.notice = None;
    }

    /// Replace all inputs with the built-in sample patient.
    pub fn load_sample(&mut self) {
        let sample = ClinicalInputs::sample();
        for field in Field::ALL {
            self.update_field(field, sample.get(field));
        }
    }

    /// Elapsed fraction of the delay while running.
    #[must_use]
    pub fn progress(&self) -> Option<f64> {
        match &self.state {
            AnalysisState::Running { started_at } => {
                if self.delay.is_zero() {
                    return Some(1.0);
                }
                let ratio = started_at.elapsed().as_secs_f64() / self.delay.as_secs_f64();
                Some(ratio.clamp(0.0, 1.0))
            }
            _ => None,
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Drop the notice once it has been visible for `ttl`.
    pub fn expire_notice(&mut self, ttl: Duration) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(ttl)) {
            self.notice = None;
        }
    }
}

impl Drop for AssessmentController {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::RandomPredictor;
    use crate::domain::{PredictionResult, RiskLevel, CONFIDENCE_RANGE};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    const TEST_DELAY: Duration = Duration::from_millis(60);

    struct CountingPredictor {
        calls: AtomicUsize,
    }

    impl Predictor for CountingPredictor {
        fn predict(&self, _inputs: &ClinicalInputs) -> PredictionResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            PredictionResult::new(RiskLevel::Low, 88)
        }
    }

    fn counting_controller() -> (AssessmentController, Arc<CountingPredictor>) {
        let predictor = Arc::new(CountingPredictor {
            calls: AtomicUsize::new(0),
        });
        let controller = AssessmentController::new(predictor.clone(), TEST_DELAY);
        (controller, predictor)
    }

    fn fill_scenario_a(controller: &mut AssessmentController) {
        controller.update_field(Field::Age, "45");
        controller.update_field(Field::Gender, "male");
        controller.update_field(Field::Albumin, "4.0");
        controller.update_field(Field::Bilirubin, "0.8");
    }

    /// Poll until the state leaves `Running` or the deadline passes.
    fn wait_for_completion(controller: &mut AssessmentController) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while controller.state().is_running() && Instant::now() < deadline {
            controller.poll();
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let (controller, _) = counting_controller();
        assert_eq!(controller.state(), &AnalysisState::Idle);
        assert_eq!(controller.inputs(), &ClinicalInputs::new());
        assert!(controller.notice().is_none());
        assert!(controller.can_submit());
    }

    #[test]
    fn test_scenario_a_runs_then_completes() {
        let controller_predictor = Arc::new(RandomPredictor::new());
        let mut controller = AssessmentController::new(controller_predictor, TEST_DELAY);
        fill_scenario_a(&mut controller);

        assert_eq!(controller.submit(), Ok(SubmitOutcome::Started));
        assert!(controller.state().is_running());
        assert!(!controller.can_submit());

        wait_for_completion(&mut controller);

        let result = controller.state().result().expect("Should complete");
        assert!(RiskLevel::ALL.contains(&result.risk()));
        assert!(CONFIDENCE_RANGE.contains(&result.confidence()));
        assert_eq!(result.recommendations(), result.risk().recommendations());

        let notice = controller.notice().expect("Should raise success notice");
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "Analysis complete! Results are ready.");
    }

    #[test]
    fn test_scenario_b_missing_age_is_rejected() {
        let (mut controller, predictor) = counting_controller();
        fill_scenario_a(&mut controller);
        controller.update_field(Field::Age, "");

        let err = controller.submit().expect_err("Should reject");
        assert_eq!(err.missing, vec![Field::Age]);
        assert_eq!(controller.state(), &AnalysisState::Idle);

        let notice = controller.notice().expect("Should raise error notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Please fill in all required fields");

        thread::sleep(TEST_DELAY * 2);
        assert!(!controller.poll());
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_each_required_field_blocks_submission() {
        for missing in crate::domain::REQUIRED_FIELDS {
            let (mut controller, _) = counting_controller();
            fill_scenario_a(&mut controller);
            controller.update_field(missing, "");

            let err = controller.submit().expect_err("Should reject");
            assert_eq!(err.missing, vec![missing]);
            assert_eq!(controller.state(), &AnalysisState::Idle);
        }
    }

    #[test]
    fn test_scenario_c_resubmit_while_running_is_ignored() {
        let (mut controller, predictor) = counting_controller();
        fill_scenario_a(&mut controller);

        assert_eq!(controller.submit(), Ok(SubmitOutcome::Started));
        let running = controller.state().clone();
        assert_eq!(controller.submit(), Ok(SubmitOutcome::Busy));
        assert_eq!(controller.state(), &running);

        wait_for_completion(&mut controller);
        thread::sleep(TEST_DELAY * 2);
        controller.poll();

        assert_eq!(predictor.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            controller.state().result(),
            Some(&PredictionResult::new(RiskLevel::Low, 88))
        );
    }

    #[test]
    fn test_resubmit_after_completion_discards_old_result() {
        let (mut controller, predictor) = counting_controller();
        fill_scenario_a(&mut controller);
        controller.submit().expect("Should start");
        wait_for_completion(&mut controller);
        assert!(controller.state().result().is_some());

        assert_eq!(controller.submit(), Ok(SubmitOutcome::Started));
        assert!(controller.state().is_running());
        assert!(controller.state().result().is_none());

        wait_for_completion(&mut controller);
        assert!(controller.state().result().is_some());
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_invalid_resubmit_keeps_completed_result() {
        let (mut controller, _) = counting_controller();
        fill_scenario_a(&mut controller);
        controller.submit().expect("Should start");
        wait_for_completion(&mut controller);
        let completed = controller.state().clone();

        controller.update_field(Field::Bilirubin, "");
        assert!(controller.submit().is_err());
        assert_eq!(controller.state(), &completed);
    }

    #[test]
    fn test_update_field_is_idempotent() {
        let (mut once, _) = counting_controller();
        once.update_field(Field::Cholesterol, "190");

        let (mut twice, _) = counting_controller();
        twice.update_field(Field::Cholesterol, "190");
        twice.update_field(Field::Cholesterol, "190");

        assert_eq!(once.inputs(), twice.inputs());
    }

    #[test]
    fn test_update_field_by_name_rejects_unknown() {
        let (mut controller, _) = counting_controller();
        controller
            .update_field_by_name("gammaGlutamylTransferase", "30")
            .expect("Known field");
        assert_eq!(controller.inputs().get(Field::GammaGlutamylTransferase), "30");

        let before = controller.inputs().clone();
        assert!(controller.update_field_by_name("hematocrit", "40").is_err());
        assert_eq!(controller.inputs(), &before);
    }

    #[test]
    fn test_cancel_stops_pending_analysis() {
        let (mut controller, predictor) = counting_controller();
        fill_scenario_a(&mut controller);
        controller.submit().expect("Should start");

        controller.cancel();
        assert_eq!(controller.state(), &AnalysisState::Idle);

        thread::sleep(TEST_DELAY * 3);
        assert!(!controller.poll());
        assert_eq!(controller.state(), &AnalysisState::Idle);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dropping_controller_cancels() {
        let (mut controller, predictor) = counting_controller();
        fill_scenario_a(&mut controller);
        controller.submit().expect("Should start");
        drop(controller);

        thread::sleep(TEST_DELAY * 3);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let (mut controller, _) = counting_controller();
        controller.load_sample();
        controller.submit().expect("Should start");

        controller.reset();
        assert_eq!(controller.state(), &AnalysisState::Idle);
        assert_eq!(controller.inputs(), &ClinicalInputs::new());
        assert!(controller.notice().is_none());
    }

    #[test]
    fn test_progress_only_while_running() {
        let (mut controller, _) = counting_controller();
        assert!(controller.progress().is_none());

        controller.load_sample();
        controller.submit().expect("Should start");
        let progress = controller.progress().expect("Running");
        assert!((0.0..=1.0).contains(&progress));

        wait_for_completion(&mut controller);
        assert!(controller.progress().is_none());
    }

    #[test]
    fn test_notice_expiry() {
        let (mut controller, _) = counting_controller();
        assert!(controller.submit().is_err());
        assert!(controller.notice().is_some());

        controller.expire_notice(Duration::from_secs(60));
        assert!(controller.notice().is_some());

        controller.expire_notice(Duration::ZERO);
        assert!(controller.notice().is_none());
    }

    struct PanickingPredictor;

    impl Predictor for PanickingPredictor {
        fn predict(&self, _inputs: &ClinicalInputs) -> PredictionResult {
            panic!("model unavailable");
        }
    }

    /// Remembers the age value of the last inputs it was asked about.
    struct AgeRecorder {
        seen_age: std::sync::Mutex<Option<String>>,
    }

    impl Predictor for AgeRecorder {
        fn predict(&self, inputs: &ClinicalInputs) -> PredictionResult {
            if let Ok(mut seen) = self.seen_age.lock() {
                *seen = Some(inputs.get(Field::Age).to_string());
            }
            PredictionResult::new(RiskLevel::Moderate, 90)
        }
    }

    #[test]
    fn test_worker_without_result_returns_to_idle() {
        let mut controller = AssessmentController::new(Arc::new(PanickingPredictor), TEST_DELAY);
        fill_scenario_a(&mut controller);
        controller.submit().expect("Should start");

        wait_for_completion(&mut controller);

        assert_eq!(controller.state(), &AnalysisState::Idle);
        let notice = controller.notice().expect("Should raise error notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, "Analysis failed, please try again");
        assert!(controller.can_submit());
    }

    #[test]
    fn test_edits_during_run_do_not_reach_analysis() {
        let recorder = Arc::new(AgeRecorder {
            seen_age: std::sync::Mutex::new(None),
        });
        let mut controller = AssessmentController::new(recorder.clone(), TEST_DELAY);
        controller.load_sample();
        controller.submit().expect("Should start");

        controller.update_field(Field::Age, "99");
        assert_eq!(controller.inputs().get(Field::Age), "99");

        wait_for_completion(&mut controller);
        assert!(controller.state().result().is_some());

        let seen = recorder.seen_age.lock().expect("Lock").clone();
        assert_eq!(seen.as_deref(), Some("45"));
        assert_eq!(controller.inputs().get(Field::Age), "99");
    }
}
