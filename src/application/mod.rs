//! Application layer: Use cases and services.
//!
//! This module drives the assessment form: it owns the form state, runs the
//! simulated analysis in the background and exposes read-only snapshots to
//! the presentation layer.

mod assessment;
mod worker;

pub use assessment::{AssessmentController, Notice, NoticeKind, SubmitOutcome, DEFAULT_ANALYSIS_DELAY};
pub use worker::{AnalysisHandle, AnalysisWorker, WorkerPoll};
