use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis_client::{AnalysisError, AnalysisRequest, AnalysisService};
use crate::models::upload::{ResumeFile, UploadState};

pub const NOTICE_MISSING_RESUME: &str = "Please upload a resume.";
pub const NOTICE_ANALYSIS_FAILED: &str = "Error analyzing resume.";
pub const NOTICE_BUSY: &str = "An analysis is already in progress.";
pub const NOTICE_CANCELLED: &str = "Analysis was cancelled.";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no resume selected")]
    Validation,

    #[error("an analysis is already in progress")]
    Busy,

    #[error("analysis was cancelled")]
    Cancelled,

    /// Transport failures, non-success statuses and unusable bodies alike.
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

impl SubmitError {
    /// The alert shown on the page. Every analysis failure shares one message.
    pub fn notice(&self) -> &'static str {
        match self {
            SubmitError::Validation => NOTICE_MISSING_RESUME,
            SubmitError::Busy => NOTICE_BUSY,
            SubmitError::Cancelled => NOTICE_CANCELLED,
            SubmitError::Analysis(_) => NOTICE_ANALYSIS_FAILED,
        }
    }
}

/// Owns the single `UploadState` and performs submissions against an
/// `AnalysisService`.
///
/// The state lock is never held across an await. At most one submission is
/// in flight; a second `submit` while `loading` is set returns `Busy`.
pub struct SubmissionController {
    state: Mutex<UploadState>,
    service: Arc<dyn AnalysisService>,
    // Bumped on every cancel; in-flight submissions watch for a change.
    cancel_epoch: watch::Sender<u64>,
}

impl SubmissionController {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        let (cancel_epoch, _) = watch::channel(0);
        Self {
            state: Mutex::new(UploadState::default()),
            service,
            cancel_epoch,
        }
    }

    /// Replaces the selected resume. Type and size are left to the service.
    pub fn set_file(&self, file: ResumeFile) {
        self.lock().file = Some(file);
    }

    /// Replaces the job description verbatim.
    pub fn set_job_description(&self, text: String) {
        self.lock().job_description = text;
    }

    pub fn snapshot(&self) -> UploadState {
        self.lock().clone()
    }

    /// Cancels the in-flight submission, if any. Returns whether one was running.
    pub fn cancel(&self) -> bool {
        // The bump happens under the state lock so it cannot land on a
        // submission that starts after the check.
        let state = self.lock();
        if state.loading {
            self.cancel_epoch.send_modify(|epoch| *epoch += 1);
        }
        state.loading
    }

    /// Sends the selected resume (and job description, when non-empty) for
    /// analysis and replaces the stored report on success.
    ///
    /// On any failure the previous report is kept. `loading` is cleared on
    /// every exit path, including when this future is dropped.
    pub async fn submit(&self) -> Result<(), SubmitError> {
        let submission_id = Uuid::new_v4();

        let (request, mut cancelled, _loading) = {
            let mut state = self.lock();
            let file = state.file.clone().ok_or(SubmitError::Validation)?;
            if state.loading {
                return Err(SubmitError::Busy);
            }
            state.loading = true;

            let job_description =
                Some(state.job_description.clone()).filter(|jd| !jd.is_empty());
            let request = AnalysisRequest {
                file,
                job_description,
            };
            (
                request,
                self.cancel_epoch.subscribe(),
                LoadingGuard { state: &self.state },
            )
        };

        info!(
            %submission_id,
            file = %request.file.file_name,
            bytes = request.file.bytes.len(),
            has_jd = request.job_description.is_some(),
            "submitting resume for analysis"
        );

        let outcome = tokio::select! {
            result = self.service.analyze(request) => result.map_err(SubmitError::from),
            _ = cancelled.changed() => Err(SubmitError::Cancelled),
        };

        match outcome {
            Ok(report) => {
                let mut state = self.lock();
                state.report = Some(report);
                state.analyzed_at = Some(Utc::now());
                info!(%submission_id, "analysis complete, report replaced");
                Ok(())
            }
            Err(err) => {
                warn!(%submission_id, error = %err, "analysis did not produce a report");
                Err(err)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, UploadState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Clears `loading` when the submission ends, however it ends.
struct LoadingGuard<'a> {
    state: &'a Mutex<UploadState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
    }
}
