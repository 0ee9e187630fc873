//! Axum route handlers for the upload page.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, Redirect},
    Json,
};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::report::Report;
use crate::models::upload::ResumeFile;
use crate::render::render_page;
use crate::state::AppState;
use crate::submission::SubmitError;

/// GET /
pub async fn handle_page(State(state): State<AppState>) -> Html<String> {
    Html(render_page(&state.controller.snapshot(), None))
}

/// POST /submit
///
/// Applies the posted form fields to the page state, runs one submission and
/// renders the page with the outcome. A file part with no name and no bytes
/// means the user did not pick a new file, so the current one is kept.
pub async fn handle_submit(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Html<String>), AppError> {
    let controller = &state.controller;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;
                if file_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                let file_name = if file_name.is_empty() {
                    "resume".to_string()
                } else {
                    file_name
                };
                controller.set_file(ResumeFile::new(file_name, content_type, bytes));
            }
            Some("jd") => controller.set_job_description(field.text().await?),
            other => debug!(field = ?other, "ignoring unknown form field"),
        }
    }

    let (status, notice) = match controller.submit().await {
        Ok(()) => (StatusCode::OK, None),
        Err(err) => (submit_status(&err), Some(err.notice())),
    };

    Ok((status, Html(render_page(&controller.snapshot(), notice))))
}

/// POST /cancel
pub async fn handle_cancel(State(state): State<AppState>) -> Redirect {
    if state.controller.cancel() {
        info!("in-flight analysis cancelled by user");
    }
    Redirect::to("/")
}

/// GET /report
///
/// The current report as JSON, `null` before the first successful analysis.
pub async fn handle_report(State(state): State<AppState>) -> Json<Option<Report>> {
    Json(state.controller.snapshot().report)
}

fn submit_status(err: &SubmitError) -> StatusCode {
    match err {
        SubmitError::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitError::Busy => StatusCode::CONFLICT,
        SubmitError::Cancelled => StatusCode::OK,
        SubmitError::Analysis(_) => StatusCode::BAD_GATEWAY,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{body::Body, http::Request, Router};
    use serde_json::json;
    use tower::ServiceExt;

    use crate::analysis_client::{AnalysisError, AnalysisRequest, AnalysisService};
    use crate::config::Config;
    use crate::routes::build_router;
    use crate::state::AppState;
    use crate::submission::SubmissionController;

    use super::*;

    const BOUNDARY: &str = "screeningtestboundary";

    /// Answers every call with the same outcome and records requests.
    struct StaticService {
        report: Option<Report>,
        calls: Mutex<Vec<AnalysisRequest>>,
    }

    #[async_trait]
    impl AnalysisService for StaticService {
        async fn analyze(&self, request: AnalysisRequest) -> Result<Report, AnalysisError> {
            self.calls.lock().unwrap().push(request);
            self.report
                .clone()
                .ok_or(AnalysisError::Status { status: 500 })
        }
    }

    fn app(report: Option<Report>) -> (Router, Arc<StaticService>) {
        let service = Arc::new(StaticService {
            report,
            calls: Mutex::new(Vec::new()),
        });
        let state = AppState {
            config: Config::default(),
            controller: Arc::new(SubmissionController::new(service.clone())),
        };
        (build_router(state), service)
    }

    fn sample_report() -> Report {
        serde_json::from_value(json!({
            "fraud_indicators": [{"status": "safe", "reasoning": "Consistent timeline"}],
            "plagiarism_summary": [{"source_file": "sample.pdf", "score": 0.12}],
            "resume_vs_jd_similarity": "72%",
            "education_anomalies": [],
            "final_recommendation": "Proceed"
        }))
        .unwrap()
    }

    /// Browser-shaped form: an empty `file` part when no file was picked.
    fn form_body(name: &str, bytes: &[u8], jd: &str) -> Body {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(
            format!(
                "\r\n--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"jd\"\r\n\r\n{jd}\r\n--{BOUNDARY}--\r\n"
            )
            .as_bytes(),
        );
        Body::from(body)
    }

    fn submit_request(body: Body) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/submit")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(body)
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_submit_without_file_shows_validation_notice() {
        let (app, service) = app(Some(sample_report()));

        let response = app
            .oneshot(submit_request(form_body("", b"", "")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = body_text(response).await;
        assert!(html.contains("Please upload a resume."));
        assert!(service.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_renders_report() {
        let (app, service) = app(Some(sample_report()));

        let response = app
            .clone()
            .oneshot(submit_request(form_body("resume.pdf", b"%PDF", "")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"class="status-badge safe""#));
        assert!(html.contains("<strong>File:</strong> sample.pdf"));
        assert!(html.contains("<p>72%</p>"));
        assert!(!html.contains("Education Anomalies"));
        assert!(html.contains("<p>Proceed</p>"));

        let calls = service.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].file.file_name, "resume.pdf");
        assert_eq!(calls[0].file.bytes.as_ref(), b"%PDF");
        assert!(calls[0].job_description.is_none());

        let response = app
            .oneshot(Request::get("/report").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let report: Report = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(report, sample_report());
    }

    #[tokio::test]
    async fn test_previous_file_is_kept_when_none_posted() {
        let (app, service) = app(Some(sample_report()));

        app.clone()
            .oneshot(submit_request(form_body("cv.docx", b"PK", "")))
            .await
            .unwrap();
        let response = app
            .oneshot(submit_request(form_body("", b"", "Platform engineer")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let calls = service.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].file.file_name, "cv.docx");
        assert_eq!(
            calls[1].job_description.as_deref(),
            Some("Platform engineer")
        );
    }

    #[tokio::test]
    async fn test_analysis_failure_shows_generic_notice() {
        let (app, _) = app(None);

        let response = app
            .oneshot(submit_request(form_body("resume.pdf", b"%PDF", "")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let html = body_text(response).await;
        assert!(html.contains("Error analyzing resume."));
        assert!(!html.contains("report-section"));
    }

    #[tokio::test]
    async fn test_report_is_null_before_first_analysis() {
        let (app, _) = app(None);
        let response = app
            .oneshot(Request::get("/report").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(body_text(response).await, "null");
    }

    #[tokio::test]
    async fn test_cancel_redirects_home() {
        let (app, _) = app(None);
        let response = app
            .oneshot(
                Request::post("/cancel")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/");
    }

    #[tokio::test]
    async fn test_health_reports_idle() {
        let (app, _) = app(None);
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["loading"], false);
    }
}
