/// Analysis client: the single point of entry for calls to the external
/// resume analysis service.
///
/// No other module talks to the analysis endpoint directly. The controller
/// depends on the `AnalysisService` trait so tests can swap in a fake.
use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::report::{AnalysisResponse, Report};
use crate::models::upload::ResumeFile;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("analysis service returned status {status}")]
    Status { status: u16 },

    #[error("JSON parse error: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("response did not contain a report")]
    MissingReport,
}

/// One outgoing analysis request. `job_description` is `None` when the
/// user left it empty; the `jd` field is then omitted from the form.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub file: ResumeFile,
    pub job_description: Option<String>,
}

/// Carried in the controller as `Arc<dyn AnalysisService>`.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<Report, AnalysisError>;
}

/// reqwest-backed client for `POST /analyze`. No retries: a failed call is
/// reported once and the user decides whether to submit again.
pub struct HttpAnalysisClient {
    client: Client,
    url: String,
}

impl HttpAnalysisClient {
    pub fn new(url: String, timeout: Option<std::time::Duration>) -> Result<Self, AnalysisError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<Report, AnalysisError> {
        let form = build_form(request)?;

        let response = self.client.post(&self.url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Failure bodies are not inspected.
            warn!(status = status.as_u16(), "analysis service rejected request");
            return Err(AnalysisError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: AnalysisResponse = serde_json::from_slice(&body)?;
        let report = parsed.report.ok_or(AnalysisError::MissingReport)?;

        debug!(
            indicators = report.fraud_indicators.as_ref().map_or(0, Vec::len),
            "analysis response parsed"
        );
        Ok(report)
    }
}

fn build_form(request: AnalysisRequest) -> Result<Form, AnalysisError> {
    let AnalysisRequest {
        file,
        job_description,
    } = request;

    let mut part = Part::bytes(file.bytes.to_vec()).file_name(file.file_name);
    if let Some(content_type) = file.content_type.as_deref() {
        part = part.mime_str(content_type)?;
    }

    let mut form = Form::new().part("file", part);
    if let Some(jd) = job_description {
        form = form.text("jd", jd);
    }
    Ok(form)
}
