use bytes::Bytes;
use chrono::{DateTime, Utc};

use crate::models::report::Report;

/// A resume as received from the browser. Held in memory only.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }
}

/// Page state: the form fields, the in-flight flag and the last report.
///
/// `file` and `job_description` change only through user input; `loading`,
/// `report` and `analyzed_at` change only through the submission flow.
#[derive(Debug, Clone, Default)]
pub struct UploadState {
    pub file: Option<ResumeFile>,
    pub job_description: String,
    pub loading: bool,
    pub report: Option<Report>,
    pub analyzed_at: Option<DateTime<Utc>>,
}

impl UploadState {
    pub fn file_name(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.file_name.as_str())
    }
}
