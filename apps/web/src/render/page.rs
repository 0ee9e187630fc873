use crate::models::upload::UploadState;

use super::{render_report, Html};

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; background: #f4f6f8; margin: 0; }
.container { max-width: 760px; margin: 2rem auto; padding: 0 1rem; }
.form-card, .report-card, .plagiarism-card { background: #fff; border-radius: 8px; padding: 1rem 1.25rem; margin-bottom: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.08); }
.form-group { margin-bottom: 1rem; display: flex; flex-direction: column; gap: .4rem; }
textarea { font: inherit; padding: .5rem; }
button { padding: .6rem 1.2rem; border: 0; border-radius: 6px; background: #2f6fed; color: #fff; cursor: pointer; }
button:disabled { background: #9bb4e8; cursor: wait; }
.alert { background: #fdecea; color: #8a1c12; border-radius: 6px; padding: .75rem 1rem; margin-bottom: 1rem; }
.selected-file, .analyzed-at { color: #555; font-size: .9rem; }
.status-badge { display: inline-flex; align-items: center; gap: .4rem; padding: .2rem .6rem; border-radius: 999px; font-weight: 600; }
.status-badge.suspicious { background: #fff4e5; color: #a35200; }
.status-badge.safe { background: #e8f5e9; color: #1b5e20; }
.plagiarism-card { display: flex; gap: .75rem; align-items: flex-start; }
"#;

/// Renders the whole document: form, optional alert, then the report.
pub fn render_page(state: &UploadState, notice: Option<&str>) -> String {
    let mut html = Html::new();
    html.push(r#"<!DOCTYPE html><html lang="en"><head><meta charset="utf-8">"#);
    html.push(r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#);
    html.push("<title>Fraudulent Candidate Detection</title><style>");
    html.push(STYLES);
    html.push(r#"</style></head><body><div class="container">"#);
    html.push("<h1>Fraudulent Candidate Detection</h1>");

    if let Some(notice) = notice {
        html.push(r#"<div class="alert" role="alert">"#);
        html.text(notice);
        html.push("</div>");
    }

    upload_form(&mut html, state);

    if let Some(analyzed_at) = state.analyzed_at {
        html.push(r#"<p class="analyzed-at">Analyzed at "#);
        html.text(analyzed_at.format("%Y-%m-%d %H:%M:%S UTC").to_string());
        html.push("</p>");
    }
    html.push(render_report(state.report.as_ref()));

    html.push("</div></body></html>");
    html.finish()
}

fn upload_form(html: &mut Html, state: &UploadState) {
    html.push(r#"<div class="form-card">"#);
    html.push(r#"<form method="post" action="/submit" enctype="multipart/form-data">"#);

    html.push(r#"<div class="form-group"><label for="file">Upload Resume (PDF, DOCX)</label>"#);
    html.push(r#"<input id="file" type="file" name="file" accept=".pdf,.docx">"#);
    if let Some(name) = state.file_name() {
        html.push(r#"<span class="selected-file">Selected: "#);
        html.text(name);
        html.push("</span>");
    }
    html.push("</div>");

    html.push(r#"<div class="form-group"><label for="jd">Job Description (Optional)</label>"#);
    html.push(r#"<textarea id="jd" name="jd" rows="5" placeholder="Paste job description here...">"#);
    html.text(&state.job_description);
    html.push("</textarea></div>");

    if state.loading {
        html.push(r#"<button type="submit" disabled>Analyzing...</button>"#);
    } else {
        html.push(r#"<button type="submit">Analyze Resume</button>"#);
    }
    html.push("</form>");

    if state.loading {
        html.push(r#"<form method="post" action="/cancel"><button type="submit">Cancel</button></form>"#);
    }
    html.push("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::report::Report;
    use crate::models::upload::ResumeFile;
    use bytes::Bytes;

    #[test]
    fn test_fresh_page_has_form_and_no_report() {
        let html = render_page(&UploadState::default(), None);
        assert!(html.contains(r#"action="/submit""#));
        assert!(html.contains(r#"<button type="submit">Analyze Resume</button>"#));
        assert!(!html.contains("report-section"));
        assert!(!html.contains(r#"class="alert""#));
        assert!(!html.contains("Selected:"));
    }

    #[test]
    fn test_loading_disables_submit_and_offers_cancel() {
        let state = UploadState {
            loading: true,
            ..UploadState::default()
        };
        let html = render_page(&state, None);
        assert!(html.contains(r#"<button type="submit" disabled>Analyzing...</button>"#));
        assert!(html.contains(r#"action="/cancel""#));
    }

    #[test]
    fn test_notice_and_form_values_are_rendered() {
        let state = UploadState {
            file: Some(ResumeFile::new("cv <final>.pdf", None, Bytes::new())),
            job_description: "Rust & Go".to_string(),
            report: Some(Report::default()),
            ..UploadState::default()
        };
        let html = render_page(&state, Some("Please upload a resume."));
        assert!(html.contains(r#"<div class="alert" role="alert">Please upload a resume.</div>"#));
        assert!(html.contains("Selected: cv &lt;final&gt;.pdf"));
        assert!(html.contains(">Rust &amp; Go</textarea>"));
        assert!(html.contains("report-section"));
    }
}
