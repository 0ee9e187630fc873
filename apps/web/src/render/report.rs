use crate::models::report::{FraudIndicator, IndicatorStatus, PlagiarismSummary, Report};

use super::Html;

const ICON_WARNING: &str = "&#9888;";
const ICON_CHECK: &str = "&#10004;";
const ICON_FILE: &str = "&#128196;";

/// Renders the report section. An absent report renders nothing, and any
/// absent sequence renders as an empty block.
pub fn render_report(report: Option<&Report>) -> String {
    let Some(report) = report else {
        return String::new();
    };

    let mut html = Html::new();
    html.push(r#"<div class="report-section"><h2>Fraud Report</h2>"#);

    html.push(r#"<div class="report-block"><h3>Experience Check</h3>"#);
    for indicator in report.fraud_indicators.iter().flatten() {
        indicator_card(&mut html, indicator);
    }
    html.push("</div>");

    html.push(r#"<div class="report-block"><h3>Plagiarism Summary</h3>"#);
    match &report.plagiarism_summary {
        Some(PlagiarismSummary::Entries(entries)) => {
            for entry in entries {
                html.push(r#"<div class="plagiarism-card"><span class="plagiarism-icon">"#);
                html.push(ICON_FILE);
                html.push("</span><div><p><strong>File:</strong> ");
                html.text(&entry.source_file);
                html.push("</p><p><strong>Score:</strong> ");
                if let Some(score) = &entry.score {
                    html.text(score.to_string());
                }
                html.push("</p></div></div>");
            }
        }
        Some(PlagiarismSummary::Text(summary)) => {
            html.push(r#"<p class="plagiarism-text">"#);
            html.text(summary);
            html.push("</p>");
        }
        None => {}
    }
    html.push("</div>");

    text_card(
        &mut html,
        "similarity-card",
        "Resume vs JD Similarity",
        report.resume_vs_jd_similarity.as_deref(),
    );

    if let Some(anomalies) = report
        .education_anomalies
        .as_deref()
        .filter(|a| !a.is_empty())
    {
        html.push(r#"<div class="report-card education-card"><h3>Education Anomalies</h3><ul>"#);
        for anomaly in anomalies {
            html.push("<li>");
            html.text(anomaly);
            html.push("</li>");
        }
        html.push("</ul></div>");
    }

    text_card(
        &mut html,
        "final-card",
        "Final Recommendation",
        report.final_recommendation.as_deref(),
    );

    html.push("</div>");
    html.finish()
}

fn indicator_card(html: &mut Html, indicator: &FraudIndicator) {
    html.push(r#"<div class="report-card">"#);
    status_badge(html, &indicator.status);
    html.push("<p><strong>Reasoning:</strong> ");
    html.text(&indicator.reasoning);
    html.push("</p>");
    if let Some(flags) = indicator.visible_flags() {
        html.push("<p><strong>Flags:</strong> ");
        html.text(flags.join(", "));
        html.push("</p>");
    }
    html.push("</div>");
}

fn status_badge(html: &mut Html, status: &IndicatorStatus) {
    let (class, icon) = if status.is_suspicious() {
        ("suspicious", ICON_WARNING)
    } else {
        ("safe", ICON_CHECK)
    };
    html.push(format!(
        r#"<div class="status-badge {class}"><span class="status-icon">{icon}</span><span class="status-text">"#
    ));
    html.text(status.as_str());
    html.push("</span></div>");
}

fn text_card(html: &mut Html, class: &str, title: &str, body: Option<&str>) {
    html.push(format!(
        r#"<div class="report-card {class}"><h3>{title}</h3><p>"#
    ));
    html.text(body.unwrap_or_default());
    html.push("</p></div>");
}
