use crate::document::{DocumentIssue, DocumentOverall, DocumentPage, ReportDocument};
use crate::extractor;
use crate::models::SeoReport;
use crate::scoring::ScoreTier;
use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::fmt::Write;
use url::Url;

static DOMAIN_IN_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+)").expect("invalid domain regex")
});

const NOT_SPECIFIED: &str = "Not specified";

/// What a report is rendered from
#[derive(Debug, Clone)]
pub enum AuditSource {
    /// A canonical report produced by the audit pipeline
    Report(Box<SeoReport>),
    /// Free text returned by an AI audit, possibly with JSON inside
    Freeform {
        raw_output: String,
        url: Option<String>,
    },
}

/// Stored output of an AI-generated audit
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAuditResult {
    #[serde(default)]
    pub url: Option<String>,
    pub gemini_audit: AiAuditOutput,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAuditOutput {
    #[serde(default)]
    pub raw_output: String,
}

impl AuditSource {
    /// Classify the contents of a file or request body
    pub fn from_json_text(text: &str) -> Self {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
            let report_value = value.get("seoReport").cloned().unwrap_or_else(|| value.clone());
            if let Ok(report) = serde_json::from_value::<SeoReport>(report_value) {
                return AuditSource::Report(Box::new(report));
            }

            if let Ok(result) = serde_json::from_value::<AiAuditResult>(value) {
                return AuditSource::Freeform {
                    raw_output: result.gemini_audit.raw_output,
                    url: result.url,
                };
            }
        }

        AuditSource::Freeform {
            raw_output: text.to_string(),
            url: None,
        }
    }
}

/// Render either kind of audit as a standalone HTML document
pub fn convert_to_html_report(source: &AuditSource) -> String {
    match source {
        AuditSource::Report(report) => render_report(report),
        AuditSource::Freeform { raw_output, url } => render_freeform(raw_output, url.as_deref()),
    }
}

pub fn render_report(report: &SeoReport) -> String {
    render_document(&ReportDocument::from(report))
}

/// Render AI output; unparseable input still yields a (mostly empty) report
pub fn render_freeform(raw_output: &str, url: Option<&str>) -> String {
    render_document(&extractor::extract_document(raw_output, url))
}

pub fn render_document(document: &ReportDocument) -> String {
    let site = site_name(document);
    let generated = document
        .overall
        .as_ref()
        .and_then(|overall| overall.timestamp.as_deref())
        .and_then(format_timestamp)
        .unwrap_or_else(|| Local::now().format("%-m/%-d/%Y").to_string());

    let mut html = String::with_capacity(16 * 1024);
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>SEO Audit: {site}</title>
    <style>{styles}</style>
</head>
<body>
    <div class="container">
        <header>
            <h1>SEO Audit Report</h1>
            <p>{site}</p>
        </header>
        <div class="date">
            <p>Generated: {generated}</p>
        </div>"#,
        site = escape_html(&site),
        styles = STYLES,
        generated = escape_html(&generated),
    );

    if let Some(overall) = &document.overall {
        write_overview(&mut html, overall, document);
    }

    if !document.pages.is_empty() {
        html.push_str(
            r#"
        <div class="section">
            <h2>Page Analysis</h2>"#,
        );
        for page in &document.pages {
            write_page(&mut html, page);
        }
        html.push_str("\n        </div>");
    }

    let _ = write!(
        html,
        r#"
        <div class="footer">
            <p>Generated by SEO Audit Tool</p>
        </div>
    </div>
    <script>{script}</script>
</body>
</html>
"#,
        script = TOGGLE_SCRIPT,
    );

    html
}

fn write_overview(html: &mut String, overall: &DocumentOverall, document: &ReportDocument) {
    let (score_text, score_class) = score_badge(overall.score);
    let _ = write!(
        html,
        r#"
        <div class="section">
            <h2>Overview</h2>
            <div class="score-container">
                <div class="score-box">
                    <div class="score {score_class}">{score_text}</div>
                    <div class="score-details">
                        <h3>Overall Score</h3>
                        <p>Based on technical SEO, content, and user experience factors</p>
                    </div>
                </div>
            </div>
            <div class="summary">
                <h3>Executive Summary</h3>
                <p>{summary}</p>
            </div>
            <div class="meta-info">
                <div class="meta-box">
                    <h4>Domain Authority</h4>
                    <p>{authority}</p>
                </div>
                <div class="meta-box">
                    <h4>Indexation Status</h4>
                    <p>{indexation}</p>
                </div>
                <div class="meta-box">
                    <h4>Competitive Landscape</h4>
                    <p>{landscape}</p>
                </div>
            </div>"#,
        summary = escape_html(&overall.summary),
        authority = or_not_specified(overall.domain_authority.as_deref()),
        indexation = or_not_specified(overall.indexation_status.as_deref()),
        landscape = or_not_specified(overall.competitive_landscape.as_deref()),
    );

    if !document.categories.is_empty() {
        html.push_str(
            r#"
            <div class="findings-section">
                <h3>Category Scores</h3>
                <div class="category-grid">"#,
        );
        for category in &document.categories {
            let (score_text, score_class) = score_badge(category.score);
            let _ = write!(
                html,
                r#"
                    <div class="category-card">
                        <div class="page-score {score_class}">{score_text}</div>
                        <p>{name}</p>
                    </div>"#,
                name = escape_html(&category.name),
            );
        }
        html.push_str("\n                </div>\n            </div>");
    }

    write_list(
        html,
        "Key Findings",
        "findings-list",
        &overall.key_findings,
        "No key findings provided",
    );
    write_list(
        html,
        "Quick Wins",
        "quick-wins-list",
        &overall.quick_wins,
        "No quick wins provided",
    );

    html.push_str("\n        </div>");
}

fn write_list(html: &mut String, heading: &str, class: &str, items: &[String], empty: &str) {
    let entries = if items.is_empty() {
        format!("<li>{}</li>", empty)
    } else {
        items
            .iter()
            .map(|item| format!("<li>{}</li>", escape_html(item)))
            .collect()
    };

    let _ = write!(
        html,
        r#"
            <div class="findings-section">
                <h3>{heading}</h3>
                <ul class="{class}">{entries}</ul>
            </div>"#,
    );
}

fn write_page(html: &mut String, page: &DocumentPage) {
    let (score_text, score_class) = score_badge(page.score);
    let _ = write!(
        html,
        r#"
            <div class="page-card">
                <div class="page-header">
                    <div class="page-title">
                        <h3>{title}</h3>
                        <p>{url}</p>
                    </div>
                    <div class="page-score {score_class}">{score_text}</div>
                </div>
                <div class="page-body">
                    <div class="page-meta">
                        <div class="page-meta-item">
                            <h4>Page Type</h4>
                            <p>{page_type}</p>
                        </div>
                        <div class="page-meta-item">
                            <h4>Breadcrumb Path</h4>
                            <p>{breadcrumb}</p>
                        </div>
                        <div class="page-meta-item">
                            <h4>Indexability</h4>
                            <p>{indexability}</p>
                        </div>
                    </div>
                    <button class="toggle-btn" data-label="Technical Details" onclick="toggleContent(this)">View Technical Details</button>
                    <div class="toggle-content">
                        <div class="page-meta">
                            <div class="page-meta-item">
                                <h4>Last Modified</h4>
                                <p>{last_modified}</p>
                            </div>
                            <div class="page-meta-item">
                                <h4>Canonical URL</h4>
                                <p>{canonical}</p>
                            </div>"#,
        title = escape_html(page.title.as_deref().unwrap_or("Page")),
        url = escape_html(page.url.as_deref().unwrap_or("URL not specified")),
        page_type = or_not_specified(page.page_type.as_deref()),
        breadcrumb = or_not_specified(page.breadcrumb_path.as_deref()),
        indexability = or_not_specified(page.indexability.as_deref()),
        last_modified = or_not_specified(page.last_modified.as_deref()),
        canonical = or_not_specified(page.canonical_url.as_deref()),
    );

    for detail in &page.details {
        let _ = write!(
            html,
            r#"
                            <div class="page-meta-item">
                                <h4>{label}</h4>
                                <p>{value}</p>
                            </div>"#,
            label = escape_html(&detail.label),
            value = escape_html(&detail.value),
        );
    }

    let _ = write!(
        html,
        r#"
                        </div>
                    </div>
                    <div class="issues-container">
                        <h3>Issues Identified ({count})</h3>"#,
        count = page.issues.len(),
    );

    if page.issues.is_empty() {
        html.push_str("\n                        <p>No issues identified for this page.</p>");
    } else {
        html.push_str(
            r#"
                        <button class="toggle-btn" data-label="Issues" onclick="toggleContent(this)">Hide Issues</button>
                        <div class="toggle-content show">"#,
        );
        for issue in &page.issues {
            write_issue(html, issue);
        }
        html.push_str("\n                        </div>");
    }

    html.push_str(
        r#"
                    </div>
                </div>
            </div>"#,
    );
}

fn write_issue(html: &mut String, issue: &DocumentIssue) {
    let severity = normalize_severity(issue.severity.as_deref());
    let _ = write!(
        html,
        r#"
                            <div class="issue-card">
                                <div class="issue-header">
                                    <div class="issue-title">{title}</div>
                                    <div class="issue-severity severity-{severity}">{label}</div>
                                </div>
                                <div class="issue-description">{description}</div>
                                <div class="issue-impact"><strong>Impact:</strong> {impact}</div>
                                <div class="issue-recommendation"><strong>Recommendation:</strong> {recommendation}</div>
                            </div>"#,
        title = escape_html(issue.title.as_deref().unwrap_or("Issue")),
        label = capitalize(severity),
        description = escape_html(
            issue
                .description
                .as_deref()
                .unwrap_or("No description provided")
        ),
        impact = escape_html(issue.impact.as_deref().unwrap_or("Impact not specified")),
        recommendation = escape_html(
            issue
                .recommendation
                .as_deref()
                .unwrap_or("No recommendation provided")
        ),
    );
}

/// Badge text and CSS class; an unknown score shows `?` in the neutral tier
pub fn score_badge(score: Option<u32>) -> (String, &'static str) {
    match score {
        Some(score) => (score.to_string(), ScoreTier::from_score(score).css_class()),
        None => ("?".to_string(), ScoreTier::Medium.css_class()),
    }
}

fn normalize_severity(severity: Option<&str>) -> &'static str {
    match severity.map(|s| s.trim().to_lowercase()).as_deref() {
        Some("high") | Some("critical") => "high",
        Some("low") => "low",
        _ => "medium",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Header name: a domain mentioned in the summary, else the first page's host
fn site_name(document: &ReportDocument) -> String {
    let from_summary = document
        .overall
        .as_ref()
        .and_then(|overall| DOMAIN_IN_TEXT.captures(&overall.summary))
        .map(|captures| captures[1].to_string());

    from_summary
        .or_else(|| {
            document
                .pages
                .iter()
                .filter_map(|page| page.url.as_deref())
                .find_map(|url| Url::parse(url).ok()?.host_str().map(str::to_string))
        })
        .unwrap_or_else(|| "Website".to_string())
}

fn format_timestamp(timestamp: &str) -> Option<String> {
    DateTime::parse_from_rfc3339(timestamp)
        .ok()
        .map(|date| date.format("%B %-d, %Y at %I:%M %p").to_string())
}

fn or_not_specified(value: Option<&str>) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => escape_html(text),
        _ => NOT_SPECIFIED.to_string(),
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

const TOGGLE_SCRIPT: &str = r#"
        function toggleContent(button) {
            const content = button.nextElementSibling;
            content.classList.toggle('show');
            const label = button.dataset.label || 'Details';
            button.textContent = (content.classList.contains('show') ? 'Hide ' : 'View ') + label;
        }
    "#;

const STYLES: &str = r#"
        :root {
            --primary: #8B4513;
            --secondary: #D2B48C;
            --light: #F5F5DC;
            --dark: #3E2723;
            --white: #FFFFFF;
            --gray: #E0E0E0;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            line-height: 1.6;
            color: #333;
            background-color: var(--light);
            padding: 20px;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background-color: var(--white);
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
            overflow: hidden;
        }
        header { background-color: var(--primary); color: var(--white); padding: 30px; text-align: center; }
        header h1 { font-size: 2.5rem; margin-bottom: 10px; }
        header p { font-size: 1.2rem; opacity: 0.9; }
        .date { background-color: var(--secondary); color: var(--dark); text-align: right; padding: 10px 30px; font-weight: 500; }
        .section { padding: 30px; border-bottom: 1px solid var(--gray); }
        .section h2 { color: var(--primary); margin-bottom: 20px; border-bottom: 2px solid var(--secondary); padding-bottom: 10px; }
        .score-container { display: flex; gap: 20px; margin-bottom: 20px; flex-wrap: wrap; }
        .score-box { background-color: var(--light); border-radius: 8px; padding: 20px; flex: 1; min-width: 300px; display: flex; align-items: center; }
        .score {
            font-size: 3.5rem;
            font-weight: bold;
            width: 100px;
            height: 100px;
            border-radius: 50%;
            display: flex;
            align-items: center;
            justify-content: center;
            margin-right: 20px;
            box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1);
        }
        .score-high { background-color: #E8F5E9; color: #2E7D32; }
        .score-medium { background-color: #FFF8E1; color: #FF8F00; }
        .score-low { background-color: #FFEBEE; color: #C62828; }
        .score-details { flex: 1; }
        .score-details h3 { color: var(--dark); margin-bottom: 10px; }
        .summary { background-color: var(--white); padding: 20px; border-radius: 8px; box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1); margin-bottom: 20px; }
        .meta-info { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 20px; margin-bottom: 30px; }
        .meta-box { background-color: var(--light); padding: 15px; border-radius: 8px; }
        .meta-box h4 { color: var(--primary); margin-bottom: 10px; border-bottom: 1px solid var(--secondary); padding-bottom: 5px; }
        .category-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 15px; }
        .category-card { background-color: var(--light); border-radius: 8px; padding: 15px; display: flex; flex-direction: column; align-items: center; gap: 10px; }
        .findings-section h3 { color: var(--primary); margin: 20px 0 15px; }
        .findings-list, .quick-wins-list { list-style-type: none; }
        .findings-list li { background-color: var(--light); margin-bottom: 10px; padding: 15px; border-radius: 5px; border-left: 5px solid var(--secondary); }
        .quick-wins-list li { background-color: #E8F5E9; margin-bottom: 10px; padding: 15px; border-radius: 5px; border-left: 5px solid #81C784; }
        .page-card { background-color: var(--white); margin-bottom: 20px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1); overflow: hidden; }
        .page-header { background-color: var(--secondary); padding: 15px 20px; display: flex; justify-content: space-between; align-items: center; }
        .page-title { flex: 1; }
        .page-title h3 { color: var(--dark); margin-bottom: 5px; }
        .page-title p { color: var(--dark); opacity: 0.8; font-size: 0.9rem; }
        .page-score {
            font-size: 1.8rem;
            font-weight: bold;
            width: 60px;
            height: 60px;
            border-radius: 50%;
            display: flex;
            align-items: center;
            justify-content: center;
            box-shadow: 0 2px 5px rgba(0, 0, 0, 0.1);
        }
        .page-body { padding: 20px; }
        .page-meta { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 15px; margin-bottom: 20px; }
        .page-meta-item { background-color: var(--light); padding: 10px; border-radius: 5px; }
        .page-meta-item h4 { font-size: 0.9rem; color: var(--dark); margin-bottom: 5px; }
        .issues-container { margin-top: 20px; }
        .issue-card { background-color: var(--light); border-radius: 5px; padding: 15px; margin-bottom: 15px; }
        .issue-header { display: flex; justify-content: space-between; margin-bottom: 10px; }
        .issue-title { font-weight: bold; color: var(--dark); }
        .issue-severity { padding: 3px 8px; border-radius: 20px; font-size: 0.8rem; font-weight: bold; }
        .severity-high { background-color: #FFEBEE; color: #C62828; }
        .severity-medium { background-color: #FFF8E1; color: #FF8F00; }
        .severity-low { background-color: #E8F5E9; color: #2E7D32; }
        .issue-description, .issue-impact { margin-bottom: 10px; }
        .issue-impact { font-style: italic; }
        .issue-recommendation { background-color: #E3F2FD; padding: 10px; border-radius: 5px; border-left: 4px solid #2196F3; }
        .toggle-btn { background-color: var(--secondary); border: none; color: var(--dark); padding: 10px 15px; border-radius: 5px; cursor: pointer; margin-bottom: 10px; font-weight: bold; }
        .toggle-content { display: none; }
        .show { display: block; }
        .footer { text-align: center; padding: 20px; background-color: var(--secondary); color: var(--dark); }
        @media (max-width: 768px) {
            .page-header { flex-direction: column; }
            .page-score { margin-top: 10px; }
        }
    "#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CategoryScore, PageDetail};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn test_score_badge() {
        assert_eq!(score_badge(Some(85)), ("85".to_string(), "score-high"));
        assert_eq!(score_badge(Some(60)), ("60".to_string(), "score-medium"));
        assert_eq!(score_badge(Some(0)), ("0".to_string(), "score-low"));
        assert_eq!(score_badge(None), ("?".to_string(), "score-medium"));
    }

    #[test]
    fn test_normalize_severity() {
        assert_eq!(normalize_severity(Some("HIGH")), "high");
        assert_eq!(normalize_severity(Some("low")), "low");
        assert_eq!(normalize_severity(Some("\" onmouseover=")), "medium");
        assert_eq!(normalize_severity(None), "medium");
    }

    #[test]
    fn test_site_name_sources() {
        let mut document = ReportDocument::empty();
        assert_eq!(site_name(&document), "Website");

        document.pages.push(DocumentPage {
            url: Some("https://shop.example.org/home".to_string()),
            ..Default::default()
        });
        assert_eq!(site_name(&document), "shop.example.org");

        if let Some(overall) = document.overall.as_mut() {
            overall.summary = "Audit of liberty-beans.com completed".to_string();
        }
        assert_eq!(site_name(&document), "liberty-beans.com");
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2026-03-05T14:07:00.000Z").as_deref(),
            Some("March 5, 2026 at 02:07 PM")
        );
        assert_eq!(format_timestamp("yesterday"), None);
    }

    #[test]
    fn test_document_escapes_untrusted_text() {
        let document = ReportDocument {
            overall: Some(DocumentOverall {
                summary: "<b>bold</b>".to_string(),
                key_findings: vec!["<img src=x onerror=alert(1)>".to_string()],
                ..Default::default()
            }),
            ..Default::default()
        };
        let html = render_document(&document);

        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<img src=x"));
    }

    #[test]
    fn test_page_without_issues() {
        let document = ReportDocument {
            overall: None,
            categories: Vec::new(),
            pages: vec![DocumentPage::default()],
        };
        let html = render_document(&document);

        assert!(!html.contains("<h2>Overview</h2>"));
        assert!(html.contains("No issues identified for this page."));
        assert!(html.contains("URL not specified"));
        assert!(html.contains(r#"<div class="page-score score-medium">?</div>"#));
    }

    #[test]
    fn test_categories_and_details_rendered() {
        let document = ReportDocument {
            overall: Some(DocumentOverall::default()),
            categories: vec![CategoryScore {
                name: "Technical SEO".to_string(),
                score: Some(75),
            }],
            pages: vec![DocumentPage {
                details: vec![PageDetail {
                    label: "Word Count".to_string(),
                    value: "812".to_string(),
                }],
                ..Default::default()
            }],
        };
        let html = render_document(&document);

        assert!(html.contains(r#"<div class="page-score score-medium">75</div>"#));
        assert!(html.contains("<h4>Word Count</h4>"));
        assert!(html.contains("<p>812</p>"));
    }

    #[test]
    fn test_from_text_classification() {
        let ai = r#"{"url": "https://a.test", "geminiAudit": {"rawOutput": "Score: 50/100"}}"#;
        match AuditSource::from_json_text(ai) {
            AuditSource::Freeform { raw_output, url } => {
                assert_eq!(raw_output, "Score: 50/100");
                assert_eq!(url.as_deref(), Some("https://a.test"));
            }
            other => panic!("unexpected source: {:?}", other),
        }

        match AuditSource::from_json_text("## Key Findings\n- plain") {
            AuditSource::Freeform { raw_output, url } => {
                assert!(raw_output.starts_with("## Key Findings"));
                assert!(url.is_none());
            }
            other => panic!("unexpected source: {:?}", other),
        }
    }
}
