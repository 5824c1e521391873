//! Best-effort extraction of a report document from free text.
//!
//! AI-generated audits come back as prose, sometimes with a JSON payload
//! embedded. Three tiers are tried in order: a fenced code block, a bare JSON
//! object, and finally a line scanner that rebuilds an approximate document
//! from section headers and bullet points.

use crate::document::{DocumentIssue, DocumentOverall, DocumentPage, ReportDocument, is_actionable};
use crate::models::SeoReport;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use url::Url;

static JSON_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```json\s*(.*?)\s*```").expect("invalid json fence regex"));
static ANY_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*(.*?)\s*```").expect("invalid fence regex")
});
static SCORE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Score:\s*(\d+)/100").expect("invalid score regex"));

const SYNTHETIC_IMPACT: &str = "May affect search rankings and user experience";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseFailure {
    #[error("no fenced code block found")]
    NoFencedBlock,

    #[error("no JSON object found")]
    NoJsonObject,

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("no recognizable report structure")]
    NoStructure,
}

/// Extract a document, degrading through every tier. Never fails.
pub fn extract_document(text: &str, url: Option<&str>) -> ReportDocument {
    extract_fenced_json(text)
        .or_else(|failure| {
            tracing::debug!(%failure, "Fenced JSON extraction failed, trying bare JSON");
            extract_bare_json(text)
        })
        .or_else(|failure| {
            tracing::warn!(%failure, "Could not parse JSON from raw output, scanning text");
            scan_lines(text, url)
        })
        .unwrap_or_else(|failure| {
            tracing::debug!(%failure, "No report structure found in text");
            ReportDocument::empty()
        })
}

/// Tier 1: a ```` ```json ```` block, or failing that any fenced block
pub fn extract_fenced_json(text: &str) -> Result<ReportDocument, ParseFailure> {
    let block = JSON_FENCE
        .captures(text)
        .or_else(|| ANY_FENCE.captures(text))
        .and_then(|captures| captures.get(1))
        .ok_or(ParseFailure::NoFencedBlock)?;

    parse_document(block.as_str())
}

/// Tier 2: the whole text as JSON, then the outermost `{...}` slice
pub fn extract_bare_json(text: &str) -> Result<ReportDocument, ParseFailure> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        if let Ok(document) = parse_document(trimmed) {
            return Ok(document);
        }
    }

    let start = trimmed.find('{').ok_or(ParseFailure::NoJsonObject)?;
    let end = trimmed.rfind('}').ok_or(ParseFailure::NoJsonObject)?;
    if end <= start {
        return Err(ParseFailure::NoJsonObject);
    }

    parse_document(&trimmed[start..=end])
}

/// Parse JSON text as either a canonical report or a loose document
pub fn parse_document(json: &str) -> Result<ReportDocument, ParseFailure> {
    let value: Value =
        serde_json::from_str(json.trim()).map_err(|e| ParseFailure::InvalidJson(e.to_string()))?;

    let value = match value {
        Value::Object(mut map) if map.contains_key("seoReport") => {
            map.remove("seoReport").unwrap_or_default()
        }
        other => other,
    };

    if !value.is_object() {
        return Err(ParseFailure::NoJsonObject);
    }

    if let Ok(report) = serde_json::from_value::<SeoReport>(value.clone()) {
        return Ok(ReportDocument::from(&report));
    }

    serde_json::from_value(value).map_err(|e| ParseFailure::InvalidJson(e.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Summary,
    KeyFindings,
    Technical,
    Content,
    OnPage,
    Performance,
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        if line.contains("Critical Issues") || line.contains("Key Findings") {
            Some(Section::KeyFindings)
        } else if line.contains("Technical SEO") {
            Some(Section::Technical)
        } else if line.contains("Content Analysis") {
            Some(Section::Content)
        } else if line.contains("On-Page SEO") {
            Some(Section::OnPage)
        } else if line.contains("Performance") {
            Some(Section::Performance)
        } else {
            None
        }
    }

    fn issue_label(self) -> Option<&'static str> {
        match self {
            Section::Technical => Some("Technical"),
            Section::Content => Some("Content"),
            Section::OnPage => Some("On-Page"),
            Section::Performance => Some("Performance"),
            _ => None,
        }
    }
}

/// Tier 3: rebuild findings from headers and `- `/`* ` bullets
pub fn scan_lines(text: &str, url: Option<&str>) -> Result<ReportDocument, ParseFailure> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut overall = DocumentOverall::default();
    let mut page: Option<DocumentPage> = None;
    let mut section = Section::None;
    let mut recognized = false;

    for (index, line) in lines.iter().enumerate() {
        if line.is_empty() {
            continue;
        }

        if line.contains("SEO Analysis for") || line.contains("Overall Assessment") {
            section = Section::Summary;
            overall.summary = collect_summary(&lines[index + 1..]);
            recognized = true;
        }

        if line.starts_with("Score:") {
            if let Some(score) = SCORE_LINE
                .captures(line)
                .and_then(|captures| captures[1].parse::<u32>().ok())
            {
                overall.score = Some(score);
                recognized = true;
            }
        }

        // Bullets win over headers: "- Performance is slow" is an item, not a section
        if let Some(item) = bullet(line) {
            if section == Section::KeyFindings {
                overall.key_findings.push(item.to_string());
                recognized = true;
            } else if let Some(label) = section.issue_label() {
                if is_actionable(item) {
                    overall.quick_wins.push(item.to_string());
                }

                let page = page.get_or_insert_with(|| DocumentPage {
                    title: url.and_then(hostname),
                    url: url.map(str::to_string),
                    score: overall.score,
                    ..Default::default()
                });
                page.issues.push(DocumentIssue {
                    title: Some(format!("{} Issue", label)),
                    severity: Some(severity_from_text(item).to_string()),
                    description: Some(item.to_string()),
                    impact: Some(SYNTHETIC_IMPACT.to_string()),
                    recommendation: Some(recommendation_from_issue(item)),
                });
                recognized = true;
            }
            continue;
        }

        if let Some(next) = Section::from_header(line) {
            section = next;
        }
    }

    if !recognized {
        return Err(ParseFailure::NoStructure);
    }

    Ok(ReportDocument {
        overall: Some(overall),
        categories: Vec::new(),
        pages: page.into_iter().collect(),
    })
}

fn bullet(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .map(str::trim)
}

/// Lines after a summary header, up to the next score or section line
fn collect_summary(lines: &[&str]) -> String {
    const STOPS: [&str; 6] = [
        "Score:",
        "#",
        "Technical SEO",
        "Content Analysis",
        "On-Page SEO",
        "Performance",
    ];

    lines
        .iter()
        .filter(|line| !line.is_empty())
        .take_while(|line| !STOPS.iter().any(|stop| line.starts_with(stop)))
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

fn hostname(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
}

pub fn severity_from_text(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    if has_any(&["critical", "severe", "broken", "missing", "urgent", "error"]) {
        "high"
    } else if has_any(&["minor", "consider", "could", "might", "suggestion"]) {
        "low"
    } else {
        "medium"
    }
}

pub fn recommendation_from_issue(issue: &str) -> String {
    if let Some((_, advice)) = issue.split_once("Recommendation:") {
        let advice = advice.trim();
        if !advice.is_empty() {
            return advice.to_string();
        }
    }

    let lower = issue.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|word| lower.contains(word));

    let advice = if has_any(&["broken"]) {
        "Fix broken links or resources to ensure proper user experience and crawlability."
    } else if has_any(&["missing"]) {
        "Add the missing elements to improve SEO and user experience."
    } else if has_any(&["slow", "speed", "performance"]) {
        "Optimize page loading speed by compressing images, minifying code, and leveraging browser caching."
    } else if has_any(&["meta", "title", "description"]) {
        "Optimize meta tags with relevant keywords and compelling descriptions to improve click-through rates."
    } else if has_any(&["mobile", "responsive"]) {
        "Ensure the website is fully responsive and provides a good experience on all device types."
    } else if has_any(&["content", "thin"]) {
        "Enhance content quality and depth to provide more value to users and improve search rankings."
    } else if has_any(&["heading", "h1", "h2"]) {
        "Implement a proper heading structure with relevant keywords to improve content hierarchy and SEO."
    } else {
        "Address this issue to improve overall SEO performance and user experience."
    };

    advice.to_string()
}
