//! Renderer view model.
//!
//! A `ReportDocument` is the loosely "report-shaped" structure both HTML
//! renderers draw from. Canonical reports convert into it losslessly enough
//! for display; AI-generated JSON deserializes into it leniently, so a stray
//! number where text was expected does not throw the whole document away.

use crate::models::{Issue, SeoReport, Severity};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Verbs that make a recommendation a quick win
const ACTION_VERBS: [&str; 6] = ["improve", "fix", "optimize", "add", "remove", "update"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportDocument {
    #[serde(deserialize_with = "lenient_object")]
    pub overall: Option<DocumentOverall>,
    #[serde(deserialize_with = "lenient_categories")]
    pub categories: Vec<CategoryScore>,
    #[serde(deserialize_with = "lenient_vec")]
    pub pages: Vec<DocumentPage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentOverall {
    #[serde(deserialize_with = "lenient_score")]
    pub score: Option<u32>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: String,
    #[serde(deserialize_with = "lenient_text")]
    pub timestamp: Option<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub key_findings: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub quick_wins: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub domain_authority: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub indexation_status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub competitive_landscape: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryScore {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_score")]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentPage {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_score")]
    pub score: Option<u32>,
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    pub page_type: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub breadcrumb_path: Option<String>,
    #[serde(deserialize_with = "lenient_indexability")]
    pub indexability: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub last_modified: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub canonical_url: Option<String>,
    #[serde(deserialize_with = "lenient_vec")]
    pub details: Vec<PageDetail>,
    #[serde(deserialize_with = "lenient_issues")]
    pub issues: Vec<DocumentIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageDetail {
    #[serde(deserialize_with = "lenient_string")]
    pub label: String,
    #[serde(deserialize_with = "lenient_string")]
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentIssue {
    #[serde(deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub severity: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub impact: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub recommendation: Option<String>,
}

impl ReportDocument {
    /// A document with an overview section and nothing in it
    pub fn empty() -> Self {
        Self {
            overall: Some(DocumentOverall::default()),
            ..Default::default()
        }
    }
}

impl From<&Issue> for DocumentIssue {
    fn from(issue: &Issue) -> Self {
        Self {
            title: Some(issue.title.clone()),
            severity: Some(issue.severity.as_str().to_string()),
            description: Some(issue.description.clone()),
            impact: Some(issue.impact.clone()),
            recommendation: Some(issue.recommendation.clone()),
        }
    }
}

impl From<&SeoReport> for ReportDocument {
    fn from(report: &SeoReport) -> Self {
        let key_findings = report
            .recommendations
            .iter()
            .filter(|issue| issue.severity == Severity::High)
            .map(|issue| format!("{}: {}", issue.title, issue.description))
            .collect();

        let quick_wins = report
            .recommendations
            .iter()
            .filter(|issue| is_actionable(&issue.recommendation))
            .map(|issue| issue.recommendation.clone())
            .collect();

        let categories = [
            ("Technical SEO", report.technical.score),
            ("On-Page SEO", report.on_page.score),
            ("Content", report.content.score),
            ("Mobile", report.mobile.score),
            ("Performance", report.performance.score),
        ]
        .into_iter()
        .map(|(name, score)| CategoryScore {
            name: name.to_string(),
            score: Some(score),
        })
        .collect();

        let pages = report
            .pages
            .iter()
            .map(|page| {
                // Analyzer findings live on the categories, not on the page
                let issues = if page.issues.is_empty() {
                    &report.recommendations
                } else {
                    &page.issues
                };

                DocumentPage {
                    title: Some(page.title.clone()).filter(|title| !title.is_empty()),
                    url: Some(page.url.clone()).filter(|url| !url.is_empty()),
                    score: Some(page.score),
                    indexability: Some(
                        if report.technical.robots_txt {
                            "Crawlable (robots.txt present)"
                        } else {
                            "Unverified (robots.txt missing)"
                        }
                        .to_string(),
                    ),
                    details: vec![
                        detail("Word Count", page.content.word_count),
                        detail("H1 Tags", page.headings.h1.len()),
                        detail("H2 Tags", page.headings.h2.len()),
                        detail("H3 Tags", page.headings.h3.len()),
                        detail(
                            "Images With Alt Text",
                            format!("{} of {}", page.images.with_alt, page.images.total),
                        ),
                        detail("Internal Links", page.links.internal.count),
                        detail("External Links", page.links.external.count),
                    ],
                    issues: issues.iter().map(DocumentIssue::from).collect(),
                    ..Default::default()
                }
            })
            .collect();

        Self {
            overall: Some(DocumentOverall {
                score: Some(report.overall.score),
                summary: report.overall.summary.clone(),
                timestamp: Some(report.overall.timestamp.clone()),
                key_findings,
                quick_wins,
                ..Default::default()
            }),
            categories,
            pages,
        }
    }
}

fn detail(label: &str, value: impl ToString) -> PageDetail {
    PageDetail {
        label: label.to_string(),
        value: value.to_string(),
    }
}

/// Whether the text reads like something the site owner can act on right away
pub fn is_actionable(text: &str) -> bool {
    let lower = text.to_lowercase();
    ACTION_VERBS.iter().any(|verb| lower.contains(verb))
}

fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

fn value_to_score(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .filter(|score| *score >= 0.0)
            .map(|score| score.round() as u32),
        // "85", "85/100"
        Value::String(text) => {
            let digits: String = text
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_text(deserializer)?.unwrap_or_default())
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_score(&Value::deserialize(deserializer)?))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items.into_iter().filter_map(list_item_text).collect(),
        Value::Null => Vec::new(),
        other => value_to_text(other).into_iter().collect(),
    })
}

/// Findings sometimes arrive as `{title, description}` objects
fn list_item_text(item: Value) -> Option<String> {
    match item {
        Value::Object(map) => {
            let title = map.get("title").and_then(Value::as_str);
            let description = map.get("description").and_then(Value::as_str);
            match (title, description) {
                (Some(title), Some(description)) => Some(format!("{}: {}", title, description)),
                (Some(text), None) | (None, Some(text)) => Some(text.to_string()),
                (None, None) => value_to_text(Value::Object(map)),
            }
        }
        other => value_to_text(other),
    }
}

fn lenient_indexability<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(mut map) => map.remove("status").and_then(value_to_text),
        other => value_to_text(other),
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Keeps the entries that parse and drops the rest
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Accepts `[{name, score}]` or a `{"technical": 80}` map
fn lenient_categories<'de, D>(deserializer: D) -> Result<Vec<CategoryScore>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(map) => map
            .into_iter()
            .map(|(name, score)| CategoryScore {
                name,
                score: value_to_score(&score),
            })
            .collect(),
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_issues<'de, D>(deserializer: D) -> Result<Vec<DocumentIssue>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).ok(),
            Value::Null => None,
            other => Some(DocumentIssue {
                description: value_to_text(other),
                ..Default::default()
            }),
        })
        .collect())
}
