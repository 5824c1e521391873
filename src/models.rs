use serde::{Deserialize, Serialize};

/// One crawled page as delivered by the crawler.
/// Every field defaults when absent so ingestion happens in one place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebsiteSnapshot {
    pub url: String,
    pub title: String,
    pub description: String,
    pub headings: Headings,
    pub images: ImageStats,
    pub links: LinkStats,
    pub word_count: u32,
    /// Visible page text, used for the readability estimate
    pub text_content: String,
    pub technical: TechnicalFlags,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageStats {
    pub total: u32,
    pub with_alt: u32,
    pub without_alt: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkStats {
    pub internal_count: u32,
    pub external_count: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalFlags {
    pub ssl: bool,
    pub robots_txt: bool,
    pub sitemap: bool,
    pub mobile_friendly: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort weight used when ranking recommendations
    pub fn weight(self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub severity: Severity,
    pub description: String,
    pub impact: String,
    pub recommendation: String,
}

impl Issue {
    pub fn new(
        title: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
        impact: impl Into<String>,
        recommendation: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            severity,
            description: description.into(),
            impact: impact.into(),
            recommendation: recommendation.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presence {
    Present,
    Missing,
}

impl From<bool> for Presence {
    fn from(present: bool) -> Self {
        if present {
            Presence::Present
        } else {
            Presence::Missing
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crawlability {
    pub robots_txt: Presence,
    pub sitemap_xml: Presence,
    pub crawl_errors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    pub https: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalResult {
    pub score: u32,
    pub ssl: bool,
    pub mobile_friendly: bool,
    pub robots_txt: bool,
    pub sitemap: bool,
    pub issues: Vec<Issue>,
    pub crawlability: Crawlability,
    pub security: Security,
}

/// Length verdict for a title or meta description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagAssessment {
    Missing,
    #[serde(rename = "Too short")]
    TooShort,
    #[serde(rename = "Too long")]
    TooLong,
    Good,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTagsAudit {
    pub title_tags: TagAssessment,
    pub meta_descriptions: TagAssessment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnPageResult {
    pub score: u32,
    pub issues: Vec<Issue>,
    pub meta_tags_audit: MetaTagsAudit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentTier {
    #[serde(rename = "Thin content")]
    Thin,
    #[serde(rename = "Basic content")]
    Basic,
    #[serde(rename = "Good content length")]
    Good,
    #[serde(rename = "Comprehensive content")]
    Comprehensive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadabilityTier {
    Unknown,
    #[serde(rename = "Easy to read")]
    Easy,
    #[serde(rename = "Moderately readable")]
    Moderate,
    #[serde(rename = "Difficult to read")]
    Difficult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentAudit {
    pub quality_assessment: ContentTier,
    pub content_gaps: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Readability {
    pub average_score: u32,
    pub assessment: ReadabilityTier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentResult {
    pub score: u32,
    pub issues: Vec<Issue>,
    pub content_audit: ContentAudit,
    pub readability: Readability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MobileResult {
    pub score: u32,
    pub issues: Vec<Issue>,
}

/// A field-data metric that cannot be measured from a single crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VitalMeasurement {
    #[serde(rename = "Unknown (requires real user data)")]
    InsufficientData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    #[serde(rename = "LCP")]
    pub lcp: VitalMeasurement,
    #[serde(rename = "FID")]
    pub fid: VitalMeasurement,
    #[serde(rename = "CLS")]
    pub cls: VitalMeasurement,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceResult {
    pub score: u32,
    pub issues: Vec<Issue>,
    pub core_web_vitals: CoreWebVitals,
    pub data_available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTags {
    pub title: String,
    pub description: String,
    pub keywords: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    pub word_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSummary {
    pub count: u32,
    pub quality: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub internal: LinkSummary,
    pub external: LinkSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub url: String,
    pub title: String,
    pub score: u32,
    pub issues: Vec<Issue>,
    pub meta_tags: MetaTags,
    pub headings: Headings,
    pub content: PageContent,
    pub images: ImageStats,
    pub links: PageLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overall {
    pub score: u32,
    pub summary: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoReport {
    pub overall: Overall,
    pub pages: Vec<PageResult>,
    pub crawled_urls: Vec<String>,
    pub technical: TechnicalResult,
    pub on_page: OnPageResult,
    pub content: ContentResult,
    pub mobile: MobileResult,
    pub performance: PerformanceResult,
    pub recommendations: Vec<Issue>,
}

/// How the alt-text factor treats a page without images
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAltScoring {
    /// Count the factor and award 0 points
    #[default]
    Penalize,
    /// Leave the factor out of the on-page average
    Exclude,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuditOptions {
    pub image_alt_scoring: ImageAltScoring,
}
