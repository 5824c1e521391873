pub const TECHNICAL_WEIGHT: f64 = 0.25;
pub const ON_PAGE_WEIGHT: f64 = 0.25;
pub const CONTENT_WEIGHT: f64 = 0.25;
pub const MOBILE_WEIGHT: f64 = 0.15;
pub const PERFORMANCE_WEIGHT: f64 = 0.10;

pub const GOOD_SUMMARY: &str =
    "The website has good SEO practices but could be improved in several areas.";
pub const MODERATE_SUMMARY: &str =
    "The website has moderate SEO implementation with significant room for improvement.";
pub const POOR_SUMMARY: &str =
    "The website has poor SEO implementation and requires substantial improvements.";

/// Per-category scores fed into the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScores {
    pub technical: u32,
    pub on_page: u32,
    pub content: u32,
    pub mobile: u32,
    pub performance: u32,
}

pub struct ScoreComposer;

impl ScoreComposer {
    pub fn overall_score(scores: &CategoryScores) -> u32 {
        let weighted = f64::from(scores.technical) * TECHNICAL_WEIGHT
            + f64::from(scores.on_page) * ON_PAGE_WEIGHT
            + f64::from(scores.content) * CONTENT_WEIGHT
            + f64::from(scores.mobile) * MOBILE_WEIGHT
            + f64::from(scores.performance) * PERFORMANCE_WEIGHT;

        weighted.round() as u32
    }

    pub fn summary(score: u32) -> &'static str {
        match ScoreTier::from_score(score) {
            ScoreTier::High => GOOD_SUMMARY,
            ScoreTier::Medium => MODERATE_SUMMARY,
            ScoreTier::Low => POOR_SUMMARY,
        }
    }
}

/// Qualitative bucket shared by the summary text and the report badges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            ScoreTier::High
        } else if score >= 60 {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreTier::High => "score-high",
            ScoreTier::Medium => "score-medium",
            ScoreTier::Low => "score-low",
        }
    }
}
