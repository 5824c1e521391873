use super::{average, percent};
use crate::models::{
    ContentAudit, ContentResult, ContentTier, Issue, Readability, ReadabilityTier, Severity,
    WebsiteSnapshot,
};

pub struct ContentAnalyzer;

impl ContentAnalyzer {
    pub fn analyze(snapshot: &WebsiteSnapshot) -> ContentResult {
        let mut issues = Vec::new();
        let mut points = 0;
        let mut factors = 0;

        // Check content length
        let word_count = snapshot.word_count;
        let (quality_assessment, length_points) = length_tier(word_count);
        if quality_assessment == ContentTier::Thin {
            issues.push(Issue::new(
                "Low word count",
                Severity::Medium,
                format!("The page has only {} words.", word_count),
                "Reduced ability to rank for competitive keywords",
                "Expand the content to cover the topic more comprehensively.",
            ));
        }
        points += length_points;
        factors += 1;

        // Check heading structure
        if snapshot.headings.h2.is_empty() {
            issues.push(Issue::new(
                "Poor heading structure",
                Severity::Medium,
                "The page lacks H2 headings for content organization.",
                "Reduced readability and SEO value",
                "Add H2 headings to structure your content logically.",
            ));
        } else {
            points += 100;
        }
        factors += 1;

        // Estimate readability
        let readability = estimate_readability(&snapshot.text_content);
        if readability.assessment == ReadabilityTier::Difficult {
            issues.push(Issue::new(
                "Long sentences",
                Severity::Low,
                "The content has long sentences that may be difficult to read.",
                "Reduced readability and user engagement",
                "Break long sentences into shorter ones for better readability.",
            ));
        }
        points += readability.average_score;
        factors += 1;

        ContentResult {
            score: average(points, factors),
            issues,
            content_audit: ContentAudit {
                quality_assessment,
                content_gaps: Vec::new(),
            },
            readability,
        }
    }
}

/// Map a word count onto its tier and the points it earns
pub fn length_tier(word_count: u32) -> (ContentTier, u32) {
    match word_count {
        0..300 => (ContentTier::Thin, percent(word_count, 300)),
        300..500 => (ContentTier::Basic, 70),
        500..1000 => (ContentTier::Good, 85),
        _ => (ContentTier::Comprehensive, 100),
    }
}

/// Average sentence length heuristic, not a real readability formula.
pub fn estimate_readability(text: &str) -> Readability {
    let sentences = text
        .split(['.', '!', '?'])
        .filter(|sentence| !sentence.trim().is_empty())
        .count();

    let average_sentence_length = if sentences > 0 {
        (text.split_whitespace().count() as f64 / sentences as f64).round() as u32
    } else {
        0
    };

    let (average_score, assessment) = match average_sentence_length {
        0 => (0, ReadabilityTier::Unknown),
        1..15 => (90, ReadabilityTier::Easy),
        15..20 => (75, ReadabilityTier::Moderate),
        _ => (60, ReadabilityTier::Difficult),
    };

    Readability {
        average_score,
        assessment,
    }
}
