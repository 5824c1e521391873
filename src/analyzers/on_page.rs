use super::{average, percent};
use crate::models::{
    AuditOptions, ImageAltScoring, Issue, MetaTagsAudit, OnPageResult, Severity, TagAssessment,
    WebsiteSnapshot,
};

const TITLE_MIN: usize = 30;
const TITLE_MAX: usize = 60;
const DESCRIPTION_MIN: usize = 120;
const DESCRIPTION_MAX: usize = 158;
const MIN_WORDS: u32 = 300;

pub struct OnPageAnalyzer;

impl OnPageAnalyzer {
    pub fn analyze(snapshot: &WebsiteSnapshot, options: &AuditOptions) -> OnPageResult {
        let mut issues = Vec::new();
        let mut points = 0;
        let mut factors = 0;

        // Check title tag
        let title_tags = assess_length(&snapshot.title, TITLE_MIN, TITLE_MAX);
        match title_tags {
            TagAssessment::Missing => issues.push(Issue::new(
                "Missing title tag",
                Severity::High,
                "The page does not have a title tag.",
                "Significant negative impact on SEO",
                "Add a descriptive title tag with target keywords.",
            )),
            TagAssessment::TooShort | TagAssessment::TooLong => {
                issues.push(Issue::new(
                    "Title tag length issue",
                    Severity::Medium,
                    format!(
                        "The title tag is {} ({} characters).",
                        length_verdict(title_tags),
                        snapshot.title.chars().count()
                    ),
                    "Suboptimal display in search results",
                    "Optimize title length to be between 30-60 characters.",
                ));
                points += 50;
            }
            TagAssessment::Good => points += 100,
        }
        factors += 1;

        // Check meta description
        let meta_descriptions =
            assess_length(&snapshot.description, DESCRIPTION_MIN, DESCRIPTION_MAX);
        match meta_descriptions {
            TagAssessment::Missing => issues.push(Issue::new(
                "Missing meta description",
                Severity::Medium,
                "The page does not have a meta description.",
                "Lower click-through rate from search results",
                "Add a compelling meta description with target keywords.",
            )),
            TagAssessment::TooShort | TagAssessment::TooLong => {
                issues.push(Issue::new(
                    "Meta description length issue",
                    Severity::Medium,
                    format!(
                        "The meta description is {} ({} characters).",
                        length_verdict(meta_descriptions),
                        snapshot.description.chars().count()
                    ),
                    "Suboptimal display in search results",
                    "Optimize meta description length to be between 120-158 characters.",
                ));
                points += 50;
            }
            TagAssessment::Good => points += 100,
        }
        factors += 1;

        // Check H1 tag
        match snapshot.headings.h1.len() {
            0 => issues.push(Issue::new(
                "Missing H1 tag",
                Severity::High,
                "The page does not have an H1 tag.",
                "Search engines may not understand the main topic",
                "Add a descriptive H1 tag with target keywords.",
            )),
            1 => points += 100,
            count => {
                issues.push(Issue::new(
                    "Multiple H1 tags",
                    Severity::Medium,
                    format!("The page has {} H1 tags.", count),
                    "Confusion for search engines about the main topic",
                    "Use only one H1 tag per page.",
                ));
                points += 50;
            }
        }
        factors += 1;

        // Check image alt text
        let images = snapshot.images;
        if images.total > 0 {
            let coverage = percent(images.with_alt, images.total);
            if images.with_alt < images.total {
                issues.push(Issue::new(
                    "Missing image alt text",
                    Severity::Medium,
                    format!(
                        "{} out of {} images are missing alt text.",
                        images.without_alt, images.total
                    ),
                    "Reduced accessibility and image SEO",
                    "Add descriptive alt text to all images.",
                ));
            }
            points += coverage;
            factors += 1;
        } else if options.image_alt_scoring == ImageAltScoring::Penalize {
            factors += 1;
        }

        // Check content length
        if snapshot.word_count < MIN_WORDS {
            issues.push(Issue::new(
                "Thin content",
                Severity::High,
                format!("The page has only {} words.", snapshot.word_count),
                "May be considered low-quality by search engines",
                "Expand content to at least 300 words, ideally 500+.",
            ));
            points += percent(snapshot.word_count, MIN_WORDS);
        } else {
            points += 100;
        }
        factors += 1;

        OnPageResult {
            score: average(points, factors),
            issues,
            meta_tags_audit: MetaTagsAudit {
                title_tags,
                meta_descriptions,
            },
        }
    }
}

fn assess_length(text: &str, min: usize, max: usize) -> TagAssessment {
    if text.is_empty() {
        return TagAssessment::Missing;
    }

    let length = text.chars().count();
    if length < min {
        TagAssessment::TooShort
    } else if length > max {
        TagAssessment::TooLong
    } else {
        TagAssessment::Good
    }
}

fn length_verdict(assessment: TagAssessment) -> &'static str {
    match assessment {
        TagAssessment::TooShort => "too short",
        _ => "too long",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Headings, ImageStats};

    fn ideal_snapshot() -> WebsiteSnapshot {
        WebsiteSnapshot {
            url: "https://example.com".to_string(),
            title: "a".repeat(45),
            description: "b".repeat(140),
            headings: Headings {
                h1: vec!["Main".to_string()],
                ..Default::default()
            },
            images: ImageStats {
                total: 4,
                with_alt: 4,
                without_alt: 0,
            },
            word_count: 1200,
            ..Default::default()
        }
    }

    #[test]
    fn test_ideal_page_scores_100() {
        let result = OnPageAnalyzer::analyze(&ideal_snapshot(), &AuditOptions::default());
        assert_eq!(result.score, 100);
        assert!(result.issues.is_empty());
        assert_eq!(result.meta_tags_audit.title_tags, TagAssessment::Good);
        assert_eq!(result.meta_tags_audit.meta_descriptions, TagAssessment::Good);
    }

    #[test]
    fn test_length_boundaries() {
        assert_eq!(assess_length(&"x".repeat(29), 30, 60), TagAssessment::TooShort);
        assert_eq!(assess_length(&"x".repeat(30), 30, 60), TagAssessment::Good);
        assert_eq!(assess_length(&"x".repeat(60), 30, 60), TagAssessment::Good);
        assert_eq!(assess_length(&"x".repeat(61), 30, 60), TagAssessment::TooLong);
        assert_eq!(assess_length("", 30, 60), TagAssessment::Missing);
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 30 characters, 60 bytes
        assert_eq!(assess_length(&"é".repeat(30), 30, 60), TagAssessment::Good);
        // 60 characters, 120 UTF-16 units
        assert_eq!(assess_length(&"😀".repeat(60), 30, 60), TagAssessment::Good);
        assert_eq!(assess_length(&"😀".repeat(29), 30, 60), TagAssessment::TooShort);
    }

    #[test]
    fn test_description_length_boundaries() {
        let cases = [
            (119, TagAssessment::TooShort, 90),
            (120, TagAssessment::Good, 100),
            (158, TagAssessment::Good, 100),
            (159, TagAssessment::TooLong, 90),
        ];

        for (length, expected, score) in cases {
            let snapshot = WebsiteSnapshot {
                description: "d".repeat(length),
                ..ideal_snapshot()
            };
            let result = OnPageAnalyzer::analyze(&snapshot, &AuditOptions::default());

            assert_eq!(result.meta_tags_audit.meta_descriptions, expected, "{}", length);
            // 50 points for a length issue, 100 otherwise
            assert_eq!(result.score, score, "{}", length);
            assert_eq!(
                result.issues.is_empty(),
                expected == TagAssessment::Good,
                "{}",
                length
            );
        }
    }

    #[test]
    fn test_short_title_and_long_description() {
        let snapshot = WebsiteSnapshot {
            title: "Short".to_string(),
            description: "d".repeat(200),
            ..ideal_snapshot()
        };
        let result = OnPageAnalyzer::analyze(&snapshot, &AuditOptions::default());

        assert_eq!(result.meta_tags_audit.title_tags, TagAssessment::TooShort);
        assert_eq!(result.meta_tags_audit.meta_descriptions, TagAssessment::TooLong);
        assert_eq!(result.issues.len(), 2);
        assert_eq!(
            result.issues[0].description,
            "The title tag is too short (5 characters)."
        );
        assert_eq!(
            result.issues[1].description,
            "The meta description is too long (200 characters)."
        );
        // (50 + 50 + 100 + 100 + 100) / 5
        assert_eq!(result.score, 80);
    }

    #[test]
    fn test_multiple_h1_tags() {
        let mut snapshot = ideal_snapshot();
        snapshot.headings.h1 = vec!["One".to_string(), "Two".to_string()];
        let result = OnPageAnalyzer::analyze(&snapshot, &AuditOptions::default());

        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].title, "Multiple H1 tags");
        assert_eq!(result.issues[0].severity, Severity::Medium);
        assert_eq!(result.score, 90);
    }

    #[test]
    fn test_partial_alt_coverage() {
        let mut snapshot = ideal_snapshot();
        snapshot.images = ImageStats {
            total: 3,
            with_alt: 2,
            without_alt: 1,
        };
        let result = OnPageAnalyzer::analyze(&snapshot, &AuditOptions::default());

        assert_eq!(result.issues[0].title, "Missing image alt text");
        assert_eq!(
            result.issues[0].description,
            "1 out of 3 images are missing alt text."
        );
        // (100 + 100 + 100 + 67 + 100) / 5 = 93.4
        assert_eq!(result.score, 93);
    }

    #[test]
    fn test_imageless_page_penalized_by_default() {
        let mut snapshot = ideal_snapshot();
        snapshot.images = ImageStats::default();
        let result = OnPageAnalyzer::analyze(&snapshot, &AuditOptions::default());

        assert!(result.issues.is_empty());
        assert_eq!(result.score, 80);
    }

    #[test]
    fn test_imageless_page_excluded_when_configured() {
        let mut snapshot = ideal_snapshot();
        snapshot.images = ImageStats::default();
        let options = AuditOptions {
            image_alt_scoring: ImageAltScoring::Exclude,
        };
        let result = OnPageAnalyzer::analyze(&snapshot, &options);

        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_thin_content_partial_credit() {
        let mut snapshot = ideal_snapshot();
        snapshot.word_count = 150;
        let result = OnPageAnalyzer::analyze(&snapshot, &AuditOptions::default());

        assert_eq!(result.issues[0].title, "Thin content");
        assert_eq!(result.issues[0].severity, Severity::High);
        assert_eq!(result.issues[0].description, "The page has only 150 words.");
        // (100 * 4 + 50) / 5
        assert_eq!(result.score, 90);
    }
}
