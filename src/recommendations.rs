use crate::models::{Issue, Severity};
use std::cmp::Reverse;

/// Below this many recommendations generic ones are appended
const MIN_RECOMMENDATIONS: usize = 3;

pub struct RecommendationAggregator;

impl RecommendationAggregator {
    /// Merge issue lists (in category order) into one severity-ranked list.
    pub fn aggregate(issue_lists: &[&[Issue]]) -> Vec<Issue> {
        let mut recommendations: Vec<Issue> = issue_lists
            .iter()
            .flat_map(|issues| issues.iter().cloned())
            .collect();

        if recommendations.len() < MIN_RECOMMENDATIONS {
            Self::pad(&mut recommendations);
        }

        // Stable: equal severities keep detection order, fillers last among mediums
        recommendations.sort_by_key(|issue| Reverse(issue.severity.weight()));

        recommendations
    }

    fn pad(recommendations: &mut Vec<Issue>) {
        if !mentions(recommendations, "content") {
            recommendations.push(Issue::new(
                "Improve content quality",
                Severity::Medium,
                "The content could be more comprehensive and engaging.",
                "Better user engagement and search rankings",
                "Expand content with more detailed information, examples, and media.",
            ));
        }

        if !mentions(recommendations, "internal link") {
            recommendations.push(Issue::new(
                "Improve internal linking",
                Severity::Medium,
                "Better internal linking helps users and search engines navigate your site.",
                "Improved crawling and page authority distribution",
                "Add more contextual internal links to related content.",
            ));
        }
    }
}

/// Case-sensitive substring match against recommendation titles
fn mentions(recommendations: &[Issue], keyword: &str) -> bool {
    recommendations
        .iter()
        .any(|issue| issue.title.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(title: &str, severity: Severity) -> Issue {
        Issue::new(title, severity, "", "", "")
    }

    #[test]
    fn test_sorted_by_severity_stably() {
        let technical = [issue("t-medium", Severity::Medium), issue("t-high", Severity::High)];
        let on_page = [issue("o-low", Severity::Low), issue("o-high", Severity::High)];
        let content = [issue("c-medium", Severity::Medium)];

        let result = RecommendationAggregator::aggregate(&[&technical, &on_page, &content]);
        let titles: Vec<_> = result.iter().map(|i| i.title.as_str()).collect();

        assert_eq!(
            titles,
            vec!["t-high", "o-high", "t-medium", "c-medium", "o-low"]
        );
    }

    #[test]
    fn test_empty_input_gets_both_fillers() {
        let result = RecommendationAggregator::aggregate(&[&[], &[]]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].title, "Improve content quality");
        assert_eq!(result[1].title, "Improve internal linking");
        assert!(result.iter().all(|i| i.severity == Severity::Medium));
    }

    #[test]
    fn test_filler_skipped_when_keyword_present() {
        let existing = [issue("Thin content", Severity::High)];
        let result = RecommendationAggregator::aggregate(&[&existing]);

        let titles: Vec<_> = result.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Thin content", "Improve internal linking"]);
    }

    #[test]
    fn test_keyword_match_is_case_sensitive() {
        let existing = [issue("Content gaps", Severity::Low)];
        let result = RecommendationAggregator::aggregate(&[&existing]);

        let titles: Vec<_> = result.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Improve content quality", "Improve internal linking", "Content gaps"]
        );
    }

    #[test]
    fn test_no_padding_with_enough_recommendations() {
        let existing = [
            issue("a", Severity::Low),
            issue("b", Severity::Low),
            issue("c", Severity::Low),
        ];
        let result = RecommendationAggregator::aggregate(&[&existing]);
        assert_eq!(result.len(), 3);
    }
}
