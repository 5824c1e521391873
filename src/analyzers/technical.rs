use super::average;
use crate::models::{
    Crawlability, Issue, Security, Severity, TechnicalFlags, TechnicalResult, WebsiteSnapshot,
};

pub struct TechnicalAnalyzer;

impl TechnicalAnalyzer {
    /// Binary checklist: every passing factor is worth 100 points
    pub fn analyze(snapshot: &WebsiteSnapshot) -> TechnicalResult {
        let TechnicalFlags {
            ssl,
            robots_txt,
            sitemap,
            mobile_friendly,
        } = snapshot.technical;

        let mut issues = Vec::new();
        let mut points = 0;
        let mut factors = 0;

        // Check SSL/HTTPS
        if ssl {
            points += 100;
        } else {
            issues.push(Issue::new(
                "Missing SSL certificate",
                Severity::High,
                "The website is not using HTTPS.",
                "Significant impact on security and search rankings",
                "Install an SSL certificate and migrate to HTTPS.",
            ));
        }
        factors += 1;

        // Check robots.txt
        if robots_txt {
            points += 100;
        } else {
            issues.push(Issue::new(
                "Missing robots.txt file",
                Severity::Medium,
                "The website does not have a robots.txt file.",
                "May affect how search engines crawl the site",
                "Create a robots.txt file with appropriate directives.",
            ));
        }
        factors += 1;

        // Check sitemap
        if sitemap {
            points += 100;
        } else {
            issues.push(Issue::new(
                "Missing XML sitemap",
                Severity::Medium,
                "The website does not have an XML sitemap.",
                "Reduced crawling efficiency for search engines",
                "Generate and submit an XML sitemap to search engines.",
            ));
        }
        factors += 1;

        // Check mobile-friendliness
        if mobile_friendly {
            points += 100;
        } else {
            issues.push(Issue::new(
                "Not mobile-friendly",
                Severity::High,
                "The website is not optimized for mobile devices.",
                "Poor user experience on mobile and lower search rankings",
                "Implement a responsive design or mobile-specific version.",
            ));
        }
        factors += 1;

        TechnicalResult {
            score: average(points, factors),
            ssl,
            mobile_friendly,
            robots_txt,
            sitemap,
            issues,
            crawlability: Crawlability {
                robots_txt: robots_txt.into(),
                sitemap_xml: sitemap.into(),
                crawl_errors: Vec::new(),
            },
            security: Security { https: ssl },
        }
    }
}
