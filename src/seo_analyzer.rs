use crate::analyzers::{ContentAnalyzer, ExperienceAnalyzer, OnPageAnalyzer, TechnicalAnalyzer};
use crate::error::AuditError;
use crate::models::{
    AuditOptions, LinkSummary, MetaTags, Overall, PageContent, PageLinks, PageResult, SeoReport,
    WebsiteSnapshot,
};
use crate::recommendations::RecommendationAggregator;
use crate::scoring::{CategoryScores, ScoreComposer};
use chrono::{SecondsFormat, Utc};

pub struct SeoAnalyzer;

impl SeoAnalyzer {
    /// Run the full audit pipeline over one snapshot.
    ///
    /// Every call builds a fresh report; the only field that differs between
    /// two runs over the same snapshot is `overall.timestamp`.
    pub fn analyze(
        snapshot: &WebsiteSnapshot,
        options: &AuditOptions,
    ) -> Result<SeoReport, AuditError> {
        snapshot.validate()?;

        tracing::info!(url = %snapshot.url, "Analyzing SEO");

        let technical = TechnicalAnalyzer::analyze(snapshot);
        let on_page = OnPageAnalyzer::analyze(snapshot, options);
        let content = ContentAnalyzer::analyze(snapshot);
        let mobile = ExperienceAnalyzer::analyze_mobile(snapshot);
        let performance = ExperienceAnalyzer::analyze_performance(snapshot);

        tracing::debug!(
            technical = technical.score,
            on_page = on_page.score,
            content = content.score,
            mobile = mobile.score,
            performance = performance.score,
            "Category scores computed"
        );

        let recommendations = RecommendationAggregator::aggregate(&[
            &technical.issues,
            &on_page.issues,
            &content.issues,
            &mobile.issues,
            &performance.issues,
        ]);

        let score = ScoreComposer::overall_score(&CategoryScores {
            technical: technical.score,
            on_page: on_page.score,
            content: content.score,
            mobile: mobile.score,
            performance: performance.score,
        });

        // Single-page audits share the site score with their only page
        let mut page = Self::page_result(snapshot);
        page.score = score;

        tracing::info!(url = %snapshot.url, score, "SEO analysis complete");

        Ok(SeoReport {
            overall: Overall {
                score,
                summary: ScoreComposer::summary(score).to_string(),
                timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            },
            pages: vec![page],
            crawled_urls: vec![snapshot.url.clone()],
            technical,
            on_page,
            content,
            mobile,
            performance,
            recommendations,
        })
    }

    fn page_result(snapshot: &WebsiteSnapshot) -> PageResult {
        PageResult {
            url: snapshot.url.clone(),
            title: snapshot.title.clone(),
            score: 0,
            issues: Vec::new(),
            meta_tags: MetaTags {
                title: snapshot.title.clone(),
                description: snapshot.description.clone(),
                keywords: String::new(),
            },
            headings: snapshot.headings.clone(),
            content: PageContent {
                word_count: snapshot.word_count,
            },
            images: snapshot.images,
            links: PageLinks {
                internal: LinkSummary {
                    count: snapshot.links.internal_count,
                    quality: "Unknown".to_string(),
                },
                external: LinkSummary {
                    count: snapshot.links.external_count,
                    quality: "Unknown".to_string(),
                },
            },
        }
    }
}
