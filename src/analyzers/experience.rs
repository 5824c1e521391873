use crate::models::{
    CoreWebVitals, Issue, MobileResult, PerformanceResult, Severity, VitalMeasurement,
    WebsiteSnapshot,
};

const MOBILE_FRIENDLY_SCORE: u32 = 90;
const NOT_MOBILE_FRIENDLY_SCORE: u32 = 40;
/// Neutral score while no field data is available
const UNMEASURED_PERFORMANCE_SCORE: u32 = 70;

pub struct ExperienceAnalyzer;

impl ExperienceAnalyzer {
    pub fn analyze_mobile(snapshot: &WebsiteSnapshot) -> MobileResult {
        if snapshot.technical.mobile_friendly {
            return MobileResult {
                score: MOBILE_FRIENDLY_SCORE,
                issues: Vec::new(),
            };
        }

        MobileResult {
            score: NOT_MOBILE_FRIENDLY_SCORE,
            issues: vec![Issue::new(
                "Not mobile-friendly",
                Severity::High,
                "The website is not optimized for mobile devices.",
                "Poor user experience on mobile and lower search rankings",
                "Implement a responsive design or mobile-specific version.",
            )],
        }
    }

    /// Core Web Vitals need real-user monitoring; a crawl snapshot cannot
    /// supply them, so every metric is reported as insufficient data.
    pub fn analyze_performance(_snapshot: &WebsiteSnapshot) -> PerformanceResult {
        PerformanceResult {
            score: UNMEASURED_PERFORMANCE_SCORE,
            issues: Vec::new(),
            core_web_vitals: CoreWebVitals {
                lcp: VitalMeasurement::InsufficientData,
                fid: VitalMeasurement::InsufficientData,
                cls: VitalMeasurement::InsufficientData,
            },
            data_available: false,
        }
    }
}
