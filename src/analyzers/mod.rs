//! Category analyzers. Each one reads the snapshot and returns its own
//! category result; none of them sees another's output.

mod content;
mod experience;
mod on_page;
mod technical;

pub use content::ContentAnalyzer;
pub use experience::ExperienceAnalyzer;
pub use on_page::OnPageAnalyzer;
pub use technical::TechnicalAnalyzer;

/// Rounded mean of accumulated factor points
fn average(points: u32, factors: u32) -> u32 {
    if factors == 0 {
        return 0;
    }
    (f64::from(points) / f64::from(factors)).round() as u32
}

/// `round(100 * part / whole)`, capped at 100
fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((f64::from(part) / f64::from(whole)) * 100.0).round().min(100.0) as u32
}
