use crate::html_report;
use crate::models::{Issue, SeoReport, Severity};
use crate::scoring::ScoreTier;
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Issue totals across every category of a report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub struct Reporter;

impl Reporter {
    pub fn count_issues(report: &SeoReport) -> IssueCounts {
        let mut counts = IssueCounts::default();

        let all_issues = report
            .technical
            .issues
            .iter()
            .chain(&report.on_page.issues)
            .chain(&report.content.issues)
            .chain(&report.mobile.issues)
            .chain(&report.performance.issues);

        for issue in all_issues {
            match issue.severity {
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
            }
        }

        counts
    }

    pub fn print_text_report(report: &SeoReport) {
        println!("\n{}", "=".repeat(80).bright_blue());
        println!("{}", "auditly - SEO Audit Report".bright_cyan().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!();

        for url in &report.crawled_urls {
            println!("{}: {}", "URL".bright_white().bold(), url);
        }
        println!(
            "{}: {}",
            "Timestamp".bright_white().bold(),
            report.overall.timestamp
        );
        println!();

        println!(
            "{}: {}/100",
            "Overall Score".bright_white().bold(),
            colored_score(report.overall.score)
        );
        println!("{}", report.overall.summary);
        println!();

        println!("{}", "Categories".bright_yellow().bold().underline());
        for (name, score) in [
            ("Technical SEO", report.technical.score),
            ("On-Page SEO", report.on_page.score),
            ("Content", report.content.score),
            ("Mobile", report.mobile.score),
            ("Performance", report.performance.score),
        ] {
            println!("  {:<15} {}", format!("{}:", name), colored_score(score));
        }
        println!();

        let counts = Self::count_issues(report);
        println!("{}", "Summary".bright_yellow().bold().underline());
        println!(
            "  High:   {}",
            if counts.high > 0 {
                counts.high.to_string().bright_red()
            } else {
                counts.high.to_string().bright_green()
            }
        );
        println!(
            "  Medium: {}",
            if counts.medium > 0 {
                counts.medium.to_string().yellow()
            } else {
                counts.medium.to_string().bright_green()
            }
        );
        println!("  Low:    {}", counts.low.to_string().bright_cyan());
        println!();

        if !report.recommendations.is_empty() {
            println!("{}", "Recommendations".bright_yellow().bold().underline());
            for issue in &report.recommendations {
                print_issue(issue);
            }
        }

        println!();
        println!("{}", "=".repeat(80).bright_blue());
    }

    /// Write the report to disk: rendered HTML for `.html`/`.htm`, JSON otherwise
    pub fn save_report(report: &SeoReport, filename: &str) -> Result<()> {
        let is_html = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));

        let contents = if is_html {
            html_report::render_report(report)
        } else {
            serde_json::to_string_pretty(report)?
        };

        Self::save_to_file(&contents, filename)
    }

    pub fn save_to_file(contents: &str, filename: &str) -> Result<()> {
        let mut file = File::create(filename)
            .with_context(|| format!("Failed to create report file: {}", filename))?;
        file.write_all(contents.as_bytes())?;
        println!("Report saved to: {}", filename.bright_green());
        Ok(())
    }
}

fn colored_score(score: u32) -> ColoredString {
    match ScoreTier::from_score(score) {
        ScoreTier::High => score.to_string().bright_green(),
        ScoreTier::Medium => score.to_string().yellow(),
        ScoreTier::Low => score.to_string().bright_red(),
    }
}

fn print_issue(issue: &Issue) {
    let severity_str = match issue.severity {
        Severity::High => "HIGH".bright_red(),
        Severity::Medium => "MED ".yellow(),
        Severity::Low => "LOW ".bright_cyan(),
    };
    println!();
    println!("  [{}] {}", severity_str, issue.title.bright_white().bold());
    println!("         {}", issue.description);
    println!("         {} {}", "Fix:".dimmed(), issue.recommendation);
}
