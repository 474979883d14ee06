use crate::model::{AggregatedReport, HealthLevel, NormalizedIssue, Severity};
use crate::recommend::Recommendation;
use crate::reporter::Reporter;
use colored::Colorize;

pub struct TerminalReporter {
    verbose: bool,
    /// How many recommendations to show; the rest are summarized.
    top: usize,
}

impl TerminalReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose, top: 5 }
    }

    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    fn severity_color(&self, severity: &Severity) -> colored::ColoredString {
        let label = format!("[{}]", severity);
        match severity {
            Severity::Critical => label.red().bold(),
            Severity::High => label.yellow().bold(),
            Severity::Medium => label.cyan(),
            Severity::Low => label.white(),
        }
    }

    fn health_color(&self, level: &HealthLevel) -> colored::ColoredString {
        let label = level.to_string();
        match level {
            HealthLevel::Excellent => label.green().bold(),
            HealthLevel::Good => label.green(),
            HealthLevel::Warning => label.yellow().bold(),
            HealthLevel::Critical => label.red(),
            HealthLevel::Severe => label.red().bold(),
            HealthLevel::Unknown => label.dimmed(),
        }
    }

    /// Visual bar for the health score (10 chars wide).
    fn score_bar(&self, score: f64) -> String {
        let filled = ((score / 100.0) * 10.0).round() as usize;
        let filled = filled.min(10);
        let empty = 10 - filled;
        format!("{}{}", "█".repeat(filled), "░".repeat(empty))
    }

    fn format_issue(&self, issue: &NormalizedIssue) -> String {
        format!(
            "  {} {} {} ({})\n    {}\n",
            self.severity_color(&issue.severity),
            issue.tool.bold(),
            issue.resource,
            issue.category,
            issue.evidence.dimmed()
        )
    }

    fn format_recommendation(&self, index: usize, rec: &Recommendation) -> String {
        format!(
            "  {}. {} {}\n     {}\n",
            index + 1,
            self.severity_color(&rec.severity),
            rec.action.bold(),
            rec.impact.dimmed()
        )
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, result: &AggregatedReport) -> String {
        let mut output = String::new();
        let summary = &result.summary;

        output.push_str(&format!(
            "\n{}\n",
            "Infrastructure Audit Report".bold().underline()
        ));
        output.push_str(&format!(
            "Run: {}\n\n",
            result.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        output.push_str(&format!(
            "Health: {} {} ({:.1}%)\n",
            self.health_color(&summary.health_score),
            self.score_bar(summary.score_percent),
            summary.score_percent
        ));
        output.push_str(&format!(
            "Tools: {} total, {} supported, {} unsupported\n",
            summary.total_tools, summary.supported_tools, summary.unsupported_tools
        ));
        output.push_str(&format!("Issues: {}\n", summary.total_issues));

        if !summary.issues_by_severity.is_empty() {
            let parts: Vec<String> = summary
                .issues_by_severity
                .iter()
                .rev()
                .map(|(severity, count)| format!("{} {}", count, severity.as_str()))
                .collect();
            output.push_str(&format!("  by severity: {}\n", parts.join(", ")));
        }
        if !summary.issues_by_tool.is_empty() {
            let parts: Vec<String> = summary
                .issues_by_tool
                .iter()
                .map(|(tool, count)| format!("{} {}", tool, count))
                .collect();
            output.push_str(&format!("  by tool: {}\n", parts.join(", ")));
        }

        if let Some(trend) = &result.trend {
            output.push_str(&format!(
                "\nTrend: {} → {} issues ({:+.1}% {})\n",
                trend.previous_issues,
                trend.current_issues,
                trend.change_percent,
                trend.direction
            ));
        }

        if !result.recommendations.is_empty() {
            output.push_str(&format!("\n{}\n", "Recommendations".bold()));
            for (i, rec) in result.recommendations.iter().take(self.top).enumerate() {
                output.push_str(&self.format_recommendation(i, rec));
            }
            if result.recommendations.len() > self.top {
                output.push_str(&format!(
                    "  ... and {} more\n",
                    result.recommendations.len() - self.top
                ));
            }
        }

        if self.verbose && !result.issues.is_empty() {
            output.push_str(&format!("\n{}\n", "Issues".bold()));
            for issue in &result.issues {
                output.push_str(&self.format_issue(issue));
            }
        }

        output
    }
}
