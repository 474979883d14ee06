pub mod aggregate;
pub mod cli;
pub mod diff;
pub mod error;
pub mod handlers;
pub mod history;
pub mod model;
pub mod normalize;
pub mod recommend;
pub mod reporter;
pub mod trend;

pub use aggregate::aggregate;
pub use cli::{Cli, OutputFormat};
pub use diff::{compute_diff, DiffResult};
pub use error::{AuditError, Result};
pub use history::{FileRunStore, RunStore};
pub use model::{
    AggregatedReport, Category, CrossToolSummary, HealthLevel, NormalizedIssue, RawReport,
    Severity, ToolReport,
};
pub use normalize::normalize;
pub use recommend::{
    generate_recommendations, group_by_severity, top_recommendations, Recommendation,
};
pub use reporter::{json::JsonReporter, terminal::TerminalReporter, Reporter};
pub use trend::{
    analyze_last_n_runs, calculate_trend, generate_comparison_report, ToolTrend, Trend,
    TrendDirection, TrendSummary,
};
