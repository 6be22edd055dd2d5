//! Output formatter trait

use roundtable_application::ProcessorReport;

/// Trait for formatting the outcome of a run
pub trait OutputFormatter {
    /// Format the complete report
    fn format(&self, report: &ProcessorReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &ProcessorReport) -> String;
}
