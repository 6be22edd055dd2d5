//! Console output formatter for the final result log

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use roundtable_application::ProcessorReport;
use roundtable_domain::RoundRecord;

/// Formats a processor report for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format every round of the report
    pub fn format(report: &ProcessorReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Round Table Results"));
        output.push('\n');

        if report.log.is_empty() {
            output.push_str(&format!("\n{}\n", "No rounds were completed.".dimmed()));
        }
        for record in report.log.iter() {
            output.push_str(&Self::format_record(record));
        }

        output.push_str(&Self::section_header("Summary"));
        output.push_str(&format!(
            "{} {}\n",
            "Full rounds:".cyan().bold(),
            report.rounds_completed
        ));
        output.push_str(&format!(
            "{} {} dispatched, {} dropped, {} failed\n",
            "Commands:".cyan().bold(),
            report.dispatched,
            report.dropped,
            report.failed
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Final topic:".cyan().bold(),
            report.final_topic
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(report: &ProcessorReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_record(record: &RoundRecord) -> String {
        let title = if record.round_count.is_injection() {
            format!("Round {} (injected proposal)", record.round_count)
        } else {
            format!("Round {}", record.round_count)
        };

        let mut output = Self::section_header(&title);
        output.push_str(&format!("{} {}\n\n", "Topic:".bold(), record.topic));

        for (i, proposal) in record.proposals.iter().enumerate() {
            let number = i + 1;
            let votes = record.votes.iter().filter(|&&v| v == number).count();
            let line = format!("{number}. {}", Self::indent_tail(proposal, "   "));
            if proposal == &record.winning_proposal {
                output.push_str(&format!("{} {}\n", line.green(), Self::tally(votes).green()));
            } else {
                output.push_str(&format!("{} {}\n", line, Self::tally(votes).dimmed()));
            }
        }

        output.push_str(&format!(
            "\n{} {:?}\n{} {}\n",
            "Votes:".bold(),
            record.votes,
            "Winner:".green().bold(),
            record.winning_proposal
        ));
        output
    }

    fn tally(votes: usize) -> String {
        match votes {
            1 => "(1 vote)".to_string(),
            n => format!("({n} votes)"),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent every line but the first
    fn indent_tail(text: &str, prefix: &str) -> String {
        text.lines()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    line.to_string()
                } else {
                    format!("{}{}", prefix, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, report: &ProcessorReport) -> String {
        Self::format(report)
    }

    fn format_json(&self, report: &ProcessorReport) -> String {
        Self::format_json(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_domain::{ResultLog, RoundCount};

    fn report() -> ProcessorReport {
        let mut log = ResultLog::new();
        log.append(
            RoundRecord::new(
                RoundCount::full(0),
                "transport",
                vec!["Trams".into(), "Bikes".into()],
                vec![1, 1, 2],
                1,
            )
            .unwrap(),
        );
        log.append(
            RoundRecord::new(
                RoundCount::full(0).injection(),
                "transport",
                vec!["Trams".into(), "Bikes".into(), "Cable cars".into()],
                vec![3, 3, 1],
                3,
            )
            .unwrap(),
        );
        ProcessorReport {
            log,
            final_topic: "Cable car stations".into(),
            rounds_completed: 1,
            dispatched: 2,
            dropped: 0,
            failed: 0,
        }
    }

    #[test]
    fn test_format_lists_rounds_and_summary() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format(&report());

        assert!(text.contains("Round 0\n"));
        assert!(text.contains("Round 0.5 (injected proposal)"));
        assert!(text.contains("1. Trams (2 votes)"));
        assert!(text.contains("2. Bikes (1 vote)"));
        assert!(text.contains("Winner: Cable cars"));
        assert!(text.contains("Final topic: Cable car stations"));
        assert!(text.contains("2 dispatched, 0 dropped, 0 failed"));
    }

    #[test]
    fn test_format_empty_log() {
        colored::control::set_override(false);
        let mut empty = report();
        empty.log = ResultLog::new();
        assert!(ConsoleFormatter::format(&empty).contains("No rounds were completed."));
    }

    #[test]
    fn test_format_json() {
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&report())).unwrap();
        assert_eq!(json["log"][1]["round_count"], serde_json::json!(0.5));
        assert_eq!(json["rounds_completed"], 1);
    }

    #[test]
    fn test_indent_tail() {
        assert_eq!(ConsoleFormatter::indent_tail("a\nb", "  "), "a\n  b");
    }
}
