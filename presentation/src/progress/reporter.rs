//! Progress reporting for round execution

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roundtable_application::ports::progress::RoundProgressNotifier;
use roundtable_domain::{Command, ParticipantProfile, RoundRecord};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress with a spinner per round
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start_spinner(&self, prefix: String, message: String) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix);
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(previous) = slot.replace(pb)
        {
            previous.finish_and_clear();
        }
    }

    fn with_spinner(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(slot) = self.spinner.lock()
            && let Some(pb) = slot.as_ref()
        {
            f(pb);
        }
    }

    /// Print a line above the spinner (or plainly when there is none)
    fn println(&self, line: String) {
        let mut printed = false;
        self.with_spinner(|pb| {
            pb.println(&line);
            printed = true;
        });
        if !printed {
            println!("{}", line);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

impl RoundProgressNotifier for ProgressReporter {
    fn on_round_start(&self, round: u32, total_rounds: u32, topic: &str) {
        self.start_spinner(
            format!("Round {round}/{total_rounds}"),
            format!("Collecting proposals on: {}", truncate(topic, 60)),
        );
    }

    fn on_injection_start(&self, proposal: &str) {
        self.start_spinner(
            "Injection".to_string(),
            format!("Revoting with: {}", truncate(proposal, 60)),
        );
    }

    fn on_proposal(&self, participant: &ParticipantProfile, proposal: &str) {
        self.println(format!(
            "  {} {}",
            format!("{}:", participant.name).yellow().bold(),
            proposal
        ));
    }

    fn on_votes(&self, pass: usize, _options: &[String], votes: &[usize]) {
        self.with_spinner(|pb| pb.set_message(format!("Vote pass {pass}: {votes:?}")));
    }

    fn on_revote(&self, tied: &[String]) {
        self.println(format!(
            "  {} tie between {} proposals, revoting",
            "~".yellow(),
            tied.len()
        ));
    }

    fn on_record(&self, record: &RoundRecord) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!(
                "{} {}",
                "Winner:".green().bold(),
                truncate(&record.winning_proposal, 80)
            ));
        }
    }

    fn on_topic_advanced(&self, topic: &str) {
        println!("  {} {}", "Next topic:".cyan(), topic);
    }

    fn on_command_failed(&self, command: &Command, reason: &str) {
        if let Ok(mut slot) = self.spinner.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_and_clear();
        }
        eprintln!("{} {}: {}", "x".red(), command.kind(), reason);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RoundProgressNotifier for SimpleProgress {
    fn on_round_start(&self, round: u32, total_rounds: u32, topic: &str) {
        println!(
            "{} {} {}",
            "->".cyan(),
            format!("Round {round} of {total_rounds}:").bold(),
            topic
        );
    }

    fn on_injection_start(&self, proposal: &str) {
        println!("{} {} {}", "->".cyan(), "New proposal:".bold(), proposal);
    }

    fn on_proposal(&self, participant: &ParticipantProfile, proposal: &str) {
        println!("  {}: {}", participant.name, proposal);
    }

    fn on_votes(&self, pass: usize, _options: &[String], votes: &[usize]) {
        println!("  votes (pass {pass}): {votes:?}");
    }

    fn on_record(&self, record: &RoundRecord) {
        println!(
            "  {} {}\n",
            "v".green(),
            record.winning_proposal
        );
    }

    fn on_command_failed(&self, command: &Command, reason: &str) {
        eprintln!("  {} {}: {}", "x".red(), command.kind(), reason);
    }
}
