//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// How the final result log is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary of every round
    Text,
    /// The result log as JSON
    Json,
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Round-table deliberation - participants propose, vote and move on")]
#[command(long_about = r#"
Roundtable seats a group of LLM-driven participants around a table and lets
them deliberate in rounds. In every round each participant proposes an idea
on the current topic, everybody votes, ties are settled by revoting over the
tied proposals only, and the winner becomes the seed of the next topic.

Rounds are driven by commands:
  {"command": "start"}                                  run one full round
  {"command": "chat_in_round", "content": "..."}        add a proposal to the
                                                        latest round and revote
  {"command": "add_memory", "content": {"agent_number": "0", "memory": "..."}}

Commands come from a script file (--commands) and/or a UDP listener (--listen).

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./roundtable.toml        Project-level config
3. ~/.config/roundtable/config.toml   Global config
4. ROUNDTABLE_<SECTION>__<KEY> environment variables

Example:
  roundtable --scenario data/raw_data.json --commands data/commands.json
  roundtable --listen 127.0.0.1:5005 -v
"#)]
pub struct Cli {
    /// Scenario file with the participant roster and starting topic
    #[arg(short, long, value_name = "PATH", default_value = "data/raw_data.json")]
    pub scenario: PathBuf,

    /// Command script (JSON array or one JSON message per line)
    #[arg(short = 'C', long, value_name = "PATH")]
    pub commands: Option<PathBuf>,

    /// Listen for UDP commands on this address (overrides [listener])
    #[arg(short, long, value_name = "ADDR")]
    pub listen: Option<String>,

    /// Result file (overrides output.results_path)
    #[arg(long, value_name = "PATH")]
    pub results: Option<PathBuf>,

    /// JSONL transcript file (overrides output.transcript_path)
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Model used for generation (overrides llm.model)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Output format for the final summary
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Write a daily-rotated diagnostic log into this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
