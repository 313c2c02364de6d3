use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use quiz_core::extract::DEFAULT_MAX_OPTIONS;
use quiz_core::{ExtractOptions, MarkerAnchor};

/// Take a multiple-choice quiz from a plain-text file.
#[derive(Debug, Parser)]
#[command(name = "quiz", version, about)]
pub struct Cli {
    /// Number of lines after each prompt read as options.
    #[arg(long, global = true, env = "QUIZ_MAX_OPTIONS", default_value_t = DEFAULT_MAX_OPTIONS)]
    pub max_options: usize,

    /// Only start a question at a `Q.<n>` marker at the beginning of a line.
    #[arg(long, global = true, env = "QUIZ_LINE_START")]
    pub line_start: bool,

    /// Log more to stderr (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer the quiz interactively.
    Run {
        file: PathBuf,
    },
    /// Show the questions extracted from a file.
    Inspect {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Score a comma-separated answer sheet, e.g. `2,,1,4` (blank = unanswered).
    Grade {
        file: PathBuf,
        #[arg(long)]
        answers: String,
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    #[must_use]
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            max_options: self.max_options,
            anchor: if self.line_start {
                MarkerAnchor::LineStart
            } else {
                MarkerAnchor::Anywhere
            },
        }
    }
}
