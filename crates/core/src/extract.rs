//! Question extraction from plain-text quiz files.
//!
//! A quiz file is a sequence of blocks. Each block starts at a `Q.<n>`
//! marker and runs up to the next marker or the end of the text:
//!
//! ```text
//! Q.1 What is 2+2?
//! 3
//! 4
//! 5
//! 6
//! Ans: 2
//! ```
//!
//! The first non-blank line of a block is the prompt, the next lines (up to
//! `max_options`) are the options, and the first line anywhere in the block
//! that looks like `Ans:` / `Ans<digit>` names the correct option. Extraction
//! is total: text without markers yields no questions, a block without an
//! answer line yields a question without an answer key.
//!
//! Lines are kept verbatim except for a trailing `\r`, which is dropped so
//! Windows line endings never leak into prompt or option text.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::model::{OptionNumber, QuestionRecord};

static MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Q\.[0-9]+").unwrap());

static LINE_START_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(Q\.[0-9]+)").unwrap());

static PROMPT_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"Q\.[0-9]+\s*").unwrap());

static ANSWER_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"Ans\s*[:0-9]").unwrap());

static ANSWER_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]").unwrap());

/// Number of option lines taken after the prompt unless configured otherwise.
pub const DEFAULT_MAX_OPTIONS: usize = 4;

/// Where a `Q.<n>` marker is allowed to start a new block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkerAnchor {
    /// Any occurrence of `Q.<n>` starts a block, even mid-line.
    #[default]
    Anywhere,
    /// Only a marker at the start of a line (after indentation) starts a block.
    LineStart,
}

/// Extraction settings.
///
/// Lines are split on `\n`; a trailing `\r` is removed from every line,
/// so CRLF files yield the same prompt and option text as LF files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub max_options: usize,
    pub anchor: MarkerAnchor,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_options: DEFAULT_MAX_OPTIONS,
            anchor: MarkerAnchor::default(),
        }
    }
}

/// Turns quiz text into question records.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {
    options: ExtractOptions,
}

impl Extractor {
    #[must_use]
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Extract every question block from `text`, in source order.
    #[must_use]
    pub fn extract(&self, text: &str) -> Vec<QuestionRecord> {
        let questions: Vec<QuestionRecord> = self
            .blocks(text)
            .into_iter()
            .filter_map(|block| self.parse_block(block))
            .collect();

        debug!(
            questions = questions.len(),
            with_answer_key = questions.iter().filter(|q| q.has_answer_key()).count(),
            anchor = ?self.options.anchor,
            "extracted quiz questions"
        );
        questions
    }

    /// Slice `text` into blocks, each starting at a marker.
    fn blocks<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let starts: Vec<usize> = match self.options.anchor {
            MarkerAnchor::Anywhere => MARKER.find_iter(text).map(|m| m.start()).collect(),
            MarkerAnchor::LineStart => LINE_START_MARKER
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.start())
                .collect(),
        };

        starts
            .iter()
            .enumerate()
            .map(|(i, &start)| {
                let end = starts.get(i + 1).copied().unwrap_or(text.len());
                &text[start..end]
            })
            .collect()
    }

    fn parse_block(&self, block: &str) -> Option<QuestionRecord> {
        let lines: Vec<&str> = block
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.trim().is_empty())
            .collect();

        let (prompt, rest) = lines.split_first()?;
        let text = PROMPT_MARKER.replace(prompt, "").into_owned();

        let options = rest
            .iter()
            .take(self.options.max_options)
            .map(|line| (*line).to_owned())
            .collect();

        let correct_option = lines
            .iter()
            .find(|line| ANSWER_LINE.is_match(line))
            .and_then(|line| ANSWER_DIGIT.find(line))
            .and_then(|digit| OptionNumber::parse(digit.as_str()).ok());

        Some(QuestionRecord::new(text, options, correct_option))
    }
}

/// Extract questions with the default options.
#[must_use]
pub fn extract(text: &str) -> Vec<QuestionRecord> {
    Extractor::default().extract(text)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
