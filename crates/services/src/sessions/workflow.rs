use std::path::Path;
use tracing::{info, warn};

use quiz_core::{Clock, ExtractOptions, Extractor};

use super::service::QuizSession;
use crate::error::SourceError;

/// What happened when quiz text was handed to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub extracted: usize,
    pub with_answer_key: usize,
    /// False when nothing was extracted and the session kept its old state.
    pub loaded: bool,
}

/// Turns uploaded quiz text into a loaded session.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuizWorkflow {
    clock: Clock,
    extractor: Extractor,
}

impl QuizWorkflow {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            extractor: Extractor::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.extractor = Extractor::new(options);
        self
    }

    /// An empty session stamped by this workflow's clock.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(self.clock)
    }

    /// Extract questions from `text` and load them into `session`.
    pub fn load_text(&self, session: &mut QuizSession, text: &str) -> LoadReport {
        let questions = self.extractor.extract(text);
        let extracted = questions.len();
        let with_answer_key = questions.iter().filter(|q| q.has_answer_key()).count();

        if extracted > 0 && with_answer_key == 0 {
            warn!(extracted, "no question carries an answer marker; score will be 0");
        }

        let loaded = session.load(questions).is_applied();
        LoadReport {
            extracted,
            with_answer_key,
            loaded,
        }
    }

    /// Read a quiz file and load it into `session`.
    ///
    /// Bytes are decoded as UTF-8, replacing invalid sequences; a leading
    /// byte order mark is dropped.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Io` if the file cannot be read.
    pub fn load_file(
        &self,
        session: &mut QuizSession,
        path: impl AsRef<Path>,
    ) -> Result<LoadReport, SourceError> {
        let text = read_quiz_text(path.as_ref())?;
        let report = self.load_text(session, &text);
        info!(
            path = %path.as_ref().display(),
            extracted = report.extracted,
            loaded = report.loaded,
            "quiz file processed"
        );
        Ok(report)
    }
}

/// Read a quiz file as text.
///
/// # Errors
///
/// Returns `SourceError::Io` if the file cannot be read.
pub fn read_quiz_text(path: &Path) -> Result<String, SourceError> {
    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decoded = String::from_utf8_lossy(&bytes);
    let text: &str = &decoded;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_owned())
}
