use std::path::PathBuf;
use thiserror::Error;

use quiz_core::model::OptionNumber;
use services::SourceError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("no questions found in {}", .path.display())]
    NoQuestions { path: PathBuf },

    #[error("invalid answer sheet: {0}")]
    AnswerSheet(#[from] quiz_core::Error),

    #[error("answer sheet has {given} entries but the quiz has {total} questions")]
    TooManyAnswers { given: usize, total: usize },

    #[error("question {question} has no option {answer}")]
    OptionNotOffered {
        question: usize,
        answer: OptionNumber,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),
}

impl AppError {
    /// Process exit code: 2 for a file without questions, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::NoQuestions { .. } => 2,
            _ => 1,
        }
    }
}
