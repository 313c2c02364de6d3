#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use quiz_core::Clock;
pub use sessions as session;

pub use error::SourceError;

pub use sessions::{
    IgnoredReason, LoadReport, QuestionOutcome, QuizSession, QuizWorkflow, ResultSummary,
    SessionProgress, SessionStatus, Transition,
};
