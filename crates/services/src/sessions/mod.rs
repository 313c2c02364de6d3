mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use progress::{SessionProgress, SessionStatus};
pub use service::{IgnoredReason, QuizSession, Transition};
pub use view::{QuestionOutcome, ResultSummary};
pub use workflow::{LoadReport, QuizWorkflow, read_quiz_text};
