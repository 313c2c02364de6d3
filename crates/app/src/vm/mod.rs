mod quiz_vm;
mod time_fmt;

pub use quiz_vm::{PrimaryAction, QuestionCardVm, QuizIntent, QuizOutcome, QuizVm, ResultsVm};
