mod option;
mod question;

pub use option::{OptionNumber, OptionNumberError};
pub use question::QuestionRecord;
