#![forbid(unsafe_code)]

pub mod error;
pub mod extract;
pub mod model;
pub mod time;

pub use error::Error;
pub use extract::{ExtractOptions, Extractor, MarkerAnchor, extract};
pub use model::{OptionNumber, OptionNumberError, QuestionRecord};
pub use time::Clock;
