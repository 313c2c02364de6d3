use thiserror::Error;

use crate::model::OptionNumberError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    OptionNumber(#[from] OptionNumberError),
}
