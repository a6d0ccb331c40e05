use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum TriviaError {
    #[error("request body is missing or is not a JSON object")]
    BadRequest,

    #[error("unprocessable request: {0}")]
    Unprocessable(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("could not persist the new question: {0}")]
    CreateFailed(#[source] StoreError),

    #[error("could not delete question {id}: {source}")]
    DeleteFailed {
        id: i64,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type TriviaResult<T> = Result<T, TriviaError>;
