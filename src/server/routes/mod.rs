mod categories;
mod questions;
mod quizzes;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quiz_router;

use axum::Json;
use serde::Deserialize;

use super::deserializers::deserialize_page;
use super::error::ApiError;

pub type ApiResponse<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_page")]
    page: Option<usize>,
}

impl PageQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1)
    }
}
