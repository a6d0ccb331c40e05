use std::collections::HashSet;
use std::future::Future;

use sqlx::SqlitePool;
use thiserror::Error;

use super::queries::{categories, questions};
use super::{Category, NewQuestion, Question};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Read/write access to questions and categories.
///
/// Every scan of questions is ordered by id, scans of categories by label.
pub trait QuestionStore: Send + Sync {
    fn questions(&self) -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    fn categories(&self) -> impl Future<Output = StoreResult<Vec<Category>>> + Send;

    fn questions_in_category(
        &self,
        category: i64,
    ) -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    /// Case-insensitive substring match on the question text.
    fn search_questions(&self, term: &str)
        -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    /// Questions whose id is not in `excluded`, limited to `category` when given.
    fn questions_excluding(
        &self,
        excluded: &HashSet<i64>,
        category: Option<i64>,
    ) -> impl Future<Output = StoreResult<Vec<Question>>> + Send;

    fn category(&self, id: i64) -> impl Future<Output = StoreResult<Option<Category>>> + Send;

    fn question(&self, id: i64) -> impl Future<Output = StoreResult<Option<Question>>> + Send;

    fn count_questions(&self) -> impl Future<Output = StoreResult<usize>> + Send;

    /// Stores the question and returns its assigned id.
    fn insert_question(
        &self,
        question: &NewQuestion,
    ) -> impl Future<Output = StoreResult<i64>> + Send;

    /// Returns whether a row was removed.
    fn delete_question(&self, id: i64) -> impl Future<Output = StoreResult<bool>> + Send;
}

#[derive(Clone, Debug)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl QuestionStore for SqliteStore {
    async fn questions(&self) -> StoreResult<Vec<Question>> {
        Ok(questions::get_all_questions(&self.pool).await?)
    }

    async fn categories(&self) -> StoreResult<Vec<Category>> {
        Ok(categories::get_all_categories(&self.pool).await?)
    }

    async fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>> {
        Ok(questions::get_questions_for_category(&self.pool, category).await?)
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        Ok(questions::search_questions(&self.pool, term).await?)
    }

    async fn questions_excluding(
        &self,
        excluded: &HashSet<i64>,
        category: Option<i64>,
    ) -> StoreResult<Vec<Question>> {
        Ok(questions::get_questions_excluding(&self.pool, excluded, category).await?)
    }

    async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(categories::get_category(&self.pool, id).await?)
    }

    async fn question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(questions::get_question(&self.pool, id).await?)
    }

    async fn count_questions(&self) -> StoreResult<usize> {
        let count = questions::count_questions(&self.pool).await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn insert_question(&self, question: &NewQuestion) -> StoreResult<i64> {
        Ok(questions::create_question(&self.pool, question).await?)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<bool> {
        Ok(questions::delete_question(&self.pool, id).await? > 0)
    }
}
