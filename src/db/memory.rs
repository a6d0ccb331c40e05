//! In-memory [`QuestionStore`] used by the service and handler tests.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{Category, NewQuestion, Question, QuestionStore, StoreError, StoreResult};

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    categories: Vec<Category>,
    questions: Vec<Question>,
    fail_reads: bool,
    fail_inserts: bool,
    fail_deletes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, id: i64, label: &str) -> Self {
        self.lock().categories.push(Category {
            id,
            label: label.to_owned(),
        });
        self
    }

    pub fn with_question(self, question: &str, category: i64) -> Self {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.questions.push(Question {
            id,
            question: question.to_owned(),
            answer: format!("answer to {question}"),
            category,
            difficulty: 1,
        });
        drop(inner);
        self
    }

    pub fn fail_reads(&self) {
        self.lock().fail_reads = true;
    }

    pub fn fail_inserts(&self) {
        self.lock().fail_inserts = true;
    }

    pub fn fail_deletes(&self) {
        self.lock().fail_deletes = true;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("memory store lock poisoned")
    }

    fn read(&self) -> StoreResult<MutexGuard<'_, Inner>> {
        let inner = self.lock();
        if inner.fail_reads {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(inner)
    }

    fn select(&self, filter: impl Fn(&Question) -> bool) -> StoreResult<Vec<Question>> {
        let mut questions: Vec<Question> = self
            .read()?
            .questions
            .iter()
            .filter(|q| filter(*q))
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.id);
        Ok(questions)
    }
}

impl Inner {
    fn next_id(&self) -> i64 {
        self.questions.iter().map(|q| q.id).max().unwrap_or(0) + 1
    }
}

impl QuestionStore for MemoryStore {
    async fn questions(&self) -> StoreResult<Vec<Question>> {
        self.select(|_| true)
    }

    async fn categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories = self.read()?.categories.clone();
        categories.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
        Ok(categories)
    }

    async fn questions_in_category(&self, category: i64) -> StoreResult<Vec<Question>> {
        self.select(|q| q.category == category)
    }

    async fn search_questions(&self, term: &str) -> StoreResult<Vec<Question>> {
        let term = term.to_lowercase();
        self.select(|q| q.question.to_lowercase().contains(&term))
    }

    async fn questions_excluding(
        &self,
        excluded: &HashSet<i64>,
        category: Option<i64>,
    ) -> StoreResult<Vec<Question>> {
        self.select(|q| !excluded.contains(&q.id) && category.is_none_or(|c| q.category == c))
    }

    async fn category(&self, id: i64) -> StoreResult<Option<Category>> {
        Ok(self.read()?.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn question(&self, id: i64) -> StoreResult<Option<Question>> {
        Ok(self.read()?.questions.iter().find(|q| q.id == id).cloned())
    }

    async fn count_questions(&self) -> StoreResult<usize> {
        Ok(self.read()?.questions.len())
    }

    async fn insert_question(&self, question: &NewQuestion) -> StoreResult<i64> {
        let mut inner = self.lock();
        if inner.fail_inserts {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        let id = inner.next_id();
        inner.questions.push(Question {
            id,
            question: question.question.clone(),
            answer: question.answer.clone(),
            category: question.category,
            difficulty: question.difficulty,
        });
        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> StoreResult<bool> {
        let mut inner = self.lock();
        if inner.fail_deletes {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        let before = inner.questions.len();
        inner.questions.retain(|q| q.id != id);
        Ok(inner.questions.len() < before)
    }
}
