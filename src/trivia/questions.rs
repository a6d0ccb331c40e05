use std::num::NonZeroUsize;

use crate::db::{Category, NewQuestion, Question, QuestionStore};

use super::error::{TriviaError, TriviaResult};
use super::pagination::paginate;
use super::request::QuestionSubmission;

/// One page of questions together with the size of the whole selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub page: QuestionPage,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryListing {
    pub page: QuestionPage,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedQuestion {
    pub id: i64,
    pub question: String,
    pub page: QuestionPage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedQuestion {
    pub id: i64,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Found(QuestionPage),
    Created(CreatedQuestion),
}

#[derive(Debug, Clone)]
pub struct QuestionService<S> {
    store: S,
    page_size: NonZeroUsize,
}

impl<S: QuestionStore> QuestionService<S> {
    pub fn new(store: S, page_size: NonZeroUsize) -> Self {
        Self { store, page_size }
    }

    fn page_of(&self, questions: &[Question], page: usize) -> QuestionPage {
        QuestionPage {
            questions: paginate(questions, page, self.page_size).to_vec(),
            total: questions.len(),
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_categories(&self) -> TriviaResult<Vec<Category>> {
        let categories = self.store.categories().await?;
        if categories.is_empty() {
            return Err(TriviaError::NotFound("categories".to_owned()));
        }
        Ok(categories)
    }

    /// An empty page is `NotFound`, whether the page is past the end or the
    /// store holds no questions at all.
    #[tracing::instrument(skip(self))]
    pub async fn list_questions(&self, page: usize) -> TriviaResult<Listing> {
        let questions = self.store.questions().await?;
        let page = self.page_of(&questions, page);
        if page.questions.is_empty() {
            return Err(TriviaError::NotFound("questions page".to_owned()));
        }
        let categories = self.store.categories().await?;
        Ok(Listing { page, categories })
    }

    #[tracing::instrument(skip(self))]
    pub async fn search_questions(&self, term: &str, page: usize) -> TriviaResult<QuestionPage> {
        let matches = self.store.search_questions(term).await?;
        tracing::debug!(matches = matches.len(), "search finished");
        Ok(self.page_of(&matches, page))
    }

    #[tracing::instrument(skip(self))]
    pub async fn list_by_category(
        &self,
        category_id: i64,
        page: usize,
    ) -> TriviaResult<CategoryListing> {
        let category = self
            .store
            .category(category_id)
            .await?
            .ok_or_else(|| TriviaError::NotFound(format!("category {category_id}")))?;
        let questions = self.store.questions_in_category(category.id).await?;
        Ok(CategoryListing {
            page: self.page_of(&questions, page),
            category,
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn create_question(
        &self,
        question: NewQuestion,
        page: usize,
    ) -> TriviaResult<CreatedQuestion> {
        let id = self
            .store
            .insert_question(&question)
            .await
            .map_err(TriviaError::CreateFailed)?;
        tracing::info!(id, category = question.category, "question created");

        let questions = self
            .store
            .questions()
            .await
            .map_err(TriviaError::CreateFailed)?;
        Ok(CreatedQuestion {
            id,
            question: question.question,
            page: self.page_of(&questions, page),
        })
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete_question(&self, id: i64) -> TriviaResult<DeletedQuestion> {
        if self.store.question(id).await?.is_none() {
            return Err(TriviaError::NotFound(format!("question {id}")));
        }
        let delete_failed = |source| TriviaError::DeleteFailed { id, source };

        if !self.store.delete_question(id).await.map_err(delete_failed)? {
            return Err(TriviaError::NotFound(format!("question {id}")));
        }
        let total = self
            .store
            .count_questions()
            .await
            .map_err(delete_failed)?;
        tracing::info!(id, total, "question deleted");
        Ok(DeletedQuestion { id, total })
    }

    /// Runs a search or a creation depending on what the payload carried.
    pub async fn submit(
        &self,
        submission: QuestionSubmission,
        page: usize,
    ) -> TriviaResult<SubmissionOutcome> {
        match submission {
            QuestionSubmission::Search { term } => self
                .search_questions(&term, page)
                .await
                .map(SubmissionOutcome::Found),
            QuestionSubmission::Create(question) => self
                .create_question(question, page)
                .await
                .map(SubmissionOutcome::Created),
        }
    }
}
