use std::collections::HashSet;
use std::fmt;

use rand::{rng, seq::IndexedRandom};

use crate::db::{Question, QuestionStore};
use crate::telemetry::{QUIZ_EXHAUSTED_CNTR, QUIZ_SERVED_CNTR};

use super::error::{TriviaError, TriviaResult};

/// Which questions a quiz round may draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizCategory {
    All,
    Only(i64),
}

impl QuizCategory {
    pub fn category_id(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Only(id) => Some(id),
        }
    }
}

// clients encode "all categories" as id 0
impl From<i64> for QuizCategory {
    fn from(id: i64) -> Self {
        match id {
            0 => Self::All,
            id => Self::Only(id),
        }
    }
}

impl fmt::Display for QuizCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(id) => write!(f, "{id}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct QuizSelector<S> {
    store: S,
}

impl<S: QuestionStore> QuizSelector<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Picks a random question that is not in `previous`.
    ///
    /// `None` means the quiz is exhausted for this category.
    #[tracing::instrument(skip(self, previous), fields(previous = previous.len()))]
    pub async fn next_question(
        &self,
        previous: &HashSet<i64>,
        category: QuizCategory,
    ) -> TriviaResult<Option<Question>> {
        let candidates = self
            .store
            .questions_excluding(previous, category.category_id())
            .await
            .map_err(|err| {
                TriviaError::Unprocessable(format!("could not collect quiz candidates: {err}"))
            })?;

        let label = category.to_string();
        let question = choose(&candidates);
        match &question {
            Some(question) => {
                tracing::debug!(id = question.id, candidates = candidates.len(), "quiz question chosen");
                QUIZ_SERVED_CNTR.with_label_values(&[label.as_str()]).inc();
            }
            None => {
                tracing::info!("quiz exhausted");
                QUIZ_EXHAUSTED_CNTR.with_label_values(&[label.as_str()]).inc();
            }
        }
        Ok(question)
    }
}

fn choose(candidates: &[Question]) -> Option<Question> {
    candidates.choose(&mut rng()).cloned()
}
