use std::collections::HashSet;

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    db::{Question, QuestionStore},
    server::{app::AppState, deserializers::LooseId},
    trivia::{parse_body, QuizCategory, TriviaError},
};

use super::ApiResponse;

#[derive(Deserialize)]
struct QuizRequest {
    previous_questions: Vec<LooseId>,
    quiz_category: QuizCategoryField,
}

#[derive(Deserialize)]
struct QuizCategoryField {
    id: LooseId,
}

#[derive(Serialize)]
struct QuizBody {
    success: bool,
    question: Option<Question>,
}

async fn next_quiz_question<S: QuestionStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> ApiResponse<QuizBody> {
    let payload = parse_body(&body)?;
    let request: QuizRequest = serde_json::from_value(Value::Object(payload))
        .map_err(|err| TriviaError::Unprocessable(format!("malformed quiz request: {err}")))?;

    let previous: HashSet<i64> = request
        .previous_questions
        .into_iter()
        .map(|id| id.0)
        .collect();
    let category = QuizCategory::from(request.quiz_category.id.0);

    let question = state.quiz.next_question(&previous, category).await?;
    Ok(Json(QuizBody {
        success: true,
        question,
    }))
}

pub fn quiz_router<S: QuestionStore + Clone + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/quizzes", post(next_quiz_question::<S>))
        .with_state(state)
}
