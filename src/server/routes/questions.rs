use std::collections::BTreeMap;

use axum::{
    body::Bytes,
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use serde::Serialize;

use crate::{
    db::{Question, QuestionStore},
    server::{
        app::AppState,
        extract::{Path, Query},
    },
    trivia::{parse_body, QuestionSubmission, SubmissionOutcome},
};

use super::{ApiResponse, PageQuery};

#[derive(Serialize)]
struct QuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct SearchBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    created_id: i64,
    created_question: String,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
#[serde(untagged)]
enum SubmissionBody {
    Search(SearchBody),
    Created(CreatedBody),
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted_id: i64,
    total_questions: usize,
}

async fn get_questions<S: QuestionStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<QuestionsBody> {
    let listing = state.questions.list_questions(query.page()).await?;
    Ok(Json(QuestionsBody {
        success: true,
        questions: listing.page.questions,
        total_questions: listing.page.total,
        categories: listing
            .categories
            .into_iter()
            .map(|c| (c.id, c.label))
            .collect(),
        current_category: None,
    }))
}

async fn submit_question<S: QuestionStore>(
    State(state): State<AppState<S>>,
    Query(query): Query<PageQuery>,
    body: Bytes,
) -> ApiResponse<SubmissionBody> {
    let submission = QuestionSubmission::try_from(parse_body(&body)?)?;
    let body = match state.questions.submit(submission, query.page()).await? {
        SubmissionOutcome::Found(page) => SubmissionBody::Search(SearchBody {
            success: true,
            questions: page.questions,
            total_questions: page.total,
            current_category: None,
        }),
        SubmissionOutcome::Created(created) => SubmissionBody::Created(CreatedBody {
            success: true,
            created_id: created.id,
            created_question: created.question,
            questions: created.page.questions,
            total_questions: created.page.total,
        }),
    };
    Ok(Json(body))
}

async fn delete_question<S: QuestionStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> ApiResponse<DeletedBody> {
    let deleted = state.questions.delete_question(id).await?;
    Ok(Json(DeletedBody {
        success: true,
        deleted_id: deleted.id,
        total_questions: deleted.total,
    }))
}

pub fn questions_router<S: QuestionStore + Clone + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route(
            "/questions",
            get(get_questions::<S>).post(submit_question::<S>),
        )
        .route("/questions/{id}", delete(delete_question::<S>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::db::memory::MemoryStore;
    use crate::server::routes::testing::{app, call, ids};

    fn science_and_art() -> MemoryStore {
        MemoryStore::new()
            .with_category(1, "Science")
            .with_category(2, "Art")
            .with_question("In which year did the war end?", 1)
            .with_question("Which artist painted Guernica?", 2)
            .with_question("What is the title of the first book?", 2)
    }

    #[tokio::test]
    async fn listing_includes_categories_and_no_current_category() {
        let (status, body) = call(app(science_and_art()), "GET", "/questions", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(ids(&body), vec![1, 2, 3]);
        assert_eq!(body["total_questions"], 3);
        assert_eq!(body["categories"]["2"], "Art");
        assert_eq!(body["current_category"], Value::Null);

        let question = &body["questions"][0];
        assert_eq!(question["question"], "In which year did the war end?");
        assert_eq!(question["difficulty"], 1);
        assert!(question["answer"].is_string());
    }

    #[tokio::test]
    async fn page_past_the_end_is_not_found() {
        let (status, body) =
            call(app(science_and_art()), "GET", "/questions?page=1000", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Resource not found");
    }

    #[tokio::test]
    async fn empty_store_is_not_found() {
        let store = MemoryStore::new().with_category(1, "Science");
        let (status, _) = call(app(store), "GET", "/questions", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_returns_the_new_total() {
        let store = science_and_art();
        let (status, body) = call(app(store.clone()), "DELETE", "/questions/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["deleted_id"], 1);
        assert_eq!(body["total_questions"], 2);

        let (status, body) = call(app(store), "DELETE", "/questions/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Resource not found");
    }

    #[tokio::test]
    async fn failed_delete_is_a_bad_request() {
        let store = science_and_art();
        store.fail_deletes();
        let (status, body) = call(app(store), "DELETE", "/questions/1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], 400);
    }

    #[tokio::test]
    async fn create_question_refreshes_the_listing() {
        let store = science_and_art();
        let payload = r#"{"question": "what year are we in?", "answer": 2022, "difficulty": 1, "category": 2}"#;
        let (status, body) = call(app(store.clone()), "POST", "/questions", Some(payload)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["created_id"], 4);
        assert_eq!(body["created_question"], "what year are we in?");
        assert_eq!(body["total_questions"], 4);
        assert_eq!(ids(&body), vec![1, 2, 3, 4]);

        let (_, listing) = call(app(store), "GET", "/questions", None).await;
        assert_eq!(listing["total_questions"], 4);
        assert_eq!(listing["questions"][3]["answer"], "2022");
    }

    #[tokio::test]
    async fn create_with_wrong_types_is_unprocessable() {
        let payload = r#"{"question": "x", "answer": "y", "difficulty": "hard", "category": "Art"}"#;
        let (status, body) = call(app(science_and_art()), "POST", "/questions", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 422);
        assert_eq!(body["message"], "unprocessable");
    }

    #[tokio::test]
    async fn create_with_missing_fields_is_unprocessable() {
        let payload = r#"{"question": "x", "answer": "y"}"#;
        let (status, _) = call(app(science_and_art()), "POST", "/questions", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn create_failure_is_internal() {
        let store = science_and_art();
        store.fail_inserts();
        let payload = r#"{"question": "x", "answer": "y", "difficulty": 1, "category": 1}"#;
        let (status, body) = call(app(store), "POST", "/questions", Some(payload)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], 500);
        assert_eq!(body["message"], "Internal Server error");
    }

    #[tokio::test]
    async fn missing_body_is_a_bad_request() {
        for body in [None, Some(""), Some("{}"), Some("{not json")] {
            let (status, response) = call(app(science_and_art()), "POST", "/questions", body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert_eq!(response["message"], "Bad Request");
        }
    }

    #[tokio::test]
    async fn search_matches_substrings_case_insensitively() {
        let (status, body) = call(
            app(science_and_art()),
            "POST",
            "/questions",
            Some(r#"{"searchTerm": "In which"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(ids(&body), vec![1]);
        assert_eq!(body["total_questions"], 1);
        assert_eq!(body["current_category"], Value::Null);

        let (_, body) = call(
            app(science_and_art()),
            "POST",
            "/questions",
            Some(r#"{"searchTerm": "WHICH"}"#),
        )
        .await;
        assert_eq!(ids(&body), vec![1, 2]);
    }

    #[tokio::test]
    async fn search_without_matches_still_succeeds() {
        let (status, body) = call(
            app(science_and_art()),
            "POST",
            "/questions",
            Some(r#"{"searchTerm": "In which country"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert!(ids(&body).is_empty());
        assert_eq!(body["total_questions"], 0);
    }
}
