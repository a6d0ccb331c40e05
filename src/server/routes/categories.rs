use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::{
    db::{Question, QuestionStore},
    server::{
        app::AppState,
        extract::{Path, Query},
    },
};

use super::{ApiResponse, PageQuery};

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category: String,
}

async fn get_categories<S: QuestionStore>(
    State(state): State<AppState<S>>,
) -> ApiResponse<CategoriesBody> {
    let categories = state.questions.list_categories().await?;
    Ok(Json(CategoriesBody {
        success: true,
        categories: categories.into_iter().map(|c| (c.id, c.label)).collect(),
    }))
}

async fn get_category_questions<S: QuestionStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> ApiResponse<CategoryQuestionsBody> {
    let listing = state.questions.list_by_category(id, query.page()).await?;
    Ok(Json(CategoryQuestionsBody {
        success: true,
        questions: listing.page.questions,
        total_questions: listing.page.total,
        current_category: listing.category.label,
    }))
}

pub fn category_router<S: QuestionStore + Clone + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/categories", get(get_categories::<S>))
        .route(
            "/categories/{id}/questions",
            get(get_category_questions::<S>),
        )
        .with_state(state)
}
