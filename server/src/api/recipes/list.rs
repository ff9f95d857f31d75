use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{filter_recipes_by_text, Recipe};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Case-insensitive substring of the recipe name or preparation process
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<Recipe>,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipes in insertion order", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(
    State(store): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> impl IntoResponse {
    let all = store.list_recipes().await;

    let recipes: Vec<Recipe> = match params.q.as_deref() {
        Some(q) => filter_recipes_by_text(q, &all).into_iter().cloned().collect(),
        None => all,
    };

    (StatusCode::OK, Json(ListRecipesResponse { recipes }))
}
