use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{filter_ingredients_by_name, Ingredient};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIngredientsParams {
    /// Case-insensitive substring of the ingredient name
    pub q: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<Ingredient>,
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "Owned ingredients in insertion order", body = ListIngredientsResponse)
    )
)]
pub async fn list_ingredients(
    State(store): State<AppState>,
    Query(params): Query<ListIngredientsParams>,
) -> impl IntoResponse {
    let all = store.list_ingredients().await;

    let ingredients: Vec<Ingredient> = match params.q.as_deref() {
        Some(q) => filter_ingredients_by_name(q, &all)
            .into_iter()
            .cloned()
            .collect(),
        None => all,
    };

    (StatusCode::OK, Json(ListIngredientsResponse { ingredients }))
}
