use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::Recipe;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = Recipe),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match store.get_recipe(&id).await {
        Some(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Recipe with id '{id}' does not exist"),
        ),
    }
}
