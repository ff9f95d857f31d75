use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{Recipe, RecipePatch};

#[utoipa::path(
    put,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID")
    ),
    request_body = RecipePatch,
    responses(
        (status = 200, description = "Recipe updated", body = Recipe),
        (status = 400, description = "Invalid recipe", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse),
        (status = 409, description = "Another recipe already has this name", body = ErrorResponse)
    )
)]
pub async fn update_recipe(
    State(store): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<RecipePatch>,
) -> impl IntoResponse {
    match store.update_recipe(&id, request).await {
        Ok(recipe) => (StatusCode::OK, Json(recipe)).into_response(),
        Err(e) => store_error_response(e, "update recipe"),
    }
}
