use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use pantry_core::{Recipe, RecipeDraft};

/// Required ingredients may reference ids that don't exist (yet); they are
/// reported as unresolved when availability is computed.
#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = RecipeDraft,
    responses(
        (status = 201, description = "Recipe created", body = Recipe),
        (status = 400, description = "Invalid recipe", body = ErrorResponse),
        (status = 409, description = "A recipe with this name already exists", body = ErrorResponse)
    )
)]
pub async fn create_recipe(
    State(store): State<AppState>,
    Json(request): Json<RecipeDraft>,
) -> impl IntoResponse {
    match store.create_recipe(request).await {
        Ok(recipe) => (StatusCode::CREATED, Json(recipe)).into_response(),
        Err(e) => store_error_response(e, "create recipe"),
    }
}
