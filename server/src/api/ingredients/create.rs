use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use pantry_core::{Ingredient, IngredientDraft};

#[utoipa::path(
    post,
    path = "/api/ingredients",
    tag = "ingredients",
    request_body = IngredientDraft,
    responses(
        (status = 201, description = "Ingredient created", body = Ingredient),
        (status = 400, description = "Invalid ingredient", body = ErrorResponse),
        (status = 409, description = "An ingredient with this name already exists", body = ErrorResponse)
    )
)]
pub async fn create_ingredient(
    State(store): State<AppState>,
    Json(request): Json<IngredientDraft>,
) -> impl IntoResponse {
    match store.create_ingredient(request).await {
        Ok(ingredient) => (StatusCode::CREATED, Json(ingredient)).into_response(),
        Err(e) => store_error_response(e, "create ingredient"),
    }
}
