use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{Ingredient, IngredientPatch};

#[utoipa::path(
    put,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = String, Path, description = "Ingredient ID")
    ),
    request_body = IngredientPatch,
    responses(
        (status = 200, description = "Ingredient updated", body = Ingredient),
        (status = 400, description = "Invalid ingredient", body = ErrorResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse),
        (status = 409, description = "Another ingredient already has this name", body = ErrorResponse)
    )
)]
pub async fn update_ingredient(
    State(store): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<IngredientPatch>,
) -> impl IntoResponse {
    match store.update_ingredient(&id, request).await {
        Ok(ingredient) => (StatusCode::OK, Json(ingredient)).into_response(),
        Err(e) => store_error_response(e, "update ingredient"),
    }
}
