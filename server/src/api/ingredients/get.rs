use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::Ingredient;

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = String, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 200, description = "Ingredient details", body = Ingredient),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match store.get_ingredient(&id).await {
        Some(ingredient) => (StatusCode::OK, Json(ingredient)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("Ingredient with id '{id}' does not exist"),
        ),
    }
}
