use crate::api::{store_error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

/// Recipes that use the ingredient keep their reference; availability and
/// search treat it as unresolved from then on.
#[utoipa::path(
    delete,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(
        ("id" = String, Path, description = "Ingredient ID")
    ),
    responses(
        (status = 204, description = "Ingredient deleted"),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn delete_ingredient(
    State(store): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match store.delete_ingredient(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => store_error_response(e, "delete ingredient"),
    }
}
