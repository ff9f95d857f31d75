use crate::api::{error_response, ErrorResponse};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{resolve_with_policy, AvailabilityRow, UnresolvedIngredientPolicy};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AvailabilityParams {
    /// What to do with required ingredients that match nothing owned (default: omit)
    #[serde(default)]
    #[param(inline)]
    pub unresolved: UnresolvedIngredientPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub recipe_id: String,
    pub recipe_name: String,
    pub rows: Vec<AvailabilityRow>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/availability",
    tag = "recipes",
    params(
        ("id" = String, Path, description = "Recipe ID"),
        AvailabilityParams
    ),
    responses(
        (status = 200, description = "Required ingredients joined with what is on hand", body = AvailabilityResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_availability(
    State(store): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<AvailabilityParams>,
) -> impl IntoResponse {
    let snapshot = store.snapshot().await;

    let Some(recipe) = snapshot.recipes.iter().find(|r| r.id == id) else {
        return error_response(
            StatusCode::NOT_FOUND,
            format!("Recipe with id '{id}' does not exist"),
        );
    };

    let rows = resolve_with_policy(recipe, &snapshot.ingredients, params.unresolved);

    (
        StatusCode::OK,
        Json(AvailabilityResponse {
            recipe_id: recipe.id.clone(),
            recipe_name: recipe.name.clone(),
            rows,
        }),
    )
        .into_response()
}
