use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use pantry_core::{
    resolve_with_policy, search, AvailabilityRow, Recipe, UnresolvedIngredientPolicy,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchRecipesParams {
    /// Comma-separated ingredient names, e.g. "salt, pepper". A recipe matches
    /// if any term is contained in any of its ingredient names.
    pub ingredients: Option<String>,
    /// Policy for the availability rows of each card (default: omit)
    #[serde(default)]
    #[param(inline)]
    pub unresolved: UnresolvedIngredientPolicy,
}

/// A recipe as shown in the list, with its availability rows.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipeCard {
    pub recipe: Recipe,
    pub availability: Vec<AvailabilityRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchRecipesResponse {
    pub recipes: Vec<RecipeCard>,
    /// The query had terms and nothing matched
    pub not_found: bool,
}

#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    params(SearchRecipesParams),
    responses(
        (status = 200, description = "Matching recipes with availability", body = SearchRecipesResponse)
    )
)]
pub async fn search_recipes(
    State(store): State<AppState>,
    Query(params): Query<SearchRecipesParams>,
) -> impl IntoResponse {
    // One snapshot for both the filter and the availability rows
    let snapshot = store.snapshot().await;
    let query = params.ingredients.as_deref().unwrap_or_default();

    let outcome = search(query, &snapshot.recipes, &snapshot.ingredients);
    tracing::debug!(
        query,
        matched = outcome.recipes.len(),
        total = snapshot.recipes.len(),
        "Recipe search"
    );

    let recipes = outcome
        .recipes
        .iter()
        .map(|recipe| RecipeCard {
            availability: resolve_with_policy(recipe, &snapshot.ingredients, params.unresolved),
            recipe: (*recipe).clone(),
        })
        .collect();

    (
        StatusCode::OK,
        Json(SearchRecipesResponse {
            recipes,
            not_found: outcome.not_found,
        }),
    )
}
