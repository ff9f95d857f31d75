pub mod availability;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;
pub mod update;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes).post(create::create_recipe))
        .route("/search", get(search::search_recipes))
        .route(
            "/{id}",
            get(get::get_recipe)
                .put(update::update_recipe)
                .delete(delete::delete_recipe),
        )
        .route("/{id}/availability", get(availability::get_availability))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_recipes,
        create::create_recipe,
        get::get_recipe,
        update::update_recipe,
        delete::delete_recipe,
        availability::get_availability,
        search::search_recipes,
    ),
    components(schemas(
        list::ListRecipesResponse,
        availability::AvailabilityResponse,
        search::SearchRecipesResponse,
        search::RecipeCard,
        pantry_core::Recipe,
        pantry_core::RecipeDraft,
        pantry_core::RecipePatch,
        pantry_core::RequiredIngredient,
        pantry_core::AvailabilityRow,
        pantry_core::UnresolvedIngredientPolicy,
    ))
)]
pub struct ApiDoc;
