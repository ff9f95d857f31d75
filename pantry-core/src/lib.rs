pub mod availability;
pub mod models;
pub mod search;
pub mod validation;

pub use availability::{resolve, resolve_with_policy, AvailabilityRow, UnresolvedIngredientPolicy};
pub use models::{
    AmountUnit, Ingredient, IngredientDraft, IngredientPatch, Recipe, RecipeDraft, RecipePatch,
    RequiredIngredient, UnknownUnit,
};
pub use search::{
    filter, filter_ingredients_by_name, filter_recipes_by_text, search, SearchOutcome, SearchTerms,
};
pub use validation::{
    validate_ingredient, validate_recipe, FieldError, FieldErrorKind, ValidationErrors,
};
