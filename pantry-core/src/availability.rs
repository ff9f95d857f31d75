//! Reconciles a recipe's required ingredients against the ingredients the user owns.
//!
//! Availability is "owned quantity is nonzero". The required quantity is shown
//! next to it but never compared, and units are never converted.

use crate::models::{AmountUnit, Ingredient, Recipe, RequiredIngredient};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do with a required ingredient whose id matches nothing owned
/// (typically an ingredient deleted after the recipe was written).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedIngredientPolicy {
    /// Drop the row.
    #[default]
    Omit,
    /// Keep a row with an empty name and no owned amount, marked unavailable.
    Placeholder,
}

/// One required ingredient of a recipe, joined with what the user owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRow {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub required_amount_value: f64,
    pub required_amount_unit: AmountUnit,
    /// `None` only for placeholder rows.
    pub owned_amount_value: Option<f64>,
    pub owned_amount_unit: Option<AmountUnit>,
    pub available: bool,
}

impl AvailabilityRow {
    fn matched(required: &RequiredIngredient, owned: &Ingredient) -> Self {
        Self {
            ingredient_id: required.id.clone(),
            ingredient_name: owned.name.clone(),
            required_amount_value: required.required_amount_value,
            required_amount_unit: required.required_amount_unit,
            owned_amount_value: Some(owned.amount_value),
            owned_amount_unit: Some(owned.amount_unit),
            available: owned.amount_value != 0.0,
        }
    }

    fn placeholder(required: &RequiredIngredient) -> Self {
        Self {
            ingredient_id: required.id.clone(),
            ingredient_name: String::new(),
            required_amount_value: required.required_amount_value,
            required_amount_unit: required.required_amount_unit,
            owned_amount_value: None,
            owned_amount_unit: None,
            available: false,
        }
    }

    /// True when the row stands in for an id that matched nothing.
    pub fn is_placeholder(&self) -> bool {
        self.owned_amount_value.is_none()
    }
}

/// Id lookup over a borrowed ingredient list.
///
/// When ids repeat, the first occurrence wins, same as a linear scan would.
pub(crate) struct OwnedIndex<'a> {
    by_id: HashMap<&'a str, &'a Ingredient>,
}

impl<'a> OwnedIndex<'a> {
    pub(crate) fn new(owned: &'a [Ingredient]) -> Self {
        let mut by_id = HashMap::with_capacity(owned.len());
        for ingredient in owned {
            by_id.entry(ingredient.id.as_str()).or_insert(ingredient);
        }
        Self { by_id }
    }

    pub(crate) fn get(&self, id: &str) -> Option<&'a Ingredient> {
        self.by_id.get(id).copied()
    }
}

/// Resolve with the default policy, which omits unresolved ingredients.
pub fn resolve(recipe: &Recipe, owned: &[Ingredient]) -> Vec<AvailabilityRow> {
    resolve_with_policy(recipe, owned, UnresolvedIngredientPolicy::Omit)
}

/// Produce one row per required ingredient, in the recipe's order.
pub fn resolve_with_policy(
    recipe: &Recipe,
    owned: &[Ingredient],
    policy: UnresolvedIngredientPolicy,
) -> Vec<AvailabilityRow> {
    let index = OwnedIndex::new(owned);
    resolve_indexed(recipe, &index, policy)
}

pub(crate) fn resolve_indexed(
    recipe: &Recipe,
    index: &OwnedIndex<'_>,
    policy: UnresolvedIngredientPolicy,
) -> Vec<AvailabilityRow> {
    recipe
        .required_ingredients
        .iter()
        .filter_map(|required| match (index.get(&required.id), policy) {
            (Some(owned), _) => Some(AvailabilityRow::matched(required, owned)),
            (None, UnresolvedIngredientPolicy::Placeholder) => {
                Some(AvailabilityRow::placeholder(required))
            }
            (None, UnresolvedIngredientPolicy::Omit) => None,
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn ingredient(id: &str, name: &str, amount: f64, unit: AmountUnit) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: name.to_string(),
            amount_value: amount,
            amount_unit: unit,
            created_at: None,
            updated_at: None,
        }
    }

    pub(crate) fn required(id: &str, amount: f64, unit: AmountUnit) -> RequiredIngredient {
        RequiredIngredient {
            id: id.to_string(),
            required_amount_value: amount,
            required_amount_unit: unit,
        }
    }

    pub(crate) fn recipe(id: &str, name: &str, required: Vec<RequiredIngredient>) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: name.to_string(),
            image: format!("{id}.png"),
            preparation_process: "Mix everything.".to_string(),
            required_ingredients: required,
            created_at: None,
            updated_at: None,
        }
    }

    fn pantry() -> Vec<Ingredient> {
        vec![
            ingredient("i1", "Flour", 500.0, AmountUnit::Gram),
            ingredient("i2", "Sugar", 0.0, AmountUnit::Gram),
        ]
    }

    fn cake() -> Recipe {
        recipe(
            "r1",
            "Cake",
            vec![
                required("i1", 200.0, AmountUnit::Gram),
                required("i2", 50.0, AmountUnit::Gram),
                required("i3", 1.0, AmountUnit::Piece),
            ],
        )
    }

    #[test]
    fn test_unknown_ingredient_is_omitted() {
        let rows = resolve(&cake(), &pantry());

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].ingredient_name, "Flour");
        assert_eq!(rows[0].required_amount_value, 200.0);
        assert_eq!(rows[0].owned_amount_value, Some(500.0));
        assert_eq!(rows[0].owned_amount_unit, Some(AmountUnit::Gram));
        assert!(rows[0].available);
        assert_eq!(rows[1].ingredient_name, "Sugar");
        assert!(!rows[1].available);
    }

    #[test]
    fn test_placeholder_keeps_position() {
        let mut r = cake();
        r.required_ingredients.swap(0, 2);

        let rows = resolve_with_policy(&r, &pantry(), UnresolvedIngredientPolicy::Placeholder);

        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_placeholder());
        assert_eq!(rows[0].ingredient_id, "i3");
        assert_eq!(rows[0].ingredient_name, "");
        assert!(!rows[0].available);
        assert_eq!(rows[1].ingredient_name, "Sugar");
        assert_eq!(rows[2].ingredient_name, "Flour");
    }

    #[test]
    fn test_row_count_equals_required_count_when_everything_resolves() {
        let mut owned = pantry();
        owned.push(ingredient("i3", "Egg", 6.0, AmountUnit::Piece));

        let rows = resolve(&cake(), &owned);
        assert_eq!(rows.len(), cake().required_ingredients.len());

        let rows = resolve(&cake(), &[]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_order_follows_recipe_not_pantry() {
        let mut owned = pantry();
        owned.reverse();
        owned.push(ingredient("i3", "Egg", 6.0, AmountUnit::Piece));

        let ids: Vec<String> = resolve(&cake(), &owned)
            .into_iter()
            .map(|row| row.ingredient_id)
            .collect();
        assert_eq!(ids, vec!["i1", "i2", "i3"]);
    }

    #[test]
    fn test_available_ignores_required_amount_and_units() {
        // 200 g on hand against 1 kg required still counts as available.
        let owned = vec![ingredient("i1", "Flour", 200.0, AmountUnit::Gram)];
        let r = recipe("r1", "Bread", vec![required("i1", 1.0, AmountUnit::Kilogram)]);

        let rows = resolve(&r, &owned);
        assert!(rows[0].available);

        let owned = vec![ingredient("i1", "Flour", 0.0, AmountUnit::Gram)];
        let r = recipe("r1", "Bread", vec![required("i1", 0.001, AmountUnit::Gram)]);
        assert!(!resolve(&r, &owned)[0].available);
    }

    #[test]
    fn test_first_duplicate_owned_id_wins() {
        let owned = vec![
            ingredient("i1", "Flour", 500.0, AmountUnit::Gram),
            ingredient("i1", "Old flour", 0.0, AmountUnit::Gram),
        ];
        let r = recipe("r1", "Bread", vec![required("i1", 100.0, AmountUnit::Gram)]);

        let rows = resolve(&r, &owned);
        assert_eq!(rows[0].ingredient_name, "Flour");
    }
}
