//! Free-text filters over recipes and ingredients.
//!
//! [`filter`] / [`search`] implement the "search by ingredients" box: a
//! comma-separated list of terms matched against the names of the ingredients
//! each recipe requires. The two `*_by_*` helpers are plain substring searches
//! over a single collection.

use crate::availability::OwnedIndex;
use crate::models::{Ingredient, Recipe};

/// Lower-cased, trimmed, non-empty terms of a comma-separated query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms {
    terms: Vec<String>,
}

impl SearchTerms {
    pub fn parse(query: &str) -> Self {
        let terms = query
            .split(',')
            .map(|token| token.trim().to_lowercase())
            .filter(|token| !token.is_empty())
            .collect();
        Self { terms }
    }

    /// No usable term: the query was empty, blank, or only separators.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.terms
    }

    /// True if any term occurs in any of the (already lower-cased) names.
    fn matches_any(&self, names: &[String]) -> bool {
        self.terms
            .iter()
            .any(|term| names.iter().any(|name| name.contains(term.as_str())))
    }
}

/// Result of an ingredient search together with its "nothing matched" signal.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<'a> {
    pub recipes: Vec<&'a Recipe>,
    /// Set when the query had at least one term and no recipe matched.
    pub not_found: bool,
}

/// Keep the recipes that require an ingredient whose name contains any term.
///
/// A query without terms returns every recipe. Relative order is preserved.
pub fn filter<'a>(query: &str, recipes: &'a [Recipe], owned: &[Ingredient]) -> Vec<&'a Recipe> {
    filter_terms(&SearchTerms::parse(query), recipes, owned)
}

pub fn search<'a>(query: &str, recipes: &'a [Recipe], owned: &[Ingredient]) -> SearchOutcome<'a> {
    let terms = SearchTerms::parse(query);
    let recipes = filter_terms(&terms, recipes, owned);
    SearchOutcome {
        not_found: !terms.is_empty() && recipes.is_empty(),
        recipes,
    }
}

pub fn filter_terms<'a>(
    terms: &SearchTerms,
    recipes: &'a [Recipe],
    owned: &[Ingredient],
) -> Vec<&'a Recipe> {
    if terms.is_empty() {
        return recipes.iter().collect();
    }

    let index = OwnedIndex::new(owned);
    recipes
        .iter()
        .filter(|recipe| terms.matches_any(&ingredient_names(recipe, &index)))
        .collect()
}

/// Lower-cased names of a recipe's required ingredients, index-aligned with
/// `required_ingredients`. Unresolved ids become an empty string, which no
/// term can match.
fn ingredient_names(recipe: &Recipe, index: &OwnedIndex<'_>) -> Vec<String> {
    recipe
        .required_ingredients
        .iter()
        .map(|required| {
            index
                .get(&required.id)
                .map(|owned| owned.name.to_lowercase())
                .unwrap_or_default()
        })
        .collect()
}

fn normalize_query(query: &str) -> Option<String> {
    let query = query.trim().to_lowercase();
    (!query.is_empty()).then_some(query)
}

/// Case-insensitive substring search on ingredient names.
pub fn filter_ingredients_by_name<'a>(
    query: &str,
    ingredients: &'a [Ingredient],
) -> Vec<&'a Ingredient> {
    let Some(query) = normalize_query(query) else {
        return ingredients.iter().collect();
    };
    ingredients
        .iter()
        .filter(|ingredient| ingredient.name.to_lowercase().contains(&query))
        .collect()
}

/// Case-insensitive substring search on recipe names and preparation text.
pub fn filter_recipes_by_text<'a>(query: &str, recipes: &'a [Recipe]) -> Vec<&'a Recipe> {
    let Some(query) = normalize_query(query) else {
        return recipes.iter().collect();
    };
    recipes
        .iter()
        .filter(|recipe| {
            recipe.name.to_lowercase().contains(&query)
                || recipe.preparation_process.to_lowercase().contains(&query)
        })
        .collect()
}
