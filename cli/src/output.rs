use crate::client::SearchResults;
use anyhow::{bail, Context, Result};
use pantry_core::{AmountUnit, AvailabilityRow, Ingredient, Recipe, RequiredIngredient};
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Vec<FieldDetail>,
}

#[derive(Deserialize)]
struct FieldDetail {
    field: String,
    message: String,
}

/// Parse `ID:AMOUNT:UNIT`. The unit may contain a space, as in `fl oz`.
pub fn parse_requirement(raw: &str) -> Result<RequiredIngredient> {
    let mut parts = raw.splitn(3, ':');
    let (Some(id), Some(amount), Some(unit)) = (parts.next(), parts.next(), parts.next()) else {
        bail!("Expected ID:AMOUNT:UNIT, got '{}'", raw);
    };

    let id = id.trim();
    if id.is_empty() {
        bail!("Missing ingredient id in '{}'", raw);
    }
    let required_amount_value: f64 = amount
        .trim()
        .parse()
        .with_context(|| format!("Invalid amount '{}' in '{}'", amount, raw))?;
    let required_amount_unit: AmountUnit = unit.trim().parse()?;

    Ok(RequiredIngredient {
        id: id.to_string(),
        required_amount_value,
        required_amount_unit,
    })
}

pub fn ingredient_line(ingredient: &Ingredient) -> String {
    format!(
        "{}  {}  {} {}",
        ingredient.id, ingredient.name, ingredient.amount_value, ingredient.amount_unit
    )
}

pub fn recipe_line(recipe: &Recipe) -> String {
    format!(
        "{}  {}  ({} ingredients)",
        recipe.id,
        recipe.name,
        recipe.required_ingredients.len()
    )
}

pub fn availability_line(row: &AvailabilityRow) -> String {
    let required = format!(
        "{} {} required",
        row.required_amount_value, row.required_amount_unit
    );

    if row.is_placeholder() {
        return format!("<missing>  {}", required);
    }

    let owned = match (row.available, row.owned_amount_value, row.owned_amount_unit) {
        (true, Some(value), Some(unit)) => format!("{} {} available", value, unit),
        _ => "unavailable".to_string(),
    };
    format!("{}  {}  {}", row.ingredient_name, required, owned)
}

/// Human-readable message from an error response body. Per-field details go
/// on their own indented lines; a body that isn't our error shape is shown as is.
pub fn server_error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) if err.details.is_empty() => err.error,
        Ok(err) => {
            let fields: Vec<String> = err
                .details
                .iter()
                .map(|d| format!("  {}: {}", d.field, d.message))
                .collect();
            format!("{}\n{}", err.error, fields.join("\n"))
        }
        Err(_) => body.to_string(),
    }
}

pub fn search_lines(results: &SearchResults) -> Vec<String> {
    if results.not_found {
        return vec!["No recipes found.".to_string()];
    }
    if results.recipes.is_empty() {
        return vec!["There are no recipes.".to_string()];
    }

    let mut lines = Vec::new();
    for card in &results.recipes {
        lines.push(recipe_line(&card.recipe));
        for row in &card.availability {
            lines.push(format!("    {}", availability_line(row)));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RecipeCard;

    fn row(name: &str, owned: Option<f64>) -> AvailabilityRow {
        AvailabilityRow {
            ingredient_id: "i1".to_string(),
            ingredient_name: name.to_string(),
            required_amount_value: 200.0,
            required_amount_unit: AmountUnit::Gram,
            owned_amount_value: owned,
            owned_amount_unit: owned.map(|_| AmountUnit::Gram),
            available: owned.is_some_and(|v| v != 0.0),
        }
    }

    #[test]
    fn test_parse_requirement() {
        let req = parse_requirement("abc:2.5:fl oz").unwrap();
        assert_eq!(req.id, "abc");
        assert_eq!(req.required_amount_value, 2.5);
        assert_eq!(req.required_amount_unit, AmountUnit::FluidOunce);

        assert!(parse_requirement("abc:2").is_err());
        assert!(parse_requirement(":2:g").is_err());
        assert!(parse_requirement("abc:lots:g").is_err());
        assert!(parse_requirement("abc:2:bushel").is_err());
    }

    #[test]
    fn test_availability_lines() {
        assert_eq!(
            availability_line(&row("Flour", Some(500.0))),
            "Flour  200 g required  500 g available"
        );
        assert_eq!(
            availability_line(&row("Sugar", Some(0.0))),
            "Sugar  200 g required  unavailable"
        );
        assert_eq!(
            availability_line(&row("", None)),
            "<missing>  200 g required"
        );
    }

    fn soup() -> Recipe {
        Recipe {
            id: "r1".to_string(),
            name: "Soup".to_string(),
            image: String::new(),
            preparation_process: "Boil.".to_string(),
            required_ingredients: vec![RequiredIngredient {
                id: "i1".to_string(),
                required_amount_value: 200.0,
                required_amount_unit: AmountUnit::Gram,
            }],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_search_lines_not_found() {
        let results = SearchResults {
            recipes: vec![],
            not_found: true,
        };
        assert_eq!(search_lines(&results), vec!["No recipes found."]);
    }

    #[test]
    fn test_search_lines_empty_store() {
        let results = SearchResults {
            recipes: vec![],
            not_found: false,
        };
        assert_eq!(search_lines(&results), vec!["There are no recipes."]);
    }

    #[test]
    fn test_search_lines_cards() {
        let results = SearchResults {
            recipes: vec![RecipeCard {
                recipe: soup(),
                availability: vec![row("Salt", Some(500.0)), row("", None)],
            }],
            not_found: false,
        };
        assert_eq!(
            search_lines(&results),
            vec![
                "r1  Soup  (1 ingredients)",
                "    Salt  200 g required  500 g available",
                "    <missing>  200 g required",
            ]
        );
    }

    #[test]
    fn test_server_error_message() {
        assert_eq!(
            server_error_message(r#"{"error":"Recipe with id 'x' does not exist"}"#),
            "Recipe with id 'x' does not exist"
        );

        let body = r#"{"error":"Validation of input failed","details":[
            {"field":"name","message":"must not be empty","kind":"invalid"},
            {"field":"amountValue","message":"must be between 0 and 9999999"}
        ]}"#;
        let expected = [
            "Validation of input failed",
            "  name: must not be empty",
            "  amountValue: must be between 0 and 9999999",
        ]
        .join("\n");
        assert_eq!(server_error_message(body), expected);

        assert_eq!(server_error_message("Bad Gateway"), "Bad Gateway");
    }
}
