use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Unit tokens a quantity can be expressed in.
///
/// Units are labels only: nothing in the system converts between them.
/// The slash-separated aliases are localized tokens written by older mobile
/// clients; they normalize to the plain token on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AmountUnit {
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "dl")]
    Deciliter,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "mg")]
    Milligram,
    #[serde(rename = "dkg")]
    Decagram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "tsp", alias = "tsp/ČL")]
    Teaspoon,
    #[serde(rename = "tbsp", alias = "tbsp/PL")]
    Tablespoon,
    #[serde(rename = "fl oz")]
    FluidOunce,
    #[serde(rename = "pc", alias = "pc/ks")]
    Piece,
    #[serde(rename = "c", alias = "c/hrn")]
    Cup,
    #[serde(rename = "pt")]
    Pint,
    #[serde(rename = "qt")]
    Quart,
    #[serde(rename = "gal")]
    Gallon,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "oz")]
    Ounce,
}

impl AmountUnit {
    pub const ALL: &'static [AmountUnit] = &[
        AmountUnit::Milliliter,
        AmountUnit::Deciliter,
        AmountUnit::Liter,
        AmountUnit::Gram,
        AmountUnit::Milligram,
        AmountUnit::Decagram,
        AmountUnit::Kilogram,
        AmountUnit::Teaspoon,
        AmountUnit::Tablespoon,
        AmountUnit::FluidOunce,
        AmountUnit::Piece,
        AmountUnit::Cup,
        AmountUnit::Pint,
        AmountUnit::Quart,
        AmountUnit::Gallon,
        AmountUnit::Pound,
        AmountUnit::Ounce,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AmountUnit::Milliliter => "ml",
            AmountUnit::Deciliter => "dl",
            AmountUnit::Liter => "l",
            AmountUnit::Gram => "g",
            AmountUnit::Milligram => "mg",
            AmountUnit::Decagram => "dkg",
            AmountUnit::Kilogram => "kg",
            AmountUnit::Teaspoon => "tsp",
            AmountUnit::Tablespoon => "tbsp",
            AmountUnit::FluidOunce => "fl oz",
            AmountUnit::Piece => "pc",
            AmountUnit::Cup => "c",
            AmountUnit::Pint => "pt",
            AmountUnit::Quart => "qt",
            AmountUnit::Gallon => "gal",
            AmountUnit::Pound => "lb",
            AmountUnit::Ounce => "oz",
        }
    }
}

impl fmt::Display for AmountUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown unit '{0}'")]
pub struct UnknownUnit(pub String);

impl FromStr for AmountUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token {
            "tsp/ČL" => return Ok(AmountUnit::Teaspoon),
            "tbsp/PL" => return Ok(AmountUnit::Tablespoon),
            "pc/ks" => return Ok(AmountUnit::Piece),
            "c/hrn" => return Ok(AmountUnit::Cup),
            _ => {}
        }
        AmountUnit::ALL
            .iter()
            .copied()
            .find(|unit| unit.as_str() == token)
            .ok_or_else(|| UnknownUnit(token.to_string()))
    }
}

/// A pantry item the user owns, with the quantity currently on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub amount_value: f64,
    pub amount_unit: AmountUnit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One line of a recipe's ingredient list, pointing at an [`Ingredient`] by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RequiredIngredient {
    pub id: String,
    pub required_amount_value: f64,
    pub required_amount_unit: AmountUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// Data URL or file name; stored and returned untouched.
    pub image: String,
    pub preparation_process: String,
    pub required_ingredients: Vec<RequiredIngredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields a caller supplies to create an ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct IngredientDraft {
    pub name: String,
    pub amount_value: f64,
    pub amount_unit: AmountUnit,
}

/// Partial ingredient update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct IngredientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_unit: Option<AmountUnit>,
}

impl IngredientPatch {
    /// Overlay this patch on an existing ingredient.
    pub fn apply_to(&self, ingredient: &Ingredient) -> IngredientDraft {
        IngredientDraft {
            name: self
                .name
                .clone()
                .unwrap_or_else(|| ingredient.name.clone()),
            amount_value: self.amount_value.unwrap_or(ingredient.amount_value),
            amount_unit: self.amount_unit.unwrap_or(ingredient.amount_unit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub name: String,
    pub image: String,
    pub preparation_process: String,
    pub required_ingredients: Vec<RequiredIngredient>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RecipePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preparation_process: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_ingredients: Option<Vec<RequiredIngredient>>,
}

impl RecipePatch {
    pub fn apply_to(&self, recipe: &Recipe) -> RecipeDraft {
        RecipeDraft {
            name: self.name.clone().unwrap_or_else(|| recipe.name.clone()),
            image: self.image.clone().unwrap_or_else(|| recipe.image.clone()),
            preparation_process: self
                .preparation_process
                .clone()
                .unwrap_or_else(|| recipe.preparation_process.clone()),
            required_ingredients: self
                .required_ingredients
                .clone()
                .unwrap_or_else(|| recipe.required_ingredients.clone()),
        }
    }
}
