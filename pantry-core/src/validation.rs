//! Field rules for ingredient and recipe payloads.
//!
//! These run where data enters storage. The availability and search code
//! assumes its inputs already passed here and never calls into this module.

use crate::models::{Ingredient, IngredientDraft, Recipe, RecipeDraft};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

pub const MAX_NAME_CHARS: usize = 20;
pub const MAX_PREPARATION_CHARS: usize = 4000;
pub const MAX_AMOUNT: f64 = 9_999_999.0;
pub const MIN_REQUIRED_AMOUNT: f64 = 0.001;

/// Which kind of rule a field broke.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Missing, malformed or out of range.
    #[default]
    Invalid,
    /// Clashes with another record's unique value.
    Duplicate,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(default)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }
}

/// Every rule a payload broke, in field order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed: {}", summarize(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// True if any error concerns a name clashing with an existing record.
    pub fn is_duplicate_name(&self) -> bool {
        self.0
            .iter()
            .any(|e| e.field == "name" && e.kind == FieldErrorKind::Duplicate)
    }
}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0
            .push(FieldError::new(field, message, FieldErrorKind::Invalid));
    }

    fn duplicate(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0
            .push(FieldError::new(field, message, FieldErrorKind::Duplicate));
    }

    fn check_name(&mut self, name: &str) {
        let chars = name.trim().chars().count();
        if chars == 0 {
            self.push("name", "must not be empty");
        } else if chars > MAX_NAME_CHARS {
            self.push(
                "name",
                format!("must be at most {MAX_NAME_CHARS} characters"),
            );
        }
    }

    fn finish(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

fn in_range(value: f64, min: f64, max: f64) -> bool {
    value.is_finite() && value >= min && value <= max
}

/// Check an ingredient payload. `exclude_id` is the record being updated,
/// so it does not clash with its own name.
pub fn validate_ingredient(
    draft: &IngredientDraft,
    existing: &[Ingredient],
    exclude_id: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = Collector::default();
    errors.check_name(&draft.name);

    let lowered = draft.name.trim().to_lowercase();
    let clash = existing.iter().any(|other| {
        Some(other.id.as_str()) != exclude_id && other.name.trim().to_lowercase() == lowered
    });
    if clash {
        errors.duplicate("name", "already exists (names are case-insensitive)");
    }

    if !in_range(draft.amount_value, 0.0, MAX_AMOUNT) {
        errors.push(
            "amountValue",
            format!("must be between 0 and {MAX_AMOUNT}"),
        );
    }

    errors.finish()
}

pub fn validate_recipe(
    draft: &RecipeDraft,
    existing: &[Recipe],
    exclude_id: Option<&str>,
) -> Result<(), ValidationErrors> {
    let mut errors = Collector::default();
    errors.check_name(&draft.name);

    let name = draft.name.trim();
    let clash = existing
        .iter()
        .any(|other| Some(other.id.as_str()) != exclude_id && other.name.trim() == name);
    if clash {
        errors.duplicate("name", "already exists");
    }

    let process_chars = draft.preparation_process.chars().count();
    if draft.preparation_process.trim().is_empty() {
        errors.push("preparationProcess", "must not be empty");
    } else if process_chars > MAX_PREPARATION_CHARS {
        errors.push(
            "preparationProcess",
            format!("must be at most {MAX_PREPARATION_CHARS} characters"),
        );
    }

    if draft.required_ingredients.is_empty() {
        errors.push("requiredIngredients", "must list at least one ingredient");
    }

    let mut seen = HashSet::new();
    for (idx, required) in draft.required_ingredients.iter().enumerate() {
        let field = format!("requiredIngredients[{idx}]");
        if required.id.trim().is_empty() {
            errors.push(format!("{field}.id"), "must not be empty");
        } else if !seen.insert(required.id.as_str()) {
            errors.push(
                format!("{field}.id"),
                format!("ingredient '{}' is listed more than once", required.id),
            );
        }
        if !in_range(required.required_amount_value, MIN_REQUIRED_AMOUNT, MAX_AMOUNT) {
            errors.push(
                format!("{field}.requiredAmountValue"),
                format!("must be between {MIN_REQUIRED_AMOUNT} and {MAX_AMOUNT}"),
            );
        }
    }

    errors.finish()
}
