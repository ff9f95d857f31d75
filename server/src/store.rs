//! JSON-file storage for ingredients and recipes.
//!
//! Each collection is one pretty-printed JSON array on disk. Both collections
//! are held in memory behind a single lock, so a snapshot of the two is never
//! torn, and every mutation rewrites the affected file before the in-memory
//! copy changes.

use chrono::Utc;
use pantry_core::{
    validate_ingredient, validate_recipe, Ingredient, IngredientDraft, IngredientPatch, Recipe,
    RecipeDraft, RecipePatch, ValidationErrors,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const INGREDIENTS_FILE: &str = "ingredients.json";
pub const RECIPES_FILE: &str = "recipes.json";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} with id '{id}' does not exist")]
    NotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Invalid(ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Unable to access storage at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unable to read from storage. Wrong data format in {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<ValidationErrors> for StoreError {
    /// A lone name clash is a conflict; anything else is a bad payload.
    fn from(errors: ValidationErrors) -> Self {
        if errors.errors().len() == 1 && errors.is_duplicate_name() {
            StoreError::Conflict(errors.errors()[0].to_string())
        } else {
            StoreError::Invalid(errors)
        }
    }
}

/// Both collections, copied out under one read lock.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub ingredients: Vec<Ingredient>,
    pub recipes: Vec<Recipe>,
}

pub struct JsonStore {
    ingredients_path: PathBuf,
    recipes_path: PathBuf,
    state: RwLock<Snapshot>,
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

async fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(
                path = %path.display(),
                "No storage found, starting with an empty collection"
            );
            Ok(Vec::new())
        }
        Err(source) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write to a sibling temp file, then rename over the target.
async fn write_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(items)?;
    let tmp = path.with_extension("json.tmp");
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    tokio::fs::write(&tmp, json).await.map_err(io_err)?;
    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            tracing::warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp file");
        }
        return Err(io_err(e));
    }

    tracing::debug!(path = %path.display(), count = items.len(), "Collection written");
    Ok(())
}

impl JsonStore {
    /// Load both collections from `data_dir`, creating the directory if needed.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir)
            .await
            .map_err(|source| StoreError::Io {
                path: data_dir.to_path_buf(),
                source,
            })?;

        let ingredients_path = data_dir.join(INGREDIENTS_FILE);
        let recipes_path = data_dir.join(RECIPES_FILE);
        let ingredients = load_collection(&ingredients_path).await?;
        let recipes = load_collection(&recipes_path).await?;

        tracing::info!(
            data_dir = %data_dir.display(),
            ingredients = ingredients.len(),
            recipes = recipes.len(),
            "Storage loaded"
        );

        Ok(Self {
            ingredients_path,
            recipes_path,
            state: RwLock::new(Snapshot {
                ingredients,
                recipes,
            }),
        })
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.state.read().await.clone()
    }

    pub async fn list_ingredients(&self) -> Vec<Ingredient> {
        self.state.read().await.ingredients.clone()
    }

    pub async fn get_ingredient(&self, id: &str) -> Option<Ingredient> {
        self.state
            .read()
            .await
            .ingredients
            .iter()
            .find(|i| i.id == id)
            .cloned()
    }

    pub async fn create_ingredient(
        &self,
        draft: IngredientDraft,
    ) -> Result<Ingredient, StoreError> {
        let mut state = self.state.write().await;
        validate_ingredient(&draft, &state.ingredients, None)?;

        let ingredient = Ingredient {
            id: new_id(),
            name: draft.name.trim().to_string(),
            amount_value: draft.amount_value,
            amount_unit: draft.amount_unit,
            created_at: Some(Utc::now()),
            updated_at: None,
        };

        let mut next = state.ingredients.clone();
        next.push(ingredient.clone());
        write_collection(&self.ingredients_path, &next).await?;
        state.ingredients = next;

        tracing::info!(id = %ingredient.id, name = %ingredient.name, "Ingredient created");
        Ok(ingredient)
    }

    pub async fn update_ingredient(
        &self,
        id: &str,
        patch: IngredientPatch,
    ) -> Result<Ingredient, StoreError> {
        let mut state = self.state.write().await;
        let idx = state
            .ingredients
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "Ingredient",
                id: id.to_string(),
            })?;

        let draft = patch.apply_to(&state.ingredients[idx]);
        validate_ingredient(&draft, &state.ingredients, Some(id))?;

        let mut next = state.ingredients.clone();
        let updated = &mut next[idx];
        updated.name = draft.name.trim().to_string();
        updated.amount_value = draft.amount_value;
        updated.amount_unit = draft.amount_unit;
        updated.updated_at = Some(Utc::now());
        let updated = updated.clone();

        write_collection(&self.ingredients_path, &next).await?;
        state.ingredients = next;

        tracing::info!(id = %updated.id, "Ingredient updated");
        Ok(updated)
    }

    /// Recipes referring to the ingredient are left alone; readers treat
    /// their reference as unresolved.
    pub async fn delete_ingredient(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.ingredients.iter().any(|i| i.id == id) {
            return Err(StoreError::NotFound {
                kind: "Ingredient",
                id: id.to_string(),
            });
        }

        let next: Vec<Ingredient> = state
            .ingredients
            .iter()
            .filter(|i| i.id != id)
            .cloned()
            .collect();
        write_collection(&self.ingredients_path, &next).await?;
        state.ingredients = next;

        tracing::info!(id, "Ingredient deleted");
        Ok(())
    }

    pub async fn list_recipes(&self) -> Vec<Recipe> {
        self.state.read().await.recipes.clone()
    }

    pub async fn get_recipe(&self, id: &str) -> Option<Recipe> {
        self.state
            .read()
            .await
            .recipes
            .iter()
            .find(|r| r.id == id)
            .cloned()
    }

    pub async fn create_recipe(&self, draft: RecipeDraft) -> Result<Recipe, StoreError> {
        let mut state = self.state.write().await;
        validate_recipe(&draft, &state.recipes, None)?;

        let recipe = Recipe {
            id: new_id(),
            name: draft.name.trim().to_string(),
            image: draft.image,
            preparation_process: draft.preparation_process,
            required_ingredients: draft.required_ingredients,
            created_at: Some(Utc::now()),
            updated_at: None,
        };

        let mut next = state.recipes.clone();
        next.push(recipe.clone());
        write_collection(&self.recipes_path, &next).await?;
        state.recipes = next;

        tracing::info!(id = %recipe.id, name = %recipe.name, "Recipe created");
        Ok(recipe)
    }

    pub async fn update_recipe(&self, id: &str, patch: RecipePatch) -> Result<Recipe, StoreError> {
        let mut state = self.state.write().await;
        let idx = state
            .recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound {
                kind: "Recipe",
                id: id.to_string(),
            })?;

        let draft = patch.apply_to(&state.recipes[idx]);
        validate_recipe(&draft, &state.recipes, Some(id))?;

        let mut next = state.recipes.clone();
        let updated = &mut next[idx];
        updated.name = draft.name.trim().to_string();
        updated.image = draft.image;
        updated.preparation_process = draft.preparation_process;
        updated.required_ingredients = draft.required_ingredients;
        updated.updated_at = Some(Utc::now());
        let updated = updated.clone();

        write_collection(&self.recipes_path, &next).await?;
        state.recipes = next;

        tracing::info!(id = %updated.id, "Recipe updated");
        Ok(updated)
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        if !state.recipes.iter().any(|r| r.id == id) {
            return Err(StoreError::NotFound {
                kind: "Recipe",
                id: id.to_string(),
            });
        }

        let next: Vec<Recipe> = state.recipes.iter().filter(|r| r.id != id).cloned().collect();
        write_collection(&self.recipes_path, &next).await?;
        state.recipes = next;

        tracing::info!(id, "Recipe deleted");
        Ok(())
    }
}
