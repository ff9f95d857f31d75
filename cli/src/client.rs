//! Thin reqwest wrapper over the pantry HTTP API.

use crate::output;
use anyhow::{Context, Result};
use pantry_core::{
    AvailabilityRow, Ingredient, IngredientDraft, IngredientPatch, Recipe, RecipeDraft,
};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Deserialize)]
struct IngredientList {
    ingredients: Vec<Ingredient>,
}

#[derive(Deserialize)]
struct RecipeList {
    recipes: Vec<Recipe>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub recipe_name: String,
    pub rows: Vec<AvailabilityRow>,
}

#[derive(Debug, Deserialize)]
pub struct RecipeCard {
    pub recipe: Recipe,
    pub availability: Vec<AvailabilityRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    pub recipes: Vec<RecipeCard>,
    pub not_found: bool,
}

pub struct PantryClient {
    server: String,
    http: reqwest::Client,
}

impl PantryClient {
    pub fn new(server: &str) -> Self {
        Self {
            server: server.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.server, path))
    }

    /// Send and fail with the server's own message on a non-success status.
    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to reach {} to {}", self.server, action))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = output::server_error_message(&body);
        anyhow::bail!("Failed to {} ({}): {}", action, status, message)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder, action: &str) -> Result<T> {
        self.send(request, action)
            .await?
            .json()
            .await
            .with_context(|| format!("Unexpected response while trying to {}", action))
    }

    pub async fn list_ingredients(&self, search: Option<&str>) -> Result<Vec<Ingredient>> {
        let mut request = self.request(Method::GET, "/api/ingredients");
        if let Some(q) = search {
            request = request.query(&[("q", q)]);
        }
        let list: IngredientList = self.json(request, "list ingredients").await?;
        Ok(list.ingredients)
    }

    pub async fn create_ingredient(&self, draft: &IngredientDraft) -> Result<Ingredient> {
        let request = self.request(Method::POST, "/api/ingredients").json(draft);
        self.json(request, "create ingredient").await
    }

    pub async fn update_ingredient(&self, id: &str, patch: &IngredientPatch) -> Result<Ingredient> {
        let request = self
            .request(Method::PUT, &format!("/api/ingredients/{id}"))
            .json(patch);
        self.json(request, "update ingredient").await
    }

    pub async fn delete_ingredient(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/api/ingredients/{id}"));
        self.send(request, "delete ingredient").await?;
        Ok(())
    }

    pub async fn list_recipes(&self, search: Option<&str>) -> Result<Vec<Recipe>> {
        let mut request = self.request(Method::GET, "/api/recipes");
        if let Some(q) = search {
            request = request.query(&[("q", q)]);
        }
        let list: RecipeList = self.json(request, "list recipes").await?;
        Ok(list.recipes)
    }

    pub async fn get_recipe(&self, id: &str) -> Result<Recipe> {
        let request = self.request(Method::GET, &format!("/api/recipes/{id}"));
        self.json(request, "get recipe").await
    }

    pub async fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe> {
        let request = self.request(Method::POST, "/api/recipes").json(draft);
        self.json(request, "create recipe").await
    }

    pub async fn delete_recipe(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &format!("/api/recipes/{id}"));
        self.send(request, "delete recipe").await?;
        Ok(())
    }

    pub async fn availability(&self, recipe_id: &str, placeholders: bool) -> Result<Availability> {
        let policy = if placeholders { "placeholder" } else { "omit" };
        let request = self
            .request(Method::GET, &format!("/api/recipes/{recipe_id}/availability"))
            .query(&[("unresolved", policy)]);
        self.json(request, "get availability").await
    }

    pub async fn search(&self, ingredients: &str) -> Result<SearchResults> {
        let request = self
            .request(Method::GET, "/api/recipes/search")
            .query(&[("ingredients", ingredients)]);
        self.json(request, "search recipes").await
    }
}
