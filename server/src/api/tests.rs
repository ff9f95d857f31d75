use super::app;
use crate::store::JsonStore;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

async fn test_app() -> (Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let store = JsonStore::open(dir.path()).await.unwrap();
    (app(store), dir)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_ingredient(app: &Router, name: &str, amount: f64, unit: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/ingredients",
        Some(json!({ "name": name, "amountValue": amount, "amountUnit": unit })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

async fn create_recipe(app: &Router, name: &str, requires: &[(&str, f64, &str)]) -> String {
    let required: Vec<Value> = requires
        .iter()
        .map(|(id, amount, unit)| {
            json!({ "id": id, "requiredAmountValue": amount, "requiredAmountUnit": unit })
        })
        .collect();
    let (status, body) = send(
        app,
        Method::POST,
        "/api/recipes",
        Some(json!({
            "name": name,
            "image": "",
            "preparationProcess": "Mix and cook.",
            "requiredIngredients": required,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ingredient_crud() {
    let (app, _dir) = test_app().await;
    let id = create_ingredient(&app, "Flour", 500.0, "g").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/ingredients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Flour");
    assert_eq!(body["amountUnit"], "g");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/ingredients/{id}"),
        Some(json!({ "amountValue": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amountValue"], 0.0);
    assert_eq!(body["name"], "Flour");

    let (status, _) = send(&app, Method::DELETE, &format!("/api/ingredients/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/ingredients/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains(&id));
}

#[tokio::test]
async fn test_ingredient_validation_and_conflict() {
    let (app, _dir) = test_app().await;
    create_ingredient(&app, "Salt", 1.0, "pc").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ingredients",
        Some(json!({ "name": "", "amountValue": -1, "amountUnit": "g" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"amountValue"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/ingredients",
        Some(json!({ "name": "SALT", "amountValue": 2, "amountUnit": "g" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_ingredient_name_filter() {
    let (app, _dir) = test_app().await;
    create_ingredient(&app, "Brown sugar", 200.0, "g").await;
    create_ingredient(&app, "Flour", 1.0, "kg").await;

    let (status, body) = send(&app, Method::GET, "/api/ingredients?q=SUG", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["ingredients"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Brown sugar"]);
}

#[tokio::test]
async fn test_recipe_availability() {
    let (app, _dir) = test_app().await;
    let flour = create_ingredient(&app, "Flour", 500.0, "g").await;
    let sugar = create_ingredient(&app, "Sugar", 0.0, "g").await;
    let recipe = create_recipe(
        &app,
        "Cake",
        &[(&flour, 200.0, "g"), (&sugar, 100.0, "g"), ("gone", 2.0, "pc")],
    )
    .await;

    let uri = format!("/api/recipes/{recipe}/availability");
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipeName"], "Cake");
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["ingredientName"], "Flour");
    assert_eq!(rows[0]["available"], true);
    assert_eq!(rows[1]["ingredientName"], "Sugar");
    assert_eq!(rows[1]["available"], false);

    let placeholder_uri = format!("{uri}?unresolved=placeholder");
    let (status, body) = send(&app, Method::GET, &placeholder_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2]["ingredientId"], "gone");
    assert_eq!(rows[2]["ingredientName"], "");
    assert_eq!(rows[2]["ownedAmountValue"], Value::Null);

    let (status, _) = send(&app, Method::GET, "/api/recipes/missing/availability", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_search() {
    let (app, _dir) = test_app().await;
    let salt = create_ingredient(&app, "Salt", 1.0, "pc").await;
    let pepper = create_ingredient(&app, "Black pepper", 0.0, "g").await;
    let flour = create_ingredient(&app, "Flour", 1.0, "kg").await;
    create_recipe(&app, "Soup", &[(&salt, 1.0, "tsp"), (&pepper, 1.0, "tsp")]).await;
    create_recipe(&app, "Bread", &[(&flour, 500.0, "g")]).await;

    let uri = "/api/recipes/search?ingredients=PEPPER,%20";
    let (status, body) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["notFound"], false);
    let cards = body["recipes"].as_array().unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["recipe"]["name"], "Soup");
    assert_eq!(cards[0]["availability"].as_array().unwrap().len(), 2);

    let (_, body) = send(&app, Method::GET, "/api/recipes/search?ingredients=saffron", None).await;
    assert_eq!(body["notFound"], true);
    assert!(body["recipes"].as_array().unwrap().is_empty());

    let (_, body) = send(&app, Method::GET, "/api/recipes/search?ingredients=%20,%20", None).await;
    assert_eq!(body["notFound"], false);
    assert_eq!(body["recipes"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_recipe_update_delete_and_text_filter() {
    let (app, _dir) = test_app().await;
    let id = create_recipe(&app, "Pancakes", &[("egg", 2.0, "pc")]).await;
    create_recipe(&app, "Omelette", &[("egg", 3.0, "pc")]).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/recipes/{id}"),
        Some(json!({ "preparationProcess": "Whisk, then fry in butter." })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Pancakes");

    let (_, body) = send(&app, Method::GET, "/api/recipes?q=butter", None).await;
    let recipes = body["recipes"].as_array().unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0]["id"], id.as_str());

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/recipes/{id}"),
        Some(json!({ "name": "Omelette" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/recipes/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_recipe_requires_ingredients() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/recipes",
        Some(json!({
            "name": "Air",
            "image": "",
            "preparationProcess": "Breathe.",
            "requiredIngredients": [],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "requiredIngredients");
}

#[tokio::test]
async fn test_openapi_served() {
    let (app, _dir) = test_app().await;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/recipes/search"].is_object());
    assert!(body["paths"]["/api/recipes/{id}/availability"].is_object());
    assert!(body["components"]["schemas"]["Ingredient"].is_object());
}
