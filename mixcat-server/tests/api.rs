//! Router-level tests over the in-memory catalog store.
//!
//! Every request goes through the real router, extractors, and multipart
//! decoding; only the storage backend and the uploads directory are
//! test substitutes.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use mixcat_server::http::{build_router, AppState};
use mixcat_server::{AssetStore, MemoryCatalog};

const BOUNDARY: &str = "mixcat-test-boundary";

async fn test_app() -> (Router, Arc<MemoryCatalog>, TempDir) {
    let temp = TempDir::new().unwrap();
    let assets = AssetStore::open(temp.path().join("uploads")).await.unwrap();
    let store = Arc::new(MemoryCatalog::new());
    let app = build_router(AppState {
        store: store.clone(),
        assets,
    });
    (app, store, temp)
}

/// Build a multipart/form-data body from text fields and an optional
/// image part.
fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        body.extend_from_slice(value.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    if let Some((filename, bytes)) = image {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn form_request(method: &str, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_category(app: &Router, name: &str) -> Value {
    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/categories",
            multipart_body(&[("name", name)], None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn create_drink(app: &Router, name: &str, category_id: Option<&str>) -> Value {
    let mut fields = vec![
        ("name", name.to_owned()),
        ("details", r#"{"price": 7.0}"#.to_owned()),
        ("ingredients", r#"["rum"]"#.to_owned()),
        ("flavorProfile", "{}".to_owned()),
    ];
    if let Some(id) = category_id {
        fields.push(("category", id.to_owned()));
    }
    let fields: Vec<(&str, &str)> = fields.iter().map(|(n, v)| (*n, v.as_str())).collect();

    let response = app
        .clone()
        .oneshot(form_request("POST", "/drinks", multipart_body(&fields, None)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn flavor_profile_round_trips() {
    let (app, _store, _temp) = test_app().await;

    let body = multipart_body(
        &[
            ("name", "Negroni"),
            ("details", r#"{"price": 12.0, "alcoholContent": 24.0}"#),
            ("ingredients", r#"["gin", "campari", "vermouth"]"#),
            // Legacy flavor field name and legacy bitter key
            ("recepies", r#"{"acid": 1.5, "sugar": 2.0, "amer": 8.5}"#),
        ],
        None,
    );
    let response = app
        .clone()
        .oneshot(form_request("POST", "/drinks", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.clone().oneshot(get("/drinks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let drinks = body_json(response).await;

    let profile = &drinks[0]["flavorProfile"];
    assert_eq!(profile["acid"], 1.5);
    assert_eq!(profile["sugar"], 2.0);
    assert_eq!(profile["bitter"], 8.5);
    // Omitted axes default to zero
    assert_eq!(profile["creamy"], 0.0);
    assert_eq!(profile["spicy"], 0.0);

    assert_eq!(drinks[0]["details"]["price"], 12.0);
    assert_eq!(drinks[0]["details"]["alcoholContent"], 24.0);
    assert_eq!(drinks[0]["ingredients"], json!(["gin", "campari", "vermouth"]));
}

#[tokio::test]
async fn deleted_category_leaves_drink_listable() {
    let (app, _store, _temp) = test_app().await;

    let category = create_category(&app, "Sours").await;
    let category_id = category["id"].as_str().unwrap().to_owned();

    create_drink(&app, "Whiskey Sour", Some(&category_id)).await;

    let response = app
        .clone()
        .oneshot(delete(&format!("/categories/{category_id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/drinks")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let drinks = body_json(response).await;

    assert_eq!(drinks.as_array().unwrap().len(), 1);
    assert_eq!(drinks[0]["name"], "Whiskey Sour");
    // Reference is kept but resolves to null
    assert_eq!(drinks[0]["categoryId"], category_id.as_str());
    assert_eq!(drinks[0]["category"], Value::Null);
}

#[tokio::test]
async fn malformed_details_persists_nothing() {
    let (app, _store, _temp) = test_app().await;

    let body = multipart_body(
        &[
            ("name", "Broken"),
            ("details", "{not json"),
            ("ingredients", r#"["rum"]"#),
            ("flavorProfile", "{}"),
        ],
        None,
    );
    let response = app
        .clone()
        .oneshot(form_request("POST", "/drinks", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(get("/drinks")).await.unwrap();
    let drinks = body_json(response).await;
    assert_eq!(drinks, json!([]));
}

#[tokio::test]
async fn out_of_range_flavor_axis_is_rejected() {
    let (app, _store, _temp) = test_app().await;

    let body = multipart_body(
        &[
            ("name", "Too Sweet"),
            ("details", "{}"),
            ("ingredients", "[]"),
            ("flavorProfile", r#"{"sugar": 99.0}"#),
        ],
        None,
    );
    let response = app
        .clone()
        .oneshot(form_request("POST", "/drinks", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_category_reference_is_rejected() {
    let (app, _store, _temp) = test_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/drinks",
            multipart_body(
                &[
                    ("name", "Orphan"),
                    ("category", "5a634c29-98ba-4f48-9da6-45c6528c25a5"),
                    ("details", "{}"),
                    ("ingredients", "[]"),
                    ("flavorProfile", "{}"),
                ],
                None,
            ),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(get("/drinks")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn stats_match_seeded_data() {
    let (app, store, _temp) = test_app().await;

    for i in 0..3 {
        create_category(&app, &format!("Category {i}")).await;
    }
    for i in 0..7 {
        create_drink(&app, &format!("Drink {i}"), None).await;
    }
    for i in 0..2 {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/admin/recipes",
                json!({
                    "name": format!("Recipe {i}"),
                    "ingredients": ["a"],
                    "instructions": ["b"],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
    store.add_user("active@example.com", Some("Active"), true);
    store.add_user("inactive@example.com", None, false);

    let response = app.clone().oneshot(get("/admin/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stats = body_json(response).await;

    assert_eq!(stats["totalCategories"], 3);
    assert_eq!(stats["totalDrinks"], 7);
    assert_eq!(stats["totalRecipes"], 2);
    assert_eq!(stats["totalUsers"], 2);
    assert_eq!(stats["activeUsers"], 1);
}

#[tokio::test]
async fn recipe_with_empty_instructions_is_rejected() {
    let (app, _store, _temp) = test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/admin/recipes",
            json!({
                "name": "Incomplete",
                "ingredients": ["sugar"],
                "instructions": [],
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.clone().oneshot(get("/admin/recipes")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn recipes_list_name_ascending() {
    let (app, _store, _temp) = test_app().await;

    for name in ["Zombie Mix", "Agave Syrup", "Mint Prep"] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/admin/recipes",
                json!({
                    "name": name,
                    "ingredients": ["x"],
                    "instructions": ["y"],
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app.clone().oneshot(get("/admin/recipes")).await.unwrap();
    let recipes = body_json(response).await;
    let names: Vec<&str> = recipes
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Agave Syrup", "Mint Prep", "Zombie Mix"]);
}

#[tokio::test]
async fn updating_missing_category_is_404_and_creates_nothing() {
    let (app, _store, _temp) = test_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "PUT",
            "/categories/b1f2ce6e-8a54-4f2e-a15f-0ce15a5ac77e",
            multipart_body(&[("name", "Ghost")], None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(get("/categories")).await.unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn category_without_name_is_rejected() {
    let (app, _store, _temp) = test_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/categories",
            multipart_body(&[("name", "   ")], None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn image_upload_roundtrip_and_replacement() {
    let (app, _store, _temp) = test_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/categories",
            multipart_body(&[("name", "Tiki")], Some(("tiki.png", b"png-one"))),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let category = body_json(response).await;
    let image_url = category["imageUrl"].as_str().unwrap().to_owned();
    assert!(image_url.starts_with("/uploads/"));

    // Exact bytes back
    let response = app.clone().oneshot(get(&image_url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/png"
    );
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"png-one");

    // Replace the image; the old file is cleaned up
    let id = category["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(form_request(
            "PUT",
            &format!("/categories/{id}"),
            multipart_body(&[("name", "Tiki")], Some(("tiki2.png", b"png-two"))),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    let new_url = updated["imageUrl"].as_str().unwrap().to_owned();
    assert_ne!(new_url, image_url);

    let response = app.clone().oneshot(get(&new_url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get(&image_url)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_without_image_keeps_reference() {
    let (app, _store, _temp) = test_app().await;

    let category = {
        let response = app
            .clone()
            .oneshot(form_request(
                "POST",
                "/categories",
                multipart_body(&[("name", "Fizz")], Some(("f.jpg", b"jpeg"))),
            ))
            .await
            .unwrap();
        body_json(response).await
    };
    let id = category["id"].as_str().unwrap();
    let image_url = category["imageUrl"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(form_request(
            "PUT",
            &format!("/categories/{id}"),
            multipart_body(&[("name", "Fizzes")], None),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;

    assert_eq!(updated["name"], "Fizzes");
    assert_eq!(updated["imageUrl"], image_url);
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let (app, _store, _temp) = test_app().await;

    let oversized = vec![0u8; 5 * 1024 * 1024 + 1];
    let response = app
        .clone()
        .oneshot(form_request(
            "POST",
            "/categories",
            multipart_body(&[("name", "Big")], Some(("big.png", &oversized))),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn asset_traversal_is_not_found() {
    let (app, _store, _temp) = test_app().await;

    let response = app.clone().oneshot(get("/uploads/..%2fCargo.toml")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_missing_drink_is_404() {
    let (app, _store, _temp) = test_app().await;

    let response = app
        .clone()
        .oneshot(delete("/drinks/0b51a3c2-4c85-4da4-93b8-5ba1e0a5d8a0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_id_format_is_400() {
    let (app, _store, _temp) = test_app().await;

    let response = app
        .clone()
        .oneshot(delete("/drinks/not-a-uuid"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn drink_update_replaces_all_fields() {
    let (app, _store, _temp) = test_app().await;

    let drink = create_drink(&app, "Old Fashioned", None).await;
    let id = drink["id"].as_str().unwrap();

    let body = multipart_body(
        &[
            ("name", "New Fashioned"),
            ("details", r#"{"price": 14.0, "description": "updated"}"#),
            ("ingredients", r#"["bourbon", "bitters"]"#),
            ("flavorProfile", r#"{"bitter": 6.0}"#),
        ],
        None,
    );
    let response = app
        .clone()
        .oneshot(form_request("PUT", &format!("/drinks/{id}"), body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;

    assert_eq!(updated["name"], "New Fashioned");
    assert_eq!(updated["details"]["price"], 14.0);
    assert_eq!(updated["details"]["description"], "updated");
    assert_eq!(updated["ingredients"], json!(["bourbon", "bitters"]));
    assert_eq!(updated["flavorProfile"]["bitter"], 6.0);
}

#[tokio::test]
async fn users_listed_most_recent_first() {
    let (app, store, _temp) = test_app().await;

    store.add_user("first@example.com", Some("First"), true);
    store.add_user("second@example.com", Some("Second"), true);

    let response = app.clone().oneshot(get("/admin/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let users = body_json(response).await;

    assert_eq!(users.as_array().unwrap().len(), 2);
    assert_eq!(users[0]["email"], "second@example.com");
    assert_eq!(users[1]["email"], "first@example.com");
}
