mod common;

use common::error_message;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_product_success() {
    let app = TestApp::spawn().await;

    let response = app
        .post_authenticated("/products", &app.admin_token)
        .json(&json!({
            "name": "Sandwich de jamón y queso",
            "price": 10,
            "image": "https://img.example.com/sandwich.png",
            "type": "Desayuno"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Sandwich de jamón y queso");
    assert_eq!(body["data"]["price"], 10.0);
    assert_eq!(body["data"]["type"], "Desayuno");
    assert!(body["data"]["id"].is_string());
}

#[tokio::test]
async fn test_create_product_validation() {
    let app = TestApp::spawn().await;

    let cases = [
        (json!({}), "name is required"),
        (json!({ "name": "Agua" }), "price is required"),
        (json!({ "name": "Agua", "price": 5 }), "image is required"),
        (
            json!({ "name": "Agua", "price": 5, "image": "https://img.example.com/agua.png" }),
            "type is required",
        ),
    ];

    for (body, expected) in cases {
        let response = app
            .post_authenticated("/products", &app.admin_token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_message(response).await, expected);
    }

    let response = app
        .post_authenticated("/products", &app.admin_token)
        .json(&json!({
            "name": "Agua",
            "price": -1,
            "image": "https://img.example.com/agua.png",
            "type": "Almuerzo"
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_product_duplicate_name() {
    let app = TestApp::spawn().await;
    app.create_product("Agua", 5.0).await;

    let response = app
        .post_authenticated("/products", &app.admin_token)
        .json(&json!({
            "name": "Agua",
            "price": 7,
            "image": "https://img.example.com/agua2.png",
            "type": "Almuerzo"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_any_authenticated_role_reads_products() {
    let app = TestApp::spawn().await;
    let waiter = app.create_user_with_role("waiter@example.com", "waiter").await;
    let agua = app.create_product("Agua", 5.0).await;
    app.create_product("Café", 7.5).await;

    let response = app
        .get_authenticated("/products", &waiter.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let products = body["data"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], "Agua");

    let id = agua["id"].as_str().unwrap();
    let response = app
        .get_authenticated(&format!("/products/{}", id), &waiter.token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["price"], 5.0);
}

#[tokio::test]
async fn test_get_product_not_found() {
    let app = TestApp::spawn().await;

    for id in [Uuid::new_v4().to_string(), "not-a-uuid".to_string()] {
        let response = app
            .get_authenticated(&format!("/products/{}", id), &app.admin_token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", id);
    }
}

#[tokio::test]
async fn test_update_product() {
    let app = TestApp::spawn().await;
    let agua = app.create_product("Agua", 5.0).await;
    let path = format!("/products/{}", agua["id"].as_str().unwrap());

    let response = app
        .put_authenticated(&path, &app.admin_token)
        .json(&json!({ "price": 6.5 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["price"], 6.5);
    assert_eq!(body["data"]["name"], "Agua");

    let response = app
        .put_authenticated(&path, &app.admin_token)
        .json(&json!({}))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let chef = app.create_user_with_role("chef@example.com", "chef").await;
    let response = app
        .put_authenticated(&path, &chef.token)
        .json(&json!({ "price": 1 }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rename_product_to_taken_name() {
    let app = TestApp::spawn().await;
    app.create_product("Agua", 5.0).await;
    let cafe = app.create_product("Café", 7.0).await;

    let response = app
        .put_authenticated(
            &format!("/products/{}", cafe["id"].as_str().unwrap()),
            &app.admin_token,
        )
        .json(&json!({ "name": "Agua" }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_product() {
    let app = TestApp::spawn().await;
    let agua = app.create_product("Agua", 5.0).await;
    let path = format!("/products/{}", agua["id"].as_str().unwrap());

    let response = app
        .delete_authenticated(&path, &app.admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["name"], "Agua");

    let response = app
        .delete_authenticated(&path, &app.admin_token)
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
