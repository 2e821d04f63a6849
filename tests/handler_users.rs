mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_user_created() {
    let app = common::make_app();

    let response = app
        .server
        .post("/users")
        .json(&json!({
            "email": "alice@example.com",
            "name": "Alice",
            "photo": "https://img.example.com/alice.png"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    assert!(json["insertedId"].is_string());
    assert_eq!(json["user"]["email"], "alice@example.com");
    assert_eq!(json["user"]["role"], "user");
    assert_eq!(json["user"]["banned"], false);
}

#[tokio::test]
async fn test_register_user_is_idempotent() {
    let app = common::make_app();
    let body = json!({ "email": "alice@example.com", "name": "Alice" });

    let first = app.server.post("/users").json(&body).await;
    first.assert_status(StatusCode::CREATED);
    let first_id = first.json::<serde_json::Value>()["user"]["id"].clone();

    let second = app
        .server
        .post("/users")
        .json(&json!({ "email": "Alice@Example.com", "name": "Someone Else" }))
        .await;

    second.assert_status_ok();
    let json = second.json::<serde_json::Value>();
    assert!(json["insertedId"].is_null());
    assert_eq!(json["user"]["id"], first_id);
    assert_eq!(json["user"]["name"], "Alice");
}

#[tokio::test]
async fn test_register_user_invalid_email() {
    let app = common::make_app();

    let response = app
        .server
        .post("/users")
        .json(&json!({ "email": "nope", "name": "Nope" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_current_user() {
    let app = common::make_app();
    let token = app.sign_in("alice@example.com").await;

    let response = app.server.get("/users/me").authorization_bearer(token).await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["email"], "alice@example.com");
    assert!(json.get("createdAt").is_some());
}

#[tokio::test]
async fn test_current_user_not_registered() {
    let app = common::make_app();
    let token = app
        .state
        .auth_service
        .issue_token("ghost@example.com", None)
        .await
        .unwrap()
        .token;

    let response = app.server.get("/users/me").authorization_bearer(token).await;

    response.assert_status(StatusCode::NOT_FOUND);
}
