mod common;

#[tokio::test]
async fn test_health_endpoint_success() {
    let app = common::make_app();

    let response = app.server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let app = common::make_app();

    let json = app.server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json["checks"]["database"].get("message").is_some());
    assert!(json["checks"]["database"]["latencyMs"].is_u64());
}

#[tokio::test]
async fn test_health_reports_payment_currency() {
    let app = common::make_app();

    let json = app.server.get("/health").await.json::<serde_json::Value>();

    assert_eq!(json["checks"]["payments"]["status"], "ok");
    assert_eq!(
        json["checks"]["payments"]["message"],
        "Provider configured, currency usd"
    );
    assert!(json["checks"]["payments"].get("latencyMs").is_none());
}

#[tokio::test]
async fn test_health_is_public() {
    let app = common::make_app();

    app.sign_in("alice@example.com").await;
    let json = app.server.get("/health").await.json::<serde_json::Value>();

    assert_eq!(
        json["checks"]["database"]["message"],
        "Connected, 1 users"
    );
}
