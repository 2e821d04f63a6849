#![allow(dead_code)]

pub mod memory;

use axum::http::{HeaderName, HeaderValue, header};
use axum_test::TestServer;
use chrono::Duration;
use serde_json::{Value, json};
use std::sync::Arc;

use pet_adoption::routes::api_router;
use pet_adoption::state::{AppState, Repositories, ServiceSettings};

use memory::{FakePaymentGateway, InMemoryStore};

pub const JWT_SECRET: &str = "test-signing-secret";

/// A router over in-memory storage, with handles on everything behind it.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub gateway: Arc<FakePaymentGateway>,
}

pub fn create_test_state(store: Arc<InMemoryStore>, gateway: Arc<FakePaymentGateway>) -> AppState {
    let repos = Repositories {
        pets: store.clone(),
        adoptions: store.clone(),
        users: store.clone(),
        campaigns: store.clone(),
        donators: store,
    };

    AppState::new(
        repos,
        gateway,
        ServiceSettings {
            jwt_secret: JWT_SECRET.to_string(),
            token_ttl: Duration::hours(6),
            currency: "usd".to_string(),
        },
    )
}

pub fn make_app() -> TestApp {
    let store = Arc::new(InMemoryStore::default());
    let gateway = Arc::new(FakePaymentGateway::default());
    let state = create_test_state(store.clone(), gateway.clone());
    let server = TestServer::new(api_router(state.clone(), false).unwrap()).unwrap();

    TestApp {
        server,
        state,
        store,
        gateway,
    }
}

impl TestApp {
    /// Registers a user through the API and returns a bearer token for them.
    pub async fn sign_in(&self, email: &str) -> String {
        self.server
            .post("/users")
            .json(&json!({ "email": email, "name": "Test User" }))
            .await;

        let response = self.server.post("/jwt").json(&json!({ "email": email })).await;
        response.assert_status_ok();
        response.json::<Value>()["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Signs in and grants the admin role directly in storage.
    pub async fn sign_in_admin(&self, email: &str) -> String {
        let token = self.sign_in(email).await;
        self.store.make_admin(email);
        token
    }

    pub async fn create_pet(&self, token: &str, name: &str, category: &str) -> String {
        let response = self
            .server
            .post("/pets")
            .authorization_bearer(token)
            .json(&pet_body(name, category))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["insertedId"]
            .as_str()
            .unwrap()
            .to_string()
    }

    pub async fn create_campaign(&self, token: &str, max_major: f64) -> String {
        let response = self
            .server
            .post("/donation_campaigns")
            .authorization_bearer(token)
            .json(&campaign_body(max_major))
            .await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()["insertedId"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

pub fn pet_body(name: &str, category: &str) -> Value {
    json!({
        "image": "https://img.example.com/pet.png",
        "name": name,
        "age": 2,
        "category": category,
        "location": "Dhaka",
        "shortDescription": "Playful",
        "longDescription": "Playful and house trained"
    })
}

pub fn campaign_body(max_major: f64) -> Value {
    let last_date = chrono::Utc::now() + Duration::days(30);
    json!({
        "petName": "Milo",
        "picture": "https://img.example.com/milo.png",
        "maxDonationAmount": max_major,
        "lastDateOfDonation": last_date.to_rfc3339(),
        "shortDescription": "Surgery fund",
        "longDescription": "Milo needs a leg surgery"
    })
}

pub fn cookie_header(token: &str) -> (HeaderName, HeaderValue) {
    (
        header::COOKIE,
        HeaderValue::from_str(&format!("token={token}")).unwrap(),
    )
}
