//! Common fixtures for the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use bytes::Bytes;
use folio::adapters::mock::{InMemoryCredentials, MockHttpClient, MockResponse};
use folio::app::FolioApp;
use folio::auth::Credentials;
use folio::config::ClientConfig;
use folio::models::{ContentItem, ContentKind, Plan, Session, User};
use folio::traits::Response;

pub const BASE: &str = "http://api.test/api";

pub fn test_user() -> User {
    User {
        id: "u1".to_string(),
        email: "ada@example.com".to_string(),
        name: Some("Ada".to_string()),
        avatar: None,
    }
}

pub fn test_session() -> Session {
    Session {
        token: "test-token-12345".to_string(),
        user: test_user(),
    }
}

pub fn stored_credentials() -> Credentials {
    Credentials::from_session(&test_session())
}

pub fn item(id: &str, name: &str, kind: ContentKind, rating: f64) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        rating,
        ..Default::default()
    }
}

pub fn plan(id: &str, name: &str, price: f64, active: bool) -> Plan {
    Plan {
        id: id.to_string(),
        name: name.to_string(),
        price,
        is_active: active,
        ..Default::default()
    }
}

/// The library as the API returns it.
pub fn library_json() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {"_id": "m1", "name": "Tech Weekly", "magzineType": "magazine", "category": "Tech",
             "rating": 4.5, "downloads": 120, "type": "paid",
             "pages": ["http://cdn.test/m1/1.png", "http://cdn.test/m1/2.png", "http://cdn.test/m1/3.png"],
             "file": "http://cdn.test/m1.pdf"},
            {"_id": "m2", "name": "Travel Monthly", "magzineType": "magazine", "category": "Travel",
             "rating": 3.9, "downloads": 80},
            {"_id": "a1", "name": "Rust in Production", "magzineType": "article", "category": "Tech",
             "rating": 4.8, "downloads": 40},
            {"_id": "d1", "name": "Morning Digest", "magzineType": "digest", "rating": 4.1}
        ]
    })
}

pub fn plans_json() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {"_id": "p1", "name": "Basic", "price": 0, "isActive": true,
             "features": ["Free articles", "-Magazines"]},
            {"_id": "p2", "name": "Gold", "price": 9.99, "currency": "USD", "duration": "month",
             "isActive": true, "features": ["Everything"]},
            {"_id": "p3", "name": "Legacy", "price": 4.99, "isActive": false}
        ]
    })
}

pub fn json_response(status: u16, body: &serde_json::Value) -> MockResponse {
    MockResponse::Success(Response::new(status, Bytes::from(body.to_string())))
}

/// Mock HTTP client serving the library and plans.
pub fn library_http() -> Arc<MockHttpClient> {
    let http = Arc::new(MockHttpClient::new());
    http.set_response(&format!("{}/magazines", BASE), json_response(200, &library_json()));
    http.set_response(&format!("{}/plans", BASE), json_response(200, &plans_json()));
    http
}

pub fn test_app(
    http: &Arc<MockHttpClient>,
    credentials: InMemoryCredentials,
) -> FolioApp<MockHttpClient, InMemoryCredentials> {
    FolioApp::new(
        Arc::clone(http),
        credentials,
        ClientConfig::new().with_api_base_url(BASE),
    )
}
