//! API integration tests against a running server
//!
//! Run with: cargo test -- --ignored
//! The admin account is read from ELBAN_TEST_ADMIN_EMAIL / ELBAN_TEST_ADMIN_PASSWORD.

use elban_server::{
    client::{ApiClient, ListStore, MutationOutcome},
    filter::FilterCriteria,
    models::{complaint::CreateComplaint, equipment::CreateEquipment, Complaint, Equipment, OperabilityStatus},
};
use reqwest::Client;
use serde_json::{json, Value};

const SERVER: &str = "http://localhost:8080";
const BASE_URL: &str = "http://localhost:8080/api/v1";

fn admin_credentials() -> (String, String) {
    (
        std::env::var("ELBAN_TEST_ADMIN_EMAIL").unwrap_or_else(|_| "admin@elban.test".to_string()),
        std::env::var("ELBAN_TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "admin12345".to_string()),
    )
}

/// Helper to get a signed-in API client
async fn admin_client() -> ApiClient {
    let (email, password) = admin_credentials();
    let mut client = ApiClient::new(SERVER);
    client
        .login(&email, &password)
        .await
        .expect("Failed to sign in as admin");
    client
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "email": "admin@elban.test",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_pending_account_cannot_sign_in() {
    let client = Client::new();
    let email = format!("pending-{}@elban.test", uuid::Uuid::new_v4());

    let response = client
        .post(format!("{}/auth/register", BASE_URL))
        .json(&json!({
            "email": email,
            "password": "rahasia123",
            "name": "Calon Teknisi"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["role"], "USER");
    assert!(body.get("password_hash").is_none());

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({ "email": email, "password": "rahasia123" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_admin_session_is_privileged() {
    let client = admin_client().await;
    let info = client.session_info().await.expect("Failed to fetch session");

    assert!(info.privileged);
    assert_eq!(info.landing_route, "/pengaduan");
}

#[tokio::test]
#[ignore]
async fn test_equipment_create_then_delete_via_store() {
    let client = admin_client().await;
    let mut store = ListStore::<Equipment>::new();
    store.load(&client).await;

    let name = format!("ILS Localizer {}", uuid::Uuid::new_v4());
    let outcome = store
        .create(
            &client,
            &CreateEquipment {
                name: name.clone(),
                equipment_type: "Navigasi".to_string(),
                brand: Some("Thales".to_string()),
                certificate_number: None,
                install_year: Some(2019),
                condition_percent: Some(90),
                status: Some(OperabilityStatus::Operable),
            },
        )
        .await;
    assert_eq!(outcome, MutationOutcome::Applied);

    let created = store
        .records()
        .iter()
        .find(|e| e.name == name)
        .cloned()
        .expect("Created equipment missing after reload");

    store.set_criteria(FilterCriteria::default().query(name.to_lowercase()));
    assert_eq!(store.filtered().len(), 1);

    let outcome = store.delete(&client, &created.id, &|_: &str| true).await;
    assert_eq!(outcome, MutationOutcome::Applied);
    assert!(store.find(&created.id).is_none());
}

#[tokio::test]
#[ignore]
async fn test_complaint_status_filter() {
    let client = admin_client().await;
    let mut store = ListStore::<Complaint>::new();

    let title = format!("Baggage scanner alarm {}", uuid::Uuid::new_v4());
    let outcome = store
        .create(
            &client,
            &CreateComplaint {
                title: title.clone(),
                description: None,
                reporter: "Petugas AVSEC".to_string(),
                location: Some("Gate 3".to_string()),
                documentation_url: None,
            },
        )
        .await;
    assert_eq!(outcome, MutationOutcome::Applied);

    let response = Client::new()
        .get(format!("{}/pengaduan", BASE_URL))
        .bearer_auth(client.token().expect("No token"))
        .query(&[("selector", "Baru"), ("q", title.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
#[ignore]
async fn test_statistics() {
    let client = admin_client().await;

    let response = Client::new()
        .get(format!("{}/statistik", BASE_URL))
        .bearer_auth(client.token().expect("No token"))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["equipment"]["total"].is_number());
    assert_eq!(body["complaints"].as_array().map(Vec::len), Some(3));
}
