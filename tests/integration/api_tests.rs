//! API integration tests
//!
//! These run against a live server with a freshly migrated database:
//! cargo test -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

fn booking_payload(check_in: &str, check_out: &str) -> Value {
    json!({
        "cabin_id": 1,
        "check_in": check_in,
        "check_out": check_out,
        "guests": 2,
        "guest_name": "Maria Ionescu",
        "guest_email": "maria@example.com",
        "guest_phone": "+40 700 000 000",
        "language": "ro"
    })
}

async fn create_booking(client: &Client, check_in: &str, check_out: &str) -> Value {
    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload(check_in, check_out))
        .send()
        .await
        .expect("Failed to send booking request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse booking response")
}

#[tokio::test]
#[ignore]
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
async fn test_list_cabins() {
    let client = Client::new();

    let response = client
        .get(format!("{}/cabins", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let cabins = body.as_array().expect("cabins not an array");
    assert!(!cabins.is_empty());
    assert_eq!(cabins[0]["name"], "Cabana Afina");
}

#[tokio::test]
#[ignore]
async fn test_create_booking_prices_stay() {
    let client = Client::new();

    let body = create_booking(&client, "2030-06-01", "2030-06-04").await;

    // Seeded settings: 300/night, cleaning 50, service 10%, tax 19%
    assert_eq!(body["nights"], 3);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["payment_status"], "pending");
    assert_eq!(body["total"], "1211");

    let reference = body["booking_reference"].as_str().expect("No reference");
    assert!(reference.starts_with("AF"));
    assert_eq!(reference.len(), 8);
}

#[tokio::test]
#[ignore]
async fn test_overlapping_booking_rejected() {
    let client = Client::new();

    create_booking(&client, "2030-07-01", "2030-07-05").await;

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload("2030-07-04", "2030-07-07"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_checkout_day_is_bookable() {
    let client = Client::new();

    create_booking(&client, "2030-08-01", "2030-08-05").await;
    create_booking(&client, "2030-08-05", "2030-08-08").await;
}

#[tokio::test]
#[ignore]
async fn test_invalid_range_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/bookings", BASE_URL))
        .json(&booking_payload("2030-09-05", "2030-09-05"))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_unavailable_dates_feed() {
    let client = Client::new();

    create_booking(&client, "2030-10-01", "2030-10-03").await;

    let response = client
        .get(format!("{}/bookings/unavailable-dates?cabin_id=1", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let dates: Vec<String> = body["dates"]
        .as_array()
        .expect("dates not an array")
        .iter()
        .map(|d| d.as_str().unwrap().to_string())
        .collect();

    assert!(dates.contains(&"2030-10-01".to_string()));
    assert!(dates.contains(&"2030-10-02".to_string()));
    // Checkout day is free
    assert!(!dates.contains(&"2030-10-03".to_string()));
}

#[tokio::test]
#[ignore]
async fn test_payment_webhook_is_idempotent() {
    let client = Client::new();

    let booking = create_booking(&client, "2030-11-01", "2030-11-03").await;
    let reference = booking["booking_reference"].as_str().unwrap();

    let event = json!({
        "booking_reference": reference,
        "amount_paid": booking["total"],
        "succeeded": true
    });

    for _ in 0..2 {
        let response = client
            .post(format!("{}/payments/webhook", BASE_URL))
            .json(&event)
            .send()
            .await
            .expect("Failed to send webhook");
        assert!(response.status().is_success());
    }

    let response = client
        .get(format!("{}/bookings/{}", BASE_URL, reference))
        .send()
        .await
        .expect("Failed to fetch booking");
    let body: Value = response.json().await.expect("Failed to parse booking");

    assert_eq!(body["payment_status"], "paid");
    assert_eq!(body["status"], "confirmed");
}

#[tokio::test]
#[ignore]
async fn test_cancel_then_rebook() {
    let client = Client::new();

    let booking = create_booking(&client, "2030-12-01", "2030-12-05").await;
    let reference = booking["booking_reference"].as_str().unwrap();

    let response = client
        .post(format!("{}/bookings/{}/cancel", BASE_URL, reference))
        .send()
        .await
        .expect("Failed to cancel");
    assert!(response.status().is_success());

    // Cancelled bookings no longer block the calendar
    create_booking(&client, "2030-12-01", "2030-12-05").await;
}

#[tokio::test]
#[ignore]
async fn test_unknown_promo_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/promo-codes/validate", BASE_URL))
        .json(&json!({ "code": "NO-SUCH-CODE" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].as_str().unwrap().contains("not_found"));
}

#[tokio::test]
#[ignore]
async fn test_admin_endpoints_require_token() {
    let client = Client::new();

    let response = client
        .get(format!("{}/bookings", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
