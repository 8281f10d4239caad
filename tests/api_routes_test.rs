mod common;

use actix_web::test;
use serde_json::json;

use common::TestApp;

#[actix_rt::test]
async fn test_health_check() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "OK");
}

#[actix_rt::test]
async fn test_trip_breakdown_missing_fields() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/trip-breakdown")
        .set_json(&json!({
            "destination": "Paris",
            "duration": "week"
            // budget and experiences missing
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Missing required fields: destination, duration, budget, experiences"
    );
}

#[actix_rt::test]
async fn test_trip_breakdown_rejects_non_array_experiences() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/trip-breakdown")
        .set_json(&json!({
            "destination": "Paris",
            "duration": "week",
            "budget": "luxury",
            "experiences": "Culture"
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Experiences must be an array");
}

#[actix_rt::test]
async fn test_trip_breakdown_rejects_unknown_budget_value() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/trip-breakdown")
        .set_json(&json!({
            "destination": "Paris",
            "duration": "week",
            "budget": "extravagant",
            "experiences": []
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_trip_breakdown_unconfigured_service_is_503() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/trip-breakdown")
        .set_json(&json!({
            "destination": "Paris",
            "duration": "week",
            "budget": "luxury",
            "experiences": ["Culture"]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
}

#[actix_rt::test]
async fn test_recommendations_missing_fields() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/ai/recommendations")
        .set_json(&json!({ "destination": "Paris" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["error"],
        "Missing required fields: destination, budget, experiences"
    );
}

#[actix_rt::test]
async fn test_checkout_rejects_non_positive_amount() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/stripe/checkout")
        .set_json(&json!({ "amountCents": -500 }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_checkout_unconfigured_payments_is_503() {
    let app = test::init_service(TestApp::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/stripe/checkout")
        .set_json(&json!({}))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 503);
}
