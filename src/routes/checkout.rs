use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

use crate::services::stripe::checkout::StripeCheckout;
use crate::services::submission_service::{
    app_base_url, CheckoutProvider, CheckoutRequest, DEPOSIT_AMOUNT_CENTS,
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    #[serde(default)]
    pub amount_cents: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

/*
    /api/stripe/checkout
*/
pub async fn create_checkout(
    payments: web::Data<Option<StripeCheckout>>,
    input: Option<web::Json<CheckoutInput>>,
) -> impl Responder {
    let input = input.map(web::Json::into_inner).unwrap_or_default();

    let amount = input.amount_cents.unwrap_or(DEPOSIT_AMOUNT_CENTS);
    if amount <= 0 {
        return HttpResponse::BadRequest().json(json!({
            "error": "amountCents must be a positive integer"
        }));
    }

    let Some(payments) = payments.get_ref().as_ref() else {
        return HttpResponse::ServiceUnavailable().json(json!({
            "error": "Payments are not configured"
        }));
    };

    let base_url = app_base_url();
    let request = CheckoutRequest {
        amount_cents: amount,
        description: input
            .description
            .unwrap_or_else(|| "Deposit for your custom trip".to_string()),
        success_url: format!("{}/dashboard/client?success=true", base_url),
        cancel_url: format!("{}/build?canceled=true", base_url),
        metadata: HashMap::new(),
    };

    match payments.create_checkout_session(&request).await {
        Ok(session) => HttpResponse::Ok().json(json!({ "url": session.url })),
        Err(err) => {
            eprintln!("Failed to create checkout session: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": err.message }))
        }
    }
}
