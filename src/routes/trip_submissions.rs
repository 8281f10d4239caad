use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client};
use serde_json::json;
use std::sync::Arc;

use crate::db::mongo::DB_NAME;
use crate::models::submission::{BookingInquiry, TripSubmission};
use crate::services::stripe::checkout::StripeCheckout;
use crate::services::submission_service::{
    MongoSubmissionStore, SubmissionError, SubmissionService,
};

/// Concrete relay the server wires up in `main`.
pub type AppSubmissionService = SubmissionService<MongoSubmissionStore, StripeCheckout>;

/*
    /api/trip-submissions
*/
pub async fn submit_trip(
    service: web::Data<AppSubmissionService>,
    input: web::Json<BookingInquiry>,
) -> impl Responder {
    let inquiry = input.into_inner();

    match service.submit(&inquiry).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "success": true,
            "id": receipt.submission_id,
            "clientId": receipt.client_id,
            "checkoutUrl": receipt.checkout_url,
        })),
        Err(SubmissionError::Persistence(err)) => {
            eprintln!("Failed to persist trip submission: {}", err);
            HttpResponse::InternalServerError().json(json!({ "error": err.message }))
        }
        Err(SubmissionError::Payment {
            submission_id,
            client_id,
            error,
        }) => {
            eprintln!(
                "Trip submission {} saved but payment setup failed: {}",
                submission_id, error
            );
            HttpResponse::Ok().json(json!({
                "success": true,
                "id": submission_id,
                "clientId": client_id,
                "checkoutUrl": null,
                "paymentError": error.message,
            }))
        }
    }
}

pub async fn list_submissions(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<TripSubmission> =
        client.database(DB_NAME).collection("TripSubmissions");

    match collection.find(doc! {}).sort(doc! { "created_at": -1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<TripSubmission>>().await {
            Ok(submissions) => HttpResponse::Ok().json(json!({ "trips": submissions })),
            Err(err) => {
                eprintln!("Failed to collect trip submissions: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch trip submissions")
            }
        },
        Err(err) => {
            eprintln!("Failed to query trip submissions: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch trip submissions")
        }
    }
}
