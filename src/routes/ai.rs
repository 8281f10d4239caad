use actix_web::{web, HttpResponse, Responder};
use serde_json::{json, Value};

use crate::services::ai_service::{
    AiService, AiServiceError, RecommendationRequest, TripBreakdownRequest,
};

/*
    /api/ai/trip-breakdown
*/
pub async fn trip_breakdown(
    ai: web::Data<Option<AiService>>,
    input: web::Json<Value>,
) -> impl Responder {
    let body = input.into_inner();

    if body["destination"].is_null()
        || body["duration"].is_null()
        || body["budget"].is_null()
        || body["experiences"].is_null()
    {
        return HttpResponse::BadRequest().json(json!({
            "error": "Missing required fields: destination, duration, budget, experiences"
        }));
    }
    if !body["experiences"].is_array() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Experiences must be an array"
        }));
    }

    let request: TripBreakdownRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({
                "error": format!("Invalid request body: {}", err)
            }))
        }
    };

    let Some(ai) = ai.get_ref().as_ref() else {
        return HttpResponse::ServiceUnavailable().json(json!({
            "error": "AI service is not configured"
        }));
    };

    match ai.generate_trip_breakdown(&request).await {
        Ok(analysis) => HttpResponse::Ok().json(json!({ "success": true, "data": analysis })),
        Err(AiServiceError::InvalidInput(msg)) => {
            HttpResponse::BadRequest().json(json!({ "error": msg }))
        }
        Err(err) => {
            eprintln!("Trip breakdown API error: {}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to generate trip breakdown",
                "details": err.to_string(),
            }))
        }
    }
}

/*
    /api/ai/recommendations
*/
pub async fn recommendations(
    ai: web::Data<Option<AiService>>,
    input: web::Json<Value>,
) -> impl Responder {
    let body = input.into_inner();

    if body["destination"].is_null() || body["budget"].is_null() || body["experiences"].is_null() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Missing required fields: destination, budget, experiences"
        }));
    }
    if !body["experiences"].is_array() {
        return HttpResponse::BadRequest().json(json!({
            "error": "Experiences must be an array"
        }));
    }

    let request: RecommendationRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(err) => {
            return HttpResponse::BadRequest().json(json!({
                "error": format!("Invalid request body: {}", err)
            }))
        }
    };

    let Some(ai) = ai.get_ref().as_ref() else {
        return HttpResponse::ServiceUnavailable().json(json!({
            "error": "AI service is not configured"
        }));
    };

    match ai.generate_recommendations(&request).await {
        Ok(recommendations) => {
            HttpResponse::Ok().json(json!({ "success": true, "data": recommendations }))
        }
        Err(AiServiceError::InvalidInput(msg)) => {
            HttpResponse::BadRequest().json(json!({ "error": msg }))
        }
        Err(err) => {
            eprintln!("Recommendations API error: {}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to generate recommendations",
                "details": err.to_string(),
            }))
        }
    }
}
