use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::services::places_service::{CityPrediction, PlaceSearch, PlacesService};

#[derive(Debug, Deserialize)]
pub struct PlaceQuery {
    pub q: Option<String>,
}

/*
    /api/places/search
*/
pub async fn search_places(
    places: web::Data<Option<PlacesService>>,
    query: web::Query<PlaceQuery>,
) -> impl Responder {
    let Some(places) = places.get_ref().as_ref() else {
        return HttpResponse::ServiceUnavailable().json(json!({
            "error": "Place search is not configured"
        }));
    };

    let query = query.into_inner().q.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return HttpResponse::Ok().json(Vec::<CityPrediction>::new());
    }

    // lookup failures degrade to an empty suggestion list
    match places.predict(query).await {
        Ok(predictions) => HttpResponse::Ok().json(predictions),
        Err(err) => {
            eprintln!("Place search failed: {}", err);
            HttpResponse::Ok().json(Vec::<CityPrediction>::new())
        }
    }
}

/*
    /api/places/{place_id}
*/
pub async fn place_details(
    places: web::Data<Option<PlacesService>>,
    path: web::Path<String>,
) -> impl Responder {
    let Some(places) = places.get_ref().as_ref() else {
        return HttpResponse::ServiceUnavailable().json(json!({
            "error": "Place search is not configured"
        }));
    };

    match places.details(path.into_inner().as_str()).await {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(err) => {
            eprintln!("Failed to get place details: {}", err);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to get place details"
            }))
        }
    }
}
