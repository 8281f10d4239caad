use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::mongo::DB_NAME;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DestinationRecord {
    pub id: String,
    pub name: String,
    pub image_url: String,
    #[serde(default)]
    pub is_featured: bool,
}

/// Built-in list served when the Destinations collection is unreachable or
/// empty, so the destination step always has something to offer.
pub fn fallback_destinations() -> Vec<DestinationRecord> {
    vec![
        DestinationRecord {
            id: "paris".to_string(),
            name: "Paris".to_string(),
            image_url: "/about-hero.jpg".to_string(),
            is_featured: true,
        },
        DestinationRecord {
            id: "tokyo".to_string(),
            name: "Tokyo".to_string(),
            image_url: "/hero-desert.jpg".to_string(),
            is_featured: false,
        },
        DestinationRecord {
            id: "bali".to_string(),
            name: "Bali".to_string(),
            image_url: "/placeholder.jpg".to_string(),
            is_featured: true,
        },
    ]
}

/*
    /api/destinations
*/
pub async fn get_destinations(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<DestinationRecord> =
        client.database(DB_NAME).collection("Destinations");

    let records = match collection.find(doc! {}).await {
        Ok(cursor) => cursor
            .try_collect::<Vec<DestinationRecord>>()
            .await
            .unwrap_or_default(),
        Err(err) => {
            eprintln!("Failed to load destinations: {:?}", err);
            Vec::new()
        }
    };

    let destinations = if records.is_empty() {
        fallback_destinations()
    } else {
        records
    };

    HttpResponse::Ok().json(serde_json::json!({ "destinations": destinations }))
}
