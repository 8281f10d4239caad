use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::bson::{doc, DateTime};
use mongodb::Client;
use std::sync::Arc;

use crate::db::mongo::DB_NAME;
use crate::models::curated::{CuratedItem, CuratedItemFilters};

/*
    /api/curated-items
*/
pub async fn get_curated_items(
    data: web::Data<Arc<Client>>,
    query: web::Query<CuratedItemFilters>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<CuratedItem> =
        client.database(DB_NAME).collection("CuratedItems");

    let filters = query.into_inner();
    let mut filter = doc! {};
    if let Some(category) = filters.category {
        filter.insert("category", category);
    }
    if let Some(item_type) = filters.item_type {
        filter.insert("type", item_type);
    }
    if let Some(cost) = filters.cost {
        filter.insert("price_range", cost);
    }
    if let Some(distance) = filters.distance {
        filter.insert("distance", distance);
    }
    if let Some(search) = filters.search {
        let pattern = regex::escape(&search);
        filter.insert(
            "$or",
            vec![
                doc! { "title": { "$regex": &pattern, "$options": "i" } },
                doc! { "description": { "$regex": &pattern, "$options": "i" } },
                doc! { "category": { "$regex": &pattern, "$options": "i" } },
            ],
        );
    }

    match collection.find(filter).sort(doc! { "created_at": -1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<CuratedItem>>().await {
            Ok(items) => HttpResponse::Ok().json(items),
            Err(err) => {
                eprintln!("Failed to collect curated items: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch curated items")
            }
        },
        Err(err) => {
            eprintln!("Failed to query curated items: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch curated items")
        }
    }
}

pub async fn add_curated_item(
    data: web::Data<Arc<Client>>,
    input: web::Json<CuratedItem>,
) -> impl Responder {
    let client = data.into_inner();
    let collection: mongodb::Collection<CuratedItem> =
        client.database(DB_NAME).collection("CuratedItems");

    let mut item = input.into_inner();
    item.created_at = Some(DateTime::now());

    match collection.insert_one(&item).await {
        Ok(_) => HttpResponse::Ok().json(item),
        Err(err) => {
            eprintln!("Failed to insert curated item: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create curated item")
        }
    }
}
