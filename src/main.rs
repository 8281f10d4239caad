use std::env;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use stamped_api::db;
use stamped_api::routes;
use stamped_api::services::ai_service::AiService;
use stamped_api::services::places_service::PlacesService;
use stamped_api::services::stripe::checkout::StripeCheckout;
use stamped_api::services::submission_service::{MongoSubmissionStore, SubmissionService};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);

    let mongo_uri = env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;

    let ai_service = match AiService::from_env() {
        Ok(service) => Some(service),
        Err(err) => {
            println!("AI service not available: {}. Itinerary previews disabled.", err);
            None
        }
    };

    let places_service = match PlacesService::new() {
        Ok(service) => Some(service),
        Err(err) => {
            println!("Places service not available: {}. Destination search disabled.", err);
            None
        }
    };

    let payments = StripeCheckout::from_env();
    if payments.is_none() {
        println!("STRIPE_SECRET_KEY not set. Checkout disabled.");
    }

    let mongo_data = web::Data::new(client.clone());
    let ai_data = web::Data::new(ai_service);
    let places_data = web::Data::new(places_service);
    let payments_data = web::Data::new(payments.clone());
    let submission_data = web::Data::new(SubmissionService::new(
        MongoSubmissionStore::new(client.clone()),
        payments,
    ));

    println!("Attempting to bind to {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(mongo_data.clone())
            .app_data(ai_data.clone())
            .app_data(places_data.clone())
            .app_data(payments_data.clone())
            .app_data(submission_data.clone())
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .route(
                        "/destinations",
                        web::get().to(routes::destinations::get_destinations),
                    )
                    .service(
                        web::scope("/curated-items")
                            .route("", web::get().to(routes::curated::get_curated_items))
                            .route("", web::post().to(routes::curated::add_curated_item)),
                    )
                    .service(
                        web::scope("/trip-submissions")
                            .route("", web::post().to(routes::trip_submissions::submit_trip))
                            .route("", web::get().to(routes::trip_submissions::list_submissions)),
                    )
                    .service(
                        web::scope("/ai")
                            .route("/trip-breakdown", web::post().to(routes::ai::trip_breakdown))
                            .route(
                                "/recommendations",
                                web::post().to(routes::ai::recommendations),
                            ),
                    )
                    .route(
                        "/stripe/checkout",
                        web::post().to(routes::checkout::create_checkout),
                    )
                    .service(
                        web::scope("/places")
                            .route("/search", web::get().to(routes::places::search_places))
                            .route("/{place_id}", web::get().to(routes::places::place_details)),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
