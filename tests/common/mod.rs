use actix_web::{web, App};

use stamped_api::routes;
use stamped_api::services::ai_service::AiService;
use stamped_api::services::stripe::checkout::StripeCheckout;

/// Test application with the public routes wired the way `main` wires them
/// and no collaborators configured: request validation runs for real, and
/// anything that would reach the network answers 503 instead.
pub struct TestApp;

impl TestApp {
    pub fn create_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(None::<AiService>))
            .app_data(web::Data::new(None::<StripeCheckout>))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
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
                    ),
            )
    }
}
