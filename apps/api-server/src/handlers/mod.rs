//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod health;


use actix_web::web;

use crate::middleware::error::{json_error_handler, query_error_handler};

/// Configure all application routes.
///
/// Fixed-name blog filters are registered ahead of `/{id}` so they are never
/// taken for an id.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/token", web::post().to(auth::token))
                        .route("/me", web::get().to(auth::me)),
                )
                // Blog routes
                .service(
                    web::scope("/blogs")
                        .route("", web::get().to(blogs::list))
                        .route("", web::post().to(blogs::create))
                        .route("/by_date", web::get().to(blogs::by_date))
                        .route("/by_date_range", web::get().to(blogs::by_date_range))
                        .route("/created_after_date", web::get().to(blogs::created_after_date))
                        .route("/created_before_date", web::get().to(blogs::created_before_date))
                        .route("/{id}", web::get().to(blogs::retrieve))
                        .route("/{id}", web::put().to(blogs::update))
                        .route("/{id}", web::patch().to(blogs::partial_update))
                        .route("/{id}", web::delete().to(blogs::delete)),
                ),
        );
}
