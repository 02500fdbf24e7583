//! HTTP routes for flights, bookings and profiles.

pub mod bookings;
pub mod flights;
pub mod profile;

use actix_web::{error, web, HttpRequest};
use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::auth::handlers::{login, register};
use crate::error::AppError;
use crate::health_check;

/// The reference day for splitting past and upcoming bookings.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Turns body extraction failures (malformed JSON, unknown or mistyped
/// fields) into validation errors with the usual error body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err: error::JsonPayloadError, req: &HttpRequest| {
            warn!(path = %req.path(), "Rejected request body: {}", err);
            AppError::ValidationError(err.to_string()).into()
        })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health_check))
        .route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/flights", web::get().to(flights::list_flights))
        .route("/flights/{id}", web::get().to(flights::get_flight))
        .route("/flights/{id}/book", web::post().to(bookings::book_flight))
        .route("/bookings", web::get().to(bookings::list_bookings))
        .service(
            web::resource("/bookings/{id}")
                .route(web::get().to(bookings::get_booking))
                .route(web::put().to(bookings::update_booking))
                .route(web::patch().to(bookings::update_booking))
                .route(web::delete().to(bookings::cancel_booking)),
        )
        .route("/profile", web::get().to(profile::get_profile));
}
