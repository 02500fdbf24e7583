use actix_web::{web, HttpResponse};

use crate::error::{AppError, DatabaseError};
use crate::views::FlightView;
use crate::AppState;

pub async fn list_flights(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let flights = state.store.list_flights().await?;
    let views: Vec<FlightView> = flights.iter().map(FlightView::from).collect();

    Ok(HttpResponse::Ok().json(views))
}

pub async fn get_flight(
    path: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let flight = state
        .store
        .get_flight(path.into_inner())
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    Ok(HttpResponse::Ok().json(FlightView::from(&flight)))
}
