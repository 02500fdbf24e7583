use actix_web::{web, HttpResponse};
use tracing::{info, warn};

use crate::api::today;
use crate::auth::Caller;
use crate::db::{BookingPeriod, BookingWithFlight};
use crate::error::{AppError, DatabaseError};
use crate::views::{BookingDetailView, BookingRequest, BookingView};
use crate::AppState;

/// Fetches a booking the caller is allowed to see.
async fn accessible_booking(
    state: &AppState,
    caller: &Caller,
    id: i64,
) -> Result<BookingWithFlight, AppError> {
    let record = state
        .store
        .get_booking(id)
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

    if let Err(e) = caller.ensure_can_access(&record.booking) {
        warn!(booking_id = id, user_id = caller.id(), "Refused access to booking");
        return Err(e);
    }

    Ok(record)
}

/// The caller's bookings from today onward.
pub async fn list_bookings(
    caller: Caller,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let records = state
        .store
        .list_bookings(caller.id(), BookingPeriod::FromOnward(today()))
        .await?;
    let views: Vec<BookingView> = records.iter().map(BookingView::from).collect();

    Ok(HttpResponse::Ok().json(views))
}

pub async fn book_flight(
    path: web::Path<i64>,
    caller: Caller,
    body: web::Json<BookingRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let flight_id = path.into_inner();
    if state.store.get_flight(flight_id).await?.is_none() {
        return Err(AppError::DatabaseError(DatabaseError::NotFound));
    }

    let new_booking = body.into_inner().into_new_booking(flight_id, caller.id())?;
    let record = state.store.create_booking(new_booking).await?;
    info!(
        booking_id = record.booking.id,
        flight_id,
        user_id = caller.id(),
        passengers = record.booking.passengers,
        "Booking created"
    );

    Ok(HttpResponse::Created().json(BookingDetailView::from(&record)))
}

pub async fn get_booking(
    path: web::Path<i64>,
    caller: Caller,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let record = accessible_booking(&state, &caller, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(BookingDetailView::from(&record)))
}

/// Staff may change date and passengers; owners may change passengers only.
pub async fn update_booking(
    path: web::Path<i64>,
    caller: Caller,
    body: web::Json<serde_json::Value>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let record = accessible_booking(&state, &caller, id).await?;

    let scope = caller.update_scope(&record.booking)?;
    let changes = scope.parse_changes(body.into_inner())?;
    let updated = state.store.update_booking(id, changes).await?;
    info!(booking_id = id, user_id = caller.id(), ?scope, "Booking updated");

    Ok(HttpResponse::Ok().json(BookingDetailView::from(&updated)))
}

pub async fn cancel_booking(
    path: web::Path<i64>,
    caller: Caller,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    accessible_booking(&state, &caller, id).await?;

    state.store.delete_booking(id).await?;
    info!(booking_id = id, user_id = caller.id(), "Booking cancelled");

    Ok(HttpResponse::NoContent().finish())
}
