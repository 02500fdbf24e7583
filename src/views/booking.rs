use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::{BookingChanges, BookingWithFlight, NewBooking};
use crate::error::AppError;
use crate::views::{FieldErrors, FlightView};
use crate::Result;

/// Summary of a booking: the flight is reduced to its destination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingView {
    pub flight: String,
    pub date: NaiveDate,
    pub id: i64,
}

impl From<&BookingWithFlight> for BookingView {
    fn from(record: &BookingWithFlight) -> Self {
        Self {
            flight: record.flight.destination.clone(),
            date: record.booking.date,
            id: record.booking.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingDetailView {
    pub total: Decimal,
    pub flight: FlightView,
    pub date: NaiveDate,
    pub passengers: i32,
    pub id: i64,
}

impl From<&BookingWithFlight> for BookingDetailView {
    fn from(record: &BookingWithFlight) -> Self {
        let booking = &record.booking;
        Self {
            total: Decimal::from(booking.passengers) * record.flight.price,
            flight: FlightView::from(&record.flight),
            date: booking.date,
            passengers: booking.passengers,
            id: booking.id,
        }
    }
}

fn check_passengers(errors: &mut FieldErrors, passengers: Option<i32>) {
    if matches!(passengers, Some(p) if p < 1) {
        errors.add("passengers", "Ensure this value is greater than or equal to 1.");
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub passengers: i32,
}

impl BookingRequest {
    pub fn into_new_booking(self, flight_id: i64, user_id: i64) -> Result<NewBooking> {
        let mut errors = FieldErrors::default();
        check_passengers(&mut errors, Some(self.passengers));
        errors.into_result()?;

        Ok(NewBooking {
            flight_id,
            user_id,
            date: self.date,
            passengers: self.passengers,
        })
    }
}

/// Changes a staff member may make to any booking.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdminBookingUpdate {
    pub date: Option<NaiveDate>,
    pub passengers: Option<i32>,
}

/// Changes an owner may make to their own booking.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BookingUpdate {
    pub passengers: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateScope {
    Admin,
    SelfService,
}

impl UpdateScope {
    /// Parses `payload` with the field set this scope allows and validates it.
    /// Fields outside the scope are rejected, not ignored.
    pub fn parse_changes(self, payload: serde_json::Value) -> Result<BookingChanges> {
        let changes = match self {
            UpdateScope::Admin => {
                let update: AdminBookingUpdate = serde_json::from_value(payload)
                    .map_err(|e| AppError::ValidationError(e.to_string()))?;
                BookingChanges {
                    date: update.date,
                    passengers: update.passengers,
                }
            }
            UpdateScope::SelfService => {
                let update: BookingUpdate = serde_json::from_value(payload)
                    .map_err(|e| AppError::ValidationError(e.to_string()))?;
                BookingChanges {
                    date: None,
                    passengers: update.passengers,
                }
            }
        };

        let mut errors = FieldErrors::default();
        check_passengers(&mut errors, changes.passengers);
        errors.into_result()?;

        Ok(changes)
    }
}
