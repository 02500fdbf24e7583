use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Flight {
    pub id: i64,
    pub destination: String,
    pub time: NaiveTime,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub flight_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub passengers: i32,
}

/// A booking together with the flight it references.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingWithFlight {
    pub booking: Booking,
    pub flight: Flight,
}

/// Stored user. Not `Serialize`: the password hash must never leave the store
/// through a representation.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Profile {
    pub user_id: i64,
    pub miles: i64,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub flight_id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub passengers: i32,
}

/// Field changes applied to a booking; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingChanges {
    pub date: Option<NaiveDate>,
    pub passengers: Option<i32>,
}

/// Which of a user's bookings to list, relative to a reference day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingPeriod {
    /// Dated strictly before the day.
    Before(NaiveDate),
    /// Dated on or after the day.
    FromOnward(NaiveDate),
}

impl BookingPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            BookingPeriod::Before(day) => date < day,
            BookingPeriod::FromOnward(day) => date >= day,
        }
    }
}
