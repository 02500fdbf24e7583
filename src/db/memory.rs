use async_trait::async_trait;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::{
    Booking, BookingChanges, BookingPeriod, BookingWithFlight, Flight, NewBooking, NewUser,
    Profile, User,
};
use crate::db::Store;
use crate::error::{AppError, DatabaseError};
use crate::Result;

#[derive(Debug, Default)]
struct Tables {
    flights: BTreeMap<i64, Flight>,
    users: BTreeMap<i64, User>,
    profiles: BTreeMap<i64, Profile>,
    bookings: BTreeMap<i64, Booking>,
    next_flight_id: i64,
    next_user_id: i64,
    next_booking_id: i64,
}

fn next_id(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

fn check_passengers(passengers: i32) -> Result<()> {
    if passengers > 0 {
        Ok(())
    } else {
        Err(AppError::DatabaseError(DatabaseError::QueryError(format!(
            "passengers must be positive, got {}",
            passengers
        ))))
    }
}

impl Tables {
    fn join(&self, booking: &Booking) -> Result<BookingWithFlight> {
        let flight = self.flights.get(&booking.flight_id).ok_or_else(|| {
            AppError::DatabaseError(DatabaseError::QueryError(format!(
                "booking {} references missing flight {}",
                booking.id, booking.flight_id
            )))
        })?;

        Ok(BookingWithFlight {
            booking: booking.clone(),
            flight: flight.clone(),
        })
    }
}

/// In-process [`Store`] with the same observable behaviour as the PostgreSQL
/// one: unique usernames, cascading profile creation, foreign key checks and
/// the `passengers > 0` and `miles >= 0` checks.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_flight(&self, destination: &str, time: NaiveTime, price: Decimal) -> Flight {
        let mut tables = self.tables.write().await;
        let flight = Flight {
            id: next_id(&mut tables.next_flight_id),
            destination: destination.to_string(),
            time,
            price,
        };
        tables.flights.insert(flight.id, flight.clone());
        flight
    }

    pub async fn set_miles(&self, user_id: i64, miles: i64) -> Result<()> {
        if miles < 0 {
            return Err(AppError::DatabaseError(DatabaseError::QueryError(
                "miles must be non-negative".to_string(),
            )));
        }

        let mut tables = self.tables.write().await;
        let profile = tables
            .profiles
            .get_mut(&user_id)
            .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;
        profile.miles = miles;
        Ok(())
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_flights(&self) -> Result<Vec<Flight>> {
        Ok(self.tables.read().await.flights.values().cloned().collect())
    }

    async fn get_flight(&self, id: i64) -> Result<Option<Flight>> {
        Ok(self.tables.read().await.flights.get(&id).cloned())
    }

    async fn create_user(&self, user: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;

        if tables.users.values().any(|u| u.username == user.username) {
            return Err(AppError::DatabaseError(DatabaseError::Duplicate));
        }

        let created = User {
            id: next_id(&mut tables.next_user_id),
            username: user.username,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            is_staff: user.is_staff,
        };
        tables.users.insert(created.id, created.clone());
        tables.profiles.insert(
            created.id,
            Profile {
                user_id: created.id,
                miles: 0,
            },
        );

        Ok(created)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(&user_id).cloned())
    }

    async fn create_booking(&self, booking: NewBooking) -> Result<BookingWithFlight> {
        check_passengers(booking.passengers)?;
        let mut tables = self.tables.write().await;

        if !tables.users.contains_key(&booking.user_id) {
            return Err(AppError::DatabaseError(DatabaseError::QueryError(format!(
                "user {} does not exist",
                booking.user_id
            ))));
        }
        if !tables.flights.contains_key(&booking.flight_id) {
            return Err(AppError::DatabaseError(DatabaseError::QueryError(format!(
                "flight {} does not exist",
                booking.flight_id
            ))));
        }

        let created = Booking {
            id: next_id(&mut tables.next_booking_id),
            flight_id: booking.flight_id,
            user_id: booking.user_id,
            date: booking.date,
            passengers: booking.passengers,
        };
        tables.bookings.insert(created.id, created.clone());

        tables.join(&created)
    }

    async fn get_booking(&self, id: i64) -> Result<Option<BookingWithFlight>> {
        let tables = self.tables.read().await;
        tables.bookings.get(&id).map(|b| tables.join(b)).transpose()
    }

    async fn update_booking(&self, id: i64, changes: BookingChanges) -> Result<BookingWithFlight> {
        if let Some(passengers) = changes.passengers {
            check_passengers(passengers)?;
        }
        let mut tables = self.tables.write().await;
        let booking = tables
            .bookings
            .get_mut(&id)
            .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

        if let Some(date) = changes.date {
            booking.date = date;
        }
        if let Some(passengers) = changes.passengers {
            booking.passengers = passengers;
        }
        let updated = booking.clone();

        tables.join(&updated)
    }

    async fn delete_booking(&self, id: i64) -> Result<()> {
        self.tables
            .write()
            .await
            .bookings
            .remove(&id)
            .map(|_| ())
            .ok_or(AppError::DatabaseError(DatabaseError::NotFound))
    }

    async fn list_bookings(
        &self,
        user_id: i64,
        period: BookingPeriod,
    ) -> Result<Vec<BookingWithFlight>> {
        let tables = self.tables.read().await;
        let mut bookings: Vec<&Booking> = tables
            .bookings
            .values()
            .filter(|b| b.user_id == user_id && period.contains(b.date))
            .collect();
        bookings.sort_by_key(|b| (b.date, b.id));

        bookings.into_iter().map(|b| tables.join(b)).collect()
    }
}
