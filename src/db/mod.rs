//! Persistence for flights, bookings, users and profiles.
//!
//! Handlers talk to the [`Store`] trait; [`DbOperations`] backs it with
//! PostgreSQL and [`MemoryStore`] keeps everything in process memory.

pub mod memory;
pub mod models;
pub mod operations;

use async_trait::async_trait;

use crate::Result;

pub use memory::MemoryStore;
pub use models::{
    Booking, BookingChanges, BookingPeriod, BookingWithFlight, Flight, NewBooking, NewUser,
    Profile, User,
};
pub use operations::DbOperations;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_flights(&self) -> Result<Vec<Flight>>;

    async fn get_flight(&self, id: i64) -> Result<Option<Flight>>;

    /// Inserts the user and an empty profile atomically. A taken username
    /// yields `DatabaseError::Duplicate`.
    async fn create_user(&self, user: NewUser) -> Result<User>;

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>>;

    async fn create_booking(&self, booking: NewBooking) -> Result<BookingWithFlight>;

    async fn get_booking(&self, id: i64) -> Result<Option<BookingWithFlight>>;

    /// Fails with `DatabaseError::NotFound` when the booking does not exist.
    async fn update_booking(&self, id: i64, changes: BookingChanges) -> Result<BookingWithFlight>;

    /// Fails with `DatabaseError::NotFound` when the booking does not exist.
    async fn delete_booking(&self, id: i64) -> Result<()>;

    /// Bookings owned by `user_id` inside `period`, ordered by date then id.
    async fn list_bookings(
        &self,
        user_id: i64,
        period: BookingPeriod,
    ) -> Result<Vec<BookingWithFlight>>;
}
