use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{BookingPeriod, BookingWithFlight, Profile, Store, User};
use crate::error::{AppError, DatabaseError};
use crate::loyalty::{tier_for_miles, Tier};
use crate::views::{BookingView, UserNameView};
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub user: UserNameView,
    pub miles: i64,
    pub past_bookings: Vec<BookingView>,
    pub tier: Option<Tier>,
}

impl ProfileView {
    pub fn new(user: &User, profile: &Profile, past_bookings: &[BookingWithFlight]) -> Self {
        Self {
            user: UserNameView::from(user),
            miles: profile.miles,
            past_bookings: past_bookings.iter().map(BookingView::from).collect(),
            tier: tier_for_miles(profile.miles),
        }
    }

    /// Loads the profile of `user` with the bookings dated strictly before `today`.
    pub async fn load(store: &dyn Store, user: &User, today: NaiveDate) -> Result<Self> {
        let profile = store
            .get_profile(user.id)
            .await?
            .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;
        let past = store
            .list_bookings(user.id, BookingPeriod::Before(today))
            .await?;

        Ok(Self::new(user, &profile, &past))
    }
}
