#![allow(dead_code)]

use actix_web::web;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use flight_booking_server::auth::hash_password;
use flight_booking_server::db::{Flight, NewBooking, NewUser, User};
use flight_booking_server::views::RegisterRequest;
use flight_booking_server::{AppState, MemoryStore, Settings, Store};
use rust_decimal::Decimal;
use std::sync::Arc;

pub struct TestContext {
    pub store: MemoryStore,
    pub state: web::Data<AppState>,
}

impl TestContext {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let config = Settings::new_for_test(None).expect("Failed to load test config");
        let state = AppState::with_store(config, Arc::new(store.clone()));

        Self {
            store,
            state: web::Data::new(state),
        }
    }

    /// Registers a regular user through the auth service and logs them in.
    pub async fn user_with_token(&self, username: &str, password: &str) -> (User, String) {
        let user = self
            .state
            .auth_service
            .register(RegisterRequest {
                username: Some(username.to_string()),
                password: Some(password.to_string()),
                first_name: Some("Test".to_string()),
                last_name: Some("User".to_string()),
            })
            .await
            .expect("registration failed");
        let token = self
            .state
            .auth_service
            .authenticate(username, password)
            .await
            .expect("login failed");

        (user, token)
    }

    /// Staff accounts cannot be registered over HTTP, so this goes to the store.
    pub async fn staff_with_token(&self, username: &str) -> (User, String) {
        let user = self
            .store
            .create_user(NewUser {
                username: username.to_string(),
                password_hash: hash_password("staff-password").unwrap(),
                first_name: "Desk".to_string(),
                last_name: "Agent".to_string(),
                is_staff: true,
            })
            .await
            .unwrap();
        let token = self
            .state
            .auth_service
            .authenticate(username, "staff-password")
            .await
            .unwrap();

        (user, token)
    }

    pub async fn flight(&self, destination: &str, price: Decimal) -> Flight {
        self.store
            .add_flight(destination, NaiveTime::from_hms_opt(9, 30, 0).unwrap(), price)
            .await
    }

    pub async fn booking(&self, user: &User, flight: &Flight, days_from_today: i64, passengers: i32) -> i64 {
        self.store
            .create_booking(NewBooking {
                flight_id: flight.id,
                user_id: user.id,
                date: today() + Duration::days(days_from_today),
                passengers,
            })
            .await
            .unwrap()
            .booking
            .id
    }
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
