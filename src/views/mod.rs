//! JSON representations of stored records.
//!
//! Each view is a plain struct built from one or more models; request payloads
//! carry their own validation and convert into model changes.

pub mod booking;
pub mod flight;
pub mod profile;
pub mod user;

pub use booking::{
    AdminBookingUpdate, BookingDetailView, BookingRequest, BookingUpdate, BookingView, UpdateScope,
};
pub use flight::FlightView;
pub use profile::ProfileView;
pub use user::{RegisterRequest, RegisteredUser, UserNameView};

/// Accumulates per-field validation messages into a single error.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    messages: Vec<String>,
}

impl FieldErrors {
    pub(crate) fn add(&mut self, field: &str, message: &str) {
        self.messages.push(format!("{}: {}", field, message));
    }

    pub(crate) fn into_result(self) -> crate::Result<()> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(crate::AppError::ValidationError(self.messages.join("; ")))
        }
    }
}
