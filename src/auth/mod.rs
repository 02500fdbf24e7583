//! Authentication for the booking API.
//!
//! Passwords are stored as Argon2 PHC strings, sessions are stateless HS256
//! JWTs, and [`Caller`] resolves the bearer token of a request to its user.

mod caller;
pub mod handlers;
mod password;
mod service;

pub use caller::Caller;
pub use password::{hash_password, verify_password};
pub use service::{AuthService, Claims};
