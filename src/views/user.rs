use serde::{Deserialize, Serialize};
use std::fmt;

use crate::db::User;
use crate::views::FieldErrors;
use crate::Result;

const MAX_NAME_LENGTH: usize = 150;

/// Registration payload. Missing fields deserialize as `None` so they can be
/// reported alongside the other field errors.
#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("password", &"[redacted]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

fn valid_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::default();

        match self.username.as_deref() {
            None => errors.add("username", "This field is required."),
            Some("") => errors.add("username", "This field may not be blank."),
            Some(name) if name.chars().count() > MAX_NAME_LENGTH => {
                errors.add("username", "Ensure this field has no more than 150 characters.")
            }
            Some(name) if !name.chars().all(valid_username_char) => errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            ),
            Some(_) => {}
        }

        match self.password.as_deref() {
            None => errors.add("password", "This field is required."),
            Some("") => errors.add("password", "This field may not be blank."),
            Some(_) => {}
        }

        for (field, value) in [("first_name", &self.first_name), ("last_name", &self.last_name)] {
            if matches!(value, Some(v) if v.chars().count() > MAX_NAME_LENGTH) {
                errors.add(field, "Ensure this field has no more than 150 characters.");
            }
        }

        errors.into_result()
    }
}

/// The safe representation of a newly registered user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisteredUser {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for RegisteredUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserNameView {
    pub first_name: String,
    pub last_name: String,
}

impl From<&User> for UserNameView {
    fn from(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}
