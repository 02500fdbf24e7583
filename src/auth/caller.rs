use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::db::{Booking, User};
use crate::error::{AppError, AuthError};
use crate::views::UpdateScope;
use crate::AppState;

/// The authenticated user behind a request, resolved from its bearer token.
#[derive(Debug, Clone)]
pub struct Caller {
    pub user: User,
}

impl Caller {
    pub fn id(&self) -> i64 {
        self.user.id
    }

    pub fn is_staff(&self) -> bool {
        self.user.is_staff
    }

    /// Staff may act on any booking; everyone else only on their own.
    pub fn ensure_can_access(&self, booking: &Booking) -> Result<(), AppError> {
        if self.is_staff() || booking.user_id == self.id() {
            Ok(())
        } else {
            Err(AppError::AuthError(AuthError::Forbidden))
        }
    }

    /// The set of booking fields this caller may change on `booking`.
    pub fn update_scope(&self, booking: &Booking) -> Result<UpdateScope, AppError> {
        self.ensure_can_access(booking)?;
        if self.is_staff() {
            Ok(UpdateScope::Admin)
        } else {
            Ok(UpdateScope::SelfService)
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let state = state
                .ok_or_else(|| AppError::InternalError("Application state not configured".into()))?;
            let token = token.ok_or(AppError::AuthError(AuthError::MissingToken))?;
            let user = state.auth_service.validate_token(&token).await?;
            Ok::<Caller, AppError>(Caller { user })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::NaiveDate;

    fn user(id: i64, is_staff: bool) -> User {
        User {
            id,
            username: format!("user{}", id),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_staff,
        }
    }

    fn booking_owned_by(user_id: i64) -> Booking {
        Booking {
            id: 1,
            flight_id: 1,
            user_id,
            date: NaiveDate::from_ymd_opt(2026, 11, 1).unwrap(),
            passengers: 1,
        }
    }

    #[test]
    fn test_update_scope_by_role() {
        let owner = Caller { user: user(1, false) };
        let staff = Caller { user: user(2, true) };
        let stranger = Caller { user: user(3, false) };
        let booking = booking_owned_by(1);

        assert_eq!(owner.update_scope(&booking).unwrap(), UpdateScope::SelfService);
        assert_eq!(staff.update_scope(&booking).unwrap(), UpdateScope::Admin);
        assert!(matches!(
            stranger.update_scope(&booking),
            Err(AppError::AuthError(AuthError::Forbidden))
        ));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc.def.ghi"));

        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic dXNlcjpwdw=="))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer "))
            .to_http_request();
        assert_eq!(bearer_token(&req), None);

        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
