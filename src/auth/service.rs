use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::auth::password::{hash_password, verify_password, verify_unknown_user};
use crate::db::{NewUser, Store, User};
use crate::error::{AppError, AuthError, DatabaseError};
use crate::views::RegisterRequest;
use crate::Result;

const USERNAME_TAKEN: &str = "username: A user with that username already exists.";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // User ID
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

pub struct AuthService {
    store: Arc<dyn Store>,
    jwt_secret: String,
    token_expiry_hours: i64,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, jwt_secret: String, token_expiry_hours: i64) -> Self {
        Self {
            store,
            jwt_secret,
            token_expiry_hours,
        }
    }

    /// Validates the request and stores a new user with a hashed password.
    /// Nothing is written when validation fails or the username is taken.
    pub async fn register(&self, request: RegisterRequest) -> Result<User> {
        request.validate()?;

        let RegisterRequest {
            username,
            password,
            first_name,
            last_name,
        } = request;
        let username = username.unwrap_or_default();
        let password = password.unwrap_or_default();

        if self.store.get_user_by_username(&username).await?.is_some() {
            return Err(AppError::ValidationError(USERNAME_TAKEN.to_string()));
        }

        // Argon2 is deliberately slow; keep it off the async workers.
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))??;

        let new_user = NewUser {
            username,
            password_hash,
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            is_staff: false,
        };

        match self.store.create_user(new_user).await {
            Ok(user) => Ok(user),
            // Lost a race with a concurrent registration of the same name.
            Err(AppError::DatabaseError(DatabaseError::Duplicate)) => {
                Err(AppError::ValidationError(USERNAME_TAKEN.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Checks credentials and issues a token.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String> {
        let user = self.store.get_user_by_username(username).await?;

        let password = password.to_string();
        let stored_hash = user.as_ref().map(|u| u.password_hash.clone());
        let verified = tokio::task::spawn_blocking(move || match stored_hash {
            Some(hash) => verify_password(&password, &hash),
            None => verify_unknown_user(&password),
        })
        .await
        .map_err(|e| AppError::InternalError(e.to_string()))?;

        match user {
            Some(user) if verified => self.generate_token(user.id),
            _ => {
                warn!(username, "Password verification failed");
                Err(AppError::AuthError(AuthError::InvalidCredentials))
            }
        }
    }

    /// Resolves a bearer token to the user it was issued for.
    pub async fn validate_token(&self, token: &str) -> Result<User> {
        let claims = self.decode_token(token)?;

        let user_id: i64 = claims
            .sub
            .parse()
            .map_err(|_| AppError::AuthError(AuthError::InvalidToken))?;

        let user = self
            .store
            .get_user_by_id(user_id)
            .await?
            .ok_or(AppError::AuthError(AuthError::InvalidToken))?;

        debug!(user_id, "Token validated");
        Ok(user)
    }

    fn generate_token(&self, user_id: i64) -> Result<String> {
        let now = Utc::now();
        let exp = (now + Duration::hours(self.token_expiry_hours)).timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            exp,
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    fn decode_token(&self, token: &str) -> Result<Claims> {
        let claims = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(claims.claims)
    }
}
