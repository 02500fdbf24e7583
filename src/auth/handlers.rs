use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::AppError;
use crate::views::{RegisterRequest, RegisteredUser};
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for username: {}", req.username);
    match state.auth_service.authenticate(&req.username, &req.password).await {
        Ok(token) => {
            info!("Login successful for username: {}", req.username);
            Ok(HttpResponse::Ok().json(AuthResponse { token }))
        }
        Err(e) => {
            error!("Login failed for username: {}: {}", req.username, e);
            Err(e)
        }
    }
}

/// Responds with the created user's public fields, never the submitted payload.
pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    let username = req.username.clone().unwrap_or_default();
    info!("Received registration request for username: {}", username);

    match state.auth_service.register(req).await {
        Ok(user) => {
            info!(user_id = user.id, "Registration successful for username: {}", username);
            Ok(HttpResponse::Created().json(RegisteredUser::from(&user)))
        }
        Err(e) => {
            error!("Registration failed for username: {}: {}", username, e);
            Err(e)
        }
    }
}
