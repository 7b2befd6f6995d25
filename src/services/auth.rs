//! Admin authentication service

use chrono::{Duration, Utc};
use sha2::{Digest, Sha256};

use crate::{
    config::AdminConfig,
    error::{AppError, AppResult},
    models::auth::{AdminClaims, LoginResponse},
};

const ADMIN_SUBJECT: &str = "admin";

#[derive(Clone)]
pub struct AuthService {
    config: AdminConfig,
}

impl AuthService {
    pub fn new(config: AdminConfig) -> Self {
        Self { config }
    }

    /// Exchange the admin password for a bearer token
    pub fn login(&self, password: &str) -> AppResult<LoginResponse> {
        let given = Sha256::digest(password.as_bytes());
        let expected = Sha256::digest(self.config.password.as_bytes());
        if given != expected {
            tracing::warn!("Rejected admin login attempt");
            return Err(AppError::Authentication("Invalid password".to_string()));
        }

        let now = Utc::now();
        let lifetime = Duration::hours(self.config.jwt_expiration_hours as i64);
        let claims = AdminClaims {
            sub: ADMIN_SUBJECT.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!("Admin logged in");
        Ok(LoginResponse {
            token,
            token_type: "Bearer".to_string(),
            expires_in: lifetime.num_seconds(),
        })
    }

    pub fn verify(&self, token: &str) -> AppResult<AdminClaims> {
        let claims = AdminClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|e| AppError::Authentication(e.to_string()))?;
        if claims.sub != ADMIN_SUBJECT {
            return Err(AppError::Authentication("Not an admin token".to_string()));
        }
        Ok(claims)
    }
}
