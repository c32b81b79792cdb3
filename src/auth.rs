use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::AppError, state::AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // identity ID
    pub exp: usize,  // expiration time
}

/// The identity a request acts as. Threaded explicitly into every service call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Caller {
    identity_id: Option<Uuid>,
}

impl Caller {
    pub fn anonymous() -> Self {
        Self { identity_id: None }
    }

    pub fn authenticated(identity_id: Uuid) -> Self {
        Self {
            identity_id: Some(identity_id),
        }
    }

    pub fn identity_id(&self) -> Option<Uuid> {
        self.identity_id
    }

    pub fn require_identity(&self) -> Result<Uuid, AppError> {
        self.identity_id
            .ok_or_else(|| AppError::AuthRequired("Sign in to continue".into()))
    }
}

/// Verifies HS256 tokens minted by the identity provider.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        let token_data = decode::<Claims>(token, &self.key, &self.validation)
            .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

        Uuid::parse_str(&token_data.claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid identity ID in token".into()))
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(AUTHORIZATION) {
            return Ok(Caller::anonymous());
        }

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Unauthorized("Missing or invalid Authorization header".into())
                        .to_response()
                })?;

        let identity_id = state.tokens.verify(bearer.token()).map_err(|e| {
            tracing::warn!("Rejected bearer token: {}", e);
            e.to_response()
        })?;

        Ok(Caller::authenticated(identity_id))
    }
}
