use std::{
    ops::Deref,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::JwtConfig, error::ApiError, routes::AppState};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    aud: String,
    exp: u64,
    iat: u64,
    iss: String,
    sub: String,
}

pub fn generate_token(config: &JwtConfig, user_id: i64) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        aud: config.audience.to_owned(),
        exp: now + config.expiration_days * 24 * 60 * 60,
        iat: now,
        iss: config.issuer.to_owned(),
        sub: user_id.to_string(),
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Returns the user id carried by a valid token.
pub fn verify_token(config: &JwtConfig, token: &str) -> anyhow::Result<i64> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[config.issuer.to_owned()]);
    validation.set_audience(&[config.audience.to_owned()]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims.sub.parse()?)
}

/// The active user behind the request's bearer token.
pub struct AuthUser(pub recipebox_user::User);

impl Deref for AuthUser {
    type Target = recipebox_user::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    if rejection.is_missing() {
                        ApiError::unauthorized("Authentication credentials were not provided.")
                    } else {
                        ApiError::unauthorized("Invalid token header.")
                    }
                })?;

        let user_id = verify_token(&state.config.jwt, bearer.token()).map_err(|err| {
            tracing::debug!("rejected token: {err}");
            ApiError::unauthorized("Invalid token.")
        })?;

        let Some(user) = state.user_command.find(user_id).await? else {
            return Err(ApiError::unauthorized("Invalid token."));
        };

        if !user.is_active {
            return Err(ApiError::unauthorized("User inactive or deleted."));
        }

        Ok(AuthUser(user))
    }
}
