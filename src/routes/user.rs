use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{auth::AuthUser, error::ApiError, routes::AppState};

#[derive(Serialize)]
pub struct UserResponse {
    pub email: String,
    pub name: String,
}

impl From<&recipebox_user::User> for UserResponse {
    fn from(user: &recipebox_user::User) -> Self {
        Self {
            email: user.email.to_owned(),
            name: user.name.to_owned(),
        }
    }
}

#[derive(Deserialize)]
pub struct CreatePayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(app): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreatePayload>, ApiError>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = app
        .user_command
        .register(recipebox_user::RegisterInput {
            email: payload.email,
            password: payload.password,
            name: payload.name,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

#[derive(Deserialize)]
pub struct TokenPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[tracing::instrument(skip_all)]
pub async fn token(
    State(app): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<TokenPayload>, ApiError>,
) -> Result<Json<Value>, ApiError> {
    if payload.email.trim().is_empty() {
        return Err(ApiError::field("email", "This field may not be blank."));
    }

    if payload.password.is_empty() {
        return Err(ApiError::field("password", "This field may not be blank."));
    }

    let Some(user) = app
        .user_command
        .authenticate(&payload.email, &payload.password)
        .await?
    else {
        return Err(ApiError::NonField(
            "Unable to authenticate with provided credentials.".to_owned(),
        ));
    };

    let token = crate::auth::generate_token(&app.config.jwt, user.id)?;

    tracing::info!(user = user.id, "token issued");

    Ok(Json(json!({ "token": token })))
}

#[tracing::instrument(skip_all, fields(user = user.id))]
pub async fn me(user: AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(&*user))
}

#[derive(Deserialize)]
pub struct UpdatePayload {
    pub email: Option<String>,
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct ReplacePayload {
    pub email: String,
    pub name: String,
    pub password: String,
}

#[tracing::instrument(skip_all, fields(user = user.id))]
pub async fn update(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdatePayload>, ApiError>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app
        .user_command
        .update(
            user.id,
            recipebox_user::UpdateInput {
                email: payload.email,
                name: payload.name,
                password: payload.password,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}

#[tracing::instrument(skip_all, fields(user = user.id))]
pub async fn replace(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ReplacePayload>, ApiError>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app
        .user_command
        .update(
            user.id,
            recipebox_user::UpdateInput {
                email: Some(payload.email),
                name: Some(payload.name),
                password: Some(payload.password),
            },
        )
        .await?;

    Ok(Json(UserResponse::from(&user)))
}
