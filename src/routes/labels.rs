use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use recipebox_recipe::{Label, LabelCommand, LabelInput, LabelKind, nullable};
use serde::Deserialize;

use crate::{auth::AuthUser, error::ApiError, routes::AppState};

/// Selects which label table a generic handler serves.
pub trait LabelRoute: Send + Sync + 'static {
    const KIND: LabelKind;

    fn command(app: &AppState) -> LabelCommand {
        app.recipe_command.labels(Self::KIND)
    }
}

pub struct Tags;

impl LabelRoute for Tags {
    const KIND: LabelKind = LabelKind::Tag;
}

pub struct Ingredients;

impl LabelRoute for Ingredients {
    const KIND: LabelKind = LabelKind::Ingredient;
}

#[derive(Deserialize)]
pub struct ListParams {
    pub assigned_only: Option<String>,
}

fn parse_assigned_only(value: Option<&str>) -> Result<bool, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(false),
        Some(value) => value
            .parse::<i64>()
            .map(|value| value != 0)
            .map_err(|_| ApiError::field("assigned_only", "A valid integer is required.")),
    }
}

#[tracing::instrument(skip_all, fields(user = user.id, kind = L::KIND.as_str()))]
pub async fn list<L: LabelRoute>(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, ApiError>,
) -> Result<Json<Vec<Label>>, ApiError> {
    let assigned_only = parse_assigned_only(params.assigned_only.as_deref())?;
    let labels = L::command(&app).list(user.id, assigned_only).await?;

    Ok(Json(labels))
}

#[tracing::instrument(skip_all, fields(user = user.id, kind = L::KIND.as_str(), id = id))]
pub async fn replace<L: LabelRoute>(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<LabelInput>, ApiError>,
) -> Result<Json<Label>, ApiError> {
    let label = L::command(&app).update(id, user.id, input).await?;

    Ok(Json(label))
}

#[derive(Deserialize)]
pub struct UpdatePayload {
    #[serde(default, deserialize_with = "nullable")]
    pub name: Option<Option<String>>,
}

#[tracing::instrument(skip_all, fields(user = user.id, kind = L::KIND.as_str(), id = id))]
pub async fn update<L: LabelRoute>(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<UpdatePayload>, ApiError>,
) -> Result<Json<Label>, ApiError> {
    let command = L::command(&app);

    let label = match payload.name {
        Some(Some(name)) => command.update(id, user.id, LabelInput { name }).await?,
        Some(None) => return Err(ApiError::field("name", "This field may not be null.")),
        None => command
            .find(id, user.id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("{} {id}", L::KIND.as_str())))?,
    };

    Ok(Json(label))
}

#[tracing::instrument(skip_all, fields(user = user.id, kind = L::KIND.as_str(), id = id))]
pub async fn delete<L: LabelRoute>(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<StatusCode, ApiError> {
    L::command(&app).delete(id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assigned_only() {
        assert!(!parse_assigned_only(None).unwrap());
        assert!(!parse_assigned_only(Some("0")).unwrap());
        assert!(parse_assigned_only(Some("1")).unwrap());
        assert!(parse_assigned_only(Some("yes")).is_err());
    }
}
