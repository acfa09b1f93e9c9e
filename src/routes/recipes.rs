use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use recipebox_recipe::{Label, LabelInput, ListQuery, Recipe, UpdateInput, nullable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{auth::AuthUser, error::ApiError, media::MediaStore, routes::AppState};

#[derive(Serialize)]
pub struct RecipeResponse {
    pub id: i64,
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    pub link: Option<String>,
    pub tags: Vec<Label>,
    pub ingredients: Vec<Label>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
        }
    }
}

#[derive(Serialize)]
pub struct RecipeDetailResponse {
    #[serde(flatten)]
    pub recipe: RecipeResponse,
    pub description: String,
    pub image: Option<String>,
}

impl RecipeDetailResponse {
    fn new(recipe: Recipe, media: &MediaStore) -> Self {
        let description = recipe.description.to_owned();
        let image = recipe.image.as_deref().map(|path| media.url(path));

        Self {
            recipe: recipe.into(),
            description,
            image,
        }
    }
}

#[derive(Deserialize)]
pub struct ListParams {
    pub tags: Option<String>,
    pub ingredients: Option<String>,
}

/// Parses `"1, 2,3"` into ids. Empty segments are skipped.
fn parse_ids(field: &'static str, value: Option<&str>) -> Result<Vec<i64>, ApiError> {
    let Some(value) = value else {
        return Ok(vec![]);
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<i64>()
                .map_err(|_| ApiError::field(field, format!("'{id}' is not a valid id.")))
        })
        .collect()
}

#[tracing::instrument(skip_all, fields(user = user.id))]
pub async fn list(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Query(params), _): WithRejection<Query<ListParams>, ApiError>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let query = ListQuery {
        tags: parse_ids("tags", params.tags.as_deref())?,
        ingredients: parse_ids("ingredients", params.ingredients.as_deref())?,
    };

    let recipes = app.recipe_command.list(user.id, query).await?;

    Ok(Json(recipes.into_iter().map(Into::into).collect()))
}

#[tracing::instrument(skip_all, fields(user = user.id, recipe = id))]
pub async fn detail(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let Some(recipe) = app.recipe_command.find(id, user.id).await? else {
        return Err(ApiError::not_found(format!("recipe {id}")));
    };

    Ok(Json(RecipeDetailResponse::new(recipe, &app.media)))
}

#[tracing::instrument(skip_all, fields(user = user.id))]
pub async fn create(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<recipebox_recipe::CreateInput>, ApiError>,
) -> Result<(StatusCode, Json<RecipeDetailResponse>), ApiError> {
    let recipe = app.recipe_command.create(user.id, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecipeDetailResponse::new(recipe, &app.media)),
    ))
}

/// Full update body. Fields without a default must be present; `tags` and
/// `ingredients` keep their links when omitted and `link: null` clears it.
#[derive(Deserialize)]
pub struct ReplacePayload {
    pub title: String,
    pub time_minutes: i64,
    pub price: Decimal,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub link: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub tags: Option<Option<Vec<LabelInput>>>,
    #[serde(default, deserialize_with = "nullable")]
    pub ingredients: Option<Option<Vec<LabelInput>>>,
}

impl From<ReplacePayload> for UpdateInput {
    fn from(payload: ReplacePayload) -> Self {
        Self {
            title: Some(Some(payload.title)),
            description: payload.description,
            time_minutes: Some(Some(payload.time_minutes)),
            price: Some(Some(payload.price)),
            link: payload.link,
            tags: payload.tags,
            ingredients: payload.ingredients,
        }
    }
}

#[tracing::instrument(skip_all, fields(user = user.id, recipe = id))]
pub async fn replace(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<ReplacePayload>, ApiError>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let recipe = app
        .recipe_command
        .update(id, user.id, payload.into())
        .await?;

    Ok(Json(RecipeDetailResponse::new(recipe, &app.media)))
}

#[tracing::instrument(skip_all, fields(user = user.id, recipe = id))]
pub async fn update(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<UpdateInput>, ApiError>,
) -> Result<Json<RecipeDetailResponse>, ApiError> {
    let recipe = app.recipe_command.update(id, user.id, input).await?;

    Ok(Json(RecipeDetailResponse::new(recipe, &app.media)))
}

#[tracing::instrument(skip_all, fields(user = user.id, recipe = id))]
pub async fn delete(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
) -> Result<StatusCode, ApiError> {
    if let Some(image) = app.recipe_command.delete(id, user.id).await? {
        app.media.remove(&image).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct ImageResponse {
    pub id: i64,
    pub image: String,
}

#[tracing::instrument(skip_all, fields(user = user.id, recipe = id))]
pub async fn upload_image(
    user: AuthUser,
    State(app): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, ApiError>,
    WithRejection(mut multipart, _): WithRejection<Multipart, ApiError>,
) -> Result<Json<ImageResponse>, ApiError> {
    if app.recipe_command.find(id, user.id).await?.is_none() {
        return Err(ApiError::not_found(format!("recipe {id}")));
    }

    let mut data = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("image") {
            data = Some(field.bytes().await?);
            break;
        }
    }

    let Some(data) = data.filter(|data| !data.is_empty()) else {
        return Err(ApiError::field("image", "No file was submitted."));
    };

    let path = app.media.save_recipe_image(data.to_vec()).await?;

    let previous = match app.recipe_command.set_image(id, user.id, &path).await {
        Ok(previous) => previous,
        Err(err) => {
            app.media.remove(&path).await;
            return Err(err.into());
        }
    };

    if let Some(previous) = previous {
        app.media.remove(&previous).await;
    }

    Ok(Json(ImageResponse {
        id,
        image: app.media.url(&path),
    }))
}
