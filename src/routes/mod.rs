use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{config::Config, media::MediaStore};

mod health;
mod labels;
mod recipes;
mod user;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_command: recipebox_user::Command,
    pub recipe_command: recipebox_recipe::Command,
    pub media: MediaStore,
    pub db: recipebox_shared::State,
}

impl AppState {
    pub fn new(config: Config, db: recipebox_shared::State) -> Self {
        Self {
            user_command: recipebox_user::Command(db.clone()),
            recipe_command: recipebox_recipe::Command(db.clone()),
            media: MediaStore::new(&config.media),
            db,
            config,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let media = ServeDir::new(app_state.media.root());
    let media_prefix = app_state.config.media.url_prefix.trim_end_matches('/').to_owned();
    let body_limit = app_state.config.media.max_upload_bytes;

    Router::new()
        // No auth on health checks
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/user/create/", post(user::create))
        .route("/api/user/token/", post(user::token))
        .route(
            "/api/user/me/",
            get(user::me).put(user::replace).patch(user::update),
        )
        .route(
            "/api/recipe/recipes/",
            get(recipes::list).post(recipes::create),
        )
        .route(
            "/api/recipe/recipes/{id}/",
            get(recipes::detail)
                .put(recipes::replace)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/api/recipe/recipes/{id}/upload-image/",
            post(recipes::upload_image),
        )
        .route("/api/recipe/tags/", get(labels::list::<labels::Tags>))
        .route(
            "/api/recipe/tags/{id}/",
            put(labels::replace::<labels::Tags>)
                .patch(labels::update::<labels::Tags>)
                .delete(labels::delete::<labels::Tags>),
        )
        .route(
            "/api/recipe/ingredients/",
            get(labels::list::<labels::Ingredients>),
        )
        .route(
            "/api/recipe/ingredients/{id}/",
            put(labels::replace::<labels::Ingredients>)
                .patch(labels::update::<labels::Ingredients>)
                .delete(labels::delete::<labels::Ingredients>),
        )
        .nest_service(&media_prefix, media)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(app_state)
}
