#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use recipebox::config::{
    Config, DatabaseConfig, JwtConfig, MediaConfig, ObservabilityConfig, ServerConfig,
};
use serde_json::{Value, json};
use temp_dir::TempDir;
use tower::ServiceExt;

pub const PASSWORD: &str = "my_password";

pub struct TestApp {
    pub router: Router,
    pub state: recipebox::AppState,
    pub dir: TempDir,
}

pub async fn create_test_app() -> anyhow::Result<TestApp> {
    let dir = TempDir::new()?;
    let url = format!("sqlite:{}", dir.path().join("db.sqlite3").display());

    let pool = recipebox::db::create_pool(&url, 1).await?;
    recipebox::db::run_migrations(&pool).await?;

    let config = Config {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8000,
        },
        database: DatabaseConfig {
            url,
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            expiration_days: 7,
            issuer: "recipebox".to_owned(),
            audience: "recipebox".to_owned(),
        },
        media: MediaConfig {
            root: dir.path().join("media"),
            url_prefix: "/media".to_owned(),
            max_upload_bytes: 1024 * 1024,
        },
        observability: ObservabilityConfig::default(),
    };

    let state = recipebox::AppState::new(config, recipebox_shared::State::single(pool));

    Ok(TestApp {
        router: recipebox::router(state.clone()),
        state,
        dir,
    })
}

impl TestApp {
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        self.send(builder.body(body).unwrap()).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).into_owned(),
            ))
        };

        (status, value)
    }

    pub async fn create_user(&self, name: &str) -> Value {
        let (status, body) = self
            .request(
                "POST",
                "/api/user/create/",
                None,
                Some(json!({
                    "email": format!("{name}@recipebox.localhost"),
                    "password": PASSWORD,
                    "name": name,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "{body}");

        body
    }

    pub async fn token(&self, name: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/user/token/",
                None,
                Some(json!({
                    "email": format!("{name}@recipebox.localhost"),
                    "password": PASSWORD,
                })),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "{body}");

        body["token"].as_str().unwrap().to_owned()
    }

    /// Registers `name` and returns a bearer token for it.
    pub async fn login(&self, name: &str) -> String {
        self.create_user(name).await;
        self.token(name).await
    }

    pub async fn create_recipe(&self, token: &str, payload: Value) -> Value {
        let (status, body) = self
            .request("POST", "/api/recipe/recipes/", Some(token), Some(payload))
            .await;

        assert_eq!(status, StatusCode::CREATED, "{body}");

        body
    }
}

pub fn recipe_payload(title: &str) -> Value {
    json!({
        "title": title,
        "time_minutes": 22,
        "price": "5.25",
        "description": "Sample description",
        "link": "https://example.com/recipe.pdf",
    })
}

pub fn names(values: &Value) -> Vec<String> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|value| value["name"].as_str().unwrap().to_owned())
        .collect()
}

pub fn titles(values: &Value) -> Vec<String> {
    values
        .as_array()
        .unwrap()
        .iter()
        .map(|value| value["title"].as_str().unwrap().to_owned())
        .collect()
}
