use axum::{
    Json,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

/// Errors returned by HTTP handlers, rendered as JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] recipebox_shared::Error),

    /// 400 with `{"detail": msg}`, for malformed requests.
    #[error("{0}")]
    BadRequest(String),

    /// 400 with `{field: [msg]}`.
    #[error("{field}: {message}")]
    Field {
        field: &'static str,
        message: String,
    },

    /// 400 with `{"non_field_errors": [msg]}`.
    #[error("{0}")]
    NonField(String),
}

impl ApiError {
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::Domain(recipebox_shared::Error::NotFound(what.to_string()))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Domain(recipebox_shared::Error::Unauthorized(message.into()))
    }

    pub fn field(field: &'static str, message: impl Into<String>) -> Self {
        Self::Field {
            field,
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::Domain(recipebox_shared::Error::Unknown(value))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(value: PathRejection) -> Self {
        match value {
            // Non-numeric ids can never match a row.
            PathRejection::FailedToDeserializePathParams(_) => Self::not_found("path"),
            other => Self::BadRequest(other.body_text()),
        }
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(value: MultipartRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(value: MultipartError) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use recipebox_shared::Error;

        match self {
            ApiError::Domain(Error::Validate(errors)) => {
                (StatusCode::BAD_REQUEST, Json(validation_json(&errors))).into_response()
            }
            ApiError::Domain(Error::User(message)) | ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "detail": message }))).into_response()
            }
            ApiError::Domain(Error::NotFound(what)) => {
                tracing::debug!(what = %what, "not found");
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not found." }))).into_response()
            }
            ApiError::Domain(Error::Unauthorized(message)) => (
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, "Bearer realm=\"api\"")],
                Json(json!({ "detail": message })),
            )
                .into_response(),
            ApiError::Domain(err @ Error::Unknown(_)) => {
                tracing::error!("{err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": "A server error occurred." })),
                )
                    .into_response()
            }
            ApiError::Field { field, message } => {
                let mut body = Map::new();
                body.insert(field.to_owned(), json!([message]));

                (StatusCode::BAD_REQUEST, Json(Value::Object(body))).into_response()
            }
            ApiError::NonField(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "non_field_errors": [message] })),
            )
                .into_response(),
        }
    }
}

/// Renders validation errors as `{field: [messages]}`. Nested structs become
/// nested objects and list items are keyed by their index.
pub fn validation_json(errors: &ValidationErrors) -> Value {
    let mut map = Map::new();

    for (field, kind) in errors.errors() {
        let value = match kind {
            ValidationErrorsKind::Field(errors) => {
                Value::Array(errors.iter().map(|e| Value::String(message(e))).collect())
            }
            ValidationErrorsKind::Struct(nested) => validation_json(nested),
            ValidationErrorsKind::List(items) => Value::Object(
                items
                    .iter()
                    .map(|(index, nested)| (index.to_string(), validation_json(nested)))
                    .collect(),
            ),
        };

        map.insert(field.to_string(), value);
    }

    Value::Object(map)
}

fn message(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    match error.code.as_ref() {
        "email" => "Enter a valid email address.".to_owned(),
        "length" => "Ensure this field has a valid length.".to_owned(),
        "range" => "Ensure this value is within the allowed range.".to_owned(),
        "required" => "This field is required.".to_owned(),
        _ => "Invalid value.".to_owned(),
    }
}
