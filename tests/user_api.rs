use axum::http::StatusCode;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_create_user_success() {
    let app = common::create_test_app().await.unwrap();

    let (status, body) = app
        .request(
            "POST",
            "/api/user/create/",
            None,
            Some(json!({
                "email": "test@EXAMPLE.com",
                "password": "testpass123",
                "name": "Test Name",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "email": "test@example.com", "name": "Test Name" }));
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_create_user_rejects_duplicate_email() {
    let app = common::create_test_app().await.unwrap();
    app.create_user("john").await;

    let (status, _) = app
        .request(
            "POST",
            "/api/user/create/",
            None,
            Some(json!({
                "email": "john@recipebox.localhost",
                "password": "another_password",
                "name": "John again",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_password_too_short() {
    let app = common::create_test_app().await.unwrap();

    let (status, body) = app
        .request(
            "POST",
            "/api/user/create/",
            None,
            Some(json!({
                "email": "short@example.com",
                "password": "pw",
                "name": "Short",
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["password"].is_array(), "{body}");

    let (status, _) = app
        .request("POST", "/api/user/token/", None, Some(json!({
            "email": "short@example.com",
            "password": "pw",
        })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_invalid_json() {
    let app = common::create_test_app().await.unwrap();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/user/create/")
        .header("Content-Type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_token_for_valid_credentials() {
    let app = common::create_test_app().await.unwrap();
    app.create_user("john").await;

    let token = app.token("john").await;

    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_token_bad_credentials() {
    let app = common::create_test_app().await.unwrap();
    app.create_user("john").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/user/token/",
            None,
            Some(json!({ "email": "john@recipebox.localhost", "password": "badpass" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "non_field_errors": ["Unable to authenticate with provided credentials."] })
    );
}

#[tokio::test]
async fn test_token_blank_password() {
    let app = common::create_test_app().await.unwrap();
    app.create_user("john").await;

    let (status, body) = app
        .request(
            "POST",
            "/api/user/token/",
            None,
            Some(json!({ "email": "john@recipebox.localhost", "password": "" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "password": ["This field may not be blank."] }));
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = common::create_test_app().await.unwrap();

    let (status, body) = app.request("GET", "/api/user/me/", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "detail": "Authentication credentials were not provided." })
    );

    let (status, body) = app
        .request("GET", "/api/user/me/", Some("garbage"), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "detail": "Invalid token." }));
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = common::create_test_app().await.unwrap();
    let token = app.login("john").await;

    let (status, body) = app.request("GET", "/api/user/me/", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "email": "john@recipebox.localhost", "name": "john" })
    );
}

#[tokio::test]
async fn test_me_post_not_allowed() {
    let app = common::create_test_app().await.unwrap();
    let token = app.login("john").await;

    let (status, _) = app
        .request("POST", "/api/user/me/", Some(&token), Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_update_profile() {
    let app = common::create_test_app().await.unwrap();
    let token = app.login("john").await;

    let (status, body) = app
        .request(
            "PATCH",
            "/api/user/me/",
            Some(&token),
            Some(json!({ "name": "Updated name", "password": "newpassword123" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Updated name");

    let (status, _) = app
        .request(
            "POST",
            "/api/user/token/",
            None,
            Some(json!({ "email": "john@recipebox.localhost", "password": "newpassword123" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .request(
            "PUT",
            "/api/user/me/",
            Some(&token),
            Some(json!({ "name": "Only name" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_profile_email() {
    let app = common::create_test_app().await.unwrap();
    let token = app.login("john").await;
    app.create_user("jane").await;

    let (status, body) = app
        .request(
            "PATCH",
            "/api/user/me/",
            Some(&token),
            Some(json!({ "email": "John@NEW.example.com" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(
        body,
        json!({ "email": "John@new.example.com", "name": "john" })
    );

    let (status, _) = app
        .request(
            "POST",
            "/api/user/token/",
            None,
            Some(json!({ "email": "John@new.example.com", "password": common::PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .request(
            "PUT",
            "/api/user/me/",
            Some(&token),
            Some(json!({
                "email": "jane@recipebox.localhost",
                "name": "john",
                "password": common::PASSWORD,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "detail": "user with this email already exists." })
    );

    let (status, body) = app
        .request(
            "PATCH",
            "/api/user/me/",
            Some(&token),
            Some(json!({ "email": "nope" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["email"].is_array(), "{body}");
}

#[tokio::test]
async fn test_inactive_user_token_rejected() {
    let app = common::create_test_app().await.unwrap();
    let token = app.login("john").await;

    let user = app
        .state
        .user_command
        .find_by_email("john@recipebox.localhost")
        .await
        .unwrap()
        .unwrap();
    app.state.user_command.deactivate(user.id).await.unwrap();

    let (status, body) = app.request("GET", "/api/user/me/", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "detail": "User inactive or deleted." }));
}
