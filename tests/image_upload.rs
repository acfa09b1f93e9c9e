use std::io::Cursor;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::Value;

mod common;

const BOUNDARY: &str = "recipebox-test-boundary";

fn png() -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbImage::new(10, 10)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();

    bytes
}

fn upload_request(uri: &str, token: &str, field: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"upload.png\"\r\nContent-Type: image/png\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_image() {
    let app = common::create_test_app().await.unwrap();
    let token = app.login("john").await;

    let recipe = app.create_recipe(&token, common::recipe_payload("Soup")).await;
    let uri = format!("/api/recipe/recipes/{}/upload-image/", recipe["id"]);

    let (status, body) = app
        .send(upload_request(&uri, &token, "image", &png()))
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["id"], recipe["id"]);

    let url = body["image"].as_str().unwrap().to_owned();
    assert!(url.starts_with("/media/uploads/recipe/"));
    assert!(url.ends_with(".png"));

    let path = app.dir.path().join("media").join(url.trim_start_matches("/media/"));
    assert!(path.exists());

    let (_, detail) = app
        .request(
            "GET",
            &format!("/api/recipe/recipes/{}/", recipe["id"]),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(detail["image"], Value::String(url.to_owned()));

    let (status, _) = app
        .send(
            Request::builder()
                .uri(url.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // A second upload replaces the file.
    let (status, body) = app
        .send(upload_request(&uri, &token, "image", &png()))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(body["image"], Value::String(url));
    assert!(!path.exists());

    let (status, _) = app
        .request(
            "DELETE",
            &format!("/api/recipe/recipes/{}/", recipe["id"]),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let replaced = app
        .dir
        .path()
        .join("media")
        .join(body["image"].as_str().unwrap().trim_start_matches("/media/"));
    assert!(!replaced.exists());
}

#[tokio::test]
async fn test_upload_invalid_image() {
    let app = common::create_test_app().await.unwrap();
    let token = app.login("john").await;

    let recipe = app.create_recipe(&token, common::recipe_payload("Soup")).await;
    let uri = format!("/api/recipe/recipes/{}/upload-image/", recipe["id"]);

    let (status, body) = app
        .send(upload_request(&uri, &token, "image", b"notanimage"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["image"].is_array(), "{body}");

    let (status, body) = app
        .send(upload_request(&uri, &token, "file", &png()))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, serde_json::json!({ "image": ["No file was submitted."] }));

    let (_, detail) = app
        .request(
            "GET",
            &format!("/api/recipe/recipes/{}/", recipe["id"]),
            Some(&token),
            None,
        )
        .await;
    assert_eq!(detail["image"], Value::Null);
}

#[tokio::test]
async fn test_upload_image_other_users_recipe() {
    let app = common::create_test_app().await.unwrap();
    let john = app.login("john").await;
    let jane = app.login("jane").await;

    let recipe = app.create_recipe(&john, common::recipe_payload("Soup")).await;
    let uri = format!("/api/recipe/recipes/{}/upload-image/", recipe["id"]);

    let (status, _) = app.send(upload_request(&uri, &jane, "image", &png())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
