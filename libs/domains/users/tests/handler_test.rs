use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use domain_users::{InMemoryUserRepository, UserService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    let service = UserService::new(InMemoryUserRepository::new());
    Router::new().nest("/users", handlers::router(service))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn jane() -> Value {
    json!({ "email": "a@b.com", "firstName": "Jane", "lastName": "Doe" })
}

#[tokio::test]
async fn test_create_and_get() {
    let app = app();

    let (status, created) = send(&app, "POST", "/users", Some(jane())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "a@b.com");
    assert_eq!(created["fullName"], "Jane Doe");
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, list) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let app = app();
    send(&app, "POST", "/users", Some(jane())).await;

    let (status, body) = send(&app, "POST", "/users", Some(jane())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "CONFLICT");
    assert_eq!(body["message"], "User with this email already exists");
}

#[tokio::test]
async fn test_invalid_input_is_bad_request() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({ "email": "nope", "firstName": "Jane", "lastName": "Doe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert_eq!(body["message"], "Invalid email format");
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let app = app();

    let (status, body) = send(&app, "POST", "/users", Some(json!({ "email": "a@b.com" }))).await;
    assert!(status.is_client_error());
    assert_eq!(body["error"], "JSON_EXTRACTION");
}

#[tokio::test]
async fn test_unknown_user_is_not_found() {
    let app = app();

    let (status, body) = send(&app, "GET", "/users/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with id missing not found");

    let (status, _) = send(&app, "PUT", "/users/missing", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_then_delete() {
    let app = app();
    let (_, created) = send(&app, "POST", "/users", Some(jane())).await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PUT", &uri, Some(json!({ "firstName": "Janet" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["fullName"], "Janet Doe");
    assert_eq!(updated["email"], "a@b.com");

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
