use argon2::{Argon2, PasswordVerifier};
use axum::response::IntoResponse;

use gators_api::middleware::auth;
use gators_api::middleware::error_handling::AppError;
use gators_core::errors::AcademyError;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = AcademyError::NotFound("Booking not found".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = AcademyError::Validation("missing required fields: time".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    let error = AcademyError::Conflict("email already registered".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = AcademyError::Authentication("invalid credentials".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = AcademyError::Authorization("not authorized".to_string());

    let response = AppError(error).into_response();

    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_persistence() {
    let error = AcademyError::Persistence(eyre::eyre!("connection refused"));

    let response = AppError(error).into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_partial_failure() {
    let error = AcademyError::PartialFailure("profile deleted, account removal failed".to_string());

    let response = AppError(error).into_response();

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_hash_password_produces_argon2_phc_string() {
    let hash = auth::hash_password("swim-fast").expect("hashing succeeds");

    assert!(hash.starts_with("$argon2"));

    // The stored hash verifies against the original password and rejects
    // a different one
    let parsed = argon2::PasswordHash::new(&hash).expect("valid PHC string");
    assert!(Argon2::default()
        .verify_password(b"swim-fast", &parsed)
        .is_ok());
    assert!(Argon2::default()
        .verify_password(b"swim-slow", &parsed)
        .is_err());
}

#[test]
fn test_hashes_are_salted() {
    let first = auth::hash_password("swim-fast").unwrap();
    let second = auth::hash_password("swim-fast").unwrap();
    assert_ne!(first, second);
}

#[test]
fn test_bearer_token_extraction() {
    let mut headers = axum::http::HeaderMap::new();

    // Missing header
    assert!(auth::bearer_token(&headers).is_err());

    // Wrong scheme
    headers.insert(
        axum::http::header::AUTHORIZATION,
        "Basic abc123".parse().unwrap(),
    );
    assert!(auth::bearer_token(&headers).is_err());

    // Well-formed bearer token
    let token = uuid::Uuid::new_v4();
    headers.insert(
        axum::http::header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    assert_eq!(auth::bearer_token(&headers).unwrap(), token);
}
