//! Integration tests for the HTTP auth client against a mock server.

use mfaclient_core::{ApiClient, ApiError, AuthApi, Credentials, Token};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(
        format!("{}/auth/", server.uri()),
        format!("{}/api", server.uri()),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn test_verify_posts_credentials_and_parses_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .and(body_json(json!({"username": "ana", "password": "pw", "code": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "token": "tok-1",
            "user": {"user_id": 7, "username": "ana", "password": "hash"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .verify(&Credentials::new("ana", "pw").with_code("123456"))
        .await
        .unwrap();

    assert_eq!(result.token, Token::new("tok-1"));
    assert_eq!(result.user.display_name(), Some("ana"));
    assert!(result.user.get("password").is_none());
}

#[tokio::test]
async fn test_verify_rejection_carries_server_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/verify"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid code"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .verify(&Credentials::new("ana", "pw"))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Invalid code");
}

#[tokio::test]
async fn test_resolve_by_token_sends_bearer() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/token"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Token is valid",
            "user": {"id": 7, "name": "Ana"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server)
        .resolve_by_token(&Token::new("tok-123"))
        .await
        .unwrap();

    assert_eq!(user.id(), Some(&json!(7)));
    assert_eq!(user.display_name(), Some("Ana"));
}

#[tokio::test]
async fn test_resolve_by_token_expired() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Token expired"})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resolve_by_token(&Token::new("old"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(ref m) if m == "Token expired"));
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/users/token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .resolve_by_token(&Token::new("tok"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Grab a free port, then release it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let client = ApiClient::new(url.clone(), url, None).unwrap();
    let err = client
        .verify(&Credentials::new("ana", "pw"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::NetworkError(_)));
}
