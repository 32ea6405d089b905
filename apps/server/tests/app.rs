use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use cdesk::domain::config::ApiConfig;
use cdesk_server::Server;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn server() -> Server {
    Server::builder().config(ApiConfig::default()).build().await.expect("server over mem://")
}

async fn send(server: &Server, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request");

    let response = server.router().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, bytes.to_vec())
}

#[tokio::test]
async fn build_registers_contacts_slice() {
    let server = server().await;
    let names: Vec<&str> = server.state().slice_names().collect();
    assert_eq!(names, ["cdesk_contacts::server::Contacts"]);
}

#[tokio::test]
async fn contact_lifecycle_through_full_app() {
    let server = server().await;

    let (status, body) = send(
        &server,
        Method::POST,
        "/api/contact",
        Some(json!({ "name": "Ann", "email": "a@x.com", "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let created: Value = serde_json::from_slice(&body).expect("json");
    let id = created["id"].as_i64().expect("id");

    let (status, body) = send(&server, Method::GET, "/api/contact", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(listed, json!([created]));

    let (status, body) =
        send(&server, Method::DELETE, "/api/contact", Some(json!({ "id": id }))).await;
    assert_eq!(status, StatusCode::OK);
    let deleted: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(deleted["message"], "Contact deleted successfully");
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let server = server().await;

    let (status, body) = send(&server, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(health["status"], "up");

    let (status, body) = send(&server, Method::GET, "/api", None).await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(body).expect("html");
    assert!(page.contains("/api/contact"));
}

#[tokio::test]
async fn missing_certificate_fails_build() {
    let mut cfg = ApiConfig::default();
    cfg.server.ssl = Some(cdesk::domain::config::SslConfig {
        cert: "/nonexistent/cert.pem".into(),
        key: "/nonexistent/key.pem".into(),
    });

    let err = Server::builder().config(cfg).build().await.expect_err("cert is missing");
    assert!(err.to_string().contains("SSL certificate not found"));
}
