use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use cdesk_contacts::domain::{ALL_FIELDS_REQUIRED, DELETED_MESSAGE, ID_REQUIRED};
use cdesk_contacts::server::router;
use cdesk_database::Database;
use cdesk_kernel::server::ApiState;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn database() -> Database {
    Database::builder().url("mem://").session("cdesk", "contacts").init().await.expect("mem db")
}

async fn app() -> Router {
    app_over(&database().await)
}

fn app_over(db: &Database) -> Router {
    let state = ApiState::builder()
        .db(db.clone())
        .register_slice(cdesk_contacts::init(db).expect("slice"))
        .build()
        .expect("state");
    let (router, _) = router().split_for_parts();
    router.with_state(state)
}

async fn call(app: &Router, method: Method, body: Option<&str>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri("/api/contact");
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned())),
        None => request.body(Body::empty()),
    }
    .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

async fn list(app: &Router) -> Vec<Value> {
    let (status, body) = call(app, Method::GET, None).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("array").clone()
}

async fn create(app: &Router, name: &str) -> Value {
    let body = json!({ "name": name, "email": "a@x.com", "message": "hi" }).to_string();
    let (status, contact) = call(app, Method::POST, Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    contact
}

#[tokio::test]
async fn created_contact_is_listed() {
    let app = app().await;
    assert!(list(&app).await.is_empty());

    let contact = create(&app, "Ann").await;
    assert_eq!(contact["id"], 1);
    assert_eq!(contact["name"], "Ann");
    assert_eq!(contact["email"], "a@x.com");
    assert_eq!(contact["message"], "hi");

    assert_eq!(list(&app).await, vec![contact]);
}

#[tokio::test]
async fn identifiers_increase_and_list_is_ordered() {
    let app = app().await;
    for name in ["Ann", "Bob", "Cid"] {
        create(&app, name).await;
    }

    let contacts = list(&app).await;
    let ids: Vec<i64> = contacts.iter().map(|c| c["id"].as_i64().expect("id")).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(contacts[1]["name"], "Bob");
}

#[tokio::test]
async fn identifiers_are_not_reused_after_delete() {
    let app = app().await;
    let first = create(&app, "Ann").await;
    let body = json!({ "id": first["id"] }).to_string();
    assert_eq!(call(&app, Method::DELETE, Some(&body)).await.0, StatusCode::OK);

    let second = create(&app, "Bob").await;
    assert_eq!(second["id"], 2);
}

#[tokio::test]
async fn create_requires_every_field() {
    let app = app().await;

    for body in [
        json!({ "name": "Ann", "email": "a@x.com" }),
        json!({ "name": "", "email": "a@x.com", "message": "hi" }),
        json!({ "name": "Ann", "email": null, "message": "hi" }),
    ] {
        let (status, error) = call(&app, Method::POST, Some(&body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error, json!({ "error": ALL_FIELDS_REQUIRED }));
    }

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = app().await;

    for body in ["{not json", r#"["Ann"]"#, r#"{"name":5,"email":"a@x.com","message":"hi"}"#] {
        let (status, error) = call(&app, Method::POST, Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert!(!error["error"].as_str().expect("message").is_empty());
    }

    assert!(list(&app).await.is_empty());
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app().await;
    let ann = create(&app, "Ann").await;
    let bob = create(&app, "Bob").await;

    let body = json!({ "id": ann["id"], "name": "Anna", "email": "anna@x.com", "message": "bye" });
    let (status, updated) = call(&app, Method::PUT, Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, body);

    assert_eq!(list(&app).await, vec![updated, bob]);
}

#[tokio::test]
async fn update_with_empty_field_is_rejected() {
    let app = app().await;
    let ann = create(&app, "Ann").await;

    let body = json!({ "id": ann["id"], "name": "", "email": "a@x.com", "message": "hi" });
    let (status, error) = call(&app, Method::PUT, Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({ "error": "All fields are required" }));

    let body = json!({ "id": 0, "name": "Ann", "email": "a@x.com", "message": "hi" });
    assert_eq!(call(&app, Method::PUT, Some(&body.to_string())).await.0, StatusCode::BAD_REQUEST);

    assert_eq!(list(&app).await, vec![ann]);
}

#[tokio::test]
async fn update_of_unknown_contact_is_a_server_error() {
    let app = app().await;
    let ann = create(&app, "Ann").await;

    let body = json!({ "id": 999_999, "name": "Ann", "email": "a@x.com", "message": "hi" });
    let (status, error) = call(&app, Method::PUT, Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error["error"].as_str().expect("message").contains("not found"));

    assert_eq!(list(&app).await, vec![ann]);
}

#[tokio::test]
async fn delete_removes_exactly_one_contact() {
    let app = app().await;
    let ann = create(&app, "Ann").await;
    let bob = create(&app, "Bob").await;

    let body = json!({ "id": ann["id"] }).to_string();
    let (status, response) = call(&app, Method::DELETE, Some(&body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!({ "message": DELETED_MESSAGE }));

    assert_eq!(list(&app).await, vec![bob]);
}

#[tokio::test]
async fn delete_failures_leave_collection_unchanged() {
    let app = app().await;
    let ann = create(&app, "Ann").await;

    let (status, error) = call(&app, Method::DELETE, Some(r#"{"id":999999}"#)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error["error"].is_string());

    let (status, error) = call(&app, Method::DELETE, Some("{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error, json!({ "error": ID_REQUIRED }));

    assert_eq!(list(&app).await, vec![ann]);
}

#[tokio::test]
async fn sessions_are_released_on_every_outcome() {
    let db = database().await;
    let app = app_over(&db);
    assert_eq!(db.active_sessions(), 0);

    create(&app, "Ann").await;
    assert_eq!(db.active_sessions(), 0, "after a successful create");

    let (status, _) = call(&app, Method::POST, Some(r#"{"name":"Ann"}"#)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(db.active_sessions(), 0, "after a validation failure");

    let body = json!({ "id": 999_999, "name": "Ann", "email": "a@x.com", "message": "hi" });
    let (status, _) = call(&app, Method::PUT, Some(&body.to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(db.active_sessions(), 0, "after a store failure");

    let (status, _) = call(&app, Method::DELETE, Some("{not json")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(db.active_sessions(), 0, "after a malformed body");

    assert_eq!(list(&app).await.len(), 1);
    assert_eq!(db.active_sessions(), 0, "after a list");
}

#[tokio::test]
async fn missing_slice_is_a_server_error() {
    let state = ApiState::builder().db(database().await).build().expect("state");
    let (router, _) = router().split_for_parts();
    let app = router.with_state(state);

    let (status, error) = call(&app, Method::GET, None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error["error"].as_str().expect("message").contains("Contacts"));
}

#[test]
fn openapi_documents_all_methods() {
    let (_, api) = router().split_for_parts();
    let item = &api.paths.paths["/api/contact"];
    assert!(item.get.is_some());
    assert!(item.post.is_some());
    assert!(item.put.is_some());
    assert!(item.delete.is_some());
}

#[tokio::test]
async fn init_registers_the_contacts_slice() {
    let slice = cdesk_contacts::init(&database().await).expect("init should succeed");
    assert_eq!(slice.id, std::any::TypeId::of::<cdesk_contacts::server::Contacts>());
    assert!(slice.downcast_ref::<cdesk_contacts::server::Contacts>().is_some());
}
