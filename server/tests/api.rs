use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use todo_core::{Todo, TodoService, TodoStore};
use todo_server::app;
use tower::ServiceExt;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(String::new())
        .unwrap()
}

fn empty_app() -> axum::Router {
    app(TodoService::new(TodoStore::new()))
}

fn seeded_app() -> axum::Router {
    app(TodoService::new(TodoStore::with_demo_data()))
}

// --- list ---

#[tokio::test]
async fn list_todos_empty() {
    let resp = empty_app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn list_todos_seeded_excludes_completed() {
    let resp = seeded_app().oneshot(empty_request("GET", "/todos")).await.unwrap();

    let todos: Vec<Todo> = body_json(resp).await;
    let titles: Vec<_> = todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, ["Buy groceries", "Call Alice"]);
}

#[tokio::test]
async fn list_completed_seeded() {
    let resp = seeded_app()
        .oneshot(empty_request("GET", "/todos/completed"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Read book");
    assert!(todos[0].is_completed);
}

// --- create ---

#[tokio::test]
async fn create_todo_returns_201() {
    let resp = empty_app()
        .oneshot(json_request(
            "POST",
            "/todos",
            r#"{"title":"Buy milk","description":"2 litres","due_date":"2030-05-01T09:00:00Z"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description.as_deref(), Some("2 litres"));
    assert_eq!(todo.due_date.unwrap().to_rfc3339(), "2030-05-01T09:00:00+00:00");
    assert!(!todo.is_completed);
    assert!(!todo.id.is_nil());
}

#[tokio::test]
async fn create_todo_empty_title_returns_422() {
    let resp = empty_app()
        .oneshot(json_request("POST", "/todos", r#"{"title":""}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = body_json(resp).await;
    assert_eq!(body["error"], "invalid todo: title is required");
}

#[tokio::test]
async fn create_todo_malformed_json_returns_422() {
    let resp = empty_app()
        .oneshot(json_request("POST", "/todos", r#"{"not_title":1}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn create_todo_syntax_error_returns_400() {
    let app = empty_app();
    let resp = app
        .clone()
        .oneshot(json_request("POST", "/todos", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.oneshot(empty_request("GET", "/todos")).await.unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());
}

#[tokio::test]
async fn create_todo_ignores_supplied_id() {
    let supplied = "00000000-0000-0000-0000-000000000001";
    let resp = empty_app()
        .oneshot(json_request(
            "POST",
            "/todos",
            &format!(r#"{{"id":"{supplied}","title":"x"}}"#),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    let todo: Todo = body_json(resp).await;
    assert_ne!(todo.id.to_string(), supplied);
    assert!(!todo.id.is_nil());
}

// --- get ---

#[tokio::test]
async fn get_todo_not_found() {
    let resp = empty_app()
        .oneshot(empty_request(
            "GET",
            "/todos/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn get_todo_bad_uuid_returns_400() {
    let resp = empty_app()
        .oneshot(empty_request("GET", "/todos/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- update ---

#[tokio::test]
async fn update_todo_not_found() {
    let resp = empty_app()
        .oneshot(json_request(
            "PUT",
            "/todos/00000000-0000-0000-0000-000000000000",
            r#"{"title":"Nope"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- delete ---

#[tokio::test]
async fn delete_todo_not_found() {
    let resp = empty_app()
        .oneshot(empty_request(
            "DELETE",
            "/todos/00000000-0000-0000-0000-000000000000",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- complete ---

#[tokio::test]
async fn complete_todo_not_found() {
    let resp = empty_app()
        .oneshot(empty_request(
            "POST",
            "/todos/00000000-0000-0000-0000-000000000000/complete",
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// --- full lifecycle ---

#[tokio::test]
async fn crud_lifecycle() {
    use tower::Service;

    let mut app = empty_app().into_service();

    // create
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("POST", "/todos", r#"{"title":"Walk dog"}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = body_json(resp).await;
    let id = created.id;

    // update replaces every mutable field but keeps identity
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/todos/{id}"),
            r#"{"title":"Walk cat","description":"around the block"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = body_json(resp).await;
    assert_eq!(updated.id, id);
    assert_eq!(updated.created_date, created.created_date);
    assert_eq!(updated.title, "Walk cat");
    assert_eq!(updated.description.as_deref(), Some("around the block"));

    // update with an invalid title is rejected
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "PUT",
            &format!("/todos/{id}"),
            r#"{"title":"   "}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // update with a body that is not JSON
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/todos/{id}"), "{not json"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // complete moves it out of the active list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("POST", &format!("/todos/{id}/complete")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let completed: Todo = body_json(resp).await;
    assert!(completed.is_completed);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert!(todos.is_empty());

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", "/todos/completed"))
        .await
        .unwrap();
    let todos: Vec<Todo> = body_json(resp).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, id);

    // completing twice is not found
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("POST", &format!("/todos/{id}/complete")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // delete works on completed items
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("DELETE", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = body_bytes(resp).await;
    assert!(body.is_empty());

    // get after delete
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(empty_request("GET", &format!("/todos/{id}")))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
