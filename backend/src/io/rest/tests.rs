//! Router-level tests driving the full HTTP stack against an in-memory database

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::collections::BTreeSet;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::domain::JournalValidationError;
use crate::storage::DbConnection;
use crate::{create_router, AppState};

const INCOME_TIME: &str = "2010-02-01T08:20:15Z";
const OUTCOME_TIME: &str = "2010-02-01T16:20:15Z";
const EARLY_OUTCOME_TIME: &str = "2010-02-01T05:20:15Z";

async fn setup_test() -> Router {
    let db = DbConnection::init_test().await.expect("Failed to create test database");
    create_router(AppState::new(db), &AppConfig::default()).expect("Failed to build router")
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response body should be JSON")
    };
    (status, value)
}

fn keys(value: &Value) -> BTreeSet<String> {
    value
        .as_object()
        .expect("Expected a JSON object")
        .keys()
        .cloned()
        .collect()
}

fn minimum_child() -> Value {
    json!({ "name": "Ivan", "gender": "male", "birthday": "2000-01-01" })
}

async fn create_child(app: &Router, body: Value) -> i64 {
    let (status, response) = send(app, Method::POST, "/api/children", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", response);
    response["child"]["id"].as_i64().expect("Child id should be an integer")
}

async fn create_entry(app: &Router, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, "/api/journal", Some(body)).await
}

async fn entry_count(app: &Router) -> usize {
    let (status, response) = send(app, Method::GET, "/api/journal", None).await;
    assert_eq!(status, StatusCode::OK);
    response["entries"].as_array().expect("entries should be a list").len()
}

async fn child_count(app: &Router) -> usize {
    let (_, response) = send(app, Method::GET, "/api/children", None).await;
    response["children"].as_array().expect("children should be a list").len()
}

#[tokio::test]
async fn test_api_root() {
    let app = setup_test().await;

    let (status, body) = send(&app, Method::GET, "/api", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["journal_study"], "/api/journal/study");
}

#[tokio::test]
async fn test_create_child_with_empty_params() {
    let app = setup_test().await;

    let (status, body) = send(&app, Method::POST, "/api/children", Some(json!({}))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(child_count(&app).await, 0);
    let expected: BTreeSet<String> = ["birthday", "gender", "name"].iter().map(|s| s.to_string()).collect();
    assert_eq!(keys(&body), expected);
}

#[tokio::test]
async fn test_create_child_with_minimum_params() {
    let app = setup_test().await;

    let (status, body) = send(&app, Method::POST, "/api/children", Some(minimum_child())).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(child_count(&app).await, 1);
    let child = &body["child"];
    assert_eq!(child["name"], "Ivan");
    assert_eq!(child["gender"], "male");
    assert_eq!(child["birthday"], "2000-01-01");
    assert_eq!(child["is_study"], false);
    assert_eq!(child["photo"], Value::Null);
}

#[tokio::test]
async fn test_create_child_with_maximum_params() {
    let app = setup_test().await;
    let mut params = minimum_child();
    params["photo"] = json!("/path/to/image.jpeg");
    params["grade"] = json!(3);
    params["is_study"] = json!(false);

    let id = create_child(&app, params).await;
    let (status, child) = send(&app, Method::GET, &format!("/api/children/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(child["photo"], "/path/to/image.jpeg");
    assert_eq!(child["grade"], 3);
    assert_eq!(child["is_study"], false);
}

#[tokio::test]
async fn test_create_child_with_invalid_values() {
    let app = setup_test().await;
    let params = json!({ "name": "Ivan", "gender": 0, "birthday": "2000-01-01" });

    let (status, body) = send(&app, Method::POST, "/api/children", Some(params)).await;
    // Gender is exchanged as a label, never as a numeric code
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let expected: BTreeSet<String> = ["gender".to_string()].into_iter().collect();
    assert_eq!(keys(&body), expected);

    let params = json!({ "name": "", "gender": "robot", "birthday": "01.01.2000" });
    let (status, body) = send(&app, Method::POST, "/api/children", Some(params)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let expected: BTreeSet<String> = ["birthday", "gender", "name"].iter().map(|s| s.to_string()).collect();
    assert_eq!(keys(&body), expected);
    assert_eq!(child_count(&app).await, 0);
}

#[tokio::test]
async fn test_create_child_with_wrong_value_types() {
    let app = setup_test().await;
    let mut params = minimum_child();
    params["grade"] = json!("three");

    let (status, body) = send(&app, Method::POST, "/api/children", Some(params)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let expected: BTreeSet<String> = ["grade".to_string()].into_iter().collect();
    assert_eq!(keys(&body), expected);

    let mut params = minimum_child();
    params["is_study"] = json!({ "yes": true });
    params["birthday"] = json!(20000101);

    let (status, body) = send(&app, Method::POST, "/api/children", Some(params)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let expected: BTreeSet<String> = ["birthday", "is_study"].iter().map(|s| s.to_string()).collect();
    assert_eq!(keys(&body), expected);
    assert_eq!(child_count(&app).await, 0);
}

#[tokio::test]
async fn test_replace_child_without_is_study_resets_it() {
    let app = setup_test().await;
    let mut params = minimum_child();
    params["is_study"] = json!(true);
    params["grade"] = json!(2);
    let id = create_child(&app, params).await;

    let (status, body) = send(&app, Method::PUT, &format!("/api/children/{}", id), Some(minimum_child())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["child"]["is_study"], false);
    assert_eq!(body["child"]["grade"], 2);
}

#[tokio::test]
async fn test_non_numeric_id_is_not_found() {
    let app = setup_test().await;

    for uri in ["/api/children/abc", "/api/journal/abc"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], json!(["Not found."]));
    }

    let (status, body) = send(&app, Method::PATCH, "/api/children/1.5", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("detail").is_some());
}

#[tokio::test]
async fn test_replace_child() {
    let app = setup_test().await;
    let id = create_child(&app, minimum_child()).await;

    let params = json!({
        "name": "new_name",
        "birthday": "1999-12-31",
        "gender": "male",
        "photo": "/new/path/to/image.jpeg",
        "grade": 2,
        "is_study": true,
    });
    let (status, body) = send(&app, Method::PUT, &format!("/api/children/{}", id), Some(params)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(child_count(&app).await, 1);
    let child = &body["child"];
    assert_eq!(child["name"], "new_name");
    assert_eq!(child["birthday"], "1999-12-31");
    assert_eq!(child["photo"], "/new/path/to/image.jpeg");
    assert_eq!(child["grade"], 2);
    assert_eq!(child["is_study"], true);
}

#[tokio::test]
async fn test_replace_child_requires_fields() {
    let app = setup_test().await;
    let id = create_child(&app, minimum_child()).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/children/{}", id),
        Some(json!({ "is_study": true })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("name").is_some());
    let (_, child) = send(&app, Method::GET, &format!("/api/children/{}", id), None).await;
    assert_eq!(child["is_study"], false);
}

#[tokio::test]
async fn test_patch_child() {
    let app = setup_test().await;
    let mut params = minimum_child();
    params["grade"] = json!(4);
    let id = create_child(&app, params).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/children/{}", id),
        Some(json!({ "is_study": true, "grade": null })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["child"]["name"], "Ivan");
    assert_eq!(body["child"]["is_study"], true);
    assert_eq!(body["child"]["grade"], Value::Null);
}

#[tokio::test]
async fn test_unknown_child_is_not_found() {
    let app = setup_test().await;

    let (status, body) = send(&app, Method::GET, "/api/children/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.get("detail").is_some());

    let (status, _) = send(&app, Method::PATCH, "/api/children/42", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/children/42", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_child_removes_journal() {
    let app = setup_test().await;
    let id = create_child(&app, minimum_child()).await;
    create_entry(&app, json!({ "child_id": id })).await;
    create_entry(&app, json!({ "child_id": id })).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/children/{}", id), None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
    assert_eq!(child_count(&app).await, 0);
    assert_eq!(entry_count(&app).await, 0);
}

#[tokio::test]
async fn test_create_entry_with_empty_params() {
    let app = setup_test().await;

    let (status, body) = create_entry(&app, json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(entry_count(&app).await, 0);
    let expected: BTreeSet<String> = ["child_id".to_string()].into_iter().collect();
    assert_eq!(keys(&body), expected);
}

#[tokio::test]
async fn test_create_entry_for_unknown_child() {
    let app = setup_test().await;

    let (status, body) = create_entry(&app, json!({ "child_id": 777 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["child_id"][0].as_str().unwrap().contains("777"));
}

#[tokio::test]
async fn test_create_entry_with_wrong_child_type() {
    let app = setup_test().await;

    let (status, body) = create_entry(&app, json!({ "child_id": "abc" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let expected: BTreeSet<String> = ["child_id".to_string()].into_iter().collect();
    assert_eq!(keys(&body), expected);
    assert_eq!(entry_count(&app).await, 0);
}

#[tokio::test]
async fn test_create_entry_with_wrong_time_type() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;

    let (status, body) = create_entry(
        &app,
        json!({ "child_id": child_id, "income_time": 1265012415, "income_escort": 2 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let expected: BTreeSet<String> = ["income_escort", "income_time"].iter().map(|s| s.to_string()).collect();
    assert_eq!(keys(&body), expected);
}

#[tokio::test]
async fn test_create_entry_without_income_and_outcome() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;

    let (status, body) = create_entry(&app, json!({ "child_id": child_id })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry_count(&app).await, 1);
    let entry = &body["entry"];
    assert_eq!(entry["child_id"], child_id);
    assert_eq!(entry["income_time"], Value::Null);
    assert_eq!(entry["income_escort"], Value::Null);
    assert_eq!(entry["outcome_time"], Value::Null);
    assert_eq!(entry["outcome_escort"], Value::Null);
}

#[tokio::test]
async fn test_create_entry_with_income() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;

    let (status, body) = create_entry(
        &app,
        json!({ "child_id": child_id, "income_time": "2010-02-01 08:20:15+00:00", "income_escort": "father" }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["entry"]["income_time"], INCOME_TIME);
    assert_eq!(body["entry"]["income_escort"], "father");
}

#[tokio::test]
async fn test_create_entry_with_income_missing_escort() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;

    let (status, body) = create_entry(&app, json!({ "child_id": child_id, "income_time": INCOME_TIME })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["non_field_errors"],
        json!([JournalValidationError::IncomePairMismatch.to_string()])
    );
    assert_eq!(entry_count(&app).await, 0);
}

#[tokio::test]
async fn test_create_entry_with_outcome_only() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;

    let (status, body) = create_entry(
        &app,
        json!({ "child_id": child_id, "outcome_time": OUTCOME_TIME, "outcome_escort": "mother" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["non_field_errors"],
        json!([JournalValidationError::OutcomeWithoutIncome.to_string()])
    );
}

#[tokio::test]
async fn test_create_entry_with_income_and_outcome() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;

    let (status, body) = create_entry(
        &app,
        json!({
            "child_id": child_id,
            "income_time": INCOME_TIME,
            "income_escort": "father",
            "outcome_time": OUTCOME_TIME,
            "outcome_escort": "mother",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry_count(&app).await, 1);
    let entry = &body["entry"];
    assert_eq!(entry["income_time"], INCOME_TIME);
    assert_eq!(entry["outcome_time"], OUTCOME_TIME);
    assert_eq!(entry["outcome_escort"], "mother");
}

#[tokio::test]
async fn test_create_entry_with_outcome_earlier_than_income() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;

    let (status, body) = create_entry(
        &app,
        json!({
            "child_id": child_id,
            "income_time": INCOME_TIME,
            "income_escort": "father",
            "outcome_time": EARLY_OUTCOME_TIME,
            "outcome_escort": "mother",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["non_field_errors"],
        json!([JournalValidationError::OutcomeBeforeIncome.to_string()])
    );
    assert_eq!(entry_count(&app).await, 0);
}

#[tokio::test]
async fn test_replace_entry_with_income() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;
    let (_, created) = create_entry(&app, json!({ "child_id": child_id })).await;
    let uri = format!("/api/journal/{}", created["entry"]["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "child_id": child_id, "income_time": INCOME_TIME, "income_escort": "father" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry_count(&app).await, 1);
    assert_eq!(body["entry"]["income_time"], INCOME_TIME);
    assert_eq!(body["entry"]["income_escort"], "father");
}

#[tokio::test]
async fn test_replace_entry_with_outcome_without_income() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;
    let (_, created) = create_entry(&app, json!({ "child_id": child_id })).await;
    let uri = format!("/api/journal/{}", created["entry"]["id"]);

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "child_id": child_id, "outcome_time": OUTCOME_TIME, "outcome_escort": "mother" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(entry_count(&app).await, 1);
    let (_, stored) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(stored["outcome_time"], Value::Null);
    assert_eq!(stored["outcome_escort"], Value::Null);
}

#[tokio::test]
async fn test_income_then_outcome_lifecycle() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;
    let (status, created) = create_entry(
        &app,
        json!({ "child_id": child_id, "income_time": INCOME_TIME, "income_escort": "father" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/journal/{}", created["entry"]["id"]);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "outcome_time": OUTCOME_TIME, "outcome_escort": "mother" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let (_, stored) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(stored, body["entry"]);
    assert_eq!(stored["income_time"], INCOME_TIME);
    assert_eq!(stored["income_escort"], "father");
    assert_eq!(stored["outcome_time"], OUTCOME_TIME);
    assert_eq!(stored["outcome_escort"], "mother");
}

#[tokio::test]
async fn test_clearing_income_with_recorded_outcome_is_rejected() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;
    let (_, created) = create_entry(
        &app,
        json!({
            "child_id": child_id,
            "income_time": INCOME_TIME,
            "income_escort": "father",
            "outcome_time": OUTCOME_TIME,
            "outcome_escort": "mother",
        }),
    )
    .await;
    let uri = format!("/api/journal/{}", created["entry"]["id"]);

    let (status, body) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "income_time": null, "income_escort": null })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["non_field_errors"],
        json!([JournalValidationError::OutcomeWithoutIncome.to_string()])
    );
    let (_, stored) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(stored["income_time"], INCOME_TIME);
}

#[tokio::test]
async fn test_delete_entry() {
    let app = setup_test().await;
    let child_id = create_child(&app, minimum_child()).await;
    let (_, created) = create_entry(&app, json!({ "child_id": child_id })).await;
    let uri = format!("/api/journal/{}", created["entry"]["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_study_list() {
    let app = setup_test().await;
    let mut children = Vec::new();
    for (i, is_study) in [true, false, true, false].into_iter().enumerate() {
        let params = json!({
            "name": format!("Name{}", i + 1),
            "gender": "male",
            "birthday": format!("2000-01-0{}", i + 1),
            "grade": i + 1,
            "is_study": is_study,
        });
        children.push(create_child(&app, params).await);
    }

    let mut expected = BTreeSet::new();
    for (child_index, studying) in [(0, true), (0, true), (1, false), (1, false), (2, true), (3, false)] {
        let (_, body) = create_entry(&app, json!({ "child_id": children[child_index] })).await;
        if studying {
            expected.insert(body["entry"]["id"].as_i64().unwrap());
        }
    }

    let (status, body) = send(&app, Method::GET, "/api/journal/study", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: BTreeSet<i64> = body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, expected);
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_malformed_body() {
    let app = setup_test().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/journal")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
