//! API integration tests
//!
//! These run against a live server backed by a scratch database:
//! `cargo test -- --ignored --test-threads=1`. Each test resets the schema.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

fn base_url() -> String {
    std::env::var("LIBRARY_TEST_URL").unwrap_or_else(|_| "http://localhost:8080".to_string())
}

/// Drop and recreate every table
async fn reset(client: &Client) {
    let response = client
        .post(format!("{}/create", base_url()))
        .send()
        .await
        .expect("Failed to send reset request");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body, json!({"OK": true}));
}

async fn create_author(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/author", base_url()))
        .json(&json!({
            "name": "Лев",
            "surname": "Толстой",
            "birthday": "28.08.1828 г."
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No author ID")
}

async fn create_book(client: &Client, author: i64, copies: i64) -> i64 {
    let response = client
        .post(format!("{}/book", base_url()))
        .json(&json!({
            "title": "War and Peace",
            "description": "Novel",
            "author": author,
            "copies": copies
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No book ID")
}

async fn copies_of(client: &Client, book_id: i64) -> i64 {
    let body: Value = client
        .get(format!("{}/book/{}", base_url(), book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    body[0]["copies"].as_i64().expect("No copies")
}

async fn borrow(client: &Client, book_id: i64) -> reqwest::Response {
    client
        .post(format!("{}/borrow", base_url()))
        .json(&json!({
            "book_id": book_id,
            "name_reader": "Ivan",
            "get_date": "2023-12-20"
        }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn return_borrow(client: &Client, borrow_id: i64, date: &str) -> reqwest::Response {
    client
        .patch(format!("{}/borrow/{}/return", base_url(), borrow_id))
        .query(&[("return_date", date)])
        .send()
        .await
        .expect("Failed to send request")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", base_url()))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_get_author_after_create() {
    let client = Client::new();
    reset(&client).await;
    let id = create_author(&client).await;

    let response = client
        .get(format!("{}/author/{}", base_url(), id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body,
        json!([{
            "id": id,
            "name": "Лев",
            "surname": "Толстой",
            "birthday": "28.08.1828 г."
        }])
    );
}

#[tokio::test]
#[ignore]
async fn test_delete_then_get_is_not_found() {
    let client = Client::new();
    reset(&client).await;
    let author = create_author(&client).await;
    let book = create_book(&client, author, 2).await;

    let response = client
        .delete(format!("{}/book/{}", base_url(), book))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = client
        .get(format!("{}/book/{}", base_url(), book))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_delete_referenced_author_is_refused() {
    let client = Client::new();
    reset(&client).await;
    let author = create_author(&client).await;
    create_book(&client, author, 1).await;

    let response = client
        .delete(format!("{}/author/{}", base_url(), author))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
async fn test_delete_borrowed_book_is_refused() {
    let client = Client::new();
    reset(&client).await;
    let author = create_author(&client).await;
    let book = create_book(&client, author, 1).await;
    assert_eq!(borrow(&client, book).await.status(), StatusCode::CREATED);

    let response = client
        .delete(format!("{}/book/{}", base_url(), book))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "Referenced");
    assert_eq!(copies_of(&client, book).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_borrow_and_return_cycle() {
    let client = Client::new();
    reset(&client).await;
    let author = create_author(&client).await;
    let book = create_book(&client, author, 1).await;

    let response = borrow(&client, book).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.expect("Failed to parse response");
    assert!(created["return_date"].is_null());
    let borrow_id = created["id"].as_i64().expect("No borrow ID");
    assert_eq!(copies_of(&client, book).await, 0);

    let response = borrow(&client, book).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "OutOfCopies");
    assert_eq!(copies_of(&client, book).await, 0);

    let response = return_borrow(&client, borrow_id, "2024-01-01").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["return_date"], "2024-01-01");
    assert_eq!(copies_of(&client, book).await, 1);

    let response = return_borrow(&client, borrow_id, "2024-01-02").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["error"], "AlreadyReturned");
    assert_eq!(copies_of(&client, book).await, 1);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_of_last_copy() {
    let client = Client::new();
    reset(&client).await;
    let author = create_author(&client).await;
    let book = create_book(&client, author, 1).await;

    let (first, second) = tokio::join!(borrow(&client, book), borrow(&client, book));
    let mut statuses = [first.status(), second.status()];
    statuses.sort();

    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);
    assert_eq!(copies_of(&client, book).await, 0);
}
