//! API integration tests
//!
//! These run against a live server with a migrated database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use chrono::{Duration, Utc};
use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Helper to create an author and return its id
async fn create_author(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send create author request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse author response");
    body["id"].as_i64().expect("No author ID")
}

/// Helper to create a book and return its JSON body
async fn create_book(
    client: &Client,
    author_id: i64,
    title: &str,
    days_ago: i64,
    rating: i32,
) -> Value {
    let date = (Utc::now().date_naive() - Duration::days(days_ago)).to_string();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "author_id": author_id,
            "publication_date": date,
            "rating": rating
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);

    response.json().await.expect("Failed to parse book response")
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_book() {
    let client = Client::new();
    let author_id = create_author(&client, "J.K. Rowling").await;

    let book = create_book(&client, author_id, "Harry Potter", 30, 4).await;

    assert_eq!(book["title"], "Harry Potter");
    assert_eq!(book["status"], "available");
    assert!(book["reserved_by_email"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_future_date_fails() {
    let client = Client::new();
    let author_id = create_author(&client, "Future Author").await;

    let future_date = (Utc::now().date_naive() + Duration::days(365)).to_string();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Future Book",
            "author_id": author_id,
            "publication_date": future_date
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    let messages = body["publication_date"]
        .as_array()
        .expect("Expected error map keyed by publication_date");
    assert!(messages.contains(&json!("must be in the past or today")));
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_unknown_author_fails() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Orphan Book",
            "author_id": -1,
            "publication_date": "2000-01-01"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["author"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_list_books_sorted_by_rating_and_publication_date() {
    let client = Client::new();
    let author_id = create_author(&client, "Sorted Author").await;

    let book1 = create_book(&client, author_id, "Book 1", 3, 3).await;
    let book2 = create_book(&client, author_id, "Book 2", 2, 5).await;
    let book3 = create_book(&client, author_id, "Book 3", 4, 3).await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let ids: Vec<i64> = body
        .as_array()
        .expect("Expected an array of books")
        .iter()
        .map(|b| b["id"].as_i64().unwrap())
        .collect();

    // The database may hold other records; compare the relative order of ours
    let ours: Vec<i64> = ids
        .into_iter()
        .filter(|id| {
            [&book1, &book2, &book3]
                .iter()
                .any(|b| b["id"].as_i64().unwrap() == *id)
        })
        .collect();

    assert_eq!(
        ours,
        vec![
            book2["id"].as_i64().unwrap(),
            book1["id"].as_i64().unwrap(),
            book3["id"].as_i64().unwrap()
        ]
    );
}

#[tokio::test]
#[ignore]
async fn test_listing_embeds_author() {
    let client = Client::new();
    let author_id = create_author(&client, "Embedded Author").await;
    create_book(&client, author_id, "Embedded Book", 10, 1).await;

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    let entry = body
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["author"]["id"].as_i64() == Some(author_id))
        .expect("Created book missing from listing");

    assert_eq!(entry["author"]["name"], "Embedded Author");
}

#[tokio::test]
#[ignore]
async fn test_reserve_book() {
    let client = Client::new();
    let author_id = create_author(&client, "Reserve Author").await;
    let book = create_book(&client, author_id, "Reservable", 3, 3).await;
    let book_id = book["id"].as_i64().unwrap();

    // First reservation succeeds
    let response = client
        .post(format!("{}/books/{}/reserve", BASE_URL, book_id))
        .json(&json!({ "user": { "email": "a@x.com" } }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "reserved");
    assert_eq!(body["reserved_by_email"], "a@x.com");

    // Second attempt conflicts and changes nothing
    let response = client
        .post(format!("{}/books/{}/reserve", BASE_URL, book_id))
        .json(&json!({ "user": { "email": "b@x.com" } }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    let messages = body["base"].as_array().expect("Expected base-keyed error map");
    assert!(messages.contains(&json!("reservation already exists")));

    // Re-fetch to confirm the original reservation survived
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "reserved");
    assert_eq!(body["reserved_by_email"], "a@x.com");
}

#[tokio::test]
#[ignore]
async fn test_reserve_requires_valid_email() {
    let client = Client::new();
    let author_id = create_author(&client, "Email Author").await;
    let book = create_book(&client, author_id, "Picky Book", 5, 2).await;
    let book_id = book["id"].as_i64().unwrap();

    let response = client
        .post(format!("{}/books/{}/reserve", BASE_URL, book_id))
        .json(&json!({ "user": { "email": "" } }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 422);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["email"].is_array());

    // Failed validation must not reserve the book
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "available");
}

#[tokio::test]
#[ignore]
async fn test_reserve_missing_book_returns_404() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books/-1/reserve", BASE_URL))
        .json(&json!({ "user": { "email": "a@x.com" } }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_generate_report() {
    let client = Client::new();

    // Seed several authors with several books each
    for i in 0..3 {
        let author_id = create_author(&client, &format!("Report Author {}", i)).await;
        for j in 0..3 {
            create_book(&client, author_id, &format!("Report Book {}-{}", i, j), 10 + j, j as i32).await;
        }
    }

    let response = client
        .get(format!("{}/books/generate_report", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["generated_at"].is_string());

    let report = body["report"].as_array().expect("Expected report array");
    assert!(report.len() >= 3);

    let entry = report
        .iter()
        .find(|e| e["author_name"] == "Report Author 0")
        .expect("Seeded author missing from report");
    assert_eq!(entry["total_books"], 3);
    assert_eq!(entry["available_books"], 3);
    assert_eq!(entry["reserved_books"], 0);
    assert!(entry["average_rating"].is_number());
}
