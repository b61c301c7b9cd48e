//! Single-listing summarizer tests over a mock HTTP server

mod common;

use common::{page_html, pdp_payload};
use serde_json::json;

use stayscrape::summary::INVALID_URL_MESSAGE;
use stayscrape::{PageFetcher, summarize_listing};

#[tokio::test]
async fn invalid_url_is_rejected_without_any_fetch() {
    let mut server = mockito::Server::new_async().await;
    let any = server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let url = format!("{}/experiences/12345", server.url());
    let result = summarize_listing(&fetcher, &url, 3).await;

    any.assert_async().await;
    assert_eq!(result, INVALID_URL_MESSAGE);
}

#[tokio::test]
async fn exhausted_retries_name_the_listing_and_attempt_count() {
    let mut server = mockito::Server::new_async().await;
    let failing = server
        .mock("GET", "/rooms/15956982")
        .with_status(503)
        .expect(3)
        .create_async()
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let url = format!("{}/rooms/15956982", server.url());
    let result = summarize_listing(&fetcher, &url, 3).await;

    failing.assert_async().await;
    assert_eq!(
        result,
        "Failed to fetch details for listing 15956982 after 3 retries."
    );
}

#[tokio::test]
async fn first_success_stops_the_retry_loop() {
    let mut server = mockito::Server::new_async().await;
    let page = server
        .mock("GET", "/rooms/42")
        .with_body(page_html(&pdp_payload(json!([
            {"sectionComponentType": "PDP_DESCRIPTION_MODAL", "section": {"text": "A quiet loft"}}
        ]))))
        .expect(1)
        .create_async()
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let url = format!("{}/rooms/42", server.url());
    let result = summarize_listing(&fetcher, &url, 3).await;

    page.assert_async().await;
    assert!(result.contains("# Description"));
    assert!(result.contains("A quiet loft"));
}

#[tokio::test]
async fn summary_renders_populated_slots_and_sentinels_for_the_rest() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/rooms/7")
        .match_query(mockito::Matcher::Any)
        .with_body(page_html(&pdp_payload(json!([
            {"sectionComponentType": "MEET_YOUR_HOST", "section": {"hostName": "Mei"}},
            {"sectionComponentType": "REVIEWS_DEFAULT", "section": {"overallRating": 4.9}},
            {"sectionComponentType": "POLICIES_DEFAULT", "section": {"rule": "No parties"}},
            {"sectionComponentType": "BOOK_IT_SIDEBAR", "section": {"total": "$500"}},
            {"sectionComponentType": "HERO_DEFAULT", "section": {"images": ["x.jpg"]}}
        ]))))
        .create_async()
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let url = format!(
        "{}/rooms/7?check_in=2099-08-01&check_out=2099-08-06&guests=2&adults=2",
        server.url()
    );
    let result = summarize_listing(&fetcher, &url, 1).await;

    assert!(result.contains("check-in: 2099-08-01"));
    assert!(result.contains("Mei"));
    assert!(result.contains("4.9"));
    assert!(result.contains("No parties"));
    assert!(result.contains("$500"));
    assert!(result.contains("x.jpg"));
    // Description slot was never supplied.
    assert!(result.contains("# Description\nN/A"));
}

#[tokio::test]
async fn page_without_payload_yields_no_data_message() {
    let mut server = mockito::Server::new_async().await;
    let _page = server
        .mock("GET", "/rooms/9")
        .with_body("<html><body>blocked</body></html>")
        .create_async()
        .await;

    let fetcher = PageFetcher::new().unwrap();
    let url = format!("{}/rooms/9", server.url());
    let result = summarize_listing(&fetcher, &url, 1).await;
    assert_eq!(result, "No data found for listing 9.");
}
