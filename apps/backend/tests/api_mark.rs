//! Marking API tests.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;

use common::fixtures;
use common::TestContext;

fn mark_url(pack_id: &str) -> String {
    format!("/api/packs/{}/mark", pack_id)
}

#[tokio::test]
async fn test_mark_full_marks() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url(fixtures::STREAKY_ID))
        .json(&fixtures::mark_request(vec![
            fixtures::choice("1", &[1]),
            fixtures::choice("2", &[2, 0]),
            fixtures::matrix("3", &[Some(0), Some(1), Some(0)]),
            fixtures::text("4", "They felt safe in the oak."),
        ]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["pack_id"], fixtures::STREAKY_ID);
    assert_eq!(body["total_score"], 6);
    assert_eq!(body["total_max"], 6);
    assert_eq!(body["summary"], "You scored 6 out of 6.");
    assert!(body["marked_at"].is_string());

    let items = body["items"].as_array().unwrap();
    assert!(items.iter().all(|item| item["status"] == "correct"));
    assert_eq!(items[2]["detail"], "You answered 3 of 3 statements correctly.");
}

#[tokio::test]
async fn test_mark_partial_credit() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url(fixtures::STREAKY_ID))
        .json(&fixtures::mark_request(vec![
            fixtures::choice("1", &[0]),
            fixtures::choice("2", &[0]),
            fixtures::matrix("3", &[Some(0), None, Some(1)]),
        ]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_score"], 1);
    assert_eq!(body["total_max"], 6);

    let items = body["items"].as_array().unwrap();
    let statuses: Vec<_> = items.iter().map(|item| item["status"].clone()).collect();
    assert_eq!(
        statuses,
        vec!["incorrect", "incorrect", "partial", "unanswered"]
    );
    assert_eq!(
        items[0]["detail"],
        "You chose \"A barn\". Correct answer: \"An oak\"."
    );
    assert_eq!(
        items[1]["detail"],
        "No credit awarded. Correct options: Acorns, Hazelnuts."
    );
    assert_eq!(
        items[2],
        serde_json::json!({
            "id": "3",
            "label": "3",
            "question_type": "matrix",
            "status": "partial",
            "score": 1,
            "max_score": 3,
            "detail": "You answered 1 of 3 statements correctly."
        })
    );
}

#[tokio::test]
async fn test_mark_without_answers() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url(fixtures::LANTERN_ID))
        .json(&serde_json::json!({}))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_score"], 0);
    assert_eq!(body["total_max"], 4);

    let items = body["items"].as_array().unwrap();
    assert!(items.iter().all(|item| item["status"] == "unanswered"));
    assert_eq!(
        items[0]["detail"],
        "No answer submitted. Correct answer: They rely on its steady beam for safety and guidance."
    );
}

#[tokio::test]
async fn test_mark_short_answers() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url(fixtures::LANTERN_ID))
        .json(&fixtures::mark_request(vec![
            fixtures::choice("1", &[1]),
            fixtures::text("2", "Glow lantrn algae"),
            fixtures::text("5", "She never gives up."),
            fixtures::choice("9", &[1]),
        ]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_score"], 3);

    let items = body["items"].as_array().unwrap();
    assert_eq!(items[1]["status"], "correct");
    assert_eq!(items[1]["detail"], "Great explanation! You included the key idea.");
    assert_eq!(items[2]["status"], "incorrect");
    assert_eq!(
        items[2]["detail"],
        "Needs another detail. Try including: guide every traveler, light belongs to everyone."
    );
    assert_eq!(items[3]["detail"], "Correct!");
}

#[tokio::test]
async fn test_mark_accepts_alternative_points() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url(fixtures::STREAKY_ID))
        .json(&fixtures::mark_request(vec![fixtures::text(
            "4",
            "They were frightend",
        )]))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["items"][3]["status"], "correct");
    assert_eq!(body["total_score"], 1);
}

#[tokio::test]
async fn test_mark_unknown_question() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url(fixtures::STREAKY_ID))
        .json(&fixtures::mark_request(vec![fixtures::choice("42", &[0])]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
    assert!(body["message"].as_str().unwrap().contains("Unknown question: 42"));
}

#[tokio::test]
async fn test_mark_answer_of_wrong_kind() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url(fixtures::STREAKY_ID))
        .json(&fixtures::mark_request(vec![fixtures::text("1", "An oak")]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "invalid_answer");
}

#[tokio::test]
async fn test_mark_option_out_of_range() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url(fixtures::STREAKY_ID))
        .json(&fixtures::mark_request(vec![fixtures::choice("1", &[7])]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "invalid_answer");
}

#[tokio::test]
async fn test_mark_pack_without_questions() {
    let ctx = TestContext::new();
    ctx.write_pack("empty", "{}");
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url("empty"))
        .json(&fixtures::mark_request(vec![]))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_mark_unknown_pack() {
    let ctx = TestContext::new();
    let server = TestServer::new(ctx.router()).unwrap();

    let response = server
        .post(&mark_url("no_such_pack"))
        .json(&fixtures::mark_request(vec![]))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
