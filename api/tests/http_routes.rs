mod common;

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use rag_store::HashingEmbedder;
use serde_json::Value;
use tower::ServiceExt;

use common::*;

async fn json_body(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn upload_then_ask_answers_from_document() {
    let h = harness();
    let pdf = pdf_with_pages(&[&["Petitioner: Jane Doe", "Respondent: ACME Corp"]]);

    let resp = h
        .app
        .clone()
        .oneshot(upload_request(&[("files", "petition.pdf", pdf)]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "PDFs processed and stored in vector DB");
    assert_eq!(body["chunks"], 1);

    let resp = h
        .app
        .clone()
        .oneshot(ask_request("Who+is+the+petitioner%3F"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["answer"], CANNED_ANSWER);

    let prompt = h.chat.last_user_prompt();
    assert!(prompt.contains("Petitioner: Jane Doe"));
    assert!(prompt.ends_with("Question: Who is the petitioner?\n\nAnswer:"));
}

#[tokio::test]
async fn upload_without_text_stores_zero_chunks() {
    let h = harness();
    let blank = pdf_with_pages(&[&[]]);

    let resp = h
        .app
        .clone()
        .oneshot(upload_request(&[("files", "scan.pdf", blank)]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["chunks"], 0);
    assert_eq!(h.store.record_count(COLLECTION).await, Some(0));
}

#[tokio::test]
async fn ask_before_any_upload_still_answers() {
    let h = harness();

    let resp = h
        .app
        .clone()
        .oneshot(ask_request("What+is+the+filing+date%3F"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["answer"], CANNED_ANSWER);
    assert!(h.chat.last_user_prompt().starts_with("Context:\n\n\nQuestion:"));
}

#[tokio::test]
async fn second_upload_replaces_first() {
    let h = harness();
    let first = pdf_with_pages(&[&["Petitioner: Jane Doe"]]);
    let second = pdf_with_pages(&[&["Appellant: John Roe"]]);

    for (name, pdf) in [("first.pdf", first), ("second.pdf", second)] {
        let resp = h
            .app
            .clone()
            .oneshot(upload_request(&[("files", name, pdf)]))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let texts = h.store.texts(COLLECTION).await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].contains("Appellant: John Roe"));
    assert!(!texts.iter().any(|t| t.contains("Jane Doe")));
}

#[tokio::test]
async fn unreadable_file_does_not_abort_batch() {
    let h = harness();
    let good = pdf_with_pages(&[&["Petitioner: Jane Doe"]]);

    let resp = h
        .app
        .clone()
        .oneshot(upload_request(&[
            ("files", "broken.pdf", b"not a pdf".to_vec()),
            ("files", "good.pdf", good),
        ]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["chunks"], 1);
}

#[tokio::test]
async fn upload_without_files_part_is_bad_request() {
    let h = harness();
    let pdf = pdf_with_pages(&[&["Petitioner: Jane Doe"]]);

    let resp = h
        .app
        .clone()
        .oneshot(upload_request(&[("document", "petition.pdf", pdf)]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "BAD_REQUEST");
}

#[tokio::test]
async fn upload_over_body_limit_is_rejected() {
    let h = build(
        Arc::new(HashingEmbedder::new(384)),
        RecordingChat::default(),
        1024,
    );
    let resp = h
        .app
        .clone()
        .oneshot(upload_request(&[("files", "big.pdf", vec![b'x'; 8 * 1024])]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn indexing_failure_maps_to_upload_failed() {
    let h = build(Arc::new(DownEmbedder), RecordingChat::default(), 1024 * 1024);
    let pdf = pdf_with_pages(&[&["Petitioner: Jane Doe"]]);

    let resp = h
        .app
        .clone()
        .oneshot(upload_request(&[("files", "petition.pdf", pdf)]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "UPLOAD_FAILED");
    assert_eq!(body["message"], "Upload failed. Please try again.");
}

#[tokio::test]
async fn ask_accepts_multipart_query() {
    let h = harness();
    let pdf = pdf_with_pages(&[&["Petitioner: Jane Doe"]]);
    h.app
        .clone()
        .oneshot(upload_request(&[("files", "petition.pdf", pdf)]))
        .await
        .unwrap();

    let resp = h
        .app
        .clone()
        .oneshot(ask_multipart_request(&[("query", "Who is the petitioner?")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["answer"], CANNED_ANSWER);

    let prompt = h.chat.last_user_prompt();
    assert!(prompt.contains("Petitioner: Jane Doe"));
    assert!(prompt.ends_with("Question: Who is the petitioner?\n\nAnswer:"));
}

#[tokio::test]
async fn multipart_without_query_field_is_bad_request() {
    let h = harness();
    let resp = h
        .app
        .clone()
        .oneshot(ask_multipart_request(&[("question", "hello")]))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(h.chat.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn question_reaches_model_untrimmed() {
    let h = harness();
    let resp = h
        .app
        .clone()
        .oneshot(ask_request("++Who+is+the+petitioner%3F+"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        h.chat
            .last_user_prompt()
            .ends_with("Question:   Who is the petitioner? \n\nAnswer:")
    );
}

#[tokio::test]
async fn empty_query_is_bad_request() {
    let h = harness();
    let resp = h.app.clone().oneshot(ask_request("+++")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(h.chat.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_query_field_is_bad_request() {
    let h = harness();
    let req = Request::builder()
        .method("POST")
        .uri("/ask/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("question=hello"))
        .unwrap();
    let resp = h.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn model_failure_maps_to_retrieval_failed() {
    let h = build(
        Arc::new(HashingEmbedder::new(384)),
        RecordingChat::failing(),
        1024 * 1024,
    );
    let resp = h
        .app
        .clone()
        .oneshot(ask_request("Who+is+the+petitioner%3F"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "RETRIEVAL_FAILED");
    assert_eq!(
        body["message"],
        "An error occurred while retrieving the response."
    );
}

#[tokio::test]
async fn health_reports_vector_store() {
    let h = harness();
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = h.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["vector_store"]["ok"], true);
    assert!(body["providers"].as_array().unwrap().is_empty());
}
