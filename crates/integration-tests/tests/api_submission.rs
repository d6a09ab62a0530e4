mod common;

use std::sync::Arc;

use axum::http::header::LOCATION;
use axum::http::StatusCode;
use common::{
    get, json, post_raw, post_urlencoded, send, submit_form, Harness, SequentialTokens, FULL_FORM,
};
use domains::{PendingRegistry, PostRepository};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot really a png";

#[tokio::test]
async fn submit_then_follow_the_verification_link() {
    let h = Harness::new(0).await;

    let (status, _, body) = send(h.app(), submit_form(&FULL_FORM, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body)["message"],
        "Check your email for a verification link!"
    );
    assert_eq!(h.posts.count().await.unwrap(), 0);

    let token = h.last_token();
    let (status, headers, _) = send(h.app(), get(&format!("/api/verify?token={token}"))).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(headers[LOCATION], "/verify-success");

    let (_, _, body) = send(h.app(), get("/api/posts?category=machine-learning")).await;
    let posts = json(&body);
    assert_eq!(posts[0]["title"], "Gradient Descent Explained");
    assert_eq!(posts[0]["verified"], true);
    assert!(posts[0]["image"].is_null());

    // A second click on the same link is refused in plain text.
    let (status, _, body) = send(h.app(), get(&format!("/api/verify?token={token}"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(&body[..], b"Invalid or expired token.");
}

#[tokio::test]
async fn verify_without_token_is_rejected() {
    let h = Harness::new(0).await;
    let (status, _, body) = send(h.app(), get("/api/verify")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(&body[..], b"Invalid or expired token.");
}

#[tokio::test]
async fn uploaded_image_is_stored_and_referenced() {
    let h = Harness::new(0).await;

    let (status, _, _) = send(
        h.app(),
        submit_form(&FULL_FORM, Some(("cover.png", "image/png", PNG))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let post = h
        .state
        .verifications
        .verify(&h.last_token())
        .await
        .unwrap();
    let image = post.image.expect("image reference recorded");
    assert!(image.starts_with("/uploads/"));
    assert!(image.ends_with(".png"));

    let on_disk = h.uploads_root().join(image.trim_start_matches("/uploads/"));
    assert_eq!(std::fs::read(on_disk).unwrap(), PNG);

    let (status, _, body) = send(h.app(), get(&image)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], PNG);
}

#[tokio::test]
async fn empty_file_part_means_no_image() {
    let h = Harness::new(0).await;

    let (status, _, _) = send(
        h.app(),
        submit_form(&FULL_FORM, Some(("", "application/octet-stream", b""))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let post = h
        .state
        .verifications
        .verify(&h.last_token())
        .await
        .unwrap();
    assert!(post.image.is_none());
}

#[tokio::test]
async fn missing_fields_are_listed_in_the_message() {
    let h = Harness::new(0).await;

    let (status, _, body) = send(h.app(), submit_form(&FULL_FORM[..3], None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = json(&body)["message"].as_str().unwrap().to_owned();
    assert!(message.starts_with("All fields are required."));
    assert!(message.contains("category, description, content"));
    assert_eq!(h.pending.count().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_title_is_a_bad_request() {
    let h = Harness::new(1).await;
    let mut form = FULL_FORM;
    form[2] = ("title", "Data Science Post 1");

    let (status, _, body) = send(h.app(), submit_form(&form, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json(&body)["message"],
        "A post with this title already exists. Please choose a different title."
    );
    assert!(h.outbox.sent().is_empty());
}

#[tokio::test]
async fn unknown_category_is_a_bad_request() {
    let h = Harness::new(0).await;
    let mut form = FULL_FORM;
    form[3] = ("category", "astrology");

    let (status, _, _) = send(h.app(), submit_form(&form, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(h.pending.count().await.unwrap(), 0);
}

#[tokio::test]
async fn mail_outage_is_reported_but_draft_survives() {
    let h = Harness::with_tokens(0, Arc::new(SequentialTokens::default())).await;
    h.outbox.set_failing(true);

    let (status, _, body) = send(h.app(), submit_form(&FULL_FORM, None)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json(&body)["code"], "MAIL_FAILED");
    assert_eq!(h.pending.count().await.unwrap(), 1);

    let (status, _, _) = send(h.app(), get("/api/verify?token=token-1")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(h.posts.count().await.unwrap(), 1);
}

#[tokio::test]
async fn metrics_count_submission_outcomes() {
    let h = Harness::new(0).await;
    send(h.app(), submit_form(&FULL_FORM, None)).await;
    send(h.app(), get("/api/verify?token=nope")).await;

    let (status, _, body) = send(h.app(), get("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("blog_submissions_total{outcome=\"ok\"} 1"));
    assert!(text.contains("blog_verifications_total{outcome=\"invalid_token\"} 1"));
}

#[tokio::test]
async fn urlencoded_submission_without_image() {
    let h = Harness::new(0).await;
    let form = "name=Ada&email=ada%40example.com&title=Plain+Form+Post\
                &category=data-analytics&description=No+image&content=Body";

    let (status, _, body) = send(h.app(), post_urlencoded("/api/submit", form)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json(&body)["message"],
        "Check your email for a verification link!"
    );
    assert_eq!(h.outbox.last().unwrap().to, "ada@example.com");

    let post = h
        .state
        .verifications
        .verify(&h.last_token())
        .await
        .unwrap();
    assert_eq!(post.title, "Plain Form Post");
    assert!(post.image.is_none());
}

#[tokio::test]
async fn unreadable_submission_bodies_get_json_errors() {
    let h = Harness::new(0).await;

    for content_type in [None, Some("text/plain"), Some("multipart/form-data")] {
        let (status, _, body) = send(h.app(), post_raw("/api/submit", content_type, "x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{content_type:?}");
        assert_eq!(json(&body)["code"], "BAD_REQUEST");
    }
    assert_eq!(h.pending.count().await.unwrap(), 0);
    assert!(h.outbox.sent().is_empty());
}
