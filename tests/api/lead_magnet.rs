use crate::helpers::{spawn_app, subscriber};
use serde_json::json;
use wiremock::ResponseTemplate;

#[tokio::test]
async fn lead_magnet_subscribes_with_the_resource_tag() {
    let app = spawn_app().await;
    app.mount_lookup_not_found().await;
    app.mount_create("sub_1", 1).await;
    app.mount_tags("sub_1").await;

    let response = app
        .post_lead_magnet(json!({
            "email": "new@x.com",
            "resourceId": "42",
            "fileId": "file-abc",
            "tags": "promo"
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.tags_sent().await, vec!["new", "promo", "resource-42"]);
    // delivery is deferred by at least a minute
    assert!(app.notifier.sent().is_empty());
}

#[tokio::test]
async fn lead_magnet_for_an_existing_subscriber_skips_the_new_tag() {
    let app = spawn_app().await;
    app.mount_lookup(
        "existing@x.com",
        ResponseTemplate::new(200).set_body_json(subscriber("sub_7")),
    )
    .await;
    app.mount_create("sub_7", 0).await;
    app.mount_tags("sub_7").await;

    let response = app
        .post_lead_magnet(json!({
            "email": "existing@x.com",
            "resourceId": "42",
            "fileId": "file-abc"
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.tags_sent().await, vec!["resource-42"]);
}

#[tokio::test]
async fn lead_magnet_returns_400_when_data_is_missing() {
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({ "resourceId": "42", "fileId": "f" }), "missing email"),
        (json!({ "email": "a@b.com", "fileId": "f" }), "missing resource id"),
        (json!({ "email": "a@b.com", "resourceId": "42", "fileId": "" }), "empty file id"),
        (json!({ "email": "nope", "resourceId": "42", "fileId": "f" }), "invalid email"),
    ];

    for (body, error_message) in test_cases {
        let response = app.post_lead_magnet(body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
    }
}

#[tokio::test]
async fn failed_subscription_does_not_schedule_delivery() {
    let app = spawn_app().await;
    app.mount_lookup_not_found().await;
    app.mount_create("", 1).await;

    let response = app
        .post_lead_magnet(json!({
            "email": "new@x.com",
            "resourceId": "42",
            "fileId": "file-abc"
        }))
        .await;

    assert_eq!(500, response.status().as_u16());
    assert!(app.tags_sent().await.is_empty());
}
