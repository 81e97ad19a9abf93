use crate::helpers::spawn_app;
use serde_json::json;

#[tokio::test]
async fn resource_email_is_sent_right_away() {
    let app = spawn_app().await;

    let response = app
        .post_resource_email(json!({
            "email": "reader@example.com",
            "resourceId": "guide",
            "resourceTitle": "Linux guide",
            "resourceLink": "https://files.example.com/guide"
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let sent = app.notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].title, "Linux guide");
    assert_eq!(sent[0].link, "https://files.example.com/guide");
}

#[tokio::test]
async fn resource_id_is_the_title_when_none_is_given() {
    let app = spawn_app().await;

    let response = app
        .post_resource_email(json!({
            "email": "reader@example.com",
            "resourceId": "guide",
            "resourceLink": "https://files.example.com/guide"
        }))
        .await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(app.notifier.sent()[0].title, "guide");
}

#[tokio::test]
async fn resource_email_returns_400_for_invalid_data() {
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({ "resourceId": "guide", "resourceLink": "l" }), "missing email"),
        (
            json!({ "email": "bad", "resourceId": "guide", "resourceLink": "l" }),
            "invalid email",
        ),
        (json!({ "email": "a@b.com", "resourceId": "guide" }), "missing link"),
        (
            json!({ "email": "a@b.com", "resourceId": "guide", "resourceLink": " " }),
            "blank link",
        ),
    ];

    for (body, error_message) in test_cases {
        let response = app.post_resource_email(body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
    }
    assert!(app.notifier.sent().is_empty());
}
