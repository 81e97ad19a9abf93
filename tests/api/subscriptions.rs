use crate::helpers::{spawn_app, subscriber};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const EMAIL: &str = "ursula_le_guin@gmail.com";

#[tokio::test]
async fn subscribe_returns_201_for_a_new_subscriber() {
    let app = spawn_app().await;
    app.mount_lookup_not_found().await;
    app.mount_create("sub_1", 1).await;
    app.mount_tags("sub_1").await;

    let body = "email=ursula_le_guin%40gmail.com&tags=promo&utm_source=newsletter";
    let response = app.post_subscribe(body.into()).await;

    assert_eq!(201, response.status().as_u16());
    let outcome: serde_json::Value = response.json().await.unwrap();
    assert_eq!(outcome["success"], true);
    assert_eq!(outcome["subscriberId"], "sub_1");
    assert_eq!(outcome["alreadyExisted"], false);
    assert_eq!(app.tags_sent().await, vec!["new", "promo"]);
}

#[tokio::test]
async fn subscribe_accepts_repeated_tags_fields() {
    let app = spawn_app().await;
    app.mount_lookup_not_found().await;
    app.mount_create("sub_1", 1).await;
    app.mount_tags("sub_1").await;

    let body = "email=ursula_le_guin%40gmail.com&tags=promo&tags=spring";
    let response = app.post_subscribe(body.into()).await;

    assert_eq!(201, response.status().as_u16());
    assert_eq!(app.tags_sent().await, vec!["new", "promo", "spring"]);
}

#[tokio::test]
async fn subscribe_returns_200_for_an_existing_subscriber_without_creating_it() {
    let app = spawn_app().await;
    app.mount_lookup(EMAIL, ResponseTemplate::new(200).set_body_json(subscriber("sub_9")))
        .await;
    app.mount_create("sub_9", 0).await;
    app.mount_tags("sub_9").await;

    let body = "email=ursula_le_guin%40gmail.com&tags=promo";
    let response = app.post_subscribe(body.into()).await;

    assert_eq!(200, response.status().as_u16());
    let outcome: serde_json::Value = response.json().await.unwrap();
    assert_eq!(outcome["alreadyExisted"], true);
    assert_eq!(app.tags_sent().await, vec!["promo"]);
}

#[tokio::test]
async fn subscribe_returns_400_when_data_is_missing_or_invalid() {
    let app = spawn_app().await;
    let test_cases = vec![
        ("", "missing the email"),
        ("email=", "empty email"),
        ("email=definitely-not-an-email", "invalid email"),
        (
            "email=ursula_le_guin%40gmail.com&utm_source=twitter",
            "unknown utm source",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = app.post_subscribe(invalid_body.into()).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            error_message
        );
    }
}

#[tokio::test]
async fn subscribe_returns_500_when_a_tag_cannot_be_applied() {
    let app = spawn_app().await;
    app.mount_lookup_not_found().await;
    app.mount_create("sub_1", 1).await;
    Mock::given(method("POST"))
        .and(path("/publications/pub_test/subscriptions/sub_1/tags"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&app.provider_server)
        .await;

    let response = app
        .post_subscribe("email=ursula_le_guin%40gmail.com".into())
        .await;

    assert_eq!(500, response.status().as_u16());
    let outcome: serde_json::Value = response.json().await.unwrap();
    assert_eq!(outcome["success"], false);
}

#[tokio::test]
async fn subscribe_returns_500_without_details_when_the_provider_is_broken() {
    let app = spawn_app().await;
    app.mount_lookup(EMAIL, ResponseTemplate::new(502).set_body_string("upstream exploded"))
        .await;

    let response = app
        .post_subscribe("email=ursula_le_guin%40gmail.com".into())
        .await;

    assert_eq!(500, response.status().as_u16());
    let body = response.text().await.unwrap();
    assert!(!body.contains("upstream exploded"));
}
