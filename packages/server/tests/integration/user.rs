use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn returns_the_current_profile() {
    let app = TestApp::spawn().await;
    let user = app
        .create_authenticated_user("alice@example.com", "securepass")
        .await;

    let res = app.get_with_token(routes::USER, &user.token).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["id"], user.id);
    assert_eq!(res.body["email"], "alice@example.com");
    assert!(res.body.get("password").is_none());
}

#[tokio::test]
async fn requires_authentication() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::USER).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn updates_profile_fields_and_keeps_password_when_empty() {
    let app = TestApp::spawn().await;
    let user = app
        .create_authenticated_user("alice@example.com", "securepass")
        .await;

    let res = app
        .patch_with_token(
            routes::USER,
            &json!({"name": "Alice J.", "country_code": "be", "password": ""}),
            &user.token,
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["name"], "Alice J.");
    assert_eq!(res.body["country_code"], "BE");
    assert_eq!(res.body["email"], "alice@example.com");

    let login = app
        .post_without_token(
            routes::LOGIN,
            &json!({"email": "alice@example.com", "password": "securepass"}),
        )
        .await;
    assert_eq!(login.status, 200);
}

#[tokio::test]
async fn new_password_replaces_the_old_one() {
    let app = TestApp::spawn().await;
    let user = app
        .create_authenticated_user("alice@example.com", "securepass")
        .await;

    let res = app
        .put_with_token(routes::USER, &json!({"password": "evenbetterpass"}), &user.token)
        .await;
    assert_eq!(res.status, 200, "{}", res.text);

    let old = app
        .post_without_token(
            routes::LOGIN,
            &json!({"email": "alice@example.com", "password": "securepass"}),
        )
        .await;
    assert_eq!(old.status, 401);

    let new = app
        .post_without_token(
            routes::LOGIN,
            &json!({"email": "alice@example.com", "password": "evenbetterpass"}),
        )
        .await;
    assert_eq!(new.status, 200);
}

#[tokio::test]
async fn cannot_take_another_users_email() {
    let app = TestApp::spawn().await;
    app.create_authenticated_user("bob@example.com", "securepass")
        .await;
    let alice = app
        .create_authenticated_user("alice@example.com", "securepass")
        .await;

    let res = app
        .patch_with_token(routes::USER, &json!({"email": "bob@example.com"}), &alice.token)
        .await;

    assert_eq!(res.status, 409);
    assert_eq!(res.body["code"], "EMAIL_TAKEN");
}
