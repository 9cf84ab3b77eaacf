use serde_json::json;

use crate::helpers::{TestApp, read};

#[tokio::test]
async fn should_list_users_without_password_hashes() {
    let app = TestApp::new().await;
    let id = app.register_user("ada@example.com").await;

    let (status, body) = read(app.get("/api/users").await).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    let users = body["payload"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], id);
    assert_eq!(users[0]["email"], "ada@example.com");
    assert_eq!(users[0]["role"], "user");
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn should_return_404_for_unknown_user() {
    let app = TestApp::new().await;

    let (status, body) = read(
        app.get("/api/users/6f0c9a52-3d0e-4b43-9a57-2a1f1d6f2e11")
            .await,
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn should_return_400_for_malformed_user_id() {
    let app = TestApp::new().await;

    let (status, body) = read(app.get("/api/users/not-an-id").await).await;

    assert_eq!(status, 400);
    assert_eq!(body["details"]["id"], "not-an-id");
}

#[tokio::test]
async fn should_update_allow_listed_fields() {
    let app = TestApp::new().await;
    let id = app.register_user("ada@example.com").await;

    let (status, body) = read(
        app.put(
            &format!("/api/users/{id}"),
            &json!({ "first_name": "Augusta", "role": "admin" }),
        )
        .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "User updated");

    let (_, body) = read(app.get(&format!("/api/users/{id}")).await).await;
    assert_eq!(body["payload"]["first_name"], "Augusta");
    assert_eq!(body["payload"]["last_name"], "Lovelace");
    assert_eq!(body["payload"]["role"], "admin");
}

#[tokio::test]
async fn should_reject_unknown_update_fields() {
    let app = TestApp::new().await;
    let id = app.register_user("ada@example.com").await;

    let response = app
        .put(&format!("/api/users/{id}"), &json!({ "pets": [] }))
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn should_reject_email_taken_by_another_user() {
    let app = TestApp::new().await;
    app.register_user("ada@example.com").await;
    let id = app.register_user("grace@example.com").await;

    let (status, body) = read(
        app.put(
            &format!("/api/users/{id}"),
            &json!({ "email": "ada@example.com" }),
        )
        .await,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn should_login_with_updated_password() {
    let app = TestApp::new().await;
    let id = app.register_user("ada@example.com").await;

    app.put(
        &format!("/api/users/{id}"),
        &json!({ "password": "new-password" }),
    )
    .await;

    assert_eq!(
        app.post_login("ada@example.com", "new-password")
            .await
            .status()
            .as_u16(),
        200
    );
}

#[tokio::test]
async fn should_delete_user() {
    let app = TestApp::new().await;
    let id = app.register_user("ada@example.com").await;

    let (status, body) = read(app.delete(&format!("/api/users/{id}")).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "User deleted");

    let (status, _) = read(app.get(&format!("/api/users/{id}")).await).await;
    assert_eq!(status, 404);

    let (status, body) = read(app.delete(&format!("/api/users/{id}")).await).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "User not found");
}
