use adoptme_service::REQUEST_ID_HEADER;
use serde_json::json;

use crate::helpers::{PASSWORD, TestApp, read};

#[tokio::test]
async fn should_register_and_return_new_id() {
    let app = TestApp::new().await;

    let (status, body) = read(app.post_register("ada@example.com").await).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    let id = body["payload"].as_str().unwrap();
    let (status, _) = read(app.get(&format!("/api/users/{id}")).await).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn should_reject_duplicate_registration() {
    let app = TestApp::new().await;
    app.register_user("ada@example.com").await;

    let (status, body) = read(app.post_register("ada@example.com").await).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn should_reject_incomplete_registration() {
    let app = TestApp::new().await;
    let test_cases = [
        json!({ "last_name": "Lovelace", "email": "ada@example.com", "password": PASSWORD }),
        json!({ "first_name": "Ada", "email": "ada@example.com", "password": PASSWORD }),
        json!({ "first_name": "Ada", "last_name": "Lovelace", "password": PASSWORD }),
        json!({ "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com" }),
        json!({ "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com", "password": "" }),
    ];

    for test_case in test_cases {
        let (status, body) = read(app.post("/api/sessions/register", &test_case).await).await;

        assert_eq!(status, 400, "Failed for input: {test_case:?}");
        assert_eq!(body["error"], "Incomplete values");
    }
}

#[tokio::test]
async fn should_login_and_read_current_session() {
    let app = TestApp::new().await;
    let id = app.register_user("ada@example.com").await;

    let response = app.post_login("ada@example.com", PASSWORD).await;
    assert_eq!(response.status().as_u16(), 200);
    let cookie = response
        .cookies()
        .find(|cookie| cookie.name() == "coderCookie")
        .expect("Session cookie not set");
    assert!(cookie.http_only());
    assert_eq!(cookie.max_age(), Some(std::time::Duration::from_secs(3600)));
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Logged in");

    let (status, body) = read(app.get("/api/sessions/current").await).await;

    assert_eq!(status, 200);
    let claims = &body["payload"];
    assert_eq!(claims["id"], id);
    assert_eq!(claims["name"], "Ada Lovelace");
    assert_eq!(claims["email"], "ada@example.com");
    assert_eq!(claims["role"], "user");
    assert!(claims.get("password").is_none());
}

#[tokio::test]
async fn should_reject_bad_credentials() {
    let app = TestApp::new().await;
    app.register_user("ada@example.com").await;

    let (status, body) = read(app.post_login("grace@example.com", PASSWORD).await).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "User doesn't exist");

    let (status, body) = read(app.post_login("ada@example.com", "wrong-password").await).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Incorrect password");

    let (status, body) = read(
        app.post("/api/sessions/login", &json!({ "email": "ada@example.com" }))
            .await,
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Incomplete values");
}

#[tokio::test]
async fn should_require_session_cookie() {
    let app = TestApp::new().await;

    let (status, body) = read(app.get("/api/sessions/current").await).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "No session cookie found");
}

#[tokio::test]
async fn should_reject_tampered_session_cookie() {
    let app = TestApp::new().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/sessions/current", app.address))
        .header("Cookie", "coderCookie=not.a.token")
        .send()
        .await
        .unwrap();
    let (status, body) = read(response).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "Invalid or expired token");
}

#[tokio::test]
async fn should_expose_full_record_in_unprotected_session() {
    let app = TestApp::new().await;
    app.register_user("ada@example.com").await;

    let (status, body) = read(
        app.post(
            "/api/sessions/unprotected/login",
            &json!({ "email": "ada@example.com", "password": PASSWORD }),
        )
        .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Unprotected Logged in");

    // The protected session is untouched
    let (status, _) = read(app.get("/api/sessions/current").await).await;
    assert_eq!(status, 401);

    let (status, body) = read(app.get("/api/sessions/unprotected/current").await).await;
    assert_eq!(status, 200);
    assert_eq!(body["payload"]["first_name"], "Ada");
    assert!(
        body["payload"]["password"]
            .as_str()
            .unwrap()
            .starts_with("$argon2id$")
    );
}

#[tokio::test]
async fn should_require_unprotected_cookie() {
    let app = TestApp::new().await;

    let (status, body) = read(app.get("/api/sessions/unprotected/current").await).await;

    assert_eq!(status, 401);
    assert_eq!(body["error"], "No unprotected session cookie found");
}

#[tokio::test]
async fn should_not_mount_unprotected_routes_when_disabled() {
    let app = TestApp::without_unprotected_sessions().await;
    app.register_user("ada@example.com").await;

    let response = app
        .post(
            "/api/sessions/unprotected/login",
            &json!({ "email": "ada@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn should_tag_responses_with_request_id() {
    let app = TestApp::new().await;

    let generated = app.get("/api/users").await;
    assert!(generated.headers().get(&REQUEST_ID_HEADER).is_some());

    let echoed = app
        .http_client
        .get(format!("{}/api/users", app.address))
        .header("x-request-id", "fixed-req-1")
        .send()
        .await
        .unwrap();
    assert_eq!(
        echoed.headers().get(&REQUEST_ID_HEADER).unwrap(),
        "fixed-req-1"
    );
}
