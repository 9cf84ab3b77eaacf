use reqwest::multipart::{Form, Part};
use serde_json::json;

use crate::helpers::{TestApp, read};

fn pet_form() -> Form {
    Form::new()
        .text("name", "Rex")
        .text("specie", "Dog")
        .text("birthDate", "2021-06-15")
}

#[tokio::test]
async fn should_create_available_pet() {
    let app = TestApp::new().await;

    let (status, body) = read(
        app.post(
            "/api/pets",
            &json!({ "name": "Rex", "specie": "Dog", "birthDate": "2021-06-15" }),
        )
        .await,
    )
    .await;

    assert_eq!(status, 200);
    let pet = &body["payload"];
    assert_eq!(pet["name"], "Rex");
    assert_eq!(pet["specie"], "Dog");
    assert_eq!(pet["birthDate"], "2021-06-15");
    assert_eq!(pet["adopted"], false);
    assert!(pet["owner"].is_null());

    let (_, body) = read(app.get("/api/pets").await).await;
    assert_eq!(body["payload"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn should_reject_incomplete_pet() {
    let app = TestApp::new().await;
    let test_cases = [
        json!({ "specie": "Dog", "birthDate": "2021-06-15" }),
        json!({ "name": "Rex", "birthDate": "2021-06-15" }),
        json!({ "name": "Rex", "specie": "Dog" }),
        json!({ "name": "", "specie": "Dog", "birthDate": "2021-06-15" }),
    ];

    for test_case in test_cases {
        let (status, body) = read(app.post("/api/pets", &test_case).await).await;

        assert_eq!(status, 400, "Failed for input: {test_case:?}");
        assert_eq!(body["error"], "Incomplete values");
    }
}

#[tokio::test]
async fn should_reject_unparsable_birth_date() {
    let app = TestApp::new().await;

    let (status, body) = read(
        app.post(
            "/api/pets",
            &json!({ "name": "Rex", "specie": "Dog", "birthDate": "last spring" }),
        )
        .await,
    )
    .await;

    assert_eq!(status, 400);
    assert!(body["details"].get("birthDate").is_some());
}

#[tokio::test]
async fn should_create_pet_with_uploaded_image() {
    let app = TestApp::new().await;
    let form = pet_form().part(
        "image",
        Part::bytes(b"not really a png".to_vec())
            .file_name("rex photo.png")
            .mime_str("image/png")
            .unwrap(),
    );

    let (status, body) = read(app.post_multipart("/api/pets/withimage", form).await).await;

    assert_eq!(status, 200);
    let image = body["payload"]["image"].as_str().unwrap().to_owned();
    assert!(image.starts_with("/img/"));
    assert!(image.ends_with("-rex_photo.png"));

    let served = app.get(&image).await;
    assert_eq!(served.status().as_u16(), 200);
    assert_eq!(served.bytes().await.unwrap().as_ref(), b"not really a png");
}

#[tokio::test]
async fn should_require_image_for_upload_route() {
    let app = TestApp::new().await;

    let (status, body) = read(app.post_multipart("/api/pets/withimage", pet_form()).await).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Incomplete values or image not provided");
}

#[tokio::test]
async fn should_require_fields_for_upload_route() {
    let app = TestApp::new().await;
    let form = Form::new()
        .text("name", "Rex")
        .part("image", Part::bytes(b"img".to_vec()).file_name("rex.png"));

    let (status, body) = read(app.post_multipart("/api/pets/withimage", form).await).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Incomplete values or image not provided");
}

#[tokio::test]
async fn should_reject_non_multipart_upload_with_json_error() {
    let app = TestApp::new().await;

    let response = app
        .post(
            "/api/pets/withimage",
            &json!({ "name": "Rex", "specie": "Dog", "birthDate": "2021-06-15" }),
        )
        .await;
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let (status, body) = read(response).await;

    assert_eq!(status, 400);
    assert_eq!(body["status"], "error");
    assert_eq!(body["error"], "Invalid multipart body");

    let (_, pets) = read(app.get("/api/pets").await).await;
    assert_eq!(pets["payload"], json!([]));
}

#[tokio::test]
async fn should_update_pet() {
    let app = TestApp::new().await;
    let id = app.create_pet("Rex").await;

    let (status, body) = read(
        app.put(&format!("/api/pets/{id}"), &json!({ "name": "Max" }))
            .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "pet updated");

    let (_, body) = read(app.get("/api/pets").await).await;
    assert_eq!(body["payload"][0]["name"], "Max");
    assert_eq!(body["payload"][0]["specie"], "Dog");
}

#[tokio::test]
async fn should_not_patch_adoption_state() {
    let app = TestApp::new().await;
    let id = app.create_pet("Rex").await;

    let response = app
        .put(&format!("/api/pets/{id}"), &json!({ "adopted": true }))
        .await;
    assert_eq!(response.status().as_u16(), 400);

    let (_, body) = read(app.get("/api/pets").await).await;
    assert_eq!(body["payload"][0]["adopted"], false);
}

#[tokio::test]
async fn should_return_404_for_unknown_pet() {
    let app = TestApp::new().await;
    let unknown = "6f0c9a52-3d0e-4b43-9a57-2a1f1d6f2e11";

    let (status, body) = read(
        app.put(&format!("/api/pets/{unknown}"), &json!({ "name": "Max" }))
            .await,
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Pet not found");

    let (status, _) = read(app.delete(&format!("/api/pets/{unknown}")).await).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn should_delete_pet() {
    let app = TestApp::new().await;
    let id = app.create_pet("Rex").await;

    let (status, body) = read(app.delete(&format!("/api/pets/{id}")).await).await;

    assert_eq!(status, 200);
    assert_eq!(body["message"], "pet deleted");
    let (_, body) = read(app.get("/api/pets").await).await;
    assert!(body["payload"].as_array().unwrap().is_empty());
}
