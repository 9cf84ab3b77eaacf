use crate::helpers::{TestApp, read};

#[tokio::test]
async fn should_generate_default_number_of_available_pets() {
    let app = TestApp::new().await;

    let (status, body) = read(app.get("/api/mocks/mockingpets").await).await;

    assert_eq!(status, 200);
    let pets = body["payload"].as_array().unwrap();
    assert_eq!(pets.len(), 10);
    assert!(pets.iter().all(|pet| pet["adopted"] == false && pet["owner"].is_null()));

    // Nothing is persisted
    let (_, body) = read(app.get("/api/pets").await).await;
    assert!(body["payload"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_generate_users_without_password_hashes() {
    let app = TestApp::new().await;

    let (status, body) = read(app.get("/api/mocks/mockingusers?quantity=2").await).await;

    assert_eq!(status, 200);
    let users = body["payload"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user["role"] == "user" || user["role"] == "admin");
        assert!(user["pets"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn should_reject_invalid_quantities() {
    let app = TestApp::new().await;
    let test_cases = [
        "/api/mocks/mockingpets?quantity=-1",
        "/api/mocks/mockingpets?quantity=ten",
        "/api/mocks/mockingusers?quantity=-5",
        "/api/mocks/generateData?users=2",
        "/api/mocks/generateData?users=x&pets=1",
    ];

    for test_case in test_cases {
        let (status, body) = read(app.get(test_case).await).await;

        assert_eq!(status, 400, "Failed for input: {test_case}");
        assert_eq!(body["status"], "error");
    }
}

#[tokio::test]
async fn should_insert_generated_data() {
    let app = TestApp::new().await;

    let (status, body) = read(app.get("/api/mocks/generateData?users=2&pets=3").await).await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "success");
    assert_eq!(body["insertedUsers"].as_array().unwrap().len(), 2);
    assert_eq!(body["insertedPets"].as_array().unwrap().len(), 3);

    let (_, users) = read(app.get("/api/users").await).await;
    assert_eq!(users["payload"].as_array().unwrap().len(), 2);
    let (_, pets) = read(app.get("/api/pets").await).await;
    assert_eq!(pets["payload"].as_array().unwrap().len(), 3);
}
