use adoptme_core::{Dao, Pet, PetId};
use serde_json::Value;

use crate::helpers::{TestApp, read};

const UNKNOWN_ID: &str = "6f0c9a52-3d0e-4b43-9a57-2a1f1d6f2e11";

#[tokio::test]
async fn should_adopt_available_pet() {
    let app = TestApp::new().await;
    let uid = app.register_user("ada@example.com").await;
    let pid = app.create_pet("Rex").await;

    let (status, body) = read(
        app.post(&format!("/api/adoptions/{uid}/{pid}"), &Value::Null)
            .await,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["message"], "Pet adopted");

    let (_, body) = read(app.get(&format!("/api/users/{uid}")).await).await;
    assert_eq!(body["payload"]["pets"], serde_json::json!([pid]));

    let (_, body) = read(app.get("/api/pets").await).await;
    assert_eq!(body["payload"][0]["adopted"], true);
    assert_eq!(body["payload"][0]["owner"], uid);

    let (_, body) = read(app.get("/api/adoptions").await).await;
    let adoptions = body["payload"].as_array().unwrap();
    assert_eq!(adoptions.len(), 1);
    assert_eq!(adoptions[0]["owner"], uid);
    assert_eq!(adoptions[0]["pet"], pid);

    let aid = adoptions[0]["id"].as_str().unwrap();
    let (status, body) = read(app.get(&format!("/api/adoptions/{aid}")).await).await;
    assert_eq!(status, 200);
    assert_eq!(body["payload"]["pet"], pid);
}

#[tokio::test]
async fn should_reject_second_adoption_of_same_pet() {
    let app = TestApp::new().await;
    let first = app.register_user("ada@example.com").await;
    let second = app.register_user("grace@example.com").await;
    let pid = app.create_pet("Rex").await;

    app.post(&format!("/api/adoptions/{first}/{pid}"), &Value::Null)
        .await;
    let (status, body) = read(
        app.post(&format!("/api/adoptions/{second}/{pid}"), &Value::Null)
            .await,
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "Pet is already adopted");

    let (_, body) = read(app.get("/api/adoptions").await).await;
    assert_eq!(body["payload"].as_array().unwrap().len(), 1);
    let (_, body) = read(app.get(&format!("/api/users/{second}")).await).await;
    assert!(body["payload"]["pets"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_404_for_unknown_user_or_pet() {
    let app = TestApp::new().await;
    let uid = app.register_user("ada@example.com").await;
    let pid = app.create_pet("Rex").await;

    let (status, body) = read(
        app.post(&format!("/api/adoptions/{UNKNOWN_ID}/{pid}"), &Value::Null)
            .await,
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "User Not found");

    let (status, body) = read(
        app.post(&format!("/api/adoptions/{uid}/{UNKNOWN_ID}"), &Value::Null)
            .await,
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Pet not found");

    let (_, body) = read(app.get("/api/adoptions").await).await;
    assert!(body["payload"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn should_return_404_for_unknown_adoption() {
    let app = TestApp::new().await;

    let (status, body) = read(app.get(&format!("/api/adoptions/{UNKNOWN_ID}")).await).await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "Adoption not found");
}

#[tokio::test]
async fn should_let_exactly_one_concurrent_adoption_win() {
    let app = TestApp::new().await;
    let pid = app.create_pet("Rex").await;
    let mut users = Vec::new();
    for i in 0..5 {
        users.push(app.register_user(&format!("user{i}@example.com")).await);
    }

    let handles: Vec<_> = users
        .iter()
        .map(|uid| {
            tokio::spawn(
                app.http_client
                    .post(format!("{}/api/adoptions/{uid}/{pid}", app.address))
                    .send(),
            )
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        if response.status().as_u16() == 200 {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);

    let pet_id = PetId::parse(&pid).unwrap();
    let pets = Dao::<Pet>::get_all(&app.store).await.unwrap();
    let pet = pets.iter().find(|p| p.id() == &pet_id).unwrap();
    assert!(pet.adopted());
}
