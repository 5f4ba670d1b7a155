//! Connection and recipe-sharing tests.

mod helpers;

use axum::http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

async fn connect(app: &TestApp, from: &str, to: &Value) -> helpers::TestResponse {
    app.request(
        "POST",
        &format!("/api/connections?email={}", helpers::encode(from)),
        Some(json!({ "target_user_uuid": to["uuid"] })),
    )
    .await
}

fn names(body: &Value) -> Vec<String> {
    body["recipeData"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_connection_shares_recipes_one_way() {
    let app = TestApp::new().await;
    app.login("alice@example.com").await;
    let bob = app.login("bob@example.com").await;
    app.create_recipe("alice@example.com", "Alice Soup", "").await;
    app.create_recipe("bob@example.com", "Bob Stew", "").await;

    let bob_before = app
        .request("GET", "/api/recipes?email=bob%40example.com", None)
        .await;
    assert_eq!(names(&bob_before.body), ["Bob Stew"]);

    let response = connect(&app, "alice@example.com", &bob).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let bob_after = app
        .request("GET", "/api/recipes?email=bob%40example.com", None)
        .await;
    let mut visible = names(&bob_after.body);
    visible.sort();
    assert_eq!(visible, ["Alice Soup", "Bob Stew"]);

    let alice = app
        .request("GET", "/api/recipes?email=alice%40example.com", None)
        .await;
    assert_eq!(names(&alice.body), ["Alice Soup"]);
}

#[tokio::test]
async fn test_list_connections_by_direction() {
    let app = TestApp::new().await;
    let alice = app.login("alice@example.com").await;
    let bob = app.login("bob@example.com").await;
    connect(&app, "alice@example.com", &bob).await;

    let alice_uuid = alice["uuid"].as_str().unwrap();
    let bob_uuid = bob["uuid"].as_str().unwrap();

    let outgoing = app
        .request("GET", &format!("/api/connections?user_uuid={alice_uuid}"), None)
        .await;
    assert_eq!(outgoing.status, StatusCode::OK);
    assert_eq!(outgoing.body["connections"][0]["email"], "bob@example.com");

    let incoming = app
        .request(
            "GET",
            &format!("/api/connections?user_uuid={bob_uuid}&direction=incoming"),
            None,
        )
        .await;
    assert_eq!(incoming.body["connections"][0]["email"], "alice@example.com");

    let none = app
        .request(
            "GET",
            &format!("/api/connections?user_uuid={bob_uuid}&direction=outgoing"),
            None,
        )
        .await;
    assert_eq!(none.body["connections"], json!([]));

    let invalid = app
        .request(
            "GET",
            &format!("/api/connections?user_uuid={bob_uuid}&direction=sideways"),
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.error(), "invalid direction");
}

#[tokio::test]
async fn test_duplicate_connection_is_idempotent() {
    let app = TestApp::new().await;
    let alice = app.login("alice@example.com").await;
    let bob = app.login("bob@example.com").await;

    assert_eq!(connect(&app, "alice@example.com", &bob).await.status, StatusCode::OK);
    assert_eq!(connect(&app, "alice@example.com", &bob).await.status, StatusCode::OK);

    let outgoing = app
        .request(
            "GET",
            &format!("/api/connections?user_uuid={}", alice["uuid"].as_str().unwrap()),
            None,
        )
        .await;
    assert_eq!(outgoing.body["connections"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_connection_errors() {
    let app = TestApp::new().await;
    let alice = app.login("alice@example.com").await;

    let missing_email = app
        .request(
            "POST",
            "/api/connections",
            Some(json!({ "target_user_uuid": alice["uuid"] })),
        )
        .await;
    assert_eq!(missing_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_email.error(), "email is required");

    let unknown_caller = connect(&app, "ghost@example.com", &alice).await;
    assert_eq!(unknown_caller.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_caller.error(), "invalid user");

    let missing_target = app
        .request(
            "POST",
            "/api/connections?email=alice%40example.com",
            Some(json!({})),
        )
        .await;
    assert_eq!(missing_target.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing_target.error(), "target_user_uuid is required");

    let to_self = connect(&app, "alice@example.com", &alice).await;
    assert_eq!(to_self.status, StatusCode::BAD_REQUEST);
    assert_eq!(to_self.error(), "cannot connect to yourself");

    let unknown_target = connect(
        &app,
        "alice@example.com",
        &json!({ "uuid": uuid::Uuid::new_v4() }),
    )
    .await;
    assert_eq!(unknown_target.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown_target.error(), "target user not found");
}

#[tokio::test]
async fn test_bidirectional_delete_removes_both_edges() {
    let app = TestApp::new().await;
    let alice = app.login("alice@example.com").await;
    let bob = app.login("bob@example.com").await;
    connect(&app, "alice@example.com", &bob).await;
    connect(&app, "bob@example.com", &alice).await;

    let bob_uuid = bob["uuid"].as_str().unwrap();
    let alice_uuid = alice["uuid"].as_str().unwrap();

    let deleted = app
        .request(
            "DELETE",
            &format!(
                "/api/connections?email=alice%40example.com&target_user_uuid={bob_uuid}&bidirectional=true"
            ),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    for user in [alice_uuid, bob_uuid] {
        let outgoing = app
            .request("GET", &format!("/api/connections?user_uuid={user}"), None)
            .await;
        assert_eq!(outgoing.body["connections"], json!([]));
    }
}

#[tokio::test]
async fn test_one_way_delete_keeps_reverse_edge() {
    let app = TestApp::new().await;
    let alice = app.login("alice@example.com").await;
    let bob = app.login("bob@example.com").await;
    connect(&app, "alice@example.com", &bob).await;
    connect(&app, "bob@example.com", &alice).await;

    let bob_uuid = bob["uuid"].as_str().unwrap();
    app.request(
        "DELETE",
        &format!("/api/connections?email=alice%40example.com&target_user_uuid={bob_uuid}"),
        None,
    )
    .await;

    let bob_outgoing = app
        .request("GET", &format!("/api/connections?user_uuid={bob_uuid}"), None)
        .await;
    assert_eq!(bob_outgoing.body["connections"][0]["email"], "alice@example.com");

    let invalid = app
        .request(
            "DELETE",
            &format!(
                "/api/connections?email=alice%40example.com&target_user_uuid={bob_uuid}&bidirectional=maybe"
            ),
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.error(), "invalid bidirectional flag");
}
