//! 実ルーターを一時ポートで起動し、HTTP 越しに仕様どおり振る舞うか確認する。

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};

use api_server::config::AppConfig;
use api_server::server::cors::cors_layer;
use api_server::server::router::{create_router, AppState};
use infrastructure::contact_store::SqliteContactStore;

struct TestApp {
    addr: SocketAddr,
    client: reqwest::Client,
    _tmp: tempfile::TempDir,
}

impl TestApp {
    fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }
}

async fn spawn_app() -> TestApp {
    let tmp = tempfile::TempDir::new().expect("Failed to create temp dir");
    let db_path = tmp.path().join("contacts.db");
    let store = Arc::new(
        SqliteContactStore::new(db_path.to_str().expect("Invalid path"))
            .await
            .expect("Failed to open test store"),
    );

    let cfg = AppConfig {
        database_path: db_path.display().to_string(),
        allowed_dev_origin: "http://localhost:5173".to_string(),
        allowed_origin_suffix: ".vercel.app".to_string(),
    };
    let state = Arc::new(AppState { store });
    let app = create_router(state, cors_layer(&cfg));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind ephemeral port");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server crashed");
    });

    TestApp {
        addr,
        client: reqwest::Client::new(),
        _tmp: tmp,
    }
}

fn valid_payload(name: &str, phone: &str) -> Value {
    json!({
        "name": name,
        "email": "Asha@Example.COM",
        "phone": phone,
        "message": "Namaste"
    })
}

#[tokio::test]
async fn create_then_list_roundtrip() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/api/contacts"))
        .json(&valid_payload("Asha Rao", "9876543210"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.unwrap();
    let created = &body["data"];
    assert!(created["id"].as_str().is_some());
    assert_eq!(created["name"], "Asha Rao");
    // 保存時に小文字化される
    assert_eq!(created["email"], "asha@example.com");
    assert!(created["createdAt"].as_str().is_some());
    assert!(created["updatedAt"].as_str().is_some());

    let res = app.client.get(app.url("/api/contacts")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], created["id"]);
}

#[tokio::test]
async fn validation_failure_is_400_with_message() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/api/contacts"))
        .json(&json!({ "name": "A" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("Contact validation failed"));
    assert!(message.contains("email"));
    assert!(message.contains("phone"));

    // 何も保存されていない
    let res = app.client.get(app.url("/api/contacts")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn delete_flow_200_then_404() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/api/contacts"))
        .json(&valid_payload("Asha Rao", "9876543210"))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let res = app
        .client
        .delete(app.url(&format!("/api/contacts/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Deleted successfully");

    // 同じ ID の再削除は 404
    let res = app
        .client
        .delete(app.url(&format!("/api/contacts/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Contact not found");

    // 不正形式の ID も 404
    let res = app
        .client
        .delete(app.url("/api/contacts/not-a-real-id"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = spawn_app().await;

    for (name, phone) in [
        ("First Person", "9000000001"),
        ("Second Person", "9000000002"),
        ("Third Person", "9000000003"),
    ] {
        let res = app
            .client
            .post(app.url("/api/contacts"))
            .json(&valid_payload(name, phone))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 201);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let res = app.client.get(app.url("/api/contacts")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third Person", "Second Person", "First Person"]);
}

#[tokio::test]
async fn cors_allows_dev_and_deploy_origins_only() {
    let app = spawn_app().await;

    let allow_origin = |res: &reqwest::Response| {
        res.headers()
            .get("access-control-allow-origin")
            .map(|v| v.to_str().unwrap().to_string())
    };

    let res = app
        .client
        .get(app.url("/api/contacts"))
        .header("Origin", "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(allow_origin(&res).as_deref(), Some("http://localhost:5173"));

    let res = app
        .client
        .get(app.url("/api/contacts"))
        .header("Origin", "https://myapp.vercel.app")
        .send()
        .await
        .unwrap();
    assert_eq!(allow_origin(&res).as_deref(), Some("https://myapp.vercel.app"));

    // 許可外オリジンには許可ヘッダを返さない (ブラウザ側でブロックされる)
    let res = app
        .client
        .get(app.url("/api/contacts"))
        .header("Origin", "https://evil.example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(allow_origin(&res), None);

    // Origin ヘッダなし (非ブラウザクライアント) は常に通る
    let res = app.client.get(app.url("/api/contacts")).send().await.unwrap();
    assert_eq!(res.status(), 200);
}
