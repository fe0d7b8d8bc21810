//! Panel client against a mock backend.

use botkit_clients::panel::{
    Allocation, FeatureLimits, Limits, NewServer, NewUser, PowerAction,
};
use botkit_clients::{PanelClient, PanelError};
use botkit_core::{FetchConfig, PanelConfig};
use botkit_fetch::{HttpMethod, RequestBody};
use serde_json::{json, Map};
use std::sync::Arc;

mod common;

use common::MockBackend;

const BASE: &str = "https://panel.example.com";

const USER: &str = r#"{"object": "user", "attributes": {
    "id": 4, "uuid": "u-4", "username": "ann", "email": "ann@example.com",
    "first_name": "ann", "last_name": "ann", "root_admin": false
}}"#;

const SERVER: &str = r#"{"object": "server", "attributes": {
    "id": 9, "uuid": "s-9", "identifier": "1a2b3c4d", "name": "survival",
    "suspended": false, "user": 4, "limits": {"memory": 2048, "swap": 0, "disk": 10240, "io": 500, "cpu": 100}
}}"#;

fn client(backend: &Arc<MockBackend>) -> PanelClient {
    PanelClient::with_fetcher(backend.fetcher(BASE), "ptla_secret")
}

#[tokio::test]
async fn test_list_users_unwraps_envelope() {
    let backend = MockBackend::json(200, &format!(r#"{{"object": "list", "data": [{USER}]}}"#));
    let users = client(&backend).list_users().await.unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "ann@example.com");

    let request = backend.only_request();
    assert_eq!(request.url.as_str(), "https://panel.example.com/api/application/users");
    assert_eq!(request.header("authorization"), Some("Bearer ptla_secret"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_get_user_not_found() {
    let backend = MockBackend::json(404, r#"{"errors": [{"code": "NotFoundHttpException"}]}"#);
    let err = client(&backend).get_user(77).await.unwrap_err();

    assert!(matches!(err, PanelError::NotFound(body) if body.contains("NotFoundHttpException")));
    assert!(backend.only_request().url.path().ends_with("/users/77"));
}

#[tokio::test]
async fn test_create_user_posts_payload() {
    let backend = MockBackend::json(201, USER);
    let user = client(&backend)
        .create_user(&NewUser::new("ann@example.com", "ann"))
        .await
        .unwrap();

    assert_eq!(user.id, 4);

    let request = backend.only_request();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.header("content-type"), Some("application/json"));
    match request.body {
        Some(RequestBody::Json(body)) => {
            assert_eq!(body["email"], "ann@example.com");
            assert_eq!(body["username"], "ann");
        }
        other => panic!("expected JSON body, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_user_validation_error() {
    let backend = MockBackend::json(422, r#"{"errors": [{"detail": "email taken"}]}"#);
    let err = client(&backend)
        .create_user(&NewUser::new("ann@example.com", "ann"))
        .await
        .unwrap_err();

    assert!(matches!(err, PanelError::Validation(body) if body.contains("email taken")));
}

#[tokio::test]
async fn test_delete_user_accepts_no_content() {
    let backend = MockBackend::no_content();
    client(&backend).delete_user(4).await.unwrap();

    let request = backend.only_request();
    assert_eq!(request.method, HttpMethod::Delete);
    assert!(request.url.path().ends_with("/api/application/users/4"));
}

#[tokio::test]
async fn test_server_lifecycle() {
    let backend = MockBackend::new(vec![
        botkit_fetch::RawResponse::new(201, Some("application/json"), SERVER),
        botkit_fetch::RawResponse::new(200, Some("application/json"), SERVER),
        botkit_fetch::RawResponse::new(
            200,
            Some("application/json"),
            format!(r#"{{"object": "list", "data": [{SERVER}]}}"#),
        ),
        botkit_fetch::RawResponse::new(204, None, Vec::new()),
        botkit_fetch::RawResponse::new(204, None, Vec::new()),
        botkit_fetch::RawResponse::new(204, None, Vec::new()),
    ]);
    let panel = client(&backend);

    let new_server = NewServer {
        name: "survival".to_string(),
        user: 4,
        egg: 1,
        docker_image: "ghcr.io/example/java:17".to_string(),
        startup: "java -jar server.jar".to_string(),
        environment: Map::new(),
        limits: Limits {
            memory: 2048,
            swap: 0,
            disk: 10240,
            io: 500,
            cpu: 100,
        },
        feature_limits: FeatureLimits::default(),
        allocation: Allocation { default: 12 },
    };

    let created = panel.create_server(&new_server).await.unwrap();
    assert_eq!(created.identifier, "1a2b3c4d");
    assert_eq!(panel.get_server(created.id).await.unwrap().limits.memory, 2048);
    assert_eq!(panel.list_servers().await.unwrap().len(), 1);
    panel.suspend_server(9).await.unwrap();
    panel.unsuspend_server(9).await.unwrap();
    panel.delete_server(9).await.unwrap();

    let paths: Vec<(HttpMethod, String)> = backend
        .requests()
        .into_iter()
        .map(|r| (r.method, r.url.path().to_string()))
        .collect();
    assert_eq!(
        paths,
        [
            (HttpMethod::Post, "/api/application/servers".to_string()),
            (HttpMethod::Get, "/api/application/servers/9".to_string()),
            (HttpMethod::Get, "/api/application/servers".to_string()),
            (HttpMethod::Post, "/api/application/servers/9/suspend".to_string()),
            (HttpMethod::Post, "/api/application/servers/9/unsuspend".to_string()),
            (HttpMethod::Delete, "/api/application/servers/9".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_power_action_uses_client_api() {
    let backend = MockBackend::no_content();
    client(&backend)
        .send_power_action("1a2b3c4d", PowerAction::Restart)
        .await
        .unwrap();

    let request = backend.only_request();
    assert_eq!(request.url.path(), "/api/client/servers/1a2b3c4d/power");
    assert_eq!(request.body, Some(RequestBody::Json(json!({ "signal": "restart" }))));
}

#[tokio::test]
async fn test_calls_are_not_retried() {
    let backend = MockBackend::json(503, "maintenance");
    let err = client(&backend).delete_server(9).await.unwrap_err();

    assert_eq!(backend.requests().len(), 1);
    match err {
        PanelError::Fetch(e) => assert_eq!(e.status(), Some(503)),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_key() {
    let backend = MockBackend::json(401, "Unauthenticated.");
    let err = client(&backend).list_users().await.unwrap_err();
    assert!(matches!(err, PanelError::AuthenticationFailed(_)));
}

#[test]
fn test_from_config_requires_url_and_key() {
    let fetch = FetchConfig::default();

    let missing_url = PanelConfig {
        base_url: None,
        api_key_env: "BOTKIT_TEST_PANEL_KEY_UNSET".to_string(),
    };
    assert!(matches!(
        PanelClient::from_config(&missing_url, &fetch),
        Err(PanelError::MissingBaseUrl)
    ));

    let missing_key = PanelConfig {
        base_url: Some(BASE.to_string()),
        api_key_env: "BOTKIT_TEST_PANEL_KEY_UNSET".to_string(),
    };
    assert!(matches!(
        PanelClient::from_config(&missing_key, &fetch),
        Err(PanelError::MissingApiKey(var)) if var == "BOTKIT_TEST_PANEL_KEY_UNSET"
    ));
}
