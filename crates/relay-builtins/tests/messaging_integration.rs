#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Integration tests for relay-builtins.
//!
//! Runs the six messaging tools through a [`SkillRegistry`] against a local
//! mock of the Slack Web API and a Discord webhook.

use relay_builtins::*;
use relay_core::{Credentials, MessagingConfig, ToolCall, ToolResult};
use relay_skills::SkillRegistry;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry_for(server: &MockServer) -> SkillRegistry {
    let config = MessagingConfig::new(
        Credentials::default()
            .with_slack_bot_token("xoxb-test")
            .with_discord_webhook_url(format!("{}/api/webhooks/1/token", server.uri())),
    )
    .with_slack_api_base(server.uri());

    let mut registry = SkillRegistry::new();
    register_messaging_tools(&mut registry, CredentialSource::Fixed(config));
    registry
}

fn unconfigured_registry() -> SkillRegistry {
    let mut registry = SkillRegistry::new();
    register_messaging_tools(
        &mut registry,
        CredentialSource::Fixed(MessagingConfig::default()),
    );
    registry
}

async fn call(registry: &SkillRegistry, tool: &str, arguments: Value) -> (ToolResult, Value) {
    let result = registry
        .execute(ToolCall::new("call-1", tool, arguments))
        .await
        .unwrap();
    let json = result.json().unwrap();
    (result, json)
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.map_or(0, |r| r.len())
}

// ---------------------------------------------------------------------------
// 1. Registry completeness
// ---------------------------------------------------------------------------

#[test]
fn register_messaging_tools_registers_six() {
    let registry = unconfigured_registry();
    let names: Vec<_> = registry
        .list_descriptors()
        .iter()
        .map(|d| d.name.clone())
        .collect();
    assert_eq!(
        names,
        [
            "messaging_list_channels",
            "messaging_react",
            "messaging_read",
            "messaging_send",
            "messaging_upload",
            "messaging_validate",
        ]
    );
}

#[test]
fn descriptors_declare_required_arguments() {
    let registry = unconfigured_registry();
    let send = registry.get("messaging_send").unwrap().descriptor();
    assert_eq!(send.parameters_schema["required"], json!(["platform", "message"]));
    let read = registry.get("messaging_read").unwrap().descriptor();
    assert_eq!(read.parameters_schema["properties"]["limit"]["maximum"], 100);
}

// ---------------------------------------------------------------------------
// 2. Pre-flight failures (no network)
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_platform_is_validation_error() {
    let server = MockServer::start().await;
    let registry = registry_for(&server);

    let (result, json) = call(
        &registry,
        "messaging_send",
        json!({"platform": "teams", "message": "hi"}),
    )
    .await;

    assert!(result.is_error);
    assert_eq!(json["success"], false);
    assert_eq!(json["kind"], "validation");
    assert!(json["error"].as_str().unwrap().contains("teams"));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn missing_platform_is_validation_error() {
    let registry = unconfigured_registry();
    let (result, json) = call(&registry, "messaging_validate", json!({})).await;
    assert!(result.is_error);
    assert_eq!(json["valid"], false);
    assert_eq!(json["error"], "Unknown platform: . Use 'slack' or 'discord'.");
}

#[tokio::test]
async fn missing_token_is_configuration_error() {
    let registry = unconfigured_registry();
    let (result, json) = call(
        &registry,
        "messaging_send",
        json!({"platform": "slack", "message": "hi", "channel": "C1"}),
    )
    .await;

    assert!(result.is_error);
    assert_eq!(json["kind"], "configuration_missing");
    assert_eq!(json["error"], "SLACK_BOT_TOKEN environment variable not set");
    assert_eq!(json["help"], "Get a bot token at https://api.slack.com/apps");
}

#[tokio::test]
async fn discord_read_react_list_are_unsupported() {
    let server = MockServer::start().await;
    let registry = registry_for(&server);

    for (tool, args) in [
        ("messaging_read", json!({"platform": "discord", "channel": "C1"})),
        (
            "messaging_react",
            json!({"platform": "discord", "channel": "C1", "message_id": "1", "emoji": "eyes"}),
        ),
        ("messaging_list_channels", json!({"platform": "discord"})),
    ] {
        let (result, json) = call(&registry, tool, args).await;
        assert!(result.is_error, "{tool} should fail");
        assert_eq!(json["kind"], "capability_unsupported");
        assert!(json["error"].as_str().unwrap().contains("webhooks can only send"));
    }
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn empty_upload_content_rejected() {
    let server = MockServer::start().await;
    let registry = registry_for(&server);

    let (result, json) = call(
        &registry,
        "messaging_upload",
        json!({"platform": "discord", "filename": "a.txt", "content": ""}),
    )
    .await;
    assert!(result.is_error);
    assert_eq!(json["error"], "Content is required");
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn unknown_tool_is_an_error() {
    let registry = unconfigured_registry();
    let err = registry
        .execute(ToolCall::new("call-1", "messaging_delete", json!({})))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Unknown skill: messaging_delete"));
}

// ---------------------------------------------------------------------------
// 3. Happy paths
// ---------------------------------------------------------------------------

#[tokio::test]
async fn discord_send_without_channel_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/webhooks/1/token"))
        .and(body_partial_json(json!({"content": "hi"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "77", "channel_id": "5"})))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let (result, json) = call(
        &registry,
        "messaging_send",
        json!({"platform": "discord", "message": "hi"}),
    )
    .await;

    assert!(!result.is_error);
    assert_eq!(result.call_id, "call-1");
    assert_eq!(json["success"], true);
    assert_eq!(json["message_id"], "77");
}

#[tokio::test]
async fn slack_read_clamps_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .and(query_param("channel", "C123"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "messages": [{"user": "U1", "text": "hello", "ts": "1700000000.000100"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let (result, json) = call(
        &registry,
        "messaging_read",
        json!({"channel": "C123", "limit": 150}),
    )
    .await;

    assert!(!result.is_error);
    assert_eq!(json["count"], 1);
    assert_eq!(json["messages"][0]["author"], "U1");
    assert_eq!(json["messages"][0]["content"], "hello");
    assert_eq!(json["messages"][0]["id"], "1700000000.000100");
}

#[tokio::test]
async fn slack_read_clamps_string_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.history"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "messages": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let (result, json) = call(
        &registry,
        "messaging_read",
        json!({"channel": "C123", "limit": "150"}),
    )
    .await;

    assert!(!result.is_error);
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn slack_send_backend_error_is_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat.postMessage"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": false, "error": "not_in_channel"})),
        )
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let (result, json) = call(
        &registry,
        "messaging_send",
        json!({"platform": "slack", "message": "hi", "channel": "C9"}),
    )
    .await;

    assert!(result.is_error);
    assert_eq!(json["code"], "not_in_channel");
    assert_eq!(json["kind"], "backend");
}

#[tokio::test]
async fn slack_list_channels_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/conversations.list"))
        .and(query_param("types", "public_channel"))
        .and(query_param("limit", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "channels": [{"id": "C1", "name": "general", "is_private": false}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let (result, json) = call(&registry, "messaging_list_channels", json!({})).await;
    assert!(!result.is_error);
    assert_eq!(json["channels"][0]["name"], "general");
}

#[tokio::test]
async fn slack_validate_twice_gives_same_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth.test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "user": "relaybot",
            "user_id": "U0",
            "team": "Acme",
            "team_id": "T0"
        })))
        .expect(2)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let (_, first) = call(&registry, "messaging_validate", json!({"platform": "slack"})).await;
    let (_, second) = call(&registry, "messaging_validate", json!({"platform": "slack"})).await;
    assert_eq!(first, second);
    assert_eq!(first["valid"], true);
    assert_eq!(first["team"], "Acme");
}

#[tokio::test]
async fn slack_react_with_colons() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/reactions.add"))
        .and(body_partial_json(json!({"name": "tada"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);
    let (result, json) = call(
        &registry,
        "messaging_react",
        json!({"channel": "C1", "message_id": "1.2", "emoji": ":tada:"}),
    )
    .await;
    assert!(!result.is_error);
    assert_eq!(json["emoji"], "tada");
    assert!(json.get("note").is_none());
}
