mod common;

use capacities_mcp::mcp::McpServer;
use capacities_mcp::{ApiClient, CapacitiesError, RequestOptions};
use common::{arguments, clear_env, configure_env, spawn_upstream};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::json;
use serial_test::serial;

const SPACE_ID: &str = "123e4567-e89b-12d3-a456-426614174000";

fn text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        _ => panic!("Expected text content"),
    }
}

#[tokio::test]
#[serial]
async fn test_missing_api_key_sends_nothing() {
    let (base_url, seen) = spawn_upstream(200, "[]").await;
    configure_env(&base_url, None);

    let err = ApiClient::from_env()
        .execute("/spaces", RequestOptions::get())
        .await
        .unwrap_err();
    clear_env();

    assert!(matches!(err, CapacitiesError::Configuration { .. }));
    assert_eq!(
        err.to_string(),
        "CAPACITIES_API_KEY environment variable is required"
    );
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_api_key_is_read_per_request() {
    let (base_url, seen) = spawn_upstream(200, "[]").await;
    configure_env(&base_url, Some("first-key"));

    let client = ApiClient::from_env();
    client.execute("/spaces", RequestOptions::get()).await.unwrap();
    std::env::set_var("CAPACITIES_API_KEY", "rotated-key");
    client.execute("/spaces", RequestOptions::get()).await.unwrap();
    std::env::remove_var("CAPACITIES_API_KEY");
    let err = client
        .execute("/spaces", RequestOptions::get())
        .await
        .unwrap_err();
    clear_env();

    assert!(err.is_configuration());
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer first-key"));
    assert_eq!(seen[1].authorization.as_deref(), Some("Bearer rotated-key"));
}

#[tokio::test]
#[serial]
async fn test_server_from_env_lists_spaces() {
    let (base_url, seen) = spawn_upstream(200, r#"[{"id":"123","title":"My Space"}]"#).await;
    configure_env(&base_url, Some("test-api-key"));

    let server = McpServer::from_env();
    let result = server
        .run_tool("capacities_list_spaces", None)
        .await
        .unwrap();
    clear_env();

    assert_eq!(result.is_error, Some(false));
    assert_eq!(
        text(&result),
        "[\n  {\n    \"id\": \"123\",\n    \"title\": \"My Space\"\n  }\n]"
    );
    let seen = seen.lock().unwrap();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].path_and_query, "/spaces");
}

#[tokio::test]
#[serial]
async fn test_space_info_query_string() {
    let (base_url, seen) = spawn_upstream(200, r#"{"structures":[]}"#).await;
    configure_env(&base_url, Some("key"));

    let result = McpServer::from_env()
        .run_tool(
            "capacities_get_space_info",
            Some(arguments(json!({ "spaceId": SPACE_ID }))),
        )
        .await
        .unwrap();
    clear_env();

    assert_eq!(result.is_error, Some(false));
    assert_eq!(
        seen.lock().unwrap()[0].path_and_query,
        format!("/space-info?spaceid={SPACE_ID}")
    );
}

#[tokio::test]
#[serial]
async fn test_weblink_plain_text_response() {
    let (base_url, seen) = spawn_upstream(200, "OK").await;
    configure_env(&base_url, Some("key"));

    let result = McpServer::from_env()
        .run_tool(
            "capacities_save_weblink",
            Some(arguments(json!({
                "spaceId": SPACE_ID,
                "url": "https://example.com",
                "titleOverwrite": "",
                "tags": ["reading", "rust"]
            }))),
        )
        .await
        .unwrap();
    clear_env();

    assert_eq!(text(&result), "Success: Weblink saved. Response: OK");
    let body: serde_json::Value = serde_json::from_str(&seen.lock().unwrap()[0].body).unwrap();
    assert_eq!(
        body,
        json!({ "spaceId": SPACE_ID, "url": "https://example.com", "tags": ["reading", "rust"] })
    );
}

#[tokio::test]
#[serial]
async fn test_daily_note_server_error_is_tool_error() {
    let (base_url, _seen) = spawn_upstream(500, "Internal Server Error").await;
    configure_env(&base_url, Some("key"));

    let result = McpServer::from_env()
        .run_tool(
            "capacities_save_to_daily_note",
            Some(arguments(json!({ "spaceId": SPACE_ID, "mdText": "Test" }))),
        )
        .await
        .unwrap();
    clear_env();

    assert_eq!(result.is_error, Some(true));
    assert_eq!(
        text(&result),
        "Failed to save to daily note: Capacities API error: 500 Internal Server Error - Internal Server Error"
    );
}

#[tokio::test]
#[serial]
async fn test_identical_calls_issue_identical_requests() {
    let (base_url, seen) = spawn_upstream(200, r#"{"results":[]}"#).await;
    configure_env(&base_url, Some("key"));

    let server = McpServer::from_env();
    let args = json!({ "searchTerm": "notes", "spaceIds": [SPACE_ID] });
    let first = server
        .run_tool("capacities_search", Some(arguments(args.clone())))
        .await
        .unwrap();
    let second = server
        .run_tool("capacities_search", Some(arguments(args)))
        .await
        .unwrap();
    clear_env();

    assert_eq!(text(&first), text(&second));
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0].body, seen[1].body);
    assert_eq!(
        seen[0].body,
        format!(r#"{{"searchTerm":"notes","spaceIds":["{SPACE_ID}"]}}"#)
    );
}
