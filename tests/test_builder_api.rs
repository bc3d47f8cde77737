use fridge_scan::{
    parse_reply, scan_image, FridgeScanner, ProviderConfig, ScanConfig, ScanError,
};
use mockito::{Matcher, Server};
use std::collections::HashMap;

const REPLY_CONTENT: &str =
    "INGREDIENTS FOUND:\\n• Bell Peppers\\n• Rice\\n\\nRECIPES:\\n• Stuffed Peppers\\n  Available ingredients: [Bell Peppers, Rice]\\n  Additional needed: [Cheese]";

fn config_for(server_url: String) -> ScanConfig {
    let mut openai = ProviderConfig::for_model("gpt-4o");
    openai.api_key = Some("test-key".to_string());
    openai.base_url = Some(server_url);

    let mut providers = HashMap::new();
    providers.insert("openai".to_string(), openai);

    ScanConfig {
        providers,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_builder_image_base64_to_parsed_reply() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex("data:image/png;base64,aGVsbG8=".to_string()),
            Matcher::Regex("analyzing pantry contents".to_string()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"choices": [{{"message": {{"content": "{}"}}}}]}}"#,
            REPLY_CONTENT
        ))
        .create_async()
        .await;

    let result = FridgeScanner::builder()
        .image_base64("data:image/png;base64,aGVsbG8=")
        .location("pantry")
        .config(config_for(server.url()))
        .build()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.parsed.ingredients, vec!["Bell Peppers", "Rice"]);
    assert_eq!(result.parsed.recipes, vec!["Stuffed Peppers"]);
    assert_eq!(
        result.parsed.detailed_recipes.unwrap()[0].additional_needed,
        vec!["Cheese"]
    );
    assert!(result.raw_reply.starts_with("INGREDIENTS FOUND:"));
}

#[tokio::test]
async fn test_builder_explicit_overrides() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer override-key")
        .match_body(Matcher::PartialJson(serde_json::json!({"model": "gpt-4o-mini"})))
        .with_status(200)
        .with_body(r#"{"choices": [{"message": {"content": "Eggs\nBaked Eggs"}}]}"#)
        .create_async()
        .await;

    let result = FridgeScanner::builder()
        .image_bytes(vec![0xff, 0xd8, 0xff])
        .config(ScanConfig::default())
        .api_key("override-key")
        .model("gpt-4o-mini")
        .base_url(server.url())
        .build()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(result.parsed.ingredients, vec!["Eggs"]);
    assert_eq!(result.parsed.recipes, vec!["Baked Eggs"]);
}

#[tokio::test]
async fn test_builder_upstream_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .with_body(r#"{"error": {"message": "Incorrect API key"}}"#)
        .create_async()
        .await;

    let result = FridgeScanner::builder()
        .image_base64("aGVsbG8=")
        .config(config_for(server.url()))
        .build()
        .await;

    match result {
        Err(ScanError::UpstreamError { status, .. }) => assert_eq!(status, 401),
        other => panic!("Expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_builder_missing_image_file() {
    let result = FridgeScanner::builder()
        .image("/nonexistent/fridge.jpg")
        .config(config_for("http://127.0.0.1:9".to_string()))
        .build()
        .await;

    assert!(matches!(result, Err(ScanError::ImageError(_))));
}

#[tokio::test]
async fn test_builder_reply_matches_parse_reply() {
    let reply = "Ingredients:\n- Tofu\n- Broccoli\nRecipes:\n- Tofu Stir Fry";

    let result = FridgeScanner::builder().reply(reply).build().await.unwrap();
    assert_eq!(result.parsed, parse_reply(reply));
    assert_eq!(result.raw_reply, reply);
}

#[tokio::test]
async fn test_builder_no_source() {
    let result = FridgeScanner::builder().location("pantry").build().await;

    match result {
        Err(ScanError::BuilderError(message)) => assert!(message.contains("No input source")),
        other => panic!("Expected builder error, got {:?}", other),
    }
}

/// Test convenience function: scan_image
/// This test is ignored by default since it requires an OpenAI API key and a photo
#[tokio::test]
#[ignore]
async fn test_convenience_scan_image() {
    let result = scan_image("demos/fridge.jpg").await;
    assert!(result.is_ok());
}
