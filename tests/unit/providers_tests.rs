/*!
 * Tests for provider implementations
 */

use serde_json::json;
use video2script::errors::ProviderError;
use video2script::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};
use video2script::providers::Provider;

#[test]
fn test_openAIRequest_builder_shouldSerializeChatBody() {
    let request = OpenAIRequest::new("deepseek-chat")
        .add_message("user", "你好")
        .temperature(0.3)
        .max_tokens(4000);

    let body = serde_json::to_value(&request).unwrap();

    assert_eq!(body["model"], "deepseek-chat");
    assert_eq!(body["messages"], json!([{"role": "user", "content": "你好"}]));
    assert_eq!(body["max_tokens"], 4000);
    assert!((body["temperature"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}

#[test]
fn test_openAIRequest_withoutSampling_shouldOmitOptionalFields() {
    let body = serde_json::to_value(OpenAIRequest::new("m")).unwrap();

    assert!(body.get("temperature").is_none());
    assert!(body.get("max_tokens").is_none());
}

#[test]
fn test_completionsUrl_shouldAppendRouteOnce() {
    assert_eq!(
        OpenAI::new("k", "https://api.deepseek.com").completions_url(),
        "https://api.deepseek.com/v1/chat/completions"
    );
    assert_eq!(
        OpenAI::new("k", "http://localhost:1234/v1/").completions_url(),
        "http://localhost:1234/v1/chat/completions"
    );
    assert_eq!(OpenAI::new("k", "").completions_url(), "https://api.openai.com/v1/chat/completions");
}

#[test]
fn test_extractText_shouldReturnFirstChoice() {
    let response: OpenAIResponse = serde_json::from_value(json!({
        "choices": [
            {"message": {"role": "assistant", "content": "第一"}},
            {"message": {"role": "assistant", "content": "第二"}}
        ],
        "usage": {"prompt_tokens": 10, "completion_tokens": 2}
    }))
    .unwrap();

    assert_eq!(OpenAI::extract_text(&response).unwrap(), "第一");
    assert_eq!(response.usage.unwrap().completion_tokens, 2);
}

#[test]
fn test_extractText_withNoChoices_shouldFail() {
    let response: OpenAIResponse = serde_json::from_value(json!({})).unwrap();

    assert!(matches!(OpenAI::extract_text(&response), Err(ProviderError::ParseError(_))));
}

#[tokio::test]
async fn test_complete_withUnreachableEndpoint_shouldReturnError() {
    // Port 9 (discard) is not expected to serve HTTP locally
    let client = OpenAI::new_with_timeout("k", "http://127.0.0.1:9", 5);

    let result = client.complete(OpenAIRequest::new("m").add_message("user", "hi")).await;

    assert!(matches!(result, Err(ProviderError::ConnectionError(_))));
}

#[tokio::test]
async fn test_complete_withMalformedEndpoint_shouldReturnRequestFailed() {
    let client = OpenAI::new("k", "not a url");

    let result = client.complete(OpenAIRequest::new("m").add_message("user", "hi")).await;

    assert!(matches!(result, Err(ProviderError::RequestFailed(_))));
}
