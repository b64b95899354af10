/*!
 * Tests for best-effort text optimization
 */

use std::time::Duration;
use video2script::providers::mock::MockProvider;
use video2script::script::optimizer::build_prompt;
use video2script::script::{OptimizationOutcome, PassthroughOptimizer, RemoteOptimizer, TextOptimizer};

const RAW: &str = "首先打开电源。第一步检查状态。";

#[tokio::test]
async fn test_remoteOptimizer_withWorkingProvider_shouldReturnOptimizedText() {
    let optimizer = RemoteOptimizer::new(
        MockProvider::working().with_custom_response(|_| "优化后的文本。".to_string()),
        "mock-model",
    );

    let outcome = optimizer.optimize(RAW).await;

    assert_eq!(outcome, OptimizationOutcome::Optimized("优化后的文本。".to_string()));
}

#[tokio::test]
async fn test_remoteOptimizer_withFailingProvider_shouldFallBackToOriginal() {
    let optimizer = RemoteOptimizer::new(MockProvider::failing(), "mock-model");

    let outcome = optimizer.optimize(RAW).await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.into_text(), RAW);
}

#[tokio::test]
async fn test_remoteOptimizer_withEmptyResponse_shouldFallBackToOriginal() {
    let optimizer = RemoteOptimizer::new(MockProvider::empty(), "mock-model");

    let outcome = optimizer.optimize(RAW).await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.into_text(), RAW);
}

#[tokio::test]
async fn test_remoteOptimizer_withBlankMessage_shouldFallBackToOriginal() {
    let optimizer = RemoteOptimizer::new(
        MockProvider::working().with_custom_response(|_| "   ".to_string()),
        "mock-model",
    );

    let outcome = optimizer.optimize(RAW).await;

    assert!(outcome.is_fallback());
    assert_eq!(outcome.into_text(), RAW);
}

#[tokio::test]
async fn test_remoteOptimizer_withSlowProvider_shouldTimeOutAndFallBack() {
    let optimizer = RemoteOptimizer::new(MockProvider::slow(2_000), "mock-model")
        .with_timeout(Duration::from_millis(50));

    let outcome = optimizer.optimize(RAW).await;

    match outcome {
        OptimizationOutcome::Fallback { original, reason } => {
            assert_eq!(original, RAW);
            assert!(reason.contains("timed out"), "unexpected reason: {}", reason);
        }
        other => panic!("expected a fallback, got {:?}", other),
    }
}

#[tokio::test]
async fn test_remoteOptimizer_shouldSendOneRequestPerCall() {
    let provider = MockProvider::failing();
    let optimizer = RemoteOptimizer::new(provider.clone(), "mock-model");

    let _ = optimizer.optimize(RAW).await;

    // No retries
    assert_eq!(provider.request_count(), 1);
}

#[test]
fn test_buildRequest_shouldCarryPromptAndSamplingSettings() {
    let optimizer = RemoteOptimizer::new(MockProvider::working(), "deepseek-chat")
        .with_temperature(0.3)
        .with_max_tokens(4000);

    let request = optimizer.build_request(RAW);

    assert_eq!(request.model, "deepseek-chat");
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.messages[0].role, "user");
    assert_eq!(request.messages[0].content, build_prompt(RAW));
    assert_eq!(request.temperature, Some(0.3));
    assert_eq!(request.max_tokens, Some(4000));
}

#[test]
fn test_buildPrompt_shouldEmbedRawText() {
    let prompt = build_prompt(RAW);

    assert!(prompt.contains(RAW));
    assert!(!prompt.contains("{raw_text}"));
}

#[tokio::test]
async fn test_passthroughOptimizer_shouldReturnInputUnchanged() {
    let outcome = PassthroughOptimizer.optimize(RAW).await;

    assert_eq!(outcome, OptimizationOutcome::Skipped(RAW.to_string()));
    assert!(!outcome.is_fallback());
}
