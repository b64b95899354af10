/*!
 * Best-effort transcript rewriting through a chat-completion model.
 *
 * Optimization never fails the pipeline: any problem with the remote call is
 * reported as [`OptimizationOutcome::Fallback`] carrying the original text.
 */

use async_trait::async_trait;
use log::{debug, info, warn};
use std::time::Duration;

use crate::app_config::OptimizerConfig;
use crate::errors::ProviderError;
use crate::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};
use crate::providers::Provider;

/// Instructions sent with every transcript; `{raw_text}` is replaced.
pub const OPTIMIZATION_PROMPT: &str = "请对以下培训视频的文字内容进行优化，使其更加规范、清晰和专业：

原文：
{raw_text}

要求：
1. 保持原意不变
2. 修正语法错误和表达不清的地方
3. 使用更专业的培训术语
4. 保持逻辑清晰，结构合理
5. 确保内容适合作为培训脚本使用

请直接返回优化后的文本，不要添加其他说明。";

/// Fill the optimization prompt with the transcript
pub fn build_prompt(raw_text: &str) -> String {
    OPTIMIZATION_PROMPT.replace("{raw_text}", raw_text)
}

/// Result of one optimization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptimizationOutcome {
    /// The service returned a rewritten text
    Optimized(String),

    /// No rewriting was requested
    Skipped(String),

    /// The service failed; the original text is kept
    Fallback {
        /// Untouched input
        original: String,
        /// Why the remote call was abandoned
        reason: String,
    },
}

impl OptimizationOutcome {
    /// Text to feed into segmentation
    pub fn into_text(self) -> String {
        match self {
            Self::Optimized(text) | Self::Skipped(text) => text,
            Self::Fallback { original, .. } => original,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Rewrites a transcript before it is structured.
#[async_trait]
pub trait TextOptimizer: Send + Sync {
    /// Rewrite `raw_text`; must not fail
    async fn optimize(&self, raw_text: &str) -> OptimizationOutcome;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Optimizer that leaves the transcript as it is.
#[derive(Debug, Clone, Default)]
pub struct PassthroughOptimizer;

#[async_trait]
impl TextOptimizer for PassthroughOptimizer {
    async fn optimize(&self, raw_text: &str) -> OptimizationOutcome {
        OptimizationOutcome::Skipped(raw_text.to_string())
    }

    fn name(&self) -> &str {
        "passthrough"
    }
}

/// Optimizer backed by a chat-completion provider. One attempt, bounded by a timeout.
#[derive(Debug)]
pub struct RemoteOptimizer<P> {
    provider: P,
    model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl RemoteOptimizer<OpenAI> {
    /// Build an optimizer talking to the configured OpenAI-compatible endpoint
    pub fn from_config(config: &OptimizerConfig) -> Self {
        let client = OpenAI::new_with_timeout(&config.api_key, &config.endpoint, config.timeout_secs);
        Self::new(client, &config.model)
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens)
            .with_timeout(Duration::from_secs(config.timeout_secs))
    }
}

impl<P> RemoteOptimizer<P>
where
    P: Provider<Request = OpenAIRequest, Response = OpenAIResponse>,
{
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature: 0.3,
            max_tokens: 4000,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The request sent for `raw_text`
    pub fn build_request(&self, raw_text: &str) -> OpenAIRequest {
        OpenAIRequest::new(&self.model)
            .add_message("user", build_prompt(raw_text))
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
    }

    async fn request_rewrite(&self, raw_text: &str) -> Result<String, ProviderError> {
        let request = self.build_request(raw_text);
        let response = tokio::time::timeout(self.timeout, self.provider.complete(request))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout.as_secs()))??;

        let text = P::extract_text(&response)?;
        if text.trim().is_empty() {
            return Err(ProviderError::ParseError("Response message is empty".to_string()));
        }
        Ok(text)
    }
}

#[async_trait]
impl<P> TextOptimizer for RemoteOptimizer<P>
where
    P: Provider<Request = OpenAIRequest, Response = OpenAIResponse>,
{
    async fn optimize(&self, raw_text: &str) -> OptimizationOutcome {
        debug!("Requesting rewrite of {} characters with {}", raw_text.chars().count(), self.model);

        match self.request_rewrite(raw_text).await {
            Ok(text) => {
                info!("Transcript optimized ({} -> {} characters)", raw_text.chars().count(), text.chars().count());
                OptimizationOutcome::Optimized(text)
            }
            Err(e) => {
                warn!("Text optimization failed, keeping original text: {}", e);
                OptimizationOutcome::Fallback {
                    original: raw_text.to_string(),
                    reason: e.to_string(),
                }
            }
        }
    }

    fn name(&self) -> &str {
        "remote"
    }
}
