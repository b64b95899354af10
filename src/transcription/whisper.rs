use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::app_config::TranscriptionConfig;
use crate::errors::{ProviderError, TranscriptionError};
use crate::providers::openai::map_transport_error;
use crate::file_utils::{FileManager, FileType};

use super::audio::AudioExtractor;
use super::Transcriber;

/// Body of a `response_format=json` transcription response
#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Client for OpenAI-compatible `/v1/audio/transcriptions` endpoints.
#[derive(Debug)]
pub struct RemoteTranscriber {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    language: String,
    timeout_secs: u64,
    extractor: AudioExtractor,
}

impl RemoteTranscriber {
    pub fn new(config: &TranscriptionConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            language: config.language.clone(),
            timeout_secs: config.timeout_secs,
            extractor: AudioExtractor::new(config.sample_rate, config.channels),
        }
    }

    /// Full URL of the transcription route
    pub fn transcriptions_url(&self) -> String {
        let base = self.endpoint.trim_end_matches('/');
        if base.ends_with("/v1") {
            format!("{}/audio/transcriptions", base)
        } else {
            format!("{}/v1/audio/transcriptions", base)
        }
    }

    /// Upload a WAV/MP3/... file and return the recognised text
    pub async fn transcribe_audio(&self, audio_path: &Path) -> Result<String, TranscriptionError> {
        let audio_data = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "audio.wav".to_string());

        let part = Part::bytes(audio_data)
            .file_name(file_name)
            .mime_str("application/octet-stream")
            .map_err(|e| ProviderError::RequestFailed(e.to_string()))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "json");

        info!("Transcribing {:?} with {}", audio_path, self.model);
        let response = self.client
            .post(self.transcriptions_url())
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| map_transport_error(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Transcription API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            }
            .into());
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ParseError(e.to_string()))?;

        debug!("Transcription returned {} characters", body.text.chars().count());
        Ok(body.text)
    }
}

#[async_trait]
impl Transcriber for RemoteTranscriber {
    async fn transcribe(&self, input: &Path) -> Result<String, TranscriptionError> {
        match FileManager::detect_file_type(input) {
            FileType::Audio => self.transcribe_audio(input).await,
            FileType::Video => {
                // Removed when dropped, whatever the outcome
                let temp_audio = tempfile::Builder::new()
                    .prefix("video2script_")
                    .suffix(".wav")
                    .tempfile()?;

                info!("Extracting audio...");
                self.extractor.extract(input, temp_audio.path()).await?;
                self.transcribe_audio(temp_audio.path()).await
            }
            FileType::Transcript => Ok(FileManager::read_to_string(input)
                .map_err(|e| TranscriptionError::UnsupportedInput(e.to_string()))?),
            FileType::Unknown => Err(TranscriptionError::UnsupportedInput(format!(
                "Unsupported file type: {:?}",
                input
            ))),
        }
    }

    fn name(&self) -> &str {
        "remote"
    }
}
