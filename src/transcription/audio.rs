use log::{debug, error};
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

use crate::errors::TranscriptionError;

/// Extracts a mono PCM WAV track from a video with ffmpeg.
#[derive(Debug, Clone)]
pub struct AudioExtractor {
    sample_rate: u32,
    channels: u16,
    timeout: Duration,
}

impl Default for AudioExtractor {
    fn default() -> Self {
        Self::new(16000, 1)
    }
}

impl AudioExtractor {
    pub fn new(sample_rate: u32, channels: u16) -> Self {
        Self {
            sample_rate,
            channels,
            timeout: Duration::from_secs(600),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// ffmpeg arguments for extracting `input` into `output`
    pub fn ffmpeg_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-i".to_string(),
            input.to_string_lossy().to_string(),
            "-vn".to_string(),
            "-ac".to_string(),
            self.channels.to_string(),
            "-ar".to_string(),
            self.sample_rate.to_string(),
            "-acodec".to_string(),
            "pcm_s16le".to_string(),
            output.to_string_lossy().to_string(),
        ]
    }

    /// Write the audio track of `input` to `output` as 16-bit PCM WAV
    pub async fn extract(&self, input: &Path, output: &Path) -> Result<(), TranscriptionError> {
        if !input.is_file() {
            return Err(TranscriptionError::UnsupportedInput(format!("Input file does not exist: {:?}", input)));
        }

        debug!("Extracting audio from {:?} to {:?}", input, output);
        let ffmpeg_future = Command::new("ffmpeg")
            .args(self.ffmpeg_args(input, output))
            .output();

        let result = tokio::select! {
            result = ffmpeg_future => {
                result.map_err(|e| TranscriptionError::AudioExtraction(format!("Failed to execute ffmpeg: {}", e)))?
            },
            _ = tokio::time::sleep(self.timeout) => {
                return Err(TranscriptionError::AudioExtraction(format!(
                    "ffmpeg timed out after {} seconds", self.timeout.as_secs()
                )));
            }
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let filtered = filter_ffmpeg_stderr(&stderr);
            error!("Audio extraction failed: {}", filtered);
            return Err(TranscriptionError::AudioExtraction(filtered));
        }

        let size = std::fs::metadata(output)?.len();
        if size == 0 {
            return Err(TranscriptionError::AudioExtraction(format!("No audio track found in {:?}", input)));
        }

        Ok(())
    }
}

/// Keep only the meaningful lines of ffmpeg's stderr (drops banner and stream metadata).
pub fn filter_ffmpeg_stderr(stderr: &str) -> String {
    let noise_prefixes = [
        "ffmpeg version",
        "  built with",
        "  configuration:",
        "  lib",
        "Input #",
        "Output #",
        "  Metadata:",
        "  Duration:",
        "  Stream #",
        "Stream mapping:",
        "    ",
    ];

    let lines: Vec<&str> = stderr
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| !noise_prefixes.iter().any(|p| line.starts_with(p)))
        .collect();

    if lines.is_empty() {
        stderr.trim().to_string()
    } else {
        lines.join("\n")
    }
}
