/*!
 * Tests for transcription collaborators
 */

use anyhow::Result;
use std::path::Path;
use video2script::app_config::{Config, TranscriptionConfig, ProcessingMode};
use video2script::errors::{ProviderError, TranscriptionError};
use video2script::transcription::audio::filter_ffmpeg_stderr;
use video2script::transcription::{
    transcriber_for, AudioExtractor, MockTranscriber, RemoteTranscriber, Transcriber, MOCK_TRANSCRIPT,
};
use crate::common;

#[tokio::test]
async fn test_mockTranscriber_withVideo_shouldReturnCannedText() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let video = common::create_test_file(temp_dir.path(), "course.mp4", "")?;

    let text = MockTranscriber.transcribe(&video).await?;

    assert_eq!(text, MOCK_TRANSCRIPT);
    Ok(())
}

#[tokio::test]
async fn test_mockTranscriber_withTranscript_shouldReadFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let notes = common::create_test_transcript(temp_dir.path(), "notes.txt")?;

    let text = MockTranscriber.transcribe(&notes).await?;

    assert_eq!(text, common::SAMPLE_TRANSCRIPT);
    Ok(())
}

#[tokio::test]
async fn test_mockTranscriber_withUnknownType_shouldFail() {
    let result = MockTranscriber.transcribe(Path::new("slides.pdf")).await;

    assert!(matches!(result, Err(TranscriptionError::UnsupportedInput(_))));
}

#[tokio::test]
async fn test_remoteTranscriber_withUnknownType_shouldFailWithoutNetwork() {
    let transcriber = RemoteTranscriber::new(&TranscriptionConfig::default(), "key");

    let result = transcriber.transcribe(Path::new("slides.pdf")).await;

    assert!(matches!(result, Err(TranscriptionError::UnsupportedInput(_))));
}

#[tokio::test]
async fn test_remoteTranscriber_withUnreachableService_shouldReturnServiceError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_file(temp_dir.path(), "voice.wav", "RIFF")?;
    let config = TranscriptionConfig {
        endpoint: "http://127.0.0.1:9".to_string(),
        timeout_secs: 5,
        ..TranscriptionConfig::default()
    };

    let result = RemoteTranscriber::new(&config, "key").transcribe(&audio).await;

    assert!(matches!(result, Err(TranscriptionError::Service(ProviderError::ConnectionError(_)))));
    Ok(())
}

#[tokio::test]
async fn test_remoteTranscriber_withMalformedEndpoint_shouldReportRequestFailure() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let audio = common::create_test_file(temp_dir.path(), "voice.wav", "RIFF")?;
    let config = TranscriptionConfig {
        endpoint: "not a url".to_string(),
        ..TranscriptionConfig::default()
    };

    let result = RemoteTranscriber::new(&config, "key").transcribe(&audio).await;

    // Same classification as the chat client: only connect failures are connection errors
    assert!(matches!(result, Err(TranscriptionError::Service(ProviderError::RequestFailed(_)))));
    Ok(())
}

#[test]
fn test_transcriptionsUrl_shouldAppendRouteOnce() {
    let mut config = TranscriptionConfig::default();
    config.endpoint = "https://api.openai.com".to_string();
    assert_eq!(
        RemoteTranscriber::new(&config, "k").transcriptions_url(),
        "https://api.openai.com/v1/audio/transcriptions"
    );

    config.endpoint = "http://localhost:8000/v1/".to_string();
    assert_eq!(
        RemoteTranscriber::new(&config, "k").transcriptions_url(),
        "http://localhost:8000/v1/audio/transcriptions"
    );
}

#[test]
fn test_ffmpegArgs_shouldRequestMonoPcmWav() {
    let extractor = AudioExtractor::new(16000, 1);

    let args = extractor.ffmpeg_args(Path::new("in.mp4"), Path::new("out.wav"));

    assert_eq!(
        args,
        vec!["-y", "-i", "in.mp4", "-vn", "-ac", "1", "-ar", "16000", "-acodec", "pcm_s16le", "out.wav"]
    );
}

#[tokio::test]
async fn test_extract_withMissingInput_shouldFailBeforeSpawning() {
    let result = AudioExtractor::default()
        .extract(Path::new("missing_video_12345.mp4"), Path::new("out.wav"))
        .await;

    assert!(matches!(result, Err(TranscriptionError::UnsupportedInput(_))));
}

#[test]
fn test_filterFfmpegStderr_shouldDropBannerAndStreamInfo() {
    let stderr = "ffmpeg version 6.0 Copyright (c) 2000-2023\n  built with clang\n  configuration: --enable-gpl\n  libavutil      58.  2.100\nInput #0, mov,mp4, from 'in.mp4':\n  Duration: 00:00:10.00\n  Stream #0:0: Video: h264\nOutput file #0 does not contain any stream\n";

    assert_eq!(filter_ffmpeg_stderr(stderr), "Output file #0 does not contain any stream");
}

#[test]
fn test_filterFfmpegStderr_withOnlyNoise_shouldKeepOriginal() {
    let stderr = "ffmpeg version 6.0\n";

    assert_eq!(filter_ffmpeg_stderr(stderr), "ffmpeg version 6.0");
}

#[test]
fn test_transcriberFor_shouldPickImplementationByMode() {
    let config = Config::default();

    assert_eq!(transcriber_for(&config, ProcessingMode::Mock).name(), "mock");
    assert_eq!(transcriber_for(&config, ProcessingMode::Remote).name(), "remote");
    assert_eq!(transcriber_for(&config, ProcessingMode::Passthrough).name(), "remote");
}
