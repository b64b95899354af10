/*!
 * Speech-to-text collaborators.
 *
 * - `audio`: ffmpeg audio extraction
 * - `whisper`: remote transcription over an OpenAI-compatible API
 *
 * Transcription failures are fatal for the input being processed.
 */

use async_trait::async_trait;
use std::path::Path;

use crate::app_config::{Config, ProcessingMode};
use crate::errors::TranscriptionError;
use crate::file_utils::{FileManager, FileType};

pub mod audio;
pub mod whisper;

pub use self::audio::AudioExtractor;
pub use self::whisper::RemoteTranscriber;

/// Turns an input file into transcript text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, input: &Path) -> Result<String, TranscriptionError>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Canned transcript of a short equipment training course.
pub const MOCK_TRANSCRIPT: &str = "欢迎来到技能操作培训课程。今天我们将学习如何正确使用这个设备。
首先，让我们了解一下设备的基本组成部分。设备主要由三个部分组成：
第一部分是控制面板，第二部分是操作区域，第三部分是安全装置。
在开始操作之前，请确保您已经穿戴好必要的安全装备，包括安全帽、防护眼镜和防护手套。
接下来，我们将进行实际操作演示。请跟随我的步骤进行操作。
第一步，打开电源开关。电源开关位于设备的右侧，请轻轻按下开关按钮。
第二步，检查设备状态指示灯。绿色指示灯表示设备正常运行，红色指示灯表示需要检查设备状态。
第三步，设置操作参数。根据您的工作需求，调整相应的参数设置。
操作完成后，请按照正确的顺序关闭设备，并清理工作区域。
以上就是本次培训的全部内容，感谢您的参与。";

/// Offline transcriber: reads `.txt` inputs, returns [`MOCK_TRANSCRIPT`] for media.
#[derive(Debug, Clone, Default)]
pub struct MockTranscriber;

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, input: &Path) -> Result<String, TranscriptionError> {
        match FileManager::detect_file_type(input) {
            FileType::Transcript => Ok(tokio::fs::read_to_string(input).await?),
            FileType::Video | FileType::Audio => Ok(MOCK_TRANSCRIPT.to_string()),
            FileType::Unknown => Err(TranscriptionError::UnsupportedInput(format!(
                "Unsupported file type: {:?}",
                input
            ))),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Pick the transcriber for `mode`
pub fn transcriber_for(config: &Config, mode: ProcessingMode) -> Box<dyn Transcriber> {
    match mode {
        ProcessingMode::Mock => Box::new(MockTranscriber),
        ProcessingMode::Remote | ProcessingMode::Passthrough => Box::new(RemoteTranscriber::new(
            &config.transcription,
            config.transcription_api_key(),
        )),
    }
}
