use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use url::Url;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    /// Text optimization (language model) settings
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Speech-to-text settings
    #[serde(default)]
    pub transcription: TranscriptionConfig,

    /// Sentence splitting, packing and chapter detection settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Output files settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// How transcripts are turned into scripts
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    // @mode: Rewrite through the remote model, then structure
    #[default]
    Remote,
    // @mode: Structure the raw transcript without rewriting
    Passthrough,
    // @mode: No network at all, canned transcript and canned script
    Mock,
}

impl ProcessingMode {
    // @returns: Capitalized mode name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Remote => "Remote",
            Self::Passthrough => "Passthrough",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase mode identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Remote => "remote".to_string(),
            Self::Passthrough => "passthrough".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for ProcessingMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "passthrough" => Ok(Self::Passthrough),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid processing mode: {}", s)),
        }
    }
}

/// Chat-completion service used to rewrite transcripts
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OptimizerConfig {
    /// Processing mode
    #[serde(default)]
    pub mode: ProcessingMode,

    /// API key for the service
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service base URL; `/v1/chat/completions` is appended
    #[serde(default = "default_optimizer_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_optimizer_model")]
    pub model: String,

    /// Temperature parameter for text generation (0.0 to 1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum number of tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds
    #[serde(default = "default_optimizer_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            mode: ProcessingMode::default(),
            api_key: String::new(),
            endpoint: default_optimizer_endpoint(),
            model: default_optimizer_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_optimizer_timeout_secs(),
        }
    }
}

/// Speech-to-text service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranscriptionConfig {
    /// API key for the service, falls back to the optimizer key when empty
    #[serde(default = "String::new")]
    pub api_key: String,

    /// Service base URL; `/v1/audio/transcriptions` is appended
    #[serde(default = "default_optimizer_endpoint")]
    pub endpoint: String,

    /// Transcription model name
    #[serde(default = "default_transcription_model")]
    pub model: String,

    /// Spoken language (ISO 639-1)
    #[serde(default = "default_transcription_language")]
    pub language: String,

    /// Sample rate of the extracted audio
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Channel count of the extracted audio
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Request timeout in seconds
    #[serde(default = "default_transcription_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_optimizer_endpoint(),
            model: default_transcription_model(),
            language: default_transcription_language(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            timeout_secs: default_transcription_timeout_secs(),
        }
    }
}

/// Segmentation and chapter detection settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SegmentationConfig {
    /// Segment size bound in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Sentence-final punctuation
    #[serde(default = "default_sentence_delimiters")]
    pub sentence_delimiters: Vec<char>,

    /// Appended to every sentence when packed into a segment
    #[serde(default = "default_terminator")]
    pub terminator: String,

    /// Leading window (in characters) scanned for cue phrases
    #[serde(default = "default_cue_window_chars")]
    pub cue_window_chars: usize,

    /// Ordered cue phrases; the first match wins
    #[serde(default = "default_cue_phrases")]
    pub cue_phrases: Vec<String>,

    /// Title of the generated document
    #[serde(default = "default_document_title")]
    pub document_title: String,

    /// Title of the chapter opened before any cue is seen
    #[serde(default = "default_chapter_title")]
    pub default_chapter_title: String,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_text_length: default_max_text_length(),
            sentence_delimiters: default_sentence_delimiters(),
            terminator: default_terminator(),
            cue_window_chars: default_cue_window_chars(),
            cue_phrases: default_cue_phrases(),
            document_title: default_document_title(),
            default_chapter_title: default_chapter_title(),
        }
    }
}

/// Output settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OutputConfig {
    /// Directory receiving the generated files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Optional .docx template used as the base document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    /// Whether to keep a JSON backup of the structured script
    #[serde(default = "default_true")]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            template_path: None,
            save_json: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Matching filter for the `log` facade
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_optimizer_endpoint() -> String {
    "https://api.deepseek.com".to_string()
}

fn default_optimizer_model() -> String {
    "deepseek-chat".to_string()
}

fn default_temperature() -> f32 {
    0.3
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_optimizer_timeout_secs() -> u64 {
    60
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_transcription_language() -> String {
    "zh".to_string()
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_channels() -> u16 {
    1
}

fn default_transcription_timeout_secs() -> u64 {
    300
}

fn default_max_text_length() -> usize {
    4000
}

fn default_sentence_delimiters() -> Vec<char> {
    vec!['。', '！', '？']
}

fn default_terminator() -> String {
    "。".to_string()
}

fn default_cue_window_chars() -> usize {
    50
}

/// Cue phrases recognised out of the box, in priority order
pub fn default_cue_phrases() -> Vec<String> {
    [
        "第一部分", "第二部分", "第三部分",
        "第一步", "第二步", "第三步",
        "首先", "其次", "然后", "最后",
        "培训目标", "操作步骤", "注意事项", "总结",
        "设备介绍", "安全要求", "操作流程", "维护保养",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_document_title() -> String {
    "技能操作培训脚本".to_string()
}

fn default_chapter_title() -> String {
    "主要内容".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a configuration file, or write the defaults there if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }

        warn!("Config file not found at '{}', creating default config.", path.display());
        let config = Config::default();
        config.save_to_file(path)?;
        Ok(config)
    }

    /// Read a configuration file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write this configuration as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let segmentation = &self.segmentation;
        if segmentation.max_text_length == 0 {
            return Err(anyhow!("max_text_length must be greater than zero"));
        }
        if segmentation.sentence_delimiters.is_empty() {
            return Err(anyhow!("At least one sentence delimiter is required"));
        }
        if segmentation.cue_phrases.iter().any(|cue| cue.is_empty()) {
            return Err(anyhow!("Cue phrases must not be empty strings"));
        }

        Url::parse(&self.optimizer.endpoint)
            .with_context(|| format!("Invalid optimizer endpoint: {}", self.optimizer.endpoint))?;
        Url::parse(&self.transcription.endpoint)
            .with_context(|| format!("Invalid transcription endpoint: {}", self.transcription.endpoint))?;

        if !(0.0..=2.0).contains(&self.optimizer.temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 2.0, got {}", self.optimizer.temperature));
        }

        if isolang::Language::from_639_1(&self.transcription.language).is_none() {
            return Err(anyhow!("Invalid transcription language code: {}", self.transcription.language));
        }

        Ok(())
    }

    /// Mode actually used at runtime.
    ///
    /// A remote mode without an API key cannot reach the service, so it is
    /// downgraded to mock mode.
    pub fn effective_mode(&self) -> ProcessingMode {
        match self.optimizer.mode {
            ProcessingMode::Remote if self.optimizer.api_key.trim().is_empty() => {
                warn!("No optimizer API key configured, running in mock mode");
                ProcessingMode::Mock
            }
            mode => mode,
        }
    }

    /// API key used for transcription requests
    pub fn transcription_api_key(&self) -> &str {
        if self.transcription.api_key.is_empty() {
            &self.optimizer.api_key
        } else {
            &self.transcription.api_key
        }
    }
}
