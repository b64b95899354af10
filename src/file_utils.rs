use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @const: Video containers accepted as input
const VIDEO_EXTENSIONS: [&str; 9] = ["mp4", "mov", "avi", "mkv", "wmv", "flv", "webm", "m4v", "mpeg"];

// @const: Audio files that can be uploaded without extraction
const AUDIO_EXTENSIONS: [&str; 6] = ["wav", "mp3", "m4a", "flac", "ogg", "aac"];

// @const: Plain-text transcripts
const TRANSCRIPT_EXTENSIONS: [&str; 1] = ["txt"];

/// Enum representing different input file types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Video file, audio is extracted with ffmpeg
    Video,
    /// Audio file, sent to transcription as is
    Audio,
    /// Plain-text transcript, no transcription needed
    Transcript,
    /// Unknown file type
    Unknown,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: Output path for a generated file
    // @params: input_file, output_dir, suffix (e.g. "培训脚本"), extension
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        suffix: &str,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('_');
        output_filename.push_str(suffix);
        output_filename.push('.');
        output_filename.push_str(extension);

        output_dir.as_ref().join(output_filename)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))
    }

    /// Classify a file by its extension
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        let ext = match path.as_ref().extension() {
            Some(ext) => ext.to_string_lossy().to_lowercase(),
            None => return FileType::Unknown,
        };

        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            FileType::Video
        } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            FileType::Audio
        } else if TRANSCRIPT_EXTENSIONS.contains(&ext.as_str()) {
            FileType::Transcript
        } else {
            FileType::Unknown
        }
    }

    /// Find processable inputs (video, audio, transcripts) below `dir`, sorted by path
    pub fn find_input_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && Self::detect_file_type(path) != FileType::Unknown {
                result.push(path.to_path_buf());
            }
        }

        result.sort();
        Ok(result)
    }
}
