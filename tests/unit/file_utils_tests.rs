/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use std::fs;
use std::path::Path;
use video2script::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/course.mp4");
    let output_dir = Path::new("/tmp/output");

    let output_path = FileManager::generate_output_path(input_file, output_dir, "培训脚本", "docx");

    assert_eq!(output_path, Path::new("/tmp/output/course_培训脚本.docx"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(FileManager::dir_exists(&test_subdir));
    Ok(())
}

/// Test that write_to_file creates parent directories and read_to_string reads it back
#[test]
fn test_write_to_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.txt");

    FileManager::write_to_file(&path, "内容")?;

    assert_eq!(FileManager::read_to_string(&path)?, "内容");
    Ok(())
}

#[test]
fn test_read_to_string_withMissingFile_shouldFail() {
    assert!(FileManager::read_to_string("definitely_missing_12345.txt").is_err());
}

#[test]
fn test_detect_file_type_shouldClassifyByExtension() {
    assert_eq!(FileManager::detect_file_type("course.mp4"), FileType::Video);
    assert_eq!(FileManager::detect_file_type("COURSE.MKV"), FileType::Video);
    assert_eq!(FileManager::detect_file_type("voice.wav"), FileType::Audio);
    assert_eq!(FileManager::detect_file_type("voice.mp3"), FileType::Audio);
    assert_eq!(FileManager::detect_file_type("notes.txt"), FileType::Transcript);
    assert_eq!(FileManager::detect_file_type("slides.pdf"), FileType::Unknown);
    assert_eq!(FileManager::detect_file_type("README"), FileType::Unknown);
}

#[test]
fn test_find_input_files_shouldReturnSupportedFilesSorted() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let sub = temp_dir.path().join("sub");
    fs::create_dir(&sub)?;
    common::create_test_file(temp_dir.path(), "b.mp4", "")?;
    common::create_test_file(temp_dir.path(), "a.txt", "")?;
    common::create_test_file(temp_dir.path(), "ignored.pdf", "")?;
    common::create_test_file(&sub, "c.wav", "")?;

    let files = FileManager::find_input_files(temp_dir.path())?;

    let names: Vec<String> = files
        .iter()
        .map(|p| p.strip_prefix(temp_dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["a.txt", "b.mp4", "sub/c.wav"]);
    Ok(())
}
