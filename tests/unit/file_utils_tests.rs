/*!
 * Tests for file utility functions
 */

use std::path::Path;
use anyhow::Result;
use ttml_scenes::file_utils::{FileManager, FileType};
use crate::common;

/// Test that file_exists returns true for existing files
#[test]
fn test_file_exists_withExistingFile_shouldReturnTrue() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "test_file_exists.tmp", "test content")?;

    assert!(FileManager::file_exists(&test_file));

    Ok(())
}

/// Test that file_exists returns false for non-existent files
#[test]
fn test_file_exists_withNonExistentFile_shouldReturnFalse() {
    assert!(!FileManager::file_exists("non_existent_file.tmp"));
}

/// Test that generate_output_path replaces the input extension
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/episode.ttml");
    let output_dir = Path::new("/tmp/output");

    let output_path = FileManager::generate_output_path(input_file, output_dir, "scenes.json");

    assert_eq!(output_path, Path::new("/tmp/output/episode.scenes.json"));
}

/// Test that a leading dot in the extension is not doubled
#[test]
fn test_generate_output_path_withDottedExtension_shouldNotDoubleDot() {
    let output_path = FileManager::generate_output_path("a.ttml", "out", ".json");

    assert_eq!(output_path, Path::new("out/a.json"));
}

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("nested").join("dir");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(FileManager::dir_exists(&test_subdir));

    Ok(())
}

/// Test that write_to_file creates parents and read_to_string reads it back
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("sub").join("out.json");

    FileManager::write_to_file(&path, "[]")?;

    assert_eq!(FileManager::read_to_string(&path)?, "[]");

    Ok(())
}

/// Test that find_documents only returns timed-text extensions, sorted
#[test]
fn test_find_documents_withMixedFiles_shouldReturnOnlyDocuments() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "b.ttml", "")?;
    common::create_test_file(temp_dir.path(), "a.DFXP", "")?;
    common::create_test_file(temp_dir.path(), "notes.txt", "")?;
    common::create_test_file(temp_dir.path(), "a.scenes.json", "")?;

    let found = FileManager::find_documents(temp_dir.path())?;

    let names: Vec<_> = found
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["a.DFXP", "b.ttml"]);

    Ok(())
}

/// Test that detect_file_type trusts .ttml and sniffs .xml content
#[test]
fn test_detect_file_type_shouldUseExtensionThenContent() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let ttml = common::create_test_document(temp_dir.path(), "doc.ttml")?;
    let xml = common::create_test_document(temp_dir.path(), "doc.xml")?;
    let other = common::create_test_file(temp_dir.path(), "other.xml", "<html><body/></html>")?;

    assert_eq!(FileManager::detect_file_type(&ttml)?, FileType::Ttml);
    assert_eq!(FileManager::detect_file_type(&xml)?, FileType::Ttml);
    assert_eq!(FileManager::detect_file_type(&other)?, FileType::Unknown);
    assert!(FileManager::detect_file_type(temp_dir.path().join("missing.ttml")).is_err());

    Ok(())
}
