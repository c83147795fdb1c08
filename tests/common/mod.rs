/*!
 * Common test utilities for the ttml-scenes test suite
 */

use std::path::{Path, PathBuf};
use std::fs;
use anyhow::Result;
use tempfile::TempDir;

/// Head with one bottom region and a yellow style
pub const SIMPLE_HEAD: &str = r##"<head>
    <styling>
        <style xml:id="s1" tts:color="yellow" tts:fontSize="100%" tts:backgroundColor="#00000080"/>
    </styling>
    <layout>
        <region xml:id="r1" tts:origin="10% 10%" tts:extent="80% 20%"/>
        <region xml:id="r2" tts:origin="10% 70%" tts:extent="80% 20%"/>
    </layout>
</head>"##;

/// Wraps a body fragment into a complete document with [`SIMPLE_HEAD`]
pub fn ttml_document(body: &str) -> String {
    ttml_document_with_head(SIMPLE_HEAD, body)
}

/// Wraps a head and body fragment into a complete document
pub fn ttml_document_with_head(head: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<tt xmlns="http://www.w3.org/ns/ttml"
    xmlns:tts="http://www.w3.org/ns/ttml#styling"
    xmlns:ttp="http://www.w3.org/ns/ttml#parameter"
    ttp:cellResolution="32 15"
    xml:lang="en">
{}
{}
</tt>"#,
        head, body
    )
}

/// Document with one paragraph visible from 1s to 3s in region r1
pub fn hello_document() -> String {
    ttml_document(
        r#"<body><div><p begin="00:00:01.000" end="00:00:03.000" region="r1">Hello</p></div></body>"#,
    )
}

/// Routes library logs through env_logger, controlled by RUST_LOG
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a sample TTML document for testing
pub fn create_test_document(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, &hello_document())
}
