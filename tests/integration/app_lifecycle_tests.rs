/*!
 * Integration tests for the application controller lifecycle
 */

use anyhow::Result;
use ttml_scenes::app_config::Config;
use ttml_scenes::app_controller::{Controller, FolderSummary, RunOutcome};
use ttml_scenes::file_utils::FileManager;
use ttml_scenes::ttml::SceneOutput;
use crate::common;

/// Test that the controller writes parseable scene JSON next to the input
#[test]
fn test_run_withValidDocument_shouldWriteSceneFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_document(temp_dir.path(), "episode.ttml")?;
    let controller = Controller::new_for_test()?;

    let outcome = controller.run(input, temp_dir.path().to_path_buf(), false)?;

    let expected = temp_dir.path().join("episode.scenes.json");
    assert_eq!(outcome, RunOutcome::Written(expected.clone()));
    let scenes: Vec<SceneOutput> = serde_json::from_str(&FileManager::read_to_string(&expected)?)?;
    assert_eq!(scenes.len(), 1);
    assert_eq!(scenes[0].plain_text(), "Hello");

    Ok(())
}

/// Test that existing output is kept unless overwriting is forced
#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_document(temp_dir.path(), "episode.ttml")?;
    let existing = common::create_test_file(temp_dir.path(), "episode.scenes.json", "old")?;
    let controller = Controller::new_for_test()?;

    let skipped = controller.run(input.clone(), temp_dir.path().to_path_buf(), false)?;
    assert_eq!(skipped, RunOutcome::Skipped(existing.clone()));
    assert_eq!(FileManager::read_to_string(&existing)?, "old");

    let written = controller.run(input, temp_dir.path().to_path_buf(), true)?;
    assert_eq!(written, RunOutcome::Written(existing.clone()));
    assert_ne!(FileManager::read_to_string(&existing)?, "old");

    Ok(())
}

/// Test that a broken document surfaces as an error
#[test]
fn test_run_withBrokenDocument_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "broken.ttml", "<tt><head></tt>")?;
    let controller = Controller::new_for_test()?;

    let result = controller.run(input, temp_dir.path().to_path_buf(), false);

    assert!(result.is_err());
    assert!(!temp_dir.path().join("broken.scenes.json").exists());

    Ok(())
}

/// Test that folder mode counts successes and failures without stopping
#[test]
fn test_run_folder_withMixedDocuments_shouldCountOutcomes() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let nested = temp_dir.path().join("season1");
    FileManager::ensure_dir(&nested)?;
    common::create_test_document(temp_dir.path(), "a.ttml")?;
    common::create_test_document(&nested, "b.dfxp")?;
    common::create_test_file(temp_dir.path(), "c.ttml", "<html/>")?;
    let controller = Controller::new_for_test()?;

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), None, false)?;

    assert_eq!(
        summary,
        FolderSummary { success_count: 2, skip_count: 0, error_count: 1, ignored_count: 0 }
    );
    assert!(nested.join("b.scenes.json").exists());

    Ok(())
}

/// Test that an empty folder is reported as an error
#[test]
fn test_run_folder_withoutDocuments_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    assert!(Controller::new_for_test()?
        .run_folder(temp_dir.path().to_path_buf(), None, false)
        .is_err());

    Ok(())
}

/// Test that plain XML files without a tt root are ignored rather than failed
#[test]
fn test_run_folder_withNonTtmlXml_shouldIgnoreIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_document(temp_dir.path(), "a.xml")?;
    common::create_test_file(temp_dir.path(), "pom.xml", "<project><version>1</version></project>")?;
    let controller = Controller::new_for_test()?;

    let summary = controller.run_folder(temp_dir.path().to_path_buf(), None, false)?;

    assert_eq!(
        summary,
        FolderSummary { success_count: 1, skip_count: 0, error_count: 0, ignored_count: 1 }
    );
    assert!(temp_dir.path().join("a.scenes.json").exists());
    assert!(!temp_dir.path().join("pom.scenes.json").exists());

    Ok(())
}

/// Test that an output directory mirrors the input folder layout
#[test]
fn test_run_folder_withOutputDir_shouldMirrorLayout() -> Result<()> {
    let input_dir = common::create_temp_dir()?;
    let output_dir = common::create_temp_dir()?;
    let nested = input_dir.path().join("season1");
    FileManager::ensure_dir(&nested)?;
    common::create_test_document(input_dir.path(), "a.ttml")?;
    common::create_test_document(&nested, "b.ttml")?;
    let controller = Controller::new_for_test()?;

    let summary = controller.run_folder(
        input_dir.path().to_path_buf(),
        Some(output_dir.path().to_path_buf()),
        false,
    )?;

    assert_eq!(summary.success_count, 2);
    assert!(output_dir.path().join("a.scenes.json").exists());
    assert!(output_dir.path().join("season1").join("b.scenes.json").exists());
    assert!(!nested.join("b.scenes.json").exists());

    Ok(())
}

/// Test that compact output is used when pretty printing is disabled
#[test]
fn test_render_json_withCompactOutput_shouldBeSingleLine() -> Result<()> {
    let mut config = Config::default();
    config.output.pretty = false;
    let controller = Controller::with_config(config)?;

    let scenes = controller.process_document(&common::hello_document())?;
    let json = controller.render_json(&scenes)?;

    assert!(!json.contains('\n'));
    assert!(json.contains("\"text\":[\"Hello\"]"));

    Ok(())
}

/// Test that an invalid configuration is rejected up front
#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let mut config = Config::default();
    config.parser.container_duration_ms = 0;

    assert!(Controller::with_config(config).is_err());
}
