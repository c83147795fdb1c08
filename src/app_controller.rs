use anyhow::{Result, Context};
use log::{error, warn, info, debug};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::errors::AppError;
use crate::file_utils::{FileManager, FileType};
use crate::ttml::output::SceneOutput;
use crate::ttml::parser::TtmlParser;
use crate::validation::SceneValidator;

// @module: Application controller for document processing

/// Outcome of processing a single document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Scenes were written to this path
    Written(PathBuf),
    /// Output already existed and overwriting was not requested
    Skipped(PathBuf),
}

/// Counters for a folder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderSummary {
    pub success_count: usize,
    pub skip_count: usize,
    pub error_count: usize,
    /// Files with a document extension that are not timed text
    pub ignored_count: usize,
}

/// Main application controller for scene extraction
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Parser built from the configuration
    parser: TtmlParser,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Invalid configuration")?;
        let parser = config.parser.to_parser();
        Ok(Self { config, parser })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Parse a document and check the produced scenes
    pub fn process_document(&self, content: &str) -> Result<Vec<SceneOutput>> {
        let scenes = self
            .parser
            .parse(content, None, None)
            .map_err(AppError::from)?;

        let validation = SceneValidator::new().validate(&scenes);
        if !validation.passed {
            for result in validation.failed_scenes() {
                for issue in &result.issues {
                    warn!("Scene {}: {}", result.index, issue);
                }
            }
        }

        debug!(
            "Document produced {} scenes ({} gaps, {} issues)",
            scenes.len(),
            validation.gap_count,
            validation.total_issues
        );
        Ok(scenes)
    }

    /// Serialize scenes with the configured formatting
    pub fn render_json(&self, scenes: &[SceneOutput]) -> Result<String> {
        let json = if self.config.output.pretty {
            serde_json::to_string_pretty(scenes)
        } else {
            serde_json::to_string(scenes)
        };
        json.context("Failed to serialize scenes")
    }

    /// Path the scenes of `input_file` are written to
    pub fn output_path_for(&self, input_file: &Path, output_dir: &Path) -> PathBuf {
        FileManager::generate_output_path(input_file, output_dir, &self.config.output.extension)
    }

    /// Run the main workflow with input document and output directory
    pub fn run(&self, input_file: PathBuf, output_dir: PathBuf, force_overwrite: bool) -> Result<RunOutcome> {
        let start_time = std::time::Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(AppError::File(format!("Input file does not exist: {:?}", input_file)).into());
        }

        let output_path = self.output_path_for(&input_file, &output_dir);
        if output_path.exists() && !force_overwrite {
            warn!("Skipping {:?}, output already exists (use -f to force overwrite)", input_file);
            return Ok(RunOutcome::Skipped(output_path));
        }

        if FileManager::detect_file_type(&input_file)? == FileType::Unknown {
            warn!("{:?} does not look like a TTML document, trying anyway", input_file);
        }

        let content = FileManager::read_to_string(&input_file)?;
        let scenes = self
            .process_document(&content)
            .with_context(|| format!("Failed to process {:?}", input_file))?;

        FileManager::ensure_dir(&output_dir)?;
        FileManager::write_to_file(&output_path, &self.render_json(&scenes)?)?;

        info!(
            "Wrote {} scenes to {:?} in {}",
            scenes.len(),
            output_path,
            Self::format_duration(start_time.elapsed())
        );
        Ok(RunOutcome::Written(output_path))
    }

    fn format_duration(duration: std::time::Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }

    /// Run the workflow in folder mode, processing every document in a directory.
    /// Output is written next to each document, or below `output_dir` mirroring
    /// the folder layout when one is given.
    pub fn run_folder(
        &self,
        input_dir: PathBuf,
        output_dir: Option<PathBuf>,
        force_overwrite: bool,
    ) -> Result<FolderSummary> {
        let start_time = std::time::Instant::now();

        if !FileManager::dir_exists(&input_dir) {
            return Err(AppError::File(format!("Input directory does not exist: {:?}", input_dir)).into());
        }

        // Previous outputs end in .json and are never picked up again
        let documents = FileManager::find_documents(&input_dir)?;
        if documents.is_empty() {
            return Err(AppError::File(format!("No TTML documents found in directory: {:?}", input_dir)).into());
        }

        let mut summary = FolderSummary::default();
        for document in &documents {
            match FileManager::detect_file_type(document) {
                Ok(FileType::Ttml) => {}
                Ok(FileType::Unknown) => {
                    debug!("Ignoring {:?}, not a TTML document", document);
                    summary.ignored_count += 1;
                    continue;
                }
                Err(e) => {
                    error!("Error inspecting file {:?}: {:#}", document, e);
                    summary.error_count += 1;
                    continue;
                }
            }

            let document_dir = document.parent().unwrap_or(input_dir.as_path());
            let target_dir = match &output_dir {
                Some(root) => root.join(document_dir.strip_prefix(&input_dir).unwrap_or(Path::new(""))),
                None => document_dir.to_path_buf(),
            };

            match self.run(document.clone(), target_dir, force_overwrite) {
                Ok(RunOutcome::Written(_)) => summary.success_count += 1,
                Ok(RunOutcome::Skipped(_)) => summary.skip_count += 1,
                Err(e) => {
                    error!("Error processing file {:?}: {:#}", document, e);
                    summary.error_count += 1;
                }
            }
        }

        info!(
            "Processed {} documents in {}: {} written, {} skipped, {} failed, {} ignored",
            documents.len(),
            Self::format_duration(start_time.elapsed()),
            summary.success_count,
            summary.skip_count,
            summary.error_count,
            summary.ignored_count
        );
        Ok(summary)
    }
}
