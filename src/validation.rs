/*!
 * Consistency checks on produced scenes.
 *
 * This module verifies that a scene sequence is:
 * - Made of non-empty intervals (begin < end)
 * - Free of scenes without any area
 * - Free of overlaps between consecutive scenes
 *
 * Gaps between consecutive scenes are reported but do not fail validation,
 * they appear wherever no content is active.
 */

use log::debug;

use crate::ttml::output::SceneOutput;
use crate::ttml::timing::{format_timecode, ClockTime};

/// Types of scene issues
#[derive(Debug, Clone, PartialEq)]
pub enum SceneIssue {
    /// Scene does not end after it begins
    InvalidRange { begin: ClockTime, end: ClockTime },
    /// Scene carries no area
    EmptyScene,
    /// Scene begins before the previous one ends
    Overlap { previous_index: usize, overlap: ClockTime },
    /// Scene begins after the previous one ends
    Gap { previous_index: usize, gap: ClockTime },
}

impl SceneIssue {
    /// Whether this issue makes validation fail
    pub fn is_failure(&self) -> bool {
        !matches!(self, SceneIssue::Gap { .. })
    }
}

impl std::fmt::Display for SceneIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneIssue::InvalidRange { begin, end } => write!(
                f,
                "Invalid range: begin {} >= end {}",
                format_timecode(*begin),
                format_timecode(*end)
            ),
            SceneIssue::EmptyScene => write!(f, "Scene has no areas"),
            SceneIssue::Overlap { previous_index, overlap } => write!(
                f,
                "Overlaps scene {} by {}",
                previous_index,
                format_timecode(*overlap)
            ),
            SceneIssue::Gap { previous_index, gap } => write!(
                f,
                "Gap of {} after scene {}",
                format_timecode(*gap),
                previous_index
            ),
        }
    }
}

/// Issues found on a single scene
#[derive(Debug, Clone)]
pub struct SceneResult {
    pub index: usize,
    pub passed: bool,
    pub issues: Vec<SceneIssue>,
}

/// Result of validating a scene sequence
#[derive(Debug, Clone)]
pub struct SceneValidationResult {
    pub passed: bool,
    pub scene_results: Vec<SceneResult>,
    pub total_issues: usize,
    pub gap_count: usize,
}

impl SceneValidationResult {
    pub fn failed_scenes(&self) -> Vec<&SceneResult> {
        self.scene_results.iter().filter(|r| !r.passed).collect()
    }
}

/// Validator for scene sequences
#[derive(Debug, Default)]
pub struct SceneValidator;

impl SceneValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_scene(&self, index: usize, scene: &SceneOutput) -> SceneResult {
        let mut issues = Vec::new();

        if scene.duration == 0 {
            issues.push(SceneIssue::InvalidRange {
                begin: scene.begin,
                end: scene.end(),
            });
        }
        if scene.areas.is_empty() {
            issues.push(SceneIssue::EmptyScene);
        }

        SceneResult {
            index,
            passed: issues.iter().all(|issue| !issue.is_failure()),
            issues,
        }
    }

    /// Validate scenes in the order they were produced
    pub fn validate(&self, scenes: &[SceneOutput]) -> SceneValidationResult {
        let mut scene_results: Vec<SceneResult> = scenes
            .iter()
            .enumerate()
            .map(|(index, scene)| self.validate_scene(index, scene))
            .collect();

        let mut gap_count = 0;
        for (index, pair) in scenes.windows(2).enumerate() {
            let (previous, current) = (&pair[0], &pair[1]);
            let result = &mut scene_results[index + 1];

            if current.begin < previous.end() {
                result.issues.push(SceneIssue::Overlap {
                    previous_index: index,
                    overlap: previous.end() - current.begin,
                });
                result.passed = false;
            } else if current.begin > previous.end() {
                result.issues.push(SceneIssue::Gap {
                    previous_index: index,
                    gap: current.begin - previous.end(),
                });
                gap_count += 1;
            }
        }

        let total_issues = scene_results.iter().map(|r| r.issues.len()).sum();
        let passed = scene_results.iter().all(|r| r.passed);

        debug!(
            "Scene validation: {} scenes, {} issues, {} gaps",
            scenes.len(),
            total_issues,
            gap_count
        );

        SceneValidationResult {
            passed,
            scene_results,
            total_issues,
            gap_count,
        }
    }
}
