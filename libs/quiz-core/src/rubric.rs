//! Marking rubrics for short free-text answers.
//!
//! A [`MarkingConfig`] is the authored form found in pack JSON. It is compiled
//! once into a [`Rubric`]: regex patterns are built and validated, keywords are
//! normalized, and nested `acceptablePoints` are flattened into a list of leaf
//! [`RubricPoint`]s. Grading a [`Rubric`] never fails and never recurses.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::RubricError;
use crate::matching::{normalize, normalized_similarity};

/// Threshold used when a config does not set `fuzzyThreshold`.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

/// Number of keywords offered as hints after a wrong answer.
const HINT_COUNT: usize = 2;

/// Marking configuration as authored in a pack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkingConfig {
    pub required_patterns: Vec<String>,
    pub fuzzy_keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy_threshold: Option<f64>,
    /// Alternative rubrics; an answer satisfying any one of them is correct.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub acceptable_points: Vec<MarkingConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u32>,
}

/// One leaf of a compiled rubric.
#[derive(Debug, Clone)]
pub struct RubricPoint {
    patterns: Vec<Regex>,
    keywords: Vec<String>,
    threshold: f64,
}

impl RubricPoint {
    fn compile(config: &MarkingConfig) -> Result<Self, RubricError> {
        let threshold = config.fuzzy_threshold.unwrap_or(DEFAULT_FUZZY_THRESHOLD);
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RubricError::InvalidThreshold { value: threshold });
        }

        let patterns = config
            .required_patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| RubricError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let keywords = config
            .fuzzy_keywords
            .iter()
            .map(|keyword| normalize(keyword))
            .filter(|keyword| !keyword.is_empty())
            .collect();

        Ok(Self {
            patterns,
            keywords,
            threshold,
        })
    }

    /// Check an already-normalized, non-empty answer against this point.
    pub fn accepts(&self, normalized: &str) -> bool {
        if self.patterns.iter().any(|re| re.is_match(normalized)) {
            return true;
        }

        self.keywords.iter().any(|keyword| {
            if normalized_similarity(normalized, keyword) >= self.threshold {
                return true;
            }
            // A near-miss keyword can sit inside a longer answer
            normalized
                .split(' ')
                .any(|token| normalized_similarity(token, keyword) >= self.threshold)
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Normalized keywords, in authored order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

/// A compiled marking rubric: a flat OR over leaf points.
#[derive(Debug, Clone)]
pub struct Rubric {
    points: Vec<RubricPoint>,
    hints: Vec<String>,
}

impl Rubric {
    /// Compile and validate a marking configuration.
    pub fn compile(config: &MarkingConfig) -> Result<Self, RubricError> {
        let mut points = Vec::new();
        let mut keywords = Vec::new();
        collect_points(config, &mut points, &mut keywords)?;

        let hints = if config.fuzzy_keywords.is_empty() {
            keywords
        } else {
            config.fuzzy_keywords.clone()
        }
        .into_iter()
        .filter(|keyword| !keyword.trim().is_empty())
        .take(HINT_COUNT)
        .collect();

        debug!(points = points.len(), "compiled marking rubric");
        Ok(Self { points, hints })
    }

    /// Whether a raw answer satisfies any point of the rubric.
    pub fn accepts(&self, answer: &str) -> bool {
        let normalized = normalize(answer);
        if normalized.is_empty() {
            return false;
        }
        self.points.iter().any(|point| point.accepts(&normalized))
    }

    pub fn points(&self) -> &[RubricPoint] {
        &self.points
    }

    /// Authored keywords suitable for showing as hints.
    pub fn hint_keywords(&self) -> &[String] {
        &self.hints
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self {
            points: vec![RubricPoint {
                patterns: Vec::new(),
                keywords: Vec::new(),
                threshold: DEFAULT_FUZZY_THRESHOLD,
            }],
            hints: Vec::new(),
        }
    }
}

fn collect_points(
    config: &MarkingConfig,
    points: &mut Vec<RubricPoint>,
    keywords: &mut Vec<String>,
) -> Result<(), RubricError> {
    if config.acceptable_points.is_empty() {
        points.push(RubricPoint::compile(config)?);
        keywords.extend(config.fuzzy_keywords.iter().cloned());
        return Ok(());
    }

    if !config.required_patterns.is_empty() || !config.fuzzy_keywords.is_empty() {
        warn!("patterns and keywords alongside acceptablePoints are ignored");
    }

    for point in &config.acceptable_points {
        collect_points(point, points, keywords)?;
    }
    Ok(())
}

/// Decide whether a free-text answer satisfies a compiled rubric.
pub fn check_short_answer(answer: &str, rubric: &Rubric) -> bool {
    rubric.accepts(answer)
}

/// Compile a marking configuration and check a single answer against it.
pub fn check_marking_config(answer: &str, config: &MarkingConfig) -> Result<bool, RubricError> {
    Ok(Rubric::compile(config)?.accepts(answer))
}
