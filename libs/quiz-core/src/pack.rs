//! JSON pack and pack manifest parsing.
//!
//! # Format
//! ```json
//! {
//!   "title": "Lantern Point",
//!   "text": [{ "type": "heading", "text": "Gullhaven" }, { "text": "..." }],
//!   "questions": [
//!     { "id": 1, "type": "single", "text": "...", "options": ["a", "b"], "correctOptions": [1] },
//!     { "id": 2, "type": "short", "text": "...", "markingConfig": { "requiredPatterns": ["\\bclockwork\\b"] } }
//!   ]
//! }
//! ```
//!
//! Questions are prepared as they are parsed: ids and labels are filled in,
//! max scores get their defaults and marking configs are compiled, so a broken
//! rubric pattern fails the whole pack instead of a later marking pass.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{PackError, Result};
use crate::rubric::{MarkingConfig, Rubric};
use crate::types::{ChoiceQuestion, MatrixQuestion, Question, QuestionKind, ShortTextQuestion, Statement};

/// Title used when a pack does not carry one.
pub const DEFAULT_PACK_TITLE: &str = "Reading passage";

/// Kind of a passage block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassageNodeKind {
    Heading,
    Quote,
    #[default]
    #[serde(other)]
    Paragraph,
}

/// One block of the reading passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassageNode {
    #[serde(rename = "type", default)]
    pub kind: PassageNodeKind,
    #[serde(default)]
    pub text: String,
}

/// A loaded pack: passage plus prepared questions.
#[derive(Debug, Clone)]
pub struct Pack {
    pub id: String,
    pub title: String,
    pub passage: Vec<PassageNode>,
    pub questions: Vec<Question>,
}

/// Entry of the pack manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// The list of available packs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackManifest {
    pub packs: Vec<PackSummary>,
}

// Raw pack fields are read leniently: a null or wrongly typed value falls
// back to its default instead of rejecting the whole pack.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPack {
    #[serde(deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    text: Vec<Value>,
    #[serde(deserialize_with = "lenient")]
    questions: Vec<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawQuestion {
    #[serde(deserialize_with = "lenient")]
    id: Option<RawId>,
    #[serde(deserialize_with = "lenient")]
    label: Option<String>,
    #[serde(rename = "type", deserialize_with = "lenient")]
    question_type: String,
    #[serde(deserialize_with = "lenient")]
    text: String,
    #[serde(deserialize_with = "lenient")]
    options: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    correct_options: Vec<usize>,
    #[serde(deserialize_with = "lenient")]
    correct_index: Option<usize>,
    #[serde(deserialize_with = "lenient")]
    statements: Vec<Value>,
    #[serde(deserialize_with = "lenient")]
    max_score: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    marking_config: Option<MarkingConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawStatement {
    #[serde(deserialize_with = "lenient")]
    text: String,
    #[serde(deserialize_with = "lenient")]
    options: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    correct_index: Option<usize>,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_value_or_default(value))
}

fn from_value_or_default<T: DeserializeOwned + Default>(value: Value) -> T {
    serde_json::from_value(value).unwrap_or_default()
}

/// Parse a pack manifest (`{ "packs": [...] }`).
pub fn parse_manifest(content: &str) -> Result<PackManifest> {
    Ok(serde_json::from_str(content)?)
}

/// Parse a pack and prepare its questions.
pub fn parse_pack(id: &str, content: &str) -> Result<Pack> {
    let raw: RawPack = serde_json::from_str(content)?;

    let mut seen_ids = HashSet::new();
    let mut questions = Vec::with_capacity(raw.questions.len());
    for (position, value) in raw.questions.into_iter().enumerate() {
        if !value.is_object() {
            warn!(position = position + 1, "question is not an object");
        }
        let question = prepare_question(from_value_or_default(value), position)?;
        if !seen_ids.insert(question.id.clone()) {
            return Err(PackError::DuplicateId {
                id: question.id,
                position: position + 1,
            });
        }
        questions.push(question);
    }

    debug!(pack = id, questions = questions.len(), "parsed pack");
    Ok(Pack {
        id: id.to_string(),
        title: raw
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PACK_TITLE.to_string()),
        passage: raw
            .text
            .into_iter()
            .filter_map(|node| serde_json::from_value(node).ok())
            .collect(),
        questions,
    })
}

/// Pick the pack to open: the requested one if it is listed, otherwise the
/// default if listed, otherwise the first listed pack. With an empty list the
/// requested id (or the default) is returned unchanged.
pub fn resolve_pack_id<'a>(
    requested: Option<&'a str>,
    default_id: &'a str,
    packs: &'a [PackSummary],
) -> &'a str {
    let requested = requested.filter(|id| !id.is_empty()).unwrap_or(default_id);

    let Some(first) = packs.first() else {
        return requested;
    };
    if packs.iter().any(|p| p.id == requested) {
        requested
    } else if packs.iter().any(|p| p.id == default_id) {
        default_id
    } else {
        &first.id
    }
}

fn prepare_question(raw: RawQuestion, position: usize) -> Result<Question> {
    let id = match raw.id {
        Some(RawId::Number(n)) => n.to_string(),
        Some(RawId::Text(s)) if !s.is_empty() => s,
        _ => (position + 1).to_string(),
    };
    let label = raw
        .label
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| id.clone());

    let correct = if raw.correct_options.is_empty() {
        raw.correct_index.into_iter().collect()
    } else {
        raw.correct_options
    };
    let choice_max = u32::try_from(correct.len()).unwrap_or(u32::MAX).max(1);

    let (kind, max_score) = match raw.question_type.as_str() {
        "single" | "mcq" => (
            QuestionKind::SingleChoice(ChoiceQuestion::new(raw.options, correct)),
            raw.max_score.unwrap_or(choice_max),
        ),
        "multi" => (
            QuestionKind::MultiChoice(ChoiceQuestion::new(raw.options, correct)),
            raw.max_score.unwrap_or(choice_max),
        ),
        "boolean" => {
            let options = if raw.options.is_empty() {
                vec!["True".to_string(), "False".to_string()]
            } else {
                raw.options
            };
            (
                QuestionKind::Boolean(ChoiceQuestion::new(options, correct)),
                raw.max_score.unwrap_or(choice_max),
            )
        }
        "matrix" => {
            let statements: Vec<Statement> = raw
                .statements
                .into_iter()
                .map(from_value_or_default::<RawStatement>)
                .map(|s| Statement::new(s.text, s.options, s.correct_index))
                .collect();
            let default_max = u32::try_from(statements.len()).unwrap_or(u32::MAX);
            (
                QuestionKind::Matrix(MatrixQuestion { statements }),
                raw.max_score.unwrap_or(default_max),
            )
        }
        "short" | "short-text" | "short_text" => {
            let config = raw.marking_config.unwrap_or_default();
            let rubric = Rubric::compile(&config).map_err(|source| PackError::Rubric {
                question: id.clone(),
                source,
            })?;
            (
                QuestionKind::ShortText(ShortTextQuestion::new(rubric)),
                raw.max_score.or(config.max_score).unwrap_or(1),
            )
        }
        other => {
            warn!(question = %id, question_type = other, "unsupported question type");
            (
                QuestionKind::Unsupported {
                    type_name: other.to_string(),
                },
                0,
            )
        }
    };

    Ok(Question::new(id, label, raw.text, kind, max_score))
}
