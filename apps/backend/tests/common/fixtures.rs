//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

pub const LANTERN_ID: &str = "lantern_point";
pub const STREAKY_ID: &str = "ks2_2024_streaky_and_squeaky";

/// Pack in the older format: `mcq` questions with `correctIndex`.
pub const LANTERN_PACK: &str = r#"{
    "title": "The Keeper of Lantern Point",
    "text": [
        { "type": "heading", "text": "Gullhaven" },
        { "type": "paragraph", "text": "Lantern Point Lighthouse had guided ships for a hundred years." },
        { "type": "quote", "text": "The light belongs to everyone." }
    ],
    "questions": [
        {
            "id": 1,
            "type": "mcq",
            "text": "Why do the villagers of Gullhaven feel connected to Lantern Point Lighthouse?",
            "options": [
                "They believe the light can predict when storms will end.",
                "They rely on its steady beam for safety and guidance.",
                "They use the tower as a meeting place during festivals.",
                "They think it hides a treasure beneath the lamp room."
            ],
            "correctIndex": 1
        },
        {
            "id": 2,
            "type": "short",
            "text": "List two unusual supplies that Rafi noticed being delivered to the lighthouse.",
            "markingConfig": {
                "requiredPatterns": ["\\bclockwork\\b", "\\bcopper\\s+wire\\b", "\\bglow\\s*lantern\\s*algae\\b"],
                "fuzzyKeywords": ["clockwork parts", "copper wire", "glow lantern algae"],
                "fuzzyThreshold": 0.82
            }
        },
        {
            "id": 5,
            "type": "short",
            "text": "Explain in one or two sentences what promise Mrs. Calder keeps through her work.",
            "markingConfig": {
                "requiredPatterns": ["\\bguide\\b.*\\btraveler(s)?\\b", "\\blight\\b.*\\beveryone\\b"],
                "fuzzyKeywords": ["guide every traveler", "light belongs to everyone"],
                "fuzzyThreshold": 0.8
            }
        },
        {
            "id": 9,
            "type": "boolean",
            "text": "True or False: Mrs. Calder plans to keep the light-bending method a secret.",
            "options": ["True", "False"],
            "correctIndex": 1
        }
    ]
}"#;

/// Pack in the newer format: single/multi/matrix with `correctOptions`.
pub const STREAKY_PACK: &str = r#"{
    "title": "Streaky and Squeaky",
    "text": [{ "text": "Two squirrels lived in the old oak." }],
    "questions": [
        {
            "id": "1",
            "label": "1",
            "type": "single",
            "text": "Where did the squirrels live?",
            "options": ["A barn", "An oak", "A hedge"],
            "correctOptions": [1]
        },
        {
            "id": "2",
            "label": "2a",
            "type": "multi",
            "text": "Tick two things Streaky collected.",
            "options": ["Acorns", "Pebbles", "Hazelnuts", "Feathers"],
            "correctOptions": [0, 2],
            "maxScore": 1
        },
        {
            "id": "3",
            "type": "matrix",
            "text": "Fact or opinion?",
            "statements": [
                { "text": "Squeaky was the youngest.", "options": ["Fact", "Opinion"], "correctIndex": 0 },
                { "text": "Oaks are the best trees.", "options": ["Fact", "Opinion"], "correctIndex": 1 },
                { "text": "The oak was old.", "options": ["Fact", "Opinion"], "correctIndex": 0 }
            ]
        },
        {
            "id": "4",
            "type": "short",
            "text": "How did the squirrels feel in the storm?",
            "markingConfig": {
                "acceptablePoints": [
                    { "requiredPatterns": ["\\bfelt\\b.*\\bsafe\\b"], "fuzzyKeywords": ["felt safe"] },
                    { "fuzzyKeywords": ["scared", "frightened"], "fuzzyThreshold": 0.8 }
                ]
            }
        }
    ]
}"#;

/// Pack whose rubric pattern does not compile.
pub const BROKEN_PACK: &str = r#"{
    "questions": [
        { "id": 1, "type": "short", "markingConfig": { "requiredPatterns": ["(unclosed"] } }
    ]
}"#;

pub fn manifest() -> String {
    json!({
        "packs": [
            { "id": LANTERN_ID, "title": "The Keeper of Lantern Point" },
            { "id": STREAKY_ID, "title": "Streaky and Squeaky" }
        ]
    })
    .to_string()
}

/// Answer selecting option indices.
pub fn choice(question_id: &str, selected: &[usize]) -> Value {
    json!({ "question_id": question_id, "answer": { "kind": "choice", "selected": selected } })
}

/// Answer for a matrix question, one entry per statement.
pub fn matrix(question_id: &str, selected: &[Option<usize>]) -> Value {
    json!({ "question_id": question_id, "answer": { "kind": "matrix", "selected": selected } })
}

/// Free-text answer.
pub fn text(question_id: &str, text: &str) -> Value {
    json!({ "question_id": question_id, "answer": { "kind": "text", "text": text } })
}

pub fn mark_request(answers: Vec<Value>) -> Value {
    json!({ "answers": answers })
}
