use serde::{Deserialize, Serialize};

use crate::model::db::question::{AnswerOption, NewQuestion, Question};

/// The difficulty substituted when a submission omits the field.
pub const DEFAULT_DIFFICULTY: &str = "medium";

fn default_difficulty() -> Option<String> {
    Some(DEFAULT_DIFFICULTY.to_string())
}

/// A question as submitted by clients.
///
/// Default substitution happens here, at the deserialization boundary:
/// a missing `difficulty` becomes [`DEFAULT_DIFFICULTY`], and a missing
/// `isCorrect` on any option becomes `false`. What the store holds is
/// exactly what this produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSpec {
    pub prompt: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    pub options: Vec<AnswerOption>,
}

impl From<QuestionSpec> for NewQuestion {
    fn from(spec: QuestionSpec) -> Self {
        Self {
            prompt: spec.prompt,
            difficulty: spec.difficulty,
            category: spec.category,
            options: spec.options,
        }
    }
}

/// A question as returned to clients.
///
/// The database-assigned identifier is exposed as a plain hex string so the
/// BSON `$oid` encoding never leaks into the HTTP surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDescription {
    pub id: String,
    pub prompt: String,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub options: Vec<AnswerOption>,
}

impl From<Question> for QuestionDescription {
    fn from(question: Question) -> Self {
        Self {
            id: question.id.to_string(),
            prompt: question.question.prompt,
            difficulty: question.question.difficulty,
            category: question.question.category,
            options: question.question.options,
        }
    }
}

/// A bare confirmation or error message, e.g. `{"msg": "Question removed"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Msg {
    pub msg: String,
}

impl Msg {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

/// Example data for tests.
#[cfg(test)]
mod examples {
    use super::*;

    impl QuestionSpec {
        pub fn example1() -> Self {
            Self {
                prompt: "What is the capital of Brazil?".to_string(),
                difficulty: Some("easy".to_string()),
                category: Some("geography".to_string()),
                options: vec![
                    AnswerOption {
                        text: "Brasília".to_string(),
                        is_correct: true,
                    },
                    AnswerOption {
                        text: "Rio de Janeiro".to_string(),
                        is_correct: false,
                    },
                ],
            }
        }

        pub fn example2() -> Self {
            Self {
                prompt: "Which keyword declares an immutable binding in Rust?".to_string(),
                difficulty: Some("medium".to_string()),
                category: Some("programming".to_string()),
                options: vec![
                    AnswerOption {
                        text: "let".to_string(),
                        is_correct: true,
                    },
                    AnswerOption {
                        text: "var".to_string(),
                        is_correct: false,
                    },
                    AnswerOption {
                        text: "mut".to_string(),
                        is_correct: false,
                    },
                ],
            }
        }

        pub fn example3() -> Self {
            Self {
                prompt: "Water boils at 100°C at sea level.".to_string(),
                difficulty: None,
                category: None,
                options: vec![
                    AnswerOption {
                        text: "True".to_string(),
                        is_correct: true,
                    },
                    AnswerOption {
                        text: "False".to_string(),
                        is_correct: false,
                    },
                ],
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rocket::serde::json::serde_json;

    use crate::model::mongodb::Id;

    use super::*;

    #[test]
    fn difficulty_defaults_to_medium() {
        let spec: QuestionSpec =
            serde_json::from_str(r#"{"prompt": "2+2=?", "options": [{"text": "4"}]}"#).unwrap();
        assert_eq!(spec.difficulty.as_deref(), Some(DEFAULT_DIFFICULTY));
        assert_eq!(spec.category, None);
        assert!(!spec.options[0].is_correct);
    }

    #[test]
    fn explicit_fields_are_kept() {
        let spec: QuestionSpec = serde_json::from_str(
            r#"{
                "prompt": "2+2=?",
                "difficulty": "hard",
                "category": "maths",
                "options": [{"text": "4", "isCorrect": true}]
            }"#,
        )
        .unwrap();
        assert_eq!(spec.difficulty.as_deref(), Some("hard"));
        assert_eq!(spec.category.as_deref(), Some("maths"));
        assert!(spec.options[0].is_correct);
    }

    #[test]
    fn description_exposes_plain_hex_id() {
        let question = Question {
            id: Id::new(),
            question: QuestionSpec::example1().into(),
        };
        let description = QuestionDescription::from(question.clone());
        assert_eq!(description.id, question.id.to_string());

        let value = serde_json::to_value(&description).unwrap();
        assert!(value["id"].is_string());
        assert_eq!(value["options"][0]["isCorrect"], true);
    }

    #[test]
    fn missing_category_serializes_as_null() {
        let description = QuestionDescription {
            id: Id::new().to_string(),
            prompt: "prompt".to_string(),
            difficulty: Some(DEFAULT_DIFFICULTY.to_string()),
            category: None,
            options: vec![],
        };
        let value = serde_json::to_value(&description).unwrap();
        assert!(value["category"].is_null());
    }
}
