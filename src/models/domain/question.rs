use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a question expects exactly one correct selection or a set of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerArity {
    Single,
    Multiple,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Answer {
    pub id: String,
    pub text: String,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Answer {
    pub fn new(text: &str, correct: bool, note: Option<String>) -> Self {
        Answer {
            id: Uuid::new_v4().to_string(),
            text: text.to_string(),
            correct,
            note,
        }
    }
}

/// A question with its answers embedded. Creating or deleting a question
/// writes a single document, so the answer cascade is atomic.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: String,
    pub category_id: String,
    pub created_by: String,
    pub arity: AnswerArity,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_url: Option<String>,
    /// Inert grouping tag; no group semantics are attached server-side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    pub answers: Vec<Answer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Question {
    pub fn new(
        category_id: &str,
        created_by: &str,
        arity: AnswerArity,
        prompt: &str,
        answers: Vec<Answer>,
    ) -> Self {
        Question {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.to_string(),
            created_by: created_by.to_string(),
            arity,
            prompt: prompt.to_string(),
            note: None,
            link_url: None,
            group_id: None,
            answers,
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        }
    }

    pub fn correct_answer_ids(&self) -> Vec<String> {
        self.answers
            .iter()
            .filter(|a| a.correct)
            .map(|a| a.id.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AnswerArity::Single).unwrap(),
            "\"single\""
        );
        assert_eq!(
            serde_json::to_string(&AnswerArity::Multiple).unwrap(),
            "\"multiple\""
        );
    }

    #[test]
    fn test_arity_rejects_unknown_variant() {
        assert!(serde_json::from_str::<AnswerArity>("\"essay\"").is_err());
    }

    #[test]
    fn test_correct_answer_ids() {
        let answers = vec![
            Answer::new("A", true, None),
            Answer::new("B", false, None),
            Answer::new("C", true, None),
        ];
        let expected = vec![answers[0].id.clone(), answers[2].id.clone()];
        let question = Question::new("cat-1", "user-1", AnswerArity::Multiple, "Pick", answers);

        assert_eq!(question.correct_answer_ids(), expected);
    }

    #[test]
    fn test_question_round_trip_serialization() {
        let question = Question::new(
            "cat-1",
            "user-1",
            AnswerArity::Single,
            "What is 2 + 2?",
            vec![Answer::new("4", true, None), Answer::new("5", false, None)],
        );

        let json = serde_json::to_string(&question).unwrap();
        let parsed: Question = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, question);
    }
}
