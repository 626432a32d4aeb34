use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-question completion state within one session.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionQuestion {
    pub question_id: String,
    /// 1-based order within the session.
    pub position: i32,
    pub answered: bool,
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answered_at: Option<DateTime<Utc>>,
}

impl SessionQuestion {
    pub fn new(question_id: &str, position: i32) -> Self {
        SessionQuestion {
            question_id: question_id.to_string(),
            position,
            answered: false,
            correct: false,
            answered_at: None,
        }
    }
}

/// A bounded, ordered subset of one category's questions. The session
/// questions are embedded so a completion update is a single-document write.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizSession {
    pub id: String,
    pub category_id: String,
    pub owner_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub questions: Vec<SessionQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    pub fn new(
        category_id: &str,
        owner_id: &str,
        name: &str,
        description: Option<String>,
        question_ids: &[String],
    ) -> Self {
        let questions = question_ids
            .iter()
            .enumerate()
            .map(|(idx, qid)| SessionQuestion::new(qid, idx as i32 + 1))
            .collect();

        QuizSession {
            id: Uuid::new_v4().to_string(),
            category_id: category_id.to_string(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            description,
            questions,
            created_at: Some(Utc::now()),
        }
    }

    pub fn contains_question(&self, question_id: &str) -> bool {
        self.questions.iter().any(|q| q.question_id == question_id)
    }

    pub fn completed_count(&self) -> usize {
        self.questions.iter().filter(|q| q.answered).count()
    }

    pub fn correct_count(&self) -> usize {
        self.questions.iter().filter(|q| q.correct).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_session() -> QuizSession {
        QuizSession::new(
            "cat-1",
            "user-1",
            "Evening drill",
            None,
            &["q-1".to_string(), "q-2".to_string(), "q-3".to_string()],
        )
    }

    #[test]
    fn test_positions_are_one_based_and_ordered() {
        let session = make_session();
        let positions: Vec<i32> = session.questions.iter().map(|q| q.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_new_session_has_no_completed_questions() {
        let session = make_session();
        assert_eq!(session.completed_count(), 0);
        assert_eq!(session.correct_count(), 0);
        assert!(session.questions.iter().all(|q| q.answered_at.is_none()));
    }

    #[test]
    fn test_contains_question() {
        let session = make_session();
        assert!(session.contains_question("q-2"));
        assert!(!session.contains_question("q-9"));
    }
}
