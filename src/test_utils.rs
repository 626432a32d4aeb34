#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::question::{Answer, AnswerArity, Question};
    use crate::models::domain::{Category, QuizSession};

    pub fn test_category(name: &str) -> Category {
        Category::new(name)
    }

    /// Single-arity question with answers [A(correct), B, C, D].
    pub fn single_answer_question(category_id: &str) -> Question {
        Question::new(
            category_id,
            "creator-1",
            AnswerArity::Single,
            "Which option is right?",
            vec![
                Answer::new("A", true, None),
                Answer::new("B", false, None),
                Answer::new("C", false, None),
                Answer::new("D", false, None),
            ],
        )
    }

    /// Multiple-arity question with answers [A(correct), B(correct), C].
    pub fn multiple_answer_question(category_id: &str) -> Question {
        Question::new(
            category_id,
            "creator-1",
            AnswerArity::Multiple,
            "Select all that apply",
            vec![
                Answer::new("A", true, None),
                Answer::new("B", true, None),
                Answer::new("C", false, None),
            ],
        )
    }

    pub fn test_session(category_id: &str, owner_id: &str, question_ids: &[String]) -> QuizSession {
        QuizSession::new(category_id, owner_id, "Practice run", None, question_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::question::AnswerArity;

    #[test]
    fn test_single_answer_fixture_shape() {
        let question = single_answer_question("cat-1");
        assert_eq!(question.arity, AnswerArity::Single);
        assert_eq!(question.answers.len(), 4);
        assert_eq!(question.correct_answer_ids().len(), 1);
    }

    #[test]
    fn test_multiple_answer_fixture_shape() {
        let question = multiple_answer_question("cat-1");
        assert_eq!(question.arity, AnswerArity::Multiple);
        assert_eq!(question.correct_answer_ids().len(), 2);
    }

    #[test]
    fn test_session_fixture_positions() {
        let ids = vec!["q-1".to_string(), "q-2".to_string()];
        let session = test_session("cat-1", "user-1", &ids);
        assert_eq!(session.questions[0].position, 1);
        assert_eq!(session.questions[1].position, 2);
    }
}
