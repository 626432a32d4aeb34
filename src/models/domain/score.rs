use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One graded submission. Append-only history; summaries are aggregated
/// from these records at read time.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreRecord {
    pub id: String,
    pub user_id: String,
    pub question_id: String,
    pub category_id: String,
    pub correct: bool,
    pub selected_answer_ids: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl ScoreRecord {
    pub fn new(
        user_id: &str,
        question_id: &str,
        category_id: &str,
        correct: bool,
        selected_answer_ids: Vec<String>,
    ) -> Self {
        ScoreRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            question_id: question_id.to_string(),
            category_id: category_id.to_string(),
            correct,
            selected_answer_ids,
            submitted_at: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct CategoryStat {
    pub category_id: String,
    pub total_questions: i64,
    pub correct_answers: i64,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ScoreSummary {
    pub total_questions: i64,
    pub correct_answers: i64,
    pub accuracy_rate: f64,
    pub category_stats: Vec<CategoryStat>,
}

impl ScoreSummary {
    pub fn from_stats(category_stats: Vec<CategoryStat>) -> Self {
        let total_questions: i64 = category_stats.iter().map(|s| s.total_questions).sum();
        let correct_answers: i64 = category_stats.iter().map(|s| s.correct_answers).sum();
        let accuracy_rate = if total_questions > 0 {
            correct_answers as f64 / total_questions as f64
        } else {
            0.0
        };

        ScoreSummary {
            total_questions,
            correct_answers,
            accuracy_rate,
            category_stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_stats() {
        let summary = ScoreSummary::from_stats(vec![
            CategoryStat {
                category_id: "cat-1".to_string(),
                total_questions: 6,
                correct_answers: 3,
            },
            CategoryStat {
                category_id: "cat-2".to_string(),
                total_questions: 2,
                correct_answers: 1,
            },
        ]);

        assert_eq!(summary.total_questions, 8);
        assert_eq!(summary.correct_answers, 4);
        assert!((summary.accuracy_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_with_no_history() {
        let summary = ScoreSummary::from_stats(vec![]);
        assert_eq!(summary.total_questions, 0);
        assert_eq!(summary.accuracy_rate, 0.0);
    }
}
