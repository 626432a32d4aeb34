use std::collections::HashSet;

use crate::{
    errors::{AppError, AppResult},
    models::domain::question::{Answer, AnswerArity},
};

/// Outcome of grading one submission against a question's answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grading {
    pub is_correct: bool,
    pub correct_answer_ids: Vec<String>,
    pub incorrect_selections: Vec<String>,
    pub unselected_correct: Vec<String>,
}

/// Grades a selected answer set. Duplicate ids in the submission are
/// collapsed to their first occurrence before comparison, so `[A, A]` on a
/// single-answer question grades as `[A]`.
///
/// Single arity: exactly one selection, and it must be correct. Selecting
/// more than one id is always wrong, even if every selection is a correct id.
/// Multiple arity: the selected set must equal the correct set exactly; no
/// subset or superset credit.
pub fn grade(arity: AnswerArity, answers: &[Answer], selected_ids: &[String]) -> AppResult<Grading> {
    if answers.is_empty() {
        return Err(AppError::Validation(
            "Question has no answers to grade against".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let selected: Vec<&String> = selected_ids.iter().filter(|id| seen.insert(*id)).collect();

    let correct_answer_ids: Vec<String> = answers
        .iter()
        .filter(|a| a.correct)
        .map(|a| a.id.clone())
        .collect();
    let correct_set: HashSet<&String> = correct_answer_ids.iter().collect();
    let selected_set: HashSet<&String> = selected.iter().copied().collect();

    let incorrect_selections: Vec<String> = selected
        .iter()
        .filter(|id| !correct_set.contains(**id))
        .map(|id| (*id).clone())
        .collect();

    let unselected_correct: Vec<String> = correct_answer_ids
        .iter()
        .filter(|id| !selected_set.contains(*id))
        .cloned()
        .collect();

    let is_correct = match arity {
        AnswerArity::Single => selected.len() == 1 && incorrect_selections.is_empty(),
        AnswerArity::Multiple => incorrect_selections.is_empty() && unselected_correct.is_empty(),
    };

    Ok(Grading {
        is_correct,
        correct_answer_ids,
        incorrect_selections,
        unselected_correct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(correct: &[&str], incorrect: &[&str]) -> Vec<Answer> {
        let mut all: Vec<Answer> = correct
            .iter()
            .map(|text| Answer::new(text, true, None))
            .collect();
        all.extend(incorrect.iter().map(|text| Answer::new(text, false, None)));
        all
    }

    fn id_of(answers: &[Answer], text: &str) -> String {
        answers.iter().find(|a| a.text == text).unwrap().id.clone()
    }

    #[test]
    fn test_single_exact_correct_selection() {
        let answers = answers(&["A"], &["B", "C", "D"]);
        let a = id_of(&answers, "A");

        let grading = grade(AnswerArity::Single, &answers, &[a.clone()]).unwrap();
        assert!(grading.is_correct);
        assert!(grading.incorrect_selections.is_empty());
        assert!(grading.unselected_correct.is_empty());
    }

    #[test]
    fn test_single_wrong_selection_reports_it() {
        let answers = answers(&["A"], &["B", "C", "D"]);
        let a = id_of(&answers, "A");
        let b = id_of(&answers, "B");

        let grading = grade(AnswerArity::Single, &answers, &[b.clone()]).unwrap();
        assert!(!grading.is_correct);
        assert_eq!(grading.incorrect_selections, vec![b]);
        assert_eq!(grading.unselected_correct, vec![a]);
    }

    #[test]
    fn test_single_rejects_multiple_selections() {
        let answers = answers(&["A"], &["B"]);
        let a = id_of(&answers, "A");
        let b = id_of(&answers, "B");

        let grading = grade(AnswerArity::Single, &answers, &[a, b]).unwrap();
        assert!(!grading.is_correct);
    }

    #[test]
    fn test_single_rejects_extra_correct_looking_selection() {
        // Two answers flagged correct on a single-arity question; selecting
        // both is still wrong because exactly one choice is allowed.
        let answers = answers(&["A", "B"], &["C"]);
        let a = id_of(&answers, "A");
        let b = id_of(&answers, "B");

        let grading = grade(AnswerArity::Single, &answers, &[a, b]).unwrap();
        assert!(!grading.is_correct);
    }

    #[test]
    fn test_multiple_requires_exact_set() {
        let answers = answers(&["A", "B"], &["C"]);
        let a = id_of(&answers, "A");
        let b = id_of(&answers, "B");
        let c = id_of(&answers, "C");

        let exact = grade(AnswerArity::Multiple, &answers, &[a.clone(), b.clone()]).unwrap();
        assert!(exact.is_correct);

        let subset = grade(AnswerArity::Multiple, &answers, &[a.clone()]).unwrap();
        assert!(!subset.is_correct);
        assert_eq!(subset.unselected_correct, vec![b.clone()]);

        let superset = grade(AnswerArity::Multiple, &answers, &[a, b, c.clone()]).unwrap();
        assert!(!superset.is_correct);
        assert_eq!(superset.incorrect_selections, vec![c]);
    }

    #[test]
    fn test_empty_selection_is_never_correct() {
        let single = answers(&["A"], &["B"]);
        assert!(!grade(AnswerArity::Single, &single, &[]).unwrap().is_correct);

        let multi = answers(&["A", "B"], &[]);
        assert!(!grade(AnswerArity::Multiple, &multi, &[]).unwrap().is_correct);
    }

    #[test]
    fn test_duplicate_selections_are_collapsed() {
        let answers = answers(&["A"], &["B"]);
        let a = id_of(&answers, "A");

        let grading = grade(AnswerArity::Single, &answers, &[a.clone(), a]).unwrap();
        assert!(grading.is_correct);
    }

    #[test]
    fn test_question_without_answers_is_not_gradable() {
        let result = grade(AnswerArity::Single, &[], &["x".to_string()]);
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
