use std::sync::Arc;

use crate::{
    auth::{require_owner_or_admin, Claims},
    errors::{AppError, AppResult},
    models::domain::question::{Answer, Question},
    models::dto::request::{CreateQuestionRequest, UpdateAnswerRequest, UpdateQuestionRequest},
    repositories::{CategoryRepository, QuestionRepository},
};
use validator::Validate;

const DEFAULT_PAGE_SIZE: i64 = 10;

pub struct QnaService {
    questions: Arc<dyn QuestionRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl QnaService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            questions,
            categories,
        }
    }

    async fn require_category(&self, category_id: &str) -> AppResult<()> {
        self.categories
            .find_by_id(category_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Category with id '{}' not found", category_id))
            })?;
        Ok(())
    }

    /// Question and answers land in one document, so the creation is atomic.
    pub async fn create_question(
        &self,
        claims: &Claims,
        request: CreateQuestionRequest,
    ) -> AppResult<Question> {
        request.validate()?;
        self.require_category(&request.category_id).await?;

        let answers: Vec<Answer> = request
            .answers
            .iter()
            .map(|a| Answer::new(&a.text, a.correct, a.note.clone()))
            .collect();

        if !answers.iter().any(|a| a.correct) {
            return Err(AppError::Validation(
                "At least one answer must be marked correct".to_string(),
            ));
        }

        let mut question = Question::new(
            &request.category_id,
            &claims.user_id,
            request.arity,
            &request.prompt,
            answers,
        );
        question.note = request.note;
        question.link_url = request.link_url;
        question.group_id = request.group_id;

        let question = self.questions.create(question).await?;
        log::info!(
            "Created question {} in category {} with {} answers",
            question.id,
            question.category_id,
            question.answers.len()
        );

        Ok(question)
    }

    pub async fn get_question(&self, id: &str) -> AppResult<Question> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }

    pub async fn list_questions(
        &self,
        category_id: Option<String>,
        skip: Option<u64>,
        limit: Option<i64>,
    ) -> AppResult<Vec<Question>> {
        if let Some(cid) = &category_id {
            self.require_category(cid).await?;
        }

        self.questions
            .find_all(
                category_id,
                skip.unwrap_or(0),
                limit.unwrap_or(DEFAULT_PAGE_SIZE),
            )
            .await
    }

    /// Patch update: absent fields are left unchanged.
    pub async fn update_question(
        &self,
        claims: &Claims,
        id: &str,
        patch: UpdateQuestionRequest,
    ) -> AppResult<Question> {
        patch.validate()?;

        let mut question = self.get_question(id).await?;
        require_owner_or_admin(claims, &question.created_by)?;

        if let Some(category_id) = patch.category_id {
            self.require_category(&category_id).await?;
            question.category_id = category_id;
        }
        if let Some(arity) = patch.arity {
            question.arity = arity;
        }
        if let Some(prompt) = patch.prompt {
            question.prompt = prompt;
        }
        if let Some(note) = patch.note {
            question.note = Some(note);
        }
        if let Some(link_url) = patch.link_url {
            question.link_url = Some(link_url);
        }

        self.questions.update(id, question).await
    }

    /// Patch update of a single answer, addressed by its own id. The whole
    /// question document is rewritten, so the edit is atomic.
    pub async fn update_answer(
        &self,
        claims: &Claims,
        answer_id: &str,
        patch: UpdateAnswerRequest,
    ) -> AppResult<Question> {
        patch.validate()?;

        let mut question = self
            .questions
            .find_by_answer_id(answer_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Answer with id '{}' not found", answer_id))
            })?;
        require_owner_or_admin(claims, &question.created_by)?;

        let answer = question
            .answers
            .iter_mut()
            .find(|a| a.id == answer_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Answer with id '{}' not found", answer_id))
            })?;

        if let Some(text) = patch.text {
            answer.text = text;
        }
        if let Some(correct) = patch.correct {
            answer.correct = correct;
        }
        if let Some(note) = patch.note {
            answer.note = Some(note);
        }

        if !question.answers.iter().any(|a| a.correct) {
            return Err(AppError::Validation(
                "At least one answer must stay marked correct".to_string(),
            ));
        }

        let id = question.id.clone();
        self.questions.update(&id, question).await
    }

    /// Deleting the question document removes its embedded answers with it.
    pub async fn delete_question(&self, claims: &Claims, id: &str) -> AppResult<()> {
        let question = self.get_question(id).await?;
        require_owner_or_admin(claims, &question.created_by)?;

        self.questions.delete(id).await?;
        log::info!("Deleted question {}", id);
        Ok(())
    }
}
