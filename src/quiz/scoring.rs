//! Quiz grading.
//!
//! Grading happens on the client so the student sees the result at once; the graded submission
//! is then sent to the API as is.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::entity::{
    AnswerValue, Question, QuestionKind, QuizSubmissionCreate, SubmittedAnswer,
};

pub const DEFAULT_PASS_THRESHOLD: u32 = 70;

/// Answers keyed by [`Question::key`].
pub type AnswerSheet = HashMap<String, AnswerValue>;

/// `round(100 × correct / total)`, zero for an empty quiz.
pub fn score_percentage(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }

    (100.0 * correct as f64 / total as f64).round() as u32
}

pub fn answer_matches(question: &Question, answer: &AnswerValue) -> bool {
    match (question.kind, &question.correct_answer, answer) {
        (QuestionKind::ShortAnswer, expected, given) => {
            normalize(&expected.to_string()) == normalize(&given.to_string())
        }
        (_, AnswerValue::Index(expected), AnswerValue::Index(given)) => expected == given,
        // a choice answered by its text, or a key stored as text
        (_, AnswerValue::Index(expected), AnswerValue::Text(given)) => question
            .options
            .get(*expected)
            .is_some_and(|option| normalize(option) == normalize(given)),
        (_, AnswerValue::Text(expected), AnswerValue::Index(given)) => question
            .options
            .get(*given)
            .is_some_and(|option| normalize(option) == normalize(expected)),
        (_, AnswerValue::Text(expected), AnswerValue::Text(given)) => {
            normalize(expected) == normalize(given)
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionResult {
    pub question_id: String,
    pub answer: Option<AnswerValue>,
    pub is_correct: bool,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub questions: Vec<QuestionResult>,
    pub correct: usize,
    pub total: usize,
    pub percentage: u32,
    pub points_earned: u32,
    pub points_possible: u32,
}

impl QuizResult {
    pub fn passed(&self, threshold: u32) -> bool {
        self.percentage >= threshold
    }

    pub fn answers(&self) -> Vec<SubmittedAnswer> {
        self.questions
            .iter()
            .map(|q| SubmittedAnswer {
                question_id: q.question_id.clone(),
                answer: q.answer.clone(),
                is_correct: q.is_correct,
            })
            .collect()
    }
}

/// Grades `answers` against `questions`. A question without an answer counts as wrong.
pub fn grade<'q, I>(questions: I, answers: &AnswerSheet) -> QuizResult
where
    I: IntoIterator<Item = &'q Question>,
{
    let mut results = Vec::new();
    let mut points_earned = 0;
    let mut points_possible = 0;

    for (position, question) in questions.into_iter().enumerate() {
        let key = question.key(position);
        let answer = answers.get(&key).cloned();
        let is_correct = answer
            .as_ref()
            .is_some_and(|a| answer_matches(question, a));

        points_possible += question.points;
        let points = if is_correct { question.points } else { 0 };
        points_earned += points;

        results.push(QuestionResult {
            question_id: key,
            answer,
            is_correct,
            points,
        });
    }

    let correct = results.iter().filter(|r| r.is_correct).count();
    let total = results.len();

    QuizResult {
        questions: results,
        correct,
        total,
        percentage: score_percentage(correct, total),
        points_earned,
        points_possible,
    }
}

/// A quiz being taken: remembers when it started and collects answers.
#[derive(Debug, Clone)]
pub struct QuizAttempt {
    module_id: String,
    questions: Vec<Question>,
    answers: AnswerSheet,
    started_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn start(module_id: &str, questions: Vec<Question>) -> Self {
        Self {
            module_id: module_id.to_string(),
            questions,
            answers: AnswerSheet::new(),
            started_at: Utc::now(),
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Records the answer for the question at `position`; false when there is no such question.
    pub fn answer(&mut self, position: usize, answer: AnswerValue) -> bool {
        let Some(question) = self.questions.get(position) else {
            return false;
        };
        self.answers.insert(question.key(position), answer);
        true
    }

    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    pub fn grade(&self) -> QuizResult {
        grade(&self.questions, &self.answers)
    }

    /// Grades the attempt and builds the submission body.
    pub fn finish(self) -> (QuizResult, QuizSubmissionCreate) {
        let result = self.grade();
        let submission = QuizSubmissionCreate {
            module_id: self.module_id,
            answers: result.answers(),
            score: result.points_earned as f64,
            total_questions: result.total,
            correct_answers: result.correct,
            percentage: result.percentage,
            started_at: self.started_at,
            submitted_at: Utc::now(),
        };
        (result, submission)
    }
}
