mod scoring;
pub use scoring::{
    AnswerSheet, DEFAULT_PASS_THRESHOLD, QuestionResult, QuizAttempt, QuizResult, answer_matches,
    grade, score_percentage,
};
