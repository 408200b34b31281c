//! Multiple-choice knowledge quiz.
//!
//! The bank is static; a [`QuizSession`] walks it one question at a time and
//! keeps the score. Results are not fed into goal progress.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::progress::percentage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    /// Index into `options`
    pub correct: usize,
}

impl Question {
    fn new(id: &str, prompt: &str, options: &[&str], correct: usize) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct,
        }
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The built-in React Native quiz.
    pub fn default_bank() -> Self {
        Self::new(vec![
            Question::new(
                "1",
                "What is React Native used for?",
                &[
                    "Web development only",
                    "Mobile app development",
                    "Desktop applications",
                    "Game development",
                ],
                1,
            ),
            Question::new(
                "2",
                "Which company created React Native?",
                &["Google", "Microsoft", "Facebook (Meta)", "Apple"],
                2,
            ),
            Question::new(
                "3",
                "What language is primarily used in React Native?",
                &["Python", "JavaScript", "Swift", "Kotlin"],
                1,
            ),
            Question::new(
                "4",
                "What is a component in React Native?",
                &["A database", "A reusable piece of UI", "A server", "A testing tool"],
                1,
            ),
            Question::new(
                "5",
                "What hook is used for state management in functional components?",
                &["useEffect", "useState", "useContext", "useReducer"],
                1,
            ),
        ])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::default_bank()
    }
}

/// One pass through a question bank.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    position: usize,
    selected: Option<usize>,
    score: usize,
    complete: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(QuestionBank::default_bank())
    }
}

impl QuizSession {
    pub fn new(bank: QuestionBank) -> Self {
        let complete = bank.is_empty();
        Self {
            bank,
            position: 0,
            selected: None,
            score: 0,
            complete,
        }
    }

    /// The question awaiting an answer, or `None` once the quiz is complete.
    pub fn current(&self) -> Option<&Question> {
        if self.complete {
            return None;
        }
        self.bank.get(self.position)
    }

    /// Zero-based position of the current question.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Option recorded for the current question, if any.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Record an answer to the current question and report whether the
    /// recorded answer is correct. Only the first answer per question
    /// counts; later calls report on that first answer.
    pub fn answer(&mut self, option: usize) -> Result<bool, ValidationError> {
        let Some(question) = self.current() else {
            return Err(ValidationError::InvalidValue {
                field: "answer".into(),
                message: "quiz is already complete".into(),
            });
        };

        if option >= question.options.len() {
            return Err(ValidationError::OutOfBounds {
                collection: "options".into(),
                index: option,
                len: question.options.len(),
            });
        }

        if let Some(previous) = self.selected {
            return Ok(question.is_correct(previous));
        }

        let correct = question.is_correct(option);
        self.selected = Some(option);
        if correct {
            self.score += 1;
        }
        Ok(correct)
    }

    /// Move to the next question. Returns false when the last question was
    /// just left and the quiz is now complete.
    pub fn advance(&mut self) -> bool {
        if self.complete {
            return false;
        }
        self.selected = None;
        if self.position + 1 < self.bank.len() {
            self.position += 1;
            true
        } else {
            self.complete = true;
            false
        }
    }

    pub fn restart(&mut self) {
        self.position = 0;
        self.selected = None;
        self.score = 0;
        self.complete = self.bank.is_empty();
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.bank.len()
    }

    pub fn percentage(&self) -> u8 {
        percentage(self.score, self.bank.len())
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Closing remark for the final score.
    pub fn verdict(&self) -> &'static str {
        match self.percentage() {
            80.. => "Excellent! You're mastering this topic!",
            60.. => "Good job! Keep practicing!",
            _ => "Keep learning! You'll get better!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER_KEY: [usize; 5] = [1, 2, 1, 1, 1];

    #[test]
    fn default_bank_has_fixed_answer_key() {
        let bank = QuestionBank::default_bank();
        let key: Vec<usize> = bank.iter().map(|q| q.correct).collect();
        assert_eq!(key, ANSWER_KEY);
        assert!(bank.iter().all(|q| q.options.len() == 4));
    }

    #[test]
    fn perfect_run_scores_full_marks() {
        let mut quiz = QuizSession::default();
        for option in ANSWER_KEY {
            assert!(quiz.answer(option).unwrap());
            quiz.advance();
        }
        assert!(quiz.is_complete());
        assert!(quiz.current().is_none());
        assert_eq!(quiz.score(), 5);
        assert_eq!(quiz.percentage(), 100);
        assert_eq!(quiz.verdict(), "Excellent! You're mastering this topic!");
    }

    #[test]
    fn only_first_answer_counts() {
        let mut quiz = QuizSession::default();
        assert!(!quiz.answer(0).unwrap());
        assert!(!quiz.answer(1).unwrap());
        assert_eq!(quiz.selected(), Some(0));
        assert_eq!(quiz.score(), 0);
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let mut quiz = QuizSession::default();
        assert_eq!(
            quiz.answer(4),
            Err(ValidationError::OutOfBounds {
                collection: "options".into(),
                index: 4,
                len: 4,
            })
        );
        assert_eq!(quiz.selected(), None);
    }

    #[test]
    fn answering_after_completion_is_rejected() {
        let mut quiz = QuizSession::default();
        while quiz.advance() {}
        assert!(quiz.is_complete());
        assert!(quiz.answer(1).is_err());
    }

    #[test]
    fn partial_score_is_rounded() {
        let mut quiz = QuizSession::new(QuestionBank::new(
            QuestionBank::default_bank().iter().take(3).cloned().collect(),
        ));
        quiz.answer(1).unwrap();
        quiz.advance();
        quiz.answer(0).unwrap();
        quiz.advance();
        quiz.answer(0).unwrap();
        quiz.advance();
        assert_eq!(quiz.score(), 1);
        assert_eq!(quiz.percentage(), 33);
        assert_eq!(quiz.verdict(), "Keep learning! You'll get better!");
    }

    #[test]
    fn restart_resets_progress() {
        let mut quiz = QuizSession::default();
        quiz.answer(1).unwrap();
        quiz.advance();
        quiz.restart();
        assert_eq!(quiz.position(), 0);
        assert_eq!(quiz.score(), 0);
        assert!(!quiz.is_complete());
        assert_eq!(quiz.current().unwrap().id, "1");
    }
}
