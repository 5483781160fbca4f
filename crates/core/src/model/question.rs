use thiserror::Error;

use crate::random::RandomSource;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("correct answer cannot be empty")]
    EmptyAnswer,

    #[error("question has no incorrect answers")]
    NoDistractors,

    #[error("correct answer appears {count} times in the answer list")]
    CorrectAnswerCount { count: usize },
}

/// A multiple-choice question with a fixed presentation order.
///
/// The answer list always contains the correct answer exactly once; the order is
/// decided when the question is built and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    correct_answer: String,
    answers: Vec<String>,
}

impl Question {
    /// Build a question, shuffling the correct answer in among the incorrect ones.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or correct answer is blank, no incorrect
    /// answers are given, or an incorrect answer repeats the correct one.
    pub fn new(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        incorrect_answers: Vec<String>,
        random: &RandomSource,
    ) -> Result<Self, QuestionError> {
        if incorrect_answers.is_empty() {
            return Err(QuestionError::NoDistractors);
        }
        let correct_answer = correct_answer.into();
        let mut answers = incorrect_answers;
        answers.push(correct_answer.clone());
        random.shuffle(&mut answers);
        Self::with_order(prompt, correct_answer, answers)
    }

    /// Build a question whose answers are already in presentation order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt or correct answer is blank, or the
    /// correct answer does not appear exactly once in `answers`.
    pub fn with_order(
        prompt: impl Into<String>,
        correct_answer: impl Into<String>,
        answers: Vec<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();
        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if correct_answer.trim().is_empty() {
            return Err(QuestionError::EmptyAnswer);
        }
        if answers.len() < 2 {
            return Err(QuestionError::NoDistractors);
        }
        let count = answers.iter().filter(|a| **a == correct_answer).count();
        if count != 1 {
            return Err(QuestionError::CorrectAnswerCount { count });
        }

        Ok(Self {
            prompt,
            correct_answer,
            answers,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    #[must_use]
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    /// Exact comparison against the correct answer; no normalization.
    #[must_use]
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }
}
