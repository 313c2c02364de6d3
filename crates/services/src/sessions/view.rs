use serde::Serialize;

use quiz_core::model::OptionNumber;

/// Result of one question after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionOutcome {
    /// 0-based index into the loaded questions.
    pub index: usize,
    pub prompt: String,
    pub chosen: Option<OptionNumber>,
    pub correct_option: Option<OptionNumber>,
    pub is_correct: bool,
}

impl QuestionOutcome {
    /// 1-based question number as shown to the user.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Score and per-question results of a submitted session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSummary {
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    /// Seconds between load and submit.
    pub elapsed_seconds: i64,
    pub outcomes: Vec<QuestionOutcome>,
}

impl ResultSummary {
    /// Score as a percentage of all questions, answered or not.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 * 100.0 / self.total as f64
    }

    /// Questions that had no answer key in the source file.
    pub fn unkeyed(&self) -> impl Iterator<Item = &QuestionOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.correct_option.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(index: usize, correct: Option<&str>, is_correct: bool) -> QuestionOutcome {
        QuestionOutcome {
            index,
            prompt: format!("Q{index}"),
            chosen: None,
            correct_option: correct.map(|c| OptionNumber::parse(c).unwrap()),
            is_correct,
        }
    }

    #[test]
    fn percentage_counts_unanswered_as_wrong() {
        let summary = ResultSummary {
            score: 1,
            total: 4,
            answered: 1,
            elapsed_seconds: 0,
            outcomes: Vec::new(),
        };
        assert!((summary.percentage() - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn unkeyed_lists_questions_without_answer_marker() {
        let summary = ResultSummary {
            score: 0,
            total: 2,
            answered: 0,
            elapsed_seconds: 0,
            outcomes: vec![outcome(0, Some("1"), false), outcome(1, None, false)],
        };
        let unkeyed: Vec<_> = summary.unkeyed().map(QuestionOutcome::number).collect();
        assert_eq!(unkeyed, [2]);
    }
}
