use serde::{Deserialize, Serialize};

use crate::model::OptionNumber;

/// One multiple-choice question extracted from a quiz file.
///
/// The order of `options` defines the 1-based numbering used by both the
/// recorded answers and `correct_option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    text: String,
    options: Vec<String>,
    correct_option: Option<OptionNumber>,
}

impl QuestionRecord {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_option: Option<OptionNumber>,
    ) -> Self {
        Self {
            text: text.into(),
            options,
            correct_option,
        }
    }

    /// Prompt text with the `Q.<n>` marker removed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Option text at a 1-based position.
    #[must_use]
    pub fn option(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|idx| self.options.get(idx))
            .map(String::as_str)
    }

    /// Option numbers paired with their text, in source order.
    pub fn numbered_options(&self) -> impl Iterator<Item = (OptionNumber, &str)> + '_ {
        self.options.iter().enumerate().filter_map(|(idx, text)| {
            OptionNumber::from_position(idx + 1)
                .ok()
                .map(|n| (n, text.as_str()))
        })
    }

    /// The canonical number of the option `answer` points at, if this
    /// question has one there: `"03"` becomes `"3"`, `"7"` on a
    /// four-option question is `None`.
    #[must_use]
    pub fn offered_option(&self, answer: &OptionNumber) -> Option<OptionNumber> {
        let position = answer.position()?;
        self.option(position)?;
        OptionNumber::from_position(position).ok()
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&OptionNumber> {
        self.correct_option.as_ref()
    }

    /// Whether the source marked a correct option for this question.
    #[must_use]
    pub fn has_answer_key(&self) -> bool {
        self.correct_option.is_some()
    }

    /// A question without an answer key never credits any answer.
    #[must_use]
    pub fn is_correct(&self, answer: &OptionNumber) -> bool {
        self.correct_option.as_ref() == Some(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(correct: Option<&str>) -> QuestionRecord {
        QuestionRecord::new(
            "Capital of France?",
            vec!["Berlin".into(), "Paris".into(), "Rome".into()],
            correct.map(|c| OptionNumber::parse(c).unwrap()),
        )
    }

    #[test]
    fn option_lookup_is_one_based() {
        let q = sample(Some("2"));
        assert_eq!(q.option(0), None);
        assert_eq!(q.option(1), Some("Berlin"));
        assert_eq!(q.option(3), Some("Rome"));
        assert_eq!(q.option(4), None);
    }

    #[test]
    fn numbered_options_follow_source_order() {
        let q = sample(None);
        let numbers: Vec<_> = q
            .numbered_options()
            .map(|(n, text)| format!("{n}:{text}"))
            .collect();
        assert_eq!(numbers, ["1:Berlin", "2:Paris", "3:Rome"]);
    }

    #[test]
    fn offered_option_normalizes_padded_numbers() {
        let q = sample(Some("3"));
        let padded = OptionNumber::parse("03").unwrap();
        let canonical = q.offered_option(&padded).unwrap();
        assert_eq!(canonical.as_str(), "3");
        assert!(q.is_correct(&canonical));
    }

    #[test]
    fn offered_option_rejects_positions_without_option() {
        let q = sample(None);
        assert_eq!(q.offered_option(&OptionNumber::parse("0").unwrap()), None);
        assert_eq!(q.offered_option(&OptionNumber::parse("4").unwrap()), None);
    }

    #[test]
    fn missing_answer_key_never_matches() {
        let q = sample(None);
        assert!(!q.has_answer_key());
        for position in 1..=3 {
            assert!(!q.is_correct(&OptionNumber::from_position(position).unwrap()));
        }
    }

    #[test]
    fn correct_answer_matches_exactly() {
        let q = sample(Some("2"));
        assert!(q.is_correct(&OptionNumber::parse("2").unwrap()));
        assert!(!q.is_correct(&OptionNumber::parse("02").unwrap()));
        assert!(!q.is_correct(&OptionNumber::parse("1").unwrap()));
    }
}
