use quiz_core::model::OptionNumber;
use services::{QuizSession, SessionStatus};

use super::time_fmt::format_elapsed;

/// One line of user input, decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    Select(OptionNumber),
    Next,
    Prev,
    Submit,
    Quit,
}

impl QuizIntent {
    /// Parse a terminal command: an option number, `n`, `p`, `s` or `q`.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "n" | "next" => Some(Self::Next),
            "p" | "prev" => Some(Self::Prev),
            "s" | "submit" => Some(Self::Submit),
            "q" | "quit" => Some(Self::Quit),
            _ => OptionNumber::parse(input).ok().map(Self::Select),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    /// The intent does not apply here (no such option, already at an end).
    Unavailable,
    Completed,
    Quit,
}

/// The button shown at the bottom of a question card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    Next,
    Submit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub number: OptionNumber,
    pub text: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub heading: String,
    pub options: Vec<OptionRowVm>,
    pub can_go_back: bool,
    pub primary: PrimaryAction,
    pub position: usize,
    pub total: usize,
    pub progress_percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub headline: String,
    pub percentage: String,
    pub lines: Vec<String>,
    /// Set when some questions had no answer key and could not be scored.
    pub unkeyed_note: Option<String>,
    pub elapsed: String,
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn apply(&mut self, intent: QuizIntent) -> QuizOutcome {
        let transition = match intent {
            QuizIntent::Quit => return QuizOutcome::Quit,
            QuizIntent::Select(option) => {
                let Some(offered) = self
                    .session
                    .current_question()
                    .and_then(|question| question.offered_option(&option))
                else {
                    return QuizOutcome::Unavailable;
                };
                self.session.select_answer(offered)
            }
            QuizIntent::Next => self.session.advance(),
            QuizIntent::Prev => self.session.retreat(),
            QuizIntent::Submit => self.session.submit(),
        };

        if self.session.status() == SessionStatus::Completed {
            QuizOutcome::Completed
        } else if transition.is_applied() {
            QuizOutcome::Continue
        } else {
            QuizOutcome::Unavailable
        }
    }

    #[must_use]
    pub fn question_card(&self) -> Option<QuestionCardVm> {
        if self.session.status() != SessionStatus::InProgress {
            return None;
        }
        let question = self.session.current_question()?;
        let progress = self.session.progress()?;

        let options = question
            .numbered_options()
            .map(|(number, text)| OptionRowVm {
                selected: self.session.is_selected(&number),
                number,
                text: text.to_owned(),
            })
            .collect();

        Some(QuestionCardVm {
            heading: format!("Q{}: {}", progress.position, question.text()),
            options,
            can_go_back: !progress.is_first,
            primary: if progress.is_last {
                PrimaryAction::Submit
            } else {
                PrimaryAction::Next
            },
            position: progress.position,
            total: progress.total,
            progress_percent: percent(progress.fraction()),
        })
    }

    #[must_use]
    pub fn results(&self) -> Option<ResultsVm> {
        let summary = self.session.results()?;
        let lines = summary
            .outcomes
            .iter()
            .map(|outcome| {
                let mark = if outcome.is_correct { "✅" } else { "❌" };
                let correct = outcome
                    .correct_option
                    .as_ref()
                    .map_or_else(|| "not marked".to_owned(), |c| format!("Option {c}"));
                format!("Q{}: {mark} (Correct: {correct})", outcome.number())
            })
            .collect();

        let unkeyed = summary.unkeyed().count();
        let unkeyed_note = (unkeyed > 0).then(|| {
            format!("{unkeyed} of {} questions had no answer marked", summary.total)
        });

        Some(ResultsVm {
            headline: format!("You scored {} out of {}", summary.score, summary.total),
            percentage: format!("{:.0}%", summary.percentage()),
            lines,
            unkeyed_note,
            elapsed: format_elapsed(summary.elapsed_seconds),
        })
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent(fraction: f64) -> u8 {
    (fraction.clamp(0.0, 1.0) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionRecord;
    use quiz_core::time::fixed_clock;

    fn opt(n: usize) -> OptionNumber {
        OptionNumber::from_position(n).unwrap()
    }

    fn vm() -> QuizVm {
        let mut session = QuizSession::new(fixed_clock());
        let _ = session.load(vec![
            QuestionRecord::new(
                "What is 2+2?",
                vec!["3".into(), "4".into(), "5".into()],
                Some(opt(2)),
            ),
            QuestionRecord::new("Unkeyed", vec!["yes".into(), "no".into()], None),
        ]);
        QuizVm::new(session)
    }

    #[test]
    fn parses_commands_and_option_numbers() {
        assert_eq!(QuizIntent::parse(" N "), Some(QuizIntent::Next));
        assert_eq!(QuizIntent::parse("prev"), Some(QuizIntent::Prev));
        assert_eq!(QuizIntent::parse("s"), Some(QuizIntent::Submit));
        assert_eq!(QuizIntent::parse("q"), Some(QuizIntent::Quit));
        assert_eq!(QuizIntent::parse("2"), Some(QuizIntent::Select(opt(2))));
        assert_eq!(QuizIntent::parse("two"), None);
        assert_eq!(QuizIntent::parse(""), None);
    }

    #[test]
    fn first_card_shows_heading_options_and_next() {
        let mut vm = vm();
        assert_eq!(vm.apply(QuizIntent::Select(opt(2))), QuizOutcome::Continue);

        let card = vm.question_card().unwrap();
        assert_eq!(card.heading, "Q1: What is 2+2?");
        assert_eq!(card.options.len(), 3);
        assert!(card.options[1].selected);
        assert!(!card.options[0].selected);
        assert!(!card.can_go_back);
        assert_eq!(card.primary, PrimaryAction::Next);
        assert_eq!(card.progress_percent, 50);
    }

    #[test]
    fn option_not_on_card_is_unavailable() {
        let mut vm = vm();
        assert_eq!(vm.apply(QuizIntent::Select(opt(4))), QuizOutcome::Unavailable);
        assert!(vm.session().answers().is_empty());
    }

    #[test]
    fn padded_option_number_selects_the_same_row() {
        let mut vm = vm();
        let intent = QuizIntent::parse("02").unwrap();
        assert_eq!(vm.apply(intent), QuizOutcome::Continue);

        let card = vm.question_card().unwrap();
        let selected: Vec<_> = card.options.iter().map(|row| row.selected).collect();
        assert_eq!(selected, [false, true, false]);

        vm.apply(QuizIntent::Submit);
        assert_eq!(vm.session().score(), 1);
    }

    #[test]
    fn last_card_offers_submit_and_blocks_next() {
        let mut vm = vm();
        assert_eq!(vm.apply(QuizIntent::Next), QuizOutcome::Continue);
        let card = vm.question_card().unwrap();
        assert_eq!(card.primary, PrimaryAction::Submit);
        assert!(card.can_go_back);
        assert_eq!(card.progress_percent, 100);
        assert_eq!(vm.apply(QuizIntent::Next), QuizOutcome::Unavailable);
    }

    #[test]
    fn submit_produces_results_view() {
        let mut vm = vm();
        vm.apply(QuizIntent::Select(opt(2)));
        vm.apply(QuizIntent::Next);
        vm.apply(QuizIntent::Select(opt(1)));
        assert_eq!(vm.apply(QuizIntent::Submit), QuizOutcome::Completed);
        assert!(vm.question_card().is_none());

        let results = vm.results().unwrap();
        assert_eq!(results.headline, "You scored 1 out of 2");
        assert_eq!(
            results.lines,
            [
                "Q1: ✅ (Correct: Option 2)",
                "Q2: ❌ (Correct: not marked)"
            ]
        );
        assert_eq!(results.percentage, "50%");
        assert_eq!(
            results.unkeyed_note.as_deref(),
            Some("1 of 2 questions had no answer marked")
        );
        assert_eq!(results.elapsed, "0s");
    }

    #[test]
    fn quit_leaves_session_untouched() {
        let mut vm = vm();
        assert_eq!(vm.apply(QuizIntent::Quit), QuizOutcome::Quit);
        assert_eq!(vm.session().status(), SessionStatus::InProgress);
        assert!(vm.results().is_none());
    }
}
