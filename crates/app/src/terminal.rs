use std::io::{BufRead, Write};

use crate::vm::{PrimaryAction, QuestionCardVm, QuizIntent, QuizOutcome, QuizVm, ResultsVm};

const BAR_WIDTH: usize = 20;

/// Drive `vm` from line-based input until submit, quit or end of input.
///
/// # Errors
///
/// Returns any I/O error from reading `input` or writing `out`.
pub fn run_interactive<R: BufRead, W: Write>(
    vm: &mut QuizVm,
    input: R,
    out: &mut W,
) -> std::io::Result<()> {
    if let Some(card) = vm.question_card() {
        render_card(&card, out)?;
    }

    for line in input.lines() {
        let line = line?;
        let Some(intent) = QuizIntent::parse(&line) else {
            writeln!(out, "unknown command: {}", line.trim())?;
            prompt(out)?;
            continue;
        };

        match vm.apply(intent) {
            QuizOutcome::Quit => return Ok(()),
            QuizOutcome::Completed => {
                if let Some(results) = vm.results() {
                    render_results(&results, out)?;
                }
                return Ok(());
            }
            QuizOutcome::Unavailable => writeln!(out, "not available here")?,
            QuizOutcome::Continue => {}
        }

        if let Some(card) = vm.question_card() {
            render_card(&card, out)?;
        }
    }
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn render_card<W: Write>(card: &QuestionCardVm, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", card.heading)?;
    for option in &card.options {
        let mark = if option.selected { "x" } else { " " };
        writeln!(out, "  [{mark}] {}. {}", option.number, option.text)?;
    }

    let filled = usize::from(card.progress_percent) * BAR_WIDTH / 100;
    writeln!(
        out,
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        card.position,
        card.total
    )?;

    let mut actions = Vec::new();
    if card.can_go_back {
        actions.push("(p)rev");
    }
    actions.push(match card.primary {
        PrimaryAction::Next => "(n)ext",
        PrimaryAction::Submit => "(s)ubmit",
    });
    actions.push("(q)uit");
    writeln!(out, "{}", actions.join("  "))?;
    prompt(out)
}

/// Write the result summary block.
///
/// # Errors
///
/// Returns any I/O error from writing `out`.
pub fn render_results<W: Write>(results: &ResultsVm, out: &mut W) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Result Summary")?;
    writeln!(out, "{} ({})", results.headline, results.percentage)?;
    for line in &results.lines {
        writeln!(out, "  {line}")?;
    }
    if let Some(note) = &results.unkeyed_note {
        writeln!(out, "{note}")?;
    }
    writeln!(out, "Time: {}", results.elapsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;
    use services::QuizWorkflow;
    use std::io::Cursor;

    const QUIZ: &str = "Q.1 What is 2+2?\n3\n4\n5\n6\nAns: 2\nQ.2 Sky colour?\nblue\ngreen\nAns: 1\n";

    fn vm() -> QuizVm {
        let workflow = QuizWorkflow::new(fixed_clock());
        let mut session = workflow.new_session();
        workflow.load_text(&mut session, QUIZ);
        QuizVm::new(session)
    }

    fn run(input: &str) -> (QuizVm, String) {
        let mut vm = vm();
        let mut out = Vec::new();
        run_interactive(&mut vm, Cursor::new(input), &mut out).unwrap();
        (vm, String::from_utf8(out).unwrap())
    }

    #[test]
    fn full_run_prints_cards_and_results() {
        let (vm, out) = run("2\nn\n2\ns\n");
        assert!(out.contains("Q1: What is 2+2?"));
        assert!(out.contains("  [x] 2. 4"));
        assert!(out.contains("Q2: Sky colour?"));
        assert!(out.contains("(p)rev  (s)ubmit  (q)uit"));
        assert!(out.contains("You scored 1 out of 2 (50%)"));
        assert!(out.contains("Q1: ✅ (Correct: Option 2)"));
        assert!(out.contains("Q2: ❌ (Correct: Option 1)"));
        assert!(vm.session().is_submitted());
    }

    #[test]
    fn first_card_has_no_prev_and_half_bar() {
        let (_, out) = run("q\n");
        assert!(out.contains("(n)ext  (q)uit"));
        assert!(!out.contains("(p)rev"));
        assert!(out.contains("[##########----------] 1/2"));
    }

    #[test]
    fn bad_input_is_reported_and_loop_continues() {
        let (vm, out) = run("maybe\n9\np\n1\nq\n");
        assert!(out.contains("unknown command: maybe"));
        assert_eq!(out.matches("not available here").count(), 2);
        assert_eq!(vm.session().answers().len(), 1);
        assert!(!vm.session().is_submitted());
    }

    #[test]
    fn end_of_input_leaves_quiz_unsubmitted() {
        let (vm, _) = run("1\n");
        assert!(!vm.session().is_submitted());
    }
}
