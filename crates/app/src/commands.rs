use std::io::{BufRead, Write};
use std::path::Path;
use tracing::info;

use quiz_core::model::OptionNumber;
use services::{QuizSession, QuizWorkflow};

use crate::error::AppError;
use crate::terminal::{render_results, run_interactive};
use crate::vm::QuizVm;

/// Read `path` into a fresh session; a file without questions is an error.
///
/// # Errors
///
/// Returns `AppError::Source` on I/O failure and `AppError::NoQuestions` when
/// nothing could be extracted.
pub fn open_quiz(workflow: &QuizWorkflow, path: &Path) -> Result<QuizSession, AppError> {
    let mut session = workflow.new_session();
    let report = workflow.load_file(&mut session, path)?;
    if !report.loaded {
        return Err(AppError::NoQuestions {
            path: path.to_path_buf(),
        });
    }
    Ok(session)
}

/// # Errors
///
/// Returns `AppError` for load or terminal I/O failures.
pub fn run<R: BufRead, W: Write>(
    workflow: &QuizWorkflow,
    path: &Path,
    input: R,
    out: &mut W,
) -> Result<(), AppError> {
    let mut vm = QuizVm::new(open_quiz(workflow, path)?);
    run_interactive(&mut vm, input, out)?;
    Ok(())
}

/// # Errors
///
/// Returns `AppError` for load, serialization or output failures.
pub fn inspect<W: Write>(
    workflow: &QuizWorkflow,
    path: &Path,
    json: bool,
    out: &mut W,
) -> Result<(), AppError> {
    let session = open_quiz(workflow, path)?;
    let questions = session.questions();

    if json {
        serde_json::to_writer_pretty(&mut *out, questions)?;
        writeln!(out)?;
        return Ok(());
    }

    for (index, question) in questions.iter().enumerate() {
        writeln!(out, "Q{}: {}", index + 1, question.text())?;
        for (number, text) in question.numbered_options() {
            writeln!(out, "  {number}. {text}")?;
        }
        match question.correct_option() {
            Some(correct) => writeln!(out, "  answer: {correct}")?,
            None => writeln!(out, "  answer: not marked")?,
        }
    }
    Ok(())
}

/// Split `2,,1` into per-question answers; blank entries stay unanswered.
///
/// # Errors
///
/// Returns `quiz_core::Error` for an entry that is not an option number.
pub fn parse_answer_sheet(raw: &str) -> Result<Vec<Option<OptionNumber>>, quiz_core::Error> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut answers = Vec::new();
    for entry in raw.split(',') {
        if entry.trim().is_empty() {
            answers.push(None);
        } else {
            answers.push(Some(OptionNumber::parse(entry)?));
        }
    }
    Ok(answers)
}

/// Record an answer sheet, submit, and print the results.
///
/// # Errors
///
/// Returns `AppError` for load or answer sheet problems and output failures.
pub fn grade<W: Write>(
    workflow: &QuizWorkflow,
    path: &Path,
    answers: &str,
    json: bool,
    out: &mut W,
) -> Result<(), AppError> {
    let sheet = parse_answer_sheet(answers)?;
    let mut session = open_quiz(workflow, path)?;

    let total = session.total_questions();
    if sheet.len() > total {
        return Err(AppError::TooManyAnswers {
            given: sheet.len(),
            total,
        });
    }

    for (index, answer) in sheet.into_iter().enumerate() {
        if let Some(answer) = answer {
            let offered = session
                .current_question()
                .and_then(|question| question.offered_option(&answer))
                .ok_or(AppError::OptionNotOffered {
                    question: index + 1,
                    answer,
                })?;
            let _ = session.select_answer(offered);
        }
        if index + 1 < total {
            let _ = session.advance();
        }
    }
    let _ = session.submit();

    let vm = QuizVm::new(session);
    if json {
        if let Some(summary) = vm.session().results() {
            serde_json::to_writer_pretty(&mut *out, &summary)?;
            writeln!(out)?;
        }
    } else if let Some(results) = vm.results() {
        render_results(&results, out)?;
    }
    info!(path = %path.display(), "answer sheet graded");
    Ok(())
}
