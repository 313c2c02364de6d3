#![forbid(unsafe_code)]

mod cli;
mod commands;
mod error;
mod logging;
mod terminal;
mod vm;

use clap::Parser;
use std::io;

use services::{Clock, QuizWorkflow};

use crate::cli::{Cli, Command};
use crate::error::AppError;

fn run(cli: Cli) -> Result<(), AppError> {
    logging::setup(cli.verbose)?;

    let workflow = QuizWorkflow::new(Clock::default()).with_options(cli.extract_options());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Run { file } => commands::run(&workflow, file, io::stdin().lock(), &mut out),
        Command::Inspect { file, json } => commands::inspect(&workflow, file, *json, &mut out),
        Command::Grade {
            file,
            answers,
            json,
        } => commands::grade(&workflow, file, answers, *json, &mut out),
    }
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
