//! The interactive question/answer loop.
//!
//! Each line is an independent turn: prompt, translate, extract, execute,
//! present. A failure anywhere in a turn is reported and the loop carries on;
//! only `exit`/`quit`, end of input, or a broken console end the session.

use crate::bridge::{build_prompt, Translate};
use crate::catalog::{TableSchema, STUDENTS};
use crate::executor::Executor;
use crate::presenter;
use crate::sql::extract::extract_statement;
use crate::sql::types::QueryResult;
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{info, warn};

const BANNER: &str = "📚 Student Query Chat Interface";
const COULD_NOT_GENERATE: &str = "[INFO] Could not generate SQL from your input.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Terminated,
}

pub struct Session<T> {
    translator: T,
    executor: Executor,
    schema: &'static TableSchema,
    state: SessionState,
}

impl<T: Translate> Session<T> {
    pub fn new(translator: T, executor: Executor) -> Self {
        Self {
            translator,
            executor,
            schema: &STUDENTS,
            state: SessionState::AwaitingInput,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Reads questions from `input` until exit or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, out: &mut W) -> Result<()> {
        writeln!(out, "\n{}", BANNER)?;
        writeln!(out, "Type your query in natural language (or type 'exit' to quit):\n")?;

        while self.state == SessionState::AwaitingInput {
            write!(out, "You: ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                self.terminate(out)?;
                break;
            }
            self.step(&line, out)?;
        }

        Ok(())
    }

    /// Handles one line of input.
    pub fn step<W: Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        if self.state == SessionState::Terminated {
            return Ok(());
        }
        if is_exit_command(line) {
            return self.terminate(out);
        }

        let question = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
        self.ask(question, out)
    }

    /// Runs the full pipeline for one question and writes the answer.
    pub fn ask<W: Write>(&self, question: &str, out: &mut W) -> Result<()> {
        let prompt = build_prompt(question, self.schema);

        let generated = match self.translator.translate(&prompt) {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "translation failed");
                writeln!(out, "[ERROR] Failed to get response from LLM: {}", e.diagnostic())?;
                writeln!(out, "{}", COULD_NOT_GENERATE)?;
                return Ok(());
            }
        };

        let Some(sql) = extract_statement(&generated) else {
            warn!("no statement found in generated text");
            writeln!(out, "{}", COULD_NOT_GENERATE)?;
            return Ok(());
        };

        info!(%sql, "generated SQL");
        writeln!(out, "\n[Generated SQL]: {}\n", sql)?;

        let result = match self.executor.execute(&sql) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "execution failed");
                writeln!(out, "[ERROR] SQL execution failed: {}", e)?;
                QueryResult::default()
            }
        };

        write!(out, "{}", presenter::render(&result))?;
        Ok(())
    }

    fn terminate<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.state = SessionState::Terminated;
        writeln!(out, "Goodbye!")?;
        Ok(())
    }
}

fn is_exit_command(line: &str) -> bool {
    let command = line.trim();
    command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit")
}
