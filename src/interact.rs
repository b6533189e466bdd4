// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::argv::Argv;
use crate::parser::{parse_argv, Mode, ParseOutcome, Settings};
use crate::report::render_report;
use crate::signature::CommandSignature;
use crate::value::LOOP_TOKEN;

/// The line that terminates the interactive loop.
pub const EXIT_TOKEN: &str = "exit";

/// The line that re-invokes with the very first process-level tokens.
pub const ORIGINAL_TOKEN: &str = ":orig";

/// Prompt printed before each interactive line.
const PROMPT: &str = "> ";

/// How one line of interactive input re-invokes the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reinvocation {
    /// Re-invoke with the previous tokens unchanged (empty line).
    Last,
    /// Re-invoke with the very first tokens (`:orig`).
    Original,
    /// Re-invoke with freshly typed tokens.
    Fresh(Vec<String>),
    /// Terminate the loop (`exit`).
    Quit,
}

/// Classify one line of interactive input.
///
/// Pure and terminal-free so the loop contract is testable: an empty line
/// repeats the last tokens, the designated sentinels map to their modes,
/// and anything else is split the way a shell would. Returns [`None`] when
/// the line cannot be split (unbalanced quoting).
pub fn classify_line(line: &str) -> Option<Reinvocation> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Some(Reinvocation::Last);
    }
    if trimmed == EXIT_TOKEN {
        return Some(Reinvocation::Quit);
    }
    if trimmed == ORIGINAL_TOKEN {
        return Some(Reinvocation::Original);
    }

    shlex::split(trimmed).map(Reinvocation::Fresh)
}

/// The interactive re-invocation controller.
///
/// Activated by the caller when a parse set
/// [`loop_requested`](crate::ParsedResult::loop_requested). Each iteration
/// re-parses a token list through the full engine, scoped to the same
/// already-resolved command, and hands the outcome to the caller's closure.
/// Iterations are independent; the only state carried across them is the
/// last token list used. Parse failures are rendered, never fatal here.
///
/// The loop blocks on synchronous line input and is not reentrant.
#[derive(Debug)]
pub struct Repl<'a> {
    signature: &'a CommandSignature,
    settings: Settings,
    original: Vec<String>,
    last: Vec<String>,
}

impl<'a> Repl<'a> {
    /// Build a controller scoped to one resolved command.
    ///
    /// `initial_tokens` are the user tokens of the invocation that
    /// requested the loop, without the command selector; any `:loop` marker
    /// is dropped so re-invocations do not re-request the loop.
    pub fn new(
        signature: &'a CommandSignature,
        settings: Settings,
        initial_tokens: &[String],
    ) -> Self {
        let tokens: Vec<String> = initial_tokens
            .iter()
            .filter(|t| t.as_str() != LOOP_TOKEN)
            .cloned()
            .collect();

        Repl {
            signature,
            settings,
            original: tokens.clone(),
            last: tokens,
        }
    }

    /// Run the loop until the exit token or end of input.
    ///
    /// `invoke` receives every successfully parsed outcome; rendering help
    /// (or ignoring it) is the caller's business.
    pub fn run<R, W, F>(&mut self, input: R, mut output: W, mut invoke: F) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
        F: FnMut(&ParseOutcome),
    {
        for line in input.lines() {
            let line = line?;

            let tokens = match classify_line(&line) {
                Some(Reinvocation::Quit) => break,
                Some(Reinvocation::Last) => self.last.clone(),
                Some(Reinvocation::Original) => self.original.clone(),
                Some(Reinvocation::Fresh(tokens)) => tokens,
                None => {
                    writeln!(output, "unbalanced quoting, try again")?;
                    continue;
                }
            };

            debug!(?tokens, "re-invoking");

            let argv = Argv::new(vec![], tokens.clone());
            match parse_argv(&argv, Mode::Command, self.signature, &self.settings) {
                Ok(outcome) => {
                    invoke(&outcome);
                    self.last = tokens;
                }
                Err(err) => {
                    writeln!(output, "{}", render_report(&argv, &err))?;
                }
            }

            write!(output, "{}", PROMPT)?;
            output.flush()?;
        }

        Ok(())
    }
}
