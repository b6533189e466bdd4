// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

#![deny(missing_docs)]
#![forbid(unsafe_code)]

//! Typed, position-aware command-line argument parsing.
//!
//! This crate turns a list of command-line tokens into a structured call
//! (a command name plus positional and named argument values) against a
//! declared command signature, and reports parsing failures with an exact
//! pointer into the original command line.
//!
//! If you want derive macros and automatic help rendering, you should
//! consider the excellent [`clap`](https://crates.io/crates/clap) crate
//! instead. This crate deliberately stops at the parsing engine: how a
//! signature is obtained and how help is displayed are the caller's
//! business.
//!
//! ---
//!
//! Table of contents:
//!
//! * [Overview](#overview)
//! * [Quickstart](#quickstart)
//! * [Terminology](#terminology)
//! * [Summary of features and behaviour](#summary-of-features-and-behaviour)
//! * [Limitations](#limitations)
//!
//! ---
//!
//! # Overview
//!
//! The engine is a single-pass, in-order tokenizer state machine. It
//! consumes an [`Argv`] (the already-segmented token sequence, with stable
//! absolute positions), resolves each token against a [`CommandSignature`]
//! through a per-parse [`ParamsHolder`] ledger, coerces values with a typed
//! codec ([`decode`]/[`encode`]), and produces a [`ParseOutcome`]: either
//! invoke the target with a [`ParsedResult`], or show help. Failures are
//! typed, position-carrying [`ParseError`] values that the reporter renders
//! against the original command line.
//!
//! # Quickstart
//!
//! 1. Declare a signature with [`CommandSignature::builder`].
//!
//!    ```rust
//!    use argot::{CommandSignature, Value, ValueType};
//!
//!    let signature = CommandSignature::builder()
//!        .positional("name", ValueType::Text)
//!        .named("times", ValueType::Number, Value::Int(1))
//!        .named("shout", ValueType::Flag, Value::Bool(false))
//!        .build()
//!        .unwrap();
//!    ```
//!
//! 1. Build an [`Argv`] view over the token sequence.
//!
//!    ```rust
//!    use argot::Argv;
//!    # let _ =
//!    Argv::new(
//!        vec!["demo".into()],
//!        vec!["alice".into(), "--times".into(), "3".into()],
//!    )
//!    # ;
//!    ```
//!
//! 1. Parse, and match on the outcome.
//!
//!    ```rust
//!    # use argot::{Argv, CommandSignature, Value, ValueType};
//!    use argot::{parse_argv, Mode, ParseOutcome, Settings};
//!
//!    # let signature = CommandSignature::builder()
//!    #     .positional("name", ValueType::Text)
//!    #     .named("times", ValueType::Number, Value::Int(1))
//!    #     .build()
//!    #     .unwrap();
//!    # let argv = Argv::new(
//!    #     vec!["demo".into()],
//!    #     vec!["alice".into(), "--times".into(), "3".into()],
//!    # );
//!    match parse_argv(&argv, Mode::Command, &signature, &Settings::default()) {
//!        Ok(ParseOutcome::Invoke(result)) => {
//!            assert_eq!(result.positional["name"], Value::Text("alice".into()));
//!            assert_eq!(result.named["times"], Value::Int(3));
//!        }
//!        Ok(ParseOutcome::Help(request)) => {
//!            // Render help for the command; out of scope here.
//!            let _ = request;
//!        }
//!        Err(err) => {
//!            // Or use `parse` to have the error reported and the process
//!            // terminated for you.
//!            eprintln!("{}", err);
//!        }
//!    }
//!    ```
//!
//! For runnable programs, try the demos:
//!
//! ```bash
//! $ cargo run --example greet -- alice --times 3
//! $ cargo run --example grouped -- login alice secret --remember-me
//! ```
//!
//! # Terminology
//!
//! - An "argument" is a value passed to a program on the command line;
//!   arguments are either options or positional arguments.
//!
//! - A "long option" is `--` followed by a kebab-case name (`--remember-me`).
//!   A "short option" is a single dash plus an alias (`-r`). Option names
//!   are lower case; for short options, the fully upper-cased spelling is
//!   the explicit-false form (`-R`).
//!
//! - A "flag" is an option that takes no value token: its presence means
//!   true, and a "negation form" (`--not-x`, `--no-x`, `--!x`, or the
//!   upper-case short form) means explicit false.
//!
//! - A "special literal" is a fixed token decoded independently of the
//!   declared type: `:true`/`:t`, `:false`/`:f`, `:none`, `:empty`, `:cwd`,
//!   plus the control markers `:h`/`:help`, `:hh`/`:helpx` and `:loop`.
//!
//! - A "variadic slot" absorbs unlimited extra positional (`*1`, `*2`, …)
//!   or named arguments not otherwise declared.
//!
//! - "Grouped mode" is the parsing mode where the first non-option token
//!   selects which of several commands to parse against; options may not
//!   precede the command name.
//!
//! # Summary of features and behaviour
//!
//! - Parses tokens in strict order, one pass, no permutation.
//! - Typed value coercion with a strict numeric grammar (decimal, float,
//!   `0b…`, `0x…`); `ANY`-typed parameters infer number-or-text.
//! - A positional parameter can also be supplied by name (`--name value`),
//!   and a named parameter can be filled positionally.
//! - `--help`/`-h` and `--helpx`/`-hh` are reserved in every signature
//!   (shadowing is a configurable policy); an empty invocation resolves to
//!   an implicit help request instead of an error.
//! - Every failure carries the absolute position of the offending token,
//!   and the reporter points at it in the rendered command line.
//! - Unknown option spellings suggest the nearest known one.
//! - An optional interactive loop re-invokes the same command on freshly
//!   typed lines ([`Repl`]).
//!
//! # Limitations
//!
//! - Option bundling is not supported: `-a -b` is valid, `-ab` is a single
//!   (probably unknown) alias.
//!
//! - Options and their values must be separate tokens: `--times 3` is
//!   valid, `--times=3` is not.
//!
//! - Negative numbers cannot appear as bare positional tokens (they look
//!   like short options); pass them as option values or use a `:`-literal
//!   where applicable.
//!
//! - The engine is synchronous and single-threaded; a parse owns its
//!   ledger exclusively and runs to completion. Callers wanting timeouts
//!   wrap it externally.

mod argv;
mod error;
mod interact;
mod ledger;
mod name;
mod parser;
mod report;
mod signature;
mod value;

pub use argv::Argv;
pub use error::{did_you_mean, ParseError, Result, SignatureError};
pub use interact::{classify_line, Reinvocation, Repl, EXIT_TOKEN, ORIGINAL_TOKEN};
pub use ledger::ParamsHolder;
pub use name::{display_name, long_option, NameRole, NameStyle};
pub use parser::{
    extract_command_name, parse, parse_argv, HelpRequest, Mode, ParseOutcome, ParsedResult,
    Settings, DEBUG_ENV,
};
pub use report::render_report;
pub use signature::{CommandSignature, DocMeta, ParamSpec, SignatureBuilder};
pub use value::{
    decode, encode, special_value, DecodeError, Value, ValueType, HELPX_TOKENS, HELP_TOKENS,
    LOOP_TOKEN,
};
