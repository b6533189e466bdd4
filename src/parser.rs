// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use tracing::{debug, trace};

use crate::argv::Argv;
use crate::error::{ParseError, Result};
use crate::ledger::ParamsHolder;
use crate::name::{implicit_keyword_name, strip_negation, NameStyle};
use crate::report;
use crate::signature::{CommandSignature, HELPX_PARAM, HELP_PARAM};
use crate::value::{decode, Value, ValueType, HELPX_TOKENS, HELP_TOKENS, LOOP_TOKEN};

/// Environment variable that makes the reporting entry point propagate
/// typed errors instead of printing a report and exiting.
pub const DEBUG_ENV: &str = "ARGOT_DEBUG";

/// Shape a command name must have in grouped mode.
static COMMAND_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][-\w]*$").expect("hard-coded pattern"));

/// Help spellings accepted ahead of the command name in grouped mode.
/// Anything else option-shaped in that position is an error.
const GROUP_HELP_TOKENS: &[&str] = &[":h", ":help", "-h", "--help"];

/// How the engine interprets the first tokens of the command line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    /// The whole token sequence belongs to a single command.
    Command,
    /// The first non-option token selects which command to parse against.
    Group,
}

/// Settings used to control the parser's behaviour.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Settings {
    positional_style: NameStyle,
    allow_help_shadowing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            positional_style: NameStyle::default(),
            allow_help_shadowing: true,
        }
    }
}

impl Settings {
    /// Create the default settings.
    pub fn new() -> Self {
        Settings::default()
    }

    /// Choose the display style for positional parameter names.
    pub fn positional_style(self, style: NameStyle) -> Self {
        Settings {
            positional_style: style,
            ..self
        }
    }

    /// Refuse signatures whose declared spellings shadow the reserved help
    /// options. By default shadowing is permitted, and a trailing bare `-h`
    /// on an otherwise incomplete command line is still treated as a help
    /// request (the legacy escape hatch for programs that redefine `-h`).
    pub fn forbid_help_shadowing(self) -> Self {
        Settings {
            allow_help_shadowing: false,
            ..self
        }
    }

    /// Whether declared spellings may shadow the reserved help options.
    pub fn help_shadowing_allowed(&self) -> bool {
        self.allow_help_shadowing
    }

    /// The display style for positional parameter names.
    pub fn style(&self) -> NameStyle {
        self.positional_style
    }
}

/// A request to show help instead of invoking the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest {
    /// The selected command, when one was resolved before the request.
    pub command: Option<String>,
    /// True when the user asked for help; false when an empty invocation
    /// fell through to help.
    pub explicit: bool,
    /// True when the extended help view was requested.
    pub extended: bool,
}

/// The structured call produced by a successful parse.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedResult {
    /// The selected command (grouped mode only).
    pub command: Option<String>,
    /// Positionally-filled values, in consumption order.
    pub positional: IndexMap<String, Value>,
    /// Named values, in consumption order.
    pub named: IndexMap<String, Value>,
    /// Whether the interactive re-invocation loop was requested. This is a
    /// control flag for the caller, never a named value.
    pub loop_requested: bool,
}

/// What a parse resolved to. "No error, but show help" is a first-class
/// outcome, not a flag buried in the result.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// Invoke the target with the parsed values.
    Invoke(ParsedResult),
    /// Render help for the (possibly unresolved) command instead.
    Help(HelpRequest),
}

#[derive(Debug, Clone, PartialEq)]
enum State {
    /// Before the command token (grouped mode only).
    Start,
    /// A help request preceded the command; the next token names it.
    AwaitCommand,
    /// Ready for a positional or an option.
    Ready,
    /// The previous token was a value-expecting option.
    OptionValue(Pending),
    /// The matched command owns the rest of argv; swallow it.
    Passthrough,
}

#[derive(Debug, Clone, PartialEq)]
struct Pending {
    name: String,
    ty: ValueType,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct HelpFlags {
    explicit: bool,
    extended: bool,
}

struct Machine<'a> {
    signature: &'a CommandSignature,
    settings: &'a Settings,
    mode: Mode,
    ledger: ParamsHolder,
    state: State,
    command: Option<String>,
    positional: IndexMap<String, Value>,
    named: IndexMap<String, Value>,
    help: Option<HelpFlags>,
    loop_requested: bool,
}

/// Parse one argv to completion, returning the outcome or a typed,
/// position-carrying error. This is the debug-friendly entry point; see
/// [`parse`] for the reporting one.
pub fn parse_argv(
    argv: &Argv,
    mode: Mode,
    signature: &CommandSignature,
    settings: &Settings,
) -> Result<ParseOutcome> {
    debug!(?mode, tokens = ?argv.tokens(), "parsing argv");

    let mut machine = Machine {
        signature,
        settings,
        mode,
        ledger: ParamsHolder::new(signature),
        state: match mode {
            Mode::Command => State::Ready,
            Mode::Group => State::Start,
        },
        command: None,
        positional: IndexMap::new(),
        named: IndexMap::new(),
        help: None,
        loop_requested: false,
    };

    for (pos, token) in argv.iter() {
        if machine.state == State::Passthrough {
            trace!(pos, token, "forwarding tail to the selected command");
            break;
        }
        machine.feed(pos, token)?;
    }

    machine.finish(argv)
}

/// Parse one argv, reporting failures against the original command line.
///
/// On error this renders a report pointing at the offending token and
/// terminates the process with a non-zero status, unless `ARGOT_DEBUG=1`
/// is set, in which case the typed error propagates for assertion.
pub fn parse(
    argv: &Argv,
    mode: Mode,
    signature: &CommandSignature,
    settings: &Settings,
) -> Result<ParseOutcome> {
    match parse_argv(argv, mode, signature, settings) {
        Ok(outcome) => Ok(outcome),
        Err(err) if debug_errors() => Err(err),
        Err(err) => report::report_and_exit(argv, &err),
    }
}

/// The command a grouped-mode token sequence selects: the first token that
/// is not option- or literal-shaped, with underscores normalized to dashes.
pub fn extract_command_name(tokens: &[String]) -> Option<String> {
    tokens
        .iter()
        .find(|t| !t.starts_with('-') && !t.starts_with(':'))
        .map(|t| t.replace('_', "-"))
}

fn debug_errors() -> bool {
    std::env::var(DEBUG_ENV).map(|v| v == "1").unwrap_or(false)
}

fn is_all_upper(s: &str) -> bool {
    let mut cased = false;

    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }

    cased
}

impl<'a> Machine<'a> {
    fn feed(&mut self, pos: usize, token: &str) -> Result<()> {
        trace!(pos, token, state = ?self.state, "feed");

        let state = std::mem::replace(&mut self.state, State::Ready);

        match state {
            State::Start => self.feed_start(pos, token),
            State::AwaitCommand => {
                self.set_command(pos, token)?;
                self.state = State::Passthrough;
                Ok(())
            }
            State::Ready => self.feed_ready(pos, token),
            State::OptionValue(pending) => {
                let value = self.decode_value(pos, token, pending.ty)?;
                self.named.insert(pending.name, value);
                Ok(())
            }
            State::Passthrough => Ok(()),
        }
    }

    fn feed_start(&mut self, pos: usize, token: &str) -> Result<()> {
        if token.starts_with(':') || token.starts_with('-') {
            if GROUP_HELP_TOKENS.contains(&token) {
                self.set_help(true, false);
                self.state = State::AwaitCommand;
                return Ok(());
            }
            return Err(ParseError::ParamAheadOfCommand { pos });
        }

        self.set_command(pos, token)?;
        Ok(())
    }

    fn feed_ready(&mut self, pos: usize, token: &str) -> Result<()> {
        if token.starts_with(':') {
            if HELP_TOKENS.contains(&token) {
                self.set_help(true, false);
                return Ok(());
            }
            if HELPX_TOKENS.contains(&token) {
                self.set_help(true, true);
                return Ok(());
            }
            if token == LOOP_TOKEN {
                if self.mode == Mode::Command || self.command.is_some() {
                    self.loop_requested = true;
                    return Ok(());
                }
                // The loop needs a command to re-invoke.
                return Err(ParseError::ParamAheadOfCommand { pos });
            }
            // Value literals, and unknown ":"-spellings, feed the next
            // positional slot.
            return self.feed_positional(pos, token);
        }

        if token.starts_with("--") {
            return self.feed_long(pos, token);
        }

        if token.starts_with('-') {
            return self.feed_short(pos, token);
        }

        self.feed_positional(pos, token)
    }

    fn feed_long(&mut self, pos: usize, token: &str) -> Result<()> {
        if token != token.to_lowercase() {
            return Err(ParseError::MixedCase { pos });
        }

        if let Some(canonical) = strip_negation(token) {
            let name = self.resolve(pos, &canonical, token)?;

            if name == HELP_PARAM || name == HELPX_PARAM {
                // Negating help withdraws the request.
                self.help = None;
                return Ok(());
            }

            let spec = self.ledger.take_named(pos, &name, token)?;
            if !matches!(spec.ty, ValueType::Flag | ValueType::Any) {
                return Err(ParseError::TypeNotCorrect {
                    pos,
                    expected: "bool",
                });
            }

            self.named.insert(name, Value::Bool(false));
            return Ok(());
        }

        let name = self.resolve(pos, token, token)?;
        self.feed_named(pos, &name, token)
    }

    fn feed_short(&mut self, pos: usize, token: &str) -> Result<()> {
        if token.chars().filter(|c| *c == '-').count() != 1 {
            return Err(ParseError::ShortOptionFormat {
                pos,
                token: token.to_string(),
            });
        }

        let lower = token.to_lowercase();
        let upper = token.to_uppercase();
        if token != lower && token != upper {
            return Err(ParseError::MixedCase { pos });
        }

        if is_all_upper(&token[1..]) {
            // Upper case is the short-form spelling of "explicitly false".
            let name = self.resolve(pos, &lower, token)?;

            if name == HELP_PARAM || name == HELPX_PARAM {
                self.help = None;
                return Ok(());
            }

            let spec = self.ledger.take_named(pos, &name, token)?;
            if !matches!(spec.ty, ValueType::Flag | ValueType::Any) {
                return Err(ParseError::TypeNotCorrect {
                    pos,
                    expected: "bool",
                });
            }

            self.named.insert(name, Value::Bool(false));
            return Ok(());
        }

        let name = self.resolve(pos, token, token)?;
        self.feed_named(pos, &name, token)
    }

    fn feed_named(&mut self, pos: usize, name: &str, spelling: &str) -> Result<()> {
        if name == HELP_PARAM {
            self.set_help(true, false);
            return Ok(());
        }
        if name == HELPX_PARAM {
            self.set_help(true, true);
            return Ok(());
        }

        let spec = self.ledger.take_named(pos, name, spelling)?;

        if spec.ty == ValueType::Flag {
            self.named.insert(name.to_string(), Value::Bool(true));
        } else {
            self.state = State::OptionValue(Pending {
                name: name.to_string(),
                ty: spec.ty,
            });
        }

        Ok(())
    }

    fn feed_positional(&mut self, pos: usize, token: &str) -> Result<()> {
        let spec = self.ledger.take_next_positional(pos)?;
        let value = self.decode_value(pos, token, spec.ty)?;
        self.positional.insert(spec.name, value);
        Ok(())
    }

    fn decode_value(&self, pos: usize, token: &str, ty: ValueType) -> Result<Value> {
        decode(token, ty).map_err(|err| ParseError::TypeConversion {
            pos,
            expected: err.expected,
            given: token.to_string(),
        })
    }

    fn resolve(&self, pos: usize, spelling: &str, given: &str) -> Result<String> {
        if let Some(name) = self.signature.resolve(spelling) {
            return Ok(name.to_string());
        }

        if self.signature.has_variadic_keyword() && spelling.starts_with("--") {
            return Ok(implicit_keyword_name(spelling));
        }

        Err(ParseError::ParamNotFound {
            pos,
            spelling: given.to_string(),
            candidates: self.signature.spellings(),
        })
    }

    fn set_command(&mut self, pos: usize, token: &str) -> Result<()> {
        if !COMMAND_NAME_PATTERN.is_match(token) {
            return Err(ParseError::ParamAheadOfCommand { pos });
        }

        let command = token.replace('_', "-");
        debug!(%command, "command selected");
        self.command = Some(command);
        Ok(())
    }

    fn set_help(&mut self, explicit: bool, extended: bool) {
        let flags = self.help.get_or_insert(HelpFlags {
            explicit: false,
            extended: false,
        });
        flags.explicit |= explicit;
        flags.extended |= extended;
    }

    fn finish(mut self, argv: &Argv) -> Result<ParseOutcome> {
        if let State::OptionValue(pending) = &self.state {
            if self.help_shadow_carveout(argv) {
                // The user's trailing "-h" was meant as a help request even
                // though the declared signature repurposed the spelling.
                debug!(option = %pending.name, "dangling -h treated as a help request");
                self.set_help(true, false);
            } else {
                return Err(ParseError::InsufficientArguments {
                    pos: None,
                    missing: self.ledger.missing_positionals(),
                });
            }
        }

        let supplied_any =
            !self.positional.is_empty() || !self.named.is_empty() || self.loop_requested;

        if self.help.is_none() {
            if self.ledger.has_unresolved_required() {
                if supplied_any {
                    return Err(ParseError::InsufficientArguments {
                        pos: None,
                        missing: self.ledger.missing_positionals(),
                    });
                }
                // An empty invocation is a help request, not an error.
                self.set_help(false, false);
            } else if self.mode == Mode::Group && self.command.is_none() && !supplied_any {
                self.set_help(false, false);
            }
        }

        if let Some(flags) = self.help {
            return Ok(ParseOutcome::Help(HelpRequest {
                command: self.command,
                explicit: flags.explicit,
                extended: flags.extended,
            }));
        }

        Ok(ParseOutcome::Invoke(ParsedResult {
            command: self.command,
            positional: self.positional,
            named: self.named,
            loop_requested: self.loop_requested,
        }))
    }

    fn help_shadow_carveout(&self, argv: &Argv) -> bool {
        if !self.settings.help_shadowing_allowed() {
            return false;
        }

        // Only applies when the declared signature actually repurposed "-h".
        match self.signature.resolve("-h") {
            Some(name) if name != HELP_PARAM => (),
            _ => return false,
        }

        let tokens = argv.tokens();
        match self.mode {
            Mode::Command => tokens.len() == 1 && tokens[0] == "-h",
            Mode::Group => tokens.len() == 2 && tokens[1] == "-h",
        }
    }
}
