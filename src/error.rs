// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use thiserror::Error;

/// Minimum similarity (0.0..=1.0) for a "did you mean" suggestion.
const SUGGESTION_CUTOFF: f64 = 0.7;

/// The user-facing parse error type.
///
/// Every variant carries the absolute position of the token that triggered
/// it, as yielded by [`crate::Argv`] iteration. A position of [`None`] is the
/// end-of-input sentinel: the problem is that the command line *stopped*, not
/// that a particular token was wrong.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseError {
    /// Fewer positional values than the signature requires.
    #[error("insufficient arguments, still missing: {}", .missing.join(", "))]
    InsufficientArguments {
        /// Offending token position (usually the end-of-input sentinel).
        pos: Option<usize>,
        /// Names of the positional parameters that were never supplied.
        missing: Vec<String>,
    },

    /// A positional token arrived with no slot left to receive it.
    #[error("too many arguments")]
    TooManyArguments {
        /// Offending token position.
        pos: usize,
    },

    /// An option spelling that no parameter claims.
    #[error("{}", not_found_message(.spelling, .candidates))]
    ParamNotFound {
        /// Offending token position.
        pos: usize,
        /// The spelling as the user typed it.
        spelling: String,
        /// Every spelling the signature accepts, for suggestion purposes.
        candidates: Vec<String>,
    },

    /// A value token that fails its declared type's grammar.
    #[error("the given value {given:?} is not compatible with the expected type {expected}")]
    TypeConversion {
        /// Offending token position.
        pos: usize,
        /// Name of the declared [`crate::ValueType`].
        expected: &'static str,
        /// The raw token.
        given: String,
    },

    /// A negation or uppercase-false form used against a parameter that is
    /// not boolean-compatible.
    #[error("this form requires a {expected}-compatible parameter")]
    TypeNotCorrect {
        /// Offending token position.
        pos: usize,
        /// The type family the spelling demands.
        expected: &'static str,
    },

    /// An option token that mixes upper and lower case (for example
    /// `--xXxX`). Only total lower case or, for short options, total upper
    /// case is accepted.
    #[error("option names may not mix upper and lower case, write \"--xxx\", \"-xxx\" or \"-XXX\"")]
    MixedCase {
        /// Offending token position.
        pos: usize,
    },

    /// Malformed short option syntax (for example `---x`).
    #[error("the short option form of {token:?} is not correct, it should look like \"-xxx\" or \"-XXX\"")]
    ShortOptionFormat {
        /// Offending token position.
        pos: usize,
        /// The raw token.
        token: String,
    },

    /// An option token appeared before a command was selected in grouped
    /// mode.
    #[error("options may not appear ahead of the command name")]
    ParamAheadOfCommand {
        /// Offending token position.
        pos: usize,
    },
}

impl ParseError {
    /// The absolute token position this error points at, or [`None`] for the
    /// end-of-input sentinel.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::InsufficientArguments { pos, .. } => *pos,
            ParseError::TooManyArguments { pos }
            | ParseError::ParamNotFound { pos, .. }
            | ParseError::TypeConversion { pos, .. }
            | ParseError::TypeNotCorrect { pos, .. }
            | ParseError::MixedCase { pos }
            | ParseError::ShortOptionFormat { pos, .. }
            | ParseError::ParamAheadOfCommand { pos } => Some(*pos),
        }
    }
}

/// A programming error in how a signature was declared. These are raised
/// while *building* a [`crate::CommandSignature`], never while parsing user
/// input, and should be treated as bugs in the calling program.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SignatureError {
    /// Two parameters were declared with the same internal name.
    #[error("duplicate parameter name {name:?}")]
    DuplicateParam {
        /// The repeated internal name.
        name: String,
    },

    /// Two distinct parameters claim the same command-line spelling.
    #[error("spelling {spelling:?} is claimed by both {first:?} and {second:?}")]
    SpellingCollision {
        /// The contested spelling.
        spelling: String,
        /// Internal name of the parameter that registered it first.
        first: String,
        /// Internal name of the parameter that tried to register it again.
        second: String,
    },

    /// A declared spelling would shadow a reserved help option while the
    /// settings forbid shadowing.
    #[error("spelling {spelling:?} would shadow a reserved help option")]
    ReservedShadowing {
        /// The reserved spelling.
        spelling: String,
    },

    /// Documentation metadata referenced a parameter the signature never
    /// declared.
    #[error("no parameter named {name:?} to document")]
    UnknownParam {
        /// The undeclared internal name.
        name: String,
    },
}

/// Convenience type that allows a function to be defined as returning a
/// [`Result`], but which only requires the success type to be specified,
/// defaulting the error type to this crate's [`ParseError`].
pub type Result<T, E = ParseError> = std::result::Result<T, E>;

/// Find the closest known spelling to a mistyped one.
///
/// Returns the best candidate whose normalized similarity reaches the
/// cutoff, if any.
pub fn did_you_mean<'a, I>(word: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(f64, &str)> = None;

    for candidate in candidates {
        let score = strsim::normalized_levenshtein(word, candidate);

        if score < SUGGESTION_CUTOFF {
            continue;
        }

        match best {
            Some((best_score, _)) if best_score >= score => (),
            _ => best = Some((score, candidate)),
        }
    }

    best.map(|(_, candidate)| candidate.to_string())
}

fn not_found_message(spelling: &str, candidates: &[String]) -> String {
    match did_you_mean(spelling, candidates.iter().map(String::as_str)) {
        Some(suggestion) => {
            format!("parameter {spelling:?} not found, did you mean {suggestion:?}?")
        }
        None => {
            format!("parameter {spelling:?} not found, it may be a typo or a redundant name")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let err = ParseError::TooManyArguments { pos: 7 };
        assert_eq!(err.position(), Some(7));

        let err = ParseError::InsufficientArguments {
            pos: None,
            missing: vec!["b".into()],
        };
        assert_eq!(err.position(), None);
    }

    #[test]
    fn test_did_you_mean() {
        let candidates = ["--remember-me", "--username", "--password"];

        assert_eq!(
            did_you_mean("--remembr-me", candidates),
            Some("--remember-me".to_string())
        );
        assert_eq!(
            did_you_mean("--usrname", candidates),
            Some("--username".to_string())
        );
        assert_eq!(did_you_mean("--zzz", candidates), None);
        assert_eq!(did_you_mean("--frobnicate", []), None);
    }

    #[test]
    fn test_not_found_display() {
        let err = ParseError::ParamNotFound {
            pos: 3,
            spelling: "--verison".into(),
            candidates: vec!["--version".into(), "--verbose".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("--verison"), "{}", msg);
        assert!(msg.contains("did you mean"), "{}", msg);
        assert!(msg.contains("--version"), "{}", msg);

        let err = ParseError::ParamNotFound {
            pos: 3,
            spelling: "--zzz".into(),
            candidates: vec!["--version".into()],
        };
        assert!(err.to_string().contains("typo"), "{}", err);
    }

    #[test]
    fn test_insufficient_display() {
        let err = ParseError::InsufficientArguments {
            pos: None,
            missing: vec!["username".into(), "password".into()],
        };
        assert_eq!(
            err.to_string(),
            "insufficient arguments, still missing: username, password"
        );
    }
}
