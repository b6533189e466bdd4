// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::env;

/// A structured view over an already-segmented command line.
///
/// The prefix holds the launcher and target tokens (informational only, never
/// parsed); the remaining tokens are the user's arguments. Iteration yields
/// `(absolute_position, token)` pairs whose positions are stable across the
/// whole original command line, which is what the error reporter points back
/// into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argv {
    prefix: Vec<String>,
    tokens: Vec<String>,
}

impl Argv {
    /// Build an argv view from explicit prefix and user tokens.
    pub fn new(prefix: Vec<String>, tokens: Vec<String>) -> Self {
        Argv { prefix, tokens }
    }

    /// Build an argv view from the process arguments; the program name
    /// becomes the prefix.
    pub fn from_env() -> Self {
        let mut all: Vec<String> = env::args().collect();
        let tokens = all.split_off(1.min(all.len()));

        Argv {
            prefix: all,
            tokens,
        }
    }

    /// Build an argv view from a free-form argument string, split the way a
    /// shell would (quote-aware).
    ///
    /// Returns [`None`] when the string cannot be split (unbalanced
    /// quoting).
    pub fn from_argstring(launcher: &str, target: &str, argstring: &str) -> Option<Self> {
        let tokens = shlex::split(argstring)?;

        Some(Argv {
            prefix: vec![launcher.to_string(), target.to_string()],
            tokens,
        })
    }

    /// The position of the first user token; user positions start here.
    pub fn offset(&self) -> usize {
        self.prefix.len()
    }

    /// The informational launcher/target tokens.
    pub fn prefix(&self) -> &[String] {
        &self.prefix
    }

    /// The user's argument tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Iterate over the user tokens with their absolute positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        let offset = self.offset();

        self.tokens
            .iter()
            .enumerate()
            .map(move |(i, token)| (offset + i, token.as_str()))
    }

    /// Every displayable token (prefix plus user tokens) in absolute
    /// position order. Used by the reporter.
    pub fn display_tokens(&self) -> impl Iterator<Item = &str> {
        self.prefix
            .iter()
            .chain(self.tokens.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positions_are_offset_by_prefix() {
        let argv = Argv::new(
            strings(&["python", "demo.py"]),
            strings(&["alice", "--times", "3"]),
        );

        assert_eq!(argv.offset(), 2);

        let pairs: Vec<(usize, &str)> = argv.iter().collect();
        assert_eq!(
            pairs,
            vec![(2, "alice"), (3, "--times"), (4, "3")]
        );
    }

    #[test]
    fn test_empty_prefix() {
        let argv = Argv::new(vec![], strings(&["a"]));
        let pairs: Vec<(usize, &str)> = argv.iter().collect();
        assert_eq!(pairs, vec![(0, "a")]);
    }

    #[test]
    fn test_from_argstring() {
        let argv = Argv::from_argstring("python", "demo.py", "alice \"hello world\" :true")
            .expect("splittable");

        assert_eq!(argv.prefix(), &strings(&["python", "demo.py"])[..]);
        assert_eq!(
            argv.tokens(),
            &strings(&["alice", "hello world", ":true"])[..]
        );

        // Unbalanced quoting is not splittable.
        assert!(Argv::from_argstring("python", "demo.py", "alice \"oops").is_none());
    }

    #[test]
    fn test_display_tokens() {
        let argv = Argv::new(strings(&["python", "demo.py"]), strings(&["x"]));
        let all: Vec<&str> = argv.display_tokens().collect();
        assert_eq!(all, vec!["python", "demo.py", "x"]);
    }
}
