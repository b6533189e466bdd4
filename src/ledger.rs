// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::collections::VecDeque;

use crate::error::{ParseError, Result};
use crate::signature::{CommandSignature, ParamSpec};
use crate::value::ValueType;

/// The mutable per-parse pool of not-yet-consumed parameter slots.
///
/// Built once from a [`CommandSignature`] at parse start, destructively
/// drained as the state machine consumes tokens, discarded at parse end. A
/// parameter, once taken, can never be taken again in the same parse.
#[derive(Debug, Clone)]
pub struct ParamsHolder {
    positional: VecDeque<ParamSpec>,
    named: Vec<ParamSpec>,
    has_variadic_positional: bool,
    has_variadic_keyword: bool,
    spellings: Vec<String>,
    anon_counter: usize,
}

impl ParamsHolder {
    /// Build the ledger for one parse.
    pub fn new(signature: &CommandSignature) -> Self {
        ParamsHolder {
            positional: signature.positional().iter().cloned().collect(),
            named: signature.named().values().cloned().collect(),
            has_variadic_positional: signature.has_variadic_positional(),
            has_variadic_keyword: signature.has_variadic_keyword(),
            spellings: signature.spellings(),
            anon_counter: 0,
        }
    }

    /// Take the slot for the next positional token.
    ///
    /// Resolution order: the first remaining positional; then, with a
    /// variadic-positional slot, a fresh anonymous ANY-typed slot (these
    /// never deplete); then the first remaining named parameter that is not
    /// a reserved control parameter (a named parameter may be filled
    /// positionally); otherwise the command line has too many arguments.
    pub fn take_next_positional(&mut self, pos: usize) -> Result<ParamSpec> {
        if let Some(spec) = self.positional.pop_front() {
            return Ok(spec);
        }

        if self.has_variadic_positional {
            self.anon_counter += 1;
            // Anonymous names use a spelling no declared parameter can
            // have, so they cannot collide.
            let name = format!("*{}", self.anon_counter);
            return Ok(ParamSpec::new(&name, ValueType::Any, None));
        }

        if let Some(i) = self.named.iter().position(|p| !p.name.starts_with(':')) {
            return Ok(self.named.remove(i));
        }

        Err(ParseError::TooManyArguments { pos })
    }

    /// Take the slot a named token resolves to.
    ///
    /// Remaining named parameters are checked first, then remaining
    /// positionals (a positional can be supplied as `--name value`), then a
    /// variadic-keyword slot synthesizes an ANY-typed spec on demand.
    pub fn take_named(&mut self, pos: usize, name: &str, spelling: &str) -> Result<ParamSpec> {
        if let Some(i) = self.named.iter().position(|p| p.name == name) {
            return Ok(self.named.remove(i));
        }

        if let Some(i) = self.positional.iter().position(|p| p.name == name) {
            // VecDeque::remove is fine here, the pool is small.
            if let Some(spec) = self.positional.remove(i) {
                return Ok(spec);
            }
        }

        if self.has_variadic_keyword {
            return Ok(ParamSpec::new(name, ValueType::Any, None));
        }

        Err(ParseError::ParamNotFound {
            pos,
            spelling: spelling.to_string(),
            candidates: self.spellings.clone(),
        })
    }

    /// Whether any non-variadic positional parameter is still unconsumed.
    /// This is the "insufficient arguments" signal.
    pub fn has_unresolved_required(&self) -> bool {
        !self.positional.is_empty()
    }

    /// Names of the positional parameters still unconsumed, in declaration
    /// order.
    pub fn missing_positionals(&self) -> Vec<String> {
        self.positional.iter().map(|p| p.name.clone()).collect()
    }
}
