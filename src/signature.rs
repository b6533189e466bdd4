// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use indexmap::IndexMap;

use crate::error::SignatureError;
use crate::name::{long_option, negated_spellings};
use crate::parser::Settings;
use crate::value::{Value, ValueType};

/// Internal name of the reserved help parameter.
pub const HELP_PARAM: &str = ":help";

/// Internal name of the reserved extended-help parameter.
pub const HELPX_PARAM: &str = ":helpx";

/// Reserved option spellings merged into every signature index at build
/// time. Immutable by design; a declared signature may shadow an entry only
/// when the settings policy permits it.
const RESERVED_SPELLINGS: &[(&str, &str)] = &[
    ("--:help", HELP_PARAM),
    ("-:h", HELP_PARAM),
    ("--help", HELP_PARAM),
    ("-h", HELP_PARAM),
    ("--:helpx", HELPX_PARAM),
    ("-:hh", HELPX_PARAM),
    ("--helpx", HELPX_PARAM),
    ("-hh", HELPX_PARAM),
];

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    /// Internal (snake_case) name.
    pub name: String,
    /// Declared coercion category. Immutable once the signature is built.
    pub ty: ValueType,
    /// Default value for named parameters; [`None`] on a named parameter
    /// means "required keyword". Positional parameters never have one.
    pub default: Option<Value>,
    /// Short alias (without the dash), when documentation metadata supplied
    /// one.
    pub short: Option<String>,
    /// Human-readable description from documentation metadata.
    pub description: Option<String>,
}

impl ParamSpec {
    pub(crate) fn new(name: &str, ty: ValueType, default: Option<Value>) -> Self {
        ParamSpec {
            name: name.to_string(),
            ty,
            default,
            short: None,
            description: None,
        }
    }
}

/// Documentation metadata for one parameter, supplied by the documentation
/// collaborator and applied after the signature index is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocMeta {
    /// Replacement long-form spelling (must start with `--`).
    pub display_override: Option<String>,
    /// Short alias without the leading dash (`v` registers `-v`).
    pub short_alias: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

/// A declared command signature: ordered positional parameters, an
/// insertion-ordered named parameter table, optional variadic slots, and the
/// bidirectional index from every accepted command-line spelling to the
/// internal name it resolves to.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSignature {
    name: Option<String>,
    positional: Vec<ParamSpec>,
    named: IndexMap<String, ParamSpec>,
    variadic_positional: bool,
    variadic_keyword: bool,
    index: IndexMap<String, String>,
    allow_shadowing: bool,
}

impl CommandSignature {
    /// Start declaring a signature.
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// The command name this signature belongs to, if any.
    pub fn command_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The ordered positional parameters.
    pub fn positional(&self) -> &[ParamSpec] {
        &self.positional
    }

    /// The insertion-ordered named parameters (reserved help entries
    /// included).
    pub fn named(&self) -> &IndexMap<String, ParamSpec> {
        &self.named
    }

    /// Whether a variadic-positional slot was declared.
    pub fn has_variadic_positional(&self) -> bool {
        self.variadic_positional
    }

    /// Whether a variadic-keyword slot was declared.
    pub fn has_variadic_keyword(&self) -> bool {
        self.variadic_keyword
    }

    /// Resolve a command-line spelling to its internal parameter name.
    pub fn resolve(&self, spelling: &str) -> Option<&str> {
        self.index.get(spelling).map(String::as_str)
    }

    /// Every accepted spelling, in registration order.
    pub fn spellings(&self) -> Vec<String> {
        self.index.keys().cloned().collect()
    }

    /// Apply documentation metadata to a declared parameter.
    ///
    /// This may add new spellings to the index and therefore re-checks for
    /// collisions; a collision here is as much a programming error as one at
    /// build time.
    pub fn apply_docs(&mut self, name: &str, meta: DocMeta) -> Result<(), SignatureError> {
        let allow_shadowing = self.allow_shadowing;
        let spec = match self.named.get_mut(name) {
            Some(spec) => spec,
            None => match self.positional.iter_mut().find(|p| p.name == name) {
                Some(spec) => spec,
                None => {
                    return Err(SignatureError::UnknownParam {
                        name: name.to_string(),
                    })
                }
            },
        };

        if let Some(desc) = meta.description {
            spec.description = Some(desc);
        }

        let ty = spec.ty;

        if let Some(alias) = meta.short_alias {
            spec.short = Some(alias.clone());
            let spelling = format!("-{}", alias);
            index_insert(&mut self.index, &spelling, name, allow_shadowing)?;
        }

        if let Some(display) = meta.display_override {
            // The override replaces the derived long form entirely.
            let derived = long_option(name);
            self.index.shift_remove(&derived);
            if let Some(negated) = negated_spellings(&derived) {
                for spelling in negated.iter() {
                    self.index.shift_remove(spelling);
                }
            }

            index_insert(&mut self.index, &display, name, allow_shadowing)?;
            if matches!(ty, ValueType::Flag | ValueType::Any) {
                if let Some(negated) = negated_spellings(&display) {
                    for spelling in negated.iter() {
                        index_insert(&mut self.index, spelling, name, allow_shadowing)?;
                    }
                }
            }
        }

        Ok(())
    }
}

/// Builder for [`CommandSignature`]. Construction fails loudly on any
/// spelling collision; two parameters may never claim the same spelling.
#[derive(Debug, Clone, Default)]
pub struct SignatureBuilder {
    name: Option<String>,
    positional: Vec<ParamSpec>,
    named: Vec<ParamSpec>,
    variadic_positional: bool,
    variadic_keyword: bool,
}

impl SignatureBuilder {
    /// Name the command this signature belongs to.
    pub fn command_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Declare the next positional parameter.
    pub fn positional(mut self, name: &str, ty: ValueType) -> Self {
        self.positional.push(ParamSpec::new(name, ty, None));
        self
    }

    /// Declare a named parameter with a default value.
    pub fn named(mut self, name: &str, ty: ValueType, default: Value) -> Self {
        self.named.push(ParamSpec::new(name, ty, Some(default)));
        self
    }

    /// Declare a named parameter that must be supplied.
    pub fn required_named(mut self, name: &str, ty: ValueType) -> Self {
        self.named.push(ParamSpec::new(name, ty, None));
        self
    }

    /// Declare a variadic-positional slot (absorbs unlimited extra
    /// positional arguments). At most one per command.
    pub fn variadic_positional(mut self) -> Self {
        self.variadic_positional = true;
        self
    }

    /// Declare a variadic-keyword slot (absorbs any undeclared long
    /// option). At most one per command.
    pub fn variadic_keyword(mut self) -> Self {
        self.variadic_keyword = true;
        self
    }

    /// Build the signature under the default settings.
    pub fn build(self) -> Result<CommandSignature, SignatureError> {
        self.build_with(&Settings::default())
    }

    /// Build the signature, applying the given shadowing policy.
    pub fn build_with(self, settings: &Settings) -> Result<CommandSignature, SignatureError> {
        let mut seen = std::collections::HashSet::new();
        for spec in self.positional.iter().chain(self.named.iter()) {
            if !seen.insert(spec.name.clone()) {
                return Err(SignatureError::DuplicateParam {
                    name: spec.name.clone(),
                });
            }
        }

        let mut index: IndexMap<String, String> = IndexMap::new();
        for (spelling, param) in RESERVED_SPELLINGS {
            index.insert(spelling.to_string(), param.to_string());
        }

        let allow_shadowing = settings.help_shadowing_allowed();

        for spec in &self.positional {
            index_insert(&mut index, &long_option(&spec.name), &spec.name, allow_shadowing)?;
        }

        for spec in &self.named {
            let long = long_option(&spec.name);
            index_insert(&mut index, &long, &spec.name, allow_shadowing)?;

            if matches!(spec.ty, ValueType::Flag | ValueType::Any) {
                if let Some(negated) = negated_spellings(&long) {
                    for spelling in negated.iter() {
                        index_insert(&mut index, spelling, &spec.name, allow_shadowing)?;
                    }
                }
            }
        }

        let mut named = IndexMap::new();
        named.insert(
            HELP_PARAM.to_string(),
            ParamSpec::new(HELP_PARAM, ValueType::Flag, Some(Value::Bool(false))),
        );
        named.insert(
            HELPX_PARAM.to_string(),
            ParamSpec::new(HELPX_PARAM, ValueType::Flag, Some(Value::Bool(false))),
        );
        for spec in self.named {
            named.insert(spec.name.clone(), spec);
        }

        Ok(CommandSignature {
            name: self.name,
            positional: self.positional,
            named,
            variadic_positional: self.variadic_positional,
            variadic_keyword: self.variadic_keyword,
            index,
            allow_shadowing,
        })
    }
}

/// Insert a spelling into the index, enforcing the collision rules: a
/// reserved entry may be shadowed when the policy allows it, everything else
/// collides loudly.
fn index_insert(
    index: &mut IndexMap<String, String>,
    spelling: &str,
    name: &str,
    allow_shadowing: bool,
) -> Result<(), SignatureError> {
    if let Some(existing) = index.get(spelling) {
        if existing == name {
            return Ok(());
        }

        let reserved = existing == HELP_PARAM || existing == HELPX_PARAM;
        if reserved {
            if !allow_shadowing {
                return Err(SignatureError::ReservedShadowing {
                    spelling: spelling.to_string(),
                });
            }
        } else {
            return Err(SignatureError::SpellingCollision {
                spelling: spelling.to_string(),
                first: existing.clone(),
                second: name.to_string(),
            });
        }
    }

    index.insert(spelling.to_string(), name.to_string());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_spellings_always_present() {
        let sig = CommandSignature::builder().build().unwrap();

        assert_eq!(sig.resolve("--help"), Some(HELP_PARAM));
        assert_eq!(sig.resolve("-h"), Some(HELP_PARAM));
        assert_eq!(sig.resolve("--helpx"), Some(HELPX_PARAM));
        assert_eq!(sig.resolve("-hh"), Some(HELPX_PARAM));
        assert_eq!(sig.resolve("--:help"), Some(HELP_PARAM));
        assert_eq!(sig.resolve("-:hh"), Some(HELPX_PARAM));
    }

    #[test]
    fn test_long_forms_and_negations() {
        let sig = CommandSignature::builder()
            .positional("username", ValueType::Text)
            .named("remember_me", ValueType::Flag, Value::Bool(false))
            .named("retries", ValueType::Number, Value::Int(3))
            .build()
            .unwrap();

        // A positional can also be addressed by its long form.
        assert_eq!(sig.resolve("--username"), Some("username"));

        assert_eq!(sig.resolve("--remember-me"), Some("remember_me"));
        assert_eq!(sig.resolve("--not-remember-me"), Some("remember_me"));
        assert_eq!(sig.resolve("--no-remember-me"), Some("remember_me"));
        assert_eq!(sig.resolve("--!remember-me"), Some("remember_me"));

        // Non-boolean parameters get no negated spellings.
        assert_eq!(sig.resolve("--retries"), Some("retries"));
        assert_eq!(sig.resolve("--not-retries"), None);
    }

    #[test]
    fn test_duplicate_param_rejected() {
        let got = CommandSignature::builder()
            .positional("name", ValueType::Text)
            .named("name", ValueType::Text, Value::Text("x".into()))
            .build();

        assert_eq!(
            got.err(),
            Some(SignatureError::DuplicateParam {
                name: "name".into()
            })
        );
    }

    #[test]
    fn test_spelling_collision_rejected() {
        // Distinct internal names can still map to one kebab spelling
        // (leading underscores are stripped for display).
        let got = CommandSignature::builder()
            .named("some_opt", ValueType::Text, Value::None)
            .named("_some_opt", ValueType::Text, Value::None)
            .build();

        assert_eq!(
            got.err(),
            Some(SignatureError::SpellingCollision {
                spelling: "--some-opt".into(),
                first: "some_opt".into(),
                second: "_some_opt".into(),
            })
        );
    }

    #[test]
    fn test_negation_collision_rejected() {
        let got = CommandSignature::builder()
            .named("dry_run", ValueType::Flag, Value::Bool(false))
            .named("not_dry_run", ValueType::Flag, Value::Bool(false))
            .build();

        assert!(matches!(
            got,
            Err(SignatureError::SpellingCollision { spelling, .. }) if spelling == "--not-dry-run"
        ));
    }

    #[test]
    fn test_help_shadowing_policy() {
        // Shadowing the reserved "-h" is permitted by default...
        let mut sig = CommandSignature::builder()
            .named("host", ValueType::Text, Value::Text("localhost".into()))
            .build()
            .unwrap();
        sig.apply_docs(
            "host",
            DocMeta {
                short_alias: Some("h".into()),
                ..DocMeta::default()
            },
        )
        .unwrap();
        assert_eq!(sig.resolve("-h"), Some("host"));

        // ...and rejected when the settings forbid it.
        let mut sig = CommandSignature::builder()
            .named("host", ValueType::Text, Value::Text("localhost".into()))
            .build_with(&Settings::new().forbid_help_shadowing())
            .unwrap();
        let got = sig.apply_docs(
            "host",
            DocMeta {
                short_alias: Some("h".into()),
                ..DocMeta::default()
            },
        );
        assert_eq!(
            got,
            Err(SignatureError::ReservedShadowing {
                spelling: "-h".into()
            })
        );
    }

    #[test]
    fn test_apply_docs() {
        let mut sig = CommandSignature::builder()
            .named("verbose", ValueType::Flag, Value::Bool(false))
            .build()
            .unwrap();

        sig.apply_docs(
            "verbose",
            DocMeta {
                short_alias: Some("v".into()),
                description: Some("print more".into()),
                ..DocMeta::default()
            },
        )
        .unwrap();

        assert_eq!(sig.resolve("-v"), Some("verbose"));
        let spec = sig.named().get("verbose").unwrap();
        assert_eq!(spec.short.as_deref(), Some("v"));
        assert_eq!(spec.description.as_deref(), Some("print more"));
    }

    #[test]
    fn test_apply_docs_display_override() {
        let mut sig = CommandSignature::builder()
            .named("dry_run", ValueType::Flag, Value::Bool(false))
            .build()
            .unwrap();

        sig.apply_docs(
            "dry_run",
            DocMeta {
                display_override: Some("--pretend".into()),
                ..DocMeta::default()
            },
        )
        .unwrap();

        assert_eq!(sig.resolve("--pretend"), Some("dry_run"));
        assert_eq!(sig.resolve("--not-pretend"), Some("dry_run"));
        assert_eq!(sig.resolve("--dry-run"), None);
    }

    #[test]
    fn test_apply_docs_collision_rechecked() {
        let mut sig = CommandSignature::builder()
            .named("alpha", ValueType::Flag, Value::Bool(false))
            .named("beta", ValueType::Flag, Value::Bool(false))
            .build()
            .unwrap();

        sig.apply_docs(
            "alpha",
            DocMeta {
                short_alias: Some("x".into()),
                ..DocMeta::default()
            },
        )
        .unwrap();

        let got = sig.apply_docs(
            "beta",
            DocMeta {
                short_alias: Some("x".into()),
                ..DocMeta::default()
            },
        );

        assert!(matches!(
            got,
            Err(SignatureError::SpellingCollision { spelling, .. }) if spelling == "-x"
        ));
    }
}
