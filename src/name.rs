// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

/// Spelling prefixes that negate a boolean-compatible long option.
pub const NEGATION_PREFIXES: &[&str] = &["--not-", "--no-", "--!"];

/// Presentation style for positional parameter names.
///
/// Applied uniformly wherever a positional name is displayed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum NameStyle {
    /// `aaa-bbb` (the default).
    #[default]
    LowerKebab,
    /// `aaa_bbb`.
    LowerSnake,
    /// `AAA-BBB`.
    UpperKebab,
    /// `AAA_BBB`.
    UpperSnake,
}

/// The role a name plays on the command line.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NameRole {
    /// A positional parameter label.
    Positional,
    /// A `--long` option.
    LongOption,
    /// A `-x` short option.
    ShortOption,
}

/// Convert an internal `snake_case` name to its kebab-case presentation.
///
/// Leading underscores are stripped first.
pub fn to_kebab(name: &str) -> String {
    name.trim_start_matches('_').replace('_', "-")
}

/// The long-option spelling for an internal name.
pub fn long_option(name: &str) -> String {
    format!("--{}", to_kebab(name))
}

/// Render an internal parameter name for display.
pub fn display_name(name: &str, role: NameRole, style: NameStyle) -> String {
    match role {
        NameRole::LongOption => long_option(name),
        NameRole::ShortOption => format!("-{}", to_kebab(name)),
        NameRole::Positional => {
            let base = name.trim_start_matches('_');
            match style {
                NameStyle::LowerKebab => base.to_lowercase().replace('_', "-"),
                NameStyle::LowerSnake => base.to_lowercase(),
                NameStyle::UpperKebab => base.to_uppercase().replace('_', "-"),
                NameStyle::UpperSnake => base.to_uppercase(),
            }
        }
    }
}

/// The negated spellings of a long option, in registration order.
pub fn negated_spellings(long: &str) -> Option<[String; 3]> {
    let bare = long.strip_prefix("--")?;
    Some([
        format!("--not-{}", bare),
        format!("--no-{}", bare),
        format!("--!{}", bare),
    ])
}

/// Rewrite a negated long-option token to its affirmative spelling, if it is
/// one (`--not-x`/`--no-x`/`--!x` become `--x`).
pub fn strip_negation(token: &str) -> Option<String> {
    for prefix in NEGATION_PREFIXES {
        if let Some(bare) = token.strip_prefix(prefix) {
            if !bare.is_empty() {
                return Some(format!("--{}", bare));
            }
        }
    }
    None
}

/// Derive the internal name of an implicit variadic-keyword parameter from
/// its long-form spelling (`--extra-bits` becomes `extra_bits`).
pub fn implicit_keyword_name(spelling: &str) -> String {
    spelling.trim_start_matches('-').replace('-', "_")
}
