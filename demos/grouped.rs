// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

/// A grouped-commands program: the first token picks the command.
///
/// ```bash
/// $ cargo run --example grouped -- login alice secret --remember-me
/// $ cargo run --example grouped -- version
/// $ cargo run --example grouped -- -h login
/// ```
use std::process;

use argot::{
    did_you_mean, extract_command_name, parse, Argv, CommandSignature, DocMeta, Mode,
    ParseOutcome, ParsedResult, Settings, Value, ValueType,
};

const COMMANDS: &[&str] = &["login", "version"];

fn login_signature() -> CommandSignature {
    let mut sig = CommandSignature::builder()
        .command_name("login")
        .positional("username", ValueType::Text)
        .positional("password", ValueType::Text)
        .named("remember_me", ValueType::Flag, Value::Bool(false))
        .build()
        .expect("static signature");

    sig.apply_docs(
        "remember_me",
        DocMeta {
            short_alias: Some("r".into()),
            description: Some("keep the session".into()),
            ..DocMeta::default()
        },
    )
    .expect("static docs");

    sig
}

fn version_signature() -> CommandSignature {
    CommandSignature::builder()
        .command_name("version")
        .named("add_v_prefix", ValueType::Flag, Value::Bool(false))
        .build()
        .expect("static signature")
}

fn group_signature() -> CommandSignature {
    CommandSignature::builder().build().expect("static signature")
}

fn dispatch(result: &ParsedResult) {
    match result.command.as_deref() {
        Some("login") => {
            let remember = matches!(result.named.get("remember_me"), Some(Value::Bool(true)));
            println!(
                "login {} {} (remember: {})",
                result.positional["username"], result.positional["password"], remember
            );
        }
        Some("version") => {
            let prefix = matches!(result.named.get("add_v_prefix"), Some(Value::Bool(true)));
            println!("{}{}", if prefix { "v" } else { "" }, env!("CARGO_PKG_VERSION"));
        }
        _ => (),
    }
}

fn main() {
    let settings = Settings::default();
    let argv = Argv::from_env();

    let signature = match extract_command_name(argv.tokens()).as_deref() {
        Some("login") => login_signature(),
        Some("version") => version_signature(),
        Some(unknown) => {
            match did_you_mean(unknown, COMMANDS.iter().copied()) {
                Some(suggestion) => {
                    eprintln!("command {:?} not found, did you mean {:?}?", unknown, suggestion)
                }
                None => eprintln!("unknown command: {}", unknown),
            }
            process::exit(1);
        }
        None => group_signature(),
    };

    match parse(&argv, Mode::Group, &signature, &settings) {
        Ok(ParseOutcome::Invoke(result)) => dispatch(&result),
        Ok(ParseOutcome::Help(request)) => match request.command.as_deref() {
            Some("login") => println!("usage: grouped login USERNAME PASSWORD [--remember-me|-r]"),
            Some("version") => println!("usage: grouped version [--add-v-prefix]"),
            _ => println!("usage: grouped <login|version> ..."),
        },
        Err(err) => eprintln!("{}", err),
    }
}
