// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

/// A single-command program, including the interactive loop:
///
/// ```bash
/// $ cargo run --example greet -- alice --times 3
/// $ cargo run --example greet -- alice :loop
/// ```
use std::io;

use argot::{
    parse, Argv, CommandSignature, Mode, ParseOutcome, ParsedResult, Repl, Settings, Value,
    ValueType,
};

fn signature() -> CommandSignature {
    CommandSignature::builder()
        .command_name("greet")
        .positional("name", ValueType::Text)
        .named("times", ValueType::Number, Value::Int(1))
        .named("shout", ValueType::Flag, Value::Bool(false))
        .build()
        .expect("static signature")
}

fn greet(result: &ParsedResult) {
    let name = match result.positional.get("name") {
        Some(Value::Text(name)) => name.clone(),
        _ => return,
    };

    let times = match result.named.get("times") {
        Some(Value::Int(n)) => *n,
        _ => 1,
    };

    let shout = matches!(result.named.get("shout"), Some(Value::Bool(true)));

    for _ in 0..times.max(0) {
        if shout {
            println!("HELLO {}!", name.to_uppercase());
        } else {
            println!("Hello {}", name);
        }
    }
}

fn main() -> io::Result<()> {
    let signature = signature();
    let settings = Settings::default();
    let argv = Argv::from_env();

    match parse(&argv, Mode::Command, &signature, &settings) {
        Ok(ParseOutcome::Invoke(result)) => {
            greet(&result);

            if result.loop_requested {
                let stdin = io::stdin();
                let mut repl = Repl::new(&signature, settings, argv.tokens());
                repl.run(stdin.lock(), io::stdout(), |outcome| {
                    if let ParseOutcome::Invoke(result) = outcome {
                        greet(result);
                    }
                })?;
            }
        }
        Ok(ParseOutcome::Help(_)) => {
            println!("usage: greet NAME [--times N] [--shout]");
        }
        Err(err) => {
            // Only reachable with ARGOT_DEBUG=1; `parse` reports otherwise.
            eprintln!("{}", err);
        }
    }

    Ok(())
}
