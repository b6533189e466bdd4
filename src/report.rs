// Copyright (c) 2026 The argot authors.
//
// SPDX-License-Identifier: Apache-2.0
//

use std::process;

use tracing::debug;

use crate::argv::Argv;
use crate::error::ParseError;

/// Marker appended to the rendered command line when the error points past
/// its end.
const END_MARKER: &str = "???";

/// Render a parse failure against the original, un-decomposed command line.
///
/// The offending absolute position is underlined with a caret line; the
/// end-of-input sentinel (and any out-of-range position) is shown as a
/// trailing `???` marker. The error message follows.
///
/// ```text
/// failed to parse the command line:
///
///   > python demo.py login --remembr-me
///                          ^~~~~~~~~~~~
///   parameter "--remembr-me" not found, did you mean "--remember-me"?
/// ```
pub fn render_report(argv: &Argv, err: &ParseError) -> String {
    let tokens: Vec<&str> = argv.display_tokens().collect();
    let target = err.position().filter(|pos| *pos < tokens.len());

    let mut line = String::from("> ");
    let mut marker_col = 0;
    let mut marker_len = 0;

    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        if target == Some(i) {
            marker_col = line.chars().count();
            marker_len = token.chars().count();
        }
        line.push_str(token);
    }

    if target.is_none() {
        if !tokens.is_empty() {
            line.push(' ');
        }
        marker_col = line.chars().count();
        marker_len = END_MARKER.chars().count();
        line.push_str(END_MARKER);
    }

    let mut marker = " ".repeat(marker_col);
    marker.push('^');
    marker.extend(std::iter::repeat('~').take(marker_len.saturating_sub(1)));

    format!(
        "failed to parse the command line:\n\n  {}\n  {}\n  {}\n",
        line, marker, err
    )
}

/// Print a rendered report to stderr and terminate with a non-zero status.
pub fn report_and_exit(argv: &Argv, err: &ParseError) -> ! {
    let report = render_report(argv, err);
    debug!(?err, "parse failed, reporting");
    eprintln!("{}", report);
    process::exit(1);
}
