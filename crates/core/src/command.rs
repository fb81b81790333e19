// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Comment command parsing
//!
//! Extracts a bot command and its arguments from free-text comments.
//! The marker must appear as a standalone whitespace-delimited token;
//! `/tugboat-of-doom` does not count. Up to three arguments follow the
//! marker, the third keeping the remainder of the line verbatim so
//! multi-word trailing text stays one argument.

use crate::constants::COMMAND_MARKER;

/// Parse bot commands from a comment using the default marker.
///
/// Returns the argument tokens after the marker; the first element is
/// the command name. Empty when the comment holds no actionable command.
pub fn commands_from_comment(comment: &str) -> Vec<String> {
    commands_with_marker(comment, COMMAND_MARKER)
}

/// Parse bot commands from a comment using an explicit marker token
pub fn commands_with_marker(comment: &str, marker: &str) -> Vec<String> {
    if comment.trim().is_empty() {
        tracing::debug!("empty comment, nothing to do");
        return Vec::new();
    }

    let Some(start) = comment.find(marker) else {
        tracing::debug!(comment, "comment is not addressed to the bot");
        return Vec::new();
    };

    let mut tokens = split_with_limit(&comment[start..], 4);

    // The marker embedded inside a longer word is not a command.
    if tokens.first().map(|t| *t != marker).unwrap_or(true) {
        tracing::debug!(comment, "comment is not addressed to the bot");
        return Vec::new();
    }
    tokens.remove(0);

    if tokens.is_empty() {
        tracing::debug!(comment, "comment does not contain a command");
        return Vec::new();
    }

    tokens.into_iter().map(str::to_owned).collect()
}

/// Split on runs of whitespace into at most `limit` tokens; the final
/// token keeps the rest of the input (leading whitespace stripped).
fn split_with_limit(input: &str, limit: usize) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = input.trim_start();

    while parts.len() + 1 < limit {
        match rest.find(char::is_whitespace) {
            Some(idx) => {
                parts.push(&rest[..idx]);
                rest = rest[idx..].trim_start();
                if rest.is_empty() {
                    return parts;
                }
            }
            None => {
                if !rest.is_empty() {
                    parts.push(rest);
                }
                return parts;
            }
        }
    }

    if !rest.is_empty() {
        parts.push(rest);
    }
    parts
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
