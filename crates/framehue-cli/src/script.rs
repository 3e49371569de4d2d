//! Window lifecycle scripts.
//!
//! One event per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! open 1
//! open 2
//! close 1
//! mode dark
//! ```

use std::str::FromStr;

use framehue::{Mode, ParseModeError, WindowId};
use thiserror::Error;

/// One host lifecycle event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Open(WindowId),
    Close(WindowId),
    Mode(Mode),
}

/// Error parsing a script; `line` is 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("line {line}: unknown event '{word}' (expected open, close, or mode)")]
    UnknownEvent { line: usize, word: String },
    #[error("line {line}: '{event}' needs an argument")]
    MissingArgument { line: usize, event: &'static str },
    #[error("line {line}: invalid window id '{value}'")]
    InvalidWindowId { line: usize, value: String },
    #[error("line {line}: {source}")]
    InvalidMode {
        line: usize,
        #[source]
        source: ParseModeError,
    },
    #[error("line {line}: unexpected trailing input '{rest}'")]
    TrailingInput { line: usize, rest: String },
}

/// Parses a whole script.
///
/// # Errors
/// Returns the first malformed line.
pub fn parse_script(input: &str) -> Result<Vec<HostEvent>, EventParseError> {
    let mut events = Vec::new();
    for (index, raw) in input.lines().enumerate() {
        if let Some(event) = parse_line(index + 1, raw)? {
            events.push(event);
        }
    }
    Ok(events)
}

/// Parses one line; blank and comment-only lines yield `None`.
///
/// # Errors
/// Returns `EventParseError` if the line is not a valid event.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<HostEvent>, EventParseError> {
    let content = raw.split_once('#').map_or(raw, |(before, _)| before);
    let mut words = content.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };

    let (event, arg) = match word.to_ascii_lowercase().as_str() {
        "open" => ("open", words.next()),
        "close" => ("close", words.next()),
        "mode" => ("mode", words.next()),
        _ => {
            return Err(EventParseError::UnknownEvent {
                line,
                word: word.to_string(),
            });
        }
    };
    let arg = arg.ok_or(EventParseError::MissingArgument { line, event })?;

    let rest: Vec<&str> = words.collect();
    if !rest.is_empty() {
        return Err(EventParseError::TrailingInput {
            line,
            rest: rest.join(" "),
        });
    }

    let parsed = match event {
        "mode" => HostEvent::Mode(
            Mode::from_str(arg).map_err(|source| EventParseError::InvalidMode { line, source })?,
        ),
        _ => {
            let id = arg
                .parse::<u64>()
                .map(WindowId)
                .map_err(|_| EventParseError::InvalidWindowId {
                    line,
                    value: arg.to_string(),
                })?;
            if event == "open" {
                HostEvent::Open(id)
            } else {
                HostEvent::Close(id)
            }
        }
    };
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_events() {
        let script = "open 1\nOPEN 2\nclose 1\nmode Dark\n";
        assert_eq!(
            parse_script(script).unwrap(),
            vec![
                HostEvent::Open(WindowId(1)),
                HostEvent::Open(WindowId(2)),
                HostEvent::Close(WindowId(1)),
                HostEvent::Mode(Mode::Dark),
            ]
        );
    }

    #[test]
    fn test_skips_blanks_and_comments() {
        let script = "# session\n\n   \nopen 7  # first window\n";
        assert_eq!(parse_script(script).unwrap(), vec![HostEvent::Open(WindowId(7))]);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        assert_eq!(
            parse_script("open 1\nresize 3\n").unwrap_err(),
            EventParseError::UnknownEvent {
                line: 2,
                word: "resize".into()
            }
        );
        assert_eq!(
            parse_script("\n\nclose\n").unwrap_err(),
            EventParseError::MissingArgument {
                line: 3,
                event: "close"
            }
        );
        assert_eq!(
            parse_script("open -4").unwrap_err(),
            EventParseError::InvalidWindowId {
                line: 1,
                value: "-4".into()
            }
        );
        assert!(matches!(
            parse_script("mode dusk").unwrap_err(),
            EventParseError::InvalidMode { line: 1, .. }
        ));
        assert_eq!(
            parse_script("open 1 2").unwrap_err(),
            EventParseError::TrailingInput {
                line: 1,
                rest: "2".into()
            }
        );
    }

    #[test]
    fn test_error_message() {
        let err = parse_script("open x").unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid window id 'x'");
    }
}
