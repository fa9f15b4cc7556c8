//! Splits raw server log lines into timestamp, level and message, and pulls
//! the event name and JSON payload out of event messages.
//!
//! Expected line shape:
//!
//! ```text
//! [2018-05-24T10:21:56.123] [INFO] userDebugLog - 2018-05-24 10:21:56 123 : >>> event SHOW_ACTION >>> {...}
//! ```

use std::fmt;

use chrono::NaiveDateTime;

pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";
pub const EVENT_LEVEL: &str = "INFO";
const EVENT_MARKER: &str = ">>>";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A player acted; carries the acting player and the table state.
    ShowAction,
    /// A round was settled; carries final stacks and winners.
    GameOver,
    Other(String),
}

impl EventKind {
    pub fn from_name(name: &str) -> EventKind {
        match name {
            "SHOW_ACTION" => EventKind::ShowAction,
            "GAME_OVER" => EventKind::GameOver,
            other => EventKind::Other(other.to_string()),
        }
    }

    pub fn is_tracked(&self) -> bool {
        !matches!(self, EventKind::Other(_))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::ShowAction => f.write_str("SHOW_ACTION"),
            EventKind::GameOver => f.write_str("GAME_OVER"),
            EventKind::Other(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogLine<'a> {
    pub time: NaiveDateTime,
    pub level: &'a str,
    pub logger: &'a str,
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventLine<'a> {
    pub time: NaiveDateTime,
    pub kind: EventKind,
    pub payload: &'a str,
}

/// Returns `None` for anything that is not a well-formed log line.
pub fn parse_line(line: &str) -> Option<LogLine<'_>> {
    let (time, rest) = bracketed(line)?;
    let time = NaiveDateTime::parse_from_str(time, TIME_FORMAT).ok()?;
    let (level, rest) = bracketed(rest.trim_start())?;
    if level.is_empty() || !level.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let (logger, rest) = next_token(rest)?;
    let rest = rest.trim_start().strip_prefix('-')?;

    // Second timestamp ("2018-05-24 10:21:56 123"), followed by ':'.
    let (_date, rest) = next_token(rest)?;
    let (_clock, rest) = next_token(rest)?;
    let colon = rest.find(':')?;
    let millis = rest[..colon].trim();
    if millis.is_empty() || millis.len() > 3 || !millis.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let message = rest[colon + 1..].trim();
    if message.is_empty() {
        return None;
    }

    Some(LogLine {
        time,
        level,
        logger,
        message,
    })
}

/// Parses the `>>> event NAME >>> payload` part of an `INFO` line.
pub fn parse_event<'a>(line: &LogLine<'a>) -> Option<EventLine<'a>> {
    if line.level != EVENT_LEVEL {
        return None;
    }
    let rest = line.message.trim_start().strip_prefix(EVENT_MARKER)?;
    let (word, rest) = next_token(rest)?;
    if !word.eq_ignore_ascii_case("event") {
        return None;
    }
    let (name, rest) = next_token(rest)?;
    let payload = rest.trim_start().strip_prefix(EVENT_MARKER)?.trim();
    if payload.is_empty() {
        return None;
    }

    Some(EventLine {
        time: line.time,
        kind: EventKind::from_name(name),
        payload,
    })
}

pub fn parse_event_line(line: &str) -> Option<EventLine<'_>> {
    parse_event(&parse_line(line)?)
}

fn bracketed(s: &str) -> Option<(&str, &str)> {
    let inner = s.strip_prefix('[')?;
    let end = inner.find(']')?;
    Some((&inner[..end], &inner[end + 1..]))
}

fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.find(char::is_whitespace) {
        Some(end) => Some((&s[..end], &s[end..])),
        None => Some((s, "")),
    }
}
