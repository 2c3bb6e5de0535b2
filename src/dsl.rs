//! Parser for line stage scripts.
//!
//! Script format (CMS Pipelines style):
//! ```text
//! PIPE LOCATE /ERROR/
//! | CHANGE /ERROR/WARN/
//! | UPPER
//! ?
//! ```
//!
//! - One stage per line; a leading `PIPE` or `|` is ignored
//! - `?` at the end of a line marks the end of the pipeline
//! - Lines starting with `#` are comments
//! - Keywords are case-insensitive
//!
//! Supported stages:
//! - `LOCATE /pattern/` - Keep lines containing pattern (grep-like)
//! - `NLOCATE /pattern/` - Keep lines NOT containing pattern
//! - `CHANGE /old/new/` or `CHANGE /old/ /new/` - Replace occurrences (sed-like)
//! - `UPPER` / `LOWER` - Case conversion
//! - `REVERSE` - Reverse characters in each line
//! - `STRIP` - Trim leading and trailing whitespace
//! - `TAKE n` - Keep the first n lines
//! - `SKIP n` - Drop the first n lines
//!
//! Patterns are delimited strings: the first non-blank character is the
//! delimiter and the string runs to the next occurrence of it, so
//! `LOCATE "a b"`, `LOCATE /a b/` and `LOCATE .a b.` are equivalent.

use thiserror::Error;

/// A stage script could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct StageError {
    /// 1-based line of the script.
    pub line: usize,
    pub message: String,
}

/// Parsed stage command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// LOCATE /pattern/
    Locate { pattern: String },
    /// NLOCATE /pattern/
    Nlocate { pattern: String },
    /// CHANGE /old/new/
    Change { old: String, new: String },
    /// UPPER
    Upper,
    /// LOWER
    Lower,
    /// REVERSE
    Reverse,
    /// STRIP
    Strip,
    /// TAKE n
    Take { n: u64 },
    /// SKIP n
    Skip { n: u64 },
}

impl Command {
    /// Get the stage name for error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Locate { .. } => "LOCATE",
            Command::Nlocate { .. } => "NLOCATE",
            Command::Change { .. } => "CHANGE",
            Command::Upper => "UPPER",
            Command::Lower => "LOWER",
            Command::Reverse => "REVERSE",
            Command::Strip => "STRIP",
            Command::Take { .. } => "TAKE",
            Command::Skip { .. } => "SKIP",
        }
    }
}

/// Parse script text into commands.
pub fn parse_commands(text: &str) -> Result<Vec<Command>, StageError> {
    let mut commands = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = match line.split_once(char::is_whitespace) {
            Some((first, rest)) if first.eq_ignore_ascii_case("PIPE") => rest.trim(),
            _ if line.eq_ignore_ascii_case("PIPE") => continue,
            _ => line,
        };

        let line = line.strip_prefix('|').map_or(line, str::trim);
        let line = line.trim_end_matches('?').trim();

        if line.is_empty() {
            continue;
        }

        let cmd = parse_command(line).map_err(|message| StageError {
            line: line_num + 1,
            message,
        })?;
        commands.push(cmd);
    }

    Ok(commands)
}

/// Parse a single command line.
fn parse_command(line: &str) -> Result<Command, String> {
    let (keyword, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(k, r)| (k, r.trim()));

    match keyword.to_ascii_uppercase().as_str() {
        "LOCATE" => {
            let pattern = parse_pattern(rest, "LOCATE")?;
            Ok(Command::Locate { pattern })
        }
        "NLOCATE" => {
            let pattern = parse_pattern(rest, "NLOCATE")?;
            Ok(Command::Nlocate { pattern })
        }
        "CHANGE" => parse_change(rest),
        "UPPER" => Ok(Command::Upper),
        "LOWER" => Ok(Command::Lower),
        "REVERSE" => Ok(Command::Reverse),
        "STRIP" => Ok(Command::Strip),
        "TAKE" => {
            let n = rest.parse().map_err(|_| "TAKE requires a number")?;
            Ok(Command::Take { n })
        }
        "SKIP" => {
            let n = rest.parse().map_err(|_| "SKIP requires a number")?;
            Ok(Command::Skip { n })
        }
        _ => Err(format!("Unknown command: {keyword}")),
    }
}

/// Parse a delimited string using CMS Pipelines convention.
/// The first non-blank character is the delimiter, and the string
/// continues until the next occurrence of that delimiter.
/// Returns (extracted_string, delimiter, rest_of_input).
fn parse_delimited_string(s: &str) -> Result<(String, char, &str), String> {
    let s = s.trim_start();
    let Some(delim) = s.chars().next() else {
        return Err("Expected delimited string".to_string());
    };
    let after_delim = &s[delim.len_utf8()..];

    match after_delim.find(delim) {
        Some(end) => Ok((
            after_delim[..end].to_string(),
            delim,
            &after_delim[end + delim.len_utf8()..],
        )),
        None => Err(format!("Unclosed delimiter '{delim}'")),
    }
}

fn parse_pattern(rest: &str, name: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err(format!("{name} requires a pattern"));
    }
    let (pattern, _, _) = parse_delimited_string(rest)?;
    if pattern.is_empty() {
        return Err(format!("{name} pattern must not be empty"));
    }
    Ok(pattern)
}

/// Parse CHANGE command.
/// Both strings use the same delimiter, either run together
/// (`/old/new/`) or written separately (`/old/ /new/`).
fn parse_change(rest: &str) -> Result<Command, String> {
    if rest.is_empty() {
        return Err("CHANGE requires two delimited strings".to_string());
    }

    let (old, delim, after_first) = parse_delimited_string(rest)?;
    if old.is_empty() {
        return Err("CHANGE old string must not be empty".to_string());
    }

    let new = if after_first.is_empty() || after_first.starts_with(char::is_whitespace) {
        let (new, second_delim, _) = parse_delimited_string(after_first)?;
        if second_delim != delim {
            return Err(format!(
                "CHANGE strings must use the same delimiter '{delim}'"
            ));
        }
        new
    } else {
        match after_first.find(delim) {
            Some(end) => after_first[..end].to_string(),
            None => return Err(format!("Unclosed delimiter '{delim}'")),
        }
    };

    Ok(Command::Change { old, new })
}
