//! Parsing for stimulus scripts.
//!
//! A script is a line-oriented list of statements driving the counter one
//! edge at a time and checking its output.
//!
//! ## Supported Syntax
//!
//! - `reset 10` — hold reset for 10 edges, then release it
//! - `set data=0x05 load=1 en=0` — change inputs; unchanged fields persist
//! - `set ctrl=0b1101` — replace all four control bits from a packed byte
//! - `tick` / `tick 3` — advance one or more edges
//! - `expect out == 0x08`, `expect count != 0` — check outputs
//! - Comments: `;` to end of line
//! - Literals: decimal, `0x` hex, `0b` binary

use std::fmt;
use std::fs;
use std::path::Path;

use crate::{HarnessError, ScriptError};

/// Comparison operator for expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    /// Assert equality (`==`).
    Equal,
    /// Assert inequality (`!=`).
    NotEqual,
}

impl ComparisonOp {
    /// Applies the comparison.
    #[must_use]
    pub const fn holds(self, actual: u8, expected: u8) -> bool {
        match self {
            Self::Equal => actual == expected,
            Self::NotEqual => actual != expected,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => write!(f, "=="),
            Self::NotEqual => write!(f, "!="),
        }
    }
}

/// Observable value an expectation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Gated output pins.
    Out,
    /// Raw register, bypassing the output gate.
    Count,
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Out => write!(f, "out"),
            Self::Count => write!(f, "count"),
        }
    }
}

/// One field assignment inside a `set` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment {
    /// Count-enable.
    En(bool),
    /// Parallel load.
    Load(bool),
    /// Direction.
    Up(bool),
    /// Output-enable.
    Oe(bool),
    /// Data bus byte.
    Data(u8),
    /// All four control bits from a packed byte.
    Ctrl(u8),
}

/// A checked observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectation {
    /// What is read.
    pub probe: Probe,
    /// How it is compared.
    pub operator: ComparisonOp,
    /// Value compared against.
    pub expected: u8,
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:#04X}", self.probe, self.operator, self.expected)
    }
}

/// A parsed script statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Hold reset for `edges` edges, then release.
    Reset {
        /// Number of edges reset is held.
        edges: u32,
    },
    /// Change driven inputs.
    Set(Vec<Assignment>),
    /// Advance `edges` edges.
    Tick {
        /// Number of edges to advance.
        edges: u32,
    },
    /// Check an observable value.
    Expect(Expectation),
}

/// A statement with its 1-indexed source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// Source line number.
    pub line: usize,
    /// Parsed statement.
    pub statement: Statement,
}

/// A fully parsed script.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    /// Statements in source order.
    pub lines: Vec<ScriptLine>,
}

impl Script {
    /// Number of `expect` statements.
    #[must_use]
    pub fn expectation_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l.statement, Statement::Expect(_)))
            .count()
    }
}

/// Parses a whole script.
///
/// # Errors
///
/// Returns [`ScriptError`] for the first line with invalid syntax.
pub fn parse_script(content: &str) -> Result<Script, ScriptError> {
    let mut lines = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let stripped = strip_comment(raw).trim();

        if stripped.is_empty() {
            continue;
        }

        let statement = parse_statement(stripped).map_err(|message| ScriptError {
            line,
            text: stripped.to_string(),
            message,
        })?;

        lines.push(ScriptLine { line, statement });
    }

    Ok(Script { lines })
}

/// Reads and parses a script file.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] when the file cannot be read and
/// [`HarnessError::Parse`] when its contents do not parse.
pub fn load_script(path: &Path) -> Result<Script, HarnessError> {
    let content = fs::read_to_string(path).map_err(|source| HarnessError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_script(&content).map_err(|error| HarnessError::parse(path, error))
}

fn strip_comment(line: &str) -> &str {
    line.find(';').map_or(line, |pos| &line[..pos])
}

fn parse_statement(text: &str) -> Result<Statement, String> {
    let (keyword, rest) = text
        .split_once(char::is_whitespace)
        .map_or((text, ""), |(k, r)| (k, r.trim()));

    match keyword.to_ascii_lowercase().as_str() {
        "reset" => parse_count(rest, "reset").map(|edges| Statement::Reset { edges }),
        "tick" => {
            if rest.is_empty() {
                Ok(Statement::Tick { edges: 1 })
            } else {
                parse_count(rest, "tick").map(|edges| Statement::Tick { edges })
            }
        }
        "set" => parse_assignments(rest).map(Statement::Set),
        "expect" => parse_expectation(rest).map(Statement::Expect),
        other => Err(format!("unknown statement '{other}'")),
    }
}

fn parse_count(text: &str, keyword: &str) -> Result<u32, String> {
    if text.is_empty() {
        return Err(format!("'{keyword}' needs an edge count"));
    }
    if text.split_whitespace().count() > 1 {
        return Err(format!("'{keyword}' takes a single edge count"));
    }
    parse_number(text, u64::from(u32::MAX)).and_then(|value| {
        u32::try_from(value).map_err(|_| format!("edge count '{text}' is out of range"))
    })
}

fn parse_assignments(text: &str) -> Result<Vec<Assignment>, String> {
    if text.is_empty() {
        return Err("'set' needs at least one field=value pair".to_string());
    }

    text.split_whitespace().map(parse_assignment).collect()
}

fn parse_assignment(pair: &str) -> Result<Assignment, String> {
    let (field, value) = pair
        .split_once('=')
        .ok_or_else(|| format!("expected field=value, got '{pair}'"))?;

    match field.to_ascii_lowercase().as_str() {
        "en" => parse_bit(value).map(Assignment::En),
        "load" => parse_bit(value).map(Assignment::Load),
        "up" => parse_bit(value).map(Assignment::Up),
        "oe" => parse_bit(value).map(Assignment::Oe),
        "data" => parse_byte(value).map(Assignment::Data),
        "ctrl" => parse_byte(value).map(Assignment::Ctrl),
        other => Err(format!("unknown field '{other}'")),
    }
}

fn parse_expectation(text: &str) -> Result<Expectation, String> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 3 {
        return Err("expected 'probe operator value'".to_string());
    }

    let probe = match parts[0].to_ascii_lowercase().as_str() {
        "out" => Probe::Out,
        "count" => Probe::Count,
        other => return Err(format!("unknown probe '{other}'")),
    };
    let operator = match parts[1] {
        "==" => ComparisonOp::Equal,
        "!=" => ComparisonOp::NotEqual,
        _ => return Err("expected '==' or '!='".to_string()),
    };
    let expected = parse_byte(parts[2])?;

    Ok(Expectation {
        probe,
        operator,
        expected,
    })
}

fn parse_bit(text: &str) -> Result<bool, String> {
    match parse_number(text, 1)? {
        0 => Ok(false),
        _ => Ok(true),
    }
}

fn parse_byte(text: &str) -> Result<u8, String> {
    parse_number(text, u64::from(u8::MAX))
        .and_then(|value| u8::try_from(value).map_err(|_| format!("value '{text}' out of range")))
}

/// Parses a decimal, `0x` hex, or `0b` binary literal no larger than `max`.
fn parse_number(text: &str, max: u64) -> Result<u64, String> {
    let text = text.trim();
    if text.is_empty() {
        return Err("expected a value".to_string());
    }

    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16).map_err(|_| format!("invalid hex value '{text}'"))
    } else if let Some(bin) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        u64::from_str_radix(bin, 2).map_err(|_| format!("invalid binary value '{text}'"))
    } else {
        text.parse::<u64>()
            .map_err(|_| format!("invalid decimal value '{text}'"))
    }?;

    if parsed > max {
        return Err(format!("value '{text}' out of range (max {max})"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reset_and_tick() {
        assert_eq!(
            parse_statement("reset 10").unwrap(),
            Statement::Reset { edges: 10 }
        );
        assert_eq!(parse_statement("tick").unwrap(), Statement::Tick { edges: 1 });
        assert_eq!(
            parse_statement("TICK 0x3").unwrap(),
            Statement::Tick { edges: 3 }
        );
    }

    #[test]
    fn parse_set_with_multiple_fields() {
        assert_eq!(
            parse_statement("set data=0x05 load=1 en=0 up=1 oe=1").unwrap(),
            Statement::Set(vec![
                Assignment::Data(0x05),
                Assignment::Load(true),
                Assignment::En(false),
                Assignment::Up(true),
                Assignment::Oe(true),
            ])
        );
    }

    #[test]
    fn parse_set_packed_control() {
        assert_eq!(
            parse_statement("set ctrl=0b1101").unwrap(),
            Statement::Set(vec![Assignment::Ctrl(0b1101)])
        );
    }

    #[test]
    fn parse_expectations() {
        assert_eq!(
            parse_statement("expect out == 0xFF").unwrap(),
            Statement::Expect(Expectation {
                probe: Probe::Out,
                operator: ComparisonOp::Equal,
                expected: 0xFF,
            })
        );
        assert_eq!(
            parse_statement("expect count != 7").unwrap(),
            Statement::Expect(Expectation {
                probe: Probe::Count,
                operator: ComparisonOp::NotEqual,
                expected: 7,
            })
        );
    }

    #[test]
    fn parse_script_skips_comments_and_blanks() {
        let content = "; bring-up\nreset 2\n\nset data=5 load=1 ; load five\ntick\nexpect out == 5\n";
        let script = parse_script(content).unwrap();

        assert_eq!(script.lines.len(), 4);
        assert_eq!(script.lines[0].line, 2);
        assert_eq!(script.lines[3].line, 6);
        assert_eq!(script.expectation_count(), 1);
    }

    #[test]
    fn parse_error_reports_line_number() {
        let content = "reset 1\ntick\nexpect pc == 0\n";
        let err = parse_script(content).unwrap_err();

        assert_eq!(err.line, 3);
        assert!(err.message.contains("unknown probe"));
        assert_eq!(err.text, "expect pc == 0");
    }

    #[test]
    fn parse_error_on_bit_out_of_range() {
        let err = parse_statement("set en=2").unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn parse_error_on_byte_out_of_range() {
        let err = parse_statement("set data=0x100").unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn parse_error_on_unknown_statement_and_field() {
        assert!(parse_statement("wait 3").unwrap_err().contains("unknown statement"));
        assert!(parse_statement("set foo=1").unwrap_err().contains("unknown field"));
        assert!(parse_statement("set en").unwrap_err().contains("field=value"));
    }

    #[test]
    fn parse_error_on_bad_operator_and_missing_counts() {
        assert!(parse_statement("expect out >= 1")
            .unwrap_err()
            .contains("expected '==' or '!='"));
        assert!(parse_statement("reset").unwrap_err().contains("edge count"));
        assert!(parse_statement("tick 1 2").unwrap_err().contains("single"));
        assert!(parse_statement("set").unwrap_err().contains("at least one"));
    }

    #[test]
    fn load_script_reads_and_parses_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.cnt");
        std::fs::write(&path, "reset 1\nexpect out == 0\n").unwrap();

        let script = load_script(&path).unwrap();
        assert_eq!(script.lines.len(), 2);
    }

    #[test]
    fn load_script_reports_missing_file_and_parse_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = load_script(&dir.path().join("missing.cnt")).unwrap_err();
        assert!(matches!(missing, HarnessError::Io { .. }));

        let path = dir.path().join("bad.cnt");
        std::fs::write(&path, "tick\nbogus\n").unwrap();
        let bad = load_script(&path).unwrap_err();
        match bad {
            HarnessError::Parse { error, .. } => assert_eq!(error.line, 2),
            HarnessError::Io { .. } => panic!("expected a parse error"),
        }
    }

    #[test]
    fn comparison_and_display() {
        assert!(ComparisonOp::Equal.holds(3, 3));
        assert!(ComparisonOp::NotEqual.holds(3, 4));

        let expectation = Expectation {
            probe: Probe::Out,
            operator: ComparisonOp::Equal,
            expected: 0x05,
        };
        assert_eq!(expectation.to_string(), "out == 0x05");
    }
}
