use serde::Serialize;

use crate::errors::RenderError;

/// One `NAME=value` override, shaped like a container `environment` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvPair {
    pub name: String,
    pub value: String,
}

impl EnvPair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Parse newline-separated `NAME=value` lines into pairs.
///
/// Invariants:
/// - Each line is trimmed first; lines empty after trimming are skipped.
/// - The first `=` is the delimiter; the value may be empty or contain further `=`.
/// - The name is not trimmed beyond the line trim.
/// - Input order is preserved and duplicate names are all emitted.
pub fn parse_env_lines(text: &str) -> Result<Vec<EnvPair>, RenderError> {
    let mut vars = Vec::new();
    for line in text.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match trimmed.split_once('=') {
            Some((name, value)) => vars.push(EnvPair::new(name, value)),
            None => return Err(RenderError::MalformedEnvironmentLine(trimmed.to_string())),
        }
    }
    Ok(vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_keeps_everything_after_first_equals() {
        let vars = parse_env_lines("DSN=postgres://u:p@h/db?sslmode=require").unwrap();
        assert_eq!(
            vars,
            vec![EnvPair::new("DSN", "postgres://u:p@h/db?sslmode=require")]
        );
    }

    #[test]
    fn empty_value_is_allowed() {
        let vars = parse_env_lines("EMPTY=").unwrap();
        assert_eq!(vars, vec![EnvPair::new("EMPTY", "")]);
    }

    #[test]
    fn blank_lines_are_skipped_anywhere() {
        let vars = parse_env_lines("\n   \nA=1\n\t\n\nB=2\n  ").unwrap();
        assert_eq!(vars, vec![EnvPair::new("A", "1"), EnvPair::new("B", "2")]);
    }

    #[test]
    fn crlf_line_endings_are_trimmed() {
        let vars = parse_env_lines("A=1\r\nB=2\r\n").unwrap();
        assert_eq!(vars, vec![EnvPair::new("A", "1"), EnvPair::new("B", "2")]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_but_inner_is_kept() {
        let vars = parse_env_lines("   KEY = spaced value  ").unwrap();
        assert_eq!(vars, vec![EnvPair::new("KEY ", " spaced value")]);
    }

    #[test]
    fn duplicates_are_all_emitted_in_order() {
        let vars = parse_env_lines("A=1\nB=x\nA=2").unwrap();
        assert_eq!(
            vars,
            vec![
                EnvPair::new("A", "1"),
                EnvPair::new("B", "x"),
                EnvPair::new("A", "2"),
            ]
        );
    }

    #[test]
    fn line_without_equals_is_rejected_verbatim() {
        let err = parse_env_lines("A=1\n  NOT A PAIR  \nB=2").unwrap_err();
        match err {
            RenderError::MalformedEnvironmentLine(line) => assert_eq!(line, "NOT A PAIR"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(parse_env_lines("").unwrap().is_empty());
        assert!(parse_env_lines("\n\n").unwrap().is_empty());
    }
}
