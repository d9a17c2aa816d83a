//! Error types for SQL parsing and dependency analysis.
//!
//! # Error Handling Strategy
//!
//! This crate distinguishes two error shapes:
//!
//! - [`ParseError`]: a SQL statement could not be parsed. `DependencyGraph::add_view`
//!   surfaces this but does not itself fail — the host decides whether to skip the
//!   offending view or abort loading.
//! - [`CoreError`]: the four user-facing failure kinds raised by the analytical
//!   services (C6-C9) and the tool dispatch contract (C10): `InvalidArgument`,
//!   `ViewNotFound`, `NoViewsFound`, and `EdgeInsertionRejected`. The last of these
//!   can never actually be constructed by this crate's graph substrate (a pair of
//!   hash maps cannot reject an edge) but the variant exists so that an
//!   implementation built on a cycle-rejecting substrate has somewhere to put the
//!   failure, per the interface this crate commits to.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
#[cfg(feature = "tracing")]
use tracing::trace;

/// Error encountered while parsing a single SQL statement.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Human-readable error message.
    pub message: String,
    /// Line/column position, if the underlying parser reported one.
    pub position: Option<Position>,
    /// The specific category of parse error.
    pub kind: ParseErrorKind,
}

/// Position information for a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
}

/// Category of parse error for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorKind {
    #[default]
    SyntaxError,
    MissingClause,
    UnexpectedEof,
    UnsupportedFeature,
    LexerError,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
            kind: ParseErrorKind::SyntaxError,
        }
    }

    pub fn with_kind(mut self, kind: ParseErrorKind) -> Self {
        self.kind = kind;
        self
    }

    /// Parses a `Line: X, Column: Y` suffix out of sqlparser's error message.
    fn parse_position_from_message(message: &str) -> Option<Position> {
        static POSITION_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = POSITION_REGEX
            .get_or_init(|| Regex::new(r"Line:\s*(\d+)\s*,\s*Column:\s*(\d+)").unwrap());

        let result = re.captures(message).and_then(|caps| {
            let line: usize = caps.get(1)?.as_str().parse().ok()?;
            let column: usize = caps.get(2)?.as_str().parse().ok()?;
            Some(Position { line, column })
        });

        #[cfg(feature = "tracing")]
        if result.is_none() && (message.contains("Line") || message.contains("Column")) {
            trace!("could not parse a position out of: {}", message);
        }

        result
    }

    fn infer_kind_from_message(message: &str) -> ParseErrorKind {
        let lower = message.to_lowercase();
        if lower.contains("unexpected end") || lower.contains("eof") {
            ParseErrorKind::UnexpectedEof
        } else if lower.contains("expected") {
            ParseErrorKind::MissingClause
        } else if lower.contains("not supported") || lower.contains("unsupported") {
            ParseErrorKind::UnsupportedFeature
        } else if lower.contains("lexer") || lower.contains("token") {
            ParseErrorKind::LexerError
        } else {
            ParseErrorKind::SyntaxError
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error")?;
        if let Some(pos) = self.position {
            write!(f, " at line {}, column {}", pos.line, pos.column)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for ParseError {}

impl From<sqlparser::parser::ParserError> for ParseError {
    fn from(err: sqlparser::parser::ParserError) -> Self {
        let message = err.to_string();
        let position = Self::parse_position_from_message(&message);
        let kind = Self::infer_kind_from_message(&message);
        Self {
            message,
            position,
            kind,
        }
    }
}

/// The four user-facing error kinds raised above the parser.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// An operation received a value outside its contract.
    #[error("invalid argument {argument}: {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// `extractSubgraph` (or any focus-centred operation) named a vertex the
    /// graph does not contain.
    #[error("view not found: {0}")]
    ViewNotFound(String),

    /// A warehouse query for `{catalog}.{schema}` returned zero view rows.
    #[error("no views found in {catalog}.{schema}")]
    NoViewsFound { catalog: String, schema: String },

    /// The underlying graph substrate refused to insert an edge. This crate's
    /// adjacency-map substrate never raises this; it exists for substrates
    /// that reject edges (e.g. a DAG-only implementation) and is always
    /// swallowed by `DependencyGraph::add_view`, never propagated.
    #[error("edge insertion rejected: {from} -> {to}")]
    EdgeInsertionRejected { from: String, to: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_position_from_sqlparser_style_message() {
        let msg = "Expected SELECT, found 'INSERT' at Line: 1, Column: 5";
        let pos = ParseError::parse_position_from_message(msg);
        assert_eq!(pos, Some(Position { line: 1, column: 5 }));
    }

    #[test]
    fn returns_none_without_position() {
        let pos = ParseError::parse_position_from_message("Unexpected token");
        assert_eq!(pos, None);
    }

    #[test]
    fn infers_unsupported_feature_kind() {
        let kind = ParseError::infer_kind_from_message("Feature not supported");
        assert_eq!(kind, ParseErrorKind::UnsupportedFeature);
    }

    #[test]
    fn infers_unexpected_eof_kind() {
        let kind = ParseError::infer_kind_from_message("Unexpected end of input");
        assert_eq!(kind, ParseErrorKind::UnexpectedEof);
    }

    #[test]
    fn display_includes_position() {
        let err = ParseError::new("bad token");
        let err = ParseError {
            position: Some(Position { line: 2, column: 9 }),
            ..err
        };
        assert_eq!(err.to_string(), "parse error at line 2, column 9: bad token");
    }

    #[test]
    fn core_error_messages_are_readable() {
        let err = CoreError::ViewNotFound("reporting.daily_summary".into());
        assert_eq!(err.to_string(), "view not found: reporting.daily_summary");

        let err = CoreError::InvalidArgument {
            argument: "strategy".into(),
            reason: "unknown value 'bogus'".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid argument strategy: unknown value 'bogus'"
        );
    }
}
