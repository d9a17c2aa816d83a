//! SQL parser wrapper (C1).
//!
//! Wraps `sqlparser` behind a single-statement contract: `parse_statement`
//! accepts exactly one SQL statement's text and either returns its AST or a
//! [`ParseError`]. The corpus has no dedicated Trino dialect, so
//! [`Dialect::Trino`] is served by `GenericDialect`, the same dialect the
//! rest of this crate treats as its working approximation of an ANSI-ish
//! warehouse SQL surface.

use crate::error::ParseError;
use sqlparser::ast::{Ident, Statement};
use sqlparser::dialect::{Dialect as SqlDialect, GenericDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;

/// SQL dialect used for parsing. `Trino` is the default and the only
/// dialect this crate's warehouse-loading path produces; `Generic` and
/// `Postgres` remain available for callers analyzing non-Trino SQL or
/// feeding in DDL captured from a Postgres-flavoured source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Trino,
    Generic,
    Postgres,
}

impl Dialect {
    fn to_sqlparser_dialect(self) -> Box<dyn SqlDialect> {
        match self {
            Dialect::Trino | Dialect::Generic => Box::new(GenericDialect {}),
            Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        }
    }
}

/// Parses `sql` as a single statement under the Trino-approximating
/// [`GenericDialect`]. See [`parse_statement_with_dialect`] to select a
/// different dialect.
pub fn parse_statement(sql: &str) -> Result<Statement, ParseError> {
    parse_statement_with_dialect(sql, Dialect::Trino)
}

/// Parses `sql` as a single statement under `dialect`.
///
/// Fails if `sql` is empty, syntactically invalid, or contains more than
/// one statement — the contract (spec-mandated) is one statement per call.
pub fn parse_statement_with_dialect(sql: &str, dialect: Dialect) -> Result<Statement, ParseError> {
    if sql.trim().is_empty() {
        return Err(ParseError::new("empty statement"));
    }

    let sqlparser_dialect = dialect.to_sqlparser_dialect();
    let statements = Parser::parse_sql(sqlparser_dialect.as_ref(), sql)?;

    match statements.len() {
        0 => Err(ParseError::new("no statement produced by parser")),
        1 => Ok(statements.into_iter().next().unwrap()),
        n => Err(ParseError::new(format!(
            "expected exactly one statement, found {n}"
        ))),
    }
}

/// Lower-cases `ident`'s value when it is unquoted, leaving quoted
/// identifiers untouched. Trino (like most warehouses) folds unquoted
/// identifiers to lower case; `sqlparser` preserves source case verbatim,
/// so this normalization step belongs to the wrapper, not the grammar.
pub fn normalize_ident(ident: &Ident) -> String {
    if ident.quote_style.is_none() {
        ident.value.to_lowercase()
    } else {
        ident.value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_select() {
        let stmt = parse_statement("SELECT * FROM orders");
        assert!(stmt.is_ok());
    }

    #[test]
    fn rejects_empty_statement() {
        assert!(parse_statement("").is_err());
        assert!(parse_statement("   ").is_err());
    }

    #[test]
    fn rejects_syntactically_invalid_sql() {
        assert!(parse_statement("SELECT * FROM").is_err());
    }

    #[test]
    fn rejects_multiple_statements() {
        let result = parse_statement("SELECT 1; SELECT 2;");
        assert!(result.is_err());
    }

    #[test]
    fn parses_cte() {
        let sql = r#"
            WITH active_users AS (SELECT * FROM users WHERE active)
            SELECT * FROM active_users
        "#;
        assert!(parse_statement(sql).is_ok());
    }

    #[test]
    fn normalizes_unquoted_identifier_case() {
        let ident = Ident::new("Users");
        assert_eq!(normalize_ident(&ident), "users");
    }

    #[test]
    fn preserves_quoted_identifier_case() {
        let ident = Ident::with_quote('"', "Users");
        assert_eq!(normalize_ident(&ident), "Users");
    }
}
