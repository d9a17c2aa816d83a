//! Fuzz target for the SQL parser.
//!
//! Checks that `parse_statement_with_dialect()` never panics on arbitrary
//! input, only ever returning `Ok`/`Err`.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use viewmapper_core::{parse_statement_with_dialect, Dialect};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    sql: String,
    dialect_idx: u8,
}

impl FuzzInput {
    fn dialect(&self) -> Dialect {
        match self.dialect_idx % 3 {
            0 => Dialect::Trino,
            1 => Dialect::Generic,
            _ => Dialect::Postgres,
        }
    }
}

fuzz_target!(|input: FuzzInput| {
    let dialect = input.dialect();
    let _result = parse_statement_with_dialect(&input.sql, dialect);
});
