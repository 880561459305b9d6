//! Extractor for text pulled out of statement documents (PDF or similar)
//!
//! Works line by line and assumes the trailing number on a line is its amount:
//!   03/14  GROCERY MART #12            -54.20
//!   03/15  PAYROLL ACME INC          2,500.00
//! Date and category are never inferred here.

use tracing::{debug, info};

use ledgerlens_core::{Error, InputKind, Result, Transaction, TransactionSet};

use crate::scan::AmountScanner;
use crate::types::Extractor;

/// Characters that end a line in extracted document text. PDF extraction
/// leaves form feeds between pages and the odd Unicode separator.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split on every line boundary, counting "\r\n" as one.
fn statement_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(LINE_BREAKS))
}

pub struct StatementTextExtractor;

impl Extractor for StatementTextExtractor {
    type Input = str;

    const KIND: InputKind = InputKind::Document;

    fn extract(&self, text: &str) -> Result<TransactionSet> {
        if text.trim().is_empty() {
            return Err(Error::UnextractableDocument);
        }

        let scanner = AmountScanner::new()?;
        let mut out = Vec::new();

        for (lineno, line) in statement_lines(text).enumerate() {
            let Some(found) = scanner.last_amount(line) else {
                continue;
            };
            debug!(line = lineno + 1, token = %found.token, "statement row");
            out.push(Transaction::undated(found.remainder, found.value));
        }

        let set = TransactionSet::from_rows(out, Self::KIND)?;
        info!(count = set.len(), "extracted transactions from document text");
        Ok(set)
    }
}
