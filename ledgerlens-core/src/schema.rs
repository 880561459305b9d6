//! Schema normalizer: maps arbitrary column names onto the canonical four fields.
//!
//! Matching is a fixed-priority rule list (`COLUMN_RULES`) evaluated top to
//! bottom per column; the first rule with a matching substring decides the
//! column's field. When several columns land on the same field, the later
//! column wins.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::transaction::{Field, InputKind, Transaction, TransactionSet};

/// One (substring predicate, target field) rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRule {
    pub target: Field,
    pub needles: &'static [&'static str],
}

impl ColumnRule {
    /// `column` must already be lower-cased.
    pub fn matches(&self, column: &str) -> bool {
        self.needles.iter().any(|n| column.contains(n))
    }
}

/// Priority order: date, description, amount, category.
pub const COLUMN_RULES: &[ColumnRule] = &[
    ColumnRule { target: Field::Date, needles: &["date"] },
    ColumnRule { target: Field::Description, needles: &["desc", "merchant", "detail"] },
    ColumnRule { target: Field::Amount, needles: &["amount", "amt", "value"] },
    ColumnRule { target: Field::Category, needles: &["category", "type"] },
];

/// Case-insensitive: first rule whose needle occurs in `name`.
pub fn classify_column(name: &str, rules: &[ColumnRule]) -> Option<Field> {
    let lowered = name.to_lowercase();
    rules.iter().find(|r| r.matches(&lowered)).map(|r| r.target)
}

/// Trim and lower-case a header cell, dropping a leading byte-order mark.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_lowercase()
}

/// Canonical field → source column index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: BTreeMap<Field, usize>,
}

impl ColumnMapping {
    pub fn get(&self, field: Field) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn contains(&self, field: Field) -> bool {
        self.columns.contains_key(&field)
    }
}

pub fn map_columns<S: AsRef<str>>(headers: &[S], rules: &[ColumnRule]) -> ColumnMapping {
    let mut mapping = ColumnMapping::default();
    for (idx, header) in headers.iter().enumerate() {
        if let Some(field) = classify_column(header.as_ref(), rules) {
            mapping.columns.insert(field, idx);
        }
    }
    mapping
}

/// Numeric coercion for amount cells: anything unparseable becomes `0.0`.
pub fn coerce_amount(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// A header row plus string cells, as read from a table-like source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn normalized_headers(&self) -> Vec<String> {
        self.headers.iter().map(|h| normalize_header(h)).collect()
    }

    /// True when any header would map onto the amount field.
    pub fn has_amount_column(&self) -> bool {
        self.normalized_headers()
            .iter()
            .any(|h| amount_rule().is_some_and(|r| r.matches(h)))
    }
}

fn amount_rule() -> Option<&'static ColumnRule> {
    COLUMN_RULES.iter().find(|r| r.target == Field::Amount)
}

/// Reduce a raw table to the canonical schema.
pub fn normalize(table: &RawTable, kind: InputKind) -> Result<TransactionSet> {
    let headers = table.normalized_headers();
    let mapping = map_columns(&headers, COLUMN_RULES);

    if !mapping.contains(Field::Amount) {
        return Err(Error::MissingRequiredColumn { kind, columns: headers });
    }

    let rows = table
        .rows
        .iter()
        .map(|row| normalize_row(row, &mapping))
        .collect();

    TransactionSet::from_rows(rows, kind)
}

fn normalize_row(row: &[String], mapping: &ColumnMapping) -> Transaction {
    let cell = |field: Field| -> Option<&str> {
        mapping
            .get(field)
            .and_then(|idx| row.get(idx))
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    };

    // Generic fallback pass over the optional fields.
    let text = |field: Field| -> String {
        cell(field)
            .or_else(|| field.default_value())
            .unwrap_or_default()
            .to_string()
    };

    Transaction {
        date: text(Field::Date),
        description: text(Field::Description),
        amount: cell(Field::Amount).map(coerce_amount).unwrap_or(0.0),
        category: text(Field::Category),
    }
}
