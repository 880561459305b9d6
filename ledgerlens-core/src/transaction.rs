//! Canonical transaction types shared by every extractor and the metrics engine

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

pub const UNKNOWN: &str = "Unknown";
pub const UNCATEGORIZED: &str = "Uncategorized";

/// The four canonical fields, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Date,
    Description,
    Amount,
    Category,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Date, Field::Description, Field::Amount, Field::Category];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Date => "date",
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Category => "category",
        }
    }

    /// Value synthesized when the source has no (or a blank) value for this field.
    ///
    /// `Amount` has no default: a missing amount column is fatal.
    pub fn default_value(&self) -> Option<&'static str> {
        match self {
            Field::Date | Field::Description => Some(UNKNOWN),
            Field::Category => Some(UNCATEGORIZED),
            Field::Amount => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which kind of input a transaction set was extracted from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    Tabular,
    Spreadsheet,
    Document,
    FreeText,
}

impl InputKind {
    /// Example input shown to the user when nothing could be extracted.
    pub fn example(&self) -> &'static str {
        match self {
            InputKind::Tabular | InputKind::Spreadsheet => {
                "a header row such as 'Date,Description,Amount,Category' followed by one row per transaction"
            }
            InputKind::Document => "statement lines such as 'GROCERY MART #12   -54.20'",
            InputKind::FreeText => "'I spent $20 on coffee.'",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InputKind::Tabular => "CSV",
            InputKind::Spreadsheet => "spreadsheet",
            InputKind::Document => "document",
            InputKind::FreeText => "text",
        };
        f.write_str(s)
    }
}

/// One canonical income/expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Caller-supplied date text, or "Unknown"
    pub date: String,
    pub description: String,
    /// Positive = income/credit, negative = expense/debit
    pub amount: f64,
    pub category: String,
}

impl Transaction {
    /// A row from a source that carries neither date nor category.
    pub fn undated(description: impl Into<String>, amount: f64) -> Self {
        let description = description.into();
        Self {
            date: UNKNOWN.to_string(),
            description: if description.trim().is_empty() {
                UNKNOWN.to_string()
            } else {
                description
            },
            amount,
            category: UNCATEGORIZED.to_string(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

/// Ordered, non-empty, read-only sequence of transactions in extraction order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TransactionSet {
    rows: Vec<Transaction>,
}

impl TransactionSet {
    /// Wrap extracted rows. An empty extraction is a failure, never an empty set.
    pub fn from_rows(rows: Vec<Transaction>, kind: InputKind) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::NoTransactionsDetected { kind });
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.rows.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.rows.iter().map(|t| t.amount).collect()
    }

    pub fn into_inner(self) -> Vec<Transaction> {
        self.rows
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
