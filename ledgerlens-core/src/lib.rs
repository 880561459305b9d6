//! ledgerlens-core: canonical transaction schema, column normalization and error types

pub mod dates;
pub mod error;
pub mod schema;
pub mod transaction;

pub use dates::{YearMonth, parse_calendar_date};
pub use error::{Error, Result};
pub use schema::{
    COLUMN_RULES, ColumnMapping, ColumnRule, RawTable, classify_column, coerce_amount, map_columns,
    normalize, normalize_header,
};
pub use transaction::{Field, InputKind, Transaction, TransactionSet};
