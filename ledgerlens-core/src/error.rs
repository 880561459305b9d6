//! Error types for ledgerlens

use thiserror::Error;

use crate::transaction::InputKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{} input must contain an amount column (found columns: {})", .kind, .columns.join(", "))]
    MissingRequiredColumn { kind: InputKind, columns: Vec<String> },

    #[error("No valid sheet with an amount column found in workbook")]
    NoValidSheet,

    #[error("No transactions detected in {kind}. Example: {}", .kind.example())]
    NoTransactionsDetected { kind: InputKind },

    #[error("Unable to extract text from document")]
    UnextractableDocument,

    #[error("Unsupported input: {0}")]
    UnsupportedInput(String),

    #[error("Advisory request failed: {0}")]
    UpstreamAdvisory(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Whether the failure belongs to the advisory feature only.
    ///
    /// Metrics computed before an advisory failure stay valid.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Error::UpstreamAdvisory(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_lists_columns() {
        let err = Error::MissingRequiredColumn {
            kind: InputKind::Tabular,
            columns: vec!["date".into(), "memo".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("amount column"));
        assert!(msg.contains("date, memo"));
    }

    #[test]
    fn test_no_transactions_includes_example() {
        let err = Error::NoTransactionsDetected { kind: InputKind::FreeText };
        let msg = err.to_string();
        assert!(msg.contains("I spent $20 on coffee."), "{msg}");
    }

    #[test]
    fn test_only_upstream_is_advisory() {
        assert!(Error::UpstreamAdvisory("timeout".into()).is_advisory());
        assert!(!Error::NoValidSheet.is_advisory());
        assert!(!Error::UnextractableDocument.is_advisory());
        assert!(!Error::UnsupportedInput("docx".into()).is_advisory());
    }
}
