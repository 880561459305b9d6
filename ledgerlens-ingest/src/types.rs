use std::fs;
use std::path::Path;

use ledgerlens_core::{Error, InputKind, Result, TransactionSet};

use crate::document::pdf_text;
use crate::parsers::{
    NaturalLanguageExtractor, SpreadsheetExtractor, StatementTextExtractor, TabularExtractor,
};

/// One extractor per input format, all producing a canonical `TransactionSet`.
///
/// Extraction is all-or-nothing: a bad row is skipped, but an input that
/// yields no rows fails as a whole.
pub trait Extractor {
    type Input: ?Sized;

    const KIND: InputKind;

    fn extract(&self, input: &Self::Input) -> Result<TransactionSet>;
}

/// A single user-submitted input
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    /// Delimited table bytes (CSV)
    Delimited(Vec<u8>),
    /// Multi-sheet workbook bytes (xlsx/xls/ods)
    Workbook(Vec<u8>),
    /// Text already extracted from a document such as a PDF statement
    DocumentText(String),
    /// Free-form sentences
    FreeText(String),
}

impl Source {
    pub fn kind(&self) -> InputKind {
        match self {
            Source::Delimited(_) => InputKind::Tabular,
            Source::Workbook(_) => InputKind::Spreadsheet,
            Source::DocumentText(_) => InputKind::Document,
            Source::FreeText(_) => InputKind::FreeText,
        }
    }

    /// Read a file and pick the source variant from its extension.
    ///
    /// PDF files are converted to text here; `.txt` files are treated as free text.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(Source::Delimited(fs::read(path)?)),
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Source::Workbook(fs::read(path)?)),
            "pdf" => Ok(Source::DocumentText(pdf_text(&fs::read(path)?)?)),
            "txt" => Ok(Source::FreeText(fs::read_to_string(path)?)),
            other => Err(Error::UnsupportedInput(format!(
                "file type '{other}' for {}",
                path.display()
            ))),
        }
    }
}

/// Run the extractor that matches the source.
pub fn extract(source: &Source) -> Result<TransactionSet> {
    match source {
        Source::Delimited(bytes) => TabularExtractor.extract(bytes.as_slice()),
        Source::Workbook(bytes) => SpreadsheetExtractor.extract(bytes.as_slice()),
        Source::DocumentText(text) => StatementTextExtractor.extract(text.as_str()),
        Source::FreeText(text) => NaturalLanguageExtractor.extract(text.as_str()),
    }
}
