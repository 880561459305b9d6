//! ledgerlens-ingest: format extractors (CSV, spreadsheet, document text, free text)
//! producing canonical transaction sets.

pub mod document;
pub mod parsers;
pub mod scan;
pub mod types;

pub use parsers::natural_language::NaturalLanguageExtractor;
pub use parsers::spreadsheet::{Sheet, SpreadsheetExtractor, Workbook, load_workbook};
pub use parsers::statement_text::StatementTextExtractor;
pub use parsers::tabular::TabularExtractor;
pub use types::{Extractor, Source, extract};
