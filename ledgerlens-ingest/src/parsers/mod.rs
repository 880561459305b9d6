pub mod natural_language;
pub mod spreadsheet;
pub mod statement_text;
pub mod tabular;

pub use natural_language::NaturalLanguageExtractor;
pub use spreadsheet::SpreadsheetExtractor;
pub use statement_text::StatementTextExtractor;
pub use tabular::TabularExtractor;
