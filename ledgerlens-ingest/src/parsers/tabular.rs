//! Delimited (CSV) extractor
//!
//! Any header layout works as long as one column looks like an amount:
//!   Txn Date,Merchant,Amt,Type
//!   2024-01-03,Corner Cafe,-4.50,Food

use csv::ReaderBuilder;
use tracing::{debug, info};

use ledgerlens_core::{InputKind, RawTable, Result, TransactionSet, normalize};

use crate::types::Extractor;

pub struct TabularExtractor;

impl TabularExtractor {
    /// Read one table: first record is the header row.
    pub fn read_table(&self, bytes: &[u8]) -> Result<RawTable> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        debug!(columns = ?headers, rows = rows.len(), "read delimited table");
        Ok(RawTable::new(headers, rows))
    }
}

impl Extractor for TabularExtractor {
    type Input = [u8];

    const KIND: InputKind = InputKind::Tabular;

    fn extract(&self, input: &[u8]) -> Result<TransactionSet> {
        let table = self.read_table(input)?;
        let set = normalize(&table, Self::KIND)?;
        info!(count = set.len(), "extracted transactions from CSV");
        Ok(set)
    }
}
