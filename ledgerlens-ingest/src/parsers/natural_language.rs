//! Extractor for free-form spending sentences such as
//! "I spent $120 on flight tickets and $80 on hotel."

use tracing::info;

use ledgerlens_core::{InputKind, Result, Transaction, TransactionSet};

use crate::scan::PhraseScanner;
use crate::types::Extractor;

pub struct NaturalLanguageExtractor;

impl Extractor for NaturalLanguageExtractor {
    type Input = str;

    const KIND: InputKind = InputKind::FreeText;

    fn extract(&self, text: &str) -> Result<TransactionSet> {
        let scanner = PhraseScanner::new()?;
        let rows = scanner
            .scan(text.trim())
            .into_iter()
            .map(|p| Transaction::undated(p.description, p.amount))
            .collect();

        let set = TransactionSet::from_rows(rows, Self::KIND)?;
        info!(count = set.len(), "extracted transactions from free text");
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerlens_core::Error;

    #[test]
    fn test_two_purchases() {
        let set = NaturalLanguageExtractor
            .extract("I spent $120 on flight tickets and $80 on hotel.")
            .unwrap();
        assert_eq!(set.len(), 2);

        let [first, second] = set.as_slice() else {
            panic!("expected two rows");
        };
        assert_eq!(first.amount, 120.0);
        assert!(first.description.contains("flight tickets"));
        assert_eq!(second.amount, 80.0);
        assert!(second.description.contains("hotel"));
        for t in set.iter() {
            assert_eq!(t.date, "Unknown");
            assert_eq!(t.category, "Uncategorized");
        }
    }

    #[test]
    fn test_empty_text() {
        let err = NaturalLanguageExtractor.extract("   ").unwrap_err();
        assert!(matches!(err, Error::NoTransactionsDetected { kind: InputKind::FreeText }));
    }

    #[test]
    fn test_no_match_message_has_example() {
        let err = NaturalLanguageExtractor.extract("bought some stuff").unwrap_err();
        assert!(err.to_string().contains("I spent $20 on coffee."));
    }

    #[test]
    fn test_idempotent() {
        let text = "$4.50 for coffee, $60 on groceries";
        assert_eq!(
            NaturalLanguageExtractor.extract(text).unwrap(),
            NaturalLanguageExtractor.extract(text).unwrap()
        );
    }
}
