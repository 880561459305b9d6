//! Text extraction from PDF statements.

use tracing::debug;

use ledgerlens_core::{Error, Result};

/// Pull all text out of a PDF. Fails when the document yields no text at all
/// (scanned images, encrypted or corrupt files).
pub fn pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
        debug!(error = ?e, "pdf text extraction failed");
        Error::UnextractableDocument
    })?;

    if text.trim().is_empty() {
        return Err(Error::UnextractableDocument);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_pdf() {
        let err = pdf_text(b"plain bytes, no pdf header").unwrap_err();
        assert!(matches!(err, Error::UnextractableDocument));
    }
}
