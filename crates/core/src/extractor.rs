use crate::error::LoaderError;
use lopdf::Document;
use std::path::Path;
use tracing::warn;

pub trait PdfExtractor {
    /// Returns the text of every page, each followed by a newline.
    fn extract_text(&self, path: &Path) -> Result<String, LoaderError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl PdfExtractor for LopdfExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, LoaderError> {
        let document =
            Document::load(path).map_err(|error| LoaderError::PdfParse(error.to_string()))?;

        let mut text = String::new();
        for page_no in document.get_pages().into_keys() {
            let page_text = document
                .extract_text(&[page_no])
                .map_err(|error| LoaderError::PdfParse(error.to_string()))?;
            text.push_str(&page_text);
            text.push('\n');
        }

        Ok(text)
    }
}

/// Extracts text, degrading every failure to an empty string.
pub fn extract_text_best_effort<E>(extractor: &E, path: &Path) -> String
where
    E: PdfExtractor + ?Sized,
{
    match extractor.extract_text(path) {
        Ok(text) => text,
        Err(error) => {
            warn!(path = %path.display(), %error, "error reading pdf");
            String::new()
        }
    }
}
