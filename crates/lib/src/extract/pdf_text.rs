//! PDF text extraction using the `pdf` crate.

use super::ExtractError;
use pdf::{
    content::{Op, TextDrawAdjusted},
    file::FileOptions,
};
use tracing::warn;

/// Extracts the text drawn on every page, one line per page.
///
/// CPU-bound; call it from a blocking context.
pub(crate) fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    let file = FileOptions::cached()
        .load(data)
        .map_err(|e| ExtractError::Parse(e.to_string()))?;
    let resolver = file.resolver();

    let mut pages = Vec::new();
    for page_num in 0..file.num_pages() {
        let page = file
            .get_page(page_num)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;

        let Some(content) = &page.contents else {
            warn!("Page {} has no content stream.", page_num);
            pages.push(String::new());
            continue;
        };

        let operations = content
            .operations(&resolver)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;

        let mut page_text = String::new();
        for op in operations.iter() {
            match op {
                Op::TextDraw { text } => page_text.push_str(&text.to_string_lossy()),
                Op::TextDrawAdjusted { array } => {
                    for item in array.iter() {
                        if let TextDrawAdjusted::Text(text) = item {
                            page_text.push_str(&text.to_string_lossy());
                        }
                    }
                }
                Op::TextNewline | Op::MoveTextPosition { .. } => page_text.push(' '),
                _ => {}
            }
        }
        pages.push(page_text);
    }

    Ok(pages.join("\n"))
}
