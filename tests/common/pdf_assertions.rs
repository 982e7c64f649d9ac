use lopdf::Document as LopdfDocument;

/// Extract all text content from a PDF document
pub fn extract_text(doc: &LopdfDocument) -> String {
    let mut text = String::new();
    let pages = doc.get_pages();
    for page_num in 1..=pages.len() {
        if let Ok(page_text) = doc.extract_text(&[page_num as u32]) {
            text.push_str(&page_text);
            text.push('\n');
        }
    }
    text
}

/// Targets of every URI link annotation, in page order.
pub fn link_uris(doc: &LopdfDocument) -> Vec<String> {
    let mut uris = Vec::new();
    for (_page_num, page_id) in doc.get_pages() {
        let Ok(page) = doc.get_dictionary(page_id) else {
            continue;
        };
        let Ok(annots) = page.get(b"Annots").and_then(|a| a.as_array()) else {
            continue;
        };
        for annot in annots {
            let dict = match annot.as_reference() {
                Ok(id) => doc.get_dictionary(id).ok(),
                Err(_) => annot.as_dict().ok(),
            };
            if let Some(dict) = dict
                && let Ok(action) = dict.get(b"A").and_then(|a| a.as_dict())
                && let Ok(uri) = action.get(b"URI").and_then(|u| u.as_str())
            {
                uris.push(String::from_utf8_lossy(uri).into_owned());
            }
        }
    }
    uris
}

/// Whether the raw file references the named standard font.
pub fn references_font(bytes: &[u8], base_font: &str) -> bool {
    let needle = format!("/BaseFont /{base_font} ");
    bytes.windows(needle.len()).any(|w| w == needle.as_bytes())
}
