/// Normalize raw OCR text before pattern extraction.
/// Every non-ASCII character becomes a space, every whitespace run collapses to a
/// single space, and the result is trimmed. Total and idempotent.
pub fn normalize_ocr_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_space = false;

    for c in raw.chars() {
        if !c.is_ascii() || is_ocr_whitespace(c) {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

/// ASCII whitespace, including vertical tab and the 0x1C-0x1F separators.
fn is_ocr_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1f')
}
