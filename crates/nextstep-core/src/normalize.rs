//! Query and catalog text normalization.
//!
//! Policy: NFKD, drop combining marks, lowercase, fold `đ` to `d`, replace
//! anything that is not alphanumeric with a space, collapse whitespace.
//! Applied identically to catalog text at load time and to queries.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[must_use]
pub fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_space = false;
    for c in input.nfkd().filter(|c| !is_combining_mark(*c)).flat_map(char::to_lowercase) {
        let c = if c == 'đ' { 'd' } else { c };
        if c.is_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }
    out
}

/// Splits already-normalized text into terms.
pub fn terms(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split(' ').filter(|t| !t.is_empty())
}

/// True for scripts written without spaces between words, where terms are
/// matched by containment rather than equality.
pub fn is_unspaced_script(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{AC00}'..='\u{D7AF}')
}
