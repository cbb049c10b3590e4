const ELLIPSIS: char = '…';

/// First `max_chars` characters of `text`, marked with `…` when cut.
///
/// Counts characters, not bytes, so multi-byte bodies never split a code point.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&text[..cut]);
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}
