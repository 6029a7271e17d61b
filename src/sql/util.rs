//! # Lexical Helpers
//!
//! Small string utilities shared by the statement parsers: case-insensitive
//! prefix and substring matching, quote-aware comma splitting, symmetric
//! quote stripping, and byte-bounded truncation.
//!
//! The dialect is scanned, not tokenized: handlers find keywords by
//! case-insensitive search and split argument lists on top-level commas,
//! treating single- or double-quoted runs as atoms.

/// True when `s` starts with `prefix`, ignoring ASCII case.
pub fn starts_with_ci(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// Byte offset of the first case-insensitive occurrence of `needle`.
pub fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    let hay = haystack.as_bytes();
    let ned = needle.as_bytes();
    hay.len()
        .checked_sub(ned.len())
        .and_then(|last| (0..=last).find(|&i| hay[i..i + ned.len()].eq_ignore_ascii_case(ned)))
}

/// Splits on commas at the top level; commas inside single- or
/// double-quoted runs do not split. Pieces are returned untrimmed.
pub fn split_commas(s: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut quote: Option<u8> = None;

    for (i, &b) in s.as_bytes().iter().enumerate() {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'\'' | b'"' => quote = Some(b),
                b',' => {
                    pieces.push(&s[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    pieces.push(&s[start..]);
    pieces
}

/// True when the (trimmed) literal is wrapped in matching quotes.
pub fn is_quoted(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 2 && (b[0] == b'\'' || b[0] == b'"') && b[b.len() - 1] == b[0]
}

/// Strips one layer of quotes, but only when both ends carry the same
/// quote character.
pub fn unquote(s: &str) -> &str {
    if is_quoted(s) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Splits off a leading name token, stopping at whitespace or `(`.
/// Returns the token and the remainder (not trimmed).
pub fn take_name(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| c.is_whitespace() || c == '(')
        .unwrap_or(s.len());
    (&s[..end], &s[end..])
}

/// Truncates to at most `max` bytes at a char boundary.
pub fn truncate_bytes(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
