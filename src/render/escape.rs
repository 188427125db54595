//! HTML escaping.

/// Escape text for use in element content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a value for use inside a double-quoted attribute.
pub fn escape_attr(value: &str) -> String {
    escape_html(value)
}

/// Strip markup tags, leaving only text (for `<title>` and logs).
///
/// A `<` opens a tag only when a letter, `/` or `!` follows it, so a bare
/// comparison like `a < b` is kept as text.
pub fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    let mut chars = fragment.chars().peekable();
    while let Some(c) = chars.next() {
        if in_tag {
            if c == '>' {
                in_tag = false;
            }
            continue;
        }
        let opens_tag = c == '<'
            && matches!(chars.peek(), Some(&next) if next.is_ascii_alphabetic() || next == '/' || next == '!');
        if opens_tag {
            in_tag = true;
        } else {
            out.push(c);
        }
    }
    out
}
