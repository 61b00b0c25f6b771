//! Line-level primitives of the RML text format.

/// Escapes a value so it fits on one line.
///
/// `\` becomes `\\`, LF becomes `\n` and CR becomes `\r`.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Reverses [`escape`]. Unknown escape sequences are kept verbatim.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Renders a `key: value` line, or `key:` when the value is empty.
pub fn field(key: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{}:", key)
    } else {
        format!("{}: {}", key, escape(value))
    }
}

/// One classified input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Header(&'a str),
    /// Key and still-escaped raw value
    Field(&'a str, &'a str),
    Unrecognized,
}

/// Classifies a raw line. Only one space after the colon is consumed so that
/// leading whitespace inside a value survives.
pub fn classify(raw: &str) -> Line<'_> {
    let line = raw.strip_suffix('\r').unwrap_or(raw);
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with('#') {
        return Line::Comment;
    }
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return Line::Header(&trimmed[1..trimmed.len() - 1]);
    }

    let line = line.trim_start();
    match line.split_once(':') {
        Some((key, rest)) if !key.trim().is_empty() && !key.contains(char::is_whitespace) => {
            let value = rest.strip_prefix(' ').unwrap_or(rest);
            Line::Field(key, value)
        }
        _ => Line::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_roundtrip_special_characters() {
        let original = "line one\nline two\r\nC:\\path\\n literal";
        let escaped = escape(original);
        assert!(!escaped.contains('\n'));
        assert_eq!(unescape(&escaped), original);
    }

    #[test]
    fn test_unescape_keeps_unknown_sequences() {
        assert_eq!(unescape("a\\tb\\"), "a\\tb\\");
    }

    #[test]
    fn test_field_rendering() {
        assert_eq!(field("name", ""), "name:");
        assert_eq!(field("name", "Ada"), "name: Ada");
    }

    #[test]
    fn test_classify_lines() {
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("   \r"), Line::Blank);
        assert_eq!(classify("# comment"), Line::Comment);
        assert_eq!(classify("[STEP 1: BASE]"), Line::Header("STEP 1: BASE"));
        assert_eq!(classify("name: Ada: the first"), Line::Field("name", "Ada: the first"));
        assert_eq!(classify("greeting:  two spaces"), Line::Field("greeting", " two spaces"));
        assert_eq!(classify("tag:\r"), Line::Field("tag", ""));
        assert_eq!(classify("just some prose"), Line::Unrecognized);
        assert_eq!(classify("two words: x"), Line::Unrecognized);
    }
}
