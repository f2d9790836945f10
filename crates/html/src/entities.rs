//! Entity decoding for parsed markup and escaping for serialized markup.

const NAMED: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&apos;", '\''),
    ("&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// Decode the small entity subset the widget can encounter.
///
/// Named entities: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`. Numeric entities are
/// decoded only when well-formed, semicolon-terminated and a valid Unicode scalar. Anything else
/// passes through unchanged.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let (decoded, consumed) = decode_one(rest);
        match decoded {
            Some(ch) => out.push(ch),
            None => out.push_str(&rest[..consumed]),
        }
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    out
}

/// Decode the entity at the start of `s` (which starts with `&`). Returns the decoded char, if
/// any, and the number of bytes consumed.
fn decode_one(s: &str) -> (Option<char>, usize) {
    for (name, ch) in NAMED {
        if s.starts_with(name) {
            return (Some(*ch), name.len());
        }
    }
    let bytes = s.as_bytes();
    let (digits_start, radix, max_digits) = match (bytes.get(1), bytes.get(2)) {
        (Some(b'#'), Some(b'x' | b'X')) => (3, 16, MAX_HEX_DIGITS),
        (Some(b'#'), _) => (2, 10, MAX_DEC_DIGITS),
        _ => return (None, 1),
    };
    let digits = bytes[digits_start..]
        .iter()
        .take_while(|b| {
            if radix == 16 {
                b.is_ascii_hexdigit()
            } else {
                b.is_ascii_digit()
            }
        })
        .count();
    let end = digits_start + digits;
    if digits == 0 || digits > max_digits || bytes.get(end) != Some(&b';') {
        // Malformed: keep the `&` and let the rest flow through as text.
        return (None, 1);
    }
    let decoded = u32::from_str_radix(&s[digits_start..end], radix)
        .ok()
        .and_then(char::from_u32);
    match decoded {
        Some(ch) => (Some(ch), end + 1),
        None => (None, end + 1),
    }
}

/// Escape text content for serialization.
pub fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

/// Escape a double-quoted attribute value for serialization.
pub fn escape_attribute(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            _ => out.push(ch),
        }
    }
}
