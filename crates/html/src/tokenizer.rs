//! Small HTML tokenizer for widget markup.
//!
//! Supported tag-name characters (ASCII only): `[A-Za-z0-9:_-]`, and a tag name must start with
//! an ASCII letter. Attribute names use the same ASCII character class.
//!
//! A `<` that does not open a tag, end tag, comment or doctype is plain text, so user input such
//! as `a < b` survives tokenization unchanged.
//!
//! Known limitations (intentional):
//! - Not a full HTML5 tokenizer/state machine (no parse-error recovery).
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>` (see
//!   `find_rawtext_close_tag`).
use crate::entities::decode_entities;
use crate::types::{Attribute, Token, TokenStream};
use memchr::memchr;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

/// Returns `true` if the `<` at `i` starts a tag, end tag, comment or doctype.
pub(crate) fn opens_markup(bytes: &[u8], i: usize) -> bool {
    if bytes.get(i) != Some(&b'<') {
        return false;
    }
    match bytes.get(i + 1) {
        Some(b) if b.is_ascii_alphabetic() || *b == b'!' => true,
        Some(b'/') => bytes.get(i + 2).is_some_and(|b| b.is_ascii_alphabetic()),
        _ => false,
    }
}

/// Scan from an opening `<` to one past the `>` that closes the tag, honoring quoted
/// attribute values. Returns `bytes.len()` for an unterminated tag.
pub(crate) fn tag_end(bytes: &[u8], start: usize) -> usize {
    let mut quote: Option<u8> = None;
    let mut k = start + 1;
    while k < bytes.len() {
        let b = bytes[k];
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b'>' => return k + 1,
            None => {}
        }
        k += 1;
    }
    bytes.len()
}

// it only attempts matches starting at ASCII <
// < cannot appear in UTF-8 continuation bytes
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let hay_bytes = haystack.as_bytes();
    let len = hay_bytes.len();
    let n = close_tag.len();
    debug_assert!(n >= 2);
    debug_assert!(close_tag[0] == b'<' && close_tag[1] == b'/');
    if len < n {
        return None;
    }
    let mut i = 0;
    while i + n <= len {
        let rel = memchr(b'<', &hay_bytes[i..])?;
        i += rel;
        if i + n > len {
            return None;
        }
        if hay_bytes[i + 1] == b'/' && starts_with_ignore_ascii_case_at(hay_bytes, i, close_tag) {
            let mut k = i + n;
            while k < len && hay_bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && hay_bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn push_text(out: &mut Vec<Token>, raw: &str) {
    let decoded = decode_entities(raw);
    if decoded.is_empty() {
        return;
    }
    if let Some(Token::Text(prev)) = out.last_mut() {
        prev.push_str(&decoded);
    } else {
        out.push(Token::Text(decoded));
    }
}

pub fn tokenize(input: &str) -> TokenStream {
    let mut out = Vec::new();
    let mut i = 0;
    let bytes = input.as_bytes();
    // Invariant: we scan by byte, but any slice endpoints must be UTF-8 char boundaries.
    // We only cut slices at ASCII structural bytes or at positions reached by scanning
    // ASCII-only tokens; therefore slice endpoints remain UTF-8 boundaries.
    while i < bytes.len() {
        if !opens_markup(bytes, i) {
            // collect text until the next '<' that opens markup
            let start = i;
            i += 1;
            while i < bytes.len() {
                match memchr(b'<', &bytes[i..]) {
                    Some(rel) => {
                        i += rel;
                        if opens_markup(bytes, i) {
                            break;
                        }
                        i += 1;
                    }
                    None => i = bytes.len(),
                }
            }
            debug_assert!(input.is_char_boundary(start));
            debug_assert!(input.is_char_boundary(i));
            push_text(&mut out, &input[start..i]);
            continue;
        }
        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            if let Some(end) = input[body_start..].find(HTML_COMMENT_END) {
                out.push(Token::Comment(input[body_start..body_start + end].to_string()));
                i = body_start + end + HTML_COMMENT_END.len();
                continue;
            }
            out.push(Token::Comment(input[body_start..].to_string()));
            break;
        }
        if starts_with_ignore_ascii_case_at(bytes, i, b"<!doctype") {
            let rest = &input[i + 2..];
            if let Some(end) = rest.find('>') {
                out.push(Token::Doctype(rest[..end].trim().to_string()));
                i += 2 + end + 1;
                continue;
            }
            break;
        }
        if bytes[i + 1] == b'!' {
            // bogus comment, e.g. `<![CDATA[...]]>`
            let end = tag_end(bytes, i);
            let body_end = if end > i + 2 && bytes[end - 1] == b'>' {
                end - 1
            } else {
                end
            };
            out.push(Token::Comment(input[i + 2..body_end].to_string()));
            i = end;
            continue;
        }
        // end tag?
        if bytes[i + 1] == b'/' {
            let start = i + 2;
            let mut j = start;
            while j < bytes.len() && is_name_char(bytes[j]) {
                j += 1;
            }
            let name = input[start..j].to_ascii_lowercase();
            while j < bytes.len() && bytes[j] != b'>' {
                j += 1;
            }
            if j < bytes.len() {
                j += 1;
            }
            out.push(Token::EndTag(name));
            i = j;
            continue;
        }
        // start tag
        let start = i + 1;
        let mut j = start;
        while j < bytes.len() && is_name_char(bytes[j]) {
            j += 1;
        }
        debug_assert!(input.is_char_boundary(j));
        let name = input[start..j].to_ascii_lowercase();
        let mut k = j;
        let mut attributes: Vec<Attribute> = Vec::new();
        let len = bytes.len();
        let mut self_closing = false;

        let skip_whitespace = |k: &mut usize| {
            while *k < len && bytes[*k].is_ascii_whitespace() {
                *k += 1;
            }
        };

        loop {
            skip_whitespace(&mut k);
            if k >= len {
                break;
            }
            if bytes[k] == b'>' {
                k += 1;
                break;
            }
            if bytes[k] == b'/' {
                if k + 1 < len && bytes[k + 1] == b'>' {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            let name_start = k;
            while k < len && is_name_char(bytes[k]) {
                k += 1;
            }
            if name_start == k {
                // skip a stray byte, keeping k on a char boundary
                k += 1;
                while k < len && !input.is_char_boundary(k) {
                    k += 1;
                }
                continue;
            }
            let attribute_name = input[name_start..k].to_ascii_lowercase();

            skip_whitespace(&mut k);
            let value: Option<String>;

            if k < len && bytes[k] == b'=' {
                k += 1;
                skip_whitespace(&mut k);
                if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                    let quote = bytes[k];
                    k += 1;
                    let vstart = k;
                    while k < len && bytes[k] != quote {
                        k += 1;
                    }
                    let raw = &input[vstart..k];
                    if k < len {
                        k += 1;
                    }
                    value = Some(decode_entities(raw));
                } else {
                    let vstart = k;
                    while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                        if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                            break;
                        }
                        k += 1;
                    }
                    value = Some(decode_entities(&input[vstart..k]));
                }
            } else {
                value = None;
            }
            attributes.push((attribute_name, value));
        }
        if is_void_element(&name) {
            self_closing = true;
        }

        let rawtext = (name == "script" || name == "style") && !self_closing;
        out.push(Token::StartTag {
            name: name.clone(),
            attributes,
            self_closing,
        });

        if rawtext {
            let close_tag = if name == "script" {
                SCRIPT_CLOSE_TAG
            } else {
                STYLE_CLOSE_TAG
            };
            if let Some((rel_start, rel_end)) = find_rawtext_close_tag(&input[k..], close_tag) {
                let raw = &input[k..k + rel_start];
                if !raw.is_empty() {
                    out.push(Token::Text(raw.to_string()));
                }
                out.push(Token::EndTag(name));
                i = k + rel_end;
                continue;
            }
            // Missing close tag: the remainder is rawtext content.
            let raw = &input[k..];
            if !raw.is_empty() {
                out.push(Token::Text(raw.to_string()));
            }
            out.push(Token::EndTag(name));
            break;
        }

        i = k;
    }
    log::trace!(target: "html.tokenizer", "tokenized {} bytes into {} tokens", input.len(), out.len());
    TokenStream::new(out)
}
