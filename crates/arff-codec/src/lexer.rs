//! Character-level scanning shared by header and data parsing, and the
//! matching quoting rules used when writing.

use crate::error::{CodecError, Result};

/// Forward-only cursor over a single line.
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str, line: usize) -> Self {
        Self { src, pos: 0, line }
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    pub(crate) fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    pub(crate) fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    pub(crate) fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }

    /// Read a quoted token starting at the opening quote.
    ///
    /// Returns the unescaped content as bytes: `\xHH` escapes may produce
    /// byte sequences that are not UTF-8 on their own.
    pub(crate) fn read_quoted(&mut self) -> Result<Vec<u8>> {
        let quote = match self.bump() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(CodecError::syntax(self.line, "expected a quoted value")),
        };
        let mut out = Vec::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(CodecError::syntax(self.line, "unterminated quoted value"));
            };
            if c == quote {
                return Ok(out);
            }
            if c != '\\' {
                push_char(&mut out, c);
                continue;
            }
            let Some(escaped) = self.bump() else {
                return Err(CodecError::syntax(self.line, "dangling escape at end of line"));
            };
            match escaped {
                'n' => out.push(b'\n'),
                'r' => out.push(b'\r'),
                't' => out.push(b'\t'),
                '0' => out.push(0),
                'x' => {
                    let value = self.read_hex(2)?;
                    // Two hex digits always fit in a byte.
                    out.push(value as u8);
                }
                'u' => {
                    let value = self.read_hex(4)?;
                    let ch = char::from_u32(value).ok_or_else(|| {
                        CodecError::syntax(self.line, format!("invalid unicode escape \\u{value:04x}"))
                    })?;
                    push_char(&mut out, ch);
                }
                other => push_char(&mut out, other),
            }
        }
    }

    fn read_hex(&mut self, digits: usize) -> Result<u32> {
        let mut value = 0u32;
        for _ in 0..digits {
            let digit = self
                .bump()
                .and_then(|c| c.to_digit(16))
                .ok_or_else(|| CodecError::syntax(self.line, "malformed hex escape"))?;
            value = value * 16 + digit;
        }
        Ok(value)
    }
}

fn push_char(out: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

/// Quote a text token only when the bare form would not read back unchanged.
pub(crate) fn quote_text(value: &str) -> String {
    if needs_quoting(value) {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        escape_into(&mut out, value);
        out.push('\'');
        out
    } else {
        value.to_string()
    }
}

/// Quote raw bytes, escaping everything that is not valid UTF-8.
pub(crate) fn quote_bytes(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('\'');
    for chunk in bytes.utf8_chunks() {
        escape_into(&mut out, chunk.valid());
        for byte in chunk.invalid() {
            out.push_str(&format!("\\x{byte:02x}"));
        }
    }
    out.push('\'');
    out
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value == "?"
        || value.chars().any(|c| {
            c.is_whitespace()
                || c.is_control()
                || matches!(c, '\'' | '"' | '\\' | '%' | ',' | '{' | '}')
        })
}

fn escape_into(out: &mut String, value: &str) {
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quoted(src: &str) -> Vec<u8> {
        Cursor::new(src, 1).read_quoted().unwrap()
    }

    #[test]
    fn read_quoted_handles_escapes() {
        assert_eq!(quoted(r"'a\'b'"), b"a'b");
        assert_eq!(quoted(r#""tab\there""#), b"tab\there");
        assert_eq!(quoted(r"'\x41é'"), "A\u{e9}".as_bytes());
        assert_eq!(quoted(r"'\xff'"), vec![0xff]);
    }

    #[test]
    fn read_quoted_rejects_unterminated() {
        let err = Cursor::new("'open", 7).read_quoted().unwrap_err();
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn quote_text_leaves_plain_tokens_bare() {
        assert_eq!(quote_text("tcp"), "tcp");
        assert_eq!(quote_text("0.5"), "0.5");
        assert_eq!(quote_text("a b"), "'a b'");
        assert_eq!(quote_text("?"), "'?'");
        assert_eq!(quote_text(""), "''");
        assert_eq!(quote_text("it's"), r"'it\'s'");
    }

    #[test]
    fn quoted_forms_read_back() {
        for value in ["a b", "it's", "x,y", "line\nbreak", "back\\slash", "\u{1}"] {
            let rendered = quote_text(value);
            assert_eq!(quoted(&rendered), value.as_bytes(), "value {value:?}");
        }
        let bytes = vec![b'o', b'k', 0xc3, 0x28];
        assert_eq!(quoted(&quote_bytes(&bytes)), bytes);
    }
}
