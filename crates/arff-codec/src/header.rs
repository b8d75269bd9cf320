//! Header line parsing: `@RELATION`, `@ATTRIBUTE` and `@DATA`.

use arff_model::{Attribute, AttributeType};

use crate::error::{CodecError, Result};
use crate::lexer::{Cursor, quote_text};

/// An `@ATTRIBUTE` line as written in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// `None` when the line names the attribute without a type.
    pub kind: Option<AttributeType>,
    pub line: usize,
}

impl Declaration {
    /// Resolve to an attribute. Untyped declarations become numeric.
    pub fn into_attribute(self) -> Attribute {
        match self.kind {
            Some(kind) => Attribute::new(self.name, kind),
            None => Attribute::untyped(self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum HeaderLine {
    Relation(String),
    Attribute(Declaration),
    Data,
}

/// Parse one non-blank, non-comment header line.
pub(crate) fn parse_header_line(text: &str, line: usize) -> Result<HeaderLine> {
    let mut cursor = Cursor::new(text, line);
    if cursor.bump() != Some('@') {
        return Err(CodecError::syntax(
            line,
            format!("expected a header declaration, found '{}'", truncate(text)),
        ));
    }
    let keyword = cursor.take_while(|c| c.is_ascii_alphabetic());
    match keyword.to_ascii_lowercase().as_str() {
        "relation" => parse_relation(&mut cursor).map(HeaderLine::Relation),
        "attribute" => parse_attribute(&mut cursor).map(HeaderLine::Attribute),
        "data" => {
            cursor.skip_ws();
            if cursor.is_eof() {
                Ok(HeaderLine::Data)
            } else {
                Err(CodecError::syntax(line, "unexpected text after @DATA"))
            }
        }
        _ => Err(CodecError::syntax(
            line,
            format!("unknown declaration '@{keyword}'"),
        )),
    }
}

fn parse_relation(cursor: &mut Cursor<'_>) -> Result<String> {
    cursor.skip_ws();
    let name = match cursor.peek() {
        Some('\'' | '"') => read_text(cursor, "relation name")?,
        _ => cursor.rest().trim().to_string(),
    };
    if name.is_empty() {
        return Err(CodecError::syntax(cursor.line(), "missing relation name"));
    }
    Ok(name)
}

fn parse_attribute(cursor: &mut Cursor<'_>) -> Result<Declaration> {
    let line = cursor.line();
    cursor.skip_ws();
    let name = match cursor.peek() {
        Some('\'' | '"') => read_text(cursor, "attribute name")?,
        _ => cursor
            .take_while(|c| !c.is_whitespace() && c != '{')
            .to_string(),
    };
    if name.is_empty() {
        return Err(CodecError::syntax(line, "missing attribute name"));
    }
    cursor.skip_ws();
    if cursor.is_eof() {
        return Ok(Declaration {
            name,
            kind: None,
            line,
        });
    }
    let kind = if cursor.peek() == Some('{') {
        AttributeType::Nominal(parse_nominal_list(cursor)?)
    } else {
        parse_primitive_type(cursor)?
    };
    Ok(Declaration {
        name,
        kind: Some(kind),
        line,
    })
}

fn parse_primitive_type(cursor: &mut Cursor<'_>) -> Result<AttributeType> {
    let line = cursor.line();
    let keyword = cursor.take_while(|c| !c.is_whitespace());
    let kind = match keyword.to_ascii_lowercase().as_str() {
        "numeric" => AttributeType::Numeric,
        "real" => AttributeType::Real,
        "integer" => AttributeType::Integer,
        "string" => AttributeType::String,
        "date" => {
            cursor.skip_ws();
            let format = match cursor.peek() {
                None => None,
                Some('\'' | '"') => Some(read_text(cursor, "date format")?),
                Some(_) => Some(cursor.take_while(|c| !c.is_whitespace()).to_string()),
            };
            AttributeType::Date(format)
        }
        _ => return Err(CodecError::unsupported_type(line, keyword)),
    };
    cursor.skip_ws();
    if !cursor.is_eof() {
        return Err(CodecError::syntax(
            line,
            format!("unexpected text after attribute type: '{}'", truncate(cursor.rest())),
        ));
    }
    Ok(kind)
}

/// Parse `{v1,v2,...}`.
///
/// A quoted value must start right after `{` or `,` and, when it is the last
/// value, be followed directly by `}`. Whitespace before a `,` is allowed.
/// Unquoted values are trimmed and may not contain quotes.
fn parse_nominal_list(cursor: &mut Cursor<'_>) -> Result<Vec<String>> {
    let line = cursor.line();
    cursor.bump();
    let mut values = Vec::new();
    if cursor.peek() == Some('}') {
        cursor.bump();
    } else {
        loop {
            match cursor.peek() {
                Some('\'' | '"') => {
                    values.push(read_text(cursor, "nominal value")?);
                    let gap = !cursor.take_while(char::is_whitespace).is_empty();
                    match cursor.bump() {
                        Some(',') => continue,
                        Some('}') if !gap => break,
                        Some('}') => {
                            return Err(CodecError::syntax(
                                line,
                                "whitespace between quoted nominal value and '}'",
                            ));
                        }
                        _ => {
                            return Err(CodecError::syntax(
                                line,
                                "expected ',' or '}' after quoted nominal value",
                            ));
                        }
                    }
                }
                Some(_) => {
                    let token = cursor.take_while(|c| c != ',' && c != '}');
                    if token.contains(['\'', '"']) {
                        return Err(CodecError::syntax(
                            line,
                            format!("quote character inside unquoted nominal value '{}'", token.trim()),
                        ));
                    }
                    let token = token.trim();
                    if token.is_empty() {
                        return Err(CodecError::syntax(line, "empty nominal value"));
                    }
                    values.push(token.to_string());
                    match cursor.bump() {
                        Some(',') => continue,
                        Some('}') => break,
                        _ => return Err(CodecError::syntax(line, "unterminated nominal list")),
                    }
                }
                None => return Err(CodecError::syntax(line, "unterminated nominal list")),
            }
        }
    }
    cursor.skip_ws();
    if !cursor.is_eof() {
        return Err(CodecError::syntax(line, "unexpected text after nominal list"));
    }
    Ok(values)
}

fn read_text(cursor: &mut Cursor<'_>, context: &'static str) -> Result<String> {
    let line = cursor.line();
    let bytes = cursor.read_quoted()?;
    String::from_utf8(bytes).map_err(|_| CodecError::InvalidText { line, context })
}

fn truncate(text: &str) -> String {
    const LIMIT: usize = 40;
    if text.chars().count() > LIMIT {
        let head: String = text.chars().take(LIMIT).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

/// Render an attribute type the way it is declared in a header.
pub(crate) fn render_type(kind: &AttributeType) -> String {
    match kind {
        AttributeType::Numeric => "NUMERIC".to_string(),
        AttributeType::Real => "REAL".to_string(),
        AttributeType::Integer => "INTEGER".to_string(),
        AttributeType::String => "STRING".to_string(),
        AttributeType::Date(None) => "DATE".to_string(),
        AttributeType::Date(Some(format)) => format!("DATE {}", quote_text(format)),
        AttributeType::Nominal(values) => {
            let rendered: Vec<String> = values.iter().map(|v| quote_text(v)).collect();
            format!("{{{}}}", rendered.join(","))
        }
    }
}
