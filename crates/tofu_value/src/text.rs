//! Text serialization of tofu values.
//!
//! Every field is written as `key: type: value`:
//!
//! ```text
//! {
//!   value: i32: "42",
//!   attr: object: {
//!     name: cstr: "Signed 32-bit Integer",
//!     description: cstr: "A 32-bit signed integer value",
//!     id: cstr: "i32",
//!     required: bool: false
//!   },
//!   mutable: bool: true,
//!   locked: bool: false
//! }
//! ```
//!
//! Strings escape `\\`, `"`, newline, carriage return and tab. The parser
//! accepts any whitespace between tokens, fields in any order and an
//! optional trailing comma. Only `value` is required; `attr` defaults to the
//! registry attribute of the kind, `mutable` to `true` and `locked` to
//! `false`.

use crate::{Attribute, Kind, Mutability, TofuError, TofuResult, TofuValue};

impl TofuValue {
    /// Render this cell in the text format.
    pub fn serialize(&self) -> String {
        let attr = self.attribute();
        let mut out = String::with_capacity(
            self.value().len() + attr.name.len() + attr.description.len() + attr.id.len() + 160,
        );
        out.push_str("{\n  value: ");
        out.push_str(self.kind().id());
        out.push_str(": ");
        push_quoted(&mut out, self.value());
        out.push_str(",\n  attr: object: {\n    name: cstr: ");
        push_quoted(&mut out, &attr.name);
        out.push_str(",\n    description: cstr: ");
        push_quoted(&mut out, &attr.description);
        out.push_str(",\n    id: cstr: ");
        push_quoted(&mut out, &attr.id);
        out.push_str(",\n    required: bool: ");
        out.push_str(bool_text(attr.required));
        out.push_str("\n  },\n  mutable: bool: ");
        out.push_str(bool_text(self.is_mutable()));
        out.push_str(",\n  locked: bool: ");
        out.push_str(bool_text(self.is_locked()));
        out.push_str("\n}");
        out
    }

    /// Parse text produced by [`serialize`](Self::serialize).
    ///
    /// `parse(&v.serialize())` reproduces `v` exactly, including attribute
    /// and mutability state.
    pub fn parse(text: &str) -> TofuResult<TofuValue> {
        let mut parser = Parser::new(text);
        let value = parser.document()?;
        parser.skip_ws();
        if parser.pos < text.len() {
            return Err(parser.error("trailing characters after document"));
        }
        Ok(value)
    }
}

fn bool_text(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}

fn push_quoted(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Recursive-descent parser over the text format.
struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Parser { src, pos: 0 }
    }

    fn error(&self, message: impl Into<String>) -> TofuError {
        TofuError::parse(self.pos, message)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> TofuResult<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(format!("expected `{expected}`")))
        }
    }

    /// `[A-Za-z0-9_]+`, returned with its starting offset.
    fn ident(&mut self) -> TofuResult<(&'a str, usize)> {
        self.skip_ws();
        let start = self.pos;
        let len = self
            .rest()
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();
        if len == 0 {
            return Err(self.error("expected identifier"));
        }
        self.pos += len;
        Ok((&self.src[start..self.pos], start))
    }

    /// `type ':'` where the type must be `expected`.
    fn type_tag(&mut self, expected: &str) -> TofuResult<()> {
        let (tag, at) = self.ident()?;
        if tag != expected {
            return Err(TofuError::parse(
                at,
                format!("expected type `{expected}`, found `{tag}`"),
            ));
        }
        self.expect(':')
    }

    fn string(&mut self) -> TofuResult<String> {
        self.expect('"')?;
        let mut out = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\\' => {
                    let escaped = match chars.next() {
                        Some((_, '\\')) => '\\',
                        Some((_, '"')) => '"',
                        Some((_, 'n')) => '\n',
                        Some((_, 'r')) => '\r',
                        Some((_, 't')) => '\t',
                        Some((_, other)) => {
                            return Err(TofuError::parse(
                                self.pos + i,
                                format!("unknown escape `\\{other}`"),
                            ))
                        }
                        None => break,
                    };
                    out.push(escaped);
                }
                c => out.push(c),
            }
        }
        Err(self.error("unterminated string"))
    }

    fn boolean(&mut self) -> TofuResult<bool> {
        let (word, at) = self.ident()?;
        match word {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(TofuError::parse(
                at,
                format!("expected `true` or `false`, found `{other}`"),
            )),
        }
    }

    /// After a field value: `,` continues the object, `}` closes it.
    /// Returns `true` when the object is closed.
    fn end_field(&mut self) -> TofuResult<bool> {
        if self.eat(',') {
            Ok(self.eat('}'))
        } else {
            self.expect('}')?;
            Ok(true)
        }
    }

    fn document(&mut self) -> TofuResult<TofuValue> {
        let mut value: Option<(Kind, String)> = None;
        let mut attribute: Option<Attribute> = None;
        let mut mutable: Option<bool> = None;
        let mut locked: Option<bool> = None;

        self.expect('{')?;
        let mut closed = self.eat('}');
        while !closed {
            let (key, at) = self.ident()?;
            self.expect(':')?;
            match key {
                "value" => {
                    let (type_id, _) = self.ident()?;
                    let kind = type_id.parse::<Kind>()?;
                    self.expect(':')?;
                    let payload = self.string()?;
                    set_once(&mut value, (kind, payload), key, at)?;
                }
                "attr" => {
                    self.type_tag("object")?;
                    let attr = self.attribute()?;
                    set_once(&mut attribute, attr, key, at)?;
                }
                "mutable" => {
                    self.type_tag("bool")?;
                    let flag = self.boolean()?;
                    set_once(&mut mutable, flag, key, at)?;
                }
                "locked" => {
                    self.type_tag("bool")?;
                    let flag = self.boolean()?;
                    set_once(&mut locked, flag, key, at)?;
                }
                other => {
                    return Err(TofuError::parse(at, format!("unknown field `{other}`")));
                }
            }
            closed = self.end_field()?;
        }

        let Some((kind, payload)) = value else {
            return Err(self.error("missing `value` field"));
        };
        let mutability = match (locked.unwrap_or(false), mutable.unwrap_or(true)) {
            (true, _) => Mutability::Locked,
            (false, true) => Mutability::Mutable,
            (false, false) => Mutability::Frozen,
        };
        let attribute = attribute.unwrap_or_else(|| Attribute::for_kind(kind));
        Ok(TofuValue::from_parts(kind, payload, mutability, attribute))
    }

    fn attribute(&mut self) -> TofuResult<Attribute> {
        let mut name = None;
        let mut description = None;
        let mut id = None;
        let mut required = None;

        self.expect('{')?;
        let mut closed = self.eat('}');
        while !closed {
            let (key, at) = self.ident()?;
            self.expect(':')?;
            match key {
                "name" | "description" | "id" => {
                    self.type_tag("cstr")?;
                    let text = self.string()?;
                    let slot = match key {
                        "name" => &mut name,
                        "description" => &mut description,
                        _ => &mut id,
                    };
                    set_once(slot, text, key, at)?;
                }
                "required" => {
                    self.type_tag("bool")?;
                    let flag = self.boolean()?;
                    set_once(&mut required, flag, key, at)?;
                }
                other => {
                    return Err(TofuError::parse(
                        at,
                        format!("unknown attribute field `{other}`"),
                    ));
                }
            }
            closed = self.end_field()?;
        }

        Ok(Attribute {
            name: name.unwrap_or_default(),
            description: description.unwrap_or_default(),
            id: id.unwrap_or_default(),
            required: required.unwrap_or(false),
        })
    }
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &str, at: usize) -> TofuResult<()> {
    if slot.is_some() {
        return Err(TofuError::parse(at, format!("duplicate field `{key}`")));
    }
    *slot = Some(value);
    Ok(())
}
