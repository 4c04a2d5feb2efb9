use std::ops::Range;

use crate::script::find_ignore_case;

/// Elements whose content is never markup
const RAW_TEXT_TAGS: &[&str] = &["script", "style", "textarea"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// Entity-decoded value; empty for bare attributes
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'a> {
    StartTag {
        name: String,
        attributes: Vec<Attribute>,
        self_closing: bool,
    },
    EndTag {
        name: String,
    },
    /// Raw, undecoded character data
    Text(&'a str),
    /// Comments, doctypes and processing instructions
    Declaration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    /// Byte range of the token in the source
    pub span: Range<usize>,
}

/// Forgiving HTML tokenizer.
///
/// Never fails: a `<` that does not open a tag is text, an unterminated tag
/// ends at the end of input, and malformed attributes are skipped.
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    raw_text: Option<&'static str>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            raw_text: None,
        }
    }

    fn byte(&self, idx: usize) -> Option<u8> {
        self.src.as_bytes().get(idx).copied()
    }

    fn text_until_next_tag(&mut self, from: usize) -> Token<'a> {
        let start = self.pos;
        let end = self.src[from..]
            .find('<')
            .map(|idx| idx + from)
            .unwrap_or(self.src.len());
        self.pos = end;
        Token {
            kind: TokenKind::Text(&self.src[start..end]),
            span: start..end,
        }
    }

    fn raw_text_until(&mut self, tag: &'static str) -> Option<Token<'a>> {
        self.raw_text = None;
        let start = self.pos;
        let closing = format!("</{tag}");
        let end = find_ignore_case(self.src, closing.as_bytes(), start).unwrap_or(self.src.len());
        if end == start {
            return None;
        }
        self.pos = end;
        Some(Token {
            kind: TokenKind::Text(&self.src[start..end]),
            span: start..end,
        })
    }

    fn declaration(&mut self) -> Token<'a> {
        let start = self.pos;
        let end = if self.src[start..].starts_with("<!--") {
            self.src[start + 4..]
                .find("-->")
                .map(|idx| start + 4 + idx + 3)
                .unwrap_or(self.src.len())
        } else {
            self.src[start..]
                .find('>')
                .map(|idx| start + idx + 1)
                .unwrap_or(self.src.len())
        };
        self.pos = end;
        Token {
            kind: TokenKind::Declaration,
            span: start..end,
        }
    }

    fn read_name(&self, mut idx: usize) -> (String, usize) {
        let start = idx;
        while let Some(b) = self.byte(idx) {
            if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b':' | b'.') {
                idx += 1;
            } else {
                break;
            }
        }
        (self.src[start..idx].to_ascii_lowercase(), idx)
    }

    fn skip_whitespace(&self, mut idx: usize) -> usize {
        while self.byte(idx).is_some_and(|b| b.is_ascii_whitespace()) {
            idx += 1;
        }
        idx
    }

    fn end_tag(&mut self) -> Token<'a> {
        let start = self.pos;
        let (name, idx) = self.read_name(start + 2);
        let end = self.src[idx..]
            .find('>')
            .map(|off| idx + off + 1)
            .unwrap_or(self.src.len());
        self.pos = end;
        Token {
            kind: TokenKind::EndTag { name },
            span: start..end,
        }
    }

    fn start_tag(&mut self) -> Token<'a> {
        let start = self.pos;
        let (name, mut idx) = self.read_name(start + 1);
        let mut attributes = Vec::new();
        let mut self_closing = false;

        loop {
            idx = self.skip_whitespace(idx);
            match self.byte(idx) {
                None => break,
                Some(b'>') => {
                    idx += 1;
                    break;
                }
                Some(b'/') => {
                    if self.byte(idx + 1) == Some(b'>') {
                        self_closing = true;
                        idx += 2;
                        break;
                    }
                    idx += 1;
                }
                Some(_) => {
                    let (attribute, next) = self.attribute(idx);
                    idx = next;
                    if let Some(attribute) = attribute {
                        attributes.push(attribute);
                    }
                }
            }
        }

        self.pos = idx;
        if !self_closing {
            self.raw_text = RAW_TEXT_TAGS.iter().copied().find(|tag| *tag == name);
        }

        Token {
            kind: TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            },
            span: start..idx,
        }
    }

    fn attribute(&self, start: usize) -> (Option<Attribute>, usize) {
        let mut idx = start;
        while let Some(b) = self.byte(idx) {
            if b.is_ascii_whitespace() || matches!(b, b'=' | b'>' | b'/') {
                break;
            }
            idx += 1;
        }
        if idx == start {
            // stray '=' or similar
            return (None, idx + 1);
        }
        let name = self.src[start..idx].to_ascii_lowercase();

        let after_name = self.skip_whitespace(idx);
        if self.byte(after_name) != Some(b'=') {
            return (
                Some(Attribute {
                    name,
                    value: String::new(),
                }),
                idx,
            );
        }

        let value_start = self.skip_whitespace(after_name + 1);
        let (raw, next) = match self.byte(value_start) {
            Some(quote @ (b'"' | b'\'')) => {
                let body = value_start + 1;
                match self.src[body..].find(quote as char) {
                    Some(off) => (&self.src[body..body + off], body + off + 1),
                    None => (&self.src[body..], self.src.len()),
                }
            }
            _ => {
                let mut end = value_start;
                while let Some(b) = self.byte(end) {
                    if b.is_ascii_whitespace() || b == b'>' {
                        break;
                    }
                    end += 1;
                }
                (&self.src[value_start..end], end)
            }
        };

        (
            Some(Attribute {
                name,
                value: html_escape::decode_html_entities(raw).into_owned(),
            }),
            next,
        )
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if let Some(tag) = self.raw_text {
            if let Some(token) = self.raw_text_until(tag) {
                return Some(token);
            }
        }

        if self.pos >= self.src.len() {
            return None;
        }

        if self.byte(self.pos) != Some(b'<') {
            return Some(self.text_until_next_tag(self.pos));
        }

        let token = match self.byte(self.pos + 1) {
            Some(b'!' | b'?') => self.declaration(),
            Some(b'/') if self.byte(self.pos + 2).is_some_and(|b| b.is_ascii_alphabetic()) => {
                self.end_tag()
            }
            Some(b) if b.is_ascii_alphabetic() => self.start_tag(),
            // a lone '<' is plain text
            _ => self.text_until_next_tag(self.pos + 1),
        };
        Some(token)
    }
}
