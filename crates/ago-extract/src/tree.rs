use crate::tokenizer::{Token, TokenKind, Tokenizer};

/// Tag of the synthetic node holding the top-level elements
pub const DOCUMENT_TAG: &str = "#document";

/// Class the dictionary pages put on example sentences
const EXAMPLE_CLASS: &str = "txt_ex";

/// Elements that never have content
const VOID_TAGS: &[&str] = &[
    "area", "base", "basefont", "br", "col", "embed", "frame", "hr", "img", "input", "isindex",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements that close an open `<p>`
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "pre", "section", "table",
    "ul",
];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("document contains no markup")]
    NoMarkup,
}

/// A parsed element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Lowercased tag name
    pub tag: String,
    /// Value of the `class` attribute, verbatim
    pub class: String,
    /// Raw markup between the start tag and where the element closed
    pub inner: String,
    /// Decoded character data directly inside this element
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    fn element(tag: String, class: String) -> Self {
        Self {
            tag,
            class,
            ..Default::default()
        }
    }

    pub fn is(&self, tag: &str, class: &str) -> bool {
        self.tag == tag && self.class == class
    }

    /// Depth-first, pre-order search for the first element with exactly this tag and class.
    /// The node itself is checked first.
    pub fn find_first(&self, tag: &str, class: &str) -> Option<&Node> {
        if self.is(tag, class) {
            return Some(self);
        }
        self.children
            .iter()
            .find_map(|child| child.find_first(tag, class))
    }

    /// Flatten the subtree to readable text.
    ///
    /// Every leaf contributes its trimmed text and one trailing space, in
    /// document order. An example-sentence span adds a line break after its
    /// own text and before its children.
    pub fn flatten_to_text(&self) -> String {
        let mut buf = String::new();
        self.flatten_into(&mut buf);
        buf
    }

    fn flatten_into(&self, buf: &mut String) {
        if self.children.is_empty() {
            let mut words = self.text.split_whitespace();
            if let Some(first) = words.next() {
                buf.push_str(first);
                for word in words {
                    buf.push(' ');
                    buf.push_str(word);
                }
            }
            buf.push(' ');
        }
        if self.is("span", EXAMPLE_CLASS) {
            buf.push('\n');
        }
        for child in &self.children {
            child.flatten_into(buf);
        }
    }
}

struct OpenElement {
    node: Node,
    inner_start: usize,
}

/// Does opening `incoming` implicitly close the still-open `open`?
fn closes_implicitly(open: &str, incoming: &str) -> bool {
    match incoming {
        "li" => open == "li",
        "dt" | "dd" => matches!(open, "dt" | "dd"),
        "tr" => matches!(open, "tr" | "td" | "th"),
        "td" | "th" => matches!(open, "td" | "th"),
        "option" => open == "option",
        "p" => open == "p",
        _ => open == "p" && BLOCK_TAGS.contains(&incoming),
    }
}

struct TreeBuilder<'a> {
    src: &'a str,
    stack: Vec<OpenElement>,
}

impl<'a> TreeBuilder<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            stack: vec![OpenElement {
                node: Node::element(DOCUMENT_TAG.to_string(), String::new()),
                inner_start: 0,
            }],
        }
    }

    fn current(&mut self) -> &mut Node {
        // the document node is never popped
        let last = self.stack.len() - 1;
        &mut self.stack[last].node
    }

    /// Close the innermost open element at byte offset `end`
    fn close_top(&mut self, end: usize) {
        if self.stack.len() <= 1 {
            return;
        }
        if let Some(OpenElement {
            mut node,
            inner_start,
        }) = self.stack.pop()
        {
            node.inner = self
                .src
                .get(inner_start..end.max(inner_start))
                .unwrap_or_default()
                .to_string();
            self.current().children.push(node);
        }
    }

    fn push_token(&mut self, token: Token<'_>) {
        match token.kind {
            TokenKind::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                while self.stack.len() > 1 && closes_implicitly(&self.current().tag, &name) {
                    self.close_top(token.span.start);
                }

                let class = attributes
                    .into_iter()
                    .find(|attr| attr.name == "class")
                    .map(|attr| attr.value)
                    .unwrap_or_default();
                let node = Node::element(name, class);

                if self_closing || VOID_TAGS.contains(&node.tag.as_str()) {
                    self.current().children.push(node);
                } else {
                    self.stack.push(OpenElement {
                        node,
                        inner_start: token.span.end,
                    });
                }
            }
            TokenKind::EndTag { name } => {
                // unmatched end tags are dropped
                let Some(depth) = self.stack.iter().skip(1).rposition(|open| open.node.tag == name)
                else {
                    return;
                };
                while self.stack.len() > depth + 1 {
                    self.close_top(token.span.start);
                }
            }
            TokenKind::Text(raw) => {
                let decoded = html_escape::decode_html_entities(raw);
                self.current().text.push_str(&decoded);
            }
            TokenKind::Declaration => {}
        }
    }

    fn finish(mut self) -> Node {
        let end = self.src.len();
        while self.stack.len() > 1 {
            self.close_top(end);
        }
        let mut root = self.stack.pop().map(|open| open.node).unwrap_or_default();
        root.inner = self.src.to_string();
        root
    }
}

/// Build a tree from lenient HTML.
///
/// Returns the synthetic document node whose children are the top-level
/// elements. Fails only when the input holds no element at all.
pub fn parse(html: &str) -> Result<Node, ParseError> {
    let mut builder = TreeBuilder::new(html);
    for token in Tokenizer::new(html) {
        builder.push_token(token);
    }
    let root = builder.finish();

    if root.children.is_empty() {
        return Err(ParseError::NoMarkup);
    }
    tracing::debug!("parsed {} top-level elements", root.children.len());
    Ok(root)
}
