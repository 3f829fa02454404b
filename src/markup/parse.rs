use super::document::{Block, BlockKind, Document, Marks, Run};

/// A lexical piece of a markup string
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Text(String),
    Start { name: String, self_closing: bool },
    End { name: String },
}

/// Parse a markup fragment into a [`Document`].
///
/// Parsing doubles as sanitization: only the inline marks, paragraphs and
/// list items survive. Attributes are always discarded, `script` and `style`
/// elements are dropped together with their content, and any other unknown
/// element is unwrapped to its text.
pub fn parse(markup: &str) -> Document {
    let mut builder = Builder::default();
    for token in tokenize(markup) {
        builder.push(token);
    }
    builder.finish()
}

fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut rest = input;

    while let Some(lt) = rest.find('<') {
        text.push_str(&rest[..lt]);
        let after = &rest[lt + 1..];

        if let Some(comment) = after.strip_prefix("!--") {
            rest = match comment.find("-->") {
                Some(end) => &comment[end + 3..],
                None => "",
            };
            continue;
        }

        if let Some((token, consumed)) = lex_tag(after) {
            flush_text(&mut text, &mut tokens);
            tokens.push(token);
            rest = &after[consumed..];
        } else {
            // A stray `<` that does not open a tag is literal text
            text.push('<');
            rest = after;
        }
    }
    text.push_str(rest);
    flush_text(&mut text, &mut tokens);
    tokens
}

fn flush_text(text: &mut String, tokens: &mut Vec<Token>) {
    if !text.is_empty() {
        tokens.push(Token::Text(decode_entities(text)));
        text.clear();
    }
}

/// Lex a tag body following `<`. Returns the token and the bytes consumed
/// through the closing `>`.
fn lex_tag(s: &str) -> Option<(Token, usize)> {
    let (closing, body) = match s.strip_prefix('/') {
        Some(b) => (true, b),
        None => (false, s),
    };
    let name_len = body
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(body.len());
    if name_len == 0 || !body.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }
    let name = body[..name_len].to_ascii_lowercase();

    // Skip attributes up to the closing `>`, honouring quoted values
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    for (i, c) in body[name_len..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '>' => {
                let consumed = usize::from(closing) + name_len + i + 1;
                let token = if closing {
                    Token::End { name }
                } else {
                    Token::Start {
                        name,
                        self_closing: prev == '/',
                    }
                };
                return Some((token, consumed));
            }
            None => {}
        }
        if !c.is_whitespace() {
            prev = c;
        }
    }
    None
}

fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';').filter(|&semi| semi <= 10) {
            Some(semi) => match decode_entity(&after[..semi]) {
                Some(c) => {
                    out.push(c);
                    rest = &after[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = after;
                }
            },
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code).filter(|c| *c != '\0')
        }
    }
}

/// Turns the token stream into blocks
#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    current: Option<Block>,
    bold: u32,
    italic: u32,
    underline: u32,
    list_depth: u32,
    in_item: bool,
    /// Name of the element whose content is being dropped
    skipping: Option<String>,
}

impl Builder {
    fn push(&mut self, token: Token) {
        if let Some(skipped) = &self.skipping {
            if matches!(&token, Token::End { name } if name == skipped) {
                self.skipping = None;
            }
            return;
        }

        match token {
            Token::Text(text) => self.text(&text),
            Token::Start { name, self_closing } => self.start(&name, self_closing),
            Token::End { name } => self.end(&name),
        }
    }

    fn block_kind(&self) -> BlockKind {
        if self.in_item || self.list_depth > 0 {
            BlockKind::ListItem
        } else {
            BlockKind::Paragraph
        }
    }

    fn marks(&self) -> Marks {
        Marks {
            bold: self.bold > 0,
            italic: self.italic > 0,
            underline: self.underline > 0,
        }
    }

    fn text(&mut self, text: &str) {
        // Source formatting between block elements is not content
        if self.current.is_none() && text.trim().is_empty() && text.contains(['\n', '\r']) {
            return;
        }
        if self.list_depth > 0 && !self.in_item && text.trim().is_empty() {
            return;
        }
        let text: String = text
            .chars()
            .filter(|c| *c != '\r')
            .map(|c| if c == '\n' || c == '\t' { ' ' } else { c })
            .collect();
        if text.is_empty() {
            return;
        }
        let marks = self.marks();
        let kind = self.block_kind();
        let block = self.current.get_or_insert_with(|| Block::new(kind));
        block.runs.push(Run::new(text, marks));
        block.normalize();
    }

    fn flush(&mut self) {
        if let Some(block) = self.current.take() {
            self.blocks.push(block);
        }
    }

    /// Start a block, reusing an untouched one (e.g. `<li><p>`)
    fn open_block(&mut self, kind: BlockKind) {
        match &mut self.current {
            Some(block) if block.is_empty() => block.kind = kind,
            _ => {
                self.flush();
                self.current = Some(Block::new(kind));
            }
        }
    }

    fn start(&mut self, name: &str, self_closing: bool) {
        match name {
            "b" | "strong" => self.bold += 1,
            "i" | "em" => self.italic += 1,
            "u" | "ins" => self.underline += 1,
            "p" | "div" => {
                let kind = self.block_kind();
                self.open_block(kind);
            }
            "br" => {
                let kind = self.block_kind();
                let block = self.current.take().unwrap_or_else(|| Block::new(kind));
                self.blocks.push(block);
            }
            "ul" | "ol" => {
                self.flush();
                self.list_depth += 1;
            }
            "li" => {
                self.flush();
                self.current = Some(Block::new(BlockKind::ListItem));
                self.in_item = true;
            }
            "script" | "style" if !self_closing => self.skipping = Some(name.to_string()),
            _ => {}
        }
    }

    fn end(&mut self, name: &str) {
        match name {
            "b" | "strong" => self.bold = self.bold.saturating_sub(1),
            "i" | "em" => self.italic = self.italic.saturating_sub(1),
            "u" | "ins" => self.underline = self.underline.saturating_sub(1),
            "p" | "div" => self.flush(),
            "li" => {
                self.flush();
                self.in_item = false;
            }
            "ul" | "ol" => {
                self.flush();
                self.list_depth = self.list_depth.saturating_sub(1);
                self.in_item = false;
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Document {
        self.flush();
        Document::from_blocks(self.blocks)
    }
}
