use super::document::{Block, BlockKind, Document, Mark, Run};

/// Serialize a document to a well-formed markup fragment.
///
/// A document holding a single paragraph is written as bare inline markup,
/// so an empty document serializes to `""`.
pub fn to_markup(doc: &Document) -> String {
    let mut out = String::new();
    if let [only] = doc.blocks.as_slice()
        && only.kind == BlockKind::Paragraph
    {
        write_inline(&mut out, &only.runs);
        return out;
    }

    let mut in_list = false;
    for block in &doc.blocks {
        match block.kind {
            BlockKind::ListItem => {
                if !in_list {
                    out.push_str("<ul>");
                    in_list = true;
                }
                write_block(&mut out, "li", block);
            }
            BlockKind::Paragraph => {
                if in_list {
                    out.push_str("</ul>");
                    in_list = false;
                }
                write_block(&mut out, "p", block);
            }
        }
    }
    if in_list {
        out.push_str("</ul>");
    }
    out
}

fn write_block(out: &mut String, tag: &str, block: &Block) {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    write_inline(out, &block.runs);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

/// Write runs, keeping marks shared by consecutive runs open across them
fn write_inline(out: &mut String, runs: &[Run]) {
    let mut open: Vec<Mark> = Vec::new();
    for run in runs {
        let keep = open.iter().take_while(|m| run.marks.has(**m)).count();
        for mark in open.drain(keep..).rev() {
            close_tag(out, mark);
        }
        for mark in Mark::ALL {
            if run.marks.has(mark) && !open.contains(&mark) {
                out.push('<');
                out.push_str(mark.tag());
                out.push('>');
                open.push(mark);
            }
        }
        escape_into(out, &run.text);
    }
    for mark in open.into_iter().rev() {
        close_tag(out, mark);
    }
}

fn close_tag(out: &mut String, mark: Mark) {
    out.push_str("</");
    out.push_str(mark.tag());
    out.push('>');
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
}
