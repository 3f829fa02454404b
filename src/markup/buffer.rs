use crate::util::unicode;

use super::document::{Block, BlockKind, Document, Mark, Marks};
use super::parse::parse;
use super::serialize::to_markup;

/// A caret position: block index and byte offset into that block's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Pos {
    pub block: usize,
    pub offset: usize,
}

impl Pos {
    pub fn new(block: usize, offset: usize) -> Self {
        Pos { block, offset }
    }
}

/// The working copy of a description during an edit session.
///
/// Holds the structured document plus a caret and an optional selection
/// anchor. Formatting commands act on the selection and never touch
/// anything outside the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichTextBuffer {
    doc: Document,
    cursor: Pos,
    anchor: Option<Pos>,
    /// Style for the next typed text while the selection is collapsed
    pending: Option<Marks>,
}

impl RichTextBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a buffer from stored markup, caret at the end
    pub fn from_markup(markup: &str) -> Self {
        let mut buffer = RichTextBuffer {
            doc: parse(markup),
            ..Self::default()
        };
        buffer.cursor = buffer.doc_end();
        buffer
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn to_markup(&self) -> String {
        to_markup(&self.doc)
    }

    pub fn plain_text(&self) -> String {
        self.doc.plain_text()
    }

    pub fn cursor(&self) -> Pos {
        self.cursor
    }

    /// Ordered selection bounds, `None` when the selection is collapsed
    pub fn selection(&self) -> Option<(Pos, Pos)> {
        let anchor = self.anchor?;
        match anchor.cmp(&self.cursor) {
            std::cmp::Ordering::Less => Some((anchor, self.cursor)),
            std::cmp::Ordering::Greater => Some((self.cursor, anchor)),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn pending_marks(&self) -> Option<Marks> {
        self.pending
    }

    /// Marks that the next inserted text will carry
    pub fn typing_marks(&self) -> Marks {
        self.pending
            .unwrap_or_else(|| self.block(self.cursor.block).marks_at(self.cursor.offset))
    }

    fn block(&self, idx: usize) -> &Block {
        &self.doc.blocks[idx]
    }

    fn doc_end(&self) -> Pos {
        let last = self.doc.blocks.len() - 1;
        Pos::new(last, self.block(last).len())
    }

    /// Clamp a position into the document, snapping to a char boundary
    fn clamp(&self, pos: Pos) -> Pos {
        let block = pos.block.min(self.doc.blocks.len() - 1);
        let text = self.block(block).text();
        let mut offset = pos.offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        Pos::new(block, offset)
    }

    pub fn set_cursor(&mut self, pos: Pos) {
        self.cursor = self.clamp(pos);
        self.anchor = None;
        self.pending = None;
    }

    pub fn select(&mut self, anchor: Pos, cursor: Pos) {
        self.anchor = Some(self.clamp(anchor));
        self.cursor = self.clamp(cursor);
        self.pending = None;
    }

    pub fn select_all(&mut self) {
        let end = self.doc_end();
        self.select(Pos::default(), end);
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Insert text at the caret, replacing the selection. Newlines become
    /// block breaks and tabs become spaces, matching what the parser keeps.
    pub fn insert_str(&mut self, text: &str) {
        self.delete_selection();
        let marks = self.typing_marks();
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.split_block();
            }
            let line: String = line
                .chars()
                .filter(|c| *c != '\r')
                .map(|c| if c == '\t' { ' ' } else { c })
                .collect();
            let Pos { block, offset } = self.cursor;
            self.doc.blocks[block].insert_str(offset, &line, marks);
            self.cursor.offset += line.len();
        }
        // Typed text now carries the style; later typing follows it
        self.pending = None;
    }

    pub fn insert_char(&mut self, c: char) {
        let mut tmp = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut tmp));
    }

    /// Enter: split the block at the caret. On an empty list item, leave the
    /// list instead.
    pub fn insert_break(&mut self) {
        self.delete_selection();
        let block = &mut self.doc.blocks[self.cursor.block];
        if block.kind == BlockKind::ListItem && block.is_empty() {
            block.kind = BlockKind::Paragraph;
            return;
        }
        self.split_block();
    }

    fn split_block(&mut self) {
        let Pos { block, offset } = self.cursor;
        let tail = self.doc.blocks[block].split_off(offset);
        self.doc.blocks.insert(block + 1, tail);
        self.cursor = Pos::new(block + 1, 0);
    }

    pub fn backspace(&mut self) {
        if self.delete_selection() {
            return;
        }
        let Pos { block, offset } = self.cursor;
        if offset > 0 {
            let text = self.block(block).text();
            let prev = unicode::prev_grapheme_boundary(&text, offset).unwrap_or(0);
            self.doc.blocks[block].delete_range(prev, offset);
            self.cursor.offset = prev;
        } else if self.block(block).kind == BlockKind::ListItem {
            self.doc.blocks[block].kind = BlockKind::Paragraph;
        } else if block > 0 {
            let removed = self.doc.blocks.remove(block);
            let prev_len = self.block(block - 1).len();
            self.doc.blocks[block - 1].append(removed);
            self.cursor = Pos::new(block - 1, prev_len);
        }
        self.pending = None;
    }

    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        let Pos { block, offset } = self.cursor;
        let text = self.block(block).text();
        if offset < text.len() {
            let next = unicode::next_grapheme_boundary(&text, offset).unwrap_or(text.len());
            self.doc.blocks[block].delete_range(offset, next);
        } else if block + 1 < self.doc.blocks.len() {
            let next = self.doc.blocks.remove(block + 1);
            self.doc.blocks[block].append(next);
        }
        self.pending = None;
    }

    /// Remove the selected content. Returns false when nothing was selected.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            self.anchor = None;
            return false;
        };
        if start.block == end.block {
            self.doc.blocks[start.block].delete_range(start.offset, end.offset);
        } else {
            let tail = self.doc.blocks[end.block].split_off(end.offset);
            self.doc.blocks.drain(start.block + 1..=end.block);
            let first = &mut self.doc.blocks[start.block];
            let first_len = first.len();
            first.delete_range(start.offset, first_len);
            first.append(tail);
        }
        self.cursor = start;
        self.anchor = None;
        true
    }

    // -----------------------------------------------------------------------
    // Caret movement
    // -----------------------------------------------------------------------

    fn begin_move(&mut self, extend: bool) {
        if extend {
            if self.anchor.is_none() {
                self.anchor = Some(self.cursor);
            }
        } else {
            self.anchor = None;
        }
        self.pending = None;
    }

    pub fn move_left(&mut self, extend: bool) {
        if !extend && let Some((start, _)) = self.selection() {
            self.set_cursor(start);
            return;
        }
        self.begin_move(extend);
        let Pos { block, offset } = self.cursor;
        if offset > 0 {
            let text = self.block(block).text();
            self.cursor.offset = unicode::prev_grapheme_boundary(&text, offset).unwrap_or(0);
        } else if block > 0 {
            self.cursor = Pos::new(block - 1, self.block(block - 1).len());
        }
    }

    pub fn move_right(&mut self, extend: bool) {
        if !extend && let Some((_, end)) = self.selection() {
            self.set_cursor(end);
            return;
        }
        self.begin_move(extend);
        let Pos { block, offset } = self.cursor;
        let text = self.block(block).text();
        if offset < text.len() {
            self.cursor.offset =
                unicode::next_grapheme_boundary(&text, offset).unwrap_or(text.len());
        } else if block + 1 < self.doc.blocks.len() {
            self.cursor = Pos::new(block + 1, 0);
        }
    }

    pub fn move_up(&mut self, extend: bool) {
        self.begin_move(extend);
        if self.cursor.block == 0 {
            self.cursor.offset = 0;
        } else {
            self.cursor = self.clamp(Pos::new(self.cursor.block - 1, self.cursor.offset));
        }
    }

    pub fn move_down(&mut self, extend: bool) {
        self.begin_move(extend);
        if self.cursor.block + 1 >= self.doc.blocks.len() {
            self.cursor.offset = self.block(self.cursor.block).len();
        } else {
            self.cursor = self.clamp(Pos::new(self.cursor.block + 1, self.cursor.offset));
        }
    }

    pub fn move_home(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor.offset = 0;
    }

    pub fn move_end(&mut self, extend: bool) {
        self.begin_move(extend);
        self.cursor.offset = self.block(self.cursor.block).len();
    }

    // -----------------------------------------------------------------------
    // Formatting
    // -----------------------------------------------------------------------

    /// Per-block byte ranges covered by `start..end`
    fn block_ranges(&self, start: Pos, end: Pos) -> Vec<(usize, usize, usize)> {
        (start.block..=end.block)
            .map(|b| {
                let from = if b == start.block { start.offset } else { 0 };
                let to = if b == end.block {
                    end.offset
                } else {
                    self.block(b).len()
                };
                (b, from, to)
            })
            .collect()
    }

    /// Toggle a mark over the selection: removed if every selected character
    /// has it, applied to all otherwise. With no selection only the pending
    /// typing style flips.
    pub fn toggle_mark(&mut self, mark: Mark) {
        let Some((start, end)) = self.selection() else {
            let marks = self.typing_marks();
            self.pending = Some(marks.with(mark, !marks.has(mark)));
            return;
        };
        let ranges = self.block_ranges(start, end);
        let coverage: Vec<bool> = ranges
            .iter()
            .filter_map(|&(b, from, to)| self.block(b).range_has_mark(from, to, mark))
            .collect();
        if coverage.is_empty() {
            return;
        }
        let on = !coverage.iter().all(|has| *has);
        for (b, from, to) in ranges {
            self.doc.blocks[b].set_mark(from, to, mark, on);
        }
    }

    pub fn toggle_bold(&mut self) {
        self.toggle_mark(Mark::Bold);
    }

    pub fn toggle_italic(&mut self) {
        self.toggle_mark(Mark::Italic);
    }

    pub fn toggle_underline(&mut self) {
        self.toggle_mark(Mark::Underline);
    }

    /// Toggle list membership of every block the selection touches (or the
    /// caret's block).
    pub fn toggle_list(&mut self) {
        let (start, end) = self.selection().unwrap_or((self.cursor, self.cursor));
        let range = start.block..=end.block;
        let all_items = self.doc.blocks[range.clone()]
            .iter()
            .all(|b| b.kind == BlockKind::ListItem);
        let kind = if all_items {
            BlockKind::Paragraph
        } else {
            BlockKind::ListItem
        };
        for block in &mut self.doc.blocks[range] {
            block.kind = kind;
        }
    }
}
