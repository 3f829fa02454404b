/// An inline formatting attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
}

impl Mark {
    /// Canonical nesting order used when serializing
    pub const ALL: [Mark; 3] = [Mark::Bold, Mark::Italic, Mark::Underline];

    /// Tag emitted for this mark
    pub fn tag(self) -> &'static str {
        match self {
            Mark::Bold => "b",
            Mark::Italic => "i",
            Mark::Underline => "u",
        }
    }
}

/// The set of marks carried by a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Marks {
    pub fn has(self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
        }
    }

    pub fn with(mut self, mark: Mark, on: bool) -> Marks {
        match mark {
            Mark::Bold => self.bold = on,
            Mark::Italic => self.italic = on,
            Mark::Underline => self.underline = on,
        }
        self
    }
}

/// A maximal stretch of text sharing one mark set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub marks: Marks,
}

impl Run {
    pub fn new(text: impl Into<String>, marks: Marks) -> Self {
        Run {
            text: text.into(),
            marks,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Run::new(text, Marks::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    ListItem,
}

/// One line of the document: a paragraph or an unordered-list item.
///
/// Offsets passed to block methods are byte offsets into [`Block::text`] and
/// must fall on char boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub kind: BlockKind,
    pub runs: Vec<Run>,
}

impl Block {
    pub fn new(kind: BlockKind) -> Self {
        Block {
            kind,
            runs: Vec::new(),
        }
    }

    pub fn with_runs(kind: BlockKind, runs: Vec<Run>) -> Self {
        let mut block = Block { kind, runs };
        block.normalize();
        block
    }

    pub fn paragraph(text: &str) -> Self {
        Block::with_runs(BlockKind::Paragraph, vec![Run::plain(text)])
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.runs.iter().map(|r| r.text.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.is_empty())
    }

    /// Drop empty runs and merge neighbours with identical marks
    pub fn normalize(&mut self) {
        let mut merged: Vec<Run> = Vec::with_capacity(self.runs.len());
        for run in self.runs.drain(..) {
            if run.text.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(last) if last.marks == run.marks => last.text.push_str(&run.text),
                _ => merged.push(run),
            }
        }
        self.runs = merged;
    }

    /// Ensure a run boundary at `offset` and return the index of the run
    /// starting there (`runs.len()` when `offset` is at the end).
    fn split_at(&mut self, offset: usize) -> usize {
        let mut start = 0;
        for i in 0..self.runs.len() {
            let len = self.runs[i].text.len();
            if offset == start {
                return i;
            }
            if offset < start + len {
                let tail = self.runs[i].text.split_off(offset - start);
                let marks = self.runs[i].marks;
                self.runs.insert(i + 1, Run::new(tail, marks));
                return i + 1;
            }
            start += len;
        }
        self.runs.len()
    }

    pub fn insert_str(&mut self, offset: usize, text: &str, marks: Marks) {
        if text.is_empty() {
            return;
        }
        let idx = self.split_at(offset);
        self.runs.insert(idx, Run::new(text, marks));
        self.normalize();
    }

    pub fn delete_range(&mut self, start: usize, end: usize) {
        if start >= end {
            return;
        }
        let a = self.split_at(start);
        let b = self.split_at(end);
        self.runs.drain(a..b);
        self.normalize();
    }

    /// Split this block at `offset`, returning the tail as a block of the same kind
    pub fn split_off(&mut self, offset: usize) -> Block {
        let idx = self.split_at(offset);
        let tail = self.runs.split_off(idx);
        self.normalize();
        Block::with_runs(self.kind, tail)
    }

    pub fn append(&mut self, other: Block) {
        self.runs.extend(other.runs);
        self.normalize();
    }

    /// Marks that text typed at `offset` continues: those of the character
    /// just before it, or of the first character at the block start.
    pub fn marks_at(&self, offset: usize) -> Marks {
        let mut start = 0;
        for run in &self.runs {
            let end = start + run.text.len();
            if offset > start && offset <= end {
                return run.marks;
            }
            start = end;
        }
        self.runs.first().map(|r| r.marks).unwrap_or_default()
    }

    /// Whether every character in `start..end` carries `mark`.
    /// `None` when the range covers no characters.
    pub fn range_has_mark(&self, start: usize, end: usize, mark: Mark) -> Option<bool> {
        if start >= end {
            return None;
        }
        let mut covered = false;
        let mut pos = 0;
        for run in &self.runs {
            let run_end = pos + run.text.len();
            if pos < end && run_end > start {
                covered = true;
                if !run.marks.has(mark) {
                    return Some(false);
                }
            }
            pos = run_end;
        }
        covered.then_some(true)
    }

    pub fn set_mark(&mut self, start: usize, end: usize, mark: Mark, on: bool) {
        if start >= end {
            return;
        }
        let a = self.split_at(start);
        let b = self.split_at(end);
        for run in &mut self.runs[a..b] {
            run.marks = run.marks.with(mark, on);
        }
        self.normalize();
    }
}

/// A description's structured content. Always holds at least one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            blocks: vec![Block::new(BlockKind::Paragraph)],
        }
    }
}

impl Document {
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            Document::default()
        } else {
            Document { blocks }
        }
    }

    /// True when no block holds any text
    pub fn is_blank(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }

    /// Block texts joined with newlines
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BOLD: Marks = Marks {
        bold: true,
        italic: false,
        underline: false,
    };

    #[test]
    fn test_normalize_merges_equal_neighbours() {
        let block = Block::with_runs(
            BlockKind::Paragraph,
            vec![
                Run::plain("ab"),
                Run::plain(""),
                Run::plain("cd"),
                Run::new("ef", BOLD),
            ],
        );
        assert_eq!(block.runs, vec![Run::plain("abcd"), Run::new("ef", BOLD)]);
    }

    #[test]
    fn test_set_mark_splits_runs() {
        let mut block = Block::paragraph("hello world");
        block.set_mark(0, 5, Mark::Bold, true);
        assert_eq!(
            block.runs,
            vec![Run::new("hello", BOLD), Run::plain(" world")]
        );
        block.set_mark(0, 5, Mark::Bold, false);
        assert_eq!(block.runs, vec![Run::plain("hello world")]);
    }

    #[test]
    fn test_range_has_mark_ignores_runs_outside_range() {
        let mut block = Block::paragraph("hello world");
        block.set_mark(0, 5, Mark::Bold, true);
        assert_eq!(block.range_has_mark(1, 4, Mark::Bold), Some(true));
        assert_eq!(block.range_has_mark(3, 8, Mark::Bold), Some(false));
        assert_eq!(block.range_has_mark(3, 3, Mark::Bold), None);
    }

    #[test]
    fn test_marks_at_follows_preceding_character() {
        let mut block = Block::paragraph("ab");
        block.set_mark(0, 1, Mark::Italic, true);
        assert!(block.marks_at(0).italic);
        assert!(block.marks_at(1).italic);
        assert!(!block.marks_at(2).italic);
    }

    #[test]
    fn test_split_and_append_preserve_marks() {
        let mut block = Block::paragraph("hello");
        block.set_mark(1, 4, Mark::Underline, true);
        let tail = block.split_off(2);
        assert_eq!(block.text(), "he");
        assert_eq!(tail.text(), "llo");
        assert!(tail.runs[0].marks.underline);
        block.append(tail);
        assert_eq!(block.text(), "hello");
        assert_eq!(block.runs.len(), 3);
    }

    #[test]
    fn test_delete_range_across_runs() {
        let mut block = Block::paragraph("abcdef");
        block.set_mark(2, 4, Mark::Bold, true);
        block.delete_range(1, 5);
        assert_eq!(block.runs, vec![Run::plain("af")]);
    }

    #[test]
    fn test_default_document_is_one_empty_paragraph() {
        let doc = Document::default();
        assert_eq!(doc.blocks.len(), 1);
        assert!(doc.is_blank());
        assert_eq!(Document::from_blocks(Vec::new()), doc);
    }
}
