//! Rich-text descriptions: a small document model over a restricted markup
//! vocabulary (`<b>`, `<i>`, `<u>`, `<ul><li>`, `<p>`), its parser and
//! serializer, and the editable buffer used during an edit session.

mod buffer;
mod document;
mod parse;
mod serialize;

pub use buffer::{Pos, RichTextBuffer};
pub use document::{Block, BlockKind, Document, Mark, Marks, Run};
pub use parse::parse;
pub use serialize::to_markup;
