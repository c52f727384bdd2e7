//! Pure transform from message text to displayable structure.
//!
//! User text is never interpreted. Assistant text is Markdown and becomes a
//! [`Document`]. Nothing here does I/O or fails.

mod document;
mod parser;

pub use document::{Block, ColumnAlign, Document, Inline, InlineStyle, ListItem, inline_text};
pub use parser::parse_markdown;

use crate::transcript::{Message, Role};

/// Displayable form of one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Shown verbatim
    Plain(String),
    /// Parsed assistant response
    Structured(Document),
}

impl Content {
    pub fn to_plain_text(&self) -> String {
        match self {
            Content::Plain(text) => text.clone(),
            Content::Structured(document) => document.to_plain_text(),
        }
    }
}

pub fn render_message(message: &Message) -> Content {
    match message.role() {
        Role::User => Content::Plain(message.text().to_string()),
        Role::Assistant => Content::Structured(parse_markdown(message.text())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_text_is_verbatim() {
        let table_like = "| a | b |\n|---|---|\n| 1 | 2 |";
        let content = render_message(&Message::user(table_like));
        assert_eq!(content, Content::Plain(table_like.to_string()));
    }

    #[test]
    fn test_assistant_text_is_structured() {
        let content = render_message(&Message::assistant("| a | b |\n|---|---|\n| 1 | 2 |"));
        let Content::Structured(doc) = content else {
            panic!("assistant content should be structured");
        };
        assert!(matches!(doc.blocks[0], Block::Table { .. }));
    }

    #[test]
    fn test_plain_projection() {
        assert_eq!(render_message(&Message::user("**hi**")).to_plain_text(), "**hi**");
        assert_eq!(render_message(&Message::assistant("**hi**")).to_plain_text(), "hi");
    }
}
