use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use super::document::{Block, ColumnAlign, Document, Inline, InlineStyle, ListItem};

/// Parse assistant Markdown into a [`Document`].
///
/// Never fails. Constructs the parser does not recognise come through as
/// literal text, and raw HTML is kept verbatim.
pub fn parse_markdown(text: &str) -> Document {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = DocumentBuilder::default();
    for event in Parser::new_ext(text, options) {
        builder.process_event(event);
    }
    builder.finish()
}

enum Container {
    Quote(Vec<Block>),
    List { ordered: bool, start: u64, items: Vec<ListItem> },
    Item(ListItem),
}

struct CodeBuffer {
    language: Option<String>,
    code: String,
}

#[derive(Default)]
struct TableBuilder {
    alignments: Vec<ColumnAlign>,
    header: Vec<Vec<Inline>>,
    rows: Vec<Vec<Vec<Inline>>>,
    row: Vec<Vec<Inline>>,
}

#[derive(Default)]
struct StyleDepth {
    strong: u16,
    emphasis: u16,
    strikethrough: u16,
}

impl StyleDepth {
    fn current(&self) -> InlineStyle {
        InlineStyle {
            bold: self.strong > 0,
            italic: self.emphasis > 0,
            code: false,
            strikethrough: self.strikethrough > 0,
        }
    }
}

#[derive(Default)]
struct DocumentBuilder {
    blocks: Vec<Block>,
    containers: Vec<Container>,
    inlines: Vec<Inline>,
    style: StyleDepth,
    links: Vec<String>,
    heading: Option<u8>,
    code: Option<CodeBuffer>,
    table: Option<TableBuilder>,
    in_html_block: bool,
}

impl DocumentBuilder {
    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                let mut style = self.style.current();
                style.code = true;
                self.push_inline(code.to_string(), style);
            }
            Event::Html(html) | Event::InlineHtml(html) => self.push_html(&html),
            Event::SoftBreak => self.push_inline(" ".to_string(), self.style.current()),
            Event::HardBreak => self.push_inline("\n".to_string(), self.style.current()),
            Event::Rule => {
                self.flush_paragraph();
                self.add_block(Block::Rule);
            }
            Event::TaskListMarker(checked) => {
                if let Some(Container::Item(item)) = self.containers.last_mut() {
                    item.checked = Some(checked);
                }
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.flush_paragraph(),
            Tag::Heading { level, .. } => {
                self.flush_paragraph();
                self.heading = Some(heading_level(level));
            }
            Tag::BlockQuote(_) => {
                self.flush_paragraph();
                self.containers.push(Container::Quote(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.flush_paragraph();
                let language = match kind {
                    CodeBlockKind::Fenced(lang) => {
                        let lang = lang.split_whitespace().next().unwrap_or("").to_string();
                        if lang.is_empty() { None } else { Some(lang) }
                    }
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBuffer { language, code: String::new() });
            }
            Tag::List(start) => {
                self.flush_paragraph();
                self.containers.push(Container::List {
                    ordered: start.is_some(),
                    start: start.unwrap_or(1),
                    items: Vec::new(),
                });
            }
            Tag::Item => {
                self.flush_paragraph();
                self.containers.push(Container::Item(ListItem::default()));
            }
            Tag::Table(alignments) => {
                self.flush_paragraph();
                self.table = Some(TableBuilder {
                    alignments: alignments.into_iter().map(column_align).collect(),
                    ..TableBuilder::default()
                });
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => self.inlines.clear(),
            Tag::Emphasis => self.style.emphasis += 1,
            Tag::Strong => self.style.strong += 1,
            Tag::Strikethrough => self.style.strikethrough += 1,
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => self.links.push(dest_url.to_string()),
            Tag::HtmlBlock => {
                self.flush_paragraph();
                self.in_html_block = true;
            }
            _ => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush_paragraph(),
            TagEnd::Heading(_) => {
                let level = self.heading.take().unwrap_or(1);
                let content = std::mem::take(&mut self.inlines);
                self.add_block(Block::Heading { level, content });
            }
            TagEnd::BlockQuote(_) => {
                self.flush_paragraph();
                if let Some(Container::Quote(blocks)) = self.containers.pop() {
                    self.add_block(Block::Quote(blocks));
                }
            }
            TagEnd::CodeBlock => {
                if let Some(CodeBuffer { language, mut code }) = self.code.take() {
                    if code.ends_with('\n') {
                        code.pop();
                    }
                    self.add_block(Block::CodeBlock { language, code });
                }
            }
            TagEnd::List(_) => {
                self.flush_paragraph();
                if let Some(Container::List { ordered, start, items }) = self.containers.pop() {
                    self.add_block(Block::List { ordered, start, items });
                }
            }
            TagEnd::Item => {
                self.flush_paragraph();
                if let Some(Container::Item(item)) = self.containers.pop() {
                    match self.containers.last_mut() {
                        Some(Container::List { items, .. }) => items.push(item),
                        _ => self.blocks.extend(item.blocks),
                    }
                }
            }
            TagEnd::TableCell => {
                let cell = std::mem::take(&mut self.inlines);
                if let Some(table) = self.table.as_mut() {
                    table.row.push(cell);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.add_block(Block::Table { alignments: table.alignments, header: table.header, rows: table.rows });
                }
            }
            TagEnd::Emphasis => self.style.emphasis = self.style.emphasis.saturating_sub(1),
            TagEnd::Strong => self.style.strong = self.style.strong.saturating_sub(1),
            TagEnd::Strikethrough => self.style.strikethrough = self.style.strikethrough.saturating_sub(1),
            TagEnd::Link | TagEnd::Image => {
                self.links.pop();
            }
            TagEnd::HtmlBlock => {
                self.in_html_block = false;
                self.flush_paragraph();
            }
            _ => {}
        }
    }

    fn push_text(&mut self, text: &str) {
        if let Some(code) = self.code.as_mut() {
            code.code.push_str(text);
            return;
        }
        self.push_inline(text.to_string(), self.style.current());
    }

    fn push_html(&mut self, html: &str) {
        let text = html.trim_end_matches('\n');
        if self.in_html_block && !self.inlines.is_empty() {
            self.push_inline("\n".to_string(), InlineStyle::default());
        }
        self.push_inline(text.to_string(), self.style.current());
    }

    /// Append a run, merging with the previous one when nothing changes.
    fn push_inline(&mut self, text: String, style: InlineStyle) {
        if text.is_empty() {
            return;
        }
        let link = self.links.last().cloned();

        if let Some(last) = self.inlines.last_mut()
            && last.style == style
            && last.link == link
        {
            last.text.push_str(&text);
            return;
        }
        self.inlines.push(Inline { text, style, link });
    }

    fn flush_paragraph(&mut self) {
        if self.inlines.is_empty() {
            return;
        }
        let inlines = std::mem::take(&mut self.inlines);
        if inlines.iter().all(|inline| inline.text.trim().is_empty()) {
            return;
        }
        self.add_block(Block::Paragraph(inlines));
    }

    fn add_block(&mut self, block: Block) {
        match self.containers.last_mut() {
            Some(Container::Quote(blocks)) => blocks.push(block),
            Some(Container::Item(item)) => item.blocks.push(block),
            Some(Container::List { items, .. }) => items.push(ListItem { checked: None, blocks: vec![block] }),
            None => self.blocks.push(block),
        }
    }

    fn finish(mut self) -> Document {
        if let Some(CodeBuffer { language, code }) = self.code.take() {
            self.add_block(Block::CodeBlock { language, code });
        }
        self.flush_paragraph();

        while let Some(container) = self.containers.pop() {
            let block = match container {
                Container::Quote(blocks) => Block::Quote(blocks),
                Container::List { ordered, start, items } => Block::List { ordered, start, items },
                Container::Item(item) => Block::List { ordered: false, start: 1, items: vec![item] },
            };
            self.add_block(block);
        }

        Document { blocks: self.blocks }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn column_align(alignment: Alignment) -> ColumnAlign {
    match alignment {
        Alignment::None => ColumnAlign::None,
        Alignment::Left => ColumnAlign::Left,
        Alignment::Center => ColumnAlign::Center,
        Alignment::Right => ColumnAlign::Right,
    }
}
