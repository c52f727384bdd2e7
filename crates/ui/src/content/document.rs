use unicode_width::UnicodeWidthStr;

/// Inline emphasis flags carried by a run of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub strikethrough: bool,
}

/// A run of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inline {
    pub text: String,
    pub style: InlineStyle,
    /// Link target when the run is (part of) a link
    pub link: Option<String>,
}

impl Inline {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), style: InlineStyle::default(), link: None }
    }

    pub fn is_link(&self) -> bool {
        self.link.is_some()
    }
}

/// Column alignment of a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColumnAlign {
    #[default]
    None,
    Left,
    Center,
    Right,
}

/// One entry of a list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
    /// `Some` for task list items
    pub checked: Option<bool>,
    pub blocks: Vec<Block>,
}

/// Block-level element of a rendered response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    List { ordered: bool, start: u64, items: Vec<ListItem> },
    Quote(Vec<Block>),
    CodeBlock { language: Option<String>, code: String },
    Table { alignments: Vec<ColumnAlign>, header: Vec<Vec<Inline>>, rows: Vec<Vec<Vec<Inline>>> },
    Rule,
}

/// Structured form of an assistant response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Concatenate the text of inline runs, ignoring style.
pub fn inline_text(inlines: &[Inline]) -> String {
    inlines.iter().map(|inline| inline.text.as_str()).collect()
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render for a non-interactive sink such as a pipe or log.
    ///
    /// Blocks are separated by a blank line, tables become padded
    /// `|`-separated columns and code is indented by four spaces.
    pub fn to_plain_text(&self) -> String {
        let mut out = Vec::new();
        for block in &self.blocks {
            out.push(block_plain(block, 0).join("\n"));
        }
        out.join("\n\n")
    }
}

fn inline_plain(inlines: &[Inline]) -> String {
    let mut text = String::new();
    let mut iter = inlines.iter().peekable();

    while let Some(inline) = iter.next() {
        text.push_str(&inline.text);
        if let Some(url) = &inline.link {
            let link_continues = iter.peek().is_some_and(|next| next.link.as_ref() == Some(url));
            if !link_continues && inline.text != *url {
                text.push_str(&format!(" ({})", url));
            }
        }
    }
    text
}

fn block_plain(block: &Block, depth: usize) -> Vec<String> {
    match block {
        Block::Paragraph(inlines) => inline_plain(inlines).lines().map(str::to_string).collect(),
        Block::Heading { content, .. } => vec![inline_plain(content)],
        Block::Rule => vec!["---".to_string()],
        Block::CodeBlock { code, .. } => code.lines().map(|line| format!("    {}", line)).collect(),
        Block::Quote(blocks) => blocks
            .iter()
            .flat_map(|inner| block_plain(inner, depth))
            .map(|line| if line.is_empty() { ">".to_string() } else { format!("> {}", line) })
            .collect(),
        Block::List { ordered, start, items } => {
            let indent = "  ".repeat(depth);
            let mut lines = Vec::new();
            for (idx, item) in items.iter().enumerate() {
                let mut marker = if *ordered { format!("{}. ", start + idx as u64) } else { "- ".to_string() };
                if let Some(checked) = item.checked {
                    marker.push_str(if checked { "[x] " } else { "[ ] " });
                }

                let mut first = true;
                for inner in &item.blocks {
                    let nested = matches!(inner, Block::List { .. });
                    for line in block_plain(inner, depth + 1) {
                        if nested {
                            lines.push(line);
                        } else if first {
                            lines.push(format!("{}{}{}", indent, marker, line));
                            first = false;
                        } else {
                            lines.push(format!("{}{}{}", indent, " ".repeat(marker.width()), line));
                        }
                    }
                }
                if first {
                    lines.push(format!("{}{}", indent, marker.trim_end()));
                }
            }
            lines
        }
        Block::Table { header, rows, .. } => table_plain(header, rows),
    }
}

fn table_plain(header: &[Vec<Inline>], rows: &[Vec<Vec<Inline>>]) -> Vec<String> {
    let header: Vec<String> = header.iter().map(|cell| inline_plain(cell)).collect();
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| inline_plain(cell)).collect())
        .collect();

    let columns = rows.iter().map(Vec::len).chain(std::iter::once(header.len())).max().unwrap_or(0);
    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.width());
        }
    }

    let format_row = |cells: &[String]| -> String {
        let mut line = String::from("|");
        for (idx, width) in widths.iter().enumerate() {
            let cell = cells.get(idx).map(String::as_str).unwrap_or("");
            line.push(' ');
            line.push_str(cell);
            line.push_str(&" ".repeat(width.saturating_sub(cell.width())));
            line.push_str(" |");
        }
        line
    };

    let mut lines = vec![format_row(&header)];
    let mut separator = String::from("|");
    for width in &widths {
        separator.push_str(&"-".repeat(width + 2));
        separator.push('|');
    }
    lines.push(separator);
    lines.extend(rows.iter().map(|row| format_row(row)));
    lines
}
