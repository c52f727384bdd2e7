use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

const THEME_NAME: &str = "base16-ocean.dark";

/// Syntax highlighter for code blocks in assistant responses
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let mut theme_set = ThemeSet::load_defaults();
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme: theme_set.themes.remove(THEME_NAME).unwrap_or_default(),
        }
    }

    /// Process-wide instance; loading syntax definitions is slow
    pub fn shared() -> &'static SyntaxHighlighter {
        static SHARED: OnceLock<SyntaxHighlighter> = OnceLock::new();
        SHARED.get_or_init(SyntaxHighlighter::new)
    }

    /// Highlight `code`, one output line per source line.
    ///
    /// Unknown languages fall back to plain text in the theme's foreground.
    pub fn highlight_lines(&self, code: &str, lang: &str) -> Vec<Line<'static>> {
        let lang = lang.trim();
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_name(lang))
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        let fallback = Style::default().fg(self.text_color());
        let mut lines = Vec::new();

        for source in LinesWithEndings::from(code) {
            let mut spans: Vec<Span<'static>> = Vec::new();
            match highlighter.highlight_line(source, &self.syntax_set) {
                Ok(ranges) => {
                    for (style, text) in ranges {
                        let text = text.trim_end_matches(['\n', '\r']);
                        if text.is_empty() {
                            continue;
                        }
                        let color = Self::to_ratatui_color(&style.foreground);
                        match spans.last_mut() {
                            Some(last) if last.style.fg == Some(color) => {
                                let mut merged = last.content.to_string();
                                merged.push_str(text);
                                last.content = merged.into();
                            }
                            _ => spans.push(Span::styled(text.to_string(), Style::default().fg(color))),
                        }
                    }
                }
                Err(_) => spans.push(Span::styled(source.trim_end_matches(['\n', '\r']).to_string(), fallback)),
            }
            lines.push(Line::from(spans));
        }

        lines
    }

    fn to_ratatui_color(color: &syntect::highlighting::Color) -> Color {
        Color::Rgb(color.r, color.g, color.b)
    }

    fn text_color(&self) -> Color {
        let default = syntect::highlighting::Color { r: 198, g: 200, b: 209, a: 255 };
        let color = self.theme.settings.foreground.unwrap_or(default);
        Self::to_ratatui_color(&color)
    }
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_highlighter_new() {
        let highlighter = SyntaxHighlighter::new();
        assert!(!highlighter.syntax_set.syntaxes().is_empty());
    }

    #[test]
    fn test_highlight_sql_keeps_line_count() {
        let code = "SELECT region, SUM(revenue)\nFROM sales\nGROUP BY region;";
        let lines = SyntaxHighlighter::shared().highlight_lines(code, "sql");
        assert_eq!(lines.len(), 3);

        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(first, "SELECT region, SUM(revenue)");
    }

    #[test]
    fn test_highlight_python() {
        let lines = SyntaxHighlighter::shared().highlight_lines("def hello():\n    print('Hello')", "python");
        assert_eq!(lines.len(), 2);
        assert!(!lines[1].spans.is_empty());
    }

    #[test]
    fn test_highlight_unknown_lang() {
        let lines = SyntaxHighlighter::shared().highlight_lines("some code here", "unknownlangxyz");
        let text: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "some code here");
    }

    #[test]
    fn test_text_color() {
        let color = SyntaxHighlighter::shared().text_color();
        assert!(matches!(color, Color::Rgb(_, _, _)));
    }
}
