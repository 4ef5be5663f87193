use ratatui::style::{Color, Modifier, Style};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style as SyntectStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

/// A classified run of characters within one line. Spans concatenate back to
/// exactly the input text.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSpan {
    pub text: String,
    pub style: Style,
}

impl HighlightSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default(),
        }
    }
}

/// Maps one line of source text plus a language id to classified spans.
/// Implementations must be deterministic for identical inputs and must never
/// drop content; on any internal failure the whole line comes back as a
/// single unstyled span.
pub trait Highlighter {
    fn highlight(&self, text: &str, language: &str) -> Vec<HighlightSpan>;
}

/// Syntect-backed highlighter over the bundled syntax and theme sets. Each
/// line is highlighted independently so output depends only on the
/// `(text, language)` pair.
pub struct SyntectHighlighter {
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    pub fn new(theme_name: &str) -> Option<Self> {
        let theme_set = ThemeSet::load_defaults();
        let theme = theme_set.themes.get(theme_name)?.clone();
        Some(Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
        })
    }

    pub fn theme_names() -> Vec<String> {
        ThemeSet::load_defaults().themes.keys().cloned().collect()
    }

    fn syntax_for(&self, language: &str) -> Option<&SyntaxReference> {
        // TypeScript isn't in the default syntect set, fall back to
        // JavaScript for it.
        match language {
            "ts" | "tsx" => self
                .syntax_set
                .find_syntax_by_extension("js")
                .or_else(|| self.syntax_set.find_syntax_by_name("JavaScript")),
            "jsx" => self.syntax_set.find_syntax_by_extension("js"),
            "cc" | "cxx" => self.syntax_set.find_syntax_by_extension("cpp"),
            "hpp" => self.syntax_set.find_syntax_by_extension("h"),
            other => self
                .syntax_set
                .find_syntax_by_extension(other)
                .or_else(|| self.syntax_set.find_syntax_by_token(other)),
        }
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, text: &str, language: &str) -> Vec<HighlightSpan> {
        let Some(syntax) = self.syntax_for(language) else {
            return vec![HighlightSpan::plain(text)];
        };

        let mut highlighter = HighlightLines::new(syntax, &self.theme);
        match highlighter.highlight_line(text, &self.syntax_set) {
            Ok(ranges) => ranges
                .into_iter()
                .map(|(style, chunk)| HighlightSpan {
                    text: chunk.to_string(),
                    style: syntect_style_to_ratatui(style),
                })
                .collect(),
            Err(_) => vec![HighlightSpan::plain(text)],
        }
    }
}

/// No-op highlighter used for `--plain` mode and in tests.
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, text: &str, _language: &str) -> Vec<HighlightSpan> {
        vec![HighlightSpan::plain(text)]
    }
}

fn syntect_style_to_ratatui(syntect_style: SyntectStyle) -> Style {
    let fg_color = Color::Rgb(
        syntect_style.foreground.r,
        syntect_style.foreground.g,
        syntect_style.foreground.b,
    );

    let mut style = Style::default().fg(fg_color);

    if syntect_style
        .font_style
        .contains(syntect::highlighting::FontStyle::BOLD)
    {
        style = style.add_modifier(Modifier::BOLD);
    }
    if syntect_style
        .font_style
        .contains(syntect::highlighting::FontStyle::ITALIC)
    {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if syntect_style
        .font_style
        .contains(syntect::highlighting::FontStyle::UNDERLINE)
    {
        style = style.add_modifier(Modifier::UNDERLINED);
    }

    style
}
