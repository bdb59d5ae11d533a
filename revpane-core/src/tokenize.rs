//! Syntax tokenization into the node tree consumed by the highlight splicer.
//!
//! Backed by syntect. The syntax and theme sets are process-wide `LazyLock`
//! statics so repeated tokenization does not reload the dumps.

use std::sync::LazyLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Style, ThemeSet};
use syntect::parsing::SyntaxSet;

use crate::highlight::Node;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Style carried by tokenized spans. Highlight styles passed to the splicer
/// use the same type, so spliced output stays homogeneous.
pub type TokenStyle = Style;

/// Tokenizes `content` into one node list per source line.
///
/// `ext` is the file extension used for syntax lookup; unknown extensions
/// fall back to plain text, in which case each line is a single bare
/// [`Node::Text`] leaf.
pub fn tokenize(content: &str, ext: &str) -> Vec<Vec<Node<TokenStyle>>> {
    let syntax = PS
        .find_syntax_by_extension(ext)
        .unwrap_or_else(|| PS.find_syntax_plain_text());
    let Some(theme) = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next())
    else {
        // No themes at all (unusual but possible): plain leaves.
        return content.split('\n').map(|line| vec![Node::Text(line.to_owned())]).collect();
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    content
        .split('\n')
        .map(|line| {
            let ranges = highlighter.highlight_line(line, &PS).unwrap_or_default();
            if ranges.is_empty() {
                vec![Node::Text(line.to_owned())]
            } else {
                ranges
                    .into_iter()
                    .map(|(style, text)| Node::Span {
                        style,
                        children: vec![Node::Text(text.to_owned())],
                    })
                    .collect()
            }
        })
        .collect()
}

/// Extracts the file extension from a repository-relative path.
///
/// A path with no dot yields the whole final segment, which then simply
/// misses the syntax lookup and falls back to plain text.
pub fn file_ext(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Translucent red backdrop for char-level changes on the original pane.
pub fn original_change_highlight() -> TokenStyle {
    backdrop(Color { r: 255, g: 0, b: 0, a: 26 })
}

/// Translucent green backdrop for char-level changes on the modified pane.
pub fn modified_change_highlight() -> TokenStyle {
    backdrop(Color { r: 0, g: 255, b: 0, a: 26 })
}

fn backdrop(background: Color) -> TokenStyle {
    Style { foreground: Color::WHITE, background, font_style: FontStyle::empty() }
}
