//! Placeholder markers
//!
//! Every marker is shaped like an HTML comment so anything left unresolved
//! disappears from the page and is removed by comment stripping:
//!
//! | marker                   | meaning                         |
//! |--------------------------|---------------------------------|
//! | `<!--[name]-->`          | scalar set by `set`             |
//! | `<!--include[name]-->`   | splice another template         |
//! | `<!--for[name]-->`       | open a `for` block              |
//! | `<!--forEach[name]-->`   | open a `forEach` block          |
//! | `<!--end[name]-->`       | close either block              |
//! | `<!--{key}-->`           | field inside a block copy       |

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

/// Value marker used inside `for` blocks
pub const VALUE_MARKER: &str = "<!--{value}-->";

/// Include directive; the name excludes brackets and quotes
pub(crate) static INCLUDE_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<!--include\[([^\[\]"']+)\]-->"#).expect("include pattern is valid")
});

/// Any comment-shaped span, shortest match, across lines
pub(crate) static COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

pub fn inline_marker(name: &str) -> String {
    format!("<!--[{}]-->", name)
}

pub fn field_marker(key: &str) -> String {
    format!("<!--{{{}}}-->", key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    For,
    ForEach,
}

impl BlockKind {
    fn keyword(self) -> &'static str {
        match self {
            BlockKind::For => "for",
            BlockKind::ForEach => "forEach",
        }
    }

    pub fn open_marker(self, name: &str) -> String {
        format!("<!--{}[{}]-->", self.keyword(), name)
    }

    pub fn close_marker(name: &str) -> String {
        format!("<!--end[{}]-->", name)
    }
}

/// A located block: `range` spans both delimiters, `body` only the inner text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub range: Range<usize>,
    pub body: Range<usize>,
}

/// Find the block `name` of the given kind.
///
/// Matching is greedy: the block runs from the first opening marker to the
/// last closing marker after it, and the body must not be empty.
pub fn find_block(text: &str, kind: BlockKind, name: &str) -> Option<Block> {
    let open = kind.open_marker(name);
    let close = BlockKind::close_marker(name);

    let start = text.find(&open)?;
    let body_start = start + open.len();
    // at least one byte of body
    let search_from = text[body_start..]
        .chars()
        .next()
        .map(|c| body_start + c.len_utf8())?;
    let body_end = search_from + text[search_from..].rfind(&close)?;

    Some(Block {
        range: start..body_end + close.len(),
        body: body_start..body_end,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(inline_marker("user.name"), "<!--[user.name]-->");
        assert_eq!(field_marker("title"), "<!--{title}-->");
        assert_eq!(BlockKind::ForEach.open_marker("rows"), "<!--forEach[rows]-->");
        assert_eq!(BlockKind::close_marker("rows"), "<!--end[rows]-->");
    }

    #[test]
    fn test_find_block_inline() {
        let text = "a<!--for[items]-->[x]<!--end[items]-->b";
        let block = find_block(text, BlockKind::For, "items").unwrap();
        assert_eq!(&text[block.range.clone()], "<!--for[items]-->[x]<!--end[items]-->");
        assert_eq!(&text[block.body], "[x]");
    }

    #[test]
    fn test_find_block_multiline_greedy() {
        let text = "<!--for[i]-->\n1\n<!--end[i]-->\nmid\n<!--end[i]-->tail";
        let block = find_block(text, BlockKind::For, "i").unwrap();
        assert_eq!(&text[block.body], "\n1\n<!--end[i]-->\nmid\n");
        assert_eq!(&text[block.range.end..], "tail");
    }

    #[test]
    fn test_find_block_requires_body() {
        assert!(find_block("<!--for[i]--><!--end[i]-->", BlockKind::For, "i").is_none());
    }

    #[test]
    fn test_find_block_kind_must_match() {
        let text = "<!--forEach[i]-->x<!--end[i]-->";
        assert!(find_block(text, BlockKind::For, "i").is_none());
        assert!(find_block(text, BlockKind::ForEach, "i").is_some());
    }

    #[test]
    fn test_find_block_missing_close() {
        assert!(find_block("<!--for[i]-->body", BlockKind::For, "i").is_none());
    }

    #[test]
    fn test_include_directive_rejects_quotes() {
        let text = "<!--include[ok]--><!--include[\"bad\"]--><!--include[a[b]-->";
        let names: Vec<&str> = INCLUDE_DIRECTIVE
            .captures_iter(text)
            .map(|c| c.get(1).map_or("", |m| m.as_str()))
            .collect();
        assert_eq!(names, vec!["ok"]);
    }

    #[test]
    fn test_comment_is_lazy_and_multiline() {
        let out = COMMENT.replace_all("a<!--x\ny-->b<!--z-->c", "");
        assert_eq!(out, "abc");
    }
}
