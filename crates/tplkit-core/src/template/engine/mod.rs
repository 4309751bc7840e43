//! Substitution engine
//!
//! Pure functions over the template buffer. Each one takes the text as
//! `&mut String` so the stages can be driven and tested without storage.
//! All caller values pass through HTML entity encoding before insertion;
//! the only raw insertion is the numeric loop index of [`FieldValue::Index`].

mod value;

pub use value::{FieldValue, ForEachInput, IndexBase, Row};

use std::borrow::Cow;

use super::grammar::{self, BlockKind, COMMENT, VALUE_MARKER};
use crate::error::{Result, TplkitError};

/// HTML entity encoding applied to every literal value.
///
/// Covers `& < > " '`, with the apostrophe written as `&#039;`. Non-ASCII
/// text is left as UTF-8 rather than turned into named entities.
pub fn encode(value: &str) -> Cow<'_, str> {
    match html_escape::encode_quoted_attribute(value) {
        Cow::Owned(encoded) if encoded.contains("&#x27;") => {
            Cow::Owned(encoded.replace("&#x27;", "&#039;"))
        }
        encoded => encoded,
    }
}

/// Check a `set` parameter name: letters, digits and dots, no leading,
/// trailing or doubled dot.
pub fn validate_parameter_name(name: &str) -> Result<()> {
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        return Err(invalid_name(
            name,
            "template parameters can only contain letters, numbers and dots",
        ));
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err(invalid_name(
            name,
            "template parameters can not start or end with a dot",
        ));
    }
    if name.contains("..") {
        let expected = collapse_dots(name);
        return Err(invalid_name(
            name,
            &format!("expected \"{}\" not \"{}\"", expected, name),
        ));
    }
    Ok(())
}

fn collapse_dots(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c == '.' && out.ends_with('.') {
            continue;
        }
        out.push(c);
    }
    out
}

fn invalid_name(name: &str, reason: &str) -> TplkitError {
    TplkitError::InvalidParameterName {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}

/// Replace every `<!--[name]-->` with the encoded value.
///
/// An empty name is a no-op. An invalid name fails before the text is touched.
pub fn set(text: &mut String, name: &str, value: &str) -> Result<()> {
    if name.is_empty() {
        return Ok(());
    }
    validate_parameter_name(name)?;

    let marker = grammar::inline_marker(name);
    if text.contains(&marker) {
        *text = text.replace(&marker, &encode(value));
    }
    Ok(())
}

/// Expand the `for` block `name` once per value, in order.
///
/// Returns `false` (text untouched) when the block does not exist.
pub fn for_values<I>(text: &mut String, name: &str, values: I) -> bool
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let Some(block) = grammar::find_block(text, BlockKind::For, name) else {
        return false;
    };

    let body = &text[block.body.clone()];
    let expanded: String = values
        .into_iter()
        .map(|value| body.replace(VALUE_MARKER, &encode(value.as_ref())))
        .collect();

    text.replace_range(block.range, &expanded);
    true
}

/// Expand the `forEach` block `name` once per row, replacing `<!--{key}-->`
/// for every field of the row.
///
/// Returns `false` (text untouched) when the block does not exist.
pub fn for_each(text: &mut String, name: &str, input: &ForEachInput) -> bool {
    let Some(block) = grammar::find_block(text, BlockKind::ForEach, name) else {
        return false;
    };

    let body = &text[block.body.clone()];
    let expanded: String = input
        .rows()
        .iter()
        .enumerate()
        .map(|(i, row)| render_row(body, i, row))
        .collect();

    text.replace_range(block.range, &expanded);
    true
}

fn render_row(body: &str, index: usize, row: &Row) -> String {
    row.fields().fold(body.to_string(), |copy, (key, value)| {
        let replacement = match value {
            FieldValue::Literal(s) => encode(s).into_owned(),
            FieldValue::Index(IndexBase::ZeroBased) => index.to_string(),
            FieldValue::Index(IndexBase::OneBased) => (index + 1).to_string(),
        };
        copy.replace(&grammar::field_marker(key), &replacement)
    })
}

/// Remove every comment-shaped span, including unresolved markers
pub fn strip_comments(text: &mut String) {
    let stripped = COMMENT.replace_all(text, "").into_owned();
    *text = stripped;
}

#[cfg(test)]
mod tests;
