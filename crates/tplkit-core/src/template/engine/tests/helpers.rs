//! Shared test helpers for engine tests

use super::{ForEachInput, IndexBase, Row};

/// Table rows with a zero-based and a one-based index column
pub(super) fn indexed_rows() -> ForEachInput {
    ForEachInput::Rows(vec![
        Row::new()
            .field("n", IndexBase::ZeroBased)
            .field("pos", IndexBase::OneBased)
            .field("title", "Intro"),
        Row::new()
            .field("n", IndexBase::ZeroBased)
            .field("pos", IndexBase::OneBased)
            .field("title", "Usage"),
    ])
}

/// Page fragment with every marker kind
pub(super) fn page() -> String {
    concat!(
        "<h1><!--[page.title]--></h1>\n",
        "<ul><!--for[tags]--><li><!--{value}--></li><!--end[tags]--></ul>\n",
        "<!--forEach[toc]--><a href=\"#s<!--{n}-->\"><!--{pos}-->. <!--{title}--></a>\n<!--end[toc]-->",
    )
    .to_string()
}
