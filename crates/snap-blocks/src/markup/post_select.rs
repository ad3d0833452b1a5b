//! Markup of the manual post select block.

use snap_blocks_style::selector::SelectorList;

use super::{MarkupError, MarkupWriter};
use crate::dom::{Document, DomError, NodeId};
use crate::post_select::SelectedPost;

const PLACEHOLDER: &str = "Pick your posts to show in the sidebar.";

/// Render the selected posts, or a placeholder when there are none.
///
/// ```
/// use snap_blocks::markup::render_selected_posts;
/// use snap_blocks::post_select::SelectedPost;
///
/// let html = render_selected_posts(&[SelectedPost::new("7", "", "page")]).unwrap();
/// assert!(html.contains(r#"<article class="selected-post" data-post-id="7" data-post-type="page"><h3>(no title)</h3></article>"#));
/// ```
pub fn render_selected_posts(posts: &[SelectedPost]) -> Result<String, MarkupError> {
    let mut out = MarkupWriter::new();
    out.start("div", &[("class", "wp-block-snap-manual-post-select")])?;

    if posts.is_empty() {
        out.start("div", &[])?;
        out.text(PLACEHOLDER)?;
        out.end("div")?;
    }
    for post in posts {
        out.start(
            "article",
            &[
                ("class", "selected-post"),
                ("data-post-id", post.id.as_str()),
                ("data-post-type", post.post_type.as_str()),
            ],
        )?;
        out.start("h3", &[])?;
        out.text(post.display_title())?;
        out.end("h3")?;
        out.end("article")?;
    }

    out.end("div")?;
    Ok(out.finish())
}

/// Read selected posts back from rendered markup under `scope`.
pub fn selected_posts_from_document(
    document: &Document,
    scope: NodeId,
) -> Result<Vec<SelectedPost>, MarkupError> {
    let articles = SelectorList::parse("article.selected-post").map_err(DomError::from)?;
    let titles = SelectorList::parse("h3").map_err(DomError::from)?;

    document
        .select_all(scope, &articles)
        .into_iter()
        .enumerate()
        .map(|(index, article)| -> Result<SelectedPost, MarkupError> {
            let id = document
                .attribute(article, "data-post-id")
                .filter(|id| !id.is_empty())
                .ok_or(MarkupError::MissingPostId { index })?;
            let title = document
                .select_all(article, &titles)
                .first()
                .map(|&h3| document.text_content(h3))
                .unwrap_or_default();
            let post_type = document.attribute(article, "data-post-type").unwrap_or_default();
            Ok(SelectedPost::new(id, title, post_type))
        })
        .collect()
}
