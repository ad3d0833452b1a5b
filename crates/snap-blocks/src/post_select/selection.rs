//! The manual post select block's `selectedPosts` attribute.

use serde::{Deserialize, Serialize};

use super::draggable_list::ListItem;

/// A post picked in the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedPost {
    /// Post id, as a string.
    pub id: String,
    /// Rendered post title. May be empty.
    pub title: String,
    /// Post type slug.
    #[serde(default)]
    pub post_type: String,
}

impl SelectedPost {
    /// Create a selection entry.
    pub fn new(id: impl Into<String>, title: impl Into<String>, post_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            post_type: post_type.into(),
        }
    }

    /// The title, or `(no title)` when it is empty.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "(no title)"
        } else {
            &self.title
        }
    }
}

impl ListItem for SelectedPost {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

/// A change requested by the list UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListUpdate<T> {
    /// Append an item.
    Add(T),
    /// Remove the item with this item's id.
    Remove(T),
    /// Replace the whole list.
    Replace(Vec<T>),
}

/// The ordered `selectedPosts` attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectedPosts(Vec<SelectedPost>);

impl SelectedPosts {
    /// An empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the attribute's JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the attribute to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Posts in display order.
    pub fn posts(&self) -> &[SelectedPost] {
        &self.0
    }

    /// Number of posts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a post with this id is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|post| post.id == id)
    }

    /// Apply a list update.
    pub fn apply(&mut self, update: ListUpdate<SelectedPost>) {
        match update {
            ListUpdate::Add(post) => self.0.push(post),
            ListUpdate::Remove(post) => self.0.retain(|selected| selected.id != post.id),
            ListUpdate::Replace(posts) => self.0 = posts,
        }
    }
}

impl From<Vec<SelectedPost>> for SelectedPosts {
    fn from(posts: Vec<SelectedPost>) -> Self {
        Self(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_json_uses_camel_case() {
        let posts = SelectedPosts::from_json(r#"[{"id":"12","title":"Hello","postType":"post"}]"#).unwrap();
        assert_eq!(posts.posts()[0].post_type, "post");
        assert_eq!(
            posts.to_json().unwrap(),
            r#"[{"id":"12","title":"Hello","postType":"post"}]"#
        );
    }

    #[test]
    fn apply_updates() {
        let mut posts = SelectedPosts::new();
        posts.apply(ListUpdate::Add(SelectedPost::new("1", "One", "post")));
        posts.apply(ListUpdate::Add(SelectedPost::new("2", "", "page")));
        assert!(posts.contains("2"));

        posts.apply(ListUpdate::Remove(SelectedPost::new("1", "renamed", "post")));
        assert_eq!(posts.len(), 1);
        assert_eq!(posts.posts()[0].display_title(), "(no title)");

        posts.apply(ListUpdate::Replace(vec![]));
        assert!(posts.is_empty());
    }
}
