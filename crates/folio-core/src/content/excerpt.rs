//! Plain-text excerpts for list and detail previews.

use super::post::Post;

/// Default preview length, in characters.
pub const DEFAULT_EXCERPT_LEN: usize = 280;

/// Marker appended to truncated excerpts.
pub const ELLIPSIS: &str = "...";

/// Summarise a post's rich-text content in at most `max_len` characters.
///
/// Returns `None` when the post has no content, or when the flattened text is
/// blank. Lengths count Unicode scalar values.
///
/// When truncation is needed and `max_len` is 3 or less, no text survives and
/// the ellipsis itself is cut to `max_len` characters (`max_len == 0` yields
/// `None`).
pub fn get_excerpt(post: &Post, max_len: usize) -> Option<String> {
    let flat = post.content.as_ref()?.root_children_text()?;
    truncate_excerpt(flat.trim(), max_len)
}

/// [`get_excerpt`] with [`DEFAULT_EXCERPT_LEN`].
pub fn get_default_excerpt(post: &Post) -> Option<String> {
    get_excerpt(post, DEFAULT_EXCERPT_LEN)
}

/// Cut already-trimmed text to `max_len` characters, marking the cut.
pub fn truncate_excerpt(text: &str, max_len: usize) -> Option<String> {
    if text.is_empty() {
        return None;
    }
    if text.chars().count() <= max_len {
        return Some(text.to_string());
    }

    let marker_len = ELLIPSIS.chars().count();
    let keep = max_len.saturating_sub(marker_len);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    if max_len < marker_len {
        out = out.chars().take(max_len).collect();
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::Relation;
    use crate::content::rich_text::{RichText, RichTextNode};
    use chrono::{TimeZone, Utc};

    fn post_with(content: Option<RichText>) -> Post {
        Post {
            id: "p1".into(),
            title: "Title".into(),
            slug: "title".into(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap(),
            updated_at: None,
            content,
            category: None,
            author: Relation::Unpopulated("u1".into()),
        }
    }

    fn paragraphs(texts: &[&str]) -> Option<RichText> {
        let children = texts
            .iter()
            .map(|t| RichTextNode::container([RichTextNode::text(*t)]));
        Some(RichText::with_root(RichTextNode::container(children)))
    }

    #[test]
    fn no_content_means_no_excerpt() {
        assert_eq!(get_excerpt(&post_with(None), 280), None);
        assert_eq!(get_excerpt(&post_with(Some(RichText::default())), 280), None);
    }

    #[test]
    fn blank_content_means_no_excerpt() {
        assert_eq!(get_excerpt(&post_with(paragraphs(&["   ", ""])), 280), None);
    }

    #[test]
    fn short_text_is_returned_trimmed() {
        let p = post_with(paragraphs(&["  Hello", "world  "]));
        assert_eq!(get_excerpt(&p, 280).as_deref(), Some("Hello world"));
        assert_eq!(get_excerpt(&p, 11).as_deref(), Some("Hello world"));
    }

    #[test]
    fn long_text_is_cut_to_exact_length() {
        let body = "x".repeat(500);
        let p = post_with(paragraphs(&[&body]));
        for max in [4, 10, 120, 200, 280] {
            let out = get_excerpt(&p, max).unwrap();
            assert_eq!(out.chars().count(), max);
            assert!(out.ends_with(ELLIPSIS));
        }
        assert_eq!(get_default_excerpt(&p).unwrap().chars().count(), DEFAULT_EXCERPT_LEN);
    }

    #[test]
    fn multibyte_text_is_cut_on_char_boundaries() {
        let p = post_with(paragraphs(&["héllo wörld ünïcode"]));
        let out = get_excerpt(&p, 8).unwrap();
        assert_eq!(out, "héllo...");
    }

    #[test]
    fn tiny_limits_cut_the_marker() {
        assert_eq!(truncate_excerpt("abcdef", 3).as_deref(), Some("..."));
        assert_eq!(truncate_excerpt("abcdef", 2).as_deref(), Some(".."));
        assert_eq!(truncate_excerpt("abcdef", 0), None);
        assert_eq!(truncate_excerpt("ab", 2).as_deref(), Some("ab"));
    }

    #[test]
    fn root_children_are_read_even_when_root_has_text() {
        let p = post_with(Some(RichText::from(serde_json::json!({
            "root": { "text": "", "children": [{ "text": "hello" }] }
        }))));
        assert_eq!(get_excerpt(&p, 280).as_deref(), Some("hello"));
    }

    #[test]
    fn leaf_root_has_no_children_to_summarise() {
        let p = post_with(Some(RichText::with_root(RichTextNode::text("stray"))));
        assert_eq!(get_excerpt(&p, 280), None);
    }
}
