//! Content model and display helpers (rich text, excerpts, dates, slugs).

pub mod date;
pub mod excerpt;
pub mod post;
pub mod rich_text;
pub mod slug;

pub use date::{format_post_date, parse_timestamp};
pub use excerpt::{get_default_excerpt, get_excerpt, truncate_excerpt, DEFAULT_EXCERPT_LEN, ELLIPSIS};
pub use post::{author_identifier, category_name, Author, Category, Post, Relation, RelationTarget, User};
pub use rich_text::{extract_plain_text, extract_plain_text_seq, RichText, RichTextNode};
pub use slug::{resolve_slug, slugify};
