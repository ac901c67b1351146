//! Blog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, Query, State};
use bakehouse_components::{PageLinks, Pagination};
use bakehouse_core::{ListPage, PaginationState};
use tracing::instrument;

use crate::backend::BlogPost;
use crate::error::Result;
use crate::filters;
use crate::middleware::SignedIn;
use crate::routes::PageQuery;
use crate::state::AppState;

/// Posts shown per blog page.
pub const POSTS_PER_PAGE: u64 = 6;

/// Characters of body text shown in a post excerpt.
const EXCERPT_CHARS: usize = 180;

/// Post view for templates.
#[derive(Debug, Clone)]
pub struct PostCard {
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub image: String,
    pub published: String,
}

impl From<BlogPost> for PostCard {
    fn from(post: BlogPost) -> Self {
        Self {
            href: post.href(),
            excerpt: excerpt(&post.content, EXCERPT_CHARS),
            image: post.blog_image.unwrap_or_default(),
            published: post
                .created_at
                .map(|at| at.format("%B %-d, %Y").to_string())
                .unwrap_or_default(),
            title: post.title,
        }
    }
}

/// Blog index page template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
pub struct BlogIndexTemplate {
    pub posts: Vec<PostCard>,
    pub pagination_html: String,
    pub signed_in: bool,
    pub error: String,
}

/// Single post template.
#[derive(Template, WebTemplate)]
#[template(path = "blog/show.html")]
pub struct BlogShowTemplate {
    pub post: PostCard,
    pub paragraphs: Vec<String>,
    pub signed_in: bool,
    pub error: String,
}

/// Display the blog index.
#[instrument(skip(state, signed_in))]
pub async fn index(
    State(state): State<AppState>,
    SignedIn(signed_in): SignedIn,
    Query(query): Query<PageQuery>,
) -> BlogIndexTemplate {
    let page = query.page();

    let (listing, error) = match state.bakery().blogs(page, POSTS_PER_PAGE).await {
        Ok(listing) => (listing, String::new()),
        Err(e) => {
            tracing::error!(error = %e, page, "Failed to fetch blog posts");
            (
                ListPage::empty(),
                "We couldn't load the blog right now.".to_string(),
            )
        }
    };

    let pagination = Pagination::new(
        PaginationState::new(page, POSTS_PER_PAGE, listing.total_count),
        &PageLinks::new("/blog"),
    );

    BlogIndexTemplate {
        posts: listing.items.into_iter().map(PostCard::from).collect(),
        pagination_html: pagination.to_html(),
        signed_in,
        error,
    }
}

/// Display one post, looked up by slug or id.
///
/// # Errors
///
/// Returns 404 if no post answers to `key`.
#[instrument(skip(state, signed_in))]
pub async fn show(
    State(state): State<AppState>,
    SignedIn(signed_in): SignedIn,
    Path(key): Path<String>,
) -> Result<BlogShowTemplate> {
    let post = state.bakery().blog(&key).await?;
    let paragraphs = paragraphs(&post.content);

    Ok(BlogShowTemplate {
        post: post.into(),
        paragraphs,
        signed_in,
        error: String::new(),
    })
}

/// Tags that end a line of text.
const BLOCK_TAGS: &[&str] = &["p", "br", "div", "li", "h1", "h2", "h3", "h4", "h5", "h6"];

fn is_block_tag(tag: &str) -> bool {
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default();
    BLOCK_TAGS.iter().any(|block| block.eq_ignore_ascii_case(name))
}

/// Text of rich-text content with markup removed. Block tags become newlines.
fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut tag: Option<String> = None;
    for c in html.chars() {
        if let Some(name) = tag.as_mut() {
            if c == '>' {
                text.push(if is_block_tag(name) { '\n' } else { ' ' });
                tag = None;
            } else {
                name.push(c);
            }
        } else if c == '<' {
            tag = Some(String::new());
        } else {
            text.push(c);
        }
    }
    text
}

/// Paragraphs of plain text, whitespace collapsed.
fn paragraphs(html: &str) -> Vec<String> {
    plain_text(html)
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect()
}

/// Plain-text prefix of rich-text content, cut at a word boundary.
fn excerpt(html: &str, max_chars: usize) -> String {
    let text = plain_text(html);
    let words: Vec<&str> = text.split_whitespace().collect();

    let mut out = String::new();
    for word in words {
        if out.chars().count() + word.chars().count() + 1 > max_chars {
            out.push_str("...");
            return out;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn excerpt_strips_markup() {
        assert_eq!(
            excerpt("<p>Our <strong>rye</strong> loaf.</p>", 100),
            "Our rye loaf."
        );
    }

    #[test]
    fn excerpt_cuts_on_word_boundary() {
        assert_eq!(excerpt("one two three four", 9), "one two...");
    }

    #[test]
    fn paragraphs_follow_block_tags() {
        assert_eq!(
            paragraphs("<p>Our <strong>rye</strong> loaf.</p><p>Baked<br/>daily.</p>"),
            vec!["Our rye loaf.", "Baked", "daily."]
        );
        assert_eq!(paragraphs("Plain text\n\nsecond"), vec!["Plain text", "second"]);
    }

    #[test]
    fn paragraphs_drop_script_markup() {
        let text = paragraphs(r#"<p onclick="x()">Hi</p><img src="a.png">"#);
        assert_eq!(text, vec!["Hi"]);
    }

    #[test]
    fn excerpt_of_empty_content_is_empty() {
        assert_eq!(excerpt("", 10), "");
    }
}
