//! Feed aggregation and post mutation logic.
//!
//! Counts and viewer flags are computed per request, never cached; the
//! queries stay per-post lookups, which is fine at this scale.

use sqlx::PgPool;
use tracing::info;

use crate::comments::repo::{Comment, CommentWithAuthor};
use crate::error::{ApiError, ApiResult};
use crate::posts::dto::{Author, CommentView, FeedItem, OwnPostItem, PostDetail};
use crate::posts::repo::{Post, PostWithAuthor};
use crate::reactions::repo::{Reaction, SavedPost};

/// Rejects empty or whitespace-only content before anything is written.
fn validate_content(content: &str) -> ApiResult<()> {
    if content.trim().is_empty() {
        return Err(ApiError::InvalidInput("Content must not be empty".into()));
    }
    Ok(())
}

fn feed_item(
    post: PostWithAuthor,
    likes_count: i64,
    comments_count: i64,
    is_liked: bool,
    is_saved: bool,
) -> FeedItem {
    FeedItem {
        id: post.id,
        username: post.username,
        created_at: post.created_at,
        content: post.content,
        likes_count,
        comments_count,
        is_liked,
        is_saved,
    }
}

/// Viewer-relative like/save flags; anonymous viewers get `false` without
/// touching per-viewer state.
async fn viewer_flags(
    db: &PgPool,
    viewer: Option<i64>,
    post_id: i64,
) -> Result<(bool, bool), sqlx::Error> {
    match viewer {
        Some(user_id) => Ok((
            Reaction::has_liked(db, user_id, post_id).await?,
            SavedPost::exists(db, user_id, post_id).await?,
        )),
        None => Ok((false, false)),
    }
}

/// All non-deleted posts, newest first, enriched with counts and viewer
/// flags. An empty feed is an empty list, not an error.
pub async fn list_feed(db: &PgPool, viewer: Option<i64>) -> ApiResult<Vec<FeedItem>> {
    let posts = PostWithAuthor::feed(db).await?;

    let mut items = Vec::with_capacity(posts.len());
    for post in posts {
        let likes = Reaction::like_count(db, post.id).await?;
        let comments = Comment::active_count(db, post.id).await?;
        let (is_liked, is_saved) = viewer_flags(db, viewer, post.id).await?;
        items.push(feed_item(post, likes, comments, is_liked, is_saved));
    }
    Ok(items)
}

/// Single post with author, counts, viewer flags and its non-deleted
/// comments, oldest first.
pub async fn post_detail(db: &PgPool, post_id: i64, viewer: Option<i64>) -> ApiResult<PostDetail> {
    let post = PostWithAuthor::find_active(db, post_id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    let likes_count = Reaction::like_count(db, post.id).await?;
    let (is_liked, is_saved) = viewer_flags(db, viewer, post.id).await?;

    let comments = CommentWithAuthor::list_for_post(db, post.id)
        .await?
        .into_iter()
        .map(|c| CommentView {
            id: c.id,
            content: c.content,
            created_at: c.created_at,
            user: Author {
                id: c.user_id,
                username: c.username,
                email: c.email,
            },
        })
        .collect();

    Ok(PostDetail {
        id: post.id,
        content: post.content,
        created_at: post.created_at,
        user: Author {
            id: post.user_id,
            username: post.username,
            email: post.email,
        },
        likes_count,
        is_liked_by_current_user: is_liked,
        is_saved_by_current_user: is_saved,
        comments,
    })
}

/// The acting user's own posts with counts; no viewer flags since the
/// viewer is the owner.
pub async fn own_posts(db: &PgPool, user_id: i64) -> ApiResult<Vec<OwnPostItem>> {
    let posts = Post::list_by_owner(db, user_id).await?;

    let mut items = Vec::with_capacity(posts.len());
    for post in posts {
        let likes = Reaction::like_count(db, post.id).await?;
        let comments = Comment::active_count(db, post.id).await?;
        items.push(OwnPostItem {
            id: post.id,
            content: post.content,
            created_at: post.created_at,
            likes_count: likes,
            comments_count: comments,
        });
    }
    Ok(items)
}

pub async fn create_post(db: &PgPool, user_id: i64, content: &str) -> ApiResult<i64> {
    validate_content(content)?;
    let post_id = Post::insert(db, user_id, content).await?;
    info!(user_id, post_id, "post created");
    Ok(post_id)
}

/// Looks the post up before authorizing, so a missing post is a 404 even
/// for a non-owner.
async fn find_owned(db: &PgPool, user_id: i64, post_id: i64) -> ApiResult<Post> {
    let post = Post::find_active(db, post_id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    if post.user_id != user_id {
        return Err(ApiError::Forbidden);
    }
    Ok(post)
}

pub async fn edit_post(db: &PgPool, user_id: i64, post_id: i64, content: &str) -> ApiResult<()> {
    let post = find_owned(db, user_id, post_id).await?;
    validate_content(content)?;
    Post::update_content(db, post.id, content).await?;
    info!(user_id, post_id, "post updated");
    Ok(())
}

pub async fn delete_post(db: &PgPool, user_id: i64, post_id: i64) -> ApiResult<()> {
    let post = find_owned(db, user_id, post_id).await?;
    Post::soft_delete(db, post.id).await?;
    info!(user_id, post_id, "post soft-deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample_post() -> PostWithAuthor {
        PostWithAuthor {
            id: 10,
            content: "hello".into(),
            created_at: datetime!(2024-05-01 12:00:00 UTC),
            user_id: 1,
            username: "Anonim #1".into(),
            email: "a@apcer.com".into(),
        }
    }

    #[test]
    fn validate_content_rejects_empty_and_whitespace() {
        assert!(validate_content("").is_err());
        assert!(validate_content("   \n\t").is_err());
        assert!(validate_content("x").is_ok());
    }

    #[test]
    fn feed_item_carries_counts_and_flags() {
        let item = feed_item(sample_post(), 3, 2, true, false);
        assert_eq!(item.id, 10);
        assert_eq!(item.username, "Anonim #1");
        assert_eq!(item.likes_count, 3);
        assert_eq!(item.comments_count, 2);
        assert!(item.is_liked);
        assert!(!item.is_saved);
    }
}
