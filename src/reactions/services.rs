//! Like/save toggling. A strict binary toggle per (user, post): an existing
//! row is removed, a missing one is created. No separate like/unlike
//! endpoints, no cached counts.

use sqlx::PgPool;
use tracing::info;

use crate::error::{is_unique_violation, ApiError, ApiResult};
use crate::posts::repo::Post;
use crate::reactions::repo::{Reaction, SavedPost};

const LIKE: &str = "like";

/// New state of a toggle, with a message for UI feedback.
#[derive(Debug, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub active: bool,
    pub message: &'static str,
}

async fn require_active_post(db: &PgPool, post_id: i64) -> ApiResult<()> {
    Post::find_active(db, post_id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;
    Ok(())
}

pub async fn toggle_reaction(db: &PgPool, user_id: i64, post_id: i64) -> ApiResult<ToggleOutcome> {
    require_active_post(db, post_id).await?;

    if let Some(existing) = Reaction::find(db, user_id, post_id, LIKE).await? {
        Reaction::delete(db, existing.id).await?;
        info!(user_id, post_id, "reaction removed");
        return Ok(ToggleOutcome {
            active: false,
            message: "You unliked this post",
        });
    }

    match Reaction::insert(db, user_id, post_id, LIKE).await {
        Ok(()) => {}
        // A concurrent toggle already created the row; same desired state.
        Err(e) if is_unique_violation(&e) => {}
        Err(e) => return Err(e.into()),
    }
    info!(user_id, post_id, "reaction added");
    Ok(ToggleOutcome {
        active: true,
        message: "You liked this post",
    })
}

pub async fn toggle_save(db: &PgPool, user_id: i64, post_id: i64) -> ApiResult<ToggleOutcome> {
    require_active_post(db, post_id).await?;

    if let Some(existing) = SavedPost::find(db, user_id, post_id).await? {
        SavedPost::delete(db, existing.id).await?;
        info!(user_id, post_id, "post unsaved");
        return Ok(ToggleOutcome {
            active: false,
            message: "Post removed from your saved list",
        });
    }

    match SavedPost::insert(db, user_id, post_id).await {
        Ok(()) => {}
        // A concurrent toggle already created the row; same desired state.
        Err(e) if is_unique_violation(&e) => {}
        Err(e) => return Err(e.into()),
    }
    info!(user_id, post_id, "post saved");
    Ok(ToggleOutcome {
        active: true,
        message: "You saved this post",
    })
}
