use axum::{
    extract::{Path, State},
    routing::post,
    Form, Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::repo::User,
    auth::session::AuthUser,
    comments::dto::{CommentCreatedResponse, CommentForm},
    comments::repo::Comment,
    error::{ApiError, ApiResult},
    posts::dto::{Author, CommentView},
    posts::repo::Post,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/posts/:id/comments", post(add_comment))
}

/// Adds a comment. The target post only has to exist; the soft-delete flag
/// is not consulted here, so comments on a deleted post are still accepted.
#[instrument(skip(state, form))]
pub async fn add_comment(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<i64>,
    form: Option<Form<CommentForm>>,
) -> ApiResult<Json<CommentCreatedResponse>> {
    let Some(Form(form)) = form else {
        return Err(ApiError::InvalidInput(
            "Comment content must not be empty".into(),
        ));
    };
    if form.content.trim().is_empty() {
        return Err(ApiError::InvalidInput(
            "Comment content must not be empty".into(),
        ));
    }

    Post::find_by_id(&state.db, post_id)
        .await?
        .ok_or(ApiError::NotFound("Post"))?;

    let author = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let comment = Comment::insert(&state.db, post_id, user_id, &form.content).await?;

    info!(user_id, post_id, comment_id = comment.id, "comment added");
    Ok(Json(CommentCreatedResponse {
        success: true,
        comment: CommentView {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            user: Author {
                id: author.id,
                username: author.username,
                email: author.email,
            },
        },
    }))
}
