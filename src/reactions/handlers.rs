use axum::{
    extract::{Path, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::session::AuthUser,
    error::ApiResult,
    reactions::dto::{ReactResponse, SaveResponse},
    reactions::services,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts/:id/react", post(react))
        .route("/posts/:id/save", post(save))
}

#[instrument(skip(state))]
pub async fn react(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<ReactResponse>> {
    let outcome = services::toggle_reaction(&state.db, user_id, post_id).await?;
    Ok(Json(ReactResponse {
        success: true,
        liked: outcome.active,
        message: outcome.message.into(),
    }))
}

#[instrument(skip(state))]
pub async fn save(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(post_id): Path<i64>,
) -> ApiResult<Json<SaveResponse>> {
    let outcome = services::toggle_save(&state.db, user_id, post_id).await?;
    Ok(Json(SaveResponse {
        success: true,
        saved: outcome.active,
        message: outcome.message.into(),
    }))
}
