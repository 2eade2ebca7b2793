use axum::{
    extract::{Path, State},
    routing::get,
    Form, Json, Router,
};
use tracing::instrument;

use crate::{
    auth::session::{AuthUser, MaybeUser},
    error::{ApiError, ApiResult},
    posts::dto::{
        CreatePostForm, CreatedPostResponse, EditPostRequest, FeedItem, OwnPostItem, PostDetail,
        StatusResponse,
    },
    posts::services,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/mine", get(my_posts))
        .route(
            "/posts/:id",
            get(post_detail).put(edit_post).delete(delete_post),
        )
}

#[instrument(skip(state, viewer))]
pub async fn list_posts(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
) -> ApiResult<Json<Vec<FeedItem>>> {
    Ok(Json(services::list_feed(&state.db, viewer).await?))
}

#[instrument(skip(state, viewer))]
pub async fn post_detail(
    State(state): State<AppState>,
    MaybeUser(viewer): MaybeUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<PostDetail>> {
    Ok(Json(services::post_detail(&state.db, id, viewer).await?))
}

#[instrument(skip(state))]
pub async fn my_posts(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<OwnPostItem>>> {
    Ok(Json(services::own_posts(&state.db, user_id).await?))
}

#[instrument(skip(state, form))]
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    form: Option<Form<CreatePostForm>>,
) -> ApiResult<Json<CreatedPostResponse>> {
    let Some(Form(form)) = form else {
        return Err(ApiError::InvalidInput("Content must not be empty".into()));
    };
    let post_id = services::create_post(&state.db, user_id, &form.content).await?;
    Ok(Json(CreatedPostResponse {
        success: true,
        message: "Post created".into(),
        post_id,
    }))
}

#[instrument(skip(state, payload))]
pub async fn edit_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    payload: Option<Json<EditPostRequest>>,
) -> ApiResult<Json<StatusResponse>> {
    let Some(Json(payload)) = payload else {
        return Err(ApiError::InvalidInput("Invalid request body".into()));
    };
    services::edit_post(&state.db, user_id, id, &payload.content).await?;
    Ok(Json(StatusResponse {
        success: true,
        message: "Post updated".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<StatusResponse>> {
    services::delete_post(&state.db, user_id, id).await?;
    Ok(Json(StatusResponse {
        success: true,
        message: "Post deleted".into(),
    }))
}
