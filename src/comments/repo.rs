use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Comment record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
    pub is_deleted: bool,
}

/// Comment row joined with its author, for the post detail view.
#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: i64,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl Comment {
    pub async fn insert(
        db: &PgPool,
        post_id: i64,
        user_id: i64,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at, updated_at, is_deleted
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(db)
        .await
    }

    pub async fn active_count(db: &PgPool, post_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM comments WHERE post_id = $1 AND is_deleted = FALSE",
        )
        .bind(post_id)
        .fetch_one(db)
        .await
    }
}

impl CommentWithAuthor {
    /// Non-deleted comments of a post with authors, oldest first.
    pub async fn list_for_post(
        db: &PgPool,
        post_id: i64,
    ) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.content, c.created_at, u.id AS user_id, u.username, u.email
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1 AND c.is_deleted = FALSE
            ORDER BY c.created_at ASC, c.id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(db)
        .await
    }
}
