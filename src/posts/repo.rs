use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Post record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: Option<OffsetDateTime>,
    pub is_deleted: bool,
}

/// Post row joined with its author, as needed by the feed and detail views.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithAuthor {
    pub id: i64,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub user_id: i64,
    pub username: String,
    pub email: String,
}

impl Post {
    /// Non-deleted post by id. Soft-deleted rows are indistinguishable from
    /// absent ones.
    pub async fn find_active(db: &PgPool, id: i64) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, content, created_at, updated_at, is_deleted
            FROM posts
            WHERE id = $1 AND is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Post by id regardless of the soft-delete flag.
    pub async fn find_by_id(db: &PgPool, id: i64) -> Result<Option<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, content, created_at, updated_at, is_deleted
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(db: &PgPool, user_id: i64, content: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO posts (user_id, content) VALUES ($1, $2) RETURNING id",
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(db)
        .await
    }

    pub async fn update_content(db: &PgPool, id: i64, content: &str) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE posts SET content = $1, updated_at = now() WHERE id = $2")
            .bind(content)
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn soft_delete(db: &PgPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE posts SET is_deleted = TRUE WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    /// The acting user's non-deleted posts, newest first.
    pub async fn list_by_owner(db: &PgPool, user_id: i64) -> Result<Vec<Post>, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, content, created_at, updated_at, is_deleted
            FROM posts
            WHERE user_id = $1 AND is_deleted = FALSE
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
    }
}

impl PostWithAuthor {
    /// All non-deleted posts with authors, newest first; ties broken by id
    /// for a deterministic order.
    pub async fn feed(db: &PgPool) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.content, p.created_at, u.id AS user_id, u.username, u.email
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.is_deleted = FALSE
            ORDER BY p.created_at DESC, p.id ASC
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_active(db: &PgPool, id: i64) -> Result<Option<PostWithAuthor>, sqlx::Error> {
        sqlx::query_as::<_, PostWithAuthor>(
            r#"
            SELECT p.id, p.content, p.created_at, u.id AS user_id, u.username, u.email
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $1 AND p.is_deleted = FALSE
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }
}
