use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Reaction record. The unique index on (user_id, post_id) is the
/// authoritative guard against concurrent double-inserts.
#[derive(Debug, Clone, FromRow)]
pub struct Reaction {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    #[sqlx(rename = "type")]
    pub kind: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct SavedPost {
    pub id: i64,
    pub user_id: i64,
    pub post_id: i64,
    pub saved_at: OffsetDateTime,
}

impl Reaction {
    pub async fn find(
        db: &PgPool,
        user_id: i64,
        post_id: i64,
        kind: &str,
    ) -> Result<Option<Reaction>, sqlx::Error> {
        sqlx::query_as::<_, Reaction>(
            r#"
            SELECT id, user_id, post_id, type, created_at
            FROM reactions
            WHERE user_id = $1 AND post_id = $2 AND type = $3
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .bind(kind)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(
        db: &PgPool,
        user_id: i64,
        post_id: i64,
        kind: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO reactions (user_id, post_id, type) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(post_id)
            .bind(kind)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM reactions WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn like_count(db: &PgPool, post_id: i64) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM reactions WHERE post_id = $1 AND type = 'like'",
        )
        .bind(post_id)
        .fetch_one(db)
        .await
    }

    pub async fn has_liked(db: &PgPool, user_id: i64, post_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM reactions
                WHERE user_id = $1 AND post_id = $2 AND type = 'like'
            )
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(db)
        .await
    }
}

impl SavedPost {
    pub async fn find(
        db: &PgPool,
        user_id: i64,
        post_id: i64,
    ) -> Result<Option<SavedPost>, sqlx::Error> {
        sqlx::query_as::<_, SavedPost>(
            r#"
            SELECT id, user_id, post_id, saved_at
            FROM saved_posts
            WHERE user_id = $1 AND post_id = $2
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_optional(db)
        .await
    }

    pub async fn insert(db: &PgPool, user_id: i64, post_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO saved_posts (user_id, post_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(post_id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM saved_posts WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn exists(db: &PgPool, user_id: i64, post_id: i64) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM saved_posts WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(db)
        .await
    }
}
