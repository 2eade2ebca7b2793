use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One entry of the public feed. Field names are what the web client binds
/// to, hence camelCase here and snake_case on the detail view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: i64,
    pub username: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub content: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub is_liked: bool,
    pub is_saved: bool,
}

/// Public author fields attached to detail views and comments.
#[derive(Debug, Serialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct CommentView {
    pub id: i64,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user: Author,
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    pub id: i64,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub user: Author,
    pub likes_count: i64,
    pub is_liked_by_current_user: bool,
    pub is_saved_by_current_user: bool,
    pub comments: Vec<CommentView>,
}

/// Entry of the own-posts listing; the viewer is the owner, so no
/// viewer-relative flags.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnPostItem {
    pub id: i64,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub likes_count: i64,
    pub comments_count: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostForm {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct EditPostRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedPostResponse {
    pub success: bool,
    pub message: String,
    pub post_id: i64,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn feed_item_uses_camel_case_keys() {
        let item = FeedItem {
            id: 1,
            username: "Anonim #1".into(),
            created_at: datetime!(2024-05-01 12:00:00 UTC),
            content: "hello".into(),
            likes_count: 2,
            comments_count: 3,
            is_liked: true,
            is_saved: false,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(json["likesCount"], 2);
        assert_eq!(json["commentsCount"], 3);
        assert_eq!(json["isLiked"], true);
        assert_eq!(json["isSaved"], false);
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn post_detail_uses_snake_case_viewer_flags() {
        let detail = PostDetail {
            id: 1,
            content: "hello".into(),
            created_at: datetime!(2024-05-01 12:00:00 UTC),
            user: Author {
                id: 2,
                username: "Anonim #2".into(),
                email: "x@apcer.com".into(),
            },
            likes_count: 0,
            is_liked_by_current_user: false,
            is_saved_by_current_user: false,
            comments: vec![],
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["likes_count"], 0);
        assert_eq!(json["is_liked_by_current_user"], false);
        assert_eq!(json["is_saved_by_current_user"], false);
        assert_eq!(json["user"]["username"], "Anonim #2");
        assert!(json["comments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn own_post_item_has_no_viewer_flags() {
        let item = OwnPostItem {
            id: 1,
            content: "mine".into(),
            created_at: datetime!(2024-05-01 12:00:00 UTC),
            likes_count: 0,
            comments_count: 0,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("isLiked").is_none());
        assert!(json.get("isSaved").is_none());
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
    }
}
