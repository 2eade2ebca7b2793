use serde::Deserialize;
use serde::Serialize;

use crate::posts::dto::CommentView;

#[derive(Debug, Deserialize)]
pub struct CommentForm {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentCreatedResponse {
    pub success: bool,
    pub comment: CommentView,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::posts::dto::Author;
    use time::macros::datetime;

    #[test]
    fn created_comment_carries_author_fields() {
        let json = serde_json::to_value(CommentCreatedResponse {
            success: true,
            comment: CommentView {
                id: 5,
                content: "nice".into(),
                created_at: datetime!(2024-05-01 12:00:00 UTC),
                user: Author {
                    id: 2,
                    username: "Anonim #2".into(),
                    email: "b@apcer.com".into(),
                },
            },
        })
        .unwrap();
        assert_eq!(json["comment"]["content"], "nice");
        assert_eq!(json["comment"]["user"]["username"], "Anonim #2");
        assert_eq!(json["comment"]["created_at"], "2024-05-01T12:00:00Z");
    }
}
