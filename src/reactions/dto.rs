use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ReactResponse {
    pub success: bool,
    pub liked: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub saved: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn react_response_reports_new_state() {
        let json = serde_json::to_value(ReactResponse {
            success: true,
            liked: false,
            message: "You unliked this post".into(),
        })
        .unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["liked"], false);
        assert_eq!(json["message"], "You unliked this post");
    }

    #[test]
    fn save_response_reports_new_state() {
        let json = serde_json::to_value(SaveResponse {
            success: true,
            saved: true,
            message: "You saved this post".into(),
        })
        .unwrap();
        assert_eq!(json["saved"], true);
    }
}
