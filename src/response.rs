use serde::Serialize;
use utoipa::ToSchema;

/// Pagination block carried in the response envelope. All fields are optional
/// so unpaged endpoints can return an empty block.
#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

/// Uniform envelope for every endpoint, error responses included.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiResponse, Meta};

    #[test]
    fn absent_fields_stay_out_of_the_json() {
        let body = ApiResponse::success("OK", 7, None);
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"message":"OK","data":7}"#);
    }

    #[test]
    fn paged_meta_serializes_all_fields() {
        let json = serde_json::to_string(&Meta::new(2, 20, 41)).unwrap();
        assert_eq!(json, r#"{"page":2,"per_page":20,"total":41}"#);
    }
}
