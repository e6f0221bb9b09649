//! Response envelope and paging wrappers

use serde::{Deserialize, Serialize};

/// Status code the backend uses for success inside the envelope
pub const SUCCESS_CODE: i64 = 200;

/// The `{code, message, data}` wrapper every API response uses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,

    #[serde(default)]
    pub message: Option<String>,

    /// Missing and `null` both read as `None`
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Whether the envelope signals success
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

/// Page position of a paged listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Pageable {
    pub page_number: u32,
    pub page_size: u32,
}

/// One page of a listing, in Spring's page shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,

    #[serde(default)]
    pub pageable: Pageable,

    pub total_elements: u64,

    pub total_pages: u32,
}

impl<T> PageResponse<T> {
    /// Whether another page follows this one
    pub fn has_next(&self) -> bool {
        self.display_number() < self.total_pages
    }

    /// One-based number of this page
    pub fn display_number(&self) -> u32 {
        self.pageable.page_number.saturating_add(1)
    }

    /// Zero-based index of the following page, if there is one
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.display_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_without_data() {
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_value(json!({"code": 400, "message": "bad"})).unwrap();
        assert!(!envelope.is_success());
        assert_eq!(envelope.message.as_deref(), Some("bad"));
        assert_eq!(envelope.data, None);
    }

    #[test]
    fn test_page_response_shape() {
        let page: PageResponse<u32> = serde_json::from_value(json!({
            "content": [1, 2, 3],
            "pageable": {"pageNumber": 0, "pageSize": 3},
            "totalElements": 7,
            "totalPages": 3
        }))
        .unwrap();

        assert_eq!(page.content, vec![1, 2, 3]);
        assert_eq!(page.pageable.page_size, 3);
        assert!(page.has_next());
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = PageResponse::<u32> {
            content: vec![],
            pageable: Pageable {
                page_number: 2,
                page_size: 3,
            },
            total_elements: 7,
            total_pages: 3,
        };
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_numbers_saturate_at_the_top() {
        let page = PageResponse::<u32> {
            content: vec![],
            pageable: Pageable {
                page_number: u32::MAX,
                page_size: 10,
            },
            total_elements: 0,
            total_pages: u32::MAX,
        };
        assert_eq!(page.display_number(), u32::MAX);
        assert!(!page.has_next());
        assert_eq!(page.next_page(), None);
    }
}
