//! `/api/user/*`

use crate::http::{ApiRequest, RequestSpec};
use crate::types::{LoginRequest, LoginResponse, PageResponse, RegisterRequest, User};
use serde_json::{Value, json};

/// Default page size of the user listing
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Sign in
pub fn login(credentials: &LoginRequest) -> ApiRequest<LoginResponse> {
    RequestSpec::post("/api/user/login")
        .with_json(json!(credentials))
        .into()
}

/// Create an account using an emailed verification code
pub fn register(user: &RegisterRequest, verification_code: &str) -> ApiRequest<User> {
    RequestSpec::post("/api/user/register")
        .with_json(json!({
            "user": user,
            "verificationCode": verification_code,
        }))
        .into()
}

/// Ask the backend to email a verification code
pub fn send_verification_code(email: &str) -> ApiRequest<Value> {
    RequestSpec::post("/api/user/code")
        .with_json(json!({ "email": email }))
        .into()
}

/// Fetch one user
pub fn get_user_by_id(user_id: i64) -> ApiRequest<User> {
    RequestSpec::get(format!("/api/user/{}", user_id)).into()
}

/// Page through all users (admin)
pub fn get_all_users(page: u32, size: u32) -> ApiRequest<PageResponse<User>> {
    RequestSpec::get("/api/user/page")
        .with_query("page", page)
        .with_query("size", size)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Method, RequestBody};

    #[test]
    fn test_login_request() {
        let request = login(&LoginRequest::new("alice", "pw"));
        let spec = request.spec();
        assert_eq!(spec.method, Method::Post);
        assert_eq!(spec.path, "/api/user/login");
        assert_eq!(
            spec.body,
            RequestBody::Json(json!({"username": "alice", "passwordHash": "pw"}))
        );
    }

    #[test]
    fn test_register_wraps_user_and_code() {
        let user = RegisterRequest {
            username: "bob".to_string(),
            password_hash: "pw".to_string(),
            email: "bob@example.com".to_string(),
            phone: Some("123".to_string()),
        };
        let request = register(&user, "654321");
        assert_eq!(
            request.spec().body,
            RequestBody::Json(json!({
                "user": {
                    "username": "bob",
                    "passwordHash": "pw",
                    "email": "bob@example.com",
                    "phone": "123"
                },
                "verificationCode": "654321"
            }))
        );
    }

    #[test]
    fn test_send_code() {
        let request = send_verification_code("x@example.com");
        assert_eq!(request.spec().path, "/api/user/code");
        assert_eq!(
            request.spec().body,
            RequestBody::Json(json!({"email": "x@example.com"}))
        );
    }

    #[test]
    fn test_user_lookups() {
        assert_eq!(get_user_by_id(5).spec().path, "/api/user/5");

        let page = get_all_users(2, DEFAULT_PAGE_SIZE);
        assert_eq!(page.spec().path, "/api/user/page");
        assert_eq!(
            page.spec().query,
            vec![
                ("page".to_string(), "2".to_string()),
                ("size".to_string(), "10".to_string())
            ]
        );
    }
}
