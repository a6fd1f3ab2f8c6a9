//! Stateless HTTP request builder and response parser for the category API.
//!
//! # Design
//! `CategoryClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. Authenticated builders take the
//! `Session` explicitly. Every payload arrives wrapped in `{ "data": ... }`
//! and the parsers unwrap it.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::Session;
use crate::types::{
    Category, CategoryId, CreateCategory, Envelope, LoginData, LoginRequest, Profile,
    RegisterRequest, UpdateCategory,
};

/// Synchronous, stateless client for the category API.
#[derive(Debug, Clone)]
pub struct CategoryClient {
    base_url: String,
}

impl CategoryClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_login(&self, input: &LoginRequest) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/api/user/login", None, input)
    }

    pub fn build_register(&self, input: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/api/user/register", None, input)
    }

    pub fn build_profile(&self, session: &Session) -> HttpRequest {
        self.bare_request(HttpMethod::Get, "/api/user/profile", session)
    }

    pub fn build_list_categories(&self, session: &Session) -> HttpRequest {
        self.bare_request(HttpMethod::Get, "/api/category", session)
    }

    pub fn build_create_category(
        &self,
        session: &Session,
        input: &CreateCategory,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/api/category/create", Some(session), input)
    }

    pub fn build_update_category(
        &self,
        session: &Session,
        input: &UpdateCategory,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, "/api/category/update", Some(session), input)
    }

    /// Ids that would change the path's shape (`a/b`, `?x`, `..`) are refused.
    pub fn build_delete_category(
        &self,
        session: &Session,
        id: &CategoryId,
    ) -> Result<HttpRequest, ApiError> {
        if !id.is_path_safe() {
            return Err(ApiError::InvalidId(id.to_string()));
        }
        Ok(self.bare_request(HttpMethod::Delete, &format!("/api/category/{id}"), session))
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<LoginData, ApiError> {
        parse_envelope(&response)
    }

    /// Registration only needs a 2xx; the echoed user is not used.
    pub fn parse_register(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    pub fn parse_profile(&self, response: HttpResponse) -> Result<Profile, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_create_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_update_category(&self, response: HttpResponse) -> Result<Category, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_delete_category(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    fn bare_request(&self, method: HttpMethod, path: &str, session: &Session) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![session.authorization_header()],
            body: None,
        }
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        session: Option<&Session>,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let mut headers = vec![("content-type".to_string(), "application/json".to_string())];
        if let Some(session) = session {
            headers.push(session.authorization_header());
        }
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body: Some(body),
        })
    }
}

/// Map a status outside 200..=299 to `ApiError::HttpError`.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Check the status, then pull the nested `data` field out of the body.
pub(crate) fn parse_envelope<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_str::<Envelope<T>>(&response.body)
        .map(|envelope| envelope.data)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CategoryClient {
        CategoryClient::new("http://localhost:3000")
    }

    fn session() -> Session {
        Session::new("T")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn build_login_has_no_auth_header() {
        let req = client()
            .build_login(&LoginRequest {
                email: "a@b.com".to_string(),
                password: "x".to_string(),
            })
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/user/login");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.com", "password": "x"}));
    }

    #[test]
    fn build_list_categories_carries_bearer() {
        let req = client().build_list_categories(&session());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/api/category");
        assert_eq!(req.header("authorization"), Some("Bearer T"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_profile_targets_profile_path() {
        let req = client().build_profile(&session());
        assert_eq!(req.path, "http://localhost:3000/api/user/profile");
        assert_eq!(req.header("authorization"), Some("Bearer T"));
    }

    #[test]
    fn build_create_category_sends_json_and_bearer() {
        let req = client()
            .build_create_category(
                &session(),
                &CreateCategory {
                    name: "Snacks".to_string(),
                    is_active: true,
                },
            )
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/api/category/create");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer T"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Snacks");
        assert_eq!(body["is_active"], true);
    }

    #[test]
    fn build_update_category_puts_id_in_body() {
        let req = client()
            .build_update_category(
                &session(),
                &UpdateCategory {
                    id: CategoryId::Number(4),
                    name: "Renamed".to_string(),
                    is_active: false,
                },
            )
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "http://localhost:3000/api/category/update");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["id"], 4);
        assert_eq!(body["name"], "Renamed");
    }

    #[test]
    fn build_delete_category_puts_id_in_path() {
        let req = client()
            .build_delete_category(&session(), &CategoryId::Number(3))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.path, "http://localhost:3000/api/category/3");
        assert_eq!(req.header("authorization"), Some("Bearer T"));
        assert!(req.body.is_none());
    }

    #[test]
    fn build_delete_category_accepts_uuid_text_ids() {
        let id = CategoryId::Text("6f1c2b1e-9a0d-4c1e-8f3a-1b2c3d4e5f60".to_string());
        let req = client().build_delete_category(&session(), &id).unwrap();
        assert_eq!(
            req.path,
            "http://localhost:3000/api/category/6f1c2b1e-9a0d-4c1e-8f3a-1b2c3d4e5f60"
        );
    }

    #[test]
    fn build_delete_category_refuses_ids_that_reshape_the_path() {
        for raw in ["a/b", "..", "x?y=1", "a b", ""] {
            let err = client()
                .build_delete_category(&session(), &CategoryId::Text(raw.to_string()))
                .unwrap_err();
            assert!(matches!(err, ApiError::InvalidId(ref id) if id == raw), "{raw:?}");
        }
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CategoryClient::new("http://localhost:3000/");
        let req = client.build_list_categories(&session());
        assert_eq!(req.path, "http://localhost:3000/api/category");
    }

    #[test]
    fn parse_login_extracts_nested_token() {
        let data = client()
            .parse_login(response(200, r#"{"data":{"token":"T"}}"#))
            .unwrap();
        assert_eq!(data.token, "T");
    }

    #[test]
    fn parse_list_categories_unwraps_envelope() {
        let categories = client()
            .parse_list_categories(response(
                200,
                r#"{"data":[{"id":1,"name":"Food","is_active":true}]}"#,
            ))
            .unwrap();
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "Food");
    }

    #[test]
    fn parse_register_accepts_any_2xx() {
        assert!(client().parse_register(response(201, "{}")).is_ok());
        assert!(client().parse_register(response(200, "")).is_ok());
    }

    #[test]
    fn client_errors_and_server_errors_look_the_same() {
        for status in [400, 401, 404, 500, 503] {
            let err = client()
                .parse_delete_category(response(status, "nope"))
                .unwrap_err();
            assert!(matches!(err, ApiError::HttpError { status: s, .. } if s == status));
        }
    }

    #[test]
    fn parse_without_envelope_is_deserialization_error() {
        let err = client()
            .parse_profile(response(200, r#"{"name":"A","email":"a@b.com"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_categories_bad_json() {
        let err = client()
            .parse_list_categories(response(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
