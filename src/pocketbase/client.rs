// ============================================================================
// POCKETBASE CLIENT - shared handle to the backend (HTTP only, no UI state)
// ============================================================================

use std::rc::Rc;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::auth_store::AuthStore;
use super::persistence::{AuthPersistence, LocalStoragePersistence, MemoryPersistence};
use crate::error::ApiError;
use crate::models::{AuthMethods, AuthResponse};

struct Inner {
    base_url: String,
    auth_store: AuthStore,
}

/// Cheap to clone; every clone talks to the same server with the same credentials
#[derive(Clone)]
pub struct PocketBase {
    inner: Rc<Inner>,
}

impl PartialEq for PocketBase {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl PocketBase {
    /// Credentials go to localStorage when the browser allows it, to memory otherwise
    pub fn new(base_url: &str, storage_key: &str) -> Self {
        let persistence: Rc<dyn AuthPersistence> = match LocalStoragePersistence::new(storage_key) {
            Some(local) => Rc::new(local),
            None => {
                log::warn!("⚠️ localStorage unavailable, credentials will not survive a reload");
                Rc::new(MemoryPersistence::default())
            }
        };
        Self::with_persistence(base_url, persistence)
    }

    pub fn with_persistence(base_url: &str, persistence: Rc<dyn AuthPersistence>) -> Self {
        Self {
            inner: Rc::new(Inner {
                base_url: base_url.to_string(),
                auth_store: AuthStore::new(persistence),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn auth_store(&self) -> &AuthStore {
        &self.inner.auth_store
    }

    /// Joins the base URL and `path` with exactly one slash
    pub fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn collection(&self, name: &str) -> RecordService {
        RecordService {
            client: self.clone(),
            collection: name.to_string(),
        }
    }

    /// Adds the current token, if any, to an outgoing request
    pub(crate) fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.auth_store().token();
        if token.is_empty() {
            builder
        } else {
            builder.header("Authorization", &token)
        }
    }
}

/// Record and auth endpoints of one collection
#[derive(Clone)]
pub struct RecordService {
    client: PocketBase,
    collection: String,
}

impl RecordService {
    pub fn records_url(&self) -> String {
        self.client
            .build_url(&format!("/api/collections/{}/records", self.collection))
    }

    pub fn record_url(&self, id: &str) -> String {
        format!("{}/{}", self.records_url(), id)
    }

    pub async fn create<B: Serialize, R: DeserializeOwned>(&self, body: &B) -> Result<R, ApiError> {
        let request = self
            .client
            .authorize(Request::post(&self.records_url()))
            .json(body)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    pub async fn update<B: Serialize, R: DeserializeOwned>(&self, id: &str, body: &B) -> Result<R, ApiError> {
        let request = self
            .client
            .authorize(Request::patch(&self.record_url(id)))
            .json(body)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    /// Exchanges the current token for a fresh one; the caller decides what to store
    pub async fn auth_refresh(&self) -> Result<AuthResponse, ApiError> {
        let url = self
            .client
            .build_url(&format!("/api/collections/{}/auth-refresh", self.collection));
        let response = self
            .client
            .authorize(Request::post(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }

    pub async fn list_auth_methods(&self) -> Result<AuthMethods, ApiError> {
        let url = self
            .client
            .build_url(&format!("/api/collections/{}/auth-methods", self.collection));
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        read_json(response).await
    }
}

async fn read_json<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    parse_response(status, &body)
}

/// 2xx bodies are decoded as `R`; anything else becomes `ApiError::Status` with the raw body
pub fn parse_response<R: DeserializeOwned>(status: u16, body: &str) -> Result<R, ApiError> {
    if (200..300).contains(&status) {
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))
    } else {
        Err(ApiError::Status {
            status,
            body: body.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoredFile;

    fn client(base_url: &str) -> PocketBase {
        PocketBase::with_persistence(base_url, Rc::new(MemoryPersistence::default()))
    }

    #[test]
    fn test_build_url_joins_with_one_slash() {
        assert_eq!(client("http://pb.local").build_url("/api/health"), "http://pb.local/api/health");
        assert_eq!(client("http://pb.local/").build_url("api/health"), "http://pb.local/api/health");
        assert_eq!(client("http://pb.local/").build_url("/api/health"), "http://pb.local/api/health");
    }

    #[test]
    fn test_collection_urls() {
        let files = client("http://pb.local").collection("files");
        assert_eq!(files.records_url(), "http://pb.local/api/collections/files/records");
        assert_eq!(files.record_url("f1"), "http://pb.local/api/collections/files/records/f1");
    }

    #[test]
    fn test_clones_share_identity_and_credentials() {
        let pb = client("http://pb.local");
        let other = pb.clone();
        other.auth_store().save("tok", None);

        assert!(pb == other);
        assert_eq!(pb.auth_store().token(), "tok");
        assert!(pb != client("http://pb.local"));
    }

    #[test]
    fn test_parse_response_success() {
        let file: StoredFile = parse_response(200, r#"{"id":"f1","name":"cat","type":"image/png"}"#).unwrap();
        assert_eq!(file.id, "f1");
        assert_eq!(file.mime_type, "image/png");
    }

    #[test]
    fn test_parse_response_failure_keeps_body() {
        let result: Result<StoredFile, _> = parse_response(400, r#"{"error":"bad file"}"#);
        assert_eq!(
            result,
            Err(ApiError::Status {
                status: 400,
                body: r#"{"error":"bad file"}"#.to_string()
            })
        );
    }

    #[test]
    fn test_parse_response_bad_json() {
        let result: Result<StoredFile, _> = parse_response(200, "<html>");
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }
}
