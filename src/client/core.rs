// File: src/client/core.rs
use crate::client::NotesApi;
use crate::client::middleware::{DefaultHeadersLayer, DefaultHeadersService};
use crate::error::ActionError;
use crate::model::{Note, NoteFields, NoteId, NotePatch};

use http::{Method, Request, StatusCode, Uri};
use http_body_util::BodyExt;
use hyper::ext::ReasonPhrase;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;
use tower_layer::Layer;

pub const NOTES_PATH: &str = "/notes/";
pub const TRASH_PATH: &str = "/notes/trash";

/// `/notes/{id}` with the id encoded as a single path segment. Ids that would
/// address another resource (`trash`, `.`, `..`, empty) are rejected.
pub fn note_path(id: &NoteId) -> Result<String, ActionError> {
    let raw = id.to_string();
    if matches!(raw.as_str(), "" | "." | ".." | "trash") {
        return Err(ActionError::InvalidUrl(format!(
            "note id {:?} does not name a single note",
            raw
        )));
    }
    Ok(format!("{}{}", NOTES_PATH, urlencoding::encode(&raw)))
}

/// The reason phrase the server sent, else the canonical one for the code.
fn status_text(status: StatusCode, extensions: &http::Extensions) -> String {
    extensions
        .get::<ReasonPhrase>()
        .map(|reason| String::from_utf8_lossy(reason.as_bytes()).into_owned())
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "Request failed".to_string())
}

type HttpsClient = Client<hyper_rustls::HttpsConnector<HttpConnector>, String>;
type NotesService = DefaultHeadersService<HttpsClient>;

fn describe(err: &dyn std::error::Error) -> String {
    match err.source() {
        Some(src) => format!("{}: {}", err, src),
        None => err.to_string(),
    }
}

#[derive(Clone, Debug)]
pub struct NotesClient {
    base_url: String,
    service: NotesService,
}

impl NotesClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self, ActionError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let uri: Uri = base_url
            .parse()
            .map_err(|e: http::uri::InvalidUri| ActionError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(ActionError::InvalidUrl(format!(
                "{}: expected scheme and host",
                base_url
            )));
        }

        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        let (added, _ignored) = root_store.add_parsable_certificates(result.certs);
        if added == 0 {
            // Plain http backends still work; https ones will fail the handshake.
            log::warn!("No system certificates found; HTTPS requests will fail");
        }
        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client: HttpsClient = Client::builder(TokioExecutor::new()).build(https_connector);
        let service = DefaultHeadersLayer::json(user_agent).layer(http_client);

        Ok(Self { base_url, service })
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: String,
    ) -> Result<T, ActionError> {
        let uri: Uri = format!("{}{}", self.base_url, path)
            .parse()
            .map_err(|e: http::uri::InvalidUri| ActionError::InvalidUrl(e.to_string()))?;
        log::debug!("{} {}", method, uri);

        let req = Request::builder()
            .method(method.clone())
            .uri(uri)
            .body(body)
            .map_err(|e| ActionError::InvalidUrl(e.to_string()))?;

        let response = self
            .service
            .clone()
            .oneshot(req)
            .await
            .map_err(|e| ActionError::Transport(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status_text(status, response.extensions());
            log::warn!("{} {} -> {}", method, path, status);
            return Err(ActionError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ActionError::Body(e.to_string()))?
            .to_bytes();

        serde_json::from_slice(&bytes).map_err(|e| ActionError::Parse(e.to_string()))
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ActionError> {
        let body = serde_json::to_string(body).map_err(|e| ActionError::Parse(e.to_string()))?;
        self.request(method, path, body).await
    }
}

impl NotesApi for NotesClient {
    async fn list_notes(&self) -> Result<Vec<Note>, ActionError> {
        self.request(Method::GET, NOTES_PATH, String::new()).await
    }

    async fn list_trash(&self) -> Result<Vec<Note>, ActionError> {
        self.request(Method::GET, TRASH_PATH, String::new()).await
    }

    async fn create_note(&self, fields: &NoteFields) -> Result<Note, ActionError> {
        self.send_json(Method::POST, NOTES_PATH, fields).await
    }

    async fn patch_note(&self, id: &NoteId, patch: &NotePatch) -> Result<Note, ActionError> {
        self.send_json(Method::PATCH, &note_path(id)?, patch).await
    }

    async fn delete_note(&self, id: &NoteId) -> Result<Value, ActionError> {
        self.request(Method::DELETE, &note_path(id)?, String::new())
            .await
    }

    async fn clear_trash(&self) -> Result<Value, ActionError> {
        self.request(Method::DELETE, TRASH_PATH, String::new()).await
    }
}
