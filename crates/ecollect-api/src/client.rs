// Admin gateway HTTP client
//
// Wraps `reqwest::Client` with base-URL construction, bearer-token
// attachment from the SessionGate, `{"data": ...}` envelope unwrapping,
// and error normalization. A 401/403 on any protected call forces the
// session out before the error propagates -- that is the single coupling
// point between transport and session state.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::session::SessionGate;
use crate::transport::TransportConfig;
use crate::types::{
    CategoryCount, Envelope, EwasteRecord, KioskPage, KioskStatus, KioskWrite, ListQuery,
    LoginRequest, LoginResponse, StatsResponse, UserRecord,
};

/// Error body shape the backend uses for rejections.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
}

/// Async client for the E-Collect admin backend.
///
/// All admin endpoints require a bearer token; the client pulls the
/// current one from its [`SessionGate`] on every request, so a login or
/// logout elsewhere in the process takes effect immediately.
pub struct AdminClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionGate,
}

impl AdminClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL (e.g. `http://localhost:5080`), a session
    /// gate, and transport config.
    pub fn new(
        base_url: &str,
        session: SessionGate,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, session)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        session: SessionGate,
    ) -> Result<Self, Error> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    /// The session gate this client reads tokens from.
    pub fn session(&self) -> &SessionGate {
        &self.session
    }

    // ── URL / auth builders ──────────────────────────────────────────

    /// Join a relative path (e.g. `"api/admin/kiosks"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining a relative path works.
        self.base_url
            .join(path)
            .expect("path should be a valid relative URL")
    }

    /// Attach the current bearer token, if a session is active.
    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.bearer_token() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.authorize(self.http.get(url)).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self
            .authorize(self.http.get(url))
            .query(params)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.authorize(self.http.post(url)).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn put<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.authorize(self.http.put(url)).json(body).send().await?;
        self.handle_empty(resp).await
    }

    async fn patch<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path);
        debug!("PATCH {url}");

        let resp = self
            .authorize(self.http.patch(url))
            .json(body)
            .send()
            .await?;
        self.handle_empty(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.authorize(self.http.delete(url)).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.reject(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.reject(status, resp).await)
        }
    }

    /// Normalize a non-success response into an [`Error`].
    ///
    /// 401/403 means the token is no longer honored: force the session
    /// out (idempotent) and surface `SessionExpired`. Everything else is
    /// a `Server` error carrying the backend's message verbatim when one
    /// is present.
    async fn reject(&self, status: StatusCode, resp: reqwest::Response) -> Error {
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.session.force_logout();
            return Error::SessionExpired;
        }

        let raw = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Server {
            status: status.as_u16(),
            message,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Auth ─────────────────────────────────────────────────────────

    /// Authenticate and establish the session.
    ///
    /// A rejected login (401/400) surfaces as
    /// [`Error::InvalidCredentials`], never as a session expiry -- there
    /// is no session yet to expire. On success the token is handed to the
    /// SessionGate's `login` transition.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.url("api/auth/login");
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .json(&LoginRequest {
                username,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED
            || status == StatusCode::FORBIDDEN
            || status == StatusCode::BAD_REQUEST
        {
            return Err(Error::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(self.reject(status, resp).await);
        }

        let body = resp.text().await?;
        let login: LoginResponse = serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })?;

        self.session.login(SecretString::from(login.token));
        Ok(())
    }

    // ── Dashboard ────────────────────────────────────────────────────

    pub async fn get_stats(&self) -> Result<StatsResponse, Error> {
        let env: Envelope<StatsResponse> = self.get("api/admin/stats").await?;
        Ok(env.data)
    }

    pub async fn get_ewaste_summary(&self) -> Result<Vec<CategoryCount>, Error> {
        let env: Envelope<Vec<CategoryCount>> = self.get("api/admin/ewaste-summary").await?;
        Ok(env.data)
    }

    // ── Kiosks ───────────────────────────────────────────────────────

    pub async fn list_kiosks(&self, query: &ListQuery) -> Result<KioskPage, Error> {
        self.get_with_params("api/admin/kiosks", &query.to_params())
            .await
    }

    pub async fn create_kiosk(&self, body: &KioskWrite) -> Result<(), Error> {
        self.post("api/admin/kiosks", body).await
    }

    pub async fn update_kiosk(&self, id: &str, body: &KioskWrite) -> Result<(), Error> {
        let id = require_id(id)?;
        self.put(&format!("api/admin/kiosks/{id}"), body).await
    }

    /// Status-only transition. The typed parameter makes a malformed
    /// status unrepresentable here; string input is parsed (and rejected)
    /// upstream.
    pub async fn set_kiosk_status(&self, id: &str, status: KioskStatus) -> Result<(), Error> {
        #[derive(Serialize)]
        struct Body {
            status: KioskStatus,
        }

        let id = require_id(id)?;
        self.patch(&format!("api/admin/kiosks/{id}/status"), &Body { status })
            .await
    }

    pub async fn delete_kiosk(&self, id: &str) -> Result<(), Error> {
        let id = require_id(id)?;
        self.delete(&format!("api/admin/kiosks/{id}")).await
    }

    // ── Ledgers (read-only) ──────────────────────────────────────────

    pub async fn list_users(&self, query: &ListQuery) -> Result<Vec<UserRecord>, Error> {
        let env: Envelope<Vec<UserRecord>> = self
            .get_with_params("api/admin/users", &query.to_params())
            .await?;
        Ok(env.data)
    }

    pub async fn list_ewaste(&self, query: &ListQuery) -> Result<Vec<EwasteRecord>, Error> {
        let env: Envelope<Vec<EwasteRecord>> = self
            .get_with_params("api/admin/ewaste", &query.to_params())
            .await?;
        Ok(env.data)
    }
}

// ── Local parameter validation ───────────────────────────────────────

/// Normalize the backend base URL to always end with `/`.
fn normalize_base_url(raw: &str) -> Result<Url, Error> {
    let mut url = Url::parse(raw)?;
    let path = url.path().trim_end_matches('/').to_owned();
    url.set_path(&format!("{path}/"));
    Ok(url)
}

/// Reject a missing or malformed entity id before it can reach the wire
/// (an empty id would silently hit the collection endpoint instead).
fn require_id(id: &str) -> Result<&str, Error> {
    let id = id.trim();
    if id.is_empty() {
        return Err(Error::validation("kiosk id must not be empty"));
    }
    if id.contains('/') || id.contains(char::is_whitespace) {
        return Err(Error::validation(format!("malformed kiosk id: {id:?}")));
    }
    Ok(id)
}
