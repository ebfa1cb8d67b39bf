// HTTP client for the OpenVPN Cloud REST API.
//
// Base path: /api/beta/
// Auth: bearer token (acquired by the caller)
//
// Endpoint groups (connectors, routes, networks, DNS records) are inherent
// methods implemented in their own modules; this one owns URL handling,
// cancellation and response decoding.

use std::future::Future;

use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use crate::confirm::DeletePolicies;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Path every resource endpoint lives under.
const API_PREFIX: &str = "/api/beta";

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

/// Everything needed to build a [`CloudClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Tenant API root, e.g. `https://acme.api.openvpn.com`.
    pub base_url: Url,
    pub token: SecretString,
    pub transport: TransportConfig,
    pub deletes: DeletePolicies,
}

impl ClientConfig {
    pub fn new(base_url: Url, token: SecretString) -> Self {
        Self {
            base_url,
            token,
            transport: TransportConfig::default(),
            deletes: DeletePolicies::default(),
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the network-configuration API.
///
/// Holds no entity state: every call goes back to the API. Cloning is cheap
/// and clones share the cancellation token.
#[derive(Debug, Clone)]
pub struct CloudClient {
    http: reqwest::Client,
    base_url: Url,
    cancel: CancellationToken,
    deletes: DeletePolicies,
}

impl CloudClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a [`ClientConfig`], injecting the bearer token on every request.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let http = config.transport.build_client(&config.token)?;
        let base_url = Self::normalize_base_url(config.base_url.as_str())?;

        Ok(Self {
            http,
            base_url,
            cancel: CancellationToken::new(),
            deletes: config.deletes,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self {
            http,
            base_url,
            cancel: CancellationToken::new(),
            deletes: DeletePolicies::default(),
        })
    }

    /// Abort in-flight and future calls when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_delete_policies(mut self, deletes: DeletePolicies) -> Self {
        self.deletes = deletes;
        self
    }

    /// Build the base URL ending in `/api/beta/`.
    ///
    /// `https://acme.api.openvpn.com` and `https://acme.api.openvpn.com/api/beta`
    /// both normalize to `https://acme.api.openvpn.com/api/beta/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;

        let path = url.path().trim_end_matches('/').to_owned();
        if path.ends_with(API_PREFIX) {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}{API_PREFIX}/"));
        }

        Ok(url)
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// The normalized API root (always ends in `/api/beta/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn delete_policies(&self) -> &DeletePolicies {
        &self.deletes
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Append path segments (e.g. `["connectors", id]`) to the base URL.
    ///
    /// Each segment is percent-encoded on its own, so a `/` or `?` inside an
    /// id stays part of that id. Empty, `.` and `..` segments are rejected.
    fn url(&self, segments: &[&str]) -> Result<Url, Error> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(Error::InvalidPathSegment((*bad).to_owned()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.send(self.http.get(url)).await?;
        handle_response(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        params: &[(&str, String)],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url} params={params:?}");

        let resp = self
            .send(self.http.post(url).query(params).json(body))
            .await?;
        handle_response(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self.send(self.http.put(url).json(body)).await?;
        handle_response(resp).await
    }

    pub(crate) async fn delete(&self, path: &[&str], params: &[(&str, String)]) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url} params={params:?}");

        let resp = self.send(self.http.delete(url).query(params)).await?;
        handle_empty(resp).await
    }

    /// Send a request, racing it against the cancellation token.
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, Error> {
        self.cancellable(async { request.send().await.map_err(Error::from) })
            .await
    }

    /// Run `fut` unless the client is cancelled first.
    pub(crate) async fn cancellable<T>(
        &self,
        fut: impl Future<Output = Result<T, Error>>,
    ) -> Result<T, Error> {
        tokio::select! {
            biased;
            () = self.cancel.cancelled() => Err(Error::Cancelled),
            result = fut => result,
        }
    }
}

// ── Response handling ────────────────────────────────────────────────

async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
    let status = resp.status();
    if status.is_success() {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Error::Unauthorized {
            status: status.as_u16(),
        };
    }

    let raw = resp.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ErrorResponse>(&raw)
        .ok()
        .and_then(|err| err.message.or(err.error_description).or(err.error))
        .unwrap_or_else(|| {
            if raw.is_empty() {
                status.to_string()
            } else {
                raw
            }
        });

    Error::Api {
        status: status.as_u16(),
        message,
    }
}
