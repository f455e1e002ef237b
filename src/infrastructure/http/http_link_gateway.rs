//! reqwest implementation of [`LinkGateway`].

use std::time::Duration;

use anyhow::{Context, bail};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use super::error_body::{Endpoint, GENERIC_FAILURE, classify, extract_message};
use crate::domain::entities::{BulkOutcome, BulkRequest, Credentials, LinkRecord, LinkStats};
use crate::domain::gateways::LinkGateway;
use crate::error::AppError;

/// `refresh` is only present when the backend rotates refresh tokens.
#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
}

/// `GET /api/links/` answers with a bare array, or with a page object when
/// the backend has pagination enabled.
#[derive(Deserialize)]
#[serde(untagged)]
enum LinkList {
    Plain(Vec<LinkRecord>),
    Paged { results: Vec<LinkRecord> },
}

impl LinkList {
    fn into_links(self) -> Vec<LinkRecord> {
        match self {
            LinkList::Plain(links) | LinkList::Paged { results: links } => links,
        }
    }
}

/// Client for the link backend's REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpLinkGateway {
    client: Client,
    base_url: Url,
}

impl HttpLinkGateway {
    /// Creates a gateway for the backend at `base_url`.
    ///
    /// `timeout` bounds every request from connect to the end of the body.
    ///
    /// # Errors
    ///
    /// Fails if `base_url` is not an absolute HTTP(S) URL or the TLS backend
    /// cannot be initialized.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url).context("Invalid backend URL")?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            bail!("Backend URL must be an absolute http(s) URL");
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `<base>/<segments...>/`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, AppError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AppError::internal(
                    "Backend URL cannot carry a path",
                    json!({ "base_url": self.base_url.as_str() }),
                )
            })?
            .pop_if_empty()
            .extend(segments)
            .push("");
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, access: Option<&str>) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match access {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends a request and turns non-2xx responses into [`AppError`].
    async fn send(
        &self,
        builder: RequestBuilder,
        endpoint: Endpoint,
        fallback: &str,
    ) -> Result<Response, AppError> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();

        let response = self.client.execute(request).await.inspect_err(|e| {
            tracing::warn!(%method, %path, error = %e, "Backend request failed");
        })?;

        let status = response.status();
        tracing::debug!(%method, %path, status = status.as_u16(), "Backend responded");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body, fallback);
        tracing::warn!(%method, %path, status = status.as_u16(), %message, "Backend rejected request");

        Err(classify(status, endpoint, message))
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, AppError> {
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl LinkGateway for HttpLinkGateway {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Credentials, AppError> {
        let url = self.endpoint(&["api", "auth", "token"])?;
        let builder = self
            .request(Method::POST, url, None)
            .json(&json!({ "username": username, "password": password }));

        let response = self.send(builder, Endpoint::Token, GENERIC_FAILURE).await?;
        Self::json(response).await
    }

    async fn refresh_access(&self, refresh: &str) -> Result<Credentials, AppError> {
        let url = self.endpoint(&["api", "auth", "token", "refresh"])?;
        let builder = self
            .request(Method::POST, url, None)
            .json(&json!({ "refresh": refresh }));

        let response = self.send(builder, Endpoint::Token, GENERIC_FAILURE).await?;
        let body: RefreshResponse = Self::json(response).await?;
        Ok(Credentials {
            access: body.access,
            refresh: body.refresh.unwrap_or_else(|| refresh.to_string()),
        })
    }

    async fn list_links(&self, access: &str) -> Result<Vec<LinkRecord>, AppError> {
        let url = self.endpoint(&["api", "links"])?;
        let builder = self.request(Method::GET, url, Some(access));

        let response = self.send(builder, Endpoint::Resource, GENERIC_FAILURE).await?;
        let list: LinkList = Self::json(response).await?;
        Ok(list.into_links())
    }

    async fn fetch_stats(&self, access: &str, code: &str) -> Result<LinkStats, AppError> {
        let url = self.endpoint(&["api", "links", code, "stats"])?;
        let builder = self.request(Method::GET, url, Some(access));

        let response = self.send(builder, Endpoint::Resource, GENERIC_FAILURE).await?;
        Self::json(response).await
    }

    async fn create_links_bulk(
        &self,
        access: &str,
        request: BulkRequest,
    ) -> Result<BulkOutcome, AppError> {
        let url = self.endpoint(&["api", "links", "bulk"])?;
        let builder = self.request(Method::POST, url, Some(access)).json(&request);

        let response = self.send(builder, Endpoint::Resource, GENERIC_FAILURE).await?;
        let partial = response.status() == StatusCode::MULTI_STATUS;

        let mut outcome: BulkOutcome = Self::json(response).await?;
        outcome.partial = partial;
        Ok(outcome)
    }

    async fn delete_link(&self, access: &str, code: &str) -> Result<(), AppError> {
        let url = self.endpoint(&["api", "links", code])?;
        let builder = self.request(Method::DELETE, url, Some(access));

        self.send(builder, Endpoint::Resource, "Failed to delete link")
            .await?;
        Ok(())
    }
}
