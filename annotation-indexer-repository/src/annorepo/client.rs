//! AnnoRepo client implementation.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, info, trace};
use url::Url;

use crate::errors::StoreError;
use crate::interfaces::AnnotationStore;
use crate::types::{ResultPage, SearchSession, SessionInfo};
use annotation_indexer_shared::Query;

const USER_AGENT: &str = concat!("annotation-indexer/", env!("CARGO_PKG_VERSION"));

/// Client for the search API of one AnnoRepo container.
///
/// # Example
///
/// ```ignore
/// let store = AnnoRepoClient::new("https://annorepo.example.org", "letters")?;
/// let session = store.open_search(&Query::new().equals("body.type", "LetterBody")).await?;
/// let page = store.read_page(&session, "0").await?;
/// ```
pub struct AnnoRepoClient {
    http: Client,
    host: String,
    container: String,
}

impl AnnoRepoClient {
    /// Create a client for `container` on the AnnoRepo server at `host`.
    pub fn new(host: &str, container: &str) -> Result<Self, StoreError> {
        Url::parse(host).map_err(|e| StoreError::protocol(format!("Invalid host {host}: {e}")))?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| StoreError::transport(e.to_string()))?;

        info!(host = %host, container = %container, "Created AnnoRepo client");

        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
            container: container.to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/services/{}/search", self.host, self.container)
    }

    fn session_url(&self, session: &SearchSession) -> String {
        format!("{}/{}", self.search_url(), session.id)
    }

    /// Read a JSON body, mapping non-success statuses to errors.
    async fn read_json(response: Response) -> Result<Value, StoreError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::status(status.as_u16(), body));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| StoreError::protocol(format!("Invalid JSON response: {e}")))
    }
}

/// The search id is the last path segment of the `Location` header.
fn search_id_from_location(location: &str) -> Option<String> {
    let path = location.split(['?', '#']).next()?;
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl AnnotationStore for AnnoRepoClient {
    async fn open_search(&self, query: &Query) -> Result<SearchSession, StoreError> {
        trace!(query = %query.to_value(), "Opening search");

        let response = self
            .http
            .post(self.search_url())
            .json(&query.to_value())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::status(status.as_u16(), body));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| StoreError::protocol("Search response lacks a Location header"))?;

        let id = search_id_from_location(location).ok_or_else(|| {
            StoreError::protocol(format!("Cannot read search id from Location {location}"))
        })?;

        debug!(search_id = %id, "Opened search session");
        Ok(SearchSession::new(id))
    }

    async fn read_session_info(&self, session: &SearchSession) -> Result<SessionInfo, StoreError> {
        let response = self
            .http
            .get(format!("{}/info", self.session_url(session)))
            .send()
            .await?;

        let info = Self::read_json(response).await?;
        Ok(SessionInfo::from_value(&info))
    }

    async fn read_page(
        &self,
        session: &SearchSession,
        page: &str,
    ) -> Result<ResultPage, StoreError> {
        let response = self
            .http
            .get(self.session_url(session))
            .query(&[("page", page)])
            .send()
            .await?;

        let body = Self::read_json(response).await?;
        let page: ResultPage = serde_json::from_value(body)
            .map_err(|e| StoreError::protocol(format!("Invalid result page: {e}")))?;

        trace!(
            search_id = %session.id,
            items = page.len(),
            next = ?page.next,
            "Read result page"
        );
        Ok(page)
    }

    async fn about(&self) -> Result<Value, StoreError> {
        let response = self
            .http
            .get(format!("{}/about", self.host))
            .send()
            .await?;

        Self::read_json(response).await
    }
}
