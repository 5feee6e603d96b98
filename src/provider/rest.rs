//! reqwest-backed provider speaking the service's REST surface.
//!
//! One stateless call per operation: build the body, POST (or GET for
//! document lookup) with the `api-key` header, decode. Non-2xx responses
//! become [`ProviderError::Service`] with the service's error message when
//! the body carries one.

use super::types::{
    AutocompleteRequest, Completion, Document, SearchRequest, SearchResponse, ServiceErrorBody,
    SuggestHit, SuggestRequest, ValueList,
};
use super::{AutocompleteOptions, ProviderError, SearchOptions, SearchOutcome, SearchProvider};
use crate::config::{ConfigError, ConnectorSettings};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const API_KEY_HEADER: &str = "api-key";

pub struct RestProvider {
    http: Client,
    /// `{endpoint}/indexes/{index}/docs`, no trailing slash.
    docs_base: String,
    api_key: String,
    api_version: String,
}

impl RestProvider {
    pub fn new(settings: &ConnectorSettings) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(settings.options.timeout)
            .build()?;
        Ok(Self {
            http,
            docs_base: format!(
                "{}/indexes/{}/docs",
                settings.endpoint.trim_end_matches('/'),
                settings.index_name
            ),
            api_key: settings.query_key.clone(),
            api_version: settings.options.api_version.clone(),
        })
    }

    fn operation_url(&self, operation: &str) -> String {
        format!(
            "{}/{}?api-version={}",
            self.docs_base, operation, self.api_version
        )
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: &str,
        body: &B,
    ) -> Result<T, ProviderError> {
        let url = self.operation_url(operation);
        debug!(%url, "provider request");
        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            return Err(ProviderError::Service {
                status: status.as_u16(),
                message: service_message(&bytes),
            });
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn service_message(body: &[u8]) -> String {
    serde_json::from_slice::<ServiceErrorBody>(body)
        .map(|parsed| parsed.error.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(body).into_owned())
}

/// Drop `@search.*` bookkeeping so documents carry index fields only,
/// matching what the official SDKs hand to callers.
fn strip_search_metadata(mut document: Document) -> Document {
    document.retain(|field, _| !field.starts_with("@search."));
    document
}

impl SearchProvider for RestProvider {
    async fn search(
        &self,
        term: Option<&str>,
        options: &SearchOptions,
    ) -> Result<SearchOutcome, ProviderError> {
        let request = SearchRequest::from_options(term, options);
        let response: SearchResponse = self.post("search", &request).await?;
        Ok(SearchOutcome {
            documents: response
                .value
                .into_iter()
                .map(strip_search_metadata)
                .collect(),
            count: response.count,
            facets: response.facets,
        })
    }

    async fn autocomplete(
        &self,
        term: &str,
        suggester: &str,
        options: &AutocompleteOptions,
    ) -> Result<Vec<Completion>, ProviderError> {
        let request = AutocompleteRequest::from_options(term, suggester, options);
        let response: ValueList<Completion> = self.post("autocomplete", &request).await?;
        Ok(response.value)
    }

    async fn suggest(&self, term: &str, suggester: &str) -> Result<Vec<SuggestHit>, ProviderError> {
        let request = SuggestRequest {
            search: term.to_owned(),
            suggester_name: suggester.to_owned(),
        };
        let response: ValueList<SuggestHit> = self.post("suggest", &request).await?;
        Ok(response.value)
    }

    async fn get_document(&self, key: &str) -> Result<Document, ProviderError> {
        let url = format!(
            "{}/{}?api-version={}",
            self.docs_base,
            urlencoding::encode(key),
            self.api_version
        );
        debug!(%url, "provider request");
        let response = self
            .http
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
