//! Provider contract: the abstract operations the connector depends on.
//!
//! [`SearchProvider`] is the seam between translation and transport. The
//! shipped implementation is [`rest::RestProvider`]; tests substitute their
//! own.

pub mod rest;
pub mod types;

use crate::model::CompletionMode;
use std::collections::BTreeMap;
use thiserror::Error;
use types::{Completion, Document, FacetResult, SuggestHit};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },
    #[error("failed to decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Other(String),
}

/// Compiled options for one query execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    pub top: Option<u32>,
    pub skip: Option<u64>,
    /// Single ordering clause, `"<field> <direction>"`.
    pub order_by: Option<String>,
    pub search_fields: Vec<String>,
    pub select: Vec<String>,
    pub facets: Vec<String>,
    pub filter: Option<String>,
    pub include_total_count: bool,
}

/// Compiled options for one type-ahead completion request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutocompleteOptions {
    pub mode: Option<CompletionMode>,
    pub top: Option<u32>,
    pub search_fields: Vec<String>,
}

/// What one query execution yielded.
///
/// `documents` arrives fully materialized from the single response body and
/// is consumed exactly once by the normalizer, in provider order.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub documents: Vec<Document>,
    pub count: Option<u64>,
    pub facets: Option<BTreeMap<String, Vec<FacetResult>>>,
}

/// The remote search provider the connector adapts to.
#[allow(async_fn_in_trait)]
pub trait SearchProvider {
    async fn search(
        &self,
        term: Option<&str>,
        options: &SearchOptions,
    ) -> Result<SearchOutcome, ProviderError>;

    async fn autocomplete(
        &self,
        term: &str,
        suggester: &str,
        options: &AutocompleteOptions,
    ) -> Result<Vec<Completion>, ProviderError>;

    async fn suggest(&self, term: &str, suggester: &str) -> Result<Vec<SuggestHit>, ProviderError>;

    async fn get_document(&self, key: &str) -> Result<Document, ProviderError>;
}
