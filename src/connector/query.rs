//! Query translation for the primary search entry point.

use super::{ConnectorError, FailurePolicy, SearchConnector, normalize};
use crate::filter;
use crate::model::{QueryConfig, RequestState, ResponseState};
use crate::provider::{SearchOptions, SearchProvider};
use tracing::debug;

impl<P: SearchProvider> SearchConnector<P> {
    /// Translate the request state into one provider query, execute it, and
    /// normalize the response.
    ///
    /// Runs under [`FailurePolicy::Propagate`]: a provider failure is handed
    /// back to the caller, so `on_search` must be treated as fallible.
    pub async fn on_search(
        &self,
        state: &RequestState,
        config: &QueryConfig,
    ) -> Result<ResponseState, ConnectorError> {
        let options = build_options(state, config);
        debug!(
            term = state.search_term.as_deref().unwrap_or(""),
            top = ?options.top,
            skip = ?options.skip,
            order_by = ?options.order_by,
            filter = ?options.filter,
            "search dispatch"
        );

        let outcome = FailurePolicy::Propagate.apply(
            "search",
            self.provider
                .search(state.search_term.as_deref(), &options)
                .await,
        )?;

        // Documents are normalized in the order the provider yielded them;
        // that order is already relevance- or sort-ordered upstream.
        let results = outcome.documents.into_iter().map(normalize::document).collect();
        let facets = normalize::facets(outcome.facets.unwrap_or_default());
        let total_results = outcome.count.unwrap_or(0);
        let total_pages = total_pages(total_results, state.results_per_page);

        Ok(ResponseState {
            results,
            total_results,
            total_pages,
            request_id: String::new(),
            facets,
        })
    }
}

fn build_options(state: &RequestState, config: &QueryConfig) -> SearchOptions {
    let mut options = SearchOptions {
        top: state.results_per_page,
        include_total_count: true,
        ..SearchOptions::default()
    };
    if let (Some(field), Some(direction)) = (&state.sort_field, state.sort_direction) {
        options.order_by = Some(format!("{field} {}", direction.as_str()));
    }
    options.search_fields = config.search_fields.keys().cloned().collect();
    options.select = config.result_fields.keys().cloned().collect();
    options.facets = config.facets.keys().cloned().collect();
    if let (Some(current), Some(per_page)) = (state.current, state.results_per_page) {
        options.skip = Some(skip(current, per_page));
    }
    options.filter = filter::compile(state.filters.as_deref().unwrap_or_default());
    options
}

/// Records to skip so the 1-based page `current` starts the window.
fn skip(current: u32, per_page: u32) -> u64 {
    u64::from(current.saturating_sub(1)) * u64::from(per_page)
}

/// Ceiling page count. Unpaged requests (per-page absent or zero) report
/// zero pages.
fn total_pages(total_results: u64, per_page: Option<u32>) -> u64 {
    match per_page {
        Some(per_page) if per_page > 0 => total_results.div_ceil(u64::from(per_page)),
        _ => 0,
    }
}
