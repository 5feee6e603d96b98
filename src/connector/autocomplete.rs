//! Autocomplete translation: type-ahead completions and document
//! suggestions.

use super::{FailurePolicy, SearchConnector, normalize};
use crate::model::{AutocompleteConfig, AutocompleteResponse, RequestState, Suggestion};
use crate::provider::{AutocompleteOptions, SearchProvider};
use serde_json::Value;
use std::collections::BTreeMap;

/// Suggester assumed on the provider when the caller names none.
pub const DEFAULT_SUGGESTER: &str = "sg";

impl<P: SearchProvider> SearchConnector<P> {
    /// Run the completion and document-suggestion branches for one term.
    ///
    /// Each branch runs under [`FailurePolicy::DegradeToEmpty`]: a failure
    /// in one leaves the other untouched and never fails the call.
    pub async fn on_autocomplete(
        &self,
        state: &RequestState,
        config: &AutocompleteConfig,
    ) -> AutocompleteResponse {
        let term = state.search_term.as_deref().unwrap_or("");

        // Completion branch.
        let completion_suggester = config
            .results
            .suggester
            .as_deref()
            .unwrap_or(DEFAULT_SUGGESTER);
        let options = AutocompleteOptions {
            mode: config.results.autocomplete_mode,
            top: config.results.results_per_page,
            search_fields: config.results.result_fields.keys().cloned().collect(),
        };
        let completions = FailurePolicy::DegradeToEmpty
            .apply(
                "autocomplete.completions",
                self.provider
                    .autocomplete(term, completion_suggester, &options)
                    .await,
            )
            .unwrap_or_default(); // DegradeToEmpty never yields Err
        let suggestions: Vec<Suggestion> = completions
            .into_iter()
            .map(|completion| Suggestion {
                suggestion: completion.query_plus_text,
            })
            .collect();

        // Document-suggestion branch.
        let document_suggester = config
            .suggestions
            .suggester
            .as_deref()
            .unwrap_or(DEFAULT_SUGGESTER);
        let hits = FailurePolicy::DegradeToEmpty
            .apply(
                "autocomplete.suggestions",
                self.provider.suggest(term, document_suggester).await,
            )
            .unwrap_or_default();
        let autocompleted_results = hits
            .into_iter()
            .map(|hit| {
                // The matched text rides along as a `text` field so it is
                // normalized with the rest of the document.
                let mut document = hit.document;
                document.insert("text".to_owned(), Value::String(hit.text));
                normalize::document(document)
            })
            .collect();

        let mut autocompleted_suggestions = BTreeMap::new();
        autocompleted_suggestions.insert(format!("{term}_{document_suggester}"), suggestions);

        AutocompleteResponse {
            autocompleted_results,
            autocompleted_suggestions,
        }
    }
}
