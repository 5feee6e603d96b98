//! Wire shapes for the provider's REST surface.
//!
//! Request bodies are built from the compiled option structs; response
//! bodies carry the OData bookkeeping names (`@odata.count`,
//! `@search.facets`, `@search.text`) the service uses.

use super::{AutocompleteOptions, SearchOptions};
use crate::model::CompletionMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A provider document: an open field bag keyed by field name.
pub type Document = serde_json::Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u64>,
    // The service spells this one without the camel hump.
    #[serde(rename = "orderby", skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_fields: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub count: bool,
}

impl SearchRequest {
    pub fn from_options(term: Option<&str>, options: &SearchOptions) -> Self {
        Self {
            search: term.map(str::to_owned),
            top: options.top,
            skip: options.skip,
            order_by: options.order_by.clone(),
            search_fields: join_fields(&options.search_fields),
            select: join_fields(&options.select),
            facets: (!options.facets.is_empty()).then(|| options.facets.clone()),
            filter: options.filter.clone(),
            count: options.include_total_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    pub search: String,
    pub suggester_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete_mode: Option<CompletionMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_fields: Option<String>,
}

impl AutocompleteRequest {
    pub fn from_options(term: &str, suggester: &str, options: &AutocompleteOptions) -> Self {
        Self {
            search: term.to_owned(),
            suggester_name: suggester.to_owned(),
            autocomplete_mode: options.mode,
            top: options.top,
            search_fields: join_fields(&options.search_fields),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestRequest {
    pub search: String,
    pub suggester_name: String,
}

/// Fields the service sends as a comma-joined list.
fn join_fields(fields: &[String]) -> Option<String> {
    (!fields.is_empty()).then(|| fields.join(","))
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "@odata.count", default)]
    pub count: Option<u64>,
    #[serde(rename = "@search.facets", default)]
    pub facets: Option<BTreeMap<String, Vec<FacetResult>>>,
    #[serde(default)]
    pub value: Vec<Document>,
}

/// One aggregation bucket as the service reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetResult {
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub count: u64,
}

/// One type-ahead completion from the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Completion {
    pub text: String,
    #[serde(rename = "queryPlusText")]
    pub query_plus_text: String,
}

/// One suggested document plus the text the suggester matched.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestHit {
    #[serde(rename = "@search.text")]
    pub text: String,
    #[serde(flatten)]
    pub document: Document,
}

/// Generic `{"value": [...]}` envelope used by several operations.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueList<T> {
    pub value: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorBody {
    pub error: ServiceErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_request_omits_absent_options() {
        let request = SearchRequest::from_options(None, &SearchOptions::default());
        let wire = serde_json::to_value(&request).expect("serialize");
        assert_eq!(wire, json!({"count": false}));
    }

    #[test]
    fn search_request_carries_every_compiled_option() {
        let options = SearchOptions {
            top: Some(10),
            skip: Some(10),
            order_by: Some("posting_date desc".into()),
            search_fields: vec!["business_title".into(), "job_description".into()],
            select: vec!["id".into(), "business_title".into()],
            facets: vec!["states".into()],
            filter: Some("states eq \"NY\"".into()),
            include_total_count: true,
        };
        let wire = serde_json::to_value(SearchRequest::from_options(Some("manager"), &options))
            .expect("serialize");
        assert_eq!(
            wire,
            json!({
                "search": "manager",
                "top": 10,
                "skip": 10,
                "orderby": "posting_date desc",
                "searchFields": "business_title,job_description",
                "select": "id,business_title",
                "facets": ["states"],
                "filter": "states eq \"NY\"",
                "count": true
            })
        );
    }

    #[test]
    fn autocomplete_request_spells_mode_and_fields_for_the_wire() {
        let options = AutocompleteOptions {
            mode: Some(CompletionMode::OneTermWithContext),
            top: Some(5),
            search_fields: vec!["business_title".into()],
        };
        let wire = serde_json::to_value(AutocompleteRequest::from_options("man", "sg", &options))
            .expect("serialize");
        assert_eq!(
            wire,
            json!({
                "search": "man",
                "suggesterName": "sg",
                "autocompleteMode": "oneTermWithContext",
                "top": 5,
                "searchFields": "business_title"
            })
        );
    }

    #[test]
    fn search_response_reads_odata_bookkeeping_names() {
        let response: SearchResponse = serde_json::from_value(json!({
            "@odata.count": 25,
            "@search.facets": {"acres": [{"value": "100-200", "count": 5}]},
            "value": [{"id": "1"}]
        }))
        .expect("deserialize");
        assert_eq!(response.count, Some(25));
        assert_eq!(response.value.len(), 1);
        let facets = response.facets.expect("facets");
        assert_eq!(facets["acres"][0].value, json!("100-200"));
    }

    #[test]
    fn search_response_tolerates_a_bare_page() {
        let response: SearchResponse =
            serde_json::from_value(json!({"value": []})).expect("deserialize");
        assert_eq!(response.count, None);
        assert!(response.facets.is_none());
    }

    #[test]
    fn suggest_hit_splits_matched_text_from_document_fields() {
        let hit: SuggestHit = serde_json::from_value(json!({
            "@search.text": "Manager",
            "business_title": "Program Manager"
        }))
        .expect("deserialize");
        assert_eq!(hit.text, "Manager");
        assert_eq!(hit.document["business_title"], json!("Program Manager"));
    }
}
