//! UI-agnostic request and response shapes.
//!
//! These mirror the state container's wire contract: `RequestState` and the
//! query configs come in from the UI side, `ResponseState` and
//! `AutocompleteResponse` go back out. Serialized names match the container's
//! JSON shape (camelCase except the historical `search_fields` /
//! `result_fields` / `facets` config keys).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sort direction for an ordered search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A user-selected `(field, values)` pair restricting results.
///
/// The values list is non-empty by contract; the filter compiler decides
/// which clauses it can translate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterClause {
    pub field: String,
    pub values: Vec<String>,
}

impl FilterClause {
    pub fn new(field: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            field: field.into(),
            values,
        }
    }

    /// Convenience for the common single-selection case.
    pub fn single(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, vec![value.into()])
    }
}

/// Search-request state owned by the external UI state container.
///
/// Any subset of fields may be populated. `current` is 1-based when present;
/// `sort_field` and `sort_direction` are meaningful only together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestState {
    pub current: Option<u32>,
    pub filters: Option<Vec<FilterClause>>,
    pub results_per_page: Option<u32>,
    pub search_term: Option<String>,
    pub sort_direction: Option<Direction>,
    pub sort_field: Option<String>,
}

/// Per-field options. The wire shape reserves an options object per field;
/// nothing is read from it yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldOptions {}

/// Declares which fields participate in full-text search, which are
/// returned, and which are faceted. Each map is a set keyed by presence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub search_fields: BTreeMap<String, FieldOptions>,
    pub result_fields: BTreeMap<String, FieldOptions>,
    pub facets: BTreeMap<String, FieldOptions>,
}

/// A single document field value as the provider returned it.
///
/// Known scalar and list shapes get their own variants; anything else
/// (nested objects and future provider types) passes through `Other`
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Boolean(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
    Other(serde_json::Value),
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Boolean(flag),
            Value::Number(number) => match number.as_f64() {
                Some(float) => Self::Number(float),
                None => Self::Other(Value::Number(number)),
            },
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::List(items.into_iter().map(Into::into).collect()),
            other @ Value::Object(_) => Self::Other(other),
        }
    }
}

/// A result field wrapped as `{raw, snippet}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEnvelope {
    pub raw: FieldValue,
    pub snippet: FieldValue,
}

impl FieldEnvelope {
    /// Wrap a value with the snippet as a verbatim copy of the raw value.
    pub fn verbatim(value: FieldValue) -> Self {
        Self {
            snippet: value.clone(),
            raw: value,
        }
    }
}

/// One normalized result: field name to wrapped value.
pub type ResultEntry = BTreeMap<String, FieldEnvelope>;

/// Facet bucket group kind. Only plain value buckets are produced today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetKind {
    Value,
}

/// One aggregated facet bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetValue {
    pub value: FieldValue,
    pub count: u64,
}

/// A group of facet buckets for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetGroup {
    #[serde(rename = "type")]
    pub kind: FacetKind,
    pub data: Vec<FacetValue>,
}

/// Normalized search response handed back to the UI state container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseState {
    pub results: Vec<ResultEntry>,
    pub total_results: u64,
    pub total_pages: u64,
    /// Request correlation id. Always empty; reserved for tracing.
    pub request_id: String,
    pub facets: BTreeMap<String, Vec<FacetGroup>>,
}

/// Provider setting controlling whether type-ahead matches one or two
/// trailing terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompletionMode {
    OneTerm,
    TwoTerms,
    OneTermWithContext,
}

/// Configuration for the completion branch of autocomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AutocompleteResultsConfig {
    pub results_per_page: Option<u32>,
    pub suggester: Option<String>,
    #[serde(rename = "result_fields")]
    pub result_fields: BTreeMap<String, FieldOptions>,
    pub autocomplete_mode: Option<CompletionMode>,
}

/// Configuration for the document-suggestion branch of autocomplete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteSuggestionsConfig {
    pub suggester: Option<String>,
    /// Document fields the suggester matches against. Accepted for config
    /// parity with the UI contract; not forwarded to the provider yet.
    pub document_fields: Vec<String>,
    /// Suggestion count limit. Accepted but not forwarded yet.
    pub size: Option<u32>,
}

/// Autocomplete configuration: a completion branch and a document-suggestion
/// branch, driven independently for the same search term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutocompleteConfig {
    pub results: AutocompleteResultsConfig,
    pub suggestions: AutocompleteSuggestionsConfig,
}

/// One type-ahead completion offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggestion: String,
}

/// Normalized autocomplete response.
///
/// `autocompleted_suggestions` is keyed by `"<searchTerm>_<suggesterId>"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteResponse {
    pub autocompleted_results: Vec<ResultEntry>,
    pub autocompleted_suggestions: BTreeMap<String, Vec<Suggestion>>,
}
