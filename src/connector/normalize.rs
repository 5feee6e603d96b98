//! Response normalization into the UI-agnostic result shape.

use crate::model::{FacetGroup, FacetKind, FacetValue, FieldEnvelope, ResultEntry};
use crate::provider::types::{Document, FacetResult};
use std::collections::BTreeMap;

/// Wrap every field of a provider document as `{raw, snippet}`.
///
/// No highlighting or truncation is computed; the snippet is a verbatim
/// copy of the raw value.
pub fn document(document: Document) -> ResultEntry {
    document
        .into_iter()
        .map(|(field, value)| (field, FieldEnvelope::verbatim(value.into())))
        .collect()
}

/// Convert provider facet buckets into the faceted-navigation map: one
/// value-typed bucket group per field, provider order and counts verbatim.
pub fn facets(wire: BTreeMap<String, Vec<FacetResult>>) -> BTreeMap<String, Vec<FacetGroup>> {
    wire.into_iter()
        .map(|(field, buckets)| {
            let data = buckets
                .into_iter()
                .map(|bucket| FacetValue {
                    value: bucket.value.into(),
                    count: bucket.count,
                })
                .collect();
            (
                field,
                vec![FacetGroup {
                    kind: FacetKind::Value,
                    data,
                }],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldValue;
    use serde_json::json;

    fn sample_document() -> Document {
        serde_json::from_value(json!({
            "business_title": "Program Manager",
            "visitors": 12000,
            "tags": ["full-time", "senior"]
        }))
        .expect("document")
    }

    #[test]
    fn every_field_is_wrapped_with_a_verbatim_snippet() {
        let entry = document(sample_document());
        assert_eq!(entry.len(), 3);
        for envelope in entry.values() {
            assert_eq!(envelope.raw, envelope.snippet);
        }
        assert_eq!(
            entry["business_title"].raw,
            FieldValue::Text("Program Manager".into())
        );
        assert_eq!(entry["visitors"].raw, FieldValue::Number(12000.0));
    }

    #[test]
    fn list_fields_survive_wrapping() {
        let entry = document(sample_document());
        assert_eq!(
            entry["tags"].raw,
            FieldValue::List(vec![
                FieldValue::Text("full-time".into()),
                FieldValue::Text("senior".into()),
            ])
        );
    }

    #[test]
    fn facet_buckets_become_one_value_group_per_field() {
        let wire: BTreeMap<String, Vec<FacetResult>> = BTreeMap::from([(
            "acres".to_owned(),
            vec![FacetResult {
                value: json!("100-200"),
                count: 5,
            }],
        )]);
        let normalized = facets(wire);
        let groups = &normalized["acres"];
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].kind, FacetKind::Value);
        assert_eq!(
            groups[0].data,
            vec![FacetValue {
                value: FieldValue::Text("100-200".into()),
                count: 5,
            }]
        );
    }

    #[test]
    fn bucket_order_is_preserved() {
        let wire: BTreeMap<String, Vec<FacetResult>> = BTreeMap::from([(
            "states".to_owned(),
            vec![
                FacetResult { value: json!("NY"), count: 9 },
                FacetResult { value: json!("CA"), count: 3 },
            ],
        )]);
        let normalized = facets(wire);
        let data = &normalized["states"][0].data;
        assert_eq!(data[0].value, FieldValue::Text("NY".into()));
        assert_eq!(data[1].value, FieldValue::Text("CA".into()));
    }

    #[test]
    fn absent_facets_normalize_to_an_empty_map() {
        assert!(facets(BTreeMap::new()).is_empty());
    }
}
