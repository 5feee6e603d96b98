//! Filter expressions and their textual provider grammar.
//!
//! Selected-filter clauses compile through a small expression tree rather
//! than string concatenation, so composition is explicit and the serializer
//! owns the grammar in one place.

use crate::model::FilterClause;
use tracing::warn;

/// A literal on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl FilterValue {
    fn render(&self, out: &mut String) {
        match self {
            Self::Text(text) => {
                out.push('"');
                out.push_str(text);
                out.push('"');
            }
            Self::Number(number) => out.push_str(&number.to_string()),
            Self::Boolean(flag) => out.push_str(if *flag { "true" } else { "false" }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl CompareOp {
    fn as_odata(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Ge => "ge",
            Self::Lt => "lt",
            Self::Le => "le",
        }
    }
}

/// A provider filter expression: field comparisons joined by explicit
/// boolean combinators.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    Compare {
        field: String,
        op: CompareOp,
        value: FilterValue,
    },
    And(Vec<FilterExpr>),
    Or(Vec<FilterExpr>),
    Not(Box<FilterExpr>),
}

impl FilterExpr {
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    pub fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<FilterValue>) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// Serialize to the provider's textual filter grammar.
    pub fn to_odata(&self) -> String {
        let mut out = String::new();
        self.render(&mut out);
        out
    }

    fn render(&self, out: &mut String) {
        match self {
            Self::Compare { field, op, value } => {
                out.push_str(field);
                out.push(' ');
                out.push_str(op.as_odata());
                out.push(' ');
                value.render(out);
            }
            Self::And(children) => Self::render_group(children, " and ", out),
            Self::Or(children) => Self::render_group(children, " or ", out),
            Self::Not(inner) => {
                out.push_str("not (");
                inner.render(out);
                out.push(')');
            }
        }
    }

    // Nested combinators are parenthesized; comparisons stand bare.
    fn render_group(children: &[FilterExpr], joiner: &str, out: &mut String) {
        for (index, child) in children.iter().enumerate() {
            if index > 0 {
                out.push_str(joiner);
            }
            let grouped = matches!(child, Self::And(_) | Self::Or(_));
            if grouped {
                out.push('(');
            }
            child.render(out);
            if grouped {
                out.push(')');
            }
        }
    }
}

/// Compile selected-filter clauses into one provider filter expression.
///
/// Only clauses with exactly one selected value have an agreed translation;
/// the rest are skipped with a warning. Multiple qualifying clauses combine
/// under an explicit `and`. Returns `None` when nothing qualifies, so the
/// query carries no filter parameter at all.
pub fn compile(clauses: &[FilterClause]) -> Option<String> {
    let mut terms = Vec::new();
    for clause in clauses {
        match clause.values.as_slice() {
            [value] => terms.push(FilterExpr::eq(clause.field.clone(), value.as_str())),
            values => warn!(
                field = %clause.field,
                selected = values.len(),
                "skipping filter clause without a single-value translation"
            ),
        }
    }

    match terms.len() {
        0 => None,
        1 => Some(terms.remove(0).to_odata()),
        _ => Some(FilterExpr::And(terms).to_odata()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_value_clause_compiles_to_equality() {
        let clauses = [FilterClause::single("states", "NY")];
        assert_eq!(compile(&clauses).as_deref(), Some("states eq \"NY\""));
    }

    #[test]
    fn empty_clause_list_compiles_to_nothing() {
        assert_eq!(compile(&[]), None);
    }

    #[test]
    fn multi_value_clauses_are_skipped() {
        let clauses = [
            FilterClause::new("states", vec!["NY".into(), "CA".into()]),
            FilterClause::new("acres", vec![]),
        ];
        assert_eq!(compile(&clauses), None);
    }

    #[test]
    fn qualifying_clauses_combine_under_explicit_and() {
        let clauses = [
            FilterClause::single("states", "NY"),
            FilterClause::new("acres", vec!["100-200".into(), "200-300".into()]),
            FilterClause::single("world_heritage_site", "true"),
        ];
        assert_eq!(
            compile(&clauses).as_deref(),
            Some("states eq \"NY\" and world_heritage_site eq \"true\"")
        );
    }

    #[test]
    fn comparisons_render_each_operator() {
        let expr = FilterExpr::compare("visitors", CompareOp::Ge, 10_000.0);
        assert_eq!(expr.to_odata(), "visitors ge 10000");
    }

    #[test]
    fn boolean_literals_render_bare() {
        let expr = FilterExpr::eq("world_heritage_site", true);
        assert_eq!(expr.to_odata(), "world_heritage_site eq true");
    }

    #[test]
    fn nested_combinators_are_parenthesized() {
        let expr = FilterExpr::And(vec![
            FilterExpr::Or(vec![
                FilterExpr::eq("states", "NY"),
                FilterExpr::eq("states", "CA"),
            ]),
            FilterExpr::eq("acres", "100-200"),
        ]);
        assert_eq!(
            expr.to_odata(),
            "(states eq \"NY\" or states eq \"CA\") and acres eq \"100-200\""
        );
    }

    #[test]
    fn negation_wraps_its_operand() {
        let expr = FilterExpr::Not(Box::new(FilterExpr::eq("states", "NY")));
        assert_eq!(expr.to_odata(), "not (states eq \"NY\")");
    }
}
