//! Expression → YQL text.
//!
//! | Node                          | Output                                                  |
//! |-------------------------------|---------------------------------------------------------|
//! | `eq` on a string              | `(field contains 'v')`                                  |
//! | `not_eq` on a string          | `!(field contains 'v')`                                 |
//! | other comparisons             | `(field OP v)`                                          |
//! | `contains`, phrase            | `(field contains phrase('a', 'b'))`                     |
//! | `contains`, fuzzy             | `(field contains fuzzy('v'))`                           |
//! | range                         | `((field >= min) and (field <= max))`                   |
//! | negation                      | `!(inner)`                                              |
//! | boolean                       | `(left AND right)` / `(left OR right)`                  |
//! | same element                  | `(field contains sameElement(c1, c2))`                  |
//! | nearest neighbor              | `({targetHits:N,label:'L'}nearestNeighbor(field, q))`   |
//! | user query                    | `userQuery()` / `{defaultIndex:"idx"}userQuery()`       |
//! | custom                        | verbatim                                                |
//!
//! An empty string means "contributes nothing"; parents drop such children.

use std::fmt;

use crate::value::{format_in_values, format_value, quote};

use super::{
    BooleanCombinator, ContainsMode, Expression, FieldComparison, NearestNeighbor, Operator, RangeCondition,
    SameElement, UserQuery,
};

const ARGUMENT_SEPARATOR: &str = ", ";

impl Expression {
    /// Render this node and its children as YQL.
    pub fn to_yql(&self) -> String {
        match self {
            Self::Comparison(comparison) => render_comparison(comparison),
            Self::Boolean(boolean) => render_boolean(boolean),
            Self::Not(inner) => {
                let inner = inner.to_yql();
                if inner.is_empty() {
                    return String::new();
                }
                format!("!({inner})")
            }
            Self::Range(range) => render_range(range),
            Self::SameElement(same_element) => render_same_element(same_element),
            Self::NearestNeighbor(nn) => render_nearest_neighbor(nn),
            Self::UserQuery(user_query) => render_user_query(user_query),
            Self::Custom(text) => text.clone(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_yql())
    }
}

fn render_comparison(comparison: &FieldComparison) -> String {
    let FieldComparison {
        field,
        operator,
        value,
        contains_mode,
    } = comparison;

    match operator {
        // String equality is a term match in YQL.
        Operator::Eq if value.is_string() => format!("({field} contains {})", format_value(value)),
        Operator::NotEq if value.is_string() => format!("!({field} contains {})", format_value(value)),
        Operator::In | Operator::NotIn => format!("({field} {} {})", operator.as_str(), format_in_values(value)),
        Operator::Contains => match contains_mode {
            ContainsMode::Exact => format!("({field} contains {})", format_value(value)),
            ContainsMode::Phrase => {
                if let Some(keywords) = value.as_string_list() {
                    let quoted: Vec<String> = keywords.into_iter().map(quote).collect();
                    format!("({field} contains phrase({}))", quoted.join(ARGUMENT_SEPARATOR))
                } else if value.is_string() {
                    format!("({field} contains phrase({}))", format_value(value))
                } else {
                    format!("({field} contains {})", format_value(value))
                }
            }
            ContainsMode::Fuzzy => format!("({field} contains fuzzy({}))", format_value(value)),
        },
        Operator::Eq
        | Operator::NotEq
        | Operator::Gt
        | Operator::Gte
        | Operator::Lt
        | Operator::Lte
        | Operator::NotContains
        | Operator::Matches => format!("({field} {} {})", operator.as_str(), format_value(value)),
    }
}

fn render_boolean(boolean: &BooleanCombinator) -> String {
    let left = boolean.left.to_yql();
    let right = boolean.right.to_yql();
    match (left.is_empty(), right.is_empty()) {
        (false, false) => format!("({left} {} {right})", boolean.operator.as_str()),
        (false, true) => left,
        (true, false) => right,
        (true, true) => String::new(),
    }
}

fn render_range(range: &RangeCondition) -> String {
    let RangeCondition { field, min, max } = range;
    // Lowercase `and` here is part of the emitted grammar, unlike BooleanCombinator.
    format!(
        "(({field} >= {}) and ({field} <= {}))",
        format_value(min),
        format_value(max)
    )
}

fn render_same_element(same_element: &SameElement) -> String {
    let clauses: Vec<String> = same_element
        .conditions
        .iter()
        .map(Expression::to_yql)
        .filter(|s| !s.is_empty())
        .collect();

    if clauses.is_empty() {
        return String::new();
    }

    format!(
        "({} contains sameElement({}))",
        same_element.field,
        clauses.join(ARGUMENT_SEPARATOR)
    )
}

fn render_nearest_neighbor(nn: &NearestNeighbor) -> String {
    // targetHits, label, distanceThreshold, approximate: order is fixed.
    let mut params = Vec::with_capacity(4);
    params.push(format!("targetHits:{}", nn.target_hits));
    if let Some(label) = &nn.label {
        params.push(format!("label:'{label}'"));
    }
    // A non-finite threshold bounds nothing and has no literal form, so it is left out.
    if let Some(threshold) = nn.distance_threshold.filter(|t| t.is_finite()) {
        params.push(format!("distanceThreshold:{threshold:.6}"));
    }
    if let Some(approximate) = nn.approximate {
        params.push(format!("approximate:{approximate}"));
    }

    format!(
        "({{{}}}nearestNeighbor({}, {}))",
        params.join(","),
        nn.field,
        nn.query_vector
    )
}

fn render_user_query(user_query: &UserQuery) -> String {
    match user_query.default_index.as_deref() {
        Some(index) if !index.is_empty() => format!("{{defaultIndex:\"{index}\"}}userQuery()"),
        _ => "userQuery()".to_string(),
    }
}
