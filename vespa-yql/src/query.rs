//! # Query Assembly
//!
//! [`QueryBuilder`] accumulates the pieces of a search request and renders
//! them into a [`VespaQuery`]: the YQL string plus the request parameters
//! that travel next to it.
//!
//! ```text
//! select <fields|*> from sources <sources|*> where <conditions and rank | true>
//! ```
//!
//! Top-level conditions and the rank clause are joined with a lowercase
//! ` and `. With nothing to filter on, the clause is `where true`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

use crate::{
    errors::{ValidationError, ValidationResult},
    expression::Expression,
    rank::RankExpression,
};

/// Every input parameter key must start with this prefix.
pub const INPUT_KEY_PREFIX: &str = "input.query(";

const CLAUSE_JOINER: &str = " and ";
const LIST_SEPARATOR: &str = ", ";

/// The finished request body handed to whatever sends it to the engine.
///
/// Optional fields are only present when set to a non-default value.
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VespaQuery {
    pub yql: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranking: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(rename = "defaultIndex", default, skip_serializing_if = "Option::is_none")]
    pub default_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<BTreeMap<String, JsonValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl VespaQuery {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Builder for [`VespaQuery`].
///
/// `select`, `from` and `with_condition` append; every other setter
/// overwrites. Nothing is rendered until [`build`](Self::build).
///
/// # Examples
///
/// ```
/// use vespa_yql::expression::field;
/// use vespa_yql::query::QueryBuilder;
///
/// let query = QueryBuilder::new()
///     .select(["id", "title", "price"])
///     .from(["products"])
///     .with_condition(field("price").between(10.0, 100.0))
///     .with_hits(20)
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     query.yql,
///     "select id, title, price from sources products where ((price >= 10) and (price <= 100))"
/// );
/// assert_eq!(query.hits, Some(20));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    select_fields: Vec<String>,
    sources: Vec<String>,
    conditions: Vec<Expression>,
    rank: Option<RankExpression>,
    ranking: String,
    hits: u64,
    offset: u64,
    default_index: String,
    inputs: BTreeMap<String, JsonValue>,
    query: String,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add fields to the select list. No fields means `select *`.
    pub fn select<S: Into<String>>(mut self, fields: impl IntoIterator<Item = S>) -> Self {
        self.select_fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Add document sources. At least one is required.
    pub fn from<S: Into<String>>(mut self, sources: impl IntoIterator<Item = S>) -> Self {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Add a top-level where condition. Conditions are joined with ` and `.
    #[inline]
    pub fn with_condition(mut self, condition: Expression) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add several top-level where conditions. Handy with [`and`](crate::expression::and),
    /// whose result is an `Option`.
    #[inline]
    pub fn with_conditions(mut self, conditions: impl IntoIterator<Item = Expression>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    /// Set the rank clause, replacing any previous one.
    #[inline]
    pub fn rank(mut self, rank: RankExpression) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Rank profile name.
    #[inline]
    pub fn with_ranking(mut self, profile: impl Into<String>) -> Self {
        self.ranking = profile.into();
        self
    }

    #[inline]
    pub fn with_hits(mut self, hits: u64) -> Self {
        self.hits = hits;
        self
    }

    /// Number of leading results to skip.
    #[inline]
    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Default index for the free-text query.
    #[inline]
    pub fn with_default_index(mut self, index: impl Into<String>) -> Self {
        self.default_index = index.into();
        self
    }

    /// Add an input parameter such as `input.query(query_vector)`. A repeated key overwrites.
    #[inline]
    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.inputs.insert(key.into(), value.into());
        self
    }

    /// Free-text query consumed by `userQuery()`.
    #[inline]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Validate and render just the YQL string.
    pub fn build_yql(&self) -> ValidationResult<String> {
        self.validate()?;

        let select_clause = self.build_select_clause();
        let from_clause = self.build_from_clause();
        let where_clause = self.build_where_clause();
        log::trace!(
            "assembled clauses: select={select_clause:?} from={from_clause:?} where={where_clause:?}"
        );

        let yql = if where_clause.is_empty() {
            format!("{select_clause} {from_clause} where true")
        } else {
            format!("{select_clause} {from_clause} where {where_clause}")
        };
        log::debug!("rendered yql: {yql}");
        Ok(yql)
    }

    /// Validate and render the complete request.
    pub fn build(&self) -> ValidationResult<VespaQuery> {
        let yql = self.build_yql()?;

        Ok(VespaQuery {
            yql,
            ranking: non_empty(&self.ranking),
            hits: (self.hits > 0).then_some(self.hits),
            offset: (self.offset > 0).then_some(self.offset),
            default_index: non_empty(&self.default_index),
            input: (!self.inputs.is_empty()).then(|| self.inputs.clone()),
            query: non_empty(&self.query),
        })
    }

    fn build_select_clause(&self) -> String {
        if self.select_fields.is_empty() {
            return "select *".to_string();
        }
        format!("select {}", self.select_fields.join(LIST_SEPARATOR))
    }

    fn build_from_clause(&self) -> String {
        if self.sources.is_empty() {
            return "from sources *".to_string();
        }
        format!("from sources {}", self.sources.join(LIST_SEPARATOR))
    }

    fn build_where_clause(&self) -> String {
        let mut clauses: Vec<String> = self
            .conditions
            .iter()
            .map(Expression::to_yql)
            .filter(|s| !s.is_empty())
            .collect();

        if let Some(rank) = &self.rank {
            let rank_clause = rank.to_yql();
            if !rank_clause.is_empty() {
                clauses.push(rank_clause);
            }
        }

        clauses.join(CLAUSE_JOINER)
    }

    fn validate(&self) -> ValidationResult<()> {
        if self.sources.is_empty() {
            let err = ValidationError::missing_sources();
            log::debug!("rejecting query: {err}");
            return Err(err);
        }

        // BTreeMap iteration is sorted, so the first offending key is deterministic.
        if let Some(key) = self.inputs.keys().find(|key| !key.starts_with(INPUT_KEY_PREFIX)) {
            let err = ValidationError::malformed_input_key(key, INPUT_KEY_PREFIX);
            log::debug!("rejecting query: {err}");
            return Err(err);
        }

        Ok(())
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{INPUT_FIELD, SOURCES_FIELD};
    use crate::expression::{and, field, user_query};
    use serde_json::json;

    #[test]
    fn defaults_to_select_star_and_where_true() {
        let yql = QueryBuilder::new().from(["products"]).build_yql().unwrap();
        assert_eq!(yql, "select * from sources products where true");
    }

    #[test]
    fn select_and_from_append() {
        let yql = QueryBuilder::new()
            .select(["id"])
            .select(["title", "price"])
            .from(["products"])
            .from(["archive"])
            .build_yql()
            .unwrap();
        assert_eq!(yql, "select id, title, price from sources products, archive where true");
    }

    #[test]
    fn multiple_conditions_join_with_lowercase_and() {
        let yql = QueryBuilder::new()
            .from(["products"])
            .with_condition(field("price").gt(0))
            .with_condition(field("brand").eq("nike"))
            .build_yql()
            .unwrap();
        assert_eq!(
            yql,
            "select * from sources products where (price > 0) and (brand contains 'nike')"
        );
    }

    #[test]
    fn empty_conditions_are_dropped() {
        let yql = QueryBuilder::new()
            .from(["products"])
            .with_condition(field("sizes").contains_same_element([]))
            .rank(RankExpression::new())
            .build_yql()
            .unwrap();
        assert_eq!(yql, "select * from sources products where true");
    }

    #[test]
    fn rank_clause_follows_conditions() {
        let yql = QueryBuilder::new()
            .from(["products"])
            .with_condition(field("category").eq("fashion"))
            .rank(RankExpression::new().add_condition(user_query()))
            .build_yql()
            .unwrap();
        assert_eq!(
            yql,
            "select * from sources products where (category contains 'fashion') and rank(userQuery())"
        );
    }

    #[test]
    fn rank_replaces_previous_rank() {
        let yql = QueryBuilder::new()
            .from(["products"])
            .rank(RankExpression::new().add_condition(field("a").eq(1)))
            .rank(RankExpression::new().add_condition(field("b").eq(2)))
            .build_yql()
            .unwrap();
        assert_eq!(yql, "select * from sources products where rank((b = 2))");
    }

    #[test]
    fn missing_sources_is_rejected() {
        let err = QueryBuilder::new().with_condition(field("price").gt(0)).build().unwrap_err();
        assert_eq!(err.field, SOURCES_FIELD);
        assert_eq!(err.message, "at least one source must be specified");
    }

    #[test]
    fn malformed_input_key_is_rejected() {
        let err = QueryBuilder::new()
            .from(["products"])
            .with_input("query_vector", json!([0.1, 0.2]))
            .build()
            .unwrap_err();
        assert_eq!(err.field, INPUT_FIELD);
        assert!(err.message.contains("'query_vector'"));
    }

    #[test]
    fn sources_are_checked_before_inputs() {
        let err = QueryBuilder::new().with_input("bad", 1).build().unwrap_err();
        assert_eq!(err.field, SOURCES_FIELD);
    }

    #[test]
    fn reports_first_bad_key_in_sorted_order() {
        let err = QueryBuilder::new()
            .from(["products"])
            .with_input("zeta", 1)
            .with_input("alpha", 2)
            .with_input("input.query(ok)", 3)
            .build()
            .unwrap_err();
        assert!(err.message.contains("'alpha'"));
    }

    #[test]
    fn scalar_setters_overwrite() {
        let query = QueryBuilder::new()
            .from(["products"])
            .with_hits(10)
            .with_hits(20)
            .with_offset(5)
            .with_offset(40)
            .with_ranking("first")
            .with_ranking("second")
            .build()
            .unwrap();
        assert_eq!(query.hits, Some(20));
        assert_eq!(query.offset, Some(40));
        assert_eq!(query.ranking.as_deref(), Some("second"));
    }

    #[test]
    fn default_settings_are_omitted() {
        let query = QueryBuilder::new().from(["products"]).with_offset(0).build().unwrap();
        assert_eq!(query.ranking, None);
        assert_eq!(query.hits, None);
        assert_eq!(query.offset, None);
        assert_eq!(query.default_index, None);
        assert_eq!(query.input, None);
        assert_eq!(query.query, None);
        assert_eq!(
            query.to_json().unwrap(),
            r#"{"yql":"select * from sources products where true"}"#
        );
    }

    #[test]
    fn carries_request_settings() {
        let query = QueryBuilder::new()
            .from(["products"])
            .with_condition(user_query())
            .with_default_index("title")
            .with_query("wireless headphones")
            .with_input("input.query(query_vector)", json!([0.1, 0.2, 0.3]))
            .build()
            .unwrap();

        assert_eq!(query.default_index.as_deref(), Some("title"));
        assert_eq!(query.query.as_deref(), Some("wireless headphones"));
        let input = query.input.expect("input should be set");
        assert_eq!(input["input.query(query_vector)"], json!([0.1, 0.2, 0.3]));
    }

    #[test]
    fn json_uses_wire_field_names() {
        let query = QueryBuilder::new()
            .from(["products"])
            .with_default_index("title")
            .with_hits(10)
            .with_offset(20)
            .build()
            .unwrap();
        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["defaultIndex"], json!("title"));
        assert_eq!(value["hits"], json!(10));
        assert_eq!(value["offset"], json!(20));
        assert!(value.get("default_index").is_none());
    }

    #[test]
    fn with_conditions_accepts_optional_combinators() {
        let yql = QueryBuilder::new()
            .from(["products"])
            .with_conditions(and([field("a").eq(1), field("b").eq(2)]))
            .with_conditions(and(Vec::new()))
            .build_yql()
            .unwrap();
        assert_eq!(yql, "select * from sources products where ((a = 1) AND (b = 2))");
    }

    #[test]
    fn build_does_not_consume_builder() {
        let builder = QueryBuilder::new().from(["products"]).with_hits(5);
        let first = builder.build().unwrap();
        let second = builder.build().unwrap();
        assert_eq!(first, second);
    }
}
