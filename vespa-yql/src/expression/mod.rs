//! # Composable YQL Expressions
//!
//! An [`Expression`] is one node of a predicate tree. Leaves are built from a
//! [`Field`] handle, interior nodes from the free functions in this module.
//!
//! ```
//! use vespa_yql::expression::{and, field, not, or};
//!
//! // (price between 10 and 100) AND (brand is nike OR category is electronics)
//! let expr = and([
//!     field("price").between(10.0, 100.0),
//!     or([field("brand").eq("nike"), field("category").eq("electronics")]).unwrap(),
//!     not(field("discontinued").eq(true)),
//! ])
//! .unwrap();
//!
//! assert_eq!(
//!     expr.to_yql(),
//!     "((((price >= 10) and (price <= 100)) AND ((brand contains 'nike') OR (category contains 'electronics'))) AND !((discontinued = true)))"
//! );
//! ```
//!
//! ## Combining
//!
//! [`and`] / [`or`] fold left: `and([a, b, c])` is `((a AND b) AND c)`. The
//! bracket structure of the output depends on that order, so method chaining
//! (`a.and(b).and(c)`) builds the very same tree.

mod field;
mod render;

pub use field::{Field, field};

use crate::value::Value;

/// Comparison operators available on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
    Contains,
    NotContains,
    Matches,
}

impl Operator {
    /// Operator text as it appears in YQL.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::In => "in",
            Operator::NotIn => "not in",
            Operator::Contains => "contains",
            Operator::NotContains => "not contains",
            Operator::Matches => "matches",
        }
    }
}

/// How a `contains` predicate matches text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainsMode {
    #[default]
    Exact,
    Phrase,
    Fuzzy,
}

/// Keyword joining the two sides of a [`BooleanCombinator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperator {
    And,
    Or,
}

impl BooleanOperator {
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
        }
    }
}

/// `field OP value`. `contains_mode` is only consulted for [`Operator::Contains`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldComparison {
    pub field: String,
    pub operator: Operator,
    pub value: Value,
    pub contains_mode: ContainsMode,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BooleanCombinator {
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub operator: BooleanOperator,
}

/// Inclusive range, rendered as two comparisons joined by a lowercase `and`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeCondition {
    pub field: String,
    pub min: Value,
    pub max: Value,
}

/// All sub-expressions must hold within one element of an array or map field.
///
/// The search engine rejects `in` and `OR` inside `sameElement`; express those
/// as a top-level `or` over several grouped matches instead.
#[derive(Debug, Clone, PartialEq)]
pub struct SameElement {
    pub field: String,
    pub conditions: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NearestNeighbor {
    pub field: String,
    pub query_vector: String,
    pub target_hits: u32,
    pub label: Option<String>,
    pub distance_threshold: Option<f64>,
    pub approximate: Option<bool>,
}

/// Free-text matching of the request's query string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserQuery {
    pub default_index: Option<String>,
}

/// One node of a predicate tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Comparison(FieldComparison),
    Boolean(BooleanCombinator),
    Not(Box<Expression>),
    Range(RangeCondition),
    SameElement(SameElement),
    NearestNeighbor(NearestNeighbor),
    UserQuery(UserQuery),
    /// Pre-formatted text passed through untouched.
    Custom(String),
}

impl Expression {
    /// `self AND other`. Same tree as `and([self, other])`.
    pub fn and(self, other: Expression) -> Expression {
        combine(BooleanOperator::And, self, other)
    }

    /// `self OR other`. Same tree as `or([self, other])`.
    pub fn or(self, other: Expression) -> Expression {
        combine(BooleanOperator::Or, self, other)
    }

    /// Wrap in a [`Expression::Not`].
    pub fn negate(self) -> Expression {
        not(self)
    }
}

fn combine(operator: BooleanOperator, left: Expression, right: Expression) -> Expression {
    Expression::Boolean(BooleanCombinator {
        left: Box::new(left),
        right: Box::new(right),
        operator,
    })
}

fn fold(operator: BooleanOperator, expressions: impl IntoIterator<Item = Expression>) -> Option<Expression> {
    expressions
        .into_iter()
        .reduce(|acc, next| combine(operator, acc, next))
}

/// Combine expressions with `AND`, folding left.
///
/// No expressions yields `None`; a single expression is returned as is.
pub fn and(expressions: impl IntoIterator<Item = Expression>) -> Option<Expression> {
    fold(BooleanOperator::And, expressions)
}

/// Combine expressions with `OR`, folding left.
///
/// No expressions yields `None`; a single expression is returned as is.
pub fn or(expressions: impl IntoIterator<Item = Expression>) -> Option<Expression> {
    fold(BooleanOperator::Or, expressions)
}

/// Negate an expression: `!(inner)`.
pub fn not(expression: Expression) -> Expression {
    Expression::Not(Box::new(expression))
}

/// Raw YQL or ranking text, emitted verbatim.
pub fn custom(text: impl Into<String>) -> Expression {
    Expression::Custom(text.into())
}

/// `userQuery()` against the request's default index.
pub fn user_query() -> Expression {
    Expression::UserQuery(UserQuery::default())
}

/// `userQuery()` scoped to `index`. An empty index is the same as [`user_query`].
pub fn user_query_in(index: impl Into<String>) -> Expression {
    let index = index.into();
    Expression::UserQuery(UserQuery {
        default_index: (!index.is_empty()).then_some(index),
    })
}

/// Modifier applied to a nearest-neighbor predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum NearestNeighborOption {
    Label(String),
    DistanceThreshold(f64),
    Approximate(bool),
}

/// Accumulated nearest-neighbor modifiers. Unset fields are omitted from the output.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NearestNeighborConfig {
    pub label: Option<String>,
    pub distance_threshold: Option<f64>,
    pub approximate: Option<bool>,
}

impl NearestNeighborConfig {
    /// Apply options in order; a later option of the same kind wins.
    pub fn from_options(options: impl IntoIterator<Item = NearestNeighborOption>) -> Self {
        let mut config = Self::default();
        for option in options {
            config.apply(option);
        }
        config
    }

    pub fn apply(&mut self, option: NearestNeighborOption) {
        match option {
            NearestNeighborOption::Label(label) => self.label = Some(label),
            NearestNeighborOption::DistanceThreshold(threshold) => self.distance_threshold = Some(threshold),
            NearestNeighborOption::Approximate(approximate) => self.approximate = Some(approximate),
        }
    }
}

/// Tag the nearest-neighbor item with a label (referenced from rank profiles).
pub fn with_label(label: impl Into<String>) -> NearestNeighborOption {
    NearestNeighborOption::Label(label.into())
}

/// Only match vectors closer than `threshold`.
pub fn with_threshold(threshold: f64) -> NearestNeighborOption {
    NearestNeighborOption::DistanceThreshold(threshold)
}

/// Choose approximate (HNSW) or exact search.
pub fn with_approximate(approximate: bool) -> NearestNeighborOption {
    NearestNeighborOption::Approximate(approximate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_with_no_expressions_is_none() {
        assert!(and(Vec::new()).is_none());
        assert!(or(Vec::new()).is_none());
    }

    #[test]
    fn and_with_single_expression_returns_it_unchanged() {
        let single = field("price").gt(10);
        assert_eq!(and([single.clone()]), Some(single.clone()));
        assert_eq!(or([single.clone()]), Some(single));
    }

    #[test]
    fn and_folds_left() {
        let a = field("a").eq(1);
        let b = field("b").eq(2);
        let c = field("c").eq(3);

        let folded = and([a.clone(), b.clone(), c.clone()]).unwrap();
        let Expression::Boolean(outer) = &folded else {
            panic!("expected boolean node, got {folded:?}");
        };
        assert_eq!(outer.operator, BooleanOperator::And);
        assert_eq!(*outer.right, c);
        let Expression::Boolean(inner) = outer.left.as_ref() else {
            panic!("expected nested boolean node");
        };
        assert_eq!(*inner.left, a);
        assert_eq!(*inner.right, b);
    }

    #[test]
    fn method_chaining_matches_free_function() {
        let a = field("a").eq(1);
        let b = field("b").eq(2);
        let c = field("c").eq(3);

        let chained = a.clone().or(b.clone()).or(c.clone());
        let folded = or([a, b, c]).unwrap();
        assert_eq!(chained, folded);
    }

    #[test]
    fn later_nearest_neighbor_option_wins() {
        let config = NearestNeighborConfig::from_options([
            with_label("first"),
            with_threshold(0.5),
            with_label("second"),
        ]);
        assert_eq!(config.label.as_deref(), Some("second"));
        assert_eq!(config.distance_threshold, Some(0.5));
        assert_eq!(config.approximate, None);
    }

    #[test]
    fn empty_user_query_index_means_no_index() {
        assert_eq!(user_query_in(""), user_query());
    }

    #[test]
    fn operator_literals() {
        assert_eq!(Operator::NotIn.as_str(), "not in");
        assert_eq!(Operator::NotContains.as_str(), "not contains");
        assert_eq!(BooleanOperator::Or.as_str(), "OR");
    }
}
