//! Ranking clause: `rank(first, second, ...)`.
//!
//! The first expression decides which documents match; the remaining ones
//! only contribute rank features (labels, text matches, boosts).

use std::fmt;

use crate::expression::Expression;

/// Ordered collection of expressions rendered as one `rank(...)` clause.
///
/// # Examples
///
/// ```
/// use vespa_yql::expression::field;
/// use vespa_yql::rank::RankExpression;
///
/// let rank = RankExpression::new()
///     .add_condition(field("embedding").nearest_neighbor("query_vector", 1000, []))
///     .add_condition(field("brand").contains("nike"));
///
/// assert_eq!(
///     rank.to_yql(),
///     "rank(({targetHits:1000}nearestNeighbor(embedding, query_vector)), (brand contains 'nike'))"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankExpression {
    conditions: Vec<Expression>,
}

impl RankExpression {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an expression. Insertion order is rendering order.
    #[inline]
    pub fn add_condition(mut self, condition: Expression) -> Self {
        self.conditions.push(condition);
        self
    }

    #[inline]
    pub fn add_conditions(mut self, conditions: impl IntoIterator<Item = Expression>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    #[inline]
    pub fn conditions(&self) -> &[Expression] {
        &self.conditions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Render as `rank(...)`, or an empty string when nothing renders.
    pub fn to_yql(&self) -> String {
        let clauses: Vec<String> = self
            .conditions
            .iter()
            .map(Expression::to_yql)
            .filter(|s| !s.is_empty())
            .collect();

        if clauses.is_empty() {
            return String::new();
        }

        format!("rank({})", clauses.join(", "))
    }
}

impl FromIterator<Expression> for RankExpression {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        Self::new().add_conditions(iter)
    }
}

impl fmt::Display for RankExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_yql())
    }
}
