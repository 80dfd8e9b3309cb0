use crate::value::Value;

use super::{
    ContainsMode, Expression, FieldComparison, NearestNeighbor, NearestNeighborConfig, NearestNeighborOption,
    Operator, RangeCondition, SameElement,
};

/// Handle for building predicates on one field.
///
/// Holds nothing but the field name, so it can be reused for any number of
/// predicates.
///
/// # Examples
///
/// ```
/// use vespa_yql::expression::field;
///
/// assert_eq!(field("price").gte(100).to_yql(), "(price >= 100)");
/// assert_eq!(
///     field("category").is_in(["electronics", "gadgets"]).to_yql(),
///     "(category in ('electronics', 'gadgets'))"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Field {
    name: String,
}

/// Shorthand for [`Field::new`].
#[inline]
pub fn field(name: impl Into<String>) -> Field {
    Field::new(name)
}

impl Field {
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn compare(&self, operator: Operator, value: Value) -> Expression {
        Expression::Comparison(FieldComparison {
            field: self.name.clone(),
            operator,
            value,
            contains_mode: ContainsMode::Exact,
        })
    }

    // ========== Ordered comparisons ==========

    /// Equality. String values render as `contains`, everything else as `=`.
    pub fn eq(&self, value: impl Into<Value>) -> Expression {
        self.compare(Operator::Eq, value.into())
    }

    /// Inequality. String values render as `!(field contains value)`.
    pub fn not_eq(&self, value: impl Into<Value>) -> Expression {
        self.compare(Operator::NotEq, value.into())
    }

    pub fn gt(&self, value: impl Into<Value>) -> Expression {
        self.compare(Operator::Gt, value.into())
    }

    pub fn gte(&self, value: impl Into<Value>) -> Expression {
        self.compare(Operator::Gte, value.into())
    }

    pub fn lt(&self, value: impl Into<Value>) -> Expression {
        self.compare(Operator::Lt, value.into())
    }

    pub fn lte(&self, value: impl Into<Value>) -> Expression {
        self.compare(Operator::Lte, value.into())
    }

    // ========== Set membership ==========

    /// Field value is one of `values`.
    pub fn is_in<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Expression {
        self.compare(Operator::In, collect_list(values))
    }

    /// Field value is none of `values`.
    pub fn not_in<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Expression {
        self.compare(Operator::NotIn, collect_list(values))
    }

    // ========== Text ==========

    /// Exact `contains` match.
    pub fn contains(&self, value: impl Into<Value>) -> Expression {
        self.contains_with(value, ContainsMode::Exact)
    }

    /// `contains` with an explicit match mode.
    ///
    /// ```
    /// use vespa_yql::expression::{ContainsMode, field};
    ///
    /// let phrase = field("brand").contains_with(vec!["nike", "air"], ContainsMode::Phrase);
    /// assert_eq!(phrase.to_yql(), "(brand contains phrase('nike', 'air'))");
    /// ```
    pub fn contains_with(&self, value: impl Into<Value>, mode: ContainsMode) -> Expression {
        Expression::Comparison(FieldComparison {
            field: self.name.clone(),
            operator: Operator::Contains,
            value: value.into(),
            contains_mode: mode,
        })
    }

    /// `not contains`. A dedicated operator, not a negated `contains`.
    pub fn not_contains(&self, value: impl Into<String>) -> Expression {
        self.compare(Operator::NotContains, Value::String(value.into()))
    }

    /// Regular-expression match.
    pub fn matches(&self, pattern: impl Into<String>) -> Expression {
        self.compare(Operator::Matches, Value::String(pattern.into()))
    }

    // ========== Composite ==========

    /// Inclusive range, `min <= field <= max`.
    pub fn between(&self, min: impl Into<Value>, max: impl Into<Value>) -> Expression {
        Expression::Range(RangeCondition {
            field: self.name.clone(),
            min: min.into(),
            max: max.into(),
        })
    }

    /// Vector similarity against the query tensor named `query_vector`.
    ///
    /// Usable both as a filter and inside a rank expression.
    ///
    /// ```
    /// use vespa_yql::expression::{field, with_label};
    ///
    /// let nn = field("embedding").nearest_neighbor("query_vector", 1000, [with_label("main_query")]);
    /// assert_eq!(
    ///     nn.to_yql(),
    ///     "({targetHits:1000,label:'main_query'}nearestNeighbor(embedding, query_vector))"
    /// );
    /// ```
    pub fn nearest_neighbor(
        &self,
        query_vector: impl Into<String>,
        target_hits: u32,
        options: impl IntoIterator<Item = NearestNeighborOption>,
    ) -> Expression {
        let config = NearestNeighborConfig::from_options(options);
        Expression::NearestNeighbor(NearestNeighbor {
            field: self.name.clone(),
            query_vector: query_vector.into(),
            target_hits,
            label: config.label,
            distance_threshold: config.distance_threshold,
            approximate: config.approximate,
        })
    }

    /// Require every condition to match within the same array/map element.
    pub fn contains_same_element(&self, conditions: impl IntoIterator<Item = Expression>) -> Expression {
        Expression::SameElement(SameElement {
            field: self.name.clone(),
            conditions: conditions.into_iter().collect(),
        })
    }
}

fn collect_list<V: Into<Value>>(values: impl IntoIterator<Item = V>) -> Value {
    Value::List(values.into_iter().map(Into::into).collect())
}
