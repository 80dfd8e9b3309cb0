//! Composable YQL query building.
//!
//! Build predicate trees from [`expression::field`] handles and the free
//! combinators in [`expression`], collect ranking expressions in a
//! [`RankExpression`], and render everything into a [`VespaQuery`] with a
//! [`QueryBuilder`]. Rendering is pure and never fails; the only error is a
//! [`ValidationError`] raised by [`QueryBuilder::build`].
//!
//! ```
//! use vespa_yql::prelude::*;
//!
//! let query = QueryBuilder::new()
//!     .select(["id", "title"])
//!     .from(["products"])
//!     .with_condition(
//!         and([field("category").eq("electronics"), field("stock").gt(0)]).unwrap(),
//!     )
//!     .with_hits(20)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(
//!     query.yql,
//!     "select id, title from sources products where ((category contains 'electronics') AND (stock > 0))"
//! );
//! ```

pub mod errors;
pub mod expression;
pub mod query;
pub mod rank;
pub mod value;

pub use errors::*;
pub use expression::{Expression, Field, field};
pub use query::{QueryBuilder, VespaQuery};
pub use rank::RankExpression;
pub use value::Value;

/// Everything needed to build a query with a single import.
pub mod prelude {
    pub use crate::errors::ValidationError;
    pub use crate::expression::{
        ContainsMode, Expression, Field, and, custom, field, not, or, user_query, user_query_in, with_approximate,
        with_label, with_threshold,
    };
    pub use crate::query::{QueryBuilder, VespaQuery};
    pub use crate::rank::RankExpression;
    pub use crate::value::Value;
}
