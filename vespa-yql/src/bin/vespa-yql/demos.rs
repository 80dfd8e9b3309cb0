//! Built-in sample queries shown by `vespa-yql demo`.

use serde_json::json;
use vespa_yql::prelude::*;
use vespa_yql::ValidationResult;

pub struct Demo {
    pub name: &'static str,
    pub group: &'static str,
    pub description: &'static str,
    pub build: fn() -> ValidationResult<VespaQuery>,
}

pub const DEMOS: &[Demo] = &[
    Demo {
        name: "product-search",
        group: "basic",
        description: "Category filter with stock check",
        build: product_search,
    },
    Demo {
        name: "price-range",
        group: "basic",
        description: "Inclusive price range",
        build: price_range,
    },
    Demo {
        name: "boolean-logic",
        group: "basic",
        description: "OR inside AND with a negated flag",
        build: boolean_logic,
    },
    Demo {
        name: "text-matching",
        group: "basic",
        description: "Two contains predicates",
        build: text_matching,
    },
    Demo {
        name: "same-element",
        group: "complex",
        description: "sameElement over sizes and attributes",
        build: same_element,
    },
    Demo {
        name: "xor",
        group: "complex",
        description: "Either brand or type, but not both",
        build: xor_logic,
    },
    Demo {
        name: "exclusions",
        group: "complex",
        description: "Filtering with negated brand and status",
        build: exclusions,
    },
    Demo {
        name: "recommendation",
        group: "complex",
        description: "Filters plus a multi-signal rank clause",
        build: recommendation,
    },
    Demo {
        name: "vector-basic",
        group: "vector",
        description: "nearestNeighbor as the only filter",
        build: vector_basic,
    },
    Demo {
        name: "vector-filtered",
        group: "vector",
        description: "nearestNeighbor with label, threshold and filters",
        build: vector_filtered,
    },
    Demo {
        name: "hybrid",
        group: "vector",
        description: "Vector and text signals in the rank clause",
        build: hybrid,
    },
    Demo {
        name: "multi-vector",
        group: "vector",
        description: "Three labelled nearestNeighbor rank features",
        build: multi_vector,
    },
    Demo {
        name: "exact-vector",
        group: "vector",
        description: "Exact search with a distance threshold",
        build: exact_vector,
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    DEMOS.iter().find(|demo| demo.name.eq_ignore_ascii_case(name))
}

fn product_search() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "title", "price", "brand"])
        .from(["products"])
        .with_conditions(and([field("category").eq("electronics"), field("stock").gt(0)]))
        .with_hits(20)
        .build()
}

fn price_range() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "title", "price"])
        .from(["products"])
        .with_condition(field("price").between(50.0, 200.0))
        .with_hits(10)
        .build()
}

fn boolean_logic() -> ValidationResult<VespaQuery> {
    let brand_or_category = field("brand")
        .is_in(["nike", "adidas"])
        .or(field("category").eq("sportswear"));

    QueryBuilder::new()
        .select(["id", "title", "brand", "category"])
        .from(["products"])
        .with_conditions(and([
            brand_or_category,
            field("rating").gte(4.0),
            not(field("discontinued").eq(true)),
        ]))
        .with_hits(15)
        .build()
}

fn text_matching() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "title", "description"])
        .from(["products"])
        .with_conditions(and([
            field("title").contains("wireless"),
            field("description").contains("bluetooth"),
        ]))
        .with_hits(25)
        .build()
}

fn same_element() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "name", "sizes", "attributes"])
        .from(["products"])
        .with_conditions(and([
            field("sizes").contains_same_element([
                field("family").contains("clothing"),
                field("size_value").contains("M"),
            ]),
            field("attributes").contains_same_element([
                field("key").eq("color"),
                field("value").contains("red"),
            ]),
            field("brand").contains("nike"),
        ]))
        .with_hits(25)
        .build()
}

fn xor_logic() -> ValidationResult<VespaQuery> {
    let brand = field("brand");
    let item_types = field("item_types");

    QueryBuilder::new()
        .select(["id", "title", "brand", "item_types"])
        .from(["listings"])
        .with_condition(
            brand
                .contains("nike")
                .or(item_types.contains("shoes"))
                .and(not(brand.contains("nike").and(item_types.contains("shoes")))),
        )
        .with_hits(30)
        .build()
}

fn exclusions() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "title", "price", "brand", "category"])
        .from(["products"])
        .with_conditions(and([
            field("category").eq("electronics"),
            field("price").between(50.0, 500.0),
            not(field("brand")
                .contains("excluded_brand1")
                .or(field("brand").contains("excluded_brand2"))),
            not(field("status").eq("discontinued")),
            field("rating").gte(4.0),
        ]))
        .with_hits(40)
        .build()
}

fn recommendation() -> ValidationResult<VespaQuery> {
    let rank = RankExpression::new()
        .add_condition(field("product_embedding").nearest_neighbor(
            "user_preference_vector",
            1000,
            [with_label("semantic_similarity")],
        ))
        .add_condition(user_query_in("description"))
        .add_condition(field("popularity_score").gte(0.6))
        .add_condition(field("review_sentiment").gte(0.7))
        .add_condition(custom("freshness(timestamp) * 0.1 + margin_boost * 0.2"));

    QueryBuilder::new()
        .select(["id", "title", "price", "brand", "category", "similarity_score"])
        .from(["products"])
        .with_conditions(and([
            field("category").is_in(["electronics", "gadgets", "smartphones"]),
            field("available").eq(true),
            field("stock").gt(0),
            field("rating").gte(3.5),
            field("price").between(10.0, 1000.0),
            not(field("purchased_by_user").contains("current_user_id")),
        ]))
        .rank(rank)
        .with_input("input.query(user_preference_vector)", json!([0.1, 0.2, 0.3, 0.4, 0.5]))
        .with_query("high quality electronics with good reviews")
        .with_ranking("recommendation_profile")
        .with_hits(50)
        .build()
}

fn vector_basic() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "title", "embedding_score"])
        .from(["products"])
        .with_condition(field("embedding").nearest_neighbor("query_vector", 1000, []))
        .with_input("input.query(query_vector)", json!([0.1, 0.2, 0.3, 0.4, 0.5]))
        .with_hits(50)
        .build()
}

fn vector_filtered() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "title", "price", "category"])
        .from(["products"])
        .with_conditions(and([
            field("embedding").nearest_neighbor(
                "query_vector",
                1000,
                [with_label("main_search"), with_threshold(0.7)],
            ),
            field("category").is_in(["electronics", "gadgets"]),
            field("price").between(20.0, 500.0),
        ]))
        .with_input("input.query(query_vector)", json!([0.2, 0.3, 0.4, 0.5, 0.6]))
        .with_hits(30)
        .build()
}

fn hybrid() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "title", "description", "brand"])
        .from(["products"])
        .with_condition(field("category").eq("fashion"))
        .rank(
            RankExpression::new()
                .add_condition(field("embedding").nearest_neighbor("query_vector", 1000, []))
                .add_condition(user_query_in("description"))
                .add_condition(field("brand").contains("premium")),
        )
        .with_input("input.query(query_vector)", json!([0.3, 0.4, 0.5, 0.6, 0.7]))
        .with_query("summer casual wear")
        .with_ranking("hybrid_profile")
        .with_hits(40)
        .build()
}

fn multi_vector() -> ValidationResult<VespaQuery> {
    let rank: RankExpression = [
        ("text_embedding", "text_vector", 800, "text_similarity"),
        ("image_embedding", "image_vector", 500, "visual_similarity"),
        ("color_embedding", "color_vector", 200, "color_similarity"),
    ]
    .into_iter()
    .map(|(name, vector, hits, label)| field(name).nearest_neighbor(vector, hits, [with_label(label)]))
    .collect();

    QueryBuilder::new()
        .select(["id", "title", "image_url", "color"])
        .from(["fashion_products"])
        .with_condition(field("available").eq(true))
        .rank(rank)
        .with_input("input.query(text_vector)", json!([0.1, 0.2, 0.3]))
        .with_input("input.query(image_vector)", json!([0.4, 0.5, 0.6]))
        .with_input("input.query(color_vector)", json!([0.7, 0.8, 0.9]))
        .with_ranking("multi_modal_ranking")
        .with_hits(25)
        .build()
}

fn exact_vector() -> ValidationResult<VespaQuery> {
    QueryBuilder::new()
        .select(["id", "title"])
        .from(["research_papers"])
        .with_condition(field("paper_embedding").nearest_neighbor(
            "query_vector",
            500,
            [with_approximate(false), with_threshold(0.95), with_label("exact_search")],
        ))
        .with_input("input.query(query_vector)", json!([0.15, 0.25, 0.35, 0.45, 0.55]))
        .with_hits(20)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_demo_builds() {
        for demo in DEMOS {
            let query = (demo.build)().unwrap_or_else(|err| panic!("{} failed: {err}", demo.name));
            assert!(query.yql.starts_with("select "), "{}", demo.name);
        }
    }

    #[test]
    fn demo_names_are_unique() {
        let mut names: Vec<_> = DEMOS.iter().map(|demo| demo.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DEMOS.len());
    }

    #[test]
    fn find_is_case_insensitive() {
        assert!(find("XOR").is_some());
        assert!(find("nope").is_none());
    }

    #[test]
    fn xor_demo_output() {
        let query = xor_logic().unwrap();
        assert_eq!(
            query.yql,
            "select id, title, brand, item_types from sources listings where (((brand contains 'nike') OR (item_types contains 'shoes')) AND !(((brand contains 'nike') AND (item_types contains 'shoes'))))"
        );
    }

    #[test]
    fn exact_vector_demo_output() {
        let query = exact_vector().unwrap();
        assert_eq!(
            query.yql,
            "select id, title from sources research_papers where ({targetHits:500,label:'exact_search',distanceThreshold:0.950000,approximate:false}nearestNeighbor(paper_embedding, query_vector))"
        );
        assert_eq!(query.hits, Some(20));
    }
}
