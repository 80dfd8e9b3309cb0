//! Rendering of composed expression trees, with a focus on sameElement and
//! the shapes real product searches produce.

use vespa_yql::prelude::*;

// =============================================================================
// sameElement composition
// =============================================================================

#[test]
fn same_element_inside_boolean_combinators() {
    let cases = [
        (
            and([
                field("sizes").contains_same_element([
                    field("family").contains("clothing"),
                    field("size_value").contains("L"),
                ]),
                field("brand").contains("nike"),
            ]),
            "((sizes contains sameElement((family contains 'clothing'), (size_value contains 'L'))) AND (brand contains 'nike'))",
        ),
        (
            or([
                field("attributes").contains_same_element([
                    field("key").contains("color"),
                    field("value").contains("red"),
                ]),
                field("price").lt(50.0),
            ]),
            "((attributes contains sameElement((key contains 'color'), (value contains 'red'))) OR (price < 50))",
        ),
        (
            and([
                field("sizes").contains_same_element([
                    field("family").contains("clothing"),
                    field("size_value").contains("M"),
                ]),
                field("attributes").contains_same_element([
                    field("key").contains("material"),
                    field("value").contains("cotton"),
                ]),
            ]),
            "((sizes contains sameElement((family contains 'clothing'), (size_value contains 'M'))) AND (attributes contains sameElement((key contains 'material'), (value contains 'cotton'))))",
        ),
    ];

    for (expression, expected) in cases {
        assert_eq!(expression.unwrap().to_yql(), expected);
    }
}

#[test]
fn same_element_method_chaining() {
    let expression = field("sizes")
        .contains_same_element([
            field("family").contains("clothing"),
            field("size_value").contains("L"),
        ])
        .and(field("brand").contains("adidas"));

    assert_eq!(
        expression.to_yql(),
        "((sizes contains sameElement((family contains 'clothing'), (size_value contains 'L'))) AND (brand contains 'adidas'))"
    );
}

#[test]
fn same_element_real_world_shapes() {
    let sizing = field("sizes").contains_same_element([
        field("family").contains("clothing"),
        field("size_value").is_in(["M", "Medium"]),
    ]);
    assert_eq!(
        sizing.to_yql(),
        "(sizes contains sameElement((family contains 'clothing'), (size_value in ('M', 'Medium'))))"
    );

    let person = field("persons").contains_same_element([
        field("first_name").contains("John"),
        field("last_name").contains("Smith"),
        field("year_of_birth").gt(1980),
    ]);
    assert_eq!(
        person.to_yql(),
        "(persons contains sameElement((first_name contains 'John'), (last_name contains 'Smith'), (year_of_birth > 1980)))"
    );

    let attribute = field("attributes").contains_same_element([
        field("key").eq("color"),
        field("value").is_in(["red", "blue", "green"]),
    ]);
    assert_eq!(
        attribute.to_yql(),
        "(attributes contains sameElement((key contains 'color'), (value in ('red', 'blue', 'green'))))"
    );

    let inventory = field("inventory_items")
        .contains_same_element([
            field("location_code").contains("WH01"),
            field("quantity").gte(100),
            field("status").eq("available"),
        ])
        .and(field("product_type").contains("electronics"));
    assert_eq!(
        inventory.to_yql(),
        "((inventory_items contains sameElement((location_code contains 'WH01'), (quantity >= 100), (status contains 'available'))) AND (product_type contains 'electronics'))"
    );
}

// =============================================================================
// Mixed trees
// =============================================================================

#[test]
fn nearest_neighbor_combined_with_filter() {
    let expression = field("embedding")
        .nearest_neighbor("query_vector", 1000, [])
        .and(field("brand").contains("nike"));

    assert_eq!(
        expression.to_yql(),
        "(({targetHits:1000}nearestNeighbor(embedding, query_vector)) AND (brand contains 'nike'))"
    );
}

#[test]
fn negated_disjunction_of_excluded_values() {
    let expression = not(field("brand")
        .contains("excluded_brand1")
        .or(field("brand").contains("excluded_brand2")));

    assert_eq!(
        expression.to_yql(),
        "!(((brand contains 'excluded_brand1') OR (brand contains 'excluded_brand2')))"
    );
}

#[test]
fn quotes_in_user_values_are_escaped() {
    let expression = and([field("title").contains("it's"), field("author").eq("O'Brien")]);

    assert_eq!(
        expression.unwrap().to_yql(),
        r"((title contains 'it\'s') AND (author contains 'O\'Brien'))"
    );
}

#[test]
fn rank_collects_mixed_expressions() {
    let rank = RankExpression::new()
        .add_condition(field("embedding").nearest_neighbor("query_vector", 1000, []))
        .add_condition(field("brand").contains("nike"))
        .add_condition(field("description").contains_with(["wireless", "headphones"], ContainsMode::Phrase));

    assert_eq!(
        rank.to_yql(),
        "rank(({targetHits:1000}nearestNeighbor(embedding, query_vector)), (brand contains 'nike'), (description contains phrase('wireless', 'headphones')))"
    );
}
