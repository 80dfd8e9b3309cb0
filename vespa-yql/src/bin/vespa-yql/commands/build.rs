use anyhow::Result;
use clap::Args;
use serde_json::Value as JsonValue;
use vespa_yql::prelude::*;

use crate::context::QueryDefaults;
use crate::examples::ExampleGroup;
use crate::output::{OutputFormat, OutputManager};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Filters",
        commands: &[
            "vespa-yql build --from products --where \"price > 10\"",
            "vespa-yql build --select id,title --from products --where \"brand contains 'nike'\" --hits 20",
        ],
    },
    ExampleGroup {
        title: "Ranking",
        commands: &[
            "vespa-yql build --from products --user-query --query \"running shoes\" --ranking bm25",
            "vespa-yql build --from products --rank \"({targetHits:100}nearestNeighbor(embedding, q))\" --input 'input.query(q)=[0.1,0.2]'",
        ],
    },
    ExampleGroup {
        title: "Output",
        commands: &[
            "vespa-yql --output json build --from products --offset 40 --hits 20",
            "vespa-yql --output compact build --from products --where \"in_stock = true\"",
        ],
    },
];

#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Fields to return (comma separated, defaults to *)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Document sources to search (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub from: Vec<String>,

    /// Raw YQL fragment for the where clause (repeatable, joined with AND)
    #[arg(long = "where", value_name = "YQL")]
    pub where_clauses: Vec<String>,

    /// Add userQuery() to the where clause
    #[arg(long)]
    pub user_query: bool,

    /// Raw YQL fragment for the rank clause (repeatable)
    #[arg(long, value_name = "YQL")]
    pub rank: Vec<String>,

    /// Rank profile name
    #[arg(long)]
    pub ranking: Option<String>,

    /// Maximum number of hits
    #[arg(long)]
    pub hits: Option<u64>,

    /// Offset of the first hit
    #[arg(long)]
    pub offset: Option<u64>,

    /// Default index for userQuery()
    #[arg(long)]
    pub default_index: Option<String>,

    /// User query text
    #[arg(long)]
    pub query: Option<String>,

    /// Query input as key=<json>, e.g. 'input.query(q)=[0.1,0.2]' (repeatable)
    #[arg(long = "input", value_name = "KEY=JSON")]
    pub inputs: Vec<String>,
}

pub fn handle_build(args: BuildArgs, defaults: &QueryDefaults, output: &OutputManager) -> Result<()> {
    let builder = query_builder(&args, defaults, output)?;
    let query = builder.build()?;

    output.display_query(&query)?;
    if output.options.output_format == OutputFormat::Table {
        output.success("Query is valid");
    }
    Ok(())
}

/// Merge command line flags over config defaults into a builder
pub fn query_builder(args: &BuildArgs, defaults: &QueryDefaults, output: &OutputManager) -> Result<QueryBuilder> {
    let select = if args.select.is_empty() { &defaults.select } else { &args.select };
    let from = if args.from.is_empty() { &defaults.sources } else { &args.from };

    let mut builder = QueryBuilder::new().select(select.iter().cloned()).from(from.iter().cloned());

    // Each fragment is grouped so an `or` inside it cannot bind across the AND.
    let mut conditions: Vec<Expression> = args
        .where_clauses
        .iter()
        .map(|fragment| custom(format!("({fragment})")))
        .collect();
    if args.user_query {
        conditions.push(user_query());
    }
    builder = builder.with_conditions(and(conditions));

    if !args.rank.is_empty() {
        builder = builder.rank(args.rank.iter().map(custom).collect());
    }

    if let Some(ranking) = args.ranking.as_ref().or(defaults.ranking.as_ref()) {
        builder = builder.with_ranking(ranking.clone());
    }
    if let Some(hits) = args.hits.or(defaults.hits) {
        builder = builder.with_hits(hits);
    }
    if let Some(offset) = args.offset {
        builder = builder.with_offset(offset);
    }
    if let Some(index) = args.default_index.as_ref().or(defaults.default_index.as_ref()) {
        builder = builder.with_default_index(index.clone());
    }
    if let Some(query) = &args.query {
        builder = builder.with_query(query.clone());
    }

    for raw in &args.inputs {
        let (key, value, parsed) = parse_input(raw)?;
        if !parsed {
            output.warning(&format!("Value for '{key}' is not valid JSON, sending it as a string"));
        }
        builder = builder.with_input(key, value);
    }

    Ok(builder)
}

/// Split `key=<json>`; values that are not JSON become strings
fn parse_input(raw: &str) -> Result<(String, JsonValue, bool)> {
    let Some((key, value)) = raw.split_once('=') else {
        anyhow::bail!("input '{raw}' must have the form key=<json>");
    };

    let key = key.trim().to_string();
    match serde_json::from_str::<JsonValue>(value) {
        Ok(json) => Ok((key, json, true)),
        Err(_) => Ok((key, JsonValue::String(value.to_string()), false)),
    }
}
