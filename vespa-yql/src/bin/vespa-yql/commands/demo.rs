use anyhow::{Result, bail};
use clap::Subcommand;

use crate::demos::{self, DEMOS};
use crate::examples::ExampleGroup;
use crate::output::{OutputFormat, OutputManager};

pub const EXAMPLES: &[ExampleGroup] = &[
    ExampleGroup {
        title: "Browse",
        commands: &["vespa-yql demo list                   # Show every built-in query"],
    },
    ExampleGroup {
        title: "Render",
        commands: &[
            "vespa-yql demo show xor               # Render the XOR query as a table",
            "vespa-yql --output json demo show hybrid   # Print the request body",
        ],
    },
];

#[derive(Subcommand)]
pub enum DemoCommands {
    /// List the built-in sample queries
    #[command(name = "list")]
    List,

    /// Build and display one sample query
    #[command(name = "show")]
    Show {
        /// Demo name as shown by `demo list`
        name: String,
    },
}

pub fn handle_demo_commands(command: DemoCommands, output: &OutputManager) -> Result<()> {
    match command {
        DemoCommands::List => handle_list(output),
        DemoCommands::Show { name } => handle_show(&name, output),
    }
}

fn handle_list(output: &OutputManager) -> Result<()> {
    if output.options.quiet {
        return Ok(());
    }

    match output.options.output_format {
        OutputFormat::Table => {
            output.heading("Demo Queries");
            let mut table = output.table(&["Name", "Group", "Description"]);
            for demo in DEMOS {
                table.add_row(vec![demo.name, demo.group, demo.description]);
            }
            println!("{table}");
            output.info("Run 'vespa-yql demo show <name>' to render one.");
        }
        OutputFormat::Json => {
            let entries: Vec<_> = DEMOS
                .iter()
                .map(|demo| {
                    serde_json::json!({
                        "name": demo.name,
                        "group": demo.group,
                        "description": demo.description,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Compact => {
            for demo in DEMOS {
                println!("{}", demo.name);
            }
        }
    }

    Ok(())
}

fn handle_show(name: &str, output: &OutputManager) -> Result<()> {
    let Some(demo) = demos::find(name) else {
        output.info("Available demos:");
        for demo in DEMOS {
            output.bullet(demo.name);
        }
        bail!("unknown demo '{name}'");
    };

    log::debug!("building demo {}", demo.name);
    let query = (demo.build)()?;

    output.heading(demo.description);
    output.display_query(&query)
}
