mod commands;
mod context;
mod demos;
mod examples;
mod output;
mod theme;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand};
use colored::control::ShouldColorize;

use commands::{
    build::{BuildArgs, handle_build},
    demo::{DemoCommands, handle_demo_commands},
};
use context::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, CliContext};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{HELP_STYLES, Tone, paint};

#[derive(Parser)]
#[command(name = "vespa-yql")]
#[command(version)]
#[command(
    about = "Compose and inspect YQL search requests",
    long_about = r#"Compose YQL search requests from the command line:

• Render built-in sample queries (filters, sameElement, vector search)
• Assemble a request from raw where/rank fragments and parameters
• Print the result as a table, the JSON request body, or bare YQL

Defaults for sources, fields, hits and ranking are read from .vespa-yql.toml
in the current directory or any parent.

Commands:
  build     Build a query from flags
  demo      List and render sample queries
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    output: OutputFormat,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Config file to use instead of searching for one
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a query from flags merged over config defaults
    Build(BuildArgs),

    /// List and render built-in sample queries
    #[command(subcommand)]
    Demo(DemoCommands),
}

/// The clap command with help colors and per-subcommand examples attached.
fn cli_command(color: bool) -> Command {
    let mut command = Cli::command()
        .styles(HELP_STYLES.clone())
        .color(if color { ColorChoice::Auto } else { ColorChoice::Never })
        .after_long_help(environment_help(color));

    for subcommand in command.get_subcommands_mut() {
        if let Some(groups) = examples::examples_for(subcommand.get_name()) {
            *subcommand = subcommand.clone().after_long_help(examples::render(groups, color));
        }
    }
    command
}

fn environment_help(color: bool) -> String {
    let heading = paint("Environment:", Tone::Heading, true, color);
    let config = paint(CONFIG_ENV_VAR, Tone::Literal, true, color);
    let log = paint("RUST_LOG", Tone::Literal, true, color);
    format!(
        "{heading}\n  {config}  config file path (skips the {CONFIG_FILE_NAME} search)\n  {log}  log filter, e.g. vespa_yql=debug\n"
    )
}

fn main() {
    env_logger::init();

    let color = ShouldColorize::from_env().should_colorize();
    let matches = cli_command(color).get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());

    if cli.no_color {
        colored::control::set_override(false);
    }

    let output = OutputManager::new(GlobalOptions {
        output_format: cli.output.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color,
    });

    if let Err(err) = execute(cli, &output) {
        output.error(&format!("{err:#}"));
        std::process::exit(1);
    }
}

fn execute(cli: Cli, output: &OutputManager) -> Result<()> {
    match cli.command {
        Commands::Build(args) => {
            let ctx = CliContext::load(cli.config.as_deref())?;
            match &ctx.config_path {
                Some(path) => output.verbose(&format!("Using config {}", path.display())),
                None => output.verbose(&format!("No {CONFIG_FILE_NAME} found, using built-in defaults")),
            }
            handle_build(args, &ctx.config.defaults, output)
        }
        Commands::Demo(command) => handle_demo_commands(command, output),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        cli_command(false).debug_assert();
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let matches = cli_command(false)
            .try_get_matches_from(["vespa-yql", "demo", "list", "--output", "json", "--quiet"])
            .unwrap();
        let cli = Cli::from_arg_matches(&matches).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.quiet);
    }

    #[test]
    fn subcommands_carry_examples() {
        let mut command = cli_command(false);
        let build = command.find_subcommand_mut("build").unwrap();
        let help = build.render_long_help().to_string();
        assert!(help.contains("Examples:"));
    }
}
