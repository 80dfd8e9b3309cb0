use anyhow::Result;
use clap::ValueEnum;
use comfy_table::{Attribute, Cell, Color as TableColor, Table, presets};
use vespa_yql::VespaQuery;

use crate::theme::{Tone, paint};

/// Output format options for CLI commands
#[derive(Clone, Debug, ValueEnum, Default, PartialEq)]
pub enum OutputFormat {
    /// Request fields as a table (default)
    #[default]
    Table,
    /// JSON request body, ready to POST to the search endpoint
    Json,
    /// The YQL string only
    Compact,
}

/// Global CLI options that affect output and behavior
#[derive(Clone, Debug, Default)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    pub no_color: bool,
}

/// Writes query data to stdout and status messages to stderr, so piped
/// JSON or YQL output stays clean.
pub struct OutputManager {
    pub options: GlobalOptions,
}

impl OutputManager {
    pub fn new(options: GlobalOptions) -> Self {
        Self { options }
    }

    fn color_enabled(&self) -> bool {
        !self.options.no_color
    }

    /// Format one status line, or `None` when the current options hide it.
    fn status_line(&self, tone: Tone, message: &str) -> Option<String> {
        let hidden = match tone {
            Tone::Error => false,
            Tone::Muted => !self.options.verbose || self.options.quiet,
            _ => self.options.quiet,
        };
        if hidden {
            return None;
        }

        let color = self.color_enabled();
        Some(format!(
            "{} {}",
            paint(tone.icon(), tone, false, color),
            paint(message, tone, false, color)
        ))
    }

    fn status(&self, tone: Tone, message: &str) {
        if let Some(line) = self.status_line(tone, message) {
            eprintln!("{line}");
        }
    }

    pub fn success(&self, message: &str) {
        self.status(Tone::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.status(Tone::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.status(Tone::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.status(Tone::Info, message);
    }

    /// Shown only with `--verbose`.
    pub fn verbose(&self, message: &str) {
        self.status(Tone::Muted, message);
    }

    /// Indented list entry under a preceding status line.
    pub fn bullet(&self, text: &str) {
        if !self.options.quiet {
            eprintln!("  {} {text}", paint(Tone::Heading.icon(), Tone::Muted, false, self.color_enabled()));
        }
    }

    /// Title above a table. Other formats print data only.
    pub fn heading(&self, text: &str) {
        if self.options.quiet || self.options.output_format != OutputFormat::Table {
            return;
        }
        println!("\n{}", paint(text, Tone::Heading, true, self.color_enabled()));
    }

    /// Print a built query in the configured format.
    pub fn display_query(&self, query: &VespaQuery) -> Result<()> {
        if self.options.quiet {
            return Ok(());
        }

        match self.options.output_format {
            OutputFormat::Json => println!("{}", query.to_json_pretty()?),
            OutputFormat::Table => println!("{}", self.query_table(query)?),
            OutputFormat::Compact => println!("{}", query.yql),
        }
        Ok(())
    }

    /// Two-column table of the request fields that are present.
    pub fn query_table(&self, query: &VespaQuery) -> Result<Table> {
        let mut table = self.table(&["Field", "Value"]);
        for (name, value) in query_rows(query)? {
            table.add_row(vec![Cell::new(name).add_attribute(Attribute::Bold), Cell::new(value)]);
        }
        Ok(table)
    }

    /// Empty table with a bold header row; ASCII borders when color is off.
    pub fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(if self.color_enabled() {
            presets::UTF8_FULL_CONDENSED
        } else {
            presets::ASCII_FULL
        });

        table.set_header(headers.iter().map(|header| {
            let cell = Cell::new(header).add_attribute(Attribute::Bold);
            if self.color_enabled() { cell.fg(TableColor::Cyan) } else { cell }
        }));
        table
    }
}

/// Wire name and rendered value of every field set on the request.
fn query_rows(query: &VespaQuery) -> Result<Vec<(String, String)>> {
    let mut rows = vec![("yql".to_string(), query.yql.clone())];

    let scalars = [
        ("ranking", query.ranking.clone()),
        ("hits", query.hits.map(|hits| hits.to_string())),
        ("offset", query.offset.map(|offset| offset.to_string())),
        ("defaultIndex", query.default_index.clone()),
    ];
    rows.extend(
        scalars
            .into_iter()
            .filter_map(|(name, value)| value.map(|value| (name.to_string(), value))),
    );

    for (key, value) in query.input.iter().flatten() {
        rows.push((key.clone(), serde_json::to_string(value)?));
    }
    if let Some(text) = &query.query {
        rows.push(("query".to_string(), text.clone()));
    }

    Ok(rows)
}
