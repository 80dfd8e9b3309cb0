use std::fmt::Write;

use crate::commands::{build, demo};
use crate::theme::{Tone, paint};

/// A titled set of sample invocations shown under a command's long help.
#[derive(Clone, Copy)]
pub struct ExampleGroup {
    pub title: &'static str,
    pub commands: &'static [&'static str],
}

/// Example groups for a subcommand, by name.
pub fn examples_for(command: &str) -> Option<&'static [ExampleGroup]> {
    match command {
        "build" => Some(build::EXAMPLES),
        "demo" => Some(demo::EXAMPLES),
        _ => None,
    }
}

pub fn render(groups: &[ExampleGroup], color: bool) -> String {
    let mut text = format!("{}\n", paint("Examples:", Tone::Heading, true, color));
    for group in groups {
        let _ = writeln!(text, "\n  {}", paint(group.title, Tone::Heading, false, color));
        for command in group.commands {
            let _ = writeln!(text, "    {}", paint(command, Tone::Literal, false, color));
        }
    }
    text
}
