//! Usage text rendering.
//!
//! Produces one section per group template, headed by the group's usage
//! override or its upper-cased name, followed by an aligned table of its
//! flags. Rendering never touches parse state.

use std::fmt::Write;

use crate::flag::Flag;
use crate::group::GroupTemplate;
use crate::parse::FLAG_PREFIX;

/// Placeholder for the identifier segment in rendered flag paths.
pub const IDENTIFIER_PLACEHOLDER: &str = "<IDENTIFIER>";

/// Layout options for [`render_usage`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageOptions {
    /// Printed first, when set.
    pub title: Option<String>,
    /// Printed after the title, when set.
    pub description: Option<String>,
    /// Printed after all groups, when set.
    pub epilog: Option<String>,
    /// Order groups by name instead of registration order.
    pub sort_groups: bool,
    /// Order flags by name instead of registration order.
    pub sort_flags: bool,
}

/// Renders the usage text for `groups`.
#[must_use]
pub fn render_usage(options: &UsageOptions, groups: &[GroupTemplate]) -> String {
    let mut ordered: Vec<&GroupTemplate> = groups.iter().collect();
    if options.sort_groups {
        ordered.sort_by(|a, b| a.name().cmp(b.name()));
    }

    let sections: Vec<(String, Vec<(String, String)>)> = ordered
        .into_iter()
        .map(|group| (group.heading(), rows(group, options.sort_flags)))
        .collect();

    let width = sections
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|(label, _)| label.chars().count()))
        .max()
        .unwrap_or(0);

    let mut blocks: Vec<String> = Vec::new();
    blocks.extend(options.title.clone());
    blocks.extend(options.description.clone());

    for (heading, rows) in sections {
        let mut block = heading;
        for (label, description) in rows {
            let line = format!("  {label:<width$}  {description}");
            let _ = write!(block, "\n{}", line.trim_end());
        }
        blocks.push(block);
    }

    blocks.extend(options.epilog.clone());

    let mut out = blocks.join("\n\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn rows(group: &GroupTemplate, sort_flags: bool) -> Vec<(String, String)> {
    let mut flags: Vec<&Flag> = group.flags().collect();
    if sort_flags {
        flags.sort_by(|a, b| a.name().cmp(b.name()));
    }

    flags
        .into_iter()
        .map(|flag| (label(group.name(), flag), description(flag)))
        .collect()
}

fn label(group: &str, flag: &Flag) -> String {
    format!(
        "{FLAG_PREFIX}{group}.{IDENTIFIER_PLACEHOLDER}.{} {}",
        flag.name(),
        flag.metavar()
    )
}

fn description(flag: &Flag) -> String {
    let default = flag.default_text();
    // Zero values are shown; only an empty default is left out.
    if default.is_empty() {
        flag.usage().to_string()
    } else if flag.usage().is_empty() {
        format!("(default: {default})")
    } else {
        format!("{} (default: {default})", flag.usage())
    }
}

#[cfg(test)]
#[path = "usage_tests.rs"]
mod tests;
