//! Printable view of an engine's parse results.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::Engine;
use crate::parsed::ParsedGroup;
use crate::value::Value;

/// Output format for a [`Report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Aligned, human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// One parsed `(group, identifier)` instance.
#[derive(Debug, Serialize)]
pub struct Instance<'a> {
    /// Every value, explicit or default, keyed by flag name.
    pub values: BTreeMap<&'a str, &'a Value>,
    /// Flags given on the command line, sorted.
    pub explicit: Vec<&'a str>,
}

impl<'a> From<&'a ParsedGroup> for Instance<'a> {
    fn from(group: &'a ParsedGroup) -> Self {
        Self {
            values: group.values().collect(),
            explicit: group
                .values()
                .map(|(flag, _)| flag)
                .filter(|flag| group.is_set(flag))
                .collect(),
        }
    }
}

/// Snapshot of everything an [`Engine`] collected while parsing.
///
/// Groups and identifiers are sorted by name.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    /// Recognised instances: group, then identifier.
    pub parsed: BTreeMap<&'a str, BTreeMap<&'a str, Instance<'a>>>,
    /// Raw values of unrecognised flags: group, identifier, then flag.
    pub unknown: BTreeMap<&'a str, BTreeMap<&'a str, BTreeMap<&'a str, &'a [String]>>>,
    /// Arguments skipped without being recorded.
    pub unparsed: &'a [String],
}

impl<'a> Report<'a> {
    /// Collects the results held by `engine`.
    #[must_use]
    pub fn new(engine: &'a Engine) -> Self {
        let parsed: BTreeMap<_, BTreeMap<_, _>> = engine
            .parsed()
            .iter()
            .map(|(group, identifiers)| {
                let instances = identifiers
                    .iter()
                    .map(|(identifier, instance)| (identifier.as_str(), Instance::from(instance)))
                    .collect();
                (group.as_str(), instances)
            })
            .collect();

        let unknown: BTreeMap<_, BTreeMap<_, BTreeMap<_, _>>> = engine
            .unknown()
            .iter()
            .map(|(group, identifiers)| {
                let instances = identifiers
                    .iter()
                    .map(|(identifier, instance)| {
                        (identifier.as_str(), instance.occurrences().collect())
                    })
                    .collect();
                (group.as_str(), instances)
            })
            .collect();

        Self {
            parsed,
            unknown,
            unparsed: engine.unparsed_args(),
        }
    }

    /// Returns true if the engine collected nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty() && self.unknown.is_empty() && self.unparsed.is_empty()
    }

    /// Renders the report in `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn render(&self, format: Format) -> Result<String, serde_json::Error> {
        match format {
            Format::Text => Ok(self.to_string()),
            Format::Json => serde_json::to_string_pretty(self).map(|mut json| {
                json.push('\n');
                json
            }),
        }
    }
}

fn write_rows<'a>(
    f: &mut fmt::Formatter<'_>,
    rows: impl IntoIterator<Item = (&'a str, String)>,
) -> fmt::Result {
    let rows: Vec<(&str, String)> = rows.into_iter().collect();
    let width = rows.iter().map(|(flag, _)| flag.chars().count()).max().unwrap_or(0);
    for (flag, value) in rows {
        writeln!(f, "  {flag:<width$}  {value}")?;
    }
    Ok(())
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "no flags given");
        }

        let mut first = true;
        let mut separate = |f: &mut fmt::Formatter<'_>| {
            if first {
                first = false;
                Ok(())
            } else {
                writeln!(f)
            }
        };

        for (group, identifiers) in &self.parsed {
            for (identifier, instance) in identifiers {
                separate(f)?;
                writeln!(f, "{group}.{identifier}")?;
                write_rows(
                    f,
                    instance.values.iter().map(|(flag, value)| {
                        let text = if instance.explicit.contains(flag) {
                            value.to_string()
                        } else {
                            format!("{value} (default)")
                        };
                        (*flag, text)
                    }),
                )?;
            }
        }

        for (group, identifiers) in &self.unknown {
            for (identifier, flags) in identifiers {
                separate(f)?;
                writeln!(f, "{group}.{identifier} (unknown)")?;
                write_rows(
                    f,
                    flags
                        .iter()
                        .map(|(flag, values)| (*flag, values.join(", "))),
                )?;
            }
        }

        if !self.unparsed.is_empty() {
            separate(f)?;
            writeln!(f, "unparsed: {}", self.unparsed.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::ParseBehavior;

    fn tcp_engine(behavior: ParseBehavior) -> Engine {
        let mut engine = Engine::new(behavior);
        let tcp = engine.group("tcp");
        tcp.duration("timeout", Duration::from_secs(1), "");
        tcp.string("address", "", "");
        engine
    }

    #[test]
    fn text_marks_defaults() {
        let mut engine = tcp_engine(ParseBehavior::ExitOnError);
        engine.parse(["--tcp.db.address=localhost:5432"]).unwrap();

        let text = Report::new(&engine).to_string();
        assert_eq!(
            text,
            "tcp.db\n  address  localhost:5432\n  timeout  1s (default)\n"
        );
    }

    #[test]
    fn text_lists_unknown_and_unparsed() {
        let mut engine = tcp_engine(ParseBehavior::ParseUnknown);
        engine
            .parse(["--zzz.id.tag=a", "--zzz.id.tag=b"])
            .unwrap();

        let text = Report::new(&engine).to_string();
        assert_eq!(text, "zzz.id (unknown)\n  tag  a, b\n");

        let mut engine = tcp_engine(ParseBehavior::ContinueOnError);
        engine.parse(["--zzz.id.tag", "a"]).unwrap();
        let text = Report::new(&engine).to_string();
        assert_eq!(text, "unparsed: --zzz.id.tag a\n");
    }

    #[test]
    fn empty_report() {
        let engine = tcp_engine(ParseBehavior::ExitOnError);
        let report = Report::new(&engine);

        assert!(report.is_empty());
        assert_eq!(report.to_string(), "no flags given\n");
    }

    #[test]
    fn json_nests_groups_and_identifiers() {
        let mut engine = tcp_engine(ParseBehavior::ExitOnError);
        engine.parse(["--tcp.db.timeout=3s"]).unwrap();

        let json = Report::new(&engine).render(Format::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["parsed"]["tcp"]["db"]["values"]["timeout"], "3s");
        assert_eq!(value["parsed"]["tcp"]["db"]["values"]["address"], "");
        assert_eq!(value["parsed"]["tcp"]["db"]["explicit"][0], "timeout");
        assert!(value["unknown"].as_object().unwrap().is_empty());
        assert!(value["unparsed"].as_array().unwrap().is_empty());
    }

    #[test]
    fn format_names() {
        assert_eq!(Format::default(), Format::Text);
        assert_eq!(Format::Json.to_string(), "json");
    }
}
