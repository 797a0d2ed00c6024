//! Tests for validated configuration.

use super::ConfigError;
use super::cli::Cli;
use super::schema::Schema;
use super::validated::{ValidatedConfig, write_default_schema};
use crate::engine::ParseBehavior;
use crate::report::Format;

/// Helper to create CLI args from a slice
fn cli(args: &[&str]) -> Cli {
    let mut full_args = vec!["dynflags"];
    full_args.extend(args);
    Cli::parse_from_iter(full_args)
}

/// Helper to parse a schema
fn schema(content: &str) -> Schema {
    Schema::parse(content).unwrap()
}

const TCP: &str = r#"
    [[group]]
    name = "tcp"

    [[group.flag]]
    name = "address"
    type = "string"
"#;

mod required_fields {
    use super::*;

    #[test]
    fn missing_schema_returns_error() {
        let result = ValidatedConfig::from_raw(&cli(&[]), None);

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequired {
                field: "schema",
                ..
            })
        ));
    }

    #[test]
    fn schema_is_kept() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&schema(TCP))).unwrap();

        assert_eq!(config.schema.groups[0].name, "tcp");
        assert!(config.schema_path.is_none());
    }
}

mod precedence {
    use super::*;

    #[test]
    fn built_in_defaults() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&schema(TCP))).unwrap();

        assert_eq!(config.behavior, ParseBehavior::ExitOnError);
        assert_eq!(config.format, Format::Text);
        assert!(!config.usage_only);
        assert!(!config.sort);
        assert!(!config.verbose);
        assert!(config.args.is_empty());
    }

    #[test]
    fn schema_behavior_overrides_default() {
        let schema = schema(r#"behavior = "continue""#);
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&schema)).unwrap();

        assert_eq!(config.behavior, ParseBehavior::ContinueOnError);
    }

    #[test]
    fn cli_behavior_overrides_schema() {
        let schema = schema(r#"behavior = "continue""#);
        let config =
            ValidatedConfig::from_raw(&cli(&["--behavior", "unknown"]), Some(&schema)).unwrap();

        assert_eq!(config.behavior, ParseBehavior::ParseUnknown);
    }

    #[test]
    fn cli_options_are_carried() {
        let cli = cli(&[
            "--format", "json", "--usage", "--sort", "--verbose", "--", "--tcp.a.address=x",
        ]);
        let config = ValidatedConfig::from_raw(&cli, Some(&schema(TCP))).unwrap();

        assert_eq!(config.format, Format::Json);
        assert!(config.usage_only);
        assert!(config.sort);
        assert!(config.verbose);
        assert_eq!(config.args, ["--tcp.a.address=x"]);
    }
}

mod engine {
    use super::*;

    #[test]
    fn build_engine_registers_schema() {
        let cli = cli(&["--behavior", "unknown"]);
        let config = ValidatedConfig::from_raw(&cli, Some(&schema(TCP))).unwrap();

        let mut engine = config.build_engine().unwrap();
        assert_eq!(engine.behavior(), ParseBehavior::ParseUnknown);
        assert!(engine.lookup_group("tcp").is_some());

        engine
            .parse(["--tcp.a.address=localhost:1", "--icmp.a.count=3"])
            .unwrap();
        assert!(engine.parsed().instance("tcp", "a").is_some());
        assert!(engine.unknown().instance("icmp", "a").is_some());
    }

    #[test]
    fn build_engine_applies_sorting() {
        let schema = schema(
            r#"
            [[group]]
            name = "zeta"

            [[group]]
            name = "alpha"
        "#,
        );
        let config = ValidatedConfig::from_raw(&cli(&["--sort"]), Some(&schema)).unwrap();

        let usage = config.build_engine().unwrap().usage_string();
        assert!(usage.find("ALPHA").unwrap() < usage.find("ZETA").unwrap());
    }

    #[test]
    fn build_engine_reports_invalid_schema() {
        let schema = schema(
            r#"
            [[group]]
            name = "a.b"
        "#,
        );
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&schema)).unwrap();

        assert!(matches!(
            config.build_engine(),
            Err(ConfigError::InvalidSchema(_))
        ));
    }

    #[test]
    fn display_summarises_config() {
        let config = ValidatedConfig::from_raw(&cli(&[]), Some(&schema(TCP))).unwrap();
        let text = config.to_string();

        assert!(text.contains("schema: inline"));
        assert!(text.contains("groups: 1"));
        assert!(text.contains("behavior: exit"));
    }
}

mod loading {
    use std::fs;
    use std::io::Write;

    use tempfile::{NamedTempFile, tempdir};

    use super::*;

    #[test]
    fn load_reads_schema_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{TCP}").unwrap();
        let path = file.path().to_str().unwrap();

        let config = ValidatedConfig::load(&cli(&["--schema", path])).unwrap();
        assert_eq!(config.schema.groups.len(), 1);
        assert_eq!(config.schema_path.as_deref(), Some(file.path()));
    }

    #[test]
    fn load_without_schema_is_missing_required() {
        let result = ValidatedConfig::load(&cli(&[]));
        assert!(matches!(result, Err(ConfigError::MissingRequired { .. })));
    }

    #[test]
    fn write_default_schema_creates_loadable_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dynflags.toml");

        write_default_schema(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("[[group]]"));
        assert!(Schema::load(&path).is_ok());
    }

    #[test]
    fn write_default_schema_to_missing_dir_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("dynflags.toml");

        assert!(matches!(
            write_default_schema(&path),
            Err(ConfigError::FileWrite { .. })
        ));
    }
}
