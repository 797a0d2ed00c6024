//! Tests for usage rendering.

use std::time::Duration;

use super::*;

fn http_template() -> GroupTemplate {
    let mut http = GroupTemplate::new("http");
    http.string("method", "GET", "HTTP method to use");
    http.duration("timeout", Duration::from_secs(5), "Request timeout");
    http
}

fn tcp_template() -> GroupTemplate {
    let mut tcp = GroupTemplate::new("tcp");
    tcp.string("address", "", "Address to dial");
    tcp
}

mod layout {
    use super::*;

    #[test]
    fn renders_heading_and_aligned_rows() {
        let text = render_usage(&UsageOptions::default(), &[http_template()]);

        let expected = "\
HTTP
  --http.<IDENTIFIER>.method STRING     HTTP method to use (default: GET)
  --http.<IDENTIFIER>.timeout DURATION  Request timeout (default: 5s)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn width_is_shared_across_groups() {
        let text = render_usage(&UsageOptions::default(), &[http_template(), tcp_template()]);

        let expected = "\
HTTP
  --http.<IDENTIFIER>.method STRING     HTTP method to use (default: GET)
  --http.<IDENTIFIER>.timeout DURATION  Request timeout (default: 5s)

TCP
  --tcp.<IDENTIFIER>.address STRING     Address to dial
";
        assert_eq!(text, expected);
    }

    #[test]
    fn usage_override_replaces_heading() {
        let mut tcp = tcp_template();
        tcp.set_usage("TCP probes");

        let text = render_usage(&UsageOptions::default(), &[tcp]);
        assert!(text.starts_with("TCP probes\n"));
    }

    #[test]
    fn empty_group_renders_heading_only() {
        let text = render_usage(&UsageOptions::default(), &[GroupTemplate::new("icmp")]);
        assert_eq!(text, "ICMP\n");
    }

    #[test]
    fn nothing_to_render() {
        assert_eq!(render_usage(&UsageOptions::default(), &[]), "");
    }

    #[test]
    fn title_description_and_epilog_surround_groups() {
        let options = UsageOptions {
            title: Some("Usage: probe [FLAGS]".to_string()),
            description: Some("Runs network probes.".to_string()),
            epilog: Some("See the manual for more.".to_string()),
            ..UsageOptions::default()
        };

        let text = render_usage(&options, &[tcp_template()]);

        let expected = "\
Usage: probe [FLAGS]

Runs network probes.

TCP
  --tcp.<IDENTIFIER>.address STRING  Address to dial

See the manual for more.
";
        assert_eq!(text, expected);
    }
}

mod defaults {
    use super::*;

    // Only an empty rendered default is hidden. Zero values such as `0`,
    // `false` and `0s` are real defaults and must stay visible.
    #[test]
    fn zero_values_are_shown() {
        let mut group = GroupTemplate::new("g");
        group.int("retries", 0, "Retry count");
        group.bool("verbose", false, "Verbose output");
        group.duration("backoff", Duration::ZERO, "Retry backoff");

        let text = render_usage(&UsageOptions::default(), &[group]);
        assert!(text.contains("Retry count (default: 0)"));
        assert!(text.contains("Verbose output (default: false)"));
        assert!(text.contains("Retry backoff (default: 0s)"));
    }

    #[test]
    fn empty_defaults_are_hidden() {
        let mut group = GroupTemplate::new("g");
        group.string_slice("header", &[], "Extra header");
        group.url("target", "", "Target URL");

        let text = render_usage(&UsageOptions::default(), &[group]);
        assert!(!text.contains("default"));
    }

    #[test]
    fn slice_defaults_are_comma_joined() {
        let mut group = GroupTemplate::new("g");
        group.int_slice("ports", &[80, 443], "Ports");

        let text = render_usage(&UsageOptions::default(), &[group]);
        assert!(text.contains("Ports (default: 80,443)"));
    }

    #[test]
    fn default_without_usage_text() {
        let mut group = GroupTemplate::new("g");
        group.int("port", 8080, "");

        let text = render_usage(&UsageOptions::default(), &[group]);
        assert!(text.contains("  (default: 8080)"));
    }
}

mod ordering {
    use super::*;

    fn zeta_alpha() -> Vec<GroupTemplate> {
        let mut zeta = GroupTemplate::new("zeta");
        zeta.string("b", "", "");
        zeta.string("a", "", "");
        vec![zeta, GroupTemplate::new("alpha")]
    }

    #[test]
    fn registration_order_by_default() {
        let text = render_usage(&UsageOptions::default(), &zeta_alpha());

        assert!(text.find("ZETA").unwrap() < text.find("ALPHA").unwrap());
        assert!(text.find("zeta.<IDENTIFIER>.b").unwrap() < text.find("zeta.<IDENTIFIER>.a").unwrap());
    }

    #[test]
    fn sorted_groups_and_flags() {
        let options = UsageOptions {
            sort_groups: true,
            sort_flags: true,
            ..UsageOptions::default()
        };
        let text = render_usage(&options, &zeta_alpha());

        assert!(text.find("ALPHA").unwrap() < text.find("ZETA").unwrap());
        assert!(text.find("zeta.<IDENTIFIER>.a").unwrap() < text.find("zeta.<IDENTIFIER>.b").unwrap());
    }
}

#[test]
fn metavar_override_is_used() {
    let mut group = GroupTemplate::new("tcp");
    group.string("address", "", "Address to dial");
    group.lookup_mut("address").unwrap().set_metavar("HOST:PORT");

    let text = render_usage(&UsageOptions::default(), &[group]);
    assert!(text.contains("--tcp.<IDENTIFIER>.address HOST:PORT  Address to dial"));
}
