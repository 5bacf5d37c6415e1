//! Loading and validating `tflens.yml` documents from disk.

use pretty_assertions::assert_eq;
use tflens_core::config::{DEFAULT_DIFF_TIMEOUT, RawConfig, validate};
use tflens_core::{Config, Error};
use tflens_test_utils::TestWorkspace;
use tflens_test_utils::fixtures::config_file;

fn workspace_with_sources() -> TestWorkspace {
    let ws = TestWorkspace::new();
    ws.write_module_versions("dev/main.tf", &[("vpc", "1.0.0")]);
    ws.write_module_versions("prod/main.tf", &[("vpc", "1.0.0")]);
    ws
}

fn config_yaml(ws: &TestWorkspace, extra: &str) -> String {
    format!(
        r#"version: 1
compareModules:
  comparisons:
    - name: "  apps  "
      attributeKey: " version "
      ignoreModules: [" legacy "]
      sources:
        - path: '{dev}'
          label: " dev "
        - path: '{prod}'
          label: prod
{extra}"#,
        dev = ws.path("dev/main.tf").display(),
        prod = ws.path("prod/main.tf").display(),
    )
}

#[test]
fn test_load_trims_string_fields() {
    let ws = workspace_with_sources();
    let path = ws.write_config(&config_yaml(&ws, ""));

    let config = Config::load(&path).unwrap();
    let comparison = config.comparison("apps").unwrap();

    assert_eq!(config.version, 1);
    assert_eq!(comparison.attribute_key, "version");
    assert_eq!(comparison.labels(), vec!["dev", "prod"]);
    assert_eq!(comparison.ignore_modules, vec!["legacy"]);
    assert!(comparison.diff_config.is_none());
}

#[test]
fn test_load_with_diff_config() {
    let ws = workspace_with_sources();
    let extra = r#"      diffConfig:
        baseLabel: prod
        headLabel: dev
        cmd: ["git", "diff", " --stat "]
"#;
    let path = ws.write_config(&config_yaml(&ws, extra));

    let config = Config::load(&path).unwrap();
    let diff = config.comparison("apps").unwrap().diff_config.clone().unwrap();

    assert_eq!(diff.base_label, "prod");
    assert_eq!(diff.head_label, "dev");
    assert_eq!(diff.command, vec!["git", "diff", "--stat"]);
    assert_eq!(diff.timeout, DEFAULT_DIFF_TIMEOUT);
}

#[test]
fn test_unknown_comparison() {
    let ws = workspace_with_sources();
    let path = ws.write_config(&config_yaml(&ws, ""));

    let config = Config::load(&path).unwrap();
    let err = config.comparison("nope").unwrap_err();
    assert_eq!(err.to_string(), r#"comparison not found: "nope""#);
}

#[test]
fn test_invalid_comparison_is_excluded() {
    let ws = workspace_with_sources();
    let extra = format!(
        r#"    - name: broken
      attributeKey: version
      sources:
        - path: '{}'
          label: dev
"#,
        ws.path("dev/main.tf").display()
    );
    let raw = RawConfig::parse(&config_yaml(&ws, &extra)).unwrap();

    let (config, errors) = validate(&raw);

    assert_eq!(config.compare_modules.comparisons.len(), 1);
    assert_eq!(config.compare_modules.comparisons[0].name, "apps");
    assert!(errors.global.is_empty());
    assert_eq!(errors.comparison(1), ["comparison needs at least 2 sources"]);

    let err = Config::from_raw(&raw).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn test_missing_source_is_reported() {
    let ws = workspace_with_sources();
    let yaml = config_yaml(&ws, "").replace("prod/main.tf", "qa/main.tf");
    let raw = RawConfig::parse(&yaml).unwrap();

    let (_, errors) = validate(&raw);
    let problems = errors.comparison(0);

    assert_eq!(problems.len(), 1);
    assert!(
        problems[0].starts_with("source #2 does not exist: "),
        "{problems:?}"
    );
}

#[test]
fn test_bad_fixture_reports_every_problem() {
    let content = std::fs::read_to_string(config_file("bad.yml")).unwrap();
    let raw = RawConfig::parse(&content).unwrap();

    let (config, errors) = validate(&raw);

    assert!(config.compare_modules.comparisons.is_empty());
    assert_eq!(errors.global.len(), 1);
    assert!(errors.global[0].starts_with("invalid global valueRegex: "));
    assert!(
        errors
            .comparison(0)
            .iter()
            .any(|p| p == "comparison needs at least 2 sources")
    );

    let second = errors.comparison(1);
    for expected in [
        "comparison has an empty name",
        "comparison has an empty attribute key",
        "source #2 has an empty label",
        "source #3 should have the extension .tf",
        r#"diff config head label "dev" doesn't match any source label"#,
        "diff config has an empty command",
    ] {
        assert!(
            second.iter().any(|p| p == expected),
            "missing {expected:?} in {second:?}"
        );
    }
}

#[test]
fn test_empty_fixture_has_no_comparisons() {
    let err = Config::load(&config_file("empty.yml")).unwrap_err();
    assert_eq!(
        err.to_string(),
        "config has errors:\n- config has no comparisons configured"
    );
}

#[test]
fn test_invalid_yaml_fixture() {
    let err = Config::load(&config_file("invalid-yaml.yml")).unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn test_duplicate_labels_after_trimming() {
    let ws = workspace_with_sources();
    let yaml = format!(
        r#"version: 1
compareModules:
  comparisons:
    - name: apps
      attributeKey: version
      sources:
        - path: '{dev}'
          label: dev
        - path: '{prod}'
          label: " dev "
      diffConfig:
        baseLabel: dev
        headLabel: dev
        cmd: ["git", "diff"]
"#,
        dev = ws.path("dev/main.tf").display(),
        prod = ws.path("prod/main.tf").display(),
    );
    let raw = RawConfig::parse(&yaml).unwrap();

    let (config, errors) = validate(&raw);

    assert!(config.compare_modules.comparisons.is_empty());
    assert_eq!(
        errors.comparison(0),
        ["source #2 has a duplicate label: dev"]
    );
}

#[test]
fn test_duplicate_comparison_names() {
    let ws = workspace_with_sources();
    let comparison = |name: &str| {
        format!(
            r#"    - name: "{name}"
      attributeKey: version
      sources:
        - path: '{}'
          label: dev
        - path: '{}'
          label: prod
"#,
            ws.path("dev/main.tf").display(),
            ws.path("prod/main.tf").display(),
        )
    };
    let yaml = format!(
        "version: 1\ncompareModules:\n  comparisons:\n{}{}",
        comparison("apps"),
        comparison(" apps ")
    );
    let raw = RawConfig::parse(&yaml).unwrap();

    let (config, errors) = validate(&raw);

    assert_eq!(config.compare_modules.comparisons.len(), 1);
    assert_eq!(config.compare_modules.comparisons[0].name, "apps");
    assert!(errors.comparison(0).is_empty());
    assert_eq!(
        errors.comparison(1),
        [r#"comparison name "apps" is already used by comparison #1"#]
    );
}

#[test]
fn test_unsupported_version() {
    let ws = workspace_with_sources();
    let yaml = config_yaml(&ws, "").replace("version: 1", "version: 2");
    let raw = RawConfig::parse(&yaml).unwrap();

    let (config, errors) = validate(&raw);

    assert_eq!(
        errors.global,
        ["unsupported config version 2; only version 1 is supported"]
    );
    assert!(errors.comparisons.is_empty());
    assert_eq!(config.compare_modules.comparisons.len(), 1);
    assert!(matches!(
        Config::from_raw(&raw).unwrap_err(),
        Error::InvalidConfig(_)
    ));
}

#[test]
fn test_missing_version_defaults_to_supported() {
    let ws = workspace_with_sources();
    let yaml = config_yaml(&ws, "").replace("version: 1\n", "");
    let config = Config::parse(&yaml).unwrap();
    assert_eq!(config.version, 1);
}
