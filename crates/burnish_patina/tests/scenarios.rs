//! End-to-end checks of the linter through its public API.

use burnish_patina::{
    aggregate, format_report, lint_batch, CancelToken, LintConfig, Linter, OutputFormat, Severity,
};

const ORPHAN_MODIFIER: &str = "\
.global-header {
  color: red;
}


.global-header-logo {
  float: left;
}


.mod-small {
  padding: 0;
}
";

const UNSORTED: &str = "\
.card {
  width: 1px;
  color: red;
}
";

const STYLED_HOOK: &str = "\
.menu {
  color: red;

  .js-open-menu {
    display: none;
  }
}
";

const MODIFIER_LIST: &str = "\
.mod-small,
.mod-wide {
  padding: 0;
}
";

const LIST_PARENT: &str = "\
.card,
.panel {
  color: red;

  .panel-title {
    color: blue;
  }
}
";

fn rule_ids(source: &str, filename: &str) -> Vec<&'static str> {
    Linter::new()
        .lint_source(source, filename)
        .findings
        .iter()
        .map(|f| f.rule_id)
        .collect()
}

#[test]
fn bare_modifier_is_one_orphan_finding() {
    let result = Linter::new().lint_source(ORPHAN_MODIFIER, "global-header.scss");
    assert_eq!(result.findings.len(), 1);

    let finding = &result.findings[0];
    assert_eq!(finding.rule_id, "classify/orphan-modifier");
    assert_eq!(finding.severity, Severity::Error);
    assert_eq!(finding.line, 11);
    assert_eq!(finding.column, 1);
}

#[test]
fn unsorted_properties_point_at_color() {
    let result = Linter::new().lint_source(UNSORTED, "card.scss");
    assert_eq!(result.findings.len(), 1);

    let finding = &result.findings[0];
    assert_eq!(finding.rule_id, "ordering/property-order");
    assert_eq!((finding.line, finding.column), (3, 3));
    assert_eq!(
        &UNSORTED[finding.start as usize..finding.end as usize],
        "color"
    );
}

#[test]
fn missing_file_is_fatal_and_valid_file_is_still_linted() {
    let dir = tempfile::tempdir().unwrap();
    let valid = dir.path().join("card.scss");
    std::fs::write(&valid, UNSORTED).unwrap();
    let missing = dir.path().join("deleted.scss");

    let outcome = lint_batch(&Linter::new(), &[valid, missing], &CancelToken::new());
    let report = &outcome.report;

    let fatal: Vec<_> = report
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Fatal)
        .collect();
    assert_eq!(fatal.len(), 1);
    assert_eq!(fatal[0].rule_id, "io-error");
    assert!(fatal[0].file.ends_with("deleted.scss"));

    assert_eq!(
        rule_ids(UNSORTED, "card.scss").len(),
        report.summary.error_count + report.summary.warning_count
    );
    assert_eq!(report.summary.file_count, 2);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn styled_js_hook_is_one_finding() {
    assert_eq!(
        rule_ids(STYLED_HOOK, "menu.scss"),
        vec!["classify/styled-js-hook"]
    );
    assert_eq!(
        rule_ids(".js-open-menu {\n  display: none;\n}\n", "menu.scss"),
        vec!["classify/styled-js-hook"]
    );
}

#[test]
fn linting_is_idempotent() {
    let linter = Linter::new();
    let first = linter.lint_source(ORPHAN_MODIFIER, "a.scss");
    let second = linter.lint_source(ORPHAN_MODIFIER, "a.scss");
    assert_eq!(first.findings, second.findings);
}

#[test]
fn report_order_does_not_depend_on_file_order() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.scss");
    let b = dir.path().join("b.scss");
    std::fs::write(&a, UNSORTED).unwrap();
    std::fs::write(&b, ORPHAN_MODIFIER).unwrap();

    let linter = Linter::new();
    let forward = lint_batch(&linter, &[a.clone(), b.clone()], &CancelToken::new());
    let backward = lint_batch(&linter, &[b, a], &CancelToken::new());
    assert_eq!(forward.report, backward.report);
}

#[test]
fn config_file_changes_severity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("burnish.config.json");
    std::fs::write(
        &path,
        r#"{ "rules": { "ordering/property-order": "warning" } }"#,
    )
    .unwrap();

    assert_eq!(LintConfig::discover(dir.path()), Some(path.clone()));
    let config = LintConfig::load(&path).unwrap();
    let linter = Linter::from_config(&config).unwrap();

    let result = linter.lint_source(UNSORTED, "card.scss");
    assert_eq!(result.warning_count(), 1);
    assert_eq!(result.error_count(), 0);
}

#[test]
fn unknown_rule_in_config_is_rejected() {
    let config: LintConfig =
        serde_json::from_str(r#"{ "rules": { "style/no-such-rule": "off" } }"#).unwrap();
    assert!(Linter::from_config(&config).is_err());
}

#[test]
fn json_output_lists_findings() {
    let result = Linter::new().lint_source(UNSORTED, "card.scss");
    let report = aggregate(result.findings.clone()).with_file_count(1);
    let json = format_report(&report, &[result], OutputFormat::Json);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let findings = value.as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["ruleId"], "ordering/property-order");
    assert_eq!(findings[0]["severity"], "error");
    assert_eq!(findings[0]["line"], 3);
}

#[test]
fn every_failing_list_part_survives_aggregation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("card.scss");
    std::fs::write(&path, MODIFIER_LIST).unwrap();

    let outcome = lint_batch(&Linter::new(), &[path], &CancelToken::new());
    let lines: Vec<_> = outcome
        .report
        .findings
        .iter()
        .filter(|f| f.rule_id == "classify/orphan-modifier")
        .map(|f| (f.line, f.column))
        .collect();
    assert_eq!(lines, vec![(1, 1), (2, 1)]);
}

#[test]
fn descendant_may_follow_any_list_part() {
    let ids = rule_ids(LIST_PARENT, "card.scss");
    assert!(!ids.contains(&"naming/descendant-chain"), "{:?}", ids);
}

#[test]
fn one_line_nested_blocks_are_sized() {
    let source = ".a { .a-b { color: red; } .a-c { color: blue; } }\n";
    let ids = rule_ids(source, "a.scss");
    assert!(!ids.contains(&"style/component-size"), "{:?}", ids);
}
