use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Every locale must define every message the fallback (en-US) defines,
/// and every `t!("...")` key used in the sources must exist in the fallback.
///
/// Parsing is deliberately shallow: any non-comment line shaped like
/// `key = ...` is a message definition; selector and attribute lines are
/// skipped.
const EN_US: &str = include_str!("../i18n/en-US/propdash-ui.ftl");
const ES_ES: &str = include_str!("../i18n/es-ES/propdash-ui.ftl");

#[test]
fn all_locales_have_all_fallback_keys() {
    let fallback = message_keys(EN_US);
    assert!(!fallback.is_empty(), "Fallback (en-US) contains no keys.");

    let mut failures = Vec::new();
    for (locale, src) in [("es-ES", ES_ES)] {
        let keys = message_keys(src);
        let missing: Vec<_> = fallback.difference(&keys).cloned().collect();
        let extra: Vec<_> = keys.difference(&fallback).cloned().collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing: {}", missing.join(", ")));
        }
        if !extra.is_empty() {
            failures.push(format!("{locale} defines unknown keys: {}", extra.join(", ")));
        }
    }

    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn no_locale_defines_a_key_twice() {
    for (locale, src) in [("en-US", EN_US), ("es-ES", ES_ES)] {
        let mut seen = BTreeSet::new();
        for key in definitions(src) {
            assert!(seen.insert(key.clone()), "{locale} defines `{key}` twice");
        }
    }
}

#[test]
fn every_source_key_is_defined() {
    let fallback = message_keys(EN_US);
    let mut used = BTreeSet::new();
    collect_used_keys(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut used);

    assert!(!used.is_empty(), "no t!() call sites found");
    let undefined: Vec<_> = used.difference(&fallback).cloned().collect();
    assert!(undefined.is_empty(), "undefined keys: {}", undefined.join(", "));
}

fn definitions(src: &str) -> Vec<String> {
    src.lines()
        .map(str::trim_end)
        .filter(|line| !line.starts_with(' ') && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, _)| key.trim())
        .filter(|key| !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'))
        .map(str::to_string)
        .collect()
}

fn message_keys(src: &str) -> BTreeSet<String> {
    definitions(src).into_iter().collect()
}

fn collect_used_keys(dir: &Path, out: &mut BTreeSet<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_used_keys(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let src = fs::read_to_string(&path).unwrap_or_default();
            out.extend(translation_keys(&src));
        }
    }
}

/// Keys of `t!("...")` calls, skipping lookalikes such as `format!("...")`.
fn translation_keys(src: &str) -> Vec<String> {
    const CALL: &str = "t!(\"";
    let mut keys = Vec::new();
    for (pos, _) in src.match_indices(CALL) {
        let standalone = src[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
        if !standalone {
            continue;
        }
        let rest = &src[pos + CALL.len()..];
        if let Some((key, _)) = rest.split_once('"') {
            keys.push(key.to_string());
        }
    }
    keys
}

#[test]
fn key_scan_ignores_format_calls() {
    let src = r#"let a = format!("x"); let b = t!("nav-overview"); {crate::t!("chart-heading")}"#;
    assert_eq!(translation_keys(src), vec!["nav-overview", "chart-heading"]);
}
