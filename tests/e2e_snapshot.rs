// SnapSleuth - tests/e2e_snapshot.rs
//
// End-to-end tests for the parse and query pipeline.
//
// These tests read real files from disk (the fixture snapshot and
// tempfile-created ones), load the real built-in rules, and run the
// public query functions over the parsed elements.

use snapsleuth::app::rule_mgr;
use snapsleuth::core::parser::{parse_file, parse_snapshot};
use snapsleuth::core::query;
use snapsleuth::util::error::ParseError;
use std::fs;
use std::path::PathBuf;

// =============================================================================
// Helpers
// =============================================================================

/// Absolute path to the on-disk fixture files.
fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// =============================================================================
// Parsing E2E
// =============================================================================

/// The fixture holds 11 records, 2 comments, 1 blank line and 3 malformed lines.
#[test]
fn e2e_parses_fixture_snapshot() {
    let result = parse_file(&fixture("video_page.txt"));

    assert!(result.is_ok(), "unexpected error: {:?}", result.error);
    assert_eq!(result.elements.len(), 11);
    assert_eq!(result.lines_processed, 17);
    assert_eq!(result.lines_rejected, 3);

    let root = &result.elements[0];
    assert_eq!(root.uid, "1_0");
    assert_eq!(root.element_type, "RootWebArea");
    assert_eq!(
        root.url,
        "https://www.bilibili.com/video/BV1WBG9zgECp/"
    );
    assert_eq!(root.description, "");

    let indented = result.elements.iter().find(|e| e.uid == "1_7").unwrap();
    assert_eq!(indented.element_type, "dialog");
    assert!(indented.raw_line.starts_with("  uid=1_7"));
}

#[test]
fn e2e_nonexistent_path_returns_empty() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("no-such-snapshot.txt");

    assert!(parse_snapshot(&path).is_empty());
    assert!(matches!(
        parse_file(&path).error,
        Some(ParseError::FileNotFound { .. })
    ));
}

#[test]
fn e2e_worked_example() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.txt");
    fs::write(
        &path,
        "uid=1_0 RootWebArea \"Video Page\" url=\"https://x\"\n\
         uid=1_1 button \"1.\" description=\"点赞 liked count\"\n\
         uid=1_2 listitem \"学习资料\"\n",
    )
    .unwrap();

    let elements = parse_snapshot(&path);
    assert_eq!(elements.len(), 3);

    let by_text = query::find_by_text(&elements, "1.", false);
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].uid, "1_1");

    assert_eq!(query::find_like_button(&elements).unwrap().uid, "1_1");

    let folder = query::find_favorite_folder(&elements, "学习").unwrap();
    assert_eq!(folder.uid, "1_2");
    assert_eq!(folder.element_type, "listitem");
}

// =============================================================================
// Query E2E
// =============================================================================

#[test]
fn e2e_locates_video_page_controls() {
    let elements = parse_snapshot(&fixture("video_page.txt"));

    assert_eq!(query::find_like_button(&elements).unwrap().uid, "1_3");
    assert_eq!(query::find_favorite_button(&elements).unwrap().uid, "1_4");
    assert_eq!(query::find_favorite_confirm(&elements).unwrap().uid, "1_10");
    assert_eq!(
        query::find_favorite_folder(&elements, "学习").unwrap().uid,
        "1_9"
    );
    assert!(query::favorite_dialog_open(&elements));
}

#[test]
fn e2e_page_navigation_checks() {
    let elements = parse_snapshot(&fixture("video_page.txt"));

    let info = query::page_info(&elements).unwrap();
    assert_eq!(info.title, "示例视频 - 哔哩哔哩");
    assert!(query::is_on_page(&elements, "BV1WBG9zgECp"));
    assert!(query::contains_text(&elements, "课程介绍"));

    let clickable: Vec<_> = query::clickable_elements(&elements)
        .iter()
        .map(|e| e.uid.as_str())
        .collect();
    assert_eq!(clickable, vec!["1_1", "1_3", "1_4", "1_5", "1_10"]);
}

#[test]
fn e2e_user_rule_overrides_builtin() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("like.toml"),
        r#"
[rule]
id = "like_button"
name = "Like button by share text"
probes = ["分享"]

[[qualifier]]
term = "分享"
field = "text"
"#,
    )
    .unwrap();

    let (rules, errors) = rule_mgr::load_all_rules(Some(dir.path()));
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    let elements = parse_snapshot(&fixture("video_page.txt"));
    let found = query::find_control_by_id(&elements, &rules, "like_button").unwrap();
    assert_eq!(found.uid, "1_5");
}
