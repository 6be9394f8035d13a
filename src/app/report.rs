// SnapSleuth - app/report.rs
//
// Plain-text rendering of parse summaries and search results.
// Writes to any Write trait object so output can be tested without a
// terminal; main.rs passes stdout.

use crate::core::model::{ControlRule, Element};
use crate::core::parser::preview;
use crate::core::query;
use crate::platform::config::AppConfig;
use crate::util::constants;
use std::io::{self, Write};

/// Controls printed by the summary view, in order: (label, rule id).
const SUMMARY_CONTROLS: &[(&str, &str)] = &[
    ("Like button", constants::LIKE_BUTTON_RULE),
    ("Favorite button", constants::FAVORITE_BUTTON_RULE),
];

/// Print the element count and the well-known controls that were found.
///
/// `folder` additionally looks up a favorites folder by name.
pub fn write_summary<W: Write>(
    out: &mut W,
    elements: &[Element],
    rules: &[ControlRule],
    config: &AppConfig,
    folder: Option<&str>,
) -> io::Result<()> {
    writeln!(out, "Parsed {} elements", elements.len())?;
    writeln!(out)?;
    writeln!(out, "Common elements:")?;

    for (label, rule_id) in SUMMARY_CONTROLS {
        if let Some(el) = query::find_control_by_id(elements, rules, rule_id) {
            write_control(out, label, el, config.summary_preview_chars)?;
        }
    }

    if let Some(name) = folder {
        let found = query::find_favorite_folder_with(
            elements,
            name,
            config.folder_fallback_keyword.as_deref(),
        );
        if let Some(el) = found {
            write_control(out, "Favorite folder", el, config.summary_preview_chars)?;
        }
    }

    Ok(())
}

fn write_control<W: Write>(out: &mut W, label: &str, el: &Element, width: usize) -> io::Result<()> {
    writeln!(out, "  {label}: uid={}, text={}", el.uid, preview(&el.text, width))
}

/// Print the match count followed by at most `config.max_results` matches.
pub fn write_matches<W: Write>(
    out: &mut W,
    matches: &[&Element],
    config: &AppConfig,
) -> io::Result<()> {
    writeln!(out, "Found {} matching elements:", matches.len())?;
    for el in matches.iter().take(config.max_results) {
        writeln!(
            out,
            "  uid={}, type={}, text={}",
            el.uid,
            el.element_type,
            preview(&el.text, config.preview_chars)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parser::parse_content;
    use crate::core::rules;

    fn render_summary(content: &str, folder: Option<&str>) -> String {
        let elements = parse_content(content).elements;
        let mut buf = Vec::new();
        write_summary(
            &mut buf,
            &elements,
            rules::builtin_rules(),
            &AppConfig::default(),
            folder,
        )
        .unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_summary_lists_found_controls() {
        let out = render_summary(
            "uid=1_1 button \"1.\" description=\"点赞\"\n\
             uid=1_2 button \"2.\" description=\"收藏\"\n\
             uid=1_3 listitem \"学习\"\n",
            Some("学习"),
        );
        assert!(out.starts_with("Parsed 3 elements\n"));
        assert!(out.contains("  Like button: uid=1_1, text=1.\n"));
        assert!(out.contains("  Favorite button: uid=1_2, text=2.\n"));
        assert!(out.contains("  Favorite folder: uid=1_3, text=学习\n"));
    }

    #[test]
    fn test_summary_truncates_text() {
        let long = "赞".repeat(40);
        let out = render_summary(
            &format!("uid=1 button \"{long}\" description=\"like\"\n"),
            None,
        );
        let expected = format!("text={}\n", "赞".repeat(constants::DEFAULT_SUMMARY_PREVIEW_CHARS));
        assert!(out.contains(&expected));
    }

    #[test]
    fn test_summary_empty_snapshot() {
        let out = render_summary("", None);
        assert_eq!(out, "Parsed 0 elements\n\nCommon elements:\n");
    }

    #[test]
    fn test_matches_are_capped() {
        let content: String = (0..15)
            .map(|i| format!("uid={i} button \"item {i}\"\n"))
            .collect();
        let elements = parse_content(&content).elements;
        let matches = query::find_by_text(&elements, "item", false);

        let mut buf = Vec::new();
        write_matches(&mut buf, &matches, &AppConfig::default()).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.starts_with("Found 15 matching elements:\n"));
        assert_eq!(out.lines().count(), 1 + constants::DEFAULT_MAX_RESULTS);
        assert!(out.contains("  uid=0, type=button, text=item 0\n"));
        assert!(!out.contains("uid=10,"));
    }
}
