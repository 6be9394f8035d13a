// SnapSleuth - core/parser.rs
//
// Line-oriented snapshot parsing.
// `parse_content` is pure; `parse_file` adds the file read and turns every
// read failure into a file-level status instead of an error return.

use crate::core::model::Element;
use crate::util::constants;
use crate::util::error::ParseError;
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Result of parsing a single snapshot.
#[derive(Debug, Default)]
pub struct ParseResult {
    /// Successfully parsed elements, in file order.
    pub elements: Vec<Element>,
    /// Total lines processed.
    pub lines_processed: u64,
    /// Non-blank, non-comment lines that did not match the record shape.
    pub lines_rejected: u64,
    /// File-level failure, if the snapshot could not be read at all.
    pub error: Option<ParseError>,
}

impl ParseResult {
    /// Returns true when the file was read (possibly yielding zero elements).
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    fn failed(error: ParseError) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }
}

/// Why a single line produced no element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRejection {
    /// Empty or whitespace-only.
    Blank,
    /// Starts with the comment marker after trimming.
    Comment,
    /// Does not start with `uid=<token> <type> "<text>"`.
    NoMatch,
}

struct Patterns {
    record: Regex,
    description: Regex,
    url: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();

    // The patterns are constants covered by the unit tests below, so a typo
    // shows up as a failing test rather than a runtime panic.
    PATTERNS.get_or_init(|| Patterns {
        record: Regex::new(constants::RECORD_PATTERN).expect("invalid record pattern"),
        description: Regex::new(constants::DESCRIPTION_PATTERN)
            .expect("invalid description pattern"),
        url: Regex::new(constants::URL_PATTERN).expect("invalid url pattern"),
    })
}

/// Capture group 1 of `re` anywhere in `line`, or an empty string.
fn attribute(re: &Regex, line: &str) -> String {
    re.captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Parse one snapshot line.
///
/// Total over all inputs: every line either yields an `Element` or a
/// `LineRejection` explaining why it was dropped. The returned element's
/// `line_number` is 0; `parse_content` fills it in.
pub fn parse_line(line: &str) -> Result<Element, LineRejection> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(LineRejection::Blank);
    }
    if trimmed.starts_with(constants::COMMENT_PREFIX) {
        return Err(LineRejection::Comment);
    }

    let patterns = patterns();
    let caps = patterns
        .record
        .captures(trimmed)
        .ok_or(LineRejection::NoMatch)?;

    Ok(Element {
        uid: caps[1].to_string(),
        element_type: caps[2].to_string(),
        text: caps[3].to_string(),
        description: attribute(&patterns.description, trimmed),
        url: attribute(&patterns.url, trimmed),
        raw_line: line.to_string(),
        line_number: 0,
    })
}

/// Split `content` into lines ending in `\n`, `\r\n`, or a lone `\r`.
/// Terminators are dropped; a trailing terminator yields no empty line.
fn split_lines<'a>(content: &'a str) -> impl Iterator<Item = &'a str> + 'a {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let line = match rest.find(&['\r', '\n'][..]) {
            Some(idx) => {
                let terminator = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                let line = &rest[..idx];
                rest = &rest[idx + terminator..];
                line
            }
            None => std::mem::take(&mut rest),
        };
        Some(line)
    })
}

/// Parse snapshot text already held in memory.
pub fn parse_content(content: &str) -> ParseResult {
    let mut elements = Vec::new();
    let mut lines_processed: u64 = 0;
    let mut lines_rejected: u64 = 0;

    for (line_idx, line) in split_lines(content).enumerate() {
        lines_processed += 1;
        let line_number = (line_idx as u64) + 1;

        match parse_line(line) {
            Ok(mut element) => {
                element.line_number = line_number;
                elements.push(element);
            }
            Err(LineRejection::NoMatch) => {
                lines_rejected += 1;
                tracing::trace!(
                    line = line_number,
                    text = %preview(line, constants::DEBUG_MAX_LINE_PREVIEW),
                    "Line does not match record shape"
                );
            }
            Err(LineRejection::Blank | LineRejection::Comment) => {}
        }
    }

    ParseResult {
        elements,
        lines_processed,
        lines_rejected,
        error: None,
    }
}

/// Parse a snapshot file.
///
/// Never fails: a missing, oversized, unreadable, or non-UTF-8 file yields
/// an empty element list with `error` set.
pub fn parse_file(path: &Path) -> ParseResult {
    let content = match read_snapshot(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Snapshot could not be read");
            return ParseResult::failed(e);
        }
    };

    let result = parse_content(&content);

    tracing::debug!(
        path = %path.display(),
        elements = result.elements.len(),
        rejected = result.lines_rejected,
        lines = result.lines_processed,
        "Parsing complete"
    );

    result
}

/// Parse a snapshot file and return only its elements.
///
/// Read failures are logged and yield an empty list.
pub fn parse_snapshot(path: &Path) -> Vec<Element> {
    parse_file(path).elements
}

fn read_snapshot(path: &Path) -> Result<String, ParseError> {
    let metadata =
        std::fs::metadata(path).map_err(|e| ParseError::from_io(path.to_path_buf(), e))?;

    if metadata.len() > constants::MAX_SNAPSHOT_FILE_SIZE {
        return Err(ParseError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_SNAPSHOT_FILE_SIZE,
        });
    }

    let bytes = std::fs::read(path).map_err(|e| ParseError::from_io(path.to_path_buf(), e))?;

    String::from_utf8(bytes).map_err(|e| ParseError::InvalidEncoding {
        path: path.to_path_buf(),
        source: e,
    })
}

/// First `max_chars` characters of `s`.
pub fn preview(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_line() {
        let el = parse_line(r#"uid=1_0 RootWebArea "Video Page""#).unwrap();
        assert_eq!(el.uid, "1_0");
        assert_eq!(el.element_type, "RootWebArea");
        assert_eq!(el.text, "Video Page");
        assert_eq!(el.description, "");
        assert_eq!(el.url, "");
    }

    #[test]
    fn test_attributes_in_any_order() {
        let a = parse_line(r#"uid=2 link "Home" description="nav" url="https://x/""#).unwrap();
        let b = parse_line(r#"uid=2 link "Home" url="https://x/" description="nav""#).unwrap();
        for el in [&a, &b] {
            assert_eq!(el.description, "nav");
            assert_eq!(el.url, "https://x/");
        }
    }

    #[test]
    fn test_empty_text_is_allowed() {
        let el = parse_line(r#"uid=3 generic """#).unwrap();
        assert_eq!(el.text, "");
    }

    #[test]
    fn test_text_stops_at_first_quote() {
        let el = parse_line(r#"uid=4 StaticText "a" b""#).unwrap();
        assert_eq!(el.text, "a");
    }

    #[test]
    fn test_leading_whitespace_is_tolerated() {
        let el = parse_line(r#"    uid=5 button "OK""#).unwrap();
        assert_eq!(el.uid, "5");
        assert_eq!(el.raw_line, r#"    uid=5 button "OK""#);
    }

    #[test]
    fn test_rejections() {
        assert_eq!(parse_line("   "), Err(LineRejection::Blank));
        assert_eq!(parse_line("# header"), Err(LineRejection::Comment));
        assert_eq!(
            parse_line(r#"id=1 button "x""#),
            Err(LineRejection::NoMatch)
        );
        assert_eq!(parse_line(r#"uid=1 "x""#), Err(LineRejection::NoMatch));
        assert_eq!(parse_line("uid=1 button x"), Err(LineRejection::NoMatch));
        assert_eq!(
            parse_line(r#"uid=1 button "unterminated"#),
            Err(LineRejection::NoMatch)
        );
    }

    #[test]
    fn test_parse_content_order_and_counts() {
        let content = "# snapshot\n\
                       uid=1_0 RootWebArea \"Page\" url=\"https://x\"\n\
                       \n\
                       garbage line\n\
                       uid=1_1 button \"1.\" description=\"点赞 liked count\"\n";
        let result = parse_content(content);
        assert!(result.is_ok());
        assert_eq!(result.lines_processed, 5);
        assert_eq!(result.lines_rejected, 1);
        let uids: Vec<_> = result.elements.iter().map(|e| e.uid.as_str()).collect();
        assert_eq!(uids, vec!["1_0", "1_1"]);
        assert_eq!(result.elements[0].line_number, 2);
        assert_eq!(result.elements[1].line_number, 5);
        assert_eq!(result.elements[1].description, "点赞 liked count");
    }

    #[test]
    fn test_cr_only_line_endings() {
        let result = parse_content("uid=1 button \"a\"\ruid=2 button \"b\" description=\"like\"\r");
        assert_eq!(result.elements.len(), 2);
        assert_eq!(result.elements[0].description, "");
        assert_eq!(result.elements[1].description, "like");
        assert_eq!(result.elements[1].line_number, 2);
    }

    #[test]
    fn test_mixed_line_endings() {
        let result = parse_content("uid=1 button \"a\"\r\n\ruid=2 link \"b\"\nuid=3 link \"c\"");
        assert_eq!(result.lines_processed, 4);
        let lines: Vec<_> = result.elements.iter().map(|e| e.line_number).collect();
        assert_eq!(lines, vec![1, 3, 4]);
        assert_eq!(result.elements[0].raw_line, "uid=1 button \"a\"");
    }

    #[test]
    fn test_duplicate_uids_coexist() {
        let result = parse_content("uid=1 button \"a\"\nuid=1 button \"b\"\n");
        assert_eq!(result.elements.len(), 2);
    }

    #[test]
    fn test_parse_file_missing_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_file(&dir.path().join("nope.txt"));
        assert!(result.elements.is_empty());
        assert!(matches!(result.error, Some(ParseError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_file_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        std::fs::write(&path, [b'u', b'i', b'd', b'=', 0xff, 0xfe]).unwrap();
        let result = parse_file(&path);
        assert!(result.elements.is_empty());
        assert!(matches!(
            result.error,
            Some(ParseError::InvalidEncoding { .. })
        ));
    }

    #[test]
    fn test_parse_file_too_large() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.txt");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(constants::MAX_SNAPSHOT_FILE_SIZE + 1).unwrap();

        let result = parse_file(&path);
        assert!(result.elements.is_empty());
        assert!(matches!(
            result.error,
            Some(ParseError::FileTooLarge { size, .. }) if size == constants::MAX_SNAPSHOT_FILE_SIZE + 1
        ));
    }

    #[test]
    fn test_preview_counts_chars() {
        assert_eq!(preview("学习资料合集", 2), "学习");
        assert_eq!(preview("abc", 10), "abc");
    }
}
