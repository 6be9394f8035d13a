// SnapSleuth - core/query.rs
//
// Linear-scan lookups over parsed snapshot elements.
// Core layer: pure logic, no I/O. Every query borrows from the element
// slice and returns matches in file order.

use crate::core::model::{ControlRule, Element, PageInfo};
use crate::core::rules;
use crate::util::constants;

/// Elements whose `text` or `description` contains `query`.
///
/// When `case_sensitive` is false both sides are lower-cased before the
/// substring test. `url` is never searched. An empty query matches every
/// element.
pub fn find_by_text<'a>(
    elements: &'a [Element],
    query: &str,
    case_sensitive: bool,
) -> Vec<&'a Element> {
    if case_sensitive {
        return elements
            .iter()
            .filter(|el| el.text.contains(query) || el.description.contains(query))
            .collect();
    }

    let query_lower = query.to_lowercase();
    elements
        .iter()
        .filter(|el| {
            el.text.to_lowercase().contains(&query_lower)
                || el.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// Elements whose type equals `element_type` exactly.
pub fn find_by_type<'a>(elements: &'a [Element], element_type: &str) -> Vec<&'a Element> {
    elements
        .iter()
        .filter(|el| el.element_type == element_type)
        .collect()
}

/// Locate a control described by `rule`.
///
/// Probes are tried in rule order. Each probe narrows the list with a
/// case-insensitive `find_by_text`, and the first narrowed element that
/// `rule.qualifies` is returned.
pub fn find_control<'a>(elements: &'a [Element], rule: &ControlRule) -> Option<&'a Element> {
    for probe in &rule.probes {
        if let Some(found) = find_by_text(elements, probe, false)
            .into_iter()
            .find(|el| rule.qualifies(el))
        {
            tracing::debug!(rule = %rule.id, probe = %probe, uid = %found.uid, "Control located");
            return Some(found);
        }
    }
    tracing::debug!(rule = %rule.id, "Control not found");
    None
}

/// Locate a control by rule id within `rules`.
///
/// Returns `None` both when the rule is unknown and when it matches nothing.
pub fn find_control_by_id<'a>(
    elements: &'a [Element],
    rules: &[ControlRule],
    rule_id: &str,
) -> Option<&'a Element> {
    match rules.iter().find(|r| r.id == rule_id) {
        Some(rule) => find_control(elements, rule),
        None => {
            tracing::warn!(rule = rule_id, "Unknown control rule");
            None
        }
    }
}

fn find_builtin<'a>(elements: &'a [Element], rule_id: &str) -> Option<&'a Element> {
    find_control_by_id(elements, rules::builtin_rules(), rule_id)
}

/// The "like" button, using the built-in `like_button` rule.
pub fn find_like_button(elements: &[Element]) -> Option<&Element> {
    find_builtin(elements, constants::LIKE_BUTTON_RULE)
}

/// The "favorite" button, using the built-in `favorite_button` rule.
pub fn find_favorite_button(elements: &[Element]) -> Option<&Element> {
    find_builtin(elements, constants::FAVORITE_BUTTON_RULE)
}

/// The confirm button of the favorites dialog, using the built-in
/// `favorite_confirm` rule.
pub fn find_favorite_confirm(elements: &[Element]) -> Option<&Element> {
    find_builtin(elements, constants::FAVORITE_CONFIRM_RULE)
}

/// The first list row whose text or description contains `folder_name`.
pub fn find_favorite_folder<'a>(
    elements: &'a [Element],
    folder_name: &str,
) -> Option<&'a Element> {
    find_favorite_folder_with(elements, folder_name, None)
}

/// Like `find_favorite_folder`, additionally accepting any match whose text
/// contains `fallback_keyword` regardless of its type.
pub fn find_favorite_folder_with<'a>(
    elements: &'a [Element],
    folder_name: &str,
    fallback_keyword: Option<&str>,
) -> Option<&'a Element> {
    find_by_text(elements, folder_name, false)
        .into_iter()
        .find(|el| {
            el.element_type == constants::LIST_ITEM_TYPE
                || fallback_keyword.is_some_and(|kw| el.text.contains(kw))
        })
}

/// Buttons and links with non-blank text.
pub fn clickable_elements(elements: &[Element]) -> Vec<&Element> {
    elements
        .iter()
        .filter(|el| {
            constants::CLICKABLE_TYPES.contains(&el.element_type.as_str())
                && !el.text.trim().is_empty()
        })
        .collect()
}

/// Title and URL of the first `RootWebArea` node.
pub fn page_info(elements: &[Element]) -> Option<PageInfo> {
    elements
        .iter()
        .find(|el| el.element_type == constants::ROOT_WEB_AREA_TYPE)
        .map(|root| PageInfo {
            title: root.text.clone(),
            url: root.url.clone(),
        })
}

/// True when the snapshot's page URL contains `target`.
pub fn is_on_page(elements: &[Element], target: &str) -> bool {
    page_info(elements).is_some_and(|info| info.url.contains(target))
}

/// True when any element's text or description contains `text`,
/// ignoring case.
pub fn contains_text(elements: &[Element], text: &str) -> bool {
    !find_by_text(elements, text, false).is_empty()
}

/// True when the snapshot shows the "add to favorites" dialog.
pub fn favorite_dialog_open(elements: &[Element]) -> bool {
    elements.iter().any(|el| {
        el.element_type == constants::DIALOG_TYPE
            || el.text.contains(constants::FAVORITE_DIALOG_TITLE)
    })
}
