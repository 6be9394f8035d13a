// SnapSleuth - core/model.rs
//
// Core data model types. Pure data definitions with no I/O and no
// platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Element (normalised output of parsing)
// =============================================================================

/// A single UI node parsed from one snapshot line.
///
/// Elements are produced once per parse, kept in file order, and never
/// mutated afterwards. Optional attributes are empty strings when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Element {
    /// Snapshot identifier token (e.g. "1_0"). Not guaranteed unique.
    pub uid: String,

    /// Free-form node type (e.g. "RootWebArea", "button", "listitem").
    #[serde(rename = "type")]
    pub element_type: String,

    /// Primary quoted label. May be empty.
    pub text: String,

    /// Value of the `description="..."` attribute, or empty.
    pub description: String,

    /// Value of the `url="..."` attribute, or empty.
    pub url: String,

    /// The source line, verbatim.
    pub raw_line: String,

    /// 1-based line number in the source file.
    pub line_number: u64,
}

impl Element {
    /// Returns true when the element's type is one of `types`.
    /// An empty list allows every type.
    pub fn has_type_in(&self, types: &[String]) -> bool {
        types.is_empty() || types.iter().any(|t| *t == self.element_type)
    }
}

// =============================================================================
// Control rules
// =============================================================================

/// Element field a qualifier inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchField {
    #[default]
    Description,
    Text,
}

impl MatchField {
    /// The value of this field on `element`.
    pub fn value<'a>(&self, element: &'a Element) -> &'a str {
        match self {
            MatchField::Description => &element.description,
            MatchField::Text => &element.text,
        }
    }
}

/// One qualifying substring check of a control rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualifier {
    /// Substring that must appear in the inspected field.
    pub term: String,

    /// Field to inspect.
    #[serde(default)]
    pub field: MatchField,

    /// Lower-case both sides before comparing.
    #[serde(default)]
    pub ignore_case: bool,
}

impl Qualifier {
    /// Returns true when `element` satisfies this qualifier.
    pub fn accepts(&self, element: &Element) -> bool {
        let value = self.field.value(element);
        if self.ignore_case {
            value.to_lowercase().contains(&self.term.to_lowercase())
        } else {
            value.contains(&self.term)
        }
    }
}

/// Runtime representation of a validated control rule.
///
/// Probes are tried in order; each probe narrows the element list with a
/// case-insensitive text search, then the first element that is of an
/// allowed type and satisfies any qualifier wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRule {
    /// Unique rule identifier (e.g. "like_button").
    pub id: String,

    /// Human-readable name (e.g. "Like button").
    pub name: String,

    /// Ordered probe keywords.
    pub probes: Vec<String>,

    /// Qualifying checks; any one passing is enough.
    pub qualifiers: Vec<Qualifier>,

    /// Allowed element types (empty = all).
    pub element_types: Vec<String>,

    /// Whether this is a built-in rule (true) or user-defined (false).
    pub is_builtin: bool,
}

impl ControlRule {
    /// Returns true when `element` is of an allowed type and satisfies at
    /// least one qualifier.
    pub fn qualifies(&self, element: &Element) -> bool {
        element.has_type_in(&self.element_types)
            && self.qualifiers.iter().any(|q| q.accepts(element))
    }
}

// =============================================================================
// Page summary
// =============================================================================

/// Title and address of the page a snapshot was taken from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub title: String,
    pub url: String,
}
