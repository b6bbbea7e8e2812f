//! Key names used at the JSON serialization boundary

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Default discriminant key carried by every node
pub const DEFAULT_DISCRIMINANT_KEY: &str = "@bean";
/// Default key naming the type inside a value payload
pub const DEFAULT_VALUE_TYPE_KEY: &str = "@type";
/// Namespace of the operator discriminants in the built-in catalog
pub const DEFAULT_OPERATOR_TAG_PREFIX: &str = "com.cyoda.core.conditions.";
/// Substring that marks a discriminant as a group; also the tag of new groups
pub const GROUP_MARKER: &str = "GroupCondition";

/// JSON key names and tag namespace used on the wire
///
/// Operator discriminants are matched against the catalog with the
/// default namespace. A host whose operator classes live elsewhere sets
/// `operator_tag_prefix`; condition tags are then rewritten between that
/// prefix and the catalog's on the way out and back in. Tags outside the
/// configured prefix are carried verbatim and validate as unknown
/// operators (`missing_operation`). Group tags are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WireFormat {
    pub discriminant_key: String,
    pub value_type_key: String,
    pub operator_tag_prefix: String,
}

impl Default for WireFormat {
    fn default() -> Self {
        Self {
            discriminant_key: DEFAULT_DISCRIMINANT_KEY.to_string(),
            value_type_key: DEFAULT_VALUE_TYPE_KEY.to_string(),
            operator_tag_prefix: DEFAULT_OPERATOR_TAG_PREFIX.to_string(),
        }
    }
}

impl WireFormat {
    /// Condition tag as written to a document
    pub fn operator_tag_to_wire<'a>(&self, tag: &'a str) -> Cow<'a, str> {
        swap_prefix(tag, DEFAULT_OPERATOR_TAG_PREFIX, &self.operator_tag_prefix)
    }

    /// Condition tag as held in the tree after reading a document
    pub fn operator_tag_from_wire<'a>(&self, tag: &'a str) -> Cow<'a, str> {
        swap_prefix(tag, &self.operator_tag_prefix, DEFAULT_OPERATOR_TAG_PREFIX)
    }
}

fn swap_prefix<'a>(tag: &'a str, from: &str, to: &str) -> Cow<'a, str> {
    if from == to || from.is_empty() {
        return Cow::Borrowed(tag);
    }
    match tag.strip_prefix(from) {
        Some(rest) => Cow::Owned(format!("{}{}", to, rest)),
        None => Cow::Borrowed(tag),
    }
}
