//! Fixed table of comparison operators

use crate::config::DEFAULT_OPERATOR_TAG_PREFIX;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use smallvec::SmallVec;

const STRING_TYPES: &[&str] = &["String"];

const ORDERED_TYPES: &[&str] = &[
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Double",
    "Float",
    "BigDecimal",
    "BigInteger",
    "LocalDate",
    "LocalDateTime",
    "ZonedDateTime",
    "Date",
];

/// Key of the only operator that marks its condition as queryable
pub const EQUALS_KEY: &str = "EQUALS";
/// Key of the operator whose value is checked as a regular expression
pub const MATCHES_PATTERN_KEY: &str = "MATCHES_PATTERN";

/// Static description of one comparison operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorDefinition {
    pub key: &'static str,
    pub label: &'static str,
    /// Short type names this operator applies to; empty means every type
    pub applicable_types: &'static [&'static str],
    /// Takes `from`/`to` bounds instead of a single value
    pub is_range: bool,
    /// Takes no value at all
    pub disable_value_field: bool,
    /// Compares current and prior values over a lookback window
    pub is_change_tracking: bool,
    pub serialization_tag: String,
}

impl OperatorDefinition {
    fn new(key: &'static str, label: &'static str, types: &'static [&'static str], tag: &str) -> Self {
        Self {
            key,
            label,
            applicable_types: types,
            is_range: false,
            disable_value_field: false,
            is_change_tracking: false,
            serialization_tag: format!("{}{}", DEFAULT_OPERATOR_TAG_PREFIX, tag),
        }
    }

    fn range(mut self) -> Self {
        self.is_range = true;
        self
    }

    fn without_value(mut self) -> Self {
        self.disable_value_field = true;
        self
    }

    fn change_tracking(mut self) -> Self {
        self.is_change_tracking = true;
        self
    }

    /// Whether this operator may be offered for a field of `type_short`
    pub fn applies_to(&self, type_short: &str) -> bool {
        self.applicable_types.is_empty() || self.applicable_types.contains(&type_short)
    }

    /// True for the flagless definition returned for unknown keys
    pub fn is_neutral(&self) -> bool {
        self.key.is_empty()
    }
}

static CATALOG: Lazy<Vec<OperatorDefinition>> = Lazy::new(|| {
    use OperatorDefinition as Op;
    vec![
        Op::new(EQUALS_KEY, "equals", &[], "queryable.Equals"),
        Op::new("NOT_EQUAL", "not equal", &[], "nonqueryable.NotEquals"),
        Op::new("IEQUALS", "equals (ignore case)", STRING_TYPES, "nonqueryable.IEquals"),
        Op::new("INOT_EQUAL", "not equal (ignore case)", STRING_TYPES, "nonqueryable.INotEquals"),
        Op::new("CONTAINS", "contains", STRING_TYPES, "nonqueryable.IContains"),
        Op::new("NOT_CONTAINS", "does not contain", STRING_TYPES, "nonqueryable.INotContains"),
        Op::new("STARTS_WITH", "starts with", STRING_TYPES, "nonqueryable.IStartsWith"),
        Op::new("NOT_STARTS_WITH", "does not start with", STRING_TYPES, "nonqueryable.INotStartsWith"),
        Op::new("ENDS_WITH", "ends with", STRING_TYPES, "nonqueryable.IEndsWith"),
        Op::new("NOT_ENDS_WITH", "does not end with", STRING_TYPES, "nonqueryable.INotEndsWith"),
        Op::new(MATCHES_PATTERN_KEY, "matches pattern", STRING_TYPES, "nonqueryable.MatchesPattern"),
        Op::new("GREATER_THAN", "greater than", ORDERED_TYPES, "queryable.GreaterThan"),
        Op::new("LESS_THAN", "less than", ORDERED_TYPES, "queryable.LessThan"),
        Op::new("GREATER_OR_EQUAL", "greater or equal", ORDERED_TYPES, "queryable.GreaterThanEquals"),
        Op::new("LESS_OR_EQUAL", "less or equal", ORDERED_TYPES, "queryable.LessThanEquals"),
        Op::new("BETWEEN", "between", ORDERED_TYPES, "queryable.Between").range(),
        Op::new("BETWEEN_INCLUSIVE", "between (inclusive)", ORDERED_TYPES, "queryable.BetweenInclusive").range(),
        Op::new("IS_NULL", "is null", &[], "nonqueryable.IsNull").without_value(),
        Op::new("NOT_NULL", "is not null", &[], "nonqueryable.NotNull").without_value(),
        Op::new("IS_CHANGED", "is changed", &[], "nonqueryable.IsChanged").change_tracking(),
        Op::new("IS_UNCHANGED", "is unchanged", &[], "nonqueryable.IsUnchanged").change_tracking(),
    ]
});

static BY_KEY: Lazy<AHashMap<&'static str, usize>> = Lazy::new(|| {
    CATALOG
        .iter()
        .enumerate()
        .map(|(idx, op)| (op.key, idx))
        .collect()
});

static BY_TAG: Lazy<AHashMap<&'static str, usize>> = Lazy::new(|| {
    CATALOG
        .iter()
        .enumerate()
        .map(|(idx, op)| (op.serialization_tag.as_str(), idx))
        .collect()
});

static NEUTRAL: Lazy<OperatorDefinition> = Lazy::new(|| OperatorDefinition {
    key: "",
    label: "",
    applicable_types: &[],
    is_range: false,
    disable_value_field: false,
    is_change_tracking: false,
    serialization_tag: String::new(),
});

/// Every operator, in display order
pub fn all() -> &'static [OperatorDefinition] {
    &CATALOG
}

/// Definition for `key`, or the neutral flagless definition when unknown
pub fn lookup_by_key(key: &str) -> &'static OperatorDefinition {
    find_by_key(key).unwrap_or(&*NEUTRAL)
}

/// Strict lookup: `None` for unknown keys
pub fn find_by_key(key: &str) -> Option<&'static OperatorDefinition> {
    BY_KEY.get(key).map(|&idx| &CATALOG[idx])
}

/// Operator whose wire discriminant is exactly `tag`
pub fn find_by_tag(tag: &str) -> Option<&'static OperatorDefinition> {
    BY_TAG.get(tag).map(|&idx| &CATALOG[idx])
}

/// Operators in `table` applicable to `type_short`, falling back to the
/// whole table when none match
pub fn applicable_in<'a>(
    table: &'a [OperatorDefinition],
    type_short: &str,
) -> SmallVec<[&'a OperatorDefinition; 24]> {
    let matching: SmallVec<[&OperatorDefinition; 24]> =
        table.iter().filter(|op| op.applies_to(type_short)).collect();
    if matching.is_empty() {
        table.iter().collect()
    } else {
        matching
    }
}
