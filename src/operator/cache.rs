//! Per-type memo of applicable operators

use crate::operator::catalog::{all, applicable_in, OperatorDefinition};
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use smallvec::SmallVec;

/// Operators offered for one field type, in catalog order
pub type ApplicableOperators = SmallVec<[&'static OperatorDefinition; 24]>;

static APPLICABLE_CACHE: Lazy<RwLock<AHashMap<String, ApplicableOperators>>> =
    Lazy::new(|| RwLock::new(AHashMap::with_capacity(32)));

/// Operators applicable to a field of short type `type_short`
///
/// Returns every operator whose type list is empty or contains `type_short`.
/// If none qualifies, the whole catalog is returned instead of an empty list.
pub fn lookup_applicable(type_short: &str) -> ApplicableOperators {
    {
        let cache = APPLICABLE_CACHE.read();
        if let Some(ops) = cache.get(type_short) {
            return ops.clone();
        }
    }

    tracing::trace!(type_short, "applicable operator cache miss");
    let ops = applicable_in(all(), type_short);

    {
        let mut cache = APPLICABLE_CACHE.write();
        cache.insert(type_short.to_string(), ops.clone());
    }

    ops
}

/// Clear the memo (useful for testing)
pub fn clear_cache() {
    APPLICABLE_CACHE.write().clear();
}

/// Number of memoized type names
pub fn cache_size() -> usize {
    APPLICABLE_CACHE.read().len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(ops: &ApplicableOperators) -> Vec<&'static str> {
        ops.iter().map(|op| op.key).collect()
    }

    #[test]
    fn test_string_operators() {
        let keys = keys(&lookup_applicable("String"));
        assert!(keys.contains(&"EQUALS"));
        assert!(keys.contains(&"CONTAINS"));
        assert!(keys.contains(&"IS_CHANGED"));
        assert!(!keys.contains(&"BETWEEN"));
        assert!(!keys.contains(&"GREATER_THAN"));
    }

    #[test]
    fn test_numeric_operators() {
        let keys = keys(&lookup_applicable("Integer"));
        assert!(keys.contains(&"BETWEEN"));
        assert!(keys.contains(&"LESS_OR_EQUAL"));
        assert!(!keys.contains(&"CONTAINS"));
    }

    #[test]
    fn test_untyped_operators_apply_everywhere() {
        // Boolean has no type-specific operators; only the universal ones match.
        let keys = keys(&lookup_applicable("Boolean"));
        assert_eq!(
            keys,
            vec!["EQUALS", "NOT_EQUAL", "IS_NULL", "NOT_NULL", "IS_CHANGED", "IS_UNCHANGED"]
        );
    }

    #[test]
    fn test_catalog_order_preserved() {
        let ops = lookup_applicable("Long");
        let positions: Vec<usize> = ops
            .iter()
            .map(|op| all().iter().position(|o| o.key == op.key).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_cache_hit() {
        let first = lookup_applicable("ZonedDateTime");
        assert!(cache_size() >= 1);
        let second = lookup_applicable("ZonedDateTime");
        assert_eq!(keys(&first), keys(&second));
    }
}
