//! Derived storage keys.
//!
//! Every nested object level and every array field gets its own key,
//! rebuilt from the parent key, the uppercased field name, and (for
//! array-of-object elements) the position. The derivation is pure, so
//! encode and decode compute identical keys independently; nothing is
//! ever looked up in reverse.

/// Segment separator in physical keys.
pub const CONNECTOR: &str = ":";

/// Key of a nested-object or array field: `parent:FIELD`.
pub fn field_key(parent: &str, field: &str) -> String {
    format!("{parent}{CONNECTOR}{}", field.to_uppercase())
}

/// Key of one array-of-objects element: `parent:FIELD:index`.
pub fn element_key(parent: &str, field: &str, index: usize) -> String {
    format!("{parent}{CONNECTOR}{}{CONNECTOR}{index}", field.to_uppercase())
}

/// Append a store's namespace suffix: `key:SUFFIX`.
pub fn namespaced(key: &str, suffix: &str) -> String {
    format!("{key}{CONNECTOR}{suffix}")
}

/// The key actually sent to a store, with the namespace suffix applied
/// when the caller opted in.
pub(crate) fn physical(key: &str, suffix: &str, namespace: bool) -> String {
    if namespace {
        namespaced(key, suffix)
    } else {
        key.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_uppercases_and_chains() {
        assert_eq!(field_key("user", "dbs"), "user:DBS");
        assert_eq!(field_key("user:DBS", "redis"), "user:DBS:REDIS");
        assert_eq!(element_key("user", "repos", 2), "user:REPOS:2");
    }

    #[test]
    fn namespacing_appends_the_store_suffix() {
        assert_eq!(namespaced("user:DBS", "HASH"), "user:DBS:HASH");
        assert_eq!(physical("user", "ZSET", true), "user:ZSET");
        assert_eq!(physical("user", "ZSET", false), "user");
    }

    #[test]
    fn derivation_is_reproducible() {
        assert_eq!(field_key("a", "b"), field_key("a", "b"));
    }
}
