//! Parse tree normalization - wrapper flattening and keyed extraction
//!
//! The grammar server wraps values in single-child lists at depths that vary
//! with grammar-rule nesting, so meaningful tuples are not directly
//! addressable in the raw tree. `flatten` collapses those wrappers; the keyed
//! accessors then read fields off the normalized shape.

use crate::types::ParseNode;

/// Collapse single-element wrapper lists
///
/// A list of length 1 is replaced by its (recursively flattened) sole
/// element; every other node is a fixed point. Total and idempotent.
pub fn flatten(node: &ParseNode) -> &ParseNode {
    match node {
        ParseNode::List(items) if items.len() == 1 => flatten(&items[0]),
        _ => node,
    }
}

/// Value of the first keyed entry matching `key`, when that value is a list
///
/// `entries` is scanned as a sequence of `[key, value]` pairs; elements that
/// are not shaped like a keyed entry are skipped. Returns `None` when no
/// entry matches or the matching entry's value is not a list. Not recursive:
/// callers apply `flatten` first when deeper unwrapping is needed.
pub fn get_inner_list_with_key<'a>(entries: &'a ParseNode, key: &str) -> Option<&'a ParseNode> {
    let items = entries.as_list()?;
    let entry = items.iter().find(|entry| {
        entry
            .as_list()
            .and_then(|pair| pair.first())
            .and_then(ParseNode::as_text)
            == Some(key)
    })?;
    let value = entry.get(1)?;
    value.as_list().map(|_| value)
}

/// First leaf string of a flattened value
///
/// A fully collapsed single-leaf wrapper flattens to the leaf itself, so both
/// `"CODE"` and `["CODE", ...]` shapes resolve here.
pub fn leading_text(node: &ParseNode) -> Option<&str> {
    match flatten(node) {
        ParseNode::Text(text) => Some(text),
        ParseNode::List(items) => items.first()?.as_text(),
        ParseNode::Flag(_) => None,
    }
}

/// Leaf string at `index` of a flattened value
pub fn text_at(node: &ParseNode, index: usize) -> Option<&str> {
    match flatten(node) {
        ParseNode::Text(text) if index == 0 => Some(text),
        ParseNode::List(items) => items.get(index)?.as_text(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: serde_json::Value) -> ParseNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_flatten_collapses_wrappers() {
        let wrapped = node(json!([[["DEF-ACT-LABEL", "A"]]]));
        assert_eq!(flatten(&wrapped), &node(json!(["DEF-ACT-LABEL", "A"])));
    }

    #[test]
    fn test_flatten_unwraps_single_leaf() {
        let wrapped = node(json!([["BETWEEN"]]));
        assert_eq!(flatten(&wrapped), &ParseNode::Text("BETWEEN".to_string()));
    }

    #[test]
    fn test_flatten_fixed_points() {
        let leaf = ParseNode::Text("A".to_string());
        assert_eq!(flatten(&leaf), &leaf);

        let empty = node(json!([]));
        assert_eq!(flatten(&empty), &empty);

        let pair = node(json!(["DEF-ACT-LABEL", "A"]));
        assert_eq!(flatten(&pair), &pair);
    }

    #[test]
    fn test_flatten_idempotent() {
        let cases = vec![
            node(json!([[["X"]]])),
            node(json!(["A", "B"])),
            node(json!([])),
            ParseNode::Flag(true),
        ];
        for case in &cases {
            assert_eq!(flatten(flatten(case)), flatten(case));
        }
    }

    #[test]
    fn test_get_inner_list_with_key() {
        let entries = node(json!([["A", ["1"]], ["B", ["2"]]]));
        assert_eq!(
            get_inner_list_with_key(&entries, "B"),
            Some(&node(json!(["2"])))
        );
        assert_eq!(get_inner_list_with_key(&entries, "C"), None);
    }

    #[test]
    fn test_get_inner_list_skips_non_entries() {
        let entries = node(json!(["stray", true, ["ACT", ["X"]]]));
        assert_eq!(
            get_inner_list_with_key(&entries, "ACT"),
            Some(&node(json!(["X"])))
        );
    }

    #[test]
    fn test_get_inner_list_rejects_leaf_value() {
        // value of the first matching entry is not a list
        let entries = node(json!([["ACT", "X"]]));
        assert_eq!(get_inner_list_with_key(&entries, "ACT"), None);
    }

    #[test]
    fn test_leading_text() {
        assert_eq!(leading_text(&node(json!(["BETWEEN"]))), Some("BETWEEN"));
        assert_eq!(leading_text(&node(json!(["A", "B"]))), Some("A"));
        assert_eq!(leading_text(&ParseNode::Flag(false)), None);
    }

    #[test]
    fn test_text_at() {
        let def_act = node(json!([[["DEF-ACT-LABEL", "A"]]]));
        assert_eq!(text_at(&def_act, 1), Some("A"));
        assert_eq!(text_at(&def_act, 2), None);
    }
}
