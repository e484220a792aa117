//! Taxonomy resolution - grammar server codes to canonical names
//!
//! The grammar server and the intent registry use different vocabularies for
//! the same concepts. The tables here are the single place where the two are
//! reconciled; any code outside a table is a hard mapping error.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::tree::{get_inner_list_with_key, leading_text};
use crate::types::ParseNode;

/// Canonical constraint kinds, named after the intents they resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalConstraint {
    ActivityBackpath,
    ActivityBetween,
    ActivityBefore,
    ActivityAfter,
    ActivityRepeats,
    ActivitiesNoCoOccurs,
}

impl CanonicalConstraint {
    pub fn intent_name(self) -> &'static str {
        match self {
            CanonicalConstraint::ActivityBackpath => "ActivityBackpath",
            CanonicalConstraint::ActivityBetween => "ActivityBetween",
            CanonicalConstraint::ActivityBefore => "ActivityBefore",
            CanonicalConstraint::ActivityAfter => "ActivityAfter",
            CanonicalConstraint::ActivityRepeats => "ActivityRepeats",
            CanonicalConstraint::ActivitiesNoCoOccurs => "ActivitiesNoCoOccurs",
        }
    }
}

/// Canonical selector qualifying an activity reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanonicalSelector {
    #[serde(rename = "Branch of")]
    BranchOf,
    #[serde(rename = "Activity")]
    Activity,
    #[serde(rename = "Block of")]
    BlockOf,
}

impl CanonicalSelector {
    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalSelector::BranchOf => "Branch of",
            CanonicalSelector::Activity => "Activity",
            CanonicalSelector::BlockOf => "Block of",
        }
    }
}

/// Map a grammar constraint code to its canonical constraint
pub fn resolve_constraint(code: &str) -> Result<CanonicalConstraint, Error> {
    match code {
        "INVERSE-BACKWARDS-PATH" => Ok(CanonicalConstraint::ActivityBackpath),
        "BETWEEN" => Ok(CanonicalConstraint::ActivityBetween),
        "PRECEDENCE" | "PRECEDENCE-PRE" => Ok(CanonicalConstraint::ActivityBefore),
        "INVERSE-PRECEDENCE" => Ok(CanonicalConstraint::ActivityAfter),
        "REPEATS-PRE" | "REPEATS-SUF" => Ok(CanonicalConstraint::ActivityRepeats),
        "CONFLICT-PRE" | "CONFLICT" => Ok(CanonicalConstraint::ActivitiesNoCoOccurs),
        other => Err(Error::UnknownConstraint(other.to_string())),
    }
}

/// Map a per-item selector code to its canonical selector (exact match)
pub fn resolve_selector(code: &str) -> Result<CanonicalSelector, Error> {
    match code {
        "BRANCH-SEL" => Ok(CanonicalSelector::BranchOf),
        "ACT-SEL" => Ok(CanonicalSelector::Activity),
        "BLOCK-SEL" => Ok(CanonicalSelector::BlockOf),
        other => Err(Error::UnknownSelector(other.to_string())),
    }
}

/// Map a plural selector code by substring containment
///
/// The grammar server emits grammar-rule-specific plural codes, so matching
/// is on the fragment rather than the exact code. Checked in the order
/// `ACT`, `BRANCH`, `BLOCK`.
pub fn resolve_plural_selector(code: &str) -> Result<CanonicalSelector, Error> {
    if code.contains("ACT") {
        Ok(CanonicalSelector::Activity)
    } else if code.contains("BRANCH") {
        Ok(CanonicalSelector::BranchOf)
    } else if code.contains("BLOCK") {
        Ok(CanonicalSelector::BlockOf)
    } else {
        Err(Error::UnknownSelector(code.to_string()))
    }
}

/// Constraint-type keys in priority order; the first one present wins
const CONSTRAINT_TYPE_KEYS: [&str; 5] = [
    "CONSTRAINT-TYPE",
    "CONSTRAINT-TYPE-PRE",
    "TERNARY-CONSTRAINT-TYPE",
    "UNARY-CONSTRAINT-TYPE-PRE",
    "UNARY-CONSTRAINT-TYPE-SUF",
];

/// Rewrite a raw grammar intent name into the registry's vocabulary
///
/// `RelabelActivity` is renamed unconditionally; `AddConstraint` is resolved
/// through the constraint table using the parameter tree; every other name
/// passes through unchanged.
pub fn resolve_intent_name(raw: &str, params: &ParseNode) -> Result<String, Error> {
    match raw {
        "RelabelActivity" => Ok("RenameActivity".to_string()),
        "AddConstraint" => {
            let value = CONSTRAINT_TYPE_KEYS
                .iter()
                .find_map(|key| get_inner_list_with_key(params, key))
                .ok_or(Error::MissingKey("CONSTRAINT-TYPE"))?;
            let code = leading_text(value)
                .ok_or(Error::MalformedParameters("constraint type is not textual"))?;
            Ok(resolve_constraint(code)?.intent_name().to_string())
        }
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> ParseNode {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_constraint_table_totality() {
        let table = [
            ("INVERSE-BACKWARDS-PATH", "ActivityBackpath"),
            ("BETWEEN", "ActivityBetween"),
            ("PRECEDENCE", "ActivityBefore"),
            ("PRECEDENCE-PRE", "ActivityBefore"),
            ("INVERSE-PRECEDENCE", "ActivityAfter"),
            ("REPEATS-PRE", "ActivityRepeats"),
            ("REPEATS-SUF", "ActivityRepeats"),
            ("CONFLICT-PRE", "ActivitiesNoCoOccurs"),
            ("CONFLICT", "ActivitiesNoCoOccurs"),
        ];
        for (code, intent) in table {
            assert_eq!(resolve_constraint(code).unwrap().intent_name(), intent);
        }
    }

    #[test]
    fn test_unknown_constraint_fails() {
        assert_eq!(
            resolve_constraint("UNKNOWN-X"),
            Err(Error::UnknownConstraint("UNKNOWN-X".to_string()))
        );
    }

    #[test]
    fn test_selector_exact_match() {
        assert_eq!(
            resolve_selector("BRANCH-SEL").unwrap(),
            CanonicalSelector::BranchOf
        );
        assert_eq!(
            resolve_selector("ACT-SEL").unwrap(),
            CanonicalSelector::Activity
        );
        assert_eq!(
            resolve_selector("BLOCK-SEL").unwrap(),
            CanonicalSelector::BlockOf
        );
        assert!(resolve_selector("ACT").is_err());
    }

    #[test]
    fn test_plural_selector_substring_match() {
        assert_eq!(
            resolve_plural_selector("ACTIVITIES-SEL").unwrap(),
            CanonicalSelector::Activity
        );
        assert_eq!(
            resolve_plural_selector("BRANCHES-SEL").unwrap(),
            CanonicalSelector::BranchOf
        );
        assert_eq!(
            resolve_plural_selector("BLOCKS-SEL").unwrap(),
            CanonicalSelector::BlockOf
        );
        assert!(resolve_plural_selector("LANES-SEL").is_err());
    }

    #[test]
    fn test_relabel_is_renamed() {
        let empty = ParseNode::default();
        assert_eq!(
            resolve_intent_name("RelabelActivity", &empty).unwrap(),
            "RenameActivity"
        );
    }

    #[test]
    fn test_add_constraint_resolution() {
        let tree = params(json!([["CONSTRAINT-TYPE", ["BETWEEN"]]]));
        assert_eq!(
            resolve_intent_name("AddConstraint", &tree).unwrap(),
            "ActivityBetween"
        );
    }

    #[test]
    fn test_constraint_key_priority() {
        // CONSTRAINT-TYPE wins over the unary keys regardless of entry order
        let tree = params(json!([
            ["UNARY-CONSTRAINT-TYPE-PRE", ["REPEATS-PRE"]],
            ["CONSTRAINT-TYPE", ["BETWEEN"]]
        ]));
        assert_eq!(
            resolve_intent_name("AddConstraint", &tree).unwrap(),
            "ActivityBetween"
        );
    }

    #[test]
    fn test_add_constraint_without_type_key_fails() {
        let tree = params(json!([["ACT", ["X"]]]));
        assert_eq!(
            resolve_intent_name("AddConstraint", &tree),
            Err(Error::MissingKey("CONSTRAINT-TYPE"))
        );
    }

    #[test]
    fn test_other_names_pass_through() {
        let empty = ParseNode::default();
        assert_eq!(
            resolve_intent_name("AddActivity", &empty).unwrap(),
            "AddActivity"
        );
    }
}
