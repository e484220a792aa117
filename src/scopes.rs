//! Scope resolution - ordered (scope, activity) pairs from the parameter tree
//!
//! Every multi-activity constraint intent consumes the same shape: an ordered
//! list of scope pairs. The grammar emits them in two mutually exclusive
//! forms, one selector per activity or a single plural selector shared by all
//! activities.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::taxonomy::{resolve_plural_selector, resolve_selector, CanonicalSelector};
use crate::tree::{flatten, get_inner_list_with_key, leading_text, text_at};
use crate::types::ParseNode;

/// A scoped activity reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopePair {
    pub scope: CanonicalSelector,
    pub activity_id: String,
}

/// Extract the ordered scope pairs from the parameter tree
///
/// Per-item form: a `SELECTOR` list with one entry per activity, each
/// carrying its own `SCOPE` code and `DEF-ACT` reference. Plural form
/// (`SELECTOR` absent): one `SELECTOR-PLURAL` code applied to every entry of
/// the `DEF-ACT` list. Input order is preserved in both forms.
pub fn get_scopes(params: &ParseNode) -> Result<Vec<ScopePair>, Error> {
    if let Some(selector_list) = get_inner_list_with_key(params, "SELECTOR") {
        per_item_scopes(selector_list)
    } else {
        plural_scopes(params)
    }
}

fn per_item_scopes(selector_list: &ParseNode) -> Result<Vec<ScopePair>, Error> {
    let entries = selector_list
        .as_list()
        .ok_or(Error::MalformedParameters("SELECTOR is not a list"))?;
    let mut pairs = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = flatten(entry);
        let scope_value =
            get_inner_list_with_key(entry, "SCOPE").ok_or(Error::MissingKey("SCOPE"))?;
        let code =
            leading_text(scope_value).ok_or(Error::MalformedParameters("SCOPE is not textual"))?;
        let scope = resolve_selector(code)?;

        let def_act =
            get_inner_list_with_key(entry, "DEF-ACT").ok_or(Error::MissingKey("DEF-ACT"))?;
        let activity_id = text_at(def_act, 1).ok_or(Error::MalformedParameters(
            "DEF-ACT carries no activity identifier",
        ))?;
        pairs.push(ScopePair {
            scope,
            activity_id: activity_id.to_string(),
        });
    }
    Ok(pairs)
}

fn plural_scopes(params: &ParseNode) -> Result<Vec<ScopePair>, Error> {
    let plural = get_inner_list_with_key(params, "SELECTOR-PLURAL")
        .ok_or(Error::MissingKey("SELECTOR-PLURAL"))?;
    let code = leading_text(plural)
        .ok_or(Error::MalformedParameters("SELECTOR-PLURAL is not textual"))?;
    let scope = resolve_plural_selector(code)?;

    let def_act =
        get_inner_list_with_key(params, "DEF-ACT").ok_or(Error::MissingKey("DEF-ACT"))?;
    let activities = flatten(def_act)
        .as_list()
        .ok_or(Error::MalformedParameters("DEF-ACT is not a list"))?;
    let mut pairs = Vec::with_capacity(activities.len());
    for activity in activities {
        let activity_id = text_at(activity, 1).ok_or(Error::MalformedParameters(
            "DEF-ACT carries no activity identifier",
        ))?;
        pairs.push(ScopePair {
            scope,
            activity_id: activity_id.to_string(),
        });
    }
    Ok(pairs)
}
