//! Intent context builders and dispatch
//!
//! One builder per recognized intent kind. Each consumes the parameter tree
//! plus the intent's out-context definition (resolved by fixed name) and
//! produces a populated context instance with the standard lifespan.

use crate::error::Error;
use crate::registry::{ContextDefinition, IntentDefinition};
use crate::scopes::{get_scopes, ScopePair};
use crate::tree::{get_inner_list_with_key, leading_text, text_at};
use crate::types::{ContextInstance, ContextParameterValue, ParseNode, CONTEXT_LIFESPAN};

/// Dispatch the (possibly renamed) intent name to its context builder
///
/// Intent names with no builder entry need no extra parameters and yield an
/// empty list; the caller still assembles a valid recognition result.
pub fn build_contexts(
    intent_name: &str,
    definition: &IntentDefinition,
    params: &ParseNode,
) -> Result<Vec<ContextInstance>, Error> {
    let instance = match intent_name {
        "AddActivity" => Some(build_add_activity(definition, params)?),
        "LoadModel" | "SaveModel" => Some(build_model_name(definition, params)?),
        "RenameActivity" => Some(build_rename_activity(definition, params)?),
        "ActivityBackpath" => Some(build_backpath(definition, params)?),
        "ActivityBefore" => Some(build_before_after(definition, "Precedence", params)?),
        "ActivityAfter" => Some(build_before_after(definition, "Succession", params)?),
        "ActivityBetween" => Some(build_between(definition, params)?),
        "ActivityRepeats" => Some(build_repeats(definition, params)?),
        "ActivitiesNoCoOccurs" => Some(build_no_co_occurs(definition, params)?),
        _ => None,
    };
    Ok(instance.into_iter().collect())
}

fn out_context<'a>(
    definition: &'a IntentDefinition,
    name: &'static str,
) -> Result<&'a ContextDefinition, Error> {
    definition
        .out_context(name)
        .ok_or_else(|| Error::MissingOutContext {
            context: name,
            intent: definition.name.clone(),
        })
}

fn value_for(
    context: &ContextDefinition,
    parameter: &'static str,
    value: impl Into<String>,
) -> Result<ContextParameterValue, Error> {
    if !context.has_parameter(parameter) {
        return Err(Error::MissingParameter {
            parameter,
            context: context.name.clone(),
        });
    }
    Ok(ContextParameterValue {
        parameter: parameter.to_string(),
        value: value.into(),
    })
}

fn instance_of(context: &ContextDefinition, values: Vec<ContextParameterValue>) -> ContextInstance {
    ContextInstance {
        name: context.name.clone(),
        lifespan: CONTEXT_LIFESPAN,
        values,
    }
}

fn scope_at(scopes: &[ScopePair], index: usize) -> Result<&ScopePair, Error> {
    scopes.get(index).ok_or(Error::MalformedParameters(
        "not enough scope pairs for the constraint",
    ))
}

/// `Activity` context: `name` is the comma-joined `ACT` values
fn build_add_activity(
    definition: &IntentDefinition,
    params: &ParseNode,
) -> Result<ContextInstance, Error> {
    let context = out_context(definition, "Activity")?;
    let act = get_inner_list_with_key(params, "ACT").ok_or(Error::MissingKey("ACT"))?;
    let items = act
        .as_list()
        .ok_or(Error::MalformedParameters("ACT is not a list"))?;
    let mut names = Vec::with_capacity(items.len());
    for item in items {
        names.push(
            item.as_text()
                .ok_or(Error::MalformedParameters("ACT values must be textual"))?,
        );
    }
    let values = vec![value_for(context, "name", names.join(","))?];
    Ok(instance_of(context, values))
}

/// `Model` context shared by LoadModel and SaveModel: `name` from `NAME`
fn build_model_name(
    definition: &IntentDefinition,
    params: &ParseNode,
) -> Result<ContextInstance, Error> {
    let context = out_context(definition, "Model")?;
    let name_value = get_inner_list_with_key(params, "NAME").ok_or(Error::MissingKey("NAME"))?;
    let name =
        leading_text(name_value).ok_or(Error::MalformedParameters("NAME is not textual"))?;
    let values = vec![value_for(context, "name", name)?];
    Ok(instance_of(context, values))
}

/// `Activity` context: the activity being renamed and its new label
fn build_rename_activity(
    definition: &IntentDefinition,
    params: &ParseNode,
) -> Result<ContextInstance, Error> {
    let context = out_context(definition, "Activity")?;
    // flattened DEF-ACT is [DEF-ACT-LABEL | DEF-ACT-ALIAS, identifier]
    let def_act = get_inner_list_with_key(params, "DEF-ACT").ok_or(Error::MissingKey("DEF-ACT"))?;
    let activity = text_at(def_act, 1).ok_or(Error::MalformedParameters(
        "DEF-ACT carries no activity identifier",
    ))?;
    let act = get_inner_list_with_key(params, "ACT").ok_or(Error::MissingKey("ACT"))?;
    let new_label = leading_text(act).ok_or(Error::MalformedParameters("ACT is not textual"))?;
    let values = vec![
        value_for(context, "activity", activity)?,
        value_for(context, "newLabel", new_label)?,
    ];
    Ok(instance_of(context, values))
}

/// `Backpath` context: backpath activity first, loop activity second
fn build_backpath(
    definition: &IntentDefinition,
    params: &ParseNode,
) -> Result<ContextInstance, Error> {
    let context = out_context(definition, "Backpath")?;
    let scopes = get_scopes(params)?;
    let backpath = scope_at(&scopes, 0)?;
    let looped = scope_at(&scopes, 1)?;
    let values = vec![
        value_for(context, "backpathScope", backpath.scope.as_str())?,
        value_for(context, "backpathActivity", backpath.activity_id.clone())?,
        value_for(context, "loopScope", looped.scope.as_str())?,
        value_for(context, "loopActivity", looped.activity_id.clone())?,
    ];
    Ok(instance_of(context, values))
}

/// Shared wiring for `Precedence` and `Succession`: both consume the scope
/// pairs in the same before/after order, only the context name differs
fn build_before_after(
    definition: &IntentDefinition,
    context_name: &'static str,
    params: &ParseNode,
) -> Result<ContextInstance, Error> {
    let context = out_context(definition, context_name)?;
    let scopes = get_scopes(params)?;
    let before = scope_at(&scopes, 0)?;
    let after = scope_at(&scopes, 1)?;
    let values = vec![
        value_for(context, "beforeScope", before.scope.as_str())?,
        value_for(context, "beforeActivity", before.activity_id.clone())?,
        value_for(context, "afterScope", after.scope.as_str())?,
        value_for(context, "afterActivity", after.activity_id.clone())?,
    ];
    Ok(instance_of(context, values))
}

/// `Between` context: the enclosed activity, then the left and right bounds
fn build_between(
    definition: &IntentDefinition,
    params: &ParseNode,
) -> Result<ContextInstance, Error> {
    let context = out_context(definition, "Between")?;
    let scopes = get_scopes(params)?;
    let between = scope_at(&scopes, 0)?;
    let left = scope_at(&scopes, 1)?;
    let right = scope_at(&scopes, 2)?;
    let values = vec![
        value_for(context, "scopeBetween", between.scope.as_str())?,
        value_for(context, "between", between.activity_id.clone())?,
        value_for(context, "scopeLeft", left.scope.as_str())?,
        value_for(context, "left", left.activity_id.clone())?,
        value_for(context, "scopeRight", right.scope.as_str())?,
        value_for(context, "right", right.activity_id.clone())?,
    ];
    Ok(instance_of(context, values))
}

/// `Repeat` context: a single scoped activity
fn build_repeats(
    definition: &IntentDefinition,
    params: &ParseNode,
) -> Result<ContextInstance, Error> {
    let context = out_context(definition, "Repeat")?;
    let scopes = get_scopes(params)?;
    let repeated = scope_at(&scopes, 0)?;
    let values = vec![
        value_for(context, "scope", repeated.scope.as_str())?,
        value_for(context, "activity", repeated.activity_id.clone())?,
    ];
    Ok(instance_of(context, values))
}

/// `NoCoOccurs` context: the two mutually exclusive activities
fn build_no_co_occurs(
    definition: &IntentDefinition,
    params: &ParseNode,
) -> Result<ContextInstance, Error> {
    let context = out_context(definition, "NoCoOccurs")?;
    let scopes = get_scopes(params)?;
    let left = scope_at(&scopes, 0)?;
    let right = scope_at(&scopes, 1)?;
    let values = vec![
        value_for(context, "leftScope", left.scope.as_str())?,
        value_for(context, "left", left.activity_id.clone())?,
        value_for(context, "rightScope", right.scope.as_str())?,
        value_for(context, "right", right.activity_id.clone())?,
    ];
    Ok(instance_of(context, values))
}
