//! Recognition entry points - response to recognition result
//!
//! `recognize` is the total entry point hosts call per conversation turn: it
//! never fails, degrading every failure short of a host bug to the fallback
//! result. `convert_response` is the fallible inner conversion for hosts that
//! want to observe mapping errors themselves.

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::contexts::build_contexts;
use crate::error::Error;
use crate::registry::{IntentRegistry, SessionStore};
use crate::taxonomy::resolve_intent_name;
use crate::types::{GrammarResponse, RecognitionResult};

/// Session key the response's style flags are persisted under
pub const INTENT_STYLE_KEY: &str = "intent-style";

/// Map a successful grammar response onto a recognition result
///
/// Resolves the intent name through the taxonomy tables, looks the name up in
/// the registry and dispatches to the matching context builder. An intent
/// unknown to the registry yields the fallback result; mapping failures in
/// name resolution or context building are returned as errors.
pub fn convert_response(
    response: &GrammarResponse,
    registry: &dyn IntentRegistry,
) -> Result<RecognitionResult, Error> {
    let intent_name = resolve_intent_name(&response.intent, &response.parameters)?;
    let Some(definition) = registry.lookup_intent(&intent_name) else {
        warn!(intent = %intent_name, "intent is not registered, falling back");
        return Ok(RecognitionResult::fallback());
    };
    let contexts = build_contexts(&intent_name, definition, &response.parameters)?;
    Ok(RecognitionResult {
        intent: definition.name.clone(),
        confidence: Some(1.0),
        contexts,
    })
}

/// Turn a grammar server response into a recognition result, never failing
///
/// A non-`"OK"` result or any mapping failure degrades to the fallback
/// result; parse-tree shape variability is expected in production traffic.
/// On success the response's `intent-style` flags are persisted to the
/// session store before the result is returned.
pub fn recognize(
    response: &GrammarResponse,
    registry: &dyn IntentRegistry,
    session: &mut dyn SessionStore,
) -> RecognitionResult {
    if response.result != "OK" {
        error!(
            result = %response.result,
            "grammar server reported a failed parse"
        );
        return RecognitionResult::fallback();
    }
    let result = match convert_response(response, registry) {
        Ok(result) => result,
        Err(err) => {
            error!(
                error = %err,
                intent = %response.intent,
                "cannot map the grammar response, falling back"
            );
            return RecognitionResult::fallback();
        }
    };
    store_intent_style(response, session);
    debug!(
        intent = %result.intent,
        contexts = result.contexts.len(),
        "grammar response converted"
    );
    result
}

fn store_intent_style(response: &GrammarResponse, session: &mut dyn SessionStore) {
    let flags = response
        .intent_style
        .iter()
        .map(|(name, enabled)| (name.clone(), Value::Bool(*enabled)))
        .collect();
    session.store(INTENT_STYLE_KEY, Value::Object(flags));
}
