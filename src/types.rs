//! Core data types for grammar server responses and recognition results

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Reserved intent name used when no concrete intent can be produced
pub const DEFAULT_FALLBACK_INTENT: &str = "Default_Fallback_Intent";

/// Number of dialogue turns an out-context instance stays alive.
/// Policy constant of the host runtime's context-expiry model.
pub const CONTEXT_LIFESPAN: u32 = 5;

/// A node of the grammar server's parse tree
///
/// The server emits a generic nested-array structure: leaves are strings or
/// booleans, everything else is an ordered list of nodes. Keyed entries are
/// two-element lists whose first element is a textual key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParseNode {
    Text(String),
    Flag(bool),
    List(Vec<ParseNode>),
}

impl ParseNode {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParseNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ParseNode]> {
        match self {
            ParseNode::List(items) => Some(items),
            _ => None,
        }
    }

    /// Element at `index` when the node is a list
    pub fn get(&self, index: usize) -> Option<&ParseNode> {
        self.as_list()?.get(index)
    }
}

impl Default for ParseNode {
    fn default() -> Self {
        ParseNode::List(Vec::new())
    }
}

/// Style flags the grammar server attaches to a parse, persisted to session
/// state verbatim and not otherwise interpreted by this engine
pub type IntentStyle = AHashMap<String, bool>;

/// Decoded body of a grammar server response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarResponse {
    /// `"OK"` on a successful parse, an error string otherwise
    pub result: String,
    /// Raw grammar intent name, possibly rewritten by taxonomy resolution
    #[serde(default)]
    pub intent: String,
    /// Parse tree of keyed parameter entries
    #[serde(default)]
    pub parameters: ParseNode,
    #[serde(rename = "intent-style", default)]
    pub intent_style: IntentStyle,
}

/// A single named parameter value inside a context instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextParameterValue {
    pub parameter: String,
    pub value: String,
}

/// A populated out-context attached to a recognition result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextInstance {
    pub name: String,
    pub lifespan: u32,
    pub values: Vec<ContextParameterValue>,
}

/// Outcome of one recognition call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub intent: String,
    /// `Some(1.0)` once an intent name is resolved, `None` for the fallback
    pub confidence: Option<f32>,
    pub contexts: Vec<ContextInstance>,
}

impl RecognitionResult {
    /// The fallback result: reserved intent, no contexts, no confidence
    pub fn fallback() -> Self {
        Self {
            intent: DEFAULT_FALLBACK_INTENT.to_string(),
            confidence: None,
            contexts: Vec::new(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.intent == DEFAULT_FALLBACK_INTENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_node_from_json() {
        let node: ParseNode =
            serde_json::from_value(json!([["ACT", ["X", "Y"]], true])).unwrap();

        let items = node.as_list().expect("top level is a list");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].get(0).and_then(ParseNode::as_text), Some("ACT"));
        assert_eq!(items[1], ParseNode::Flag(true));
    }

    #[test]
    fn test_response_defaults() {
        let response: GrammarResponse =
            serde_json::from_value(json!({ "result": "KO" })).unwrap();

        assert_eq!(response.result, "KO");
        assert!(response.intent.is_empty());
        assert_eq!(response.parameters, ParseNode::List(Vec::new()));
        assert!(response.intent_style.is_empty());
    }

    #[test]
    fn test_intent_style_field() {
        let response: GrammarResponse = serde_json::from_value(json!({
            "result": "OK",
            "intent": "AddActivity",
            "intent-style": { "imperative": true, "passive": false }
        }))
        .unwrap();

        assert_eq!(response.intent_style.get("imperative"), Some(&true));
        assert_eq!(response.intent_style.get("passive"), Some(&false));
    }

    #[test]
    fn test_fallback_result() {
        let fallback = RecognitionResult::fallback();
        assert!(fallback.is_fallback());
        assert!(fallback.confidence.is_none());
        assert!(fallback.contexts.is_empty());
    }
}
