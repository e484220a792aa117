//! Error taxonomy for the normalization and mapping engine

use thiserror::Error;

/// Mapping failures, fatal to the current recognition call
///
/// The top-level entry point (`recognizer::recognize`) converts all of these
/// into the fallback result; hosts calling the inner conversion functions
/// directly observe the concrete cause.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("unknown constraint code `{0}`")]
    UnknownConstraint(String),

    #[error("unknown selector code `{0}`")]
    UnknownSelector(String),

    #[error("missing required key `{0}` in the parameter tree")]
    MissingKey(&'static str),

    #[error("malformed parameter tree: {0}")]
    MalformedParameters(&'static str),

    #[error("intent `{intent}` has no out-context `{context}`")]
    MissingOutContext {
        context: &'static str,
        intent: String,
    },

    #[error("context `{context}` has no parameter `{parameter}`")]
    MissingParameter {
        parameter: &'static str,
        context: String,
    },
}
