//! Recognizer core - normalization and mapping engine for grammar responses
//!
//! This crate turns the response of an external natural-language grammar
//! server into a structured recognized intent for a conversational-agent
//! runtime: it flattens the server's irregularly nested parse tree, resolves
//! grammar-specific constraint and selector codes into the runtime's
//! canonical vocabulary, and builds typed out-context instances per
//! recognized intent kind.
//!
//! Transport, session storage and the intent registry are collaborator
//! concerns; the engine consumes an already-decoded [`GrammarResponse`] and
//! talks to the latter two through the [`IntentRegistry`] and
//! [`SessionStore`] traits.

pub mod contexts;
pub mod error;
pub mod recognizer;
pub mod registry;
pub mod scopes;
pub mod taxonomy;
pub mod tree;
pub mod types;

pub use contexts::*;
pub use error::Error;
pub use recognizer::*;
pub use registry::*;
pub use scopes::*;
pub use taxonomy::*;
pub use tree::*;
pub use types::*;
