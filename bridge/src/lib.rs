//! # prolog-bridge
//!
//! **Term marshalling and result collection for an embedded Prolog engine**
//!
//! This crate converts values crossing the boundary between a dynamically
//! typed logic engine and a statically typed host program. Rule sources
//! return their results as untyped list terms; this crate classifies those
//! lists into action or object shapes, copies them into owned host
//! structures wrapped in a tagged [`Envelope`], renders raised exception
//! terms as diagnostics, and marshals typed host arguments into engine
//! invocations.
//!
//! ## Quick Start
//!
//! ```rust
//! use prolog_bridge::{Action, Envelope};
//!
//! let envelope = Envelope::Actions(vec![Action {
//!     params: vec!["audio".to_string(), "mute".to_string()],
//! }]);
//! assert_eq!(envelope.flatten().unwrap(), "[[audio mute]]");
//! ```
//!
//! ## Core Concepts
//!
//! ### Engine boundary
//! The engine is consumed through the [`Engine`] trait: opaque term
//! references, predicate handles, and frame/query scopes. Every frame and
//! query is a guard that releases its engine resource when dropped.
//!
//! ### Results
//! A query's first solution decodes into exactly one of four envelope
//! variants: an action list, an object list, an exception diagnostic, or a
//! plain scalar. The discriminator is the enum tag; dropping the envelope
//! releases everything it owns.
//!
//! ### Invocation
//! [`invoke`] encodes typed host arguments, runs the query to its first
//! solution, and collects the reserved return-value slot. Calls are
//! synchronous and single-threaded; there is no backtracking into further
//! solutions.

pub mod classify;
pub mod collect;
pub mod engine;
pub mod error;
pub mod exception;
pub mod invoke;
pub mod predicate;
pub mod result;
pub mod serializers;
pub mod walk;

pub use classify::{classify, ListShape};
pub use collect::decode;
pub use engine::{Engine, Frame, Query, TermKind};
pub use error::BridgeError;
pub use exception::decode_exception;
pub use invoke::{invoke, Arg};
pub use predicate::{collect_predicates, Predicate};
pub use result::{Action, Envelope, FieldValue, Object, ObjectField, Scalar, OBJECT_NAME};
pub use serializers::to_json;
pub use walk::{walk_list, ListIter};

/// Result type for marshalling operations
pub type BridgeResult<T> = Result<T, BridgeError>;

#[cfg(test)]
mod tests;
