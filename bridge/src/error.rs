use thiserror::Error;

/// Error types for the marshalling layer.
///
/// An exception raised by the engine while a query runs is *not* represented
/// here: it is a defined outcome of invocation and travels in the success
/// channel as [`crate::Envelope::Exception`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    /// Fewer arguments than the predicate's value-returning call shape needs.
    #[error("{predicate} expects {expected} arguments, {actual} given")]
    ArityMismatch {
        predicate: String,
        expected: usize,
        actual: usize,
    },

    /// A term shape the decoder cannot represent on the host side.
    #[error("cannot represent prolog term {0} on the host side")]
    UnsupportedTerm(String),

    /// A result list whose shape defeats action/object classification.
    #[error("malformed result: {0}")]
    MalformedResult(String),

    /// Allocation failure while building a result collection.
    #[error("out of memory while collecting results")]
    OutOfMemory,

    /// The engine could not service the request at all, e.g. a query
    /// could not be opened or a predicate handle failed to resolve.
    #[error("engine error: {0}")]
    Engine(String),
}
