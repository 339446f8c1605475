//! Invocation of engine predicates with typed host arguments.

use crate::collect::decode;
use crate::engine::{Engine, Frame, Query};
use crate::exception::decode_exception;
use crate::predicate::Predicate;
use crate::result::Envelope;
use crate::{BridgeError, BridgeResult};

/// A typed argument to a predicate invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    Text(&'a str),
    Integer(i64),
    Float(f64),
}

/// Call a predicate with the given arguments and collect its first solution.
///
/// The predicate's last argument slot is reserved for the return value, so
/// `args` must supply at least `arity - 1` values; a shortfall is a hard
/// [`BridgeError::ArityMismatch`] before the engine is touched, while extra
/// arguments are logged and ignored. Exactly one solution is requested. An
/// exception raised by the query is a defined outcome and is returned as
/// [`Envelope::Exception`] through the success channel; a query that fails
/// without raising leaves the return slot unbound and therefore yields
/// [`crate::Scalar::Unit`].
///
/// The frame and query opened here are released on every exit path.
pub fn invoke<E: Engine>(
    engine: &mut E,
    predicate: &Predicate<E>,
    args: &[Arg<'_>],
) -> BridgeResult<Envelope> {
    if predicate.arity == 0 {
        return Err(BridgeError::Engine(format!(
            "predicate {:?} has no return slot",
            predicate
        )));
    }

    let expected = predicate.arity - 1;
    if args.len() < expected {
        return Err(BridgeError::ArityMismatch {
            predicate: predicate.qualified_name(),
            expected,
            actual: args.len(),
        });
    }
    if args.len() > expected {
        tracing::warn!(
            predicate = %predicate.qualified_name(),
            ignored = args.len() - expected,
            "ignoring extra arguments"
        );
    }

    let mut frame = Frame::open(engine)?;

    let mut terms = Vec::new();
    terms
        .try_reserve_exact(predicate.arity)
        .map_err(|_| BridgeError::OutOfMemory)?;
    for arg in &args[..expected] {
        let term = match arg {
            Arg::Text(text) => frame.new_atom(text)?,
            Arg::Integer(value) => frame.new_integer(*value)?,
            Arg::Float(value) => frame.new_float(*value)?,
        };
        terms.push(term);
    }
    let retval = frame.new_variable()?;
    terms.push(retval);

    let mut query = Query::open(&mut frame, &predicate.handle, &terms)?;
    query.next_solution();

    if let Some(raised) = query.exception() {
        let message = decode_exception(query.engine(), raised);
        return Ok(Envelope::Exception(message));
    }

    decode(query.engine(), retval)
}
