//! Predicate descriptors and descriptor-term decoding.

use crate::engine::Engine;
use crate::walk::walk_list;
use crate::{BridgeError, BridgeResult};

/// A resolved predicate: optional module, name, arity and the engine's
/// callable handle. For calls that return a value the last argument slot is
/// reserved for the return term, so such predicates have `arity >= 1`.
pub struct Predicate<E: Engine> {
    pub module: Option<String>,
    pub name: String,
    pub arity: usize,
    pub handle: E::Predicate,
}

impl<E: Engine> Predicate<E> {
    /// `module:name` when a module is present, plain `name` otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.module {
            Some(module) => format!("{}:{}", module, self.name),
            None => self.name.clone(),
        }
    }
}

impl<E: Engine> Clone for Predicate<E> {
    fn clone(&self) -> Self {
        Self {
            module: self.module.clone(),
            name: self.name.clone(),
            arity: self.arity,
            handle: self.handle.clone(),
        }
    }
}

impl<E: Engine> std::fmt::Debug for Predicate<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.qualified_name(), self.arity)
    }
}

/// Decode a list of predicate descriptor terms and resolve each one.
///
/// The engine represents `bar/3` as the compound `/(bar, 3)` and the
/// module-qualified `foo:bar/3` as `:(foo, /(bar, 3))`. Both shapes are
/// accepted; a descriptor that resolves to no known predicate is an engine
/// error.
pub fn collect_predicates<E: Engine>(
    engine: &mut E,
    list: E::Term,
) -> BridgeResult<Vec<Predicate<E>>> {
    let count = engine.list_length(list).ok_or_else(|| {
        BridgeError::MalformedResult("predicate descriptors are not a proper list".to_string())
    })?;

    let mut descriptors = Vec::new();
    descriptors
        .try_reserve_exact(count)
        .map_err(|_| BridgeError::OutOfMemory)?;

    walk_list(&*engine, list, |engine, term, _| {
        descriptors.push(decode_descriptor(engine, term)?);
        Ok(())
    })?;

    let mut predicates = Vec::new();
    predicates
        .try_reserve_exact(count)
        .map_err(|_| BridgeError::OutOfMemory)?;

    for (module, name, arity) in descriptors {
        let handle = engine
            .find_predicate(module.as_deref(), &name, arity)
            .ok_or_else(|| {
                BridgeError::Engine(format!("cannot resolve predicate {}/{}", name, arity))
            })?;
        predicates.push(Predicate {
            module,
            name,
            arity,
            handle,
        });
    }

    Ok(predicates)
}

fn decode_descriptor<E: Engine>(
    engine: &E,
    descriptor: E::Term,
) -> BridgeResult<(Option<String>, String, usize)> {
    let (functor, arity) = engine
        .functor(descriptor)
        .ok_or_else(|| malformed_descriptor(engine, descriptor))?;

    let (module, slash) = if functor == ":" && arity == 2 {
        let module_term = engine
            .arg(descriptor, 1)
            .ok_or_else(|| malformed_descriptor(engine, descriptor))?;
        let module = engine
            .text_value(module_term)
            .ok_or_else(|| malformed_descriptor(engine, descriptor))?;
        let slash = engine
            .arg(descriptor, 2)
            .ok_or_else(|| malformed_descriptor(engine, descriptor))?;
        (Some(module), slash)
    } else {
        (None, descriptor)
    };

    let (slash_functor, slash_arity) = engine
        .functor(slash)
        .ok_or_else(|| malformed_descriptor(engine, slash))?;
    if slash_functor != "/" || slash_arity != 2 {
        return Err(malformed_descriptor(engine, slash));
    }

    let name_term = engine
        .arg(slash, 1)
        .ok_or_else(|| malformed_descriptor(engine, slash))?;
    let name = engine
        .text_value(name_term)
        .ok_or_else(|| malformed_descriptor(engine, slash))?;

    let arity_term = engine
        .arg(slash, 2)
        .ok_or_else(|| malformed_descriptor(engine, slash))?;
    let arity = engine
        .integer_value(arity_term)
        .and_then(|value| usize::try_from(value).ok())
        .ok_or_else(|| malformed_descriptor(engine, slash))?;

    Ok((module, name, arity))
}

fn malformed_descriptor<E: Engine>(engine: &E, term: E::Term) -> BridgeError {
    let written = engine
        .written_form(term)
        .unwrap_or_else(|| format!("{:?}", term));
    BridgeError::MalformedResult(format!("invalid predicate descriptor {}", written))
}
