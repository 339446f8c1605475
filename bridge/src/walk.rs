//! List traversal over engine terms.

use crate::engine::Engine;
use crate::BridgeResult;

/// Lazy, single-pass iterator over the elements of a list term.
///
/// Yields elements in the engine's term order. Iteration ends at the list's
/// nil tail; an improper tail also ends iteration, without error.
pub struct ListIter<'e, E: Engine> {
    engine: &'e E,
    cursor: Option<E::Term>,
}

impl<'e, E: Engine> ListIter<'e, E> {
    pub fn new(engine: &'e E, list: E::Term) -> Self {
        Self {
            engine,
            cursor: Some(list),
        }
    }
}

impl<E: Engine> Iterator for ListIter<'_, E> {
    type Item = E::Term;

    fn next(&mut self) -> Option<E::Term> {
        let cursor = self.cursor?;
        let (head, tail) = match self.engine.list_pair(cursor) {
            Some(pair) => pair,
            None => {
                self.cursor = None;
                return None;
            }
        };
        self.cursor = Some(tail);
        Some(head)
    }
}

/// Invoke `callback` once per list element with a zero-based index.
///
/// The first callback error aborts the walk and is propagated unchanged;
/// whatever the callback built before the failure stays with the caller.
pub fn walk_list<E, F>(engine: &E, list: E::Term, mut callback: F) -> BridgeResult<()>
where
    E: Engine,
    F: FnMut(&E, E::Term, usize) -> BridgeResult<()>,
{
    for (index, element) in ListIter::new(engine, list).enumerate() {
        callback(engine, element, index)?;
    }
    Ok(())
}
