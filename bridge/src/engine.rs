//! The boundary between the marshaller and the logic engine.
//!
//! Everything the marshaller needs from the engine is expressed through the
//! [`Engine`] trait: transient term references, predicate handles, and the
//! frame/query lifecycle. The engine owns every term; the marshaller only
//! reads and copies, and it bounds the lifetime of its term references with
//! a [`Frame`]. Both [`Frame`] and [`Query`] release their underlying engine
//! resource in `Drop`, so every exit path gives the resource back exactly
//! once.
//!
//! Engine state is single-threaded. A [`Query`] borrows its [`Frame`]
//! mutably and the frame borrows the engine mutably, so at most one query
//! can be live at a time and the borrow checker enforces the serialization
//! the engine requires.

use crate::BridgeResult;
use std::ops::{Deref, DerefMut};

/// Classification of a term reference, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
    Integer,
    Float,
    Atom,
    String,
    /// An unbound variable.
    Variable,
    /// Any compound term, including list cells.
    Compound,
}

/// Host-side view of an embedded logic engine.
///
/// Term construction takes `&mut self`; inspection takes `&self`. Bound
/// variables are reported as their binding, so inspection methods never see
/// a bound variable's `Variable` kind.
pub trait Engine {
    /// Transient term reference, valid while its enclosing frame is open.
    type Term: Copy + std::fmt::Debug;
    /// Engine-side frame token.
    type Frame;
    /// Engine-side query token.
    type Query;
    /// Opaque callable handle for a resolved predicate.
    type Predicate: Clone;

    fn open_frame(&mut self) -> BridgeResult<Self::Frame>;
    fn discard_frame(&mut self, frame: Self::Frame);

    /// Resolve a predicate handle by module, name and arity.
    fn find_predicate(
        &mut self,
        module: Option<&str>,
        name: &str,
        arity: usize,
    ) -> Option<Self::Predicate>;

    fn open_query(
        &mut self,
        predicate: &Self::Predicate,
        args: &[Self::Term],
    ) -> BridgeResult<Self::Query>;
    /// Advance to the next solution. Returns false when the query fails
    /// or raises; a raised term is then available from [`Engine::exception`].
    fn next_solution(&mut self, query: &mut Self::Query) -> bool;
    fn exception(&self, query: &Self::Query) -> Option<Self::Term>;
    fn close_query(&mut self, query: Self::Query);

    fn new_atom(&mut self, text: &str) -> BridgeResult<Self::Term>;
    fn new_integer(&mut self, value: i64) -> BridgeResult<Self::Term>;
    fn new_float(&mut self, value: f64) -> BridgeResult<Self::Term>;
    fn new_variable(&mut self) -> BridgeResult<Self::Term>;

    fn kind(&self, term: Self::Term) -> TermKind;
    fn integer_value(&self, term: Self::Term) -> Option<i64>;
    fn float_value(&self, term: Self::Term) -> Option<f64>;
    /// Text of an atomic term: atom or string text, numbers as digits.
    /// None for variables and compounds.
    fn text_value(&self, term: Self::Term) -> Option<String>;
    /// Generic written form of any term, the way the engine would print it.
    fn written_form(&self, term: Self::Term) -> Option<String>;
    /// Functor name and arity. Atoms report arity 0.
    fn functor(&self, term: Self::Term) -> Option<(String, usize)>;
    /// 1-based argument access into a compound term.
    fn arg(&self, term: Self::Term, index: usize) -> Option<Self::Term>;
    /// True for proper lists, including the empty list atom.
    fn is_list(&self, term: Self::Term) -> bool;
    /// Split a list cell into head and tail. None at the end of the list
    /// and on anything that is not a list cell.
    fn list_pair(&self, term: Self::Term) -> Option<(Self::Term, Self::Term)>;

    /// Number of elements in a proper list. None for improper lists and
    /// non-lists.
    fn list_length(&self, term: Self::Term) -> Option<usize> {
        if !self.is_list(term) {
            return None;
        }
        let mut length = 0;
        let mut cursor = term;
        while let Some((_, tail)) = self.list_pair(cursor) {
            length += 1;
            cursor = tail;
        }
        Some(length)
    }
}

/// Scoped engine frame bounding the lifetime of term references.
///
/// Dereferences to the engine so terms can be built and inspected through
/// it. Discards the underlying frame when dropped.
pub struct Frame<'e, E: Engine> {
    engine: &'e mut E,
    handle: Option<E::Frame>,
}

impl<'e, E: Engine> Frame<'e, E> {
    pub fn open(engine: &'e mut E) -> BridgeResult<Self> {
        let handle = engine.open_frame()?;
        Ok(Self {
            engine,
            handle: Some(handle),
        })
    }
}

impl<E: Engine> Deref for Frame<'_, E> {
    type Target = E;

    fn deref(&self) -> &E {
        self.engine
    }
}

impl<E: Engine> DerefMut for Frame<'_, E> {
    fn deref_mut(&mut self) -> &mut E {
        self.engine
    }
}

impl<E: Engine> Drop for Frame<'_, E> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.engine.discard_frame(handle);
        }
    }
}

/// Scoped query over a predicate, closed when dropped.
pub struct Query<'f, 'e, E: Engine> {
    frame: &'f mut Frame<'e, E>,
    handle: Option<E::Query>,
}

impl<'f, 'e, E: Engine> Query<'f, 'e, E> {
    pub fn open(
        frame: &'f mut Frame<'e, E>,
        predicate: &E::Predicate,
        args: &[E::Term],
    ) -> BridgeResult<Self> {
        let handle = frame.engine.open_query(predicate, args)?;
        Ok(Self {
            frame,
            handle: Some(handle),
        })
    }

    pub fn next_solution(&mut self) -> bool {
        match self.handle.as_mut() {
            Some(handle) => self.frame.engine.next_solution(handle),
            None => false,
        }
    }

    /// The term raised by the query, if any.
    pub fn exception(&self) -> Option<E::Term> {
        self.handle
            .as_ref()
            .and_then(|handle| self.frame.engine.exception(handle))
    }

    pub fn engine(&self) -> &E {
        self.frame.engine
    }
}

impl<E: Engine> Drop for Query<'_, '_, E> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.frame.engine.close_query(handle);
        }
    }
}
