//! An engine double for exercising the marshaller without a real Prolog
//! runtime. Terms live in a flat arena, predicates run scripted outcomes,
//! and frame/query lifecycles are counted so tests can assert that every
//! resource taken is given back.

use std::collections::HashMap;

use crate::engine::{Engine, TermKind};
use crate::{BridgeError, BridgeResult};

/// Index into the mock's term arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermRef(usize);

#[derive(Debug, Clone)]
enum TermData {
    Integer(i64),
    Float(f64),
    Atom(String),
    Str(String),
    Var(Option<TermRef>),
    Compound { functor: String, args: Vec<TermRef> },
}

/// Recipe for a term the mock instantiates into its arena.
#[derive(Debug, Clone)]
pub enum TermSpec {
    Integer(i64),
    Float(f64),
    Atom(String),
    Str(String),
    Var,
    List(Vec<TermSpec>),
    Compound(String, Vec<TermSpec>),
}

impl TermSpec {
    pub fn atom(text: &str) -> Self {
        TermSpec::Atom(text.to_string())
    }

    pub fn string(text: &str) -> Self {
        TermSpec::Str(text.to_string())
    }

    pub fn compound(functor: &str, args: Vec<TermSpec>) -> Self {
        TermSpec::Compound(functor.to_string(), args)
    }
}

/// Scripted outcome of a query against a registered predicate.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Bind the reserved return slot to the instantiated spec and succeed.
    Succeed(TermSpec),
    /// Fail without binding anything.
    Fail,
    /// Raise the instantiated spec as an exception.
    Raise(TermSpec),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateRef(usize);

#[derive(Debug)]
pub struct QueryRef {
    id: usize,
}

struct PredicateEntry {
    module: Option<String>,
    name: String,
    arity: usize,
    outcome: Outcome,
}

struct QueryState {
    predicate: PredicateRef,
    retval: Option<TermRef>,
    exception: Option<TermRef>,
}

#[derive(Default)]
pub struct MockEngine {
    terms: Vec<TermData>,
    predicates: Vec<PredicateEntry>,
    queries: HashMap<usize, QueryState>,
    next_query: usize,
    /// Simulate an engine that cannot open queries.
    pub refuse_queries: bool,
    pub frames_opened: usize,
    pub frames_discarded: usize,
    pub queries_opened: usize,
    pub queries_closed: usize,
    /// Arguments of the most recently opened query, return slot included.
    pub last_args: Vec<TermRef>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        module: Option<&str>,
        name: &str,
        arity: usize,
        outcome: Outcome,
    ) -> PredicateRef {
        self.predicates.push(PredicateEntry {
            module: module.map(str::to_string),
            name: name.to_string(),
            arity,
            outcome,
        });
        PredicateRef(self.predicates.len() - 1)
    }

    /// Instantiate a term recipe into the arena.
    pub fn build(&mut self, spec: &TermSpec) -> TermRef {
        match spec {
            TermSpec::Integer(value) => self.push(TermData::Integer(*value)),
            TermSpec::Float(value) => self.push(TermData::Float(*value)),
            TermSpec::Atom(text) => self.push(TermData::Atom(text.clone())),
            TermSpec::Str(text) => self.push(TermData::Str(text.clone())),
            TermSpec::Var => self.push(TermData::Var(None)),
            TermSpec::List(items) => {
                let mut tail = self.push(TermData::Atom("[]".to_string()));
                for item in items.iter().rev() {
                    let head = self.build(item);
                    tail = self.cons(head, tail);
                }
                tail
            }
            TermSpec::Compound(functor, args) => {
                let args = args.iter().map(|arg| self.build(arg)).collect();
                self.push(TermData::Compound {
                    functor: functor.clone(),
                    args,
                })
            }
        }
    }

    /// Raw list cell, for building improper lists.
    pub fn cons(&mut self, head: TermRef, tail: TermRef) -> TermRef {
        self.push(TermData::Compound {
            functor: ".".to_string(),
            args: vec![head, tail],
        })
    }

    /// True when every frame and query taken has been given back.
    pub fn balanced(&self) -> bool {
        self.frames_opened == self.frames_discarded && self.queries_opened == self.queries_closed
    }

    fn push(&mut self, data: TermData) -> TermRef {
        self.terms.push(data);
        TermRef(self.terms.len() - 1)
    }

    fn resolve(&self, term: TermRef) -> TermRef {
        let mut current = term;
        while let TermData::Var(Some(binding)) = &self.terms[current.0] {
            current = *binding;
        }
        current
    }

    fn data(&self, term: TermRef) -> &TermData {
        &self.terms[self.resolve(term).0]
    }

    fn is_proper_list(&self, term: TermRef) -> bool {
        let mut cursor = self.resolve(term);
        loop {
            match self.data(cursor) {
                TermData::Atom(text) if text == "[]" => return true,
                TermData::Compound { functor, args } if functor == "." && args.len() == 2 => {
                    cursor = args[1];
                }
                _ => return false,
            }
        }
    }

    fn write_term(&self, term: TermRef) -> String {
        match self.data(term) {
            TermData::Integer(value) => value.to_string(),
            TermData::Float(value) => value.to_string(),
            TermData::Atom(text) => text.clone(),
            TermData::Str(text) => text.clone(),
            TermData::Var(_) => "_".to_string(),
            TermData::Compound { functor, args } => {
                if functor == "/" && args.len() == 2 {
                    return format!("{}/{}", self.write_term(args[0]), self.write_term(args[1]));
                }
                let rendered: Vec<String> = args.iter().map(|arg| self.write_term(*arg)).collect();
                format!("{}({})", functor, rendered.join(","))
            }
        }
    }
}

impl Engine for MockEngine {
    type Term = TermRef;
    type Frame = usize;
    type Query = QueryRef;
    type Predicate = PredicateRef;

    fn open_frame(&mut self) -> BridgeResult<usize> {
        self.frames_opened += 1;
        Ok(self.frames_opened)
    }

    fn discard_frame(&mut self, _frame: usize) {
        self.frames_discarded += 1;
    }

    fn find_predicate(
        &mut self,
        module: Option<&str>,
        name: &str,
        arity: usize,
    ) -> Option<PredicateRef> {
        self.predicates
            .iter()
            .position(|p| p.module.as_deref() == module && p.name == name && p.arity == arity)
            .map(PredicateRef)
    }

    fn open_query(
        &mut self,
        predicate: &PredicateRef,
        args: &[TermRef],
    ) -> BridgeResult<QueryRef> {
        if self.refuse_queries {
            return Err(BridgeError::Engine("engine unavailable".to_string()));
        }
        self.queries_opened += 1;
        self.last_args = args.to_vec();
        let id = self.next_query;
        self.next_query += 1;
        self.queries.insert(
            id,
            QueryState {
                predicate: *predicate,
                retval: args.last().copied(),
                exception: None,
            },
        );
        Ok(QueryRef { id })
    }

    fn next_solution(&mut self, query: &mut QueryRef) -> bool {
        let (outcome, retval) = match self.queries.get(&query.id) {
            Some(state) => (
                self.predicates[state.predicate.0].outcome.clone(),
                state.retval,
            ),
            None => return false,
        };
        match outcome {
            Outcome::Succeed(spec) => {
                let value = self.build(&spec);
                if let Some(slot) = retval {
                    let slot = self.resolve(slot);
                    if let TermData::Var(binding) = &mut self.terms[slot.0] {
                        *binding = Some(value);
                    }
                }
                true
            }
            Outcome::Fail => false,
            Outcome::Raise(spec) => {
                let raised = self.build(&spec);
                if let Some(state) = self.queries.get_mut(&query.id) {
                    state.exception = Some(raised);
                }
                false
            }
        }
    }

    fn exception(&self, query: &QueryRef) -> Option<TermRef> {
        self.queries.get(&query.id).and_then(|state| state.exception)
    }

    fn close_query(&mut self, query: QueryRef) {
        self.queries.remove(&query.id);
        self.queries_closed += 1;
    }

    fn new_atom(&mut self, text: &str) -> BridgeResult<TermRef> {
        Ok(self.push(TermData::Atom(text.to_string())))
    }

    fn new_integer(&mut self, value: i64) -> BridgeResult<TermRef> {
        Ok(self.push(TermData::Integer(value)))
    }

    fn new_float(&mut self, value: f64) -> BridgeResult<TermRef> {
        Ok(self.push(TermData::Float(value)))
    }

    fn new_variable(&mut self) -> BridgeResult<TermRef> {
        Ok(self.push(TermData::Var(None)))
    }

    fn kind(&self, term: TermRef) -> TermKind {
        match self.data(term) {
            TermData::Integer(_) => TermKind::Integer,
            TermData::Float(_) => TermKind::Float,
            TermData::Atom(_) => TermKind::Atom,
            TermData::Str(_) => TermKind::String,
            TermData::Var(_) => TermKind::Variable,
            TermData::Compound { .. } => TermKind::Compound,
        }
    }

    fn integer_value(&self, term: TermRef) -> Option<i64> {
        match self.data(term) {
            TermData::Integer(value) => Some(*value),
            _ => None,
        }
    }

    fn float_value(&self, term: TermRef) -> Option<f64> {
        match self.data(term) {
            TermData::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn text_value(&self, term: TermRef) -> Option<String> {
        match self.data(term) {
            TermData::Atom(text) | TermData::Str(text) => Some(text.clone()),
            TermData::Integer(value) => Some(value.to_string()),
            TermData::Float(value) => Some(value.to_string()),
            _ => None,
        }
    }

    fn written_form(&self, term: TermRef) -> Option<String> {
        Some(self.write_term(term))
    }

    fn functor(&self, term: TermRef) -> Option<(String, usize)> {
        match self.data(term) {
            TermData::Atom(text) => Some((text.clone(), 0)),
            TermData::Compound { functor, args } => Some((functor.clone(), args.len())),
            _ => None,
        }
    }

    fn arg(&self, term: TermRef, index: usize) -> Option<TermRef> {
        match self.data(term) {
            TermData::Compound { args, .. } if index >= 1 => args.get(index - 1).copied(),
            _ => None,
        }
    }

    fn is_list(&self, term: TermRef) -> bool {
        self.is_proper_list(term)
    }

    fn list_pair(&self, term: TermRef) -> Option<(TermRef, TermRef)> {
        match self.data(term) {
            TermData::Compound { functor, args } if functor == "." && args.len() == 2 => {
                Some((args[0], args[1]))
            }
            _ => None,
        }
    }
}
