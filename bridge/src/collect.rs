//! Decoding of solution terms into tagged result envelopes.
//!
//! [`decode`] is the single decision point translating the engine's dynamic
//! typing into the host's closed set of result shapes. Scalars are wrapped
//! directly; lists are classified and handed to the matching collector.

use crate::classify::{classify, ListShape};
use crate::engine::{Engine, TermKind};
use crate::result::{Action, Envelope, FieldValue, Object, ObjectField, Scalar, OBJECT_NAME};
use crate::walk::walk_list;
use crate::{BridgeError, BridgeResult};

/// Convert a solution term into an owned, tagged result.
///
/// Integers and floats become numeric scalars, atoms and strings become
/// text scalars, an unbound variable becomes [`Scalar::Unit`] ("no value
/// bound", not an error), and a proper list is classified and collected as
/// actions or objects. Any other compound term is unsupported.
pub fn decode<E: Engine>(engine: &E, term: E::Term) -> BridgeResult<Envelope> {
    match engine.kind(term) {
        TermKind::Integer => {
            let value = engine
                .integer_value(term)
                .ok_or_else(|| read_back_failure(engine, term))?;
            Ok(Envelope::Scalar(Scalar::Integer(value)))
        }
        TermKind::Float => {
            let value = engine
                .float_value(term)
                .ok_or_else(|| read_back_failure(engine, term))?;
            Ok(Envelope::Scalar(Scalar::Float(value)))
        }
        TermKind::Atom => {
            // [] is an atom
            if engine.is_list(term) {
                return decode_list(engine, term);
            }
            let text = engine
                .text_value(term)
                .ok_or_else(|| read_back_failure(engine, term))?;
            Ok(Envelope::Scalar(Scalar::Text(text)))
        }
        TermKind::String => {
            let text = engine
                .text_value(term)
                .ok_or_else(|| read_back_failure(engine, term))?;
            Ok(Envelope::Scalar(Scalar::Text(text)))
        }
        TermKind::Variable => Ok(Envelope::Scalar(Scalar::Unit)),
        TermKind::Compound => {
            if engine.is_list(term) {
                decode_list(engine, term)
            } else {
                tracing::warn!("cannot handle compound result term");
                Err(BridgeError::UnsupportedTerm(describe(engine, term)))
            }
        }
    }
}

fn decode_list<E: Engine>(engine: &E, list: E::Term) -> BridgeResult<Envelope> {
    let length = engine
        .list_length(list)
        .ok_or_else(|| BridgeError::MalformedResult("result list has an improper tail".to_string()))?;

    // An empty result list has always fallen through to the object
    // collector; keep that for output compatibility.
    if length == 0 {
        return Ok(Envelope::Objects(Vec::new()));
    }

    match classify(engine, list)? {
        ListShape::Actions => Ok(Envelope::Actions(collect_actions(engine, list, length)?)),
        ListShape::Objects => Ok(Envelope::Objects(collect_objects(engine, list, length)?)),
    }
}

/// Collect every row of an action list, preserving order.
fn collect_actions<E: Engine>(
    engine: &E,
    list: E::Term,
    length: usize,
) -> BridgeResult<Vec<Action>> {
    let mut actions = Vec::new();
    actions
        .try_reserve_exact(length)
        .map_err(|_| BridgeError::OutOfMemory)?;

    walk_list(engine, list, |engine, row, _| {
        actions.push(collect_action(engine, row)?);
        Ok(())
    })?;

    Ok(actions)
}

/// Collect one action row: every element copied as an owned string.
/// An empty row yields an empty action.
fn collect_action<E: Engine>(engine: &E, row: E::Term) -> BridgeResult<Action> {
    let length = engine
        .list_length(row)
        .ok_or_else(|| BridgeError::MalformedResult("action row is not a proper list".to_string()))?;

    let mut params = Vec::new();
    params
        .try_reserve_exact(length)
        .map_err(|_| BridgeError::OutOfMemory)?;

    walk_list(engine, row, |engine, param, _| {
        let text = engine
            .text_value(param)
            .ok_or_else(|| BridgeError::UnsupportedTerm(describe(engine, param)))?;
        params.push(text);
        Ok(())
    })?;

    Ok(Action { params })
}

/// Collect every row of an object list, preserving order.
fn collect_objects<E: Engine>(
    engine: &E,
    list: E::Term,
    length: usize,
) -> BridgeResult<Vec<Object>> {
    let mut objects = Vec::new();
    objects
        .try_reserve_exact(length)
        .map_err(|_| BridgeError::OutOfMemory)?;

    walk_list(engine, list, |engine, row, _| {
        objects.push(collect_object(engine, row)?);
        Ok(())
    })?;

    Ok(objects)
}

/// Collect one object's defining list.
///
/// The first element must be the object's name, a text term, and is stored
/// as a synthetic leading `"name"` field of string type. Every other
/// element must be a `[field, value]` pair with a flat scalar value;
/// nested values are rejected.
fn collect_object<E: Engine>(engine: &E, row: E::Term) -> BridgeResult<Object> {
    let length = engine
        .list_length(row)
        .ok_or_else(|| BridgeError::MalformedResult("object row is not a proper list".to_string()))?;

    let mut fields = Vec::new();
    fields
        .try_reserve_exact(length)
        .map_err(|_| BridgeError::OutOfMemory)?;

    walk_list(engine, row, |engine, item, index| {
        if index == 0 {
            let name = engine
                .text_value(item)
                .ok_or_else(|| BridgeError::UnsupportedTerm(describe(engine, item)))?;
            fields.push(ObjectField {
                name: OBJECT_NAME.to_string(),
                value: FieldValue::Text(name),
            });
            return Ok(());
        }
        fields.push(collect_field(engine, item)?);
        Ok(())
    })?;

    Ok(Object { fields })
}

fn collect_field<E: Engine>(engine: &E, pair: E::Term) -> BridgeResult<ObjectField> {
    let (field, rest) = engine
        .list_pair(pair)
        .ok_or_else(|| BridgeError::UnsupportedTerm(describe(engine, pair)))?;
    let (value, _) = engine
        .list_pair(rest)
        .ok_or_else(|| BridgeError::UnsupportedTerm(describe(engine, pair)))?;

    let name = engine
        .text_value(field)
        .ok_or_else(|| BridgeError::UnsupportedTerm(describe(engine, field)))?;

    let value = match engine.kind(value) {
        TermKind::Atom | TermKind::String => FieldValue::Text(
            engine
                .text_value(value)
                .ok_or_else(|| read_back_failure(engine, value))?,
        ),
        TermKind::Integer => FieldValue::Integer(
            engine
                .integer_value(value)
                .ok_or_else(|| read_back_failure(engine, value))?,
        ),
        TermKind::Float => FieldValue::Float(
            engine
                .float_value(value)
                .ok_or_else(|| read_back_failure(engine, value))?,
        ),
        // object fields are flat; nested lists and compounds are rejected
        _ => {
            tracing::warn!(field = %name, "invalid term kind for object field value");
            return Err(BridgeError::UnsupportedTerm(describe(engine, value)));
        }
    };

    Ok(ObjectField { name, value })
}

fn describe<E: Engine>(engine: &E, term: E::Term) -> String {
    engine
        .written_form(term)
        .unwrap_or_else(|| format!("{:?}", term))
}

fn read_back_failure<E: Engine>(engine: &E, term: E::Term) -> BridgeError {
    BridgeError::UnsupportedTerm(describe(engine, term))
}
